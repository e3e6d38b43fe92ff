use strum::{AsRefStr, EnumString};

/// Closed role set. Every policy decision matches on this exhaustively,
/// so adding a role forces an audit of all gating sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    Student,
}
