use crate::model::role::Role;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    pub role: Role,
    /// OAuth access token for the user's calendar, when the auth
    /// collaborator provisioned one.
    pub google_access_token: Option<String>,
}
