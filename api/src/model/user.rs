use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{event::CreateUser, ReservationUser, User},
};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, VariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    Admin,
    Student,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::Student => Self::Student,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Admin => Self::Admin,
            RoleName::Student => Self::Student,
        }
    }
}

/// Matches the frontend `UserDto` contract: `{ id, email, nombre,
/// rol }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub nombre: String,
    pub rol: RoleName,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            user_name,
            email,
            role,
        } = value;
        Self {
            id: user_id,
            email,
            nombre: user_name,
            rol: RoleName::from(role),
        }
    }
}

impl From<ReservationUser> for UserResponse {
    fn from(value: ReservationUser) -> Self {
        let ReservationUser {
            user_id,
            user_name,
            email,
            role,
        } = value;
        Self {
            id: user_id,
            email,
            nombre: user_name,
            rol: RoleName::from(role),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    pub nombre: String,
    #[garde(email)]
    pub email: String,
    #[garde(skip)]
    pub rol: RoleName,
    #[garde(skip)]
    pub google_access_token: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            nombre,
            email,
            rol,
            google_access_token,
        } = value;
        Self {
            user_name: nombre,
            email,
            role: Role::from(rol),
            google_access_token,
        }
    }
}

/// Registration response; carries the bearer token issued for the new
/// user so provisioning is usable without the real auth flow.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUserResponse {
    pub user: UserResponse,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_uses_the_contract_field_names() {
        let response = UserResponse {
            id: UserId::new(),
            email: "ana@example.com".into(),
            nombre: "Ana Soto".into(),
            rol: RoleName::Student,
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["nombre"], "Ana Soto");
        assert_eq!(json["rol"], "STUDENT");
        assert!(json.get("id").is_some());
        assert!(json.get("email").is_some());
    }

    #[test]
    fn role_names_round_trip_through_the_wire_format() {
        let admin: RoleName = serde_json::from_str("\"ADMIN\"").unwrap();
        assert!(matches!(Role::from(admin), Role::Admin));
        assert_eq!(serde_json::to_string(&RoleName::Admin).unwrap(), "\"ADMIN\"");
    }
}
