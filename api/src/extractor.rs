use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use kernel::model::auth::AccessToken;
use kernel::model::id::UserId;
use kernel::model::user::User;
use registry::AppRegistry;
use shared::error::AppError;

/// The authenticated caller, resolved from the bearer token the auth
/// collaborator issued.
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                AppError::UnauthenticatedError("missing Authorization header".into())
            })?
            .to_str()
            .map_err(|_| {
                AppError::UnauthenticatedError("malformed Authorization header".into())
            })?;
        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::UnauthenticatedError("expected a bearer token".into())
        })?;
        let access_token = AccessToken(token.to_string());

        let user_id = registry
            .auth_repository()
            .verify_access_token(&access_token)
            .await?
            .ok_or_else(|| {
                AppError::UnauthenticatedError("invalid or expired access token".into())
            })?;
        let user = registry
            .user_repository()
            .find_current_user(user_id)
            .await?
            .ok_or_else(|| {
                AppError::UnauthenticatedError("the access token maps to no user".into())
            })?;

        Ok(Self { access_token, user })
    }
}
