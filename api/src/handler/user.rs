use crate::{
    extractor::AuthorizedUser,
    model::user::{CreateUserRequest, CreatedUserResponse, UserResponse},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

/// Admin-gated provisioning endpoint standing in for the external
/// auth flow; returns the bearer token issued for the new user.
pub async fn register_user(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation(
            "only administrators may register users".into(),
        ));
    }
    req.validate(&())?;

    let created = registry.user_repository().create(req.into()).await?;
    let token = registry
        .auth_repository()
        .issue_access_token(created.user_id)
        .await?;
    tracing::info!(user_id = %created.user_id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            user: UserResponse::from(created),
            access_token: token.0,
        }),
    ))
}
