use crate::model::{auth::AccessToken, id::UserId};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn verify_access_token(&self, token: &AccessToken) -> AppResult<Option<UserId>>;
    async fn issue_access_token(&self, user_id: UserId) -> AppResult<AccessToken>;
    /// Registers a well-known token, used when seeding the bootstrap
    /// administrator.
    async fn register_access_token(&self, token: AccessToken, user_id: UserId) -> AppResult<()>;
}
