use crate::model::{id::UserId, user::event::CreateUser, user::User};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// The stored calendar OAuth token, if the user has one.
    async fn google_access_token(&self, user_id: UserId) -> AppResult<Option<String>>;
}
