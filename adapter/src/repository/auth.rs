use crate::store::SharedStore;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{auth::AccessToken, id::UserId};
use kernel::repository::auth::AuthRepository;
use shared::error::AppResult;
use uuid::Uuid;

#[derive(new)]
pub struct AuthRepositoryImpl {
    store: SharedStore,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn verify_access_token(&self, token: &AccessToken) -> AppResult<Option<UserId>> {
        Ok(self.store.tokens_read().await.get(&token.0).copied())
    }

    async fn issue_access_token(&self, user_id: UserId) -> AppResult<AccessToken> {
        let token = AccessToken(Uuid::new_v4().simple().to_string());
        self.store
            .tokens_write()
            .await
            .insert(token.0.clone(), user_id);
        Ok(token)
    }

    async fn register_access_token(&self, token: AccessToken, user_id: UserId) -> AppResult<()> {
        self.store.tokens_write().await.insert(token.0, user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn issued_tokens_verify_and_unknown_tokens_do_not() -> anyhow::Result<()> {
        let repo = AuthRepositoryImpl::new(SharedStore::new(Duration::from_secs(1)));
        let user_id = UserId::new();

        let token = repo.issue_access_token(user_id).await?;
        assert_eq!(repo.verify_access_token(&token).await?, Some(user_id));

        let unknown = AccessToken("nope".into());
        assert_eq!(repo.verify_access_token(&unknown).await?, None);
        Ok(())
    }
}
