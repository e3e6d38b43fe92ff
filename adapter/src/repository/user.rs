use crate::store::{model::UserRecord, SharedStore};
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::{id::UserId, user::event::CreateUser, user::User};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    store: SharedStore,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let mut users = self.store.users_write().await;
        if users.values().any(|u| u.email == event.email) {
            return Err(AppError::UnprocessableEntity(format!(
                "a user with email {} already exists",
                event.email
            )));
        }

        let record = UserRecord {
            user_id: UserId::new(),
            user_name: event.user_name,
            email: event.email,
            role: event.role,
            google_access_token: event.google_access_token,
            created_at: Utc::now(),
        };
        let user = User::from(record.clone());
        users.insert(record.user_id, record);

        Ok(user)
    }

    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .store
            .users_read()
            .await
            .get(&user_id)
            .cloned()
            .map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .store
            .users_read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
            .map(User::from))
    }

    async fn google_access_token(&self, user_id: UserId) -> AppResult<Option<String>> {
        Ok(self
            .store
            .users_read()
            .await
            .get(&user_id)
            .and_then(|u| u.google_access_token.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::role::Role;
    use std::time::Duration;

    fn repo() -> UserRepositoryImpl {
        UserRepositoryImpl::new(SharedStore::new(Duration::from_secs(1)))
    }

    #[tokio::test]
    async fn create_and_look_up_a_user() -> anyhow::Result<()> {
        let repo = repo();
        let created = repo
            .create(CreateUser::new(
                "Ana Soto".into(),
                "ana@example.com".into(),
                Role::Student,
                None,
            ))
            .await?;

        let by_id = repo.find_current_user(created.user_id).await?;
        assert_eq!(by_id, Some(created.clone()));

        let by_email = repo.find_by_email("ana@example.com").await?;
        assert_eq!(by_email, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() -> anyhow::Result<()> {
        let repo = repo();
        repo.create(CreateUser::new(
            "Ana Soto".into(),
            "ana@example.com".into(),
            Role::Student,
            None,
        ))
        .await?;

        let err = repo
            .create(CreateUser::new(
                "Other".into(),
                "ana@example.com".into(),
                Role::Admin,
                None,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
        Ok(())
    }

    #[tokio::test]
    async fn calendar_token_is_only_reachable_through_the_accessor() -> anyhow::Result<()> {
        let repo = repo();
        let created = repo
            .create(CreateUser::new(
                "Ana Soto".into(),
                "ana@example.com".into(),
                Role::Student,
                Some("ya29.token".into()),
            ))
            .await?;

        let token = repo.google_access_token(created.user_id).await?;
        assert_eq!(token.as_deref(), Some("ya29.token"));
        Ok(())
    }
}
