//! In-memory user store for tests and local development.
//!
//! Data is lost when the repository is dropped. Email uniqueness is checked
//! and the insert performed under one write lock, so concurrent registrations
//! for the same address cannot both succeed.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::UserRepository;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::AlreadyExists(user.email.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, stored = users.len(), "User stored in memory");

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn update(&self, mut user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(RepositoryError::NotFound(user.id.to_string()));
        }

        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(RepositoryError::AlreadyExists(user.email.to_string()));
        }

        user.updated_at = Utc::now();
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        match self.users.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::auth::models::EmailAddress;
    use crate::domain::auth::models::Username;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryUserRepository::new();

        let created = repository.create(new_user("alice", "a@x.com")).await.unwrap();
        assert_eq!(created.created_at, created.updated_at);

        let by_id = repository.find_by_id(&created.id).await.unwrap();
        assert_eq!(by_id, Some(created.clone()));

        let by_email = repository.find_by_email("a@x.com").await.unwrap();
        assert_eq!(by_email, Some(created));

        assert_eq!(repository.find_by_email("b@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let repository = InMemoryUserRepository::new();
        repository.create(new_user("alice", "a@x.com")).await.unwrap();

        let result = repository.create(new_user("bob", "a@x.com")).await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists("a@x.com".to_string()))
        );
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_create_same_email_single_winner() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move {
                    repository
                        .create(new_user(&format!("user{}", i), "race@x.com"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(e) => assert!(matches!(e, RepositoryError::AlreadyExists(_))),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(new_user("alice", "a@x.com")).await.unwrap();

        let mut changed = created.clone();
        changed.username = Username::new("alice2".to_string()).unwrap();
        let updated = repository.update(changed).await.unwrap();

        assert_eq!(updated.username.as_str(), "alice2");
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_and_conflicting() {
        let repository = InMemoryUserRepository::new();
        let alice = repository.create(new_user("alice", "a@x.com")).await.unwrap();
        repository.create(new_user("bob", "b@x.com")).await.unwrap();

        let mut stolen = alice.clone();
        stolen.email = EmailAddress::new("b@x.com".to_string()).unwrap();
        assert!(matches!(
            repository.update(stolen).await,
            Err(RepositoryError::AlreadyExists(_))
        ));

        let mut ghost = alice;
        ghost.id = UserId::new();
        assert!(matches!(
            repository.update(ghost).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(new_user("alice", "a@x.com")).await.unwrap();

        repository.delete(&created.id).await.unwrap();
        assert!(repository.is_empty().await);

        assert!(matches!(
            repository.delete(&created.id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
