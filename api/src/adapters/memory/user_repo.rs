//! In-memory user directory

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::{Role, User, UserId};
use crate::domain::ports::UserRepository;
use crate::error::DomainError;

#[derive(Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    by_api_key: HashMap<String, UserId>,
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Users>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .by_api_key
            .get(hash)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn find_by_seller(&self, seller_id: i64) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .by_id
            .values()
            .filter(|u| u.role == Role::Seller && u.seller_id == Some(seller_id))
            .cloned()
            .collect())
    }

    async fn find_admins(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .by_id
            .values()
            .filter(|u| u.role == Role::Admin)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().await.by_id.values().cloned().collect())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.by_api_key.contains_key(&user.api_key_hash) {
            return Err(DomainError::Conflict(format!(
                "API key of user {} is already in use",
                user.name
            )));
        }
        if users.by_id.contains_key(&user.id) {
            return Err(DomainError::Conflict(format!("User {} already exists", user.id)));
        }

        users.by_api_key.insert(user.api_key_hash.clone(), user.id);
        users.by_id.insert(user.id, user.clone());

        Ok(user)
    }
}
