//! User service
//!
//! API key hashing and the user directory.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::domain::entities::{NewUser, Role, User, UserId};
use crate::domain::ports::UserRepository;
use crate::error::{AppError, DomainError};

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Add a user from a seed record, keeping only the hash of its key
    pub async fn register(&self, new_user: NewUser) -> Result<User, AppError> {
        if new_user.api_key.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "User {} has an empty API key",
                new_user.name
            ))
            .into());
        }
        if new_user.role == Role::Seller && new_user.seller_id.is_none() {
            return Err(DomainError::Validation(format!(
                "Seller {} must have a seller_id",
                new_user.name
            ))
            .into());
        }

        let user = User {
            id: new_user.id.map(UserId).unwrap_or_default(),
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            seller_id: new_user.seller_id,
            api_key_hash: hash_api_key(&new_user.api_key),
        };

        let user = self.users.create(user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Find a user by API key hash
    pub async fn find_by_api_key(&self, key_hash: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_api_key_hash(key_hash).await?)
    }
}

/// Hash an API key for storage and lookup
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}
