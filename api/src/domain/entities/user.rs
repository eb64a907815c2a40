//! User domain entity
//!
//! Dashboard users authenticate with an API key and act under a single role.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a dashboard user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dashboard role. Anonymous callers only reach the public routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    /// Dokan calls sellers vendors
    #[serde(alias = "vendor")]
    Seller,
    Logistics,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Seller => write!(f, "seller"),
            Role::Logistics => write!(f, "logistics"),
        }
    }
}

/// An authenticated dashboard user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Dokan store id; always set for sellers
    pub seller_id: Option<i64>,
    #[serde(skip)]
    pub api_key_hash: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this user may read data belonging to `seller_id`
    pub fn can_view_seller(&self, seller_id: i64) -> bool {
        match self.role {
            Role::Admin | Role::Logistics => true,
            Role::Seller => self.seller_id == Some(seller_id),
        }
    }

    /// Whether this user may issue documents on behalf of `seller_id`
    pub fn can_act_for_seller(&self, seller_id: i64) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Seller => self.seller_id == Some(seller_id),
            Role::Logistics => false,
        }
    }
}

/// Seed record for a user, as read from the users file
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub seller_id: Option<i64>,
    /// Plain API key; only its hash is kept
    pub api_key: String,
}
