//! Repository port traits
//!
//! These traits define the interface for the dashboard's own state.
//! Implementations are provided by adapters (in memory today).

use async_trait::async_trait;

use crate::domain::entities::{
    Invoice, InvoiceId, InvoiceStatus, NewInvoice, Notification, NotificationId, UiAction,
    UiState, User, UserId,
};
use crate::error::DomainError;

/// Directory of dashboard users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by API key hash
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Users acting for a seller
    async fn find_by_seller(&self, seller_id: i64) -> Result<Vec<User>, DomainError>;

    /// All admins
    async fn find_admins(&self) -> Result<Vec<User>, DomainError>;

    /// Every known user
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    /// Add a user; API key hashes must be unique
    async fn create(&self, user: User) -> Result<User, DomainError>;
}

/// Store of issued invoices
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// All invoices in issue order
    async fn get_all(&self) -> Result<Vec<Invoice>, DomainError>;

    /// A seller's invoices in issue order
    async fn get_by_seller(&self, seller_id: i64) -> Result<Vec<Invoice>, DomainError>;

    /// Find an invoice by ID
    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, DomainError>;

    /// Validate, number and store a new invoice
    async fn create(&self, invoice: NewInvoice) -> Result<Invoice, DomainError>;

    /// Move an invoice to a new status
    async fn update_status(
        &self,
        id: &InvoiceId,
        status: InvoiceStatus,
    ) -> Result<Invoice, DomainError>;
}

/// Per-user notification lists
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append a notification to its user's list
    async fn push(&self, notification: Notification) -> Result<(), DomainError>;

    /// A user's notifications, newest first
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError>;

    /// Mark one notification read; false when the user has no such notification
    async fn mark_read(&self, user_id: &UserId, id: &NotificationId)
        -> Result<bool, DomainError>;

    /// Mark all of a user's notifications read, returning how many changed
    async fn mark_all_read(&self, user_id: &UserId) -> Result<usize, DomainError>;
}

/// Per-user dashboard UI flags
#[async_trait]
pub trait UiStateRepository: Send + Sync {
    /// Current state, or the default when none is stored
    async fn get(&self, user_id: &UserId) -> Result<UiState, DomainError>;

    /// Reduce `action` into the stored state atomically and return the result
    async fn apply(&self, user_id: &UserId, action: UiAction) -> Result<UiState, DomainError>;
}
