//! In-memory adapter
//!
//! Process-local implementations of the repository ports. State is lost on
//! restart; seed files can repopulate it at startup.

pub mod invoice_repo;
pub mod notification_repo;
pub mod seed;
pub mod ui_state_repo;
pub mod user_repo;

pub use invoice_repo::InMemoryInvoiceRepository;
pub use notification_repo::InMemoryNotificationRepository;
pub use ui_state_repo::InMemoryUiStateRepository;
pub use user_repo::InMemoryUserRepository;
