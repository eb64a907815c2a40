//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::app::hash_api_key;
use crate::config::Config;
use crate::domain::entities::invoice::{Currency, InvoiceLine};
use crate::domain::entities::{Invoice, InvoiceKind, NewInvoice, NewUser, Role, User, UserId};
use crate::AppState;

use super::mocks::{MockForumClient, MockMarketplaceClient};

pub const ADMIN_KEY: &str = "sk-admin-test";
pub const LOGISTICS_KEY: &str = "sk-logistics-test";
pub const SELLER_ONE_KEY: &str = "sk-seller-1-test";
pub const SELLER_TWO_KEY: &str = "sk-seller-2-test";

fn user(name: &str, role: Role, seller_id: Option<i64>) -> User {
    User {
        id: UserId(Uuid::new_v4()),
        name: name.to_string(),
        email: format!("{}@marketplace.test", name),
        role,
        seller_id,
        api_key_hash: hash_api_key(&format!("key-{}-{}", name, Uuid::new_v4())),
    }
}

/// Create a test admin
pub fn test_admin() -> User {
    user("admin", Role::Admin, None)
}

/// Create a test logistics operator
pub fn test_logistics() -> User {
    user("logistics", Role::Logistics, None)
}

/// Create a test seller for a Dokan store
pub fn test_seller(seller_id: i64) -> User {
    user(&format!("seller-{}", seller_id), Role::Seller, Some(seller_id))
}

fn lines() -> Vec<InvoiceLine> {
    vec![
        InvoiceLine {
            description: "Organic quinoa 1kg".to_string(),
            quantity: 2,
            unit_price_cents: 1850,
        },
        InvoiceLine {
            description: "Shipping".to_string(),
            quantity: 1,
            unit_price_cents: 1000,
        },
    ]
}

/// A valid boleta request for `seller_id`
pub fn new_boleta(seller_id: i64) -> NewInvoice {
    NewInvoice {
        seller_id,
        kind: InvoiceKind::Boleta,
        customer_name: "Rosa Quispe".to_string(),
        customer_document: "45678912".to_string(),
        currency: Currency::Pen,
        lines: lines(),
    }
}

/// A valid factura request for `seller_id`
pub fn new_factura(seller_id: i64) -> NewInvoice {
    NewInvoice {
        seller_id,
        kind: InvoiceKind::Factura,
        customer_name: "Comercial Andina SAC".to_string(),
        customer_document: "20123456789".to_string(),
        currency: Currency::Pen,
        lines: lines(),
    }
}

/// An issued invoice built without going through a store
pub fn test_invoice(seller_id: i64) -> Invoice {
    let request = new_boleta(seller_id);
    let totals = request.validate().unwrap();
    request.into_invoice(totals, "B001-00000001".to_string(), Utc::now())
}

/// Config suitable for router tests (no rate limiting, no webhook secret)
pub fn test_config() -> Config {
    Config {
        rate_limit_per_second: 0,
        ..Config::default()
    }
}

/// App state over the given mocks, with an admin, a logistics user and
/// sellers 1 and 2 registered under the `*_KEY` constants
pub async fn test_state_with(
    config: Config,
    marketplace: Arc<MockMarketplaceClient>,
    forum: Arc<MockForumClient>,
) -> AppState {
    let state = AppState::new(config, marketplace, forum);

    let seeds = [
        ("admin", Role::Admin, None, ADMIN_KEY),
        ("logistics", Role::Logistics, None, LOGISTICS_KEY),
        ("seller-1", Role::Seller, Some(1), SELLER_ONE_KEY),
        ("seller-2", Role::Seller, Some(2), SELLER_TWO_KEY),
    ];
    for (name, role, seller_id, key) in seeds {
        state
            .user_service
            .register(NewUser {
                id: None,
                name: name.to_string(),
                email: format!("{}@marketplace.test", name),
                role,
                seller_id,
                api_key: key.to_string(),
            })
            .await
            .unwrap();
    }

    state
}

/// App state with default mocks
pub async fn test_state() -> AppState {
    test_state_with(
        test_config(),
        Arc::new(MockMarketplaceClient::new()),
        Arc::new(MockForumClient::new()),
    )
    .await
}
