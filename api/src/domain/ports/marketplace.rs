//! Marketplace client port trait
//!
//! Defines the interface for the WooCommerce / Dokan REST API. Payloads are
//! kept as raw JSON so the proxy routes can hand them back unchanged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::UpstreamError;

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// Paging parameters shared by every listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    pub per_page: u32,
}

impl Page {
    /// Build from optional query values, clamping to what WooCommerce accepts
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Query for `GET /wc/v3/products`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductQuery {
    #[serde(flatten)]
    pub page: Page,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orderby: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

/// Query for `GET /dokan/v1/stores`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreQuery {
    #[serde(flatten)]
    pub page: Page,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Query for `GET /wc/v3/orders` narrowed to one seller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderQuery {
    pub seller_id: i64,
    #[serde(flatten)]
    pub page: Page,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Port trait for WooCommerce / Dokan operations
#[async_trait]
pub trait MarketplaceClient: Send + Sync {
    /// List catalog products
    async fn list_products(&self, query: &ProductQuery) -> Result<Value, UpstreamError>;

    /// List Dokan stores (sellers)
    async fn list_stores(&self, query: &StoreQuery) -> Result<Value, UpstreamError>;

    /// Get a single Dokan store
    async fn get_store(&self, store_id: i64) -> Result<Value, UpstreamError>;

    /// List the products of one store
    async fn list_store_products(&self, store_id: i64, page: Page)
        -> Result<Value, UpstreamError>;

    /// List orders belonging to a seller
    async fn list_orders(&self, query: &OrderQuery) -> Result<Value, UpstreamError>;
}
