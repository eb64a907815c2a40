//! Mock implementations of the upstream client ports
//!
//! They return configurable payloads, can be switched to fail, and record
//! the calls they receive so tests can verify what was forwarded.

use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::adapters::InMemoryNotificationRepository;
use crate::domain::entities::{Notification, NotificationId, UserId};
use crate::domain::ports::{
    ForumCategory, ForumClient, ForumTopic, MarketplaceClient, NotificationRepository, OrderQuery,
    Page, ProductQuery, StoreQuery,
};
use crate::error::{DomainError, UpstreamError};

fn mock_failure(service: &'static str) -> UpstreamError {
    UpstreamError::Api {
        service,
        status: 502,
        message: "Mock failure".to_string(),
    }
}

// ============================================================================
// Marketplace
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MarketplaceCall {
    ListProducts(ProductQuery),
    ListStores(StoreQuery),
    GetStore(i64),
    ListStoreProducts(i64, Page),
    ListOrders(OrderQuery),
}

pub struct MockMarketplaceClient {
    payload: RwLock<Value>,
    should_fail: RwLock<bool>,
    calls: RwLock<Vec<MarketplaceCall>>,
}

impl Default for MockMarketplaceClient {
    fn default() -> Self {
        Self {
            payload: RwLock::new(json!([])),
            should_fail: RwLock::new(false),
            calls: RwLock::new(Vec::new()),
        }
    }
}

impl MockMarketplaceClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload returned by every call
    pub fn with_payload(self, payload: Value) -> Self {
        *self.payload.write().unwrap() = payload;
        self
    }

    pub fn failing(self) -> Self {
        *self.should_fail.write().unwrap() = true;
        self
    }

    pub fn calls(&self) -> Vec<MarketplaceCall> {
        self.calls.read().unwrap().clone()
    }

    fn respond(&self, call: MarketplaceCall) -> Result<Value, UpstreamError> {
        self.calls.write().unwrap().push(call);
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure("WooCommerce"));
        }
        Ok(self.payload.read().unwrap().clone())
    }
}

#[async_trait]
impl MarketplaceClient for MockMarketplaceClient {
    async fn list_products(&self, query: &ProductQuery) -> Result<Value, UpstreamError> {
        self.respond(MarketplaceCall::ListProducts(query.clone()))
    }

    async fn list_stores(&self, query: &StoreQuery) -> Result<Value, UpstreamError> {
        self.respond(MarketplaceCall::ListStores(query.clone()))
    }

    async fn get_store(&self, store_id: i64) -> Result<Value, UpstreamError> {
        self.respond(MarketplaceCall::GetStore(store_id))
    }

    async fn list_store_products(
        &self,
        store_id: i64,
        page: Page,
    ) -> Result<Value, UpstreamError> {
        self.respond(MarketplaceCall::ListStoreProducts(store_id, page))
    }

    async fn list_orders(&self, query: &OrderQuery) -> Result<Value, UpstreamError> {
        self.respond(MarketplaceCall::ListOrders(query.clone()))
    }
}

// ============================================================================
// Forum
// ============================================================================

#[derive(Default)]
pub struct MockForumClient {
    topics: RwLock<Vec<ForumTopic>>,
    categories: RwLock<Vec<ForumCategory>>,
    should_fail: RwLock<bool>,
    topic_requests: RwLock<Vec<(Option<String>, u32)>>,
}

impl MockForumClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topic(self, topic: ForumTopic) -> Self {
        self.topics.write().unwrap().push(topic);
        self
    }

    pub fn with_category(self, category: ForumCategory) -> Self {
        self.categories.write().unwrap().push(category);
        self
    }

    pub fn failing(self) -> Self {
        *self.should_fail.write().unwrap() = true;
        self
    }

    /// `(category, page)` of every topics request received
    pub fn topic_requests(&self) -> Vec<(Option<String>, u32)> {
        self.topic_requests.read().unwrap().clone()
    }
}

#[async_trait]
impl ForumClient for MockForumClient {
    async fn latest_topics(
        &self,
        category: Option<&str>,
        page: u32,
    ) -> Result<Vec<ForumTopic>, UpstreamError> {
        self.topic_requests
            .write()
            .unwrap()
            .push((category.map(str::to_string), page));
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure("Forum"));
        }
        Ok(self.topics.read().unwrap().clone())
    }

    async fn list_categories(&self) -> Result<Vec<ForumCategory>, UpstreamError> {
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure("Forum"));
        }
        Ok(self.categories.read().unwrap().clone())
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// In-memory notification store that refuses every push for one user
pub struct FailingNotificationRepository {
    inner: InMemoryNotificationRepository,
    failing_user: UserId,
}

impl FailingNotificationRepository {
    pub fn new(failing_user: UserId) -> Self {
        Self {
            inner: InMemoryNotificationRepository::new(),
            failing_user,
        }
    }
}

#[async_trait]
impl NotificationRepository for FailingNotificationRepository {
    async fn push(&self, notification: Notification) -> Result<(), DomainError> {
        if notification.user_id == self.failing_user {
            return Err(DomainError::Internal("Mock failure".to_string()));
        }
        self.inner.push(notification).await
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        self.inner.list_for_user(user_id).await
    }

    async fn mark_read(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<bool, DomainError> {
        self.inner.mark_read(user_id, id).await
    }

    async fn mark_all_read(&self, user_id: &UserId) -> Result<usize, DomainError> {
        self.inner.mark_all_read(user_id).await
    }
}

/// A forum topic with the given id and title
pub fn test_topic(id: i64, title: &str) -> ForumTopic {
    ForumTopic {
        id,
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        posts_count: 1,
        reply_count: 0,
        views: 10,
        category_id: Some(1),
        last_posted_at: None,
    }
}

/// A forum category with the given slug
pub fn test_category(id: i64, slug: &str) -> ForumCategory {
    ForumCategory {
        id,
        name: slug.to_string(),
        slug: slug.to_string(),
        description: None,
        topic_count: 0,
    }
}
