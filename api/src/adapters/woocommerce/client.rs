//! WooCommerce / Dokan API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::domain::ports::{MarketplaceClient, OrderQuery, Page, ProductQuery, StoreQuery};
use crate::error::UpstreamError;

const SERVICE: &str = "WooCommerce";

/// Client for the WooCommerce v3 and Dokan v1 REST namespaces
pub struct WooCommerceClient {
    http: Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
}

impl WooCommerceClient {
    pub fn new(
        base_url: String,
        consumer_key: String,
        consumer_secret: String,
        timeout: Duration,
    ) -> Self {
        let http = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            Client::new()
        });

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            consumer_key,
            consumer_secret,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/wp-json{}", self.base_url, path)
    }

    async fn get_json<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Value, UpstreamError> {
        let mut request = self.http.get(self.api_url(path)).query(query);

        if !self.consumer_key.is_empty() {
            request = request.basic_auth(&self.consumer_key, Some(&self.consumer_secret));
        }

        let resp = request.send().await?;
        tracing::debug!(service = SERVICE, path, status = resp.status().as_u16(), "Upstream response");

        self.handle_response(resp).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, UpstreamError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| UpstreamError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(UpstreamError::Unauthorized { service: SERVICE })
        } else if status.as_u16() == 429 {
            Err(UpstreamError::RateLimited { service: SERVICE })
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(UpstreamError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl MarketplaceClient for WooCommerceClient {
    async fn list_products(&self, query: &ProductQuery) -> Result<Value, UpstreamError> {
        self.get_json("/wc/v3/products", query).await
    }

    async fn list_stores(&self, query: &StoreQuery) -> Result<Value, UpstreamError> {
        self.get_json("/dokan/v1/stores", query).await
    }

    async fn get_store(&self, store_id: i64) -> Result<Value, UpstreamError> {
        self.get_json(&format!("/dokan/v1/stores/{}", store_id), &[] as &[(&str, &str)])
            .await
    }

    async fn list_store_products(
        &self,
        store_id: i64,
        page: Page,
    ) -> Result<Value, UpstreamError> {
        self.get_json(&format!("/dokan/v1/stores/{}/products", store_id), &page)
            .await
    }

    async fn list_orders(&self, query: &OrderQuery) -> Result<Value, UpstreamError> {
        self.get_json("/wc/v3/orders", query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> WooCommerceClient {
        WooCommerceClient::new(
            server.base_url(),
            "ck_test".to_string(),
            "cs_test".to_string(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn list_products_forwards_query_and_returns_payload_unchanged() {
        let server = MockServer::start_async().await;
        let payload = json!([{"id": 10, "name": "Maca powder", "meta_data": [{"k": "v"}]}]);
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/wp-json/wc/v3/products")
                    .query_param("page", "2")
                    .query_param("per_page", "5")
                    .query_param("search", "maca")
                    .header_exists("authorization");
                then.status(200).json_body(payload.clone());
            })
            .await;

        let query = ProductQuery {
            page: Page::new(Some(2), Some(5)),
            search: Some("maca".to_string()),
            ..Default::default()
        };
        let result = client_for(&server).list_products(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result, payload);
    }

    #[tokio::test]
    async fn get_store_hits_dokan_namespace() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/wp-json/dokan/v1/stores/42");
                then.status(200).json_body(json!({"id": 42, "store_name": "Andes"}));
            })
            .await;

        let store = client_for(&server).get_store(42).await.unwrap();

        mock.assert_async().await;
        assert_eq!(store["store_name"], "Andes");
    }

    #[tokio::test]
    async fn list_orders_passes_seller_filter() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/wp-json/wc/v3/orders")
                    .query_param("seller_id", "7")
                    .query_param("status", "processing");
                then.status(200).json_body(json!([]));
            })
            .await;

        let query = OrderQuery {
            seller_id: 7,
            page: Page::default(),
            status: Some("processing".to_string()),
        };
        let orders = client_for(&server).list_orders(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(orders, json!([]));
    }

    #[tokio::test]
    async fn error_status_becomes_api_error_with_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/wp-json/dokan/v1/stores");
                then.status(503).body("maintenance");
            })
            .await;

        let err = client_for(&server)
            .list_stores(&StoreQuery::default())
            .await
            .unwrap_err();

        match err {
            UpstreamError::Api {
                service,
                status,
                message,
            } => {
                assert_eq!(service, "WooCommerce");
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_and_rate_limited_are_distinguished() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/wp-json/wc/v3/products");
                then.status(401);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/wp-json/dokan/v1/stores");
                then.status(429);
            })
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.list_products(&ProductQuery::default()).await,
            Err(UpstreamError::Unauthorized { .. })
        ));
        assert!(matches!(
            client.list_stores(&StoreQuery::default()).await,
            Err(UpstreamError::RateLimited { .. })
        ));
    }

    #[tokio::test]
    async fn invalid_json_is_a_deserialization_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/wp-json/wc/v3/products");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let err = client_for(&server)
            .list_products(&ProductQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = WooCommerceClient::new(
            "https://shop.example/".to_string(),
            String::new(),
            String::new(),
            Duration::from_secs(1),
        );
        assert_eq!(
            client.api_url("/wc/v3/products"),
            "https://shop.example/wp-json/wc/v3/products"
        );
    }
}
