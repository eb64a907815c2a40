//! Webhook handlers
//!
//! Handlers for WooCommerce webhooks.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::domain::entities::NotificationKind;
use crate::error::AppError;
use crate::AppState;

/// WooCommerce order payload (only the fields we read)
#[derive(Debug, Deserialize)]
pub struct OrderPayload {
    pub id: i64,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Set by Dokan on single-vendor orders
    #[serde(default)]
    pub store: Option<StoreRef>,
    /// Set by Dokan on orders spanning several vendors
    #[serde(default)]
    pub stores: Vec<StoreRef>,
}

#[derive(Debug, Deserialize)]
pub struct StoreRef {
    pub id: i64,
}

impl OrderPayload {
    /// Distinct seller ids referenced by the order
    fn seller_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .store
            .iter()
            .chain(self.stores.iter())
            .map(|s| s.id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn display_number(&self) -> String {
        self.number.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// Verify a WooCommerce signature: base64(HMAC-SHA256(body, secret))
fn verify_signature(payload: &[u8], signature: Option<&str>, secret: &Option<String>) -> bool {
    let Some(secret) = secret else {
        // No secret configured, skip verification (development mode)
        tracing::warn!("Webhook secret not configured, skipping signature verification");
        return true;
    };

    let Some(signature) = signature else {
        tracing::warn!("No signature provided in webhook request");
        return false;
    };

    type HmacSha256 = Hmac<Sha256>;
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => {
            tracing::error!("Invalid webhook secret key");
            return false;
        }
    };

    mac.update(payload);

    let expected_bytes = match STANDARD.decode(signature.trim()) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid signature format");
            return false;
        }
    };

    mac.verify_slice(&expected_bytes).is_ok()
}

/// POST /webhooks/woocommerce
///
/// Handle WooCommerce webhook deliveries.
pub async fn woocommerce_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let signature = headers
        .get("X-WC-Webhook-Signature")
        .and_then(|h| h.to_str().ok());

    if !verify_signature(&body, signature, &state.config.wc_webhook_secret) {
        tracing::warn!("Webhook signature verification failed");
        return Err(AppError::Unauthorized);
    }

    let topic = headers
        .get("X-WC-Webhook-Topic")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown");

    // WooCommerce pings a new webhook with a form-encoded `webhook_id=N` body
    let Ok(payload) = serde_json::from_slice::<serde_json::Value>(&body) else {
        tracing::info!(topic, "Ignoring non-JSON webhook delivery");
        return Ok(StatusCode::OK);
    };

    tracing::info!(topic, "Received WooCommerce webhook");

    match topic {
        "order.created" | "order.updated" => handle_order_event(&state, topic, payload).await?,
        _ => {
            tracing::debug!("Ignoring unhandled webhook topic: {}", topic);
        }
    }

    Ok(StatusCode::OK)
}

async fn handle_order_event(
    state: &AppState,
    topic: &str,
    payload: serde_json::Value,
) -> Result<(), AppError> {
    let order: OrderPayload = serde_json::from_value(payload).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse order payload");
        AppError::BadRequest(format!("Invalid order payload: {}", e))
    })?;

    let title = if topic == "order.created" {
        format!("New order #{}", order.display_number())
    } else {
        format!("Order #{} updated", order.display_number())
    };
    let body = format!(
        "Status {}, total {} {}",
        order.status.as_deref().unwrap_or("unknown"),
        order.currency.as_deref().unwrap_or(""),
        order.total.as_deref().unwrap_or("?")
    );

    let sellers = order.seller_ids();
    if sellers.is_empty() {
        tracing::debug!(order_id = order.id, "Order carries no store, nobody to notify");
    }

    // Keep going past a failed store; the delivery is acknowledged either way
    for seller_id in sellers {
        if let Err(e) = state
            .notification_service
            .notify_seller(seller_id, NotificationKind::Order, &title, &body)
            .await
        {
            tracing::warn!(
                error = %e,
                seller_id,
                order_id = order.id,
                "Failed to notify seller of order"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::InMemoryUserRepository;
    use crate::app::NotificationService;
    use crate::domain::ports::{NotificationRepository, UserRepository};
    use crate::test_utils::{test_admin, test_seller, test_state, FailingNotificationRepository};

    fn sign(body: &[u8], secret: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        STANDARD.encode(mac.finalize().into_bytes())
    }

    #[test]
    fn verify_signature_no_secret() {
        assert!(verify_signature(b"test", None, &None));
        assert!(verify_signature(b"test", Some("invalid"), &None));
    }

    #[test]
    fn verify_signature_missing_when_required() {
        let secret = Some("test-secret".to_string());
        assert!(!verify_signature(b"test", None, &secret));
    }

    #[test]
    fn verify_signature_accepts_valid_and_rejects_tampered() {
        let secret = Some("test-secret".to_string());
        let signature = sign(b"{\"id\":1}", "test-secret");

        assert!(verify_signature(b"{\"id\":1}", Some(&signature), &secret));
        assert!(!verify_signature(b"{\"id\":2}", Some(&signature), &secret));
        assert!(!verify_signature(b"{\"id\":1}", Some("not base64!"), &secret));
    }

    #[test]
    fn seller_ids_merge_store_and_stores() {
        let order: OrderPayload = serde_json::from_str(
            r#"{"id": 77, "store": {"id": 3}, "stores": [{"id": 3}, {"id": 1}]}"#,
        )
        .unwrap();
        assert_eq!(order.seller_ids(), vec![1, 3]);
        assert_eq!(order.display_number(), "77");
    }

    #[tokio::test]
    async fn order_event_reaches_remaining_stores_when_one_fails() {
        let users = Arc::new(InMemoryUserRepository::new());
        let seller_one = users.create(test_seller(1)).await.unwrap();
        let seller_two = users.create(test_seller(2)).await.unwrap();
        let admin = users.create(test_admin()).await.unwrap();

        let notifications = Arc::new(FailingNotificationRepository::new(seller_one.id));
        let mut state = test_state().await;
        state.notification_service =
            Arc::new(NotificationService::new(notifications.clone(), users));

        let payload = serde_json::json!({"id": 900, "stores": [{"id": 1}, {"id": 2}]});
        handle_order_event(&state, "order.created", payload)
            .await
            .unwrap();

        let delivered = notifications.list_for_user(&seller_two.id).await.unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].title, "New order #900");
        // Admins still hear about the store that did go through
        assert_eq!(notifications.list_for_user(&admin.id).await.unwrap().len(), 1);
    }

    #[test]
    fn parse_minimal_order() {
        let order: OrderPayload = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert!(order.seller_ids().is_empty());
        assert!(order.status.is_none());
    }
}
