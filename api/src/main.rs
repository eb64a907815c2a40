//! Marketplace API Server
//!
//! Backend-for-frontend of the multi-role marketplace dashboard. Proxies the
//! WooCommerce / Dokan store and the community forum, and keeps invoices,
//! notifications and UI state in memory.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod extract;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::memory::seed;
use adapters::{
    DiscourseForumClient, InMemoryInvoiceRepository, InMemoryNotificationRepository,
    InMemoryUiStateRepository, InMemoryUserRepository, WooCommerceClient,
};
use app::{FinanceService, InvoiceService, NotificationService, UiStateService, UserService};
use config::Config;
use domain::ports::{ForumClient, MarketplaceClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub marketplace: Arc<dyn MarketplaceClient>,
    pub forum: Arc<dyn ForumClient>,
    pub user_service: Arc<UserService>,
    pub invoice_service: Arc<InvoiceService>,
    pub finance_service: Arc<FinanceService>,
    pub notification_service: Arc<NotificationService>,
    pub ui_state_service: Arc<UiStateService>,
    pub config: Config,
}

impl AppState {
    /// Wire services over the in-memory stores and the given upstream clients
    pub fn new(
        config: Config,
        marketplace: Arc<dyn MarketplaceClient>,
        forum: Arc<dyn ForumClient>,
    ) -> Self {
        let user_repo = Arc::new(InMemoryUserRepository::new());
        let invoice_repo = Arc::new(InMemoryInvoiceRepository::new());

        let notification_service = Arc::new(NotificationService::new(
            Arc::new(InMemoryNotificationRepository::new()),
            user_repo.clone(),
        ));

        Self {
            marketplace,
            forum,
            user_service: Arc::new(UserService::new(user_repo)),
            invoice_service: Arc::new(InvoiceService::new(
                invoice_repo.clone(),
                notification_service.clone(),
            )),
            finance_service: Arc::new(FinanceService::new(invoice_repo)),
            notification_service,
            ui_state_service: Arc::new(UiStateService::new(Arc::new(
                InMemoryUiStateRepository::new(),
            ))),
            config,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full router for `state`
pub fn build_router(state: AppState) -> Router {
    // Public proxy routes (no auth)
    let public_routes = Router::new()
        .route("/api/products", get(handlers::list_products))
        .route("/api/stores", get(handlers::list_stores))
        .route("/api/stores/:id", get(handlers::get_store))
        .route("/api/stores/:id/products", get(handlers::list_store_products))
        .route("/api/forum/topics", get(handlers::list_topics))
        .route("/api/forum/categories", get(handlers::list_categories));

    // Rate limiting: per client IP from the socket connection
    let public_routes = if state.config.rate_limit_enabled() {
        match GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_millisecond(state.config.rate_limit_replenish_ms())
            .burst_size(state.config.rate_limit_burst)
            .finish()
        {
            Some(governor_config) => public_routes.layer(GovernorLayer {
                config: Arc::new(governor_config),
            }),
            None => {
                tracing::warn!("Invalid rate limit settings, public routes are not limited");
                public_routes
            }
        }
    } else {
        public_routes
    };

    // Protected routes
    let protected_routes = Router::new()
        .route("/api/me", get(handlers::get_me))
        .route("/api/orders", get(handlers::list_orders))
        .route(
            "/api/rapifac/invoices",
            get(handlers::list_invoices).post(handlers::create_invoice),
        )
        .route(
            "/api/rapifac/invoices/:id",
            get(handlers::get_invoice).patch(handlers::update_invoice),
        )
        .route("/api/finance/summary", get(handlers::get_summary))
        .route("/api/notifications", get(handlers::list_notifications))
        .route("/api/notifications/read-all", post(handlers::mark_all_read))
        .route("/api/notifications/:id/read", post(handlers::mark_read))
        .route("/api/ui-state", get(handlers::get_ui_state))
        .route("/api/ui-state/actions", post(handlers::dispatch_ui_action))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Webhooks (no auth, uses signature verification)
        .route("/webhooks/woocommerce", post(handlers::woocommerce_webhook))
        .merge(public_routes)
        .merge(protected_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load the optional seed files into the stores
async fn seed_state(state: &AppState) -> anyhow::Result<()> {
    if let Some(path) = &state.config.users_file {
        for user in seed::load_users(path)? {
            state
                .user_service
                .register(user)
                .await
                .with_context(|| format!("Failed to register user from {}", path))?;
        }
    } else {
        tracing::warn!("USERS_FILE not set, only public routes will be usable");
    }

    if let Some(path) = &state.config.invoices_file {
        let invoices = seed::load_invoices(path)?;
        let count = invoices.len();
        for invoice in invoices {
            state
                .invoice_service
                .import(invoice)
                .await
                .with_context(|| format!("Failed to import invoice from {}", path))?;
        }
        tracing::info!(count, "Invoices imported");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,marketplace_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting marketplace API...");

    let config = Config::from_env();

    let marketplace = Arc::new(WooCommerceClient::new(
        config.wc_base_url.clone(),
        config.wc_consumer_key.clone(),
        config.wc_consumer_secret.clone(),
        config.upstream_timeout,
    ));
    let forum = Arc::new(DiscourseForumClient::new(
        config.forum_base_url.clone(),
        config.forum_api_key.clone(),
        config.forum_api_username.clone(),
        config.upstream_timeout,
    ));

    let state = AppState::new(config.clone(), marketplace, forum);
    seed_state(&state).await?;

    // Simulated realtime push until a live channel exists
    state
        .notification_service
        .clone()
        .schedule_welcome(config.welcome_notification_delay);

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
