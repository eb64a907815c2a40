use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// WordPress site root hosting WooCommerce and Dokan
    pub wc_base_url: String,
    pub wc_consumer_key: String,
    pub wc_consumer_secret: String,
    /// Secret for verifying WooCommerce webhooks (HMAC-SHA256, base64)
    pub wc_webhook_secret: Option<String>,
    pub forum_base_url: String,
    pub forum_api_key: Option<String>,
    pub forum_api_username: Option<String>,
    pub upstream_timeout: Duration,
    /// JSON seed of dashboard users
    pub users_file: Option<String>,
    /// JSON seed of invoices
    pub invoices_file: Option<String>,
    pub welcome_notification_delay: Duration,
    /// Sustained requests per second per IP on public routes (0 disables)
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            wc_base_url: "http://localhost:8000".to_string(),
            wc_consumer_key: String::new(),
            wc_consumer_secret: String::new(),
            wc_webhook_secret: None,
            forum_base_url: "http://localhost:4200".to_string(),
            forum_api_key: None,
            forum_api_username: None,
            upstream_timeout: Duration::from_secs(15),
            users_file: None,
            invoices_file: None,
            welcome_notification_delay: Duration::from_secs(3),
            rate_limit_per_second: 10,
            rate_limit_burst: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            port: parse_var("PORT").unwrap_or(defaults.port),
            wc_base_url: env::var("WC_BASE_URL").unwrap_or(defaults.wc_base_url),
            wc_consumer_key: env::var("WC_CONSUMER_KEY").unwrap_or_default(),
            wc_consumer_secret: env::var("WC_CONSUMER_SECRET").unwrap_or_default(),
            wc_webhook_secret: non_empty_var("WC_WEBHOOK_SECRET"),
            forum_base_url: env::var("FORUM_BASE_URL").unwrap_or(defaults.forum_base_url),
            forum_api_key: non_empty_var("FORUM_API_KEY"),
            forum_api_username: non_empty_var("FORUM_API_USERNAME"),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
            users_file: non_empty_var("USERS_FILE"),
            invoices_file: non_empty_var("INVOICES_FILE"),
            welcome_notification_delay: parse_var("WELCOME_NOTIFICATION_DELAY_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.welcome_notification_delay),
            rate_limit_per_second: parse_var("RATE_LIMIT_PER_SECOND")
                .unwrap_or(defaults.rate_limit_per_second),
            rate_limit_burst: parse_var("RATE_LIMIT_BURST").unwrap_or(defaults.rate_limit_burst),
        }
    }

    /// Check if the public-route rate limiter should be installed
    pub fn rate_limit_enabled(&self) -> bool {
        self.rate_limit_per_second > 0 && self.rate_limit_burst > 0
    }

    /// Interval after which the limiter hands one request back to a client,
    /// so that `rate_limit_per_second` requests are sustained each second
    pub fn rate_limit_replenish_ms(&self) -> u64 {
        (1000 / self.rate_limit_per_second.max(1)).max(1)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
