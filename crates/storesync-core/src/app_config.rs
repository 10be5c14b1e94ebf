#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Storefront root of the destination WooCommerce site, e.g. `"https://shop.example.ir"`.
    pub woo_base_url: String,
    pub woo_consumer_key: String,
    pub woo_consumer_secret: String,
    pub woo_request_timeout_secs: u64,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
    /// How many features are folded into the short-description summary line.
    pub summary_feature_limit: usize,
    /// Category name assigned when the scraped page carries no usable breadcrumb.
    pub default_category: Option<String>,
    pub verify_images: bool,
    /// Download each gallery image and re-upload it to the store's media
    /// library before creating the product.
    pub rehost_images: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("woo_base_url", &self.woo_base_url)
            .field("woo_consumer_key", &"[redacted]")
            .field("woo_consumer_secret", &"[redacted]")
            .field("woo_request_timeout_secs", &self.woo_request_timeout_secs)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_max_retries", &self.scraper_max_retries)
            .field(
                "scraper_retry_backoff_base_secs",
                &self.scraper_retry_backoff_base_secs,
            )
            .field("summary_feature_limit", &self.summary_feature_limit)
            .field("default_category", &self.default_category)
            .field("verify_images", &self.verify_images)
            .field("rehost_images", &self.rehost_images)
            .finish()
    }
}
