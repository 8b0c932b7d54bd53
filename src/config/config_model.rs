#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub billing: Billing,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Billing {
    pub api_base_url: String,
    pub api_key: String,
    /// Webhook verification is skipped (with a warning) when unset.
    pub webhook_secret: Option<String>,
    /// Origins allowed to host the post-checkout return pages.
    pub return_origins: Vec<String>,
    pub checkout_rate_limit: u32,
    pub checkout_rate_window_secs: u64,
}
