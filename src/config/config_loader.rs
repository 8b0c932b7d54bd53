use anyhow::{Ok, Result};

use super::config_model::{Billing, Database, DotEnvyConfig, Server};
use crate::config::stage::Stage;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let billing = Billing {
        api_base_url: std::env::var("ABACATEPAY_API_URL")
            .unwrap_or_else(|_| "https://api.abacatepay.com/v1".to_string()),
        api_key: std::env::var("ABACATEPAY_API_KEY").expect("ABACATEPAY_API_KEY is invalid"),
        webhook_secret: std::env::var("ABACATEPAY_WEBHOOK_SECRET").ok(),
        return_origins: std::env::var("RETURN_URL_ORIGINS")
            .unwrap_or_else(|_| "https://prasempre.site".to_string())
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect(),
        checkout_rate_limit: std::env::var("CHECKOUT_RATE_LIMIT")
            .unwrap_or_else(|_| "5".to_string())
            .parse()?,
        checkout_rate_window_secs: std::env::var("CHECKOUT_RATE_WINDOW_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()?,
    };

    Ok(DotEnvyConfig {
        server,
        database,
        billing,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}
