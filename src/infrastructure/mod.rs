pub mod axum_http;
pub mod billing;
pub mod client_state;
pub mod postgres;
pub mod rate_limit;
