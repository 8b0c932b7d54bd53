use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::{
    application::{
        interfaces::billing::BillingGateway,
        usecases::{
            billing_checkout::BillingCheckoutUseCase,
            billing_webhook::{BillingWebhookUseCase, WebhookOutcome},
            page_lifecycle::PageLifecycleUseCase,
        },
    },
    config::{config_loader, config_model::DotEnvyConfig},
    domain::{repositories::pages::PageRepository, value_objects::billing::CreateCheckoutModel},
    infrastructure::{
        axum_http::error_responses::{ErrorBody, INTERNAL_ERROR_MESSAGE, error_response},
        billing::abacatepay_client::AbacatePayClient,
        postgres::{postgres_connection::PgPoolSquad, repositories::pages::PagePostgres},
        rate_limit::{RateDecision, RateLimiter},
    },
};

const RATE_LIMIT_MESSAGE: &str = "Muitas requisições. Tente novamente mais tarde.";

/// Signature header candidates, checked in order. Providers differ on the
/// name; the last one is the GitHub-compatible form.
const SIGNATURE_HEADERS: [&str; 3] = ["x-webhook-signature", "x-signature", "x-hub-signature-256"];

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

pub struct CheckoutState<P, G>
where
    P: PageRepository + Send + Sync + 'static,
    G: BillingGateway + Send + Sync + 'static,
{
    usecase: Arc<BillingCheckoutUseCase<P, G>>,
    rate_limiter: Arc<RateLimiter>,
}

impl<P, G> Clone for CheckoutState<P, G>
where
    P: PageRepository + Send + Sync + 'static,
    G: BillingGateway + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            usecase: Arc::clone(&self.usecase),
            rate_limiter: Arc::clone(&self.rate_limiter),
        }
    }
}

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let page_repository = Arc::new(PagePostgres::new(Arc::clone(&db_pool)));
    // Checkout and webhook talk to the same provider account.
    let billing_gateway = Arc::new(AbacatePayClient::new(
        config.billing.api_base_url.clone(),
        config.billing.api_key.clone(),
        config.billing.webhook_secret.clone(),
    ));

    let checkout_usecase = BillingCheckoutUseCase::new(
        Arc::clone(&page_repository),
        Arc::clone(&billing_gateway),
        config.billing.return_origins.clone(),
        config_loader::get_stage(),
    );
    let checkout_state = CheckoutState {
        usecase: Arc::new(checkout_usecase),
        rate_limiter: Arc::new(RateLimiter::new(
            config.billing.checkout_rate_limit,
            Duration::from_secs(config.billing.checkout_rate_window_secs),
        )),
    };

    let lifecycle_usecase = PageLifecycleUseCase::new(page_repository);
    let webhook_usecase = BillingWebhookUseCase::new(Arc::new(lifecycle_usecase), billing_gateway);

    Router::new()
        .route(
            "/checkout",
            post(create_checkout::<PagePostgres, AbacatePayClient>),
        )
        .with_state(checkout_state)
        .merge(
            Router::new()
                .route(
                    "/webhook",
                    post(handle_webhook::<PagePostgres, AbacatePayClient>),
                )
                .with_state(Arc::new(webhook_usecase)),
        )
}

pub async fn create_checkout<P, G>(
    State(state): State<CheckoutState<P, G>>,
    headers: HeaderMap,
    Json(create_checkout_model): Json<CreateCheckoutModel>,
) -> impl IntoResponse
where
    P: PageRepository + Send + Sync + 'static,
    G: BillingGateway + Send + Sync + 'static,
{
    let ip = client_ip(&headers);
    let remaining = match state.rate_limiter.check(&format!("create-billing:{}", ip)) {
        RateDecision::Allowed { remaining } => remaining,
        RateDecision::Limited { retry_after } => {
            let retry_secs = retry_after.as_secs_f64().ceil() as u64;
            warn!(
                "billing_checkout: rate limit exceeded for ip {}...",
                &ip[..ip.len().min(8)]
            );
            return (
                StatusCode::TOO_MANY_REQUESTS,
                [
                    ("retry-after", retry_secs.to_string()),
                    ("x-ratelimit-remaining", "0".to_string()),
                ],
                Json(ErrorBody {
                    error: RATE_LIMIT_MESSAGE.to_string(),
                }),
            )
                .into_response();
        }
    };

    let request_origin = headers.get("origin").and_then(|value| value.to_str().ok());

    match state
        .usecase
        .checkout(create_checkout_model, request_origin)
        .await
    {
        Ok(session) => (
            StatusCode::OK,
            [("x-ratelimit-remaining", remaining.to_string())],
            Json(session),
        )
            .into_response(),
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                error!(error = ?err, "billing_checkout: checkout failed");
                return error_response(status, INTERNAL_ERROR_MESSAGE);
            }
            error_response(status, err.to_string())
        }
    }
}

pub async fn handle_webhook<P, G>(
    State(usecase): State<Arc<BillingWebhookUseCase<P, G>>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse
where
    P: PageRepository + Send + Sync + 'static,
    G: BillingGateway + Send + Sync + 'static,
{
    let signature = signature_header(&headers);

    match usecase.handle(&body, signature).await {
        Ok(outcome) => {
            let message = outcome.ack_message().to_string();
            let slug = match outcome {
                WebhookOutcome::Activated { slug } => Some(slug),
                _ => None,
            };
            (
                StatusCode::OK,
                Json(WebhookAck {
                    received: true,
                    message,
                    slug,
                }),
            )
                .into_response()
        }
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                error!(error = ?err, "billing_webhook: delivery processing failed");
                return error_response(status, INTERNAL_ERROR_MESSAGE);
            }
            error_response(status, err.to_string())
        }
    }
}

/// Client address as reported by the proxy chain, or `unknown` when the
/// request carries none of the usual headers.
fn client_ip(headers: &HeaderMap) -> &str {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        return forwarded.split(',').next().unwrap_or(forwarded).trim();
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|value| value.to_str().ok()) {
        return real_ip;
    }
    if let Some(cf_ip) = headers
        .get("cf-connecting-ip")
        .and_then(|value| value.to_str().ok())
    {
        return cf_ip;
    }
    "unknown"
}

fn signature_header(headers: &HeaderMap) -> Option<&str> {
    SIGNATURE_HEADERS
        .iter()
        .find_map(|name| headers.get(*name).and_then(|value| value.to_str().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_from(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(*name, value.parse().unwrap());
        }
        headers
    }

    #[test]
    fn forwarded_for_wins_and_keeps_the_first_hop() {
        let headers = headers_from(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);

        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn falls_back_through_real_ip_to_cloudflare() {
        let headers = headers_from(&[("cf-connecting-ip", "198.51.100.9")]);
        assert_eq!(client_ip(&headers), "198.51.100.9");

        let headers = headers_from(&[
            ("x-real-ip", "198.51.100.2"),
            ("cf-connecting-ip", "198.51.100.9"),
        ]);
        assert_eq!(client_ip(&headers), "198.51.100.2");
    }

    #[test]
    fn missing_headers_report_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn signature_header_priority_order() {
        let headers = headers_from(&[
            ("x-hub-signature-256", "sha256=cc"),
            ("x-signature", "bb"),
            ("x-webhook-signature", "aa"),
        ]);
        assert_eq!(signature_header(&headers), Some("aa"));

        let headers = headers_from(&[("x-hub-signature-256", "sha256=cc")]);
        assert_eq!(signature_header(&headers), Some("sha256=cc"));

        assert_eq!(signature_header(&HeaderMap::new()), None);
    }
}
