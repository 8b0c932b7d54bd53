use std::sync::Arc;

use anyhow::anyhow;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::interfaces::billing::BillingGateway;
use crate::application::usecases::page_lifecycle::{
    ActivationKey, ActivationOutcome, PageLifecycleError, PageLifecycleUseCase,
};
use crate::domain::repositories::pages::PageRepository;
use crate::domain::value_objects::billing::{BillingWebhookEvent, MIN_BILLING_ID_LEN};
use crate::domain::value_objects::slugs;

#[derive(Debug, Error)]
pub enum BillingWebhookError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Invalid billing ID")]
    InvalidBillingId,
    #[error("Invalid slug format")]
    InvalidSlug,
    #[error("Page not found")]
    PageNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BillingWebhookError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            BillingWebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            BillingWebhookError::InvalidBillingId => StatusCode::BAD_REQUEST,
            BillingWebhookError::InvalidSlug => StatusCode::BAD_REQUEST,
            BillingWebhookError::PageNotFound => StatusCode::NOT_FOUND,
            BillingWebhookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type WebhookResult<T> = std::result::Result<T, BillingWebhookError>;

/// A delivery the provider should consider settled. Everything here answers
/// 200 so the provider stops retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    Activated { slug: String },
    AlreadyProcessed,
    Ignored { reason: &'static str },
}

impl WebhookOutcome {
    pub fn ack_message(&self) -> &str {
        match self {
            WebhookOutcome::Activated { .. } => "Payment processed successfully",
            WebhookOutcome::AlreadyProcessed => "Page already processed",
            WebhookOutcome::Ignored { reason } => reason,
        }
    }
}

pub struct BillingWebhookUseCase<P, G>
where
    P: PageRepository + Send + Sync + 'static,
    G: BillingGateway + Send + Sync + 'static,
{
    lifecycle: Arc<PageLifecycleUseCase<P>>,
    billing_gateway: Arc<G>,
}

impl<P, G> BillingWebhookUseCase<P, G>
where
    P: PageRepository + Send + Sync + 'static,
    G: BillingGateway + Send + Sync + 'static,
{
    pub fn new(lifecycle: Arc<PageLifecycleUseCase<P>>, billing_gateway: Arc<G>) -> Self {
        Self {
            lifecycle,
            billing_gateway,
        }
    }

    pub async fn handle(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> WebhookResult<WebhookOutcome> {
        info!(
            payload = %String::from_utf8_lossy(payload),
            "billing_webhook: delivery received"
        );

        match signature {
            Some(signature) => {
                self.billing_gateway
                    .verify_webhook_signature(payload, signature)
                    .map_err(|err| {
                        warn!(error = %err, "billing_webhook: signature verification failed");
                        BillingWebhookError::InvalidSignature
                    })?;
            }
            None if self.billing_gateway.requires_signed_webhooks() => {
                warn!("billing_webhook: delivery rejected, signature header missing");
                return Err(BillingWebhookError::InvalidSignature);
            }
            None => {
                warn!("billing_webhook: unsigned delivery accepted, no webhook secret configured");
            }
        }

        let event: BillingWebhookEvent = match serde_json::from_slice(payload) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "billing_webhook: payload is not valid JSON, ignoring");
                return Ok(WebhookOutcome::Ignored {
                    reason: "Invalid payload",
                });
            }
        };

        if !event.is_paid() {
            info!(event = ?event.event, "billing_webhook: event not processed");
            return Ok(WebhookOutcome::Ignored {
                reason: "Event not processed",
            });
        }

        let billing_id = match event.billing_id() {
            Some(id) if id.len() >= MIN_BILLING_ID_LEN => id,
            other => {
                warn!(billing_id = ?other, "billing_webhook: billing id missing or too short");
                return Err(BillingWebhookError::InvalidBillingId);
            }
        };

        // An empty line-item id counts as absent, same as no line items.
        let key = match event.external_id().filter(|slug| !slug.is_empty()) {
            Some(slug) => {
                if !slugs::is_valid_slug(slug) {
                    warn!(slug, "billing_webhook: external id is not a valid slug");
                    return Err(BillingWebhookError::InvalidSlug);
                }
                ActivationKey::Slug(slug)
            }
            None => ActivationKey::BillingId(billing_id),
        };

        let outcome = self
            .lifecycle
            .activate(key, billing_id)
            .await
            .map_err(|err| match err {
                PageLifecycleError::NotFound => BillingWebhookError::PageNotFound,
                PageLifecycleError::Internal(err) => BillingWebhookError::Internal(err),
                other => BillingWebhookError::Internal(anyhow!(other)),
            })?;

        match outcome {
            ActivationOutcome::Activated { slug } => {
                info!(slug = %slug, billing_id, "billing_webhook: payment settled, page activated");
                Ok(WebhookOutcome::Activated { slug })
            }
            ActivationOutcome::AlreadyProcessed { status } => {
                info!(
                    billing_id,
                    status = %status,
                    "billing_webhook: redelivery acknowledged"
                );
                Ok(WebhookOutcome::AlreadyProcessed)
            }
        }
    }
}
