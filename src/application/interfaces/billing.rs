use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

/// Input for a one-time checkout charge at the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBillingSession {
    /// Page slug, echoed back by the webhook as `products[0].externalId`.
    pub external_id: String,
    pub product_name: String,
    pub price_minor: i32,
    /// Where the browser returns if the buyer backs out.
    pub return_url: String,
    /// Where the browser lands after a completed payment.
    pub completion_url: String,
    pub customer_id: Option<String>,
}

/// Provider-issued checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingSession {
    pub id: String,
    pub url: String,
}

#[async_trait]
#[automock]
pub trait BillingGateway: Send + Sync {
    /// Registers the buyer with the provider. A provider-side rejection is
    /// tolerated and surfaces as `Ok(None)`; only transport failures error.
    async fn create_customer(&self, email: &str) -> Result<Option<String>>;

    async fn create_billing(
        &self,
        new_billing_session: NewBillingSession,
    ) -> Result<BillingSession>;

    /// True when a webhook secret is configured and deliveries must carry a
    /// signature header.
    fn requires_signed_webhooks(&self) -> bool;

    /// Checks the HMAC-SHA256 hex digest of the raw webhook body against the
    /// signature header value. Passes with a warning when no secret is
    /// configured.
    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> Result<()>;
}
