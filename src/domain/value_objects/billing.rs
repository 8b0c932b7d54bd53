use serde::{Deserialize, Serialize};

/// Event names the provider sends when a one-time charge settles.
pub const PAID_EVENTS: [&str; 2] = ["billing.paid", "BILLING_PAID"];

pub const MIN_BILLING_ID_LEN: usize = 5;

/// Webhook envelope. Every field tolerates absence so shape drift downgrades
/// to an acknowledged no-op instead of a retry storm.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BillingWebhookEvent {
    pub event: Option<String>,
    pub data: Option<BillingEventData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BillingEventData {
    pub id: Option<String>,
    pub products: Vec<BillingProduct>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BillingProduct {
    pub external_id: Option<String>,
}

impl BillingWebhookEvent {
    pub fn is_paid(&self) -> bool {
        self.event
            .as_deref()
            .is_some_and(|event| PAID_EVENTS.contains(&event))
    }

    /// Slug the checkout step attached to the line item, if any.
    pub fn external_id(&self) -> Option<&str> {
        self.data
            .as_ref()?
            .products
            .first()?
            .external_id
            .as_deref()
    }

    pub fn billing_id(&self) -> Option<&str> {
        self.data.as_ref()?.id.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutModel {
    pub slug: String,
    pub plan: String,
    pub customer_email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionDto {
    pub checkout_url: String,
    pub billing_id: String,
}
