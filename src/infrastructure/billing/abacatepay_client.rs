use anyhow::Result;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{error, warn};

use crate::application::interfaces::billing::{BillingGateway, BillingSession, NewBillingSession};

type HmacSha256 = Hmac<Sha256>;

/// Buyer name sent on customer registration; the provider requires one and
/// the checkout form only collects an email.
const CUSTOMER_NAME: &str = "Cliente PraSempre";

const PAYMENT_METHODS: [&str; 2] = ["PIX", "CREDIT_CARD"];

/// Minimal AbacatePay client built on reqwest.
pub struct AbacatePayClient {
    http: reqwest::Client,
    api_base_url: String,
    api_key: String,
    webhook_secret: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateCustomerRequest<'a> {
    email: &'a str,
    name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBillingRequest<'a> {
    frequency: &'static str,
    methods: &'static [&'static str],
    products: [BillingProductRequest<'a>; 1],
    return_url: &'a str,
    completion_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BillingProductRequest<'a> {
    external_id: &'a str,
    name: &'a str,
    quantity: u32,
    price: i32,
}

/// Every AbacatePay endpoint wraps its payload in `{ data, error }`.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: Option<T>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CustomerData {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BillingData {
    id: Option<String>,
    url: Option<String>,
}

impl AbacatePayClient {
    pub fn new(api_base_url: String, api_key: String, webhook_secret: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url,
            api_key,
            webhook_secret,
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<ApiEnvelope<T>>
    where
        B: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        // The provider reports failures through the envelope's `error` field,
        // so the body is parsed no matter what the HTTP status says.
        let resp = self
            .http
            .post(format!("{}{}", self.api_base_url, path))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let envelope: ApiEnvelope<T> = resp.json().await.map_err(|err| {
            error!(
                status = %status,
                path = %path,
                "abacatepay returned an unreadable response: {}",
                err
            );
            anyhow::Error::from(err)
        })?;

        Ok(envelope)
    }
}

#[async_trait]
impl BillingGateway for AbacatePayClient {
    async fn create_customer(&self, email: &str) -> Result<Option<String>> {
        let body = CreateCustomerRequest {
            email,
            name: CUSTOMER_NAME,
        };

        let envelope: ApiEnvelope<CustomerData> = self.post_json("/customer/create", &body).await?;

        if let Some(message) = envelope.error {
            warn!("abacatepay rejected the customer: {}", message);
            return Ok(None);
        }

        Ok(envelope.data.and_then(|customer| customer.id))
    }

    async fn create_billing(&self, new_billing_session: NewBillingSession) -> Result<BillingSession> {
        let body = CreateBillingRequest {
            frequency: "ONE_TIME",
            methods: &PAYMENT_METHODS,
            products: [BillingProductRequest {
                external_id: &new_billing_session.external_id,
                name: &new_billing_session.product_name,
                quantity: 1,
                price: new_billing_session.price_minor,
            }],
            return_url: &new_billing_session.return_url,
            completion_url: &new_billing_session.completion_url,
            customer_id: new_billing_session.customer_id.as_deref(),
        };

        let envelope: ApiEnvelope<BillingData> = self.post_json("/billing/create", &body).await?;

        if let Some(message) = envelope.error {
            error!(
                external_id = %new_billing_session.external_id,
                "abacatepay billing creation failed: {}",
                message
            );
            anyhow::bail!("AbacatePay error: {}", message);
        }

        let billing = envelope
            .data
            .ok_or_else(|| anyhow::anyhow!("billing response carried no data"))?;
        let id = billing
            .id
            .ok_or_else(|| anyhow::anyhow!("billing response carried no id"))?;
        let url = billing
            .url
            .ok_or_else(|| anyhow::anyhow!("billing response carried no checkout url"))?;

        Ok(BillingSession { id, url })
    }

    fn requires_signed_webhooks(&self) -> bool {
        self.webhook_secret.is_some()
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> Result<()> {
        let Some(secret) = self.webhook_secret.as_deref() else {
            warn!("abacatepay webhook secret not configured, signature check skipped");
            return Ok(());
        };

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
        mac.update(payload);
        let expected = mac.finalize().into_bytes();

        // Deliveries carry either the bare hex digest or a GitHub-style
        // `sha256=` prefixed one.
        let digest = signature.strip_prefix("sha256=").unwrap_or(signature);
        let provided = hex::decode(digest)?;

        if expected[..] != provided[..] {
            anyhow::bail!("invalid webhook signature");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_secret(secret: Option<&str>) -> AbacatePayClient {
        AbacatePayClient::new(
            "https://api.abacatepay.test/v1".to_string(),
            "abc_dev_key".to_string(),
            secret.map(str::to_string),
        )
    }

    fn sign(secret: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_a_bare_hex_signature() {
        let client = client_with_secret(Some("whsec_test"));
        let payload = br#"{"event":"billing.paid"}"#;
        let signature = sign("whsec_test", payload);

        assert!(client.verify_webhook_signature(payload, &signature).is_ok());
    }

    #[test]
    fn accepts_a_prefixed_signature() {
        let client = client_with_secret(Some("whsec_test"));
        let payload = br#"{"event":"billing.paid"}"#;
        let signature = format!("sha256={}", sign("whsec_test", payload));

        assert!(client.verify_webhook_signature(payload, &signature).is_ok());
    }

    #[test]
    fn rejects_a_signature_made_with_another_secret() {
        let client = client_with_secret(Some("whsec_test"));
        let payload = br#"{"event":"billing.paid"}"#;
        let signature = sign("whsec_other", payload);

        assert!(client.verify_webhook_signature(payload, &signature).is_err());
    }

    #[test]
    fn rejects_a_signature_over_a_different_body() {
        let client = client_with_secret(Some("whsec_test"));
        let signature = sign("whsec_test", br#"{"event":"billing.paid"}"#);

        assert!(
            client
                .verify_webhook_signature(br#"{"event":"billing.failed"}"#, &signature)
                .is_err()
        );
    }

    #[test]
    fn rejects_garbage_instead_of_hex() {
        let client = client_with_secret(Some("whsec_test"));

        assert!(
            client
                .verify_webhook_signature(b"{}", "not-a-hex-digest")
                .is_err()
        );
    }

    #[test]
    fn passes_everything_when_no_secret_is_configured() {
        let client = client_with_secret(None);

        assert!(!client.requires_signed_webhooks());
        assert!(client.verify_webhook_signature(b"{}", "anything").is_ok());
    }
}
