use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::interfaces::billing::{BillingGateway, NewBillingSession};
use crate::config::stage::Stage;
use crate::domain::repositories::pages::PageRepository;
use crate::domain::value_objects::billing::{CheckoutSessionDto, CreateCheckoutModel};
use crate::domain::value_objects::enums::page_statuses::PageStatus;
use crate::domain::value_objects::plans;
use crate::domain::value_objects::slugs::{self, SLUG_MAX_LEN, SLUG_MIN_LEN};

pub const EMAIL_MAX_LEN: usize = 254;

const DEFAULT_ORIGIN: &str = "https://prasempre.site";

/// Dev-server origins, honored only on the local stage.
const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:8080"];

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Email inválido")]
    InvalidEmail,
    #[error("Plano inválido")]
    InvalidPlan,
    #[error("Slug inválido")]
    InvalidSlug,
    #[error("Página não encontrada")]
    PageNotFound,
    #[error("Esta página já foi processada")]
    AlreadyProcessed,
    #[error("Já existe um pagamento para esta página")]
    BillingExists,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CheckoutError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            CheckoutError::InvalidEmail => StatusCode::BAD_REQUEST,
            CheckoutError::InvalidPlan => StatusCode::BAD_REQUEST,
            CheckoutError::InvalidSlug => StatusCode::BAD_REQUEST,
            CheckoutError::PageNotFound => StatusCode::NOT_FOUND,
            CheckoutError::AlreadyProcessed => StatusCode::BAD_REQUEST,
            CheckoutError::BillingExists => StatusCode::BAD_REQUEST,
            CheckoutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type CheckoutResult<T> = std::result::Result<T, CheckoutError>;

pub struct BillingCheckoutUseCase<P, G>
where
    P: PageRepository + Send + Sync + 'static,
    G: BillingGateway + Send + Sync + 'static,
{
    page_repo: Arc<P>,
    billing_gateway: Arc<G>,
    return_origins: Vec<String>,
    allowed_origins: Vec<String>,
}

impl<P, G> BillingCheckoutUseCase<P, G>
where
    P: PageRepository + Send + Sync + 'static,
    G: BillingGateway + Send + Sync + 'static,
{
    pub fn new(
        page_repo: Arc<P>,
        billing_gateway: Arc<G>,
        return_origins: Vec<String>,
        stage: Stage,
    ) -> Self {
        let mut allowed_origins = return_origins.clone();
        if stage == Stage::Local {
            allowed_origins.extend(LOCAL_ORIGINS.iter().map(|origin| origin.to_string()));
        }
        Self {
            page_repo,
            billing_gateway,
            return_origins,
            allowed_origins,
        }
    }

    pub async fn checkout(
        &self,
        checkout_model: CreateCheckoutModel,
        request_origin: Option<&str>,
    ) -> CheckoutResult<CheckoutSessionDto> {
        let email = checkout_model.customer_email.trim().to_lowercase();
        if !is_valid_email(&email) {
            warn!("billing_checkout: rejected malformed customer email");
            return Err(CheckoutError::InvalidEmail);
        }

        let Some(limits) = plans::known_plan(&checkout_model.plan) else {
            warn!(plan = %checkout_model.plan, "billing_checkout: unknown plan id");
            return Err(CheckoutError::InvalidPlan);
        };

        let slug = checkout_model.slug.as_str();
        if !(SLUG_MIN_LEN..=SLUG_MAX_LEN).contains(&slug.len()) || !slugs::is_valid_slug(slug) {
            warn!(slug, "billing_checkout: malformed slug");
            return Err(CheckoutError::InvalidSlug);
        }

        let page = self
            .page_repo
            .find_by_slug(slug)
            .await
            .map_err(|err| {
                error!(slug, db_error = ?err, "billing_checkout: page lookup failed");
                CheckoutError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(slug, "billing_checkout: page not found");
                CheckoutError::PageNotFound
            })?;

        if PageStatus::from_str(&page.status) != Some(PageStatus::PendingPayment) {
            warn!(slug, status = %page.status, "billing_checkout: page already processed");
            return Err(CheckoutError::AlreadyProcessed);
        }

        if page.billing_id.is_some() {
            warn!(slug, "billing_checkout: page already has a billing session");
            return Err(CheckoutError::BillingExists);
        }

        let origin = self.resolve_origin(request_origin);
        // Slug charset is [a-z0-9-], safe to splice into a URL as-is.
        let return_url = format!("{}/sucesso?slug={}", origin, slug);

        let customer_id = match self.billing_gateway.create_customer(&email).await {
            Ok(customer_id) => customer_id,
            Err(err) => {
                warn!(
                    error = %err,
                    "billing_checkout: customer creation failed, proceeding without customer id"
                );
                None
            }
        };

        let session = self
            .billing_gateway
            .create_billing(NewBillingSession {
                external_id: slug.to_string(),
                product_name: format!("PraSempre - Plano {}", limits.name),
                price_minor: limits.price_minor,
                return_url: return_url.clone(),
                completion_url: return_url,
                customer_id,
            })
            .await
            .map_err(|err| {
                error!(slug, error = %err, "billing_checkout: billing session creation failed");
                CheckoutError::Internal(err)
            })?;

        // Best effort. The webhook records the billing id again on payment.
        if let Err(err) = self.page_repo.set_billing_id(page.id, &session.id).await {
            warn!(
                slug,
                billing_id = %session.id,
                db_error = ?err,
                "billing_checkout: failed to record billing id on page"
            );
        }

        info!(
            slug,
            plan = limits.id,
            billing_id = %session.id,
            "billing_checkout: checkout session created"
        );

        Ok(CheckoutSessionDto {
            checkout_url: session.url,
            billing_id: session.id,
        })
    }

    fn resolve_origin<'a>(&'a self, request_origin: Option<&'a str>) -> &'a str {
        if let Some(origin) = request_origin {
            if self
                .allowed_origins
                .iter()
                .any(|allowed| origin_matches(origin, allowed))
            {
                return origin;
            }
            warn!(origin, "billing_checkout: origin not allow-listed, using default");
        }
        self.return_origins
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_ORIGIN)
    }
}

/// Prefix match with the allow-list entry's port stripped, so any dev-server
/// port on an allowed host passes.
fn origin_matches(origin: &str, allowed: &str) -> bool {
    let base = match allowed.rsplit_once(':') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) => head,
        _ => allowed,
    };
    origin.starts_with(base)
}

/// Mirrors the storefront's email shape check: something@something.something,
/// no whitespace, bounded length.
fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > EMAIL_MAX_LEN {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let bytes = domain.as_bytes();
    bytes.len() >= 3 && bytes[1..bytes.len() - 1].contains(&b'.')
}
