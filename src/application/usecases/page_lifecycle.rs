use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::entities::pages::{InsertPageEntity, PageEntity};
use crate::domain::repositories::pages::{InsertPageError, PageRepository};
use crate::domain::value_objects::enums::page_statuses::PageStatus;
use crate::domain::value_objects::pages::{CreatePageModel, FieldError};
use crate::domain::value_objects::slugs;

/// Suffix regenerations before giving up on a unique slug.
pub const SLUG_INSERT_ATTEMPTS: usize = 5;

#[derive(Debug, Error)]
pub enum PageLifecycleError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("could not allocate a unique slug")]
    SlugExhausted,
    #[error("page not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PageLifecycleError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PageLifecycleError::Validation(_) => StatusCode::BAD_REQUEST,
            PageLifecycleError::SlugExhausted => StatusCode::CONFLICT,
            PageLifecycleError::NotFound => StatusCode::NOT_FOUND,
            PageLifecycleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type LifecycleResult<T> = std::result::Result<T, PageLifecycleError>;

/// How a caller names the page it wants to activate: the slug carried in the
/// line item, or the provider billing id when no slug arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKey<'a> {
    Slug(&'a str),
    BillingId(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated { slug: String },
    /// Redelivery or a lost race; the page is already past pending.
    AlreadyProcessed { status: String },
}

pub struct PageLifecycleUseCase<P>
where
    P: PageRepository + Send + Sync + 'static,
{
    page_repo: Arc<P>,
}

impl<P> PageLifecycleUseCase<P>
where
    P: PageRepository + Send + Sync + 'static,
{
    pub fn new(page_repo: Arc<P>) -> Self {
        Self { page_repo }
    }

    /// Validates the draft and inserts it as `pending_payment`. Slug
    /// collisions regenerate the random suffix in a bounded loop.
    pub async fn create(
        &self,
        model: CreatePageModel,
        today: NaiveDate,
    ) -> LifecycleResult<PageEntity> {
        let field_errors = model.validate(today);
        if !field_errors.is_empty() {
            warn!(
                error_count = field_errors.len(),
                "page_lifecycle: draft failed validation"
            );
            return Err(PageLifecycleError::Validation(field_errors));
        }

        for attempt in 1..=SLUG_INSERT_ATTEMPTS {
            let slug = slugs::generate_slug(&model.name1, model.name2.as_deref());

            let insert_page_entity = InsertPageEntity {
                slug: slug.clone(),
                page_type: model.page_type.to_string(),
                name1: model.name1.clone(),
                name2: model.name2.clone(),
                occasion: model.occasion.clone(),
                message: model.message.clone(),
                start_date: model.start_date,
                photo_urls: model.photo_urls.clone(),
                plan: model.plan.clone(),
                status: PageStatus::PendingPayment.to_string(),
            };

            match self.page_repo.insert(insert_page_entity).await {
                Ok(page) => {
                    info!(
                        slug = %page.slug,
                        page_id = %page.id,
                        plan = %page.plan,
                        "page_lifecycle: page created"
                    );
                    return Ok(page);
                }
                Err(InsertPageError::SlugTaken) => {
                    warn!(
                        attempt,
                        slug = %slug,
                        "page_lifecycle: slug collision, regenerating suffix"
                    );
                }
                Err(InsertPageError::Other(err)) => {
                    error!(db_error = ?err, "page_lifecycle: failed to insert page");
                    return Err(PageLifecycleError::Internal(err));
                }
            }
        }

        error!(
            attempts = SLUG_INSERT_ATTEMPTS,
            "page_lifecycle: slug retries exhausted"
        );
        Err(PageLifecycleError::SlugExhausted)
    }

    /// Flips a pending page to active, exactly once. Redeliveries and racing
    /// duplicates observe `AlreadyProcessed`, never an error.
    pub async fn activate(
        &self,
        key: ActivationKey<'_>,
        billing_id: &str,
    ) -> LifecycleResult<ActivationOutcome> {
        let page = match key {
            ActivationKey::Slug(slug) => self.page_repo.find_by_slug(slug).await,
            ActivationKey::BillingId(id) => self.page_repo.find_by_billing_id(id).await,
        }
        .map_err(|err| {
            error!(db_error = ?err, "page_lifecycle: activation lookup failed");
            PageLifecycleError::Internal(err)
        })?
        .ok_or(PageLifecycleError::NotFound)?;

        if PageStatus::from_str(&page.status) != Some(PageStatus::PendingPayment) {
            info!(
                slug = %page.slug,
                status = %page.status,
                "page_lifecycle: page already processed"
            );
            return Ok(ActivationOutcome::AlreadyProcessed {
                status: page.status,
            });
        }

        let affected = self
            .page_repo
            .activate_pending(page.id, billing_id)
            .await
            .map_err(|err| {
                error!(
                    page_id = %page.id,
                    db_error = ?err,
                    "page_lifecycle: activation update failed"
                );
                PageLifecycleError::Internal(err)
            })?;

        if affected == 0 {
            info!(
                slug = %page.slug,
                "page_lifecycle: lost activation race, already handled"
            );
            return Ok(ActivationOutcome::AlreadyProcessed {
                status: PageStatus::Active.to_string(),
            });
        }

        info!(
            slug = %page.slug,
            billing_id,
            "page_lifecycle: page activated"
        );
        Ok(ActivationOutcome::Activated { slug: page.slug })
    }
}
