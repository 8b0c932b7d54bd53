use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::pages::{InsertPageEntity, PageEntity};

/// Insert failure split so the caller can regenerate the slug suffix on a
/// uniqueness collision and give up on anything else.
#[derive(Debug, Error)]
pub enum InsertPageError {
    #[error("slug already exists")]
    SlugTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
#[automock]
pub trait PageRepository {
    async fn insert(
        &self,
        insert_page_entity: InsertPageEntity,
    ) -> Result<PageEntity, InsertPageError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PageEntity>>;

    async fn find_by_billing_id(&self, billing_id: &str) -> Result<Option<PageEntity>>;

    /// Conditional activation: flips `pending_payment` to `active` and records
    /// the billing id in one statement. Returns the number of rows affected;
    /// zero means another delivery already won.
    async fn activate_pending(&self, page_id: Uuid, billing_id: &str) -> Result<usize>;

    async fn set_billing_id(&self, page_id: Uuid, billing_id: &str) -> Result<()>;
}
