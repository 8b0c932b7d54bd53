use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::domain::entities::pages::{InsertPageEntity, PageEntity};
use crate::domain::repositories::pages::{InsertPageError, PageRepository};
use crate::domain::value_objects::enums::page_statuses::PageStatus;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::pages;

pub struct PagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PageRepository for PagePostgres {
    async fn insert(
        &self,
        insert_page_entity: InsertPageEntity,
    ) -> Result<PageEntity, InsertPageError> {
        let mut conn = Arc::clone(&self.db_pool)
            .get()
            .map_err(anyhow::Error::from)?;

        let result = insert_into(pages::table)
            .values(&insert_page_entity)
            .returning(PageEntity::as_returning())
            .get_result::<PageEntity>(&mut conn);

        match result {
            Ok(page) => Ok(page),
            // The unique index on slug is the collision detector.
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(InsertPageError::SlugTaken)
            }
            Err(err) => Err(InsertPageError::Other(err.into())),
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = pages::table
            .filter(pages::slug.eq(slug))
            .select(PageEntity::as_select())
            .first::<PageEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_billing_id(&self, billing_id: &str) -> Result<Option<PageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = pages::table
            .filter(pages::billing_id.eq(billing_id))
            .select(PageEntity::as_select())
            .first::<PageEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn activate_pending(&self, page_id: Uuid, billing_id: &str) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Status predicate makes the flip a compare-and-set; concurrent
        // deliveries see zero rows affected.
        let affected = update(pages::table)
            .filter(pages::id.eq(page_id))
            .filter(pages::status.eq(PageStatus::PendingPayment.to_string()))
            .set((
                pages::status.eq(PageStatus::Active.to_string()),
                pages::is_active.eq(true),
                pages::billing_id.eq(billing_id),
                pages::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    async fn set_billing_id(&self, page_id: Uuid, billing_id: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(pages::table)
            .filter(pages::id.eq(page_id))
            .set((
                pages::billing_id.eq(billing_id),
                pages::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
