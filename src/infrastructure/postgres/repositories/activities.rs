use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};

use crate::domain::entities::activities::ActivityEntity;
use crate::domain::repositories::activities::ActivityRepository;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::activities;

pub struct ActivityPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ActivityPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ActivityRepository for ActivityPostgres {
    async fn list_by_page_type(&self, page_type: &str) -> Result<Vec<ActivityEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = activities::table
            .filter(activities::page_type.eq(page_type))
            .select(ActivityEntity::as_select())
            .load::<ActivityEntity>(&mut conn)?;

        Ok(results)
    }
}
