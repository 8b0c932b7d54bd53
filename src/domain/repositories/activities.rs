use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::activities::ActivityEntity;

#[async_trait]
#[automock]
pub trait ActivityRepository {
    async fn list_by_page_type(&self, page_type: &str) -> Result<Vec<ActivityEntity>>;
}
