use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::repositories::activities::ActivityRepository;
use crate::domain::repositories::pages::PageRepository;
use crate::domain::value_objects::activities::{self, ActivityModel};
use crate::domain::value_objects::enums::page_statuses::PageStatus;
use crate::domain::value_objects::enums::page_types::PageType;
use crate::domain::value_objects::pages::PageDto;

#[derive(Debug, Error)]
pub enum PageViewError {
    #[error("Página não encontrada")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PageViewError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PageViewError::NotFound => StatusCode::NOT_FOUND,
            PageViewError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct PageViewUseCase<P, A>
where
    P: PageRepository + Send + Sync + 'static,
    A: ActivityRepository + Send + Sync + 'static,
{
    page_repo: Arc<P>,
    activity_repo: Arc<A>,
}

impl<P, A> PageViewUseCase<P, A>
where
    P: PageRepository + Send + Sync + 'static,
    A: ActivityRepository + Send + Sync + 'static,
{
    pub fn new(page_repo: Arc<P>, activity_repo: Arc<A>) -> Self {
        Self {
            page_repo,
            activity_repo,
        }
    }

    /// Serves an active page with its activity pool. Pending and absent pages
    /// are indistinguishable to the viewer.
    pub async fn page_by_slug(&self, slug: &str) -> Result<PageDto, PageViewError> {
        let page = self
            .page_repo
            .find_by_slug(slug)
            .await
            .map_err(|err| {
                error!(slug, db_error = ?err, "page_view: page lookup failed");
                PageViewError::Internal(err)
            })?
            .ok_or(PageViewError::NotFound)?;

        if !page.is_active || PageStatus::from_str(&page.status) != Some(PageStatus::Active) {
            info!(slug, status = %page.status, "page_view: page not visible yet");
            return Err(PageViewError::NotFound);
        }

        let activities = self.activities_for(&page.page_type).await;

        let mut dto = PageDto::from(page);
        dto.activities = activities;
        Ok(dto)
    }

    /// Pool for one page type. A failed or empty content lookup substitutes
    /// the built-in pool so the selector always has something to pick from.
    async fn activities_for(&self, page_type: &str) -> Vec<ActivityModel> {
        let fallback_type = PageType::from_str(page_type).unwrap_or_default();

        match self.activity_repo.list_by_page_type(page_type).await {
            Ok(rows) if !rows.is_empty() => rows.into_iter().map(ActivityModel::from).collect(),
            Ok(_) => {
                info!(page_type, "page_view: activities table empty, using built-in pool");
                activities::default_pool(fallback_type)
            }
            Err(err) => {
                warn!(page_type, db_error = ?err, "page_view: activities lookup failed, using built-in pool");
                activities::default_pool(fallback_type)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::activities::ActivityEntity;
    use crate::domain::entities::pages::PageEntity;
    use crate::domain::repositories::activities::MockActivityRepository;
    use crate::domain::repositories::pages::MockPageRepository;
    use anyhow::anyhow;
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn sample_page(slug: &str, status: PageStatus) -> PageEntity {
        let now = Utc::now();
        PageEntity {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            page_type: "couple".to_string(),
            name1: "Ana".to_string(),
            name2: Some("João".to_string()),
            occasion: Some("Aniversário de namoro".to_string()),
            message: "Te amo!".to_string(),
            start_date: NaiveDate::from_ymd_opt(2022, 6, 15).unwrap(),
            photo_urls: vec!["https://cdn.example.com/foto.jpg".to_string()],
            plan: "19_90".to_string(),
            status: status.to_string(),
            billing_id: Some("bill_12345".to_string()),
            is_active: status == PageStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_activity(title: &str) -> ActivityEntity {
        ActivityEntity {
            id: Uuid::new_v4(),
            page_type: "couple".to_string(),
            title: title.to_string(),
            prompt: "Façam juntos.".to_string(),
            category: "conversa".to_string(),
            emoji: "💬".to_string(),
            duration: 15,
        }
    }

    #[tokio::test]
    async fn active_page_is_served_with_its_pool() {
        let page = sample_page("ana-e-joao-x7k2", PageStatus::Active);
        let mut page_repo = MockPageRepository::new();
        page_repo
            .expect_find_by_slug()
            .with(eq("ana-e-joao-x7k2"))
            .returning(move |_| {
                let page = page.clone();
                Box::pin(async move { Ok(Some(page)) })
            });

        let mut activity_repo = MockActivityRepository::new();
        activity_repo
            .expect_list_by_page_type()
            .with(eq("couple"))
            .returning(|_| {
                Box::pin(async {
                    Ok(vec![
                        sample_activity("Carta do coração"),
                        sample_activity("Dança na sala"),
                    ])
                })
            });

        let usecase = PageViewUseCase::new(Arc::new(page_repo), Arc::new(activity_repo));
        let dto = usecase.page_by_slug("ana-e-joao-x7k2").await.unwrap();

        assert_eq!(dto.slug, "ana-e-joao-x7k2");
        assert_eq!(dto.page_type, "couple");
        assert_eq!(dto.activities.len(), 2);
        assert_eq!(dto.activities[0].title, "Carta do coração");
    }

    #[tokio::test]
    async fn pending_page_is_indistinguishable_from_absent() {
        let page = sample_page("ana-e-joao-x7k2", PageStatus::PendingPayment);
        let mut page_repo = MockPageRepository::new();
        page_repo.expect_find_by_slug().returning(move |_| {
            let page = page.clone();
            Box::pin(async move { Ok(Some(page)) })
        });

        let mut activity_repo = MockActivityRepository::new();
        activity_repo.expect_list_by_page_type().times(0);

        let usecase = PageViewUseCase::new(Arc::new(page_repo), Arc::new(activity_repo));
        let err = usecase.page_by_slug("ana-e-joao-x7k2").await.unwrap_err();

        assert!(matches!(err, PageViewError::NotFound));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_page_is_not_found() {
        let mut page_repo = MockPageRepository::new();
        page_repo
            .expect_find_by_slug()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = PageViewUseCase::new(
            Arc::new(page_repo),
            Arc::new(MockActivityRepository::new()),
        );
        let err = usecase.page_by_slug("nao-existe-0000").await.unwrap_err();
        assert!(matches!(err, PageViewError::NotFound));
    }

    #[tokio::test]
    async fn empty_activity_table_falls_back_to_the_built_in_pool() {
        let page = sample_page("ana-e-joao-x7k2", PageStatus::Active);
        let mut page_repo = MockPageRepository::new();
        page_repo.expect_find_by_slug().returning(move |_| {
            let page = page.clone();
            Box::pin(async move { Ok(Some(page)) })
        });

        let mut activity_repo = MockActivityRepository::new();
        activity_repo
            .expect_list_by_page_type()
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));

        let usecase = PageViewUseCase::new(Arc::new(page_repo), Arc::new(activity_repo));
        let dto = usecase.page_by_slug("ana-e-joao-x7k2").await.unwrap();

        assert!(!dto.activities.is_empty());
        assert!(dto.activities.iter().all(|a| a.id.starts_with("couple-")));
    }

    #[tokio::test]
    async fn failed_activity_lookup_still_serves_the_page() {
        let page = sample_page("ana-e-joao-x7k2", PageStatus::Active);
        let mut page_repo = MockPageRepository::new();
        page_repo.expect_find_by_slug().returning(move |_| {
            let page = page.clone();
            Box::pin(async move { Ok(Some(page)) })
        });

        let mut activity_repo = MockActivityRepository::new();
        activity_repo
            .expect_list_by_page_type()
            .returning(|_| Box::pin(async { Err(anyhow!("connection refused")) }));

        let usecase = PageViewUseCase::new(Arc::new(page_repo), Arc::new(activity_repo));
        let dto = usecase.page_by_slug("ana-e-joao-x7k2").await.unwrap();

        assert!(!dto.activities.is_empty());
    }
}
