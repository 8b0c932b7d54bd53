use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Local;
use serde::Serialize;
use tracing::error;

use crate::{
    application::usecases::{
        page_lifecycle::{PageLifecycleError, PageLifecycleUseCase},
        page_view::PageViewUseCase,
    },
    domain::{
        repositories::{activities::ActivityRepository, pages::PageRepository},
        value_objects::pages::CreatePageModel,
    },
    infrastructure::{
        axum_http::error_responses::{INTERNAL_ERROR_MESSAGE, error_response},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{activities::ActivityPostgres, pages::PagePostgres},
        },
    },
};

#[derive(Debug, Serialize)]
pub struct CreatePageResponse {
    pub slug: String,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let page_repository = Arc::new(PagePostgres::new(Arc::clone(&db_pool)));
    let activity_repository = Arc::new(ActivityPostgres::new(Arc::clone(&db_pool)));

    let lifecycle_usecase = PageLifecycleUseCase::new(Arc::clone(&page_repository));
    let view_usecase = PageViewUseCase::new(page_repository, activity_repository);

    Router::new()
        .route("/", post(create_page::<PagePostgres>))
        .with_state(Arc::new(lifecycle_usecase))
        .merge(
            Router::new()
                .route("/:slug", get(view_page::<PagePostgres, ActivityPostgres>))
                .with_state(Arc::new(view_usecase)),
        )
}

pub async fn create_page<P>(
    State(usecase): State<Arc<PageLifecycleUseCase<P>>>,
    Json(create_page_model): Json<CreatePageModel>,
) -> impl IntoResponse
where
    P: PageRepository + Send + Sync + 'static,
{
    // The product ships to a single region, so "today" for the start-date
    // check is server-local time.
    let today = Local::now().date_naive();

    match usecase.create(create_page_model, today).await {
        Ok(page) => (StatusCode::OK, Json(CreatePageResponse { slug: page.slug })).into_response(),
        Err(PageLifecycleError::Validation(field_errors)) => {
            (StatusCode::BAD_REQUEST, Json(field_errors)).into_response()
        }
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                error!(error = ?err, "pages: create failed");
                return error_response(status, INTERNAL_ERROR_MESSAGE);
            }
            error_response(status, err.to_string())
        }
    }
}

pub async fn view_page<P, A>(
    State(usecase): State<Arc<PageViewUseCase<P, A>>>,
    Path(slug): Path<String>,
) -> impl IntoResponse
where
    P: PageRepository + Send + Sync + 'static,
    A: ActivityRepository + Send + Sync + 'static,
{
    match usecase.page_by_slug(&slug).await {
        Ok(page) => Json(page).into_response(),
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                error!(%slug, error = ?err, "pages: view failed");
                return error_response(status, INTERNAL_ERROR_MESSAGE);
            }
            error_response(status, err.to_string())
        }
    }
}
