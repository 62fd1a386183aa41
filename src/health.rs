use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    database: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service is up", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Gujarati Translator API".to_string(),
        status: "active".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse),
        (status = 503, description = "Service unavailable")
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    match state.activity.ping().await {
        Ok(()) => {
            info!("Health check passed");
            Ok(Json(HealthResponse {
                status: "OK".to_string(),
                database: "healthy".to_string(),
            }))
        }
        Err(e) => {
            error!(error = %e, "Database health check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        repositories::activity::MockActivityRepositoryTrait,
        summarizer::SummarizationService, translator::TranslationService,
    };
    use axum::{body::Body, http::Request, routing::get};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(repo: MockActivityRepositoryTrait) -> axum::Router {
        let state = AppState::new(
            Arc::new(repo),
            TranslationService::offline(),
            SummarizationService::extractive(),
        );
        axum::Router::new()
            .route("/healthz", get(health_check))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_health_ok() {
        let mut repo = MockActivityRepositoryTrait::new();
        repo.expect_ping().returning(|| Ok(()));

        let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_unavailable_when_store_down() {
        let mut repo = MockActivityRepositoryTrait::new();
        repo.expect_ping()
            .returning(|| Err(anyhow::anyhow!("unable to open database file")));

        let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
