use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{app_state::AppState, health, news::handlers};

#[derive(OpenApi)]
#[openapi(
    info(title = "Gujarati News Translator API", version = "1.0.0"),
    paths(
        health::root,
        health::health_check,
        handlers::translate,
        handlers::summarize,
        handlers::process,
        handlers::translate_batch,
        handlers::summarize_batch,
        handlers::key_points,
        handlers::extract,
        handlers::sources,
        handlers::analyze,
        handlers::languages,
        handlers::stats,
        handlers::recent_activity,
    ),
    tags(
        (name = "news", description = "Translation, summarization and article processing"),
        (name = "activity", description = "Activity log and statistics"),
        (name = "health", description = "Liveness and readiness")
    )
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::root))
        .route("/healthz", get(health::health_check))
        .route("/translate", post(handlers::translate))
        .route("/summarize", post(handlers::summarize))
        .route("/process", post(handlers::process))
        .route("/translate/batch", post(handlers::translate_batch))
        .route("/summarize/batch", post(handlers::summarize_batch))
        .route("/key-points", post(handlers::key_points))
        .route("/extract", post(handlers::extract))
        .route("/sources", get(handlers::sources))
        .route("/analyze", post(handlers::analyze))
        .route("/languages", get(handlers::languages))
        .route("/stats", get(handlers::stats))
        .route("/activity", get(handlers::recent_activity))
        .route("/openapi.json", get(openapi))
        .with_state(state)
        // Layers run bottom to top: the request id is set before tracing sees the request.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
