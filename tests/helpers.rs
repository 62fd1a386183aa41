use axum::{
    Router,
    body::{Body, to_bytes},
    http::Request,
    response::Response,
};
use std::{sync::Arc, time::Duration};

use samachar::{
    app_state::AppState,
    repositories::{self, ActivityRepository},
    router::build_router,
    summarizer::SummarizationService,
    translator::{GoogleTranslate, TranslationBackend, TranslationService},
};

/// Router over a fresh in-memory database. Translation goes to
/// `translate_endpoint` when given, otherwise straight to transliteration.
pub async fn test_app(translate_endpoint: Option<String>) -> Router {
    let pool = repositories::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    let online: Option<Arc<dyn TranslationBackend>> = translate_endpoint.map(|endpoint| {
        let google = GoogleTranslate::new(endpoint, Duration::from_secs(5))
            .expect("Failed to build translation client");
        Arc::new(google) as Arc<dyn TranslationBackend>
    });

    let state = AppState::new(
        Arc::new(ActivityRepository::new(pool)),
        TranslationService::new(online, true),
        SummarizationService::extractive(),
    );
    build_router(state)
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
