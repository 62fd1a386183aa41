mod helpers;

use axum::{Router, http::StatusCode};
use serde_json::json;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use helpers::{get, json_body, post_json, test_app};

async fn send(app: &Router, request: axum::http::Request<axum::body::Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn mock_google(server: &MockServer, source: &str, translated: &str) {
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("client", "gtx"))
        .and(query_param("sl", source))
        .and(query_param("tl", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            [[translated, "ignored source", null, null, 10]],
            null,
            source
        ])))
        .mount(server)
        .await;
}

fn google_endpoint(server: &MockServer) -> Option<String> {
    Some(format!("{}/translate_a/single", server.uri()))
}

#[tokio::test]
async fn test_root_and_health() {
    let app = test_app(None).await;

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"message": "Gujarati Translator API", "status": "active"})
    );

    let response = send(&app, get("/healthz")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["database"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let app = test_app(None).await;
    let response = send(&app, get("/")).await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_translate_online_and_stats() {
    let google = MockServer::start().await;
    mock_google(&google, "gu", "heavy rain in surat").await;
    let app = test_app(google_endpoint(&google)).await;

    let response = send(
        &app,
        post_json("/translate", json!({"text": "સુરતમાં ભારે વરસાદ"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["translated_text"], "Heavy rain in surat");
    assert_eq!(body["method"], "online");
    assert_eq!(body["source_lang"], "gu");
    assert_eq!(body["target_lang"], "en");

    let stats = json_body(send(&app, get("/stats")).await).await;
    assert_eq!(stats["total_translations"], 1);
    assert_eq!(stats["total_articles_processed"], 1);
    assert_eq!(stats["total_summaries"], 0);
}

#[tokio::test]
async fn test_translate_falls_back_when_api_fails() {
    let google = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&google)
        .await;
    let app = test_app(google_endpoint(&google)).await;

    let response = send(&app, post_json("/translate", json!({"text": "ગુજરાત સરકાર"}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["translated_text"], "[Transliterated] Gujarat government");
    assert_eq!(body["method"], "transliterated");
}

#[tokio::test]
async fn test_empty_input_is_rejected() {
    let app = test_app(None).await;

    for (uri, body) in [
        ("/translate", json!({"text": ""})),
        ("/translate", json!({"text": "  \t\n "})),
        ("/summarize", json!({"text": "   "})),
        ("/process", json!({"content": " "})),
    ] {
        let response = send(&app, post_json(uri, body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json_body(response).await["code"], "bad_request");
    }

    let stats = json_body(send(&app, get("/stats")).await).await;
    assert_eq!(stats["total_translations"], 0);
}

#[tokio::test]
async fn test_unsupported_language_is_rejected() {
    let app = test_app(None).await;
    let response = send(
        &app,
        post_json("/translate", json!({"text": "hola", "source_lang": "es"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summarize_extractive() {
    let app = test_app(None).await;
    let text = "The city council met on Monday evening. \
                Filler sentence number one here. \
                Filler sentence number two here. \
                Filler sentence number three here. \
                The important news today is the budget. \
                Residents were told to expect updates.";

    let response = send(&app, post_json("/summarize", json!({"text": text}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["method"], "extractive");
    let summary = body["summary"].as_str().unwrap();
    assert!(summary.starts_with("The city council met on Monday evening."));
    assert!(body["compression_ratio"].as_f64().unwrap() < 1.0);

    let stats = json_body(send(&app, get("/stats")).await).await;
    assert_eq!(stats["total_summaries"], 1);
    assert_eq!(stats["average_summary_length"], summary.chars().count() as f64);
}

#[tokio::test]
async fn test_process_url_extracts_translates_and_summarizes() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather/monsoon"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(
                    include_str!("../src/extractor/tests/fixtures/article.html"),
                    "text/html; charset=utf-8",
                ),
        )
        .mount(&site)
        .await;

    let google = MockServer::start().await;
    // The article is in English, so the detected source language is sent.
    mock_google(&google, "en", "the monsoon reached the gujarat coast early").await;
    let app = test_app(google_endpoint(&google)).await;

    let article_url = format!("{}/weather/monsoon", site.uri());
    let response = send(
        &app,
        post_json(
            "/process",
            json!({"content": article_url, "inputType": "url", "summarize": true}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["url_extracted"], true);
    assert_eq!(body["title"], "Monsoon Arrives Early in Gujarat | Coastal Times");
    assert_eq!(body["source_url"], article_url);
    assert!(
        body["original_text"]
            .as_str()
            .unwrap()
            .contains("southwest monsoon reached the Gujarat coast")
    );
    assert_eq!(body["translated_text"], "The monsoon reached the gujarat coast early");
    assert_eq!(body["summary"], "The monsoon reached the gujarat coast early");
    assert!(body["timestamp"].is_string());

    let stats = json_body(send(&app, get("/stats")).await).await;
    assert_eq!(stats["total_translations"], 1);
    assert_eq!(stats["total_summaries"], 1);
    assert_eq!(stats["most_common_sources"], json!([article_url]));

    let activity = json_body(send(&app, get("/activity?limit=10")).await).await;
    let entries = activity.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["type"], "summary");
    assert_eq!(entries[1]["type"], "translation");
    assert!(entries[1]["original_text"].as_str().unwrap().ends_with("..."));
}

#[tokio::test]
async fn test_process_unreachable_url_reports_failure() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;
    let app = test_app(None).await;

    let response = send(
        &app,
        post_json(
            "/process",
            json!({"content": format!("{}/gone", site.uri()), "inputType": "url"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(
        body["original_text"]
            .as_str()
            .unwrap()
            .starts_with("Extraction failed: http error 404")
    );
    assert!(body.get("translated_text").is_none());

    let stats = json_body(send(&app, get("/stats")).await).await;
    assert_eq!(stats["total_translations"], 0);
}

#[tokio::test]
async fn test_analyze_and_languages() {
    let app = test_app(None).await;

    let response = send(
        &app,
        post_json("/analyze", json!({"text": "ગુજરાતમાં આજે વરસાદ. બીજું વાક્ય."})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["word_count"], 5);
    assert_eq!(body["sentence_count"], 2);
    assert_eq!(body["contains_gujarati"], true);
    assert_eq!(body["is_primarily_gujarati"], true);
    assert_eq!(body["detected_language"], "gu");

    let languages = json_body(send(&app, get("/languages")).await).await;
    assert_eq!(languages["source_languages"], json!(["gu", "hi", "auto"]));
    assert_eq!(languages["target_languages"], json!(["en"]));
    assert_eq!(languages["translation_backend"], "transliteration");
    assert_eq!(languages["summarization_backend"], "extractive");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app(None).await;
    let response = send(&app, get("/openapi.json")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = json_body(response).await;
    assert!(doc["paths"]["/process"]["post"].is_object());
}

#[tokio::test]
async fn test_batch_translate_and_summarize_are_logged() {
    let google = MockServer::start().await;
    mock_google(&google, "gu", "rain in surat").await;
    let app = test_app(google_endpoint(&google)).await;

    let response = send(
        &app,
        post_json("/translate/batch", json!({"texts": ["સુરતમાં વરસાદ", ""]})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["results"][0]["translated_text"], "Rain in surat");
    assert_eq!(body["results"][0]["method"], "online");
    assert_eq!(body["results"][1]["method"], "skipped");

    let response = send(
        &app,
        post_json(
            "/summarize/batch",
            json!({"texts": ["The bridge reopened after repairs.", "Markets closed higher on Friday."]}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["results"].as_array().unwrap().len(), 2);

    let stats = json_body(send(&app, get("/stats")).await).await;
    assert_eq!(stats["total_translations"], 1);
    assert_eq!(stats["total_summaries"], 2);
}

#[tokio::test]
async fn test_extract_many_urls() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather/monsoon"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            include_str!("../src/extractor/tests/fixtures/article.html"),
            "text/html; charset=utf-8",
        ))
        .mount(&site)
        .await;
    let app = test_app(None).await;

    let urls = [format!("{}/weather/monsoon", site.uri()), format!("{}/missing", site.uri())];
    let response = send(&app, post_json("/extract", json!({ "urls": urls }))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["succeeded"], 1);
    assert_eq!(body["results"][0]["title"], "Monsoon Arrives Early in Gujarat | Coastal Times");
    assert_eq!(body["results"][1]["success"], false);
}

#[tokio::test]
async fn test_key_points_and_sources() {
    let app = test_app(None).await;

    let text = "Rain today. Heavy rain flooded several low lying roads in Surat city. \
                The municipal corporation opened three relief camps overnight";
    let response = send(&app, post_json("/key-points", json!({"text": text}))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["num_points"], 2);
    assert_eq!(
        body["key_points"][0],
        "Heavy rain flooded several low lying roads in Surat city"
    );

    let response = send(&app, post_json("/key-points", json!({"text": text, "num_points": 0}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let sources = json_body(send(&app, get("/sources")).await).await;
    assert_eq!(sources["supported_languages"], json!(["gujarati", "hindi", "english"]));
    assert_eq!(sources["extraction_capabilities"]["title"], true);
}
