use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::{
    app_state::AppState,
    entities::{ActivityStats, NewActivity, RecentActivity},
    error::{AppError, ErrorResponse},
    extractor::language::{GUJARATI_SCRIPT_THRESHOLD, detect_language},
    extractor::SupportedSources,
    news::dtos::{
        ActivityQuery, AnalyzeRequest, AnalyzeResponse, BatchSummarizeRequest,
        BatchSummarizeResponse, BatchTranslateRequest, BatchTranslateResponse, ExtractRequest,
        ExtractResponse, InputType, KeyPointsRequest, KeyPointsResponse, LanguagesResponse,
        ProcessRequest, ProcessResponse, SummarizeRequest, SummarizeResponse, TranslateRequest,
        TranslateResponse,
    },
    summarizer::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, SummaryMethod},
    text::{
        char_len, contains_gujarati, format_processing_time, is_gujarati_heavy, text_statistics,
    },
    translator::{DEFAULT_TARGET_LANG, SOURCE_LANGUAGES, TARGET_LANGUAGES, TranslationMethod},
};

const DEFAULT_ACTIVITY_LIMIT: i64 = 10;
const MAX_ACTIVITY_LIMIT: i64 = 100;

/// Store an activity row. The request has already succeeded, so a failed
/// insert is only logged.
async fn record_activity(state: &AppState, activity: NewActivity) {
    if let Err(e) = state.activity.record(activity).await {
        warn!(error = %e, "failed to record activity");
    }
}

fn produced_translation(method: TranslationMethod) -> bool {
    matches!(method, TranslationMethod::Online | TranslationMethod::Transliterated)
}

fn compression_ratio(summary: &str, original: &str) -> f64 {
    match char_len(original) {
        0 => 0.0,
        n => char_len(summary) as f64 / n as f64,
    }
}

#[utoipa::path(
    post,
    path = "/translate",
    tag = "news",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Text translated", body = TranslateResponse),
        (status = 400, description = "Empty text or unsupported language", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, AppError> {
    payload.validate().map_err(AppError::BadRequest)?;

    let started = Instant::now();
    let translation = state
        .translator
        .translate(&payload.text, &payload.source_lang, &payload.target_lang)
        .await;
    let processing_time = started.elapsed().as_secs_f64();

    if produced_translation(translation.method) {
        record_activity(
            &state,
            NewActivity::translation(
                payload.text.clone(),
                translation.text.clone(),
                translation.source_lang.clone(),
                translation.target_lang.clone(),
                processing_time,
                None,
            ),
        )
        .await;
    }

    Ok(Json(TranslateResponse {
        original_text: payload.text,
        translated_text: translation.text,
        source_lang: translation.source_lang,
        target_lang: translation.target_lang,
        method: translation.method,
        processing_time,
    }))
}

#[utoipa::path(
    post,
    path = "/summarize",
    tag = "news",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Text summarized", body = SummarizeResponse),
        (status = 400, description = "Empty text or invalid length", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn summarize(
    State(state): State<AppState>,
    Json(payload): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    payload.validate().map_err(AppError::BadRequest)?;

    let started = Instant::now();
    let summary = state
        .summarizer
        .summarize(&payload.text, payload.max_length, payload.min_length)
        .await;
    let processing_time = started.elapsed().as_secs_f64();
    let ratio = compression_ratio(&summary.text, &payload.text);

    if summary.method != SummaryMethod::Skipped {
        record_activity(
            &state,
            NewActivity::summary(payload.text.clone(), summary.text.clone(), ratio, processing_time, None),
        )
        .await;
    }

    Ok(Json(SummarizeResponse {
        original_text: payload.text,
        summary: summary.text,
        compression_ratio: ratio,
        method: summary.method,
    }))
}

#[utoipa::path(
    post,
    path = "/process",
    tag = "news",
    request_body = ProcessRequest,
    responses(
        (status = 200, description = "Content processed", body = ProcessResponse),
        (status = 400, description = "Empty content or unknown input type", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload), fields(input_type = %payload.input_type))]
pub async fn process(
    State(state): State<AppState>,
    Json(payload): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, AppError> {
    let input_type = payload.validate().map_err(AppError::BadRequest)?;
    let started = Instant::now();

    let mut response = ProcessResponse {
        original_text: payload.content.clone(),
        translated_text: None,
        summary: None,
        url_extracted: false,
        title: None,
        source_url: None,
        extraction_error: None,
        processing_time: 0.0,
        timestamp: Utc::now(),
    };

    if input_type == InputType::Url {
        info!("extracting article");
        let extraction = state.extractor.extract(&payload.content).await;
        response.original_text = extraction.text;
        response.url_extracted = true;
        response.title = extraction.title;
        response.source_url = Some(extraction.url);

        if !extraction.success {
            response.extraction_error = extraction.error;
            response.processing_time = started.elapsed().as_secs_f64();
            return Ok(Json(response));
        }
    }

    if payload.translate {
        let step = Instant::now();
        let translation = state
            .translator
            .translate(&response.original_text, "auto", DEFAULT_TARGET_LANG)
            .await;

        if produced_translation(translation.method) {
            record_activity(
                &state,
                NewActivity::translation(
                    response.original_text.clone(),
                    translation.text.clone(),
                    translation.source_lang,
                    translation.target_lang,
                    step.elapsed().as_secs_f64(),
                    response.source_url.clone(),
                ),
            )
            .await;
        }
        response.translated_text = Some(translation.text);
    }

    if payload.summarize {
        let step = Instant::now();
        let input = response
            .translated_text
            .as_deref()
            .unwrap_or(&response.original_text);
        let max_length = payload.max_length.unwrap_or(DEFAULT_MAX_LENGTH);
        let summary = state
            .summarizer
            .summarize(input, max_length, DEFAULT_MIN_LENGTH)
            .await;

        if summary.method != SummaryMethod::Skipped {
            record_activity(
                &state,
                NewActivity::summary(
                    input,
                    summary.text.clone(),
                    compression_ratio(&summary.text, input),
                    step.elapsed().as_secs_f64(),
                    response.source_url.clone(),
                ),
            )
            .await;
        }
        response.summary = Some(summary.text);
    }

    response.processing_time = started.elapsed().as_secs_f64();
    info!(
        elapsed = %format_processing_time(response.processing_time),
        translated = response.translated_text.is_some(),
        summarized = response.summary.is_some(),
        "content processed"
    );
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/translate/batch",
    tag = "news",
    request_body = BatchTranslateRequest,
    responses(
        (status = 200, description = "Texts translated in request order", body = BatchTranslateResponse),
        (status = 400, description = "Empty or oversized batch, or unsupported language", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload), fields(count = payload.texts.len()))]
pub async fn translate_batch(
    State(state): State<AppState>,
    Json(payload): Json<BatchTranslateRequest>,
) -> Result<Json<BatchTranslateResponse>, AppError> {
    payload.validate().map_err(AppError::BadRequest)?;

    let started = Instant::now();
    let translations = state
        .translator
        .translate_batch(&payload.texts, &payload.source_lang, &payload.target_lang)
        .await;
    // Per-item time is the batch average; items run back to back.
    let processing_time = started.elapsed().as_secs_f64() / payload.texts.len() as f64;

    let mut results = Vec::with_capacity(translations.len());
    for (original, translation) in payload.texts.into_iter().zip(translations) {
        if produced_translation(translation.method) {
            record_activity(
                &state,
                NewActivity::translation(
                    original.clone(),
                    translation.text.clone(),
                    translation.source_lang.clone(),
                    translation.target_lang.clone(),
                    processing_time,
                    None,
                ),
            )
            .await;
        }
        results.push(TranslateResponse {
            original_text: original,
            translated_text: translation.text,
            source_lang: translation.source_lang,
            target_lang: translation.target_lang,
            method: translation.method,
            processing_time,
        });
    }

    Ok(Json(BatchTranslateResponse { results }))
}

#[utoipa::path(
    post,
    path = "/summarize/batch",
    tag = "news",
    request_body = BatchSummarizeRequest,
    responses(
        (status = 200, description = "Texts summarized in request order", body = BatchSummarizeResponse),
        (status = 400, description = "Empty or oversized batch, or invalid length", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload), fields(count = payload.texts.len()))]
pub async fn summarize_batch(
    State(state): State<AppState>,
    Json(payload): Json<BatchSummarizeRequest>,
) -> Result<Json<BatchSummarizeResponse>, AppError> {
    payload.validate().map_err(AppError::BadRequest)?;

    let started = Instant::now();
    let summaries = state
        .summarizer
        .summarize_batch(&payload.texts, payload.max_length, payload.min_length)
        .await;
    let processing_time = started.elapsed().as_secs_f64() / payload.texts.len() as f64;

    let mut results = Vec::with_capacity(summaries.len());
    for (original, summary) in payload.texts.into_iter().zip(summaries) {
        let ratio = compression_ratio(&summary.text, &original);
        if summary.method != SummaryMethod::Skipped {
            record_activity(
                &state,
                NewActivity::summary(original.clone(), summary.text.clone(), ratio, processing_time, None),
            )
            .await;
        }
        results.push(SummarizeResponse {
            original_text: original,
            summary: summary.text,
            compression_ratio: ratio,
            method: summary.method,
        });
    }

    Ok(Json(BatchSummarizeResponse { results }))
}

#[utoipa::path(
    post,
    path = "/key-points",
    tag = "news",
    request_body = KeyPointsRequest,
    responses(
        (status = 200, description = "Most substantial sentences, best first", body = KeyPointsResponse),
        (status = 400, description = "Empty text or invalid point count", body = ErrorResponse)
    )
)]
pub async fn key_points(
    State(state): State<AppState>,
    Json(payload): Json<KeyPointsRequest>,
) -> Result<Json<KeyPointsResponse>, AppError> {
    payload.validate().map_err(AppError::BadRequest)?;

    let key_points = state.summarizer.key_points(&payload.text, payload.num_points);
    Ok(Json(KeyPointsResponse {
        num_points: key_points.len(),
        key_points,
        original_text: payload.text,
    }))
}

#[utoipa::path(
    post,
    path = "/extract",
    tag = "news",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "One extraction result per URL, in request order", body = ExtractResponse),
        (status = 400, description = "Empty or oversized URL list", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload), fields(count = payload.urls.len()))]
pub async fn extract(
    State(state): State<AppState>,
    Json(payload): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    payload.validate().map_err(AppError::BadRequest)?;

    let results = state.extractor.extract_many(&payload.urls).await;
    Ok(Json(ExtractResponse {
        succeeded: results.iter().filter(|r| r.success).count(),
        results,
    }))
}

#[utoipa::path(
    get,
    path = "/sources",
    tag = "news",
    responses((status = 200, description = "Known news sources and extracted fields", body = SupportedSources))
)]
pub async fn sources(State(state): State<AppState>) -> Json<SupportedSources> {
    Json(state.extractor.supported_sources())
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "news",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Text statistics", body = AnalyzeResponse),
        (status = 400, description = "Empty text", body = ErrorResponse)
    )
)]
pub async fn analyze(Json(payload): Json<AnalyzeRequest>) -> Result<Json<AnalyzeResponse>, AppError> {
    if payload.text.trim().is_empty() {
        return Err(AppError::bad_request("Text cannot be empty"));
    }

    Ok(Json(AnalyzeResponse {
        statistics: text_statistics(&payload.text),
        contains_gujarati: contains_gujarati(&payload.text),
        is_primarily_gujarati: is_gujarati_heavy(&payload.text, GUJARATI_SCRIPT_THRESHOLD),
        detected_language: detect_language(&payload.text),
    }))
}

#[utoipa::path(
    get,
    path = "/languages",
    tag = "news",
    responses((status = 200, description = "Supported languages and active backends", body = LanguagesResponse))
)]
pub async fn languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        source_languages: SOURCE_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        target_languages: TARGET_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        translation_backend: state.translator.backend_name().to_string(),
        transliteration_fallback: state.translator.fallback_enabled(),
        summarization_backend: state.summarizer.backend_name().to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "activity",
    responses(
        (status = 200, description = "Aggregate activity statistics", body = ActivityStats),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<ActivityStats>, AppError> {
    Ok(Json(state.activity.stats().await?))
}

#[utoipa::path(
    get,
    path = "/activity",
    tag = "activity",
    params(ActivityQuery),
    responses(
        (status = 200, description = "Most recent activity, newest first", body = [RecentActivity]),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn recent_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<RecentActivity>>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .clamp(1, MAX_ACTIVITY_LIMIT);
    Ok(Json(state.activity.recent(limit).await?))
}
