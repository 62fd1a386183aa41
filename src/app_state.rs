use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::{
    config::Config,
    extractor::ArticleExtractor,
    repositories::{ActivityRepository, ActivityRepositoryTrait},
    summarizer::{InferenceApi, SummarizationService, SummaryModel},
    translator::{GoogleTranslate, TranslationBackend, TranslationService},
};

#[derive(Clone)]
pub struct AppState {
    pub activity: Arc<dyn ActivityRepositoryTrait>,
    pub translator: TranslationService,
    pub summarizer: SummarizationService,
    pub extractor: ArticleExtractor,
}

impl AppState {
    pub fn new(
        activity: Arc<dyn ActivityRepositoryTrait>,
        translator: TranslationService,
        summarizer: SummarizationService,
    ) -> Self {
        Self {
            activity,
            translator,
            summarizer,
            extractor: ArticleExtractor::new(),
        }
    }

    /// Wire the services described by `config` on top of an open pool.
    pub fn from_config(config: &Config, pool: SqlitePool) -> Result<Self> {
        let online: Option<Arc<dyn TranslationBackend>> = if config.translate_online() {
            let google = GoogleTranslate::new(config.translate_api_url(), config.http_timeout())
                .context("Failed to build translation client")?;
            Some(Arc::new(google))
        } else {
            None
        };

        let model: Option<Arc<dyn SummaryModel>> = match config.summarizer_api_url() {
            Some(url) => {
                let api = InferenceApi::new(
                    url,
                    config.summarizer_api_token().map(str::to_string),
                    config.http_timeout(),
                )
                .context("Failed to build summarization client")?;
                Some(Arc::new(api))
            }
            None => None,
        };

        Ok(Self::new(
            Arc::new(ActivityRepository::new(pool)),
            TranslationService::new(online, config.translate_fallback()),
            SummarizationService::new(model),
        ))
    }
}
