use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::text::{char_len, text_checksum};

#[derive(sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Translation,
    Summary,
}

/// --- Tables ---

/// One completed translation or summary. Rows are only ever inserted.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRecord {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub original_text: String,
    pub output_text: String,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub compression_ratio: Option<f64>,
    pub processing_time: f64,
    pub url_source: Option<String>,
    pub input_length: i64,
    pub output_length: i64,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
}

/// --- Inserts ---

#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub kind: ActivityKind,
    pub original_text: String,
    pub output_text: String,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub compression_ratio: Option<f64>,
    pub processing_time: f64,
    pub url_source: Option<String>,
}

impl NewActivity {
    pub fn translation(
        original_text: impl Into<String>,
        translated_text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        processing_time: f64,
        url_source: Option<String>,
    ) -> Self {
        Self {
            kind: ActivityKind::Translation,
            original_text: original_text.into(),
            output_text: translated_text.into(),
            source_lang: Some(source_lang.into()),
            target_lang: Some(target_lang.into()),
            compression_ratio: None,
            processing_time,
            url_source,
        }
    }

    pub fn summary(
        original_text: impl Into<String>,
        summary: impl Into<String>,
        compression_ratio: f64,
        processing_time: f64,
        url_source: Option<String>,
    ) -> Self {
        Self {
            kind: ActivityKind::Summary,
            original_text: original_text.into(),
            output_text: summary.into(),
            source_lang: None,
            target_lang: None,
            compression_ratio: Some(compression_ratio),
            processing_time,
            url_source,
        }
    }

    /// Materialize the row, stamping id, lengths, checksum and time.
    pub fn into_record(self) -> ActivityRecord {
        ActivityRecord {
            id: Uuid::new_v4(),
            kind: self.kind,
            input_length: char_len(&self.original_text) as i64,
            output_length: char_len(&self.output_text) as i64,
            checksum: text_checksum(&self.original_text),
            original_text: self.original_text,
            output_text: self.output_text,
            source_lang: self.source_lang,
            target_lang: self.target_lang,
            compression_ratio: self.compression_ratio,
            processing_time: self.processing_time,
            url_source: self.url_source,
            created_at: Utc::now(),
        }
    }
}

/// --- Read models ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityStats {
    pub total_articles_processed: i64,
    pub total_translations: i64,
    pub total_summaries: i64,
    pub average_summary_length: f64,
    pub average_processing_time: f64,
    pub most_common_sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecentActivity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub original_text: String,
    pub processed_text: String,
    pub processing_time: f64,
    pub timestamp: DateTime<Utc>,
    pub url_source: Option<String>,
}
