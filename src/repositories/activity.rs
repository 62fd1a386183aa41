use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::{
    entities::{ActivityKind, ActivityRecord, ActivityStats, NewActivity, RecentActivity},
    text::{preview, round_to},
};

/// Characters kept from each text in the recent-activity feed.
const PREVIEW_CHARS: usize = 100;
const TOP_SOURCES: i64 = 5;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepositoryTrait: Send + Sync {
    async fn record(&self, activity: NewActivity) -> Result<ActivityRecord>;
    async fn stats(&self) -> Result<ActivityStats>;
    async fn recent(&self, limit: i64) -> Result<Vec<RecentActivity>>;
    async fn ping(&self) -> Result<()>;
}

/// Append-only activity log backed by SQLite.
#[derive(Clone)]
pub struct ActivityRepository {
    pool: SqlitePool,
}

impl ActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn count(&self, kind: ActivityKind) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activity WHERE kind = ?")
            .bind(kind)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn average(&self, column: Averaged, kind: ActivityKind) -> Result<f64> {
        let sql = format!("SELECT AVG({}) FROM activity WHERE kind = ?", column.as_sql());
        let avg = sqlx::query_scalar::<_, Option<f64>>(&sql)
            .bind(kind)
            .fetch_one(&self.pool)
            .await?;
        Ok(avg.unwrap_or(0.0))
    }

    async fn top_sources(&self) -> Result<Vec<String>> {
        let sources = sqlx::query_scalar::<_, String>(
            r#"
            SELECT url_source
            FROM activity
            WHERE kind = 'translation'
              AND url_source IS NOT NULL
              AND url_source <> ''
            GROUP BY url_source
            ORDER BY COUNT(*) DESC, url_source ASC
            LIMIT ?
            "#,
        )
        .bind(TOP_SOURCES)
        .fetch_all(&self.pool)
        .await?;
        Ok(sources)
    }
}

#[derive(Clone, Copy)]
enum Averaged {
    ProcessingTime,
    OutputLength,
}

impl Averaged {
    fn as_sql(self) -> &'static str {
        match self {
            Averaged::ProcessingTime => "processing_time",
            Averaged::OutputLength => "output_length",
        }
    }
}

#[async_trait]
impl ActivityRepositoryTrait for ActivityRepository {
    async fn record(&self, activity: NewActivity) -> Result<ActivityRecord> {
        let record = activity.into_record();

        sqlx::query(
            r#"
            INSERT INTO activity
                (id, kind, original_text, output_text, source_lang, target_lang,
                 compression_ratio, processing_time, url_source, input_length,
                 output_length, checksum, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id)
        .bind(record.kind)
        .bind(&record.original_text)
        .bind(&record.output_text)
        .bind(&record.source_lang)
        .bind(&record.target_lang)
        .bind(record.compression_ratio)
        .bind(record.processing_time)
        .bind(&record.url_source)
        .bind(record.input_length)
        .bind(record.output_length)
        .bind(&record.checksum)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        debug!(id = %record.id, kind = ?record.kind, "activity recorded");
        Ok(record)
    }

    async fn stats(&self) -> Result<ActivityStats> {
        let total_translations = self.count(ActivityKind::Translation).await?;
        let total_summaries = self.count(ActivityKind::Summary).await?;
        let avg_summary_length = self
            .average(Averaged::OutputLength, ActivityKind::Summary)
            .await?;
        let avg_translation_time = self
            .average(Averaged::ProcessingTime, ActivityKind::Translation)
            .await?;
        let avg_summary_time = self
            .average(Averaged::ProcessingTime, ActivityKind::Summary)
            .await?;

        Ok(ActivityStats {
            total_articles_processed: total_translations,
            total_translations,
            total_summaries,
            average_summary_length: round_to(avg_summary_length, 2),
            average_processing_time: round_to((avg_translation_time + avg_summary_time) / 2.0, 3),
            most_common_sources: self.top_sources().await?,
        })
    }

    async fn recent(&self, limit: i64) -> Result<Vec<RecentActivity>> {
        let records = sqlx::query_as::<_, ActivityRecord>(
            r#"
            SELECT id, kind, original_text, output_text, source_lang, target_lang,
                   compression_ratio, processing_time, url_source, input_length,
                   output_length, checksum, created_at
            FROM activity
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(|r| RecentActivity {
                kind: r.kind,
                original_text: preview(&r.original_text, PREVIEW_CHARS),
                processed_text: preview(&r.output_text, PREVIEW_CHARS),
                processing_time: r.processing_time,
                timestamp: r.created_at,
                url_source: r.url_source,
            })
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
