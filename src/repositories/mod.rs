pub mod activity;

pub use activity::{ActivityRepository, ActivityRepositoryTrait};

use anyhow::Result;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use tracing::info;

const MAX_CONNECTIONS: u32 = 5;

/// Open the SQLite pool and apply embedded migrations.
///
/// In-memory databases are per connection, so they get a single-connection pool.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let in_memory = database_url.contains(":memory:");
    let max_connections = if in_memory { 1 } else { MAX_CONNECTIONS };

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
    if in_memory {
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }
    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!(max_connections, "database ready");
    Ok(pool)
}
