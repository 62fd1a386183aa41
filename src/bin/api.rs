use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use samachar::{
    app_state::AppState,
    config::{Config, LogFormat},
    repositories,
    router::build_router,
};

/// Ports tried after the configured one when it is already taken.
const EXTRA_PORT_ATTEMPTS: u16 = 9;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,samachar=debug,tower_http=info,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Bind the configured address, moving up through the next few ports if it is in use.
async fn bind_with_fallback(bind_addr: &str) -> Result<TcpListener> {
    let addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("BIND_ADDR must be host:port, got '{bind_addr}'"))?;

    let mut last_error = None;
    for offset in 0..=EXTRA_PORT_ATTEMPTS {
        let Some(port) = addr.port().checked_add(offset) else {
            break;
        };
        let candidate = SocketAddr::new(addr.ip(), port);
        match TcpListener::bind(candidate).await {
            Ok(listener) => return Ok(listener),
            Err(e) => {
                warn!(%candidate, error = %e, "address unavailable");
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(e) => anyhow::Error::new(e).context("Failed to bind to any port"),
        None => anyhow::anyhow!("Failed to bind to any port"),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format());

    info!("Starting Gujarati News Translator API");

    let pool = repositories::connect(config.database_url())
        .await
        .context("Failed to open database")?;
    let state = AppState::from_config(&config, pool)?;
    let app = build_router(state);

    let listener = bind_with_fallback(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .context("Server error")?;

    Ok(())
}
