//! comanda-server — multi-tenant food-order lifecycle tracker
//!
//! Long-running service that:
//! - Persists orders and their phase timelines per tenant (embedded redb)
//! - Validates and applies lifecycle transitions (staff dashboard actions)
//! - Derives per-order timing metrics and tenant dashboard summaries
//! - Simulates customer email notifications on order events

use comanda_server::{AppState, Config, api, services::notifications};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_tracing(config.log_dir.as_deref());

    tracing::info!("Starting comanda-server");

    let state = AppState::new(config.clone())?;

    // Background email notifications
    let _notifier = notifications::spawn(state.manager.subscribe());

    let app = api::build_app(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("comanda-server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing with env-filter; add a daily-rolled file when a log
/// directory is configured.
fn init_tracing(log_dir: Option<&str>) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "comanda_server=info,tower_http=info".into());
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(dir) = log_dir {
        let file_appender = tracing_appender::rolling::daily(dir, "comanda-server");
        subscriber.with_writer(file_appender).with_ansi(false).init();
        return;
    }

    subscriber.init();
}
