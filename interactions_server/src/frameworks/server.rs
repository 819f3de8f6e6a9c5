// Framework bootstrap for the interactions server runtime.

use crate::frameworks::config::{self, Settings};
use crate::interface_adapters::clients::PlayerApiClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::{DispatchUseCase, PlayerStatusUseCase};
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

// Our own spans at info; dependencies only when they warn.
const DEFAULT_LOG_FILTER: &str = "interactions_server=info,warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    // `LOG_FORMAT=json` (any case) selects JSON lines; anything else is compact.
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let format = LogFormat::from_env_value(std::env::var("LOG_FORMAT").ok().as_deref());
    init_tracing(format);
    install_panic_hook();
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // JSON output keeps the interaction span so `kind` and `command` land on every line.
    match format {
        LogFormat::Json => subscriber.json().with_current_span(true).init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, %backtrace, "interactions server panicked");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, settings: Settings) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&settings)?;

    // Start the web server with the interaction routes wired up.
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let settings = config::load().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::io::Error::other(e.to_string())
    })?;

    // The platform calls in from outside, so listen on all interfaces.
    let address = SocketAddr::from(([0, 0, 0, 0], settings.port));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, settings).await
}

fn build_state(settings: &Settings) -> Result<Arc<AppState>> {
    let player_api = PlayerApiClient::new(
        settings.player_api_url.clone(),
        settings.player_api_timeout,
    )
    .map_err(|e| std::io::Error::other(format!("failed to initialize player api client: {e}")))?;
    tracing::debug!(
        player_api_url = %settings.player_api_url,
        player_api_timeout_ms = settings.player_api_timeout.as_millis(),
        online_threshold_secs = settings.status.online_threshold.num_seconds(),
        recent_threshold_secs = settings.status.recent_threshold.num_seconds(),
        recent_enabled = settings.status.recent_enabled,
        "player api client configured"
    );

    let status = PlayerStatusUseCase {
        clock: Arc::new(SystemClock),
        players: Arc::new(player_api),
        settings: Arc::new(settings.status.clone()),
    };

    Ok(Arc::new(AppState {
        verifier: settings.verifier.clone(),
        dispatch: DispatchUseCase { status },
    }))
}
