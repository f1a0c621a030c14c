//! Server initialization and startup logic for relay-worker.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use relay_api::{AppState, RelayServer, ServerConfig};
use relay_config::{Config, ConfigLoader, ConfigValidator, ValidationResult};

/// Initialize tracing with console output and, when `log_dir` is given,
/// a daily-rotated file.
pub(crate) fn init_tracing(log_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("relay-worker")
                .filename_suffix("log")
                .max_log_files(14)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes buffered lines on drop, so it lives as long as the process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
        }
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .init();

    Ok(())
}

/// The explicit path with `~` expanded, else `<config dir>/relay-worker/config.toml`
/// when it exists.
pub(crate) fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    let explicit =
        explicit.map(|path| PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy())));
    explicit.or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("relay-worker").join("config.toml"))
            .filter(|path| path.is_file())
    })
}

/// Load, overlay the environment, and validate.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(p) => info!("Loading configuration from {}", p.display()),
        None => info!("No configuration file, using defaults and environment"),
    }
    let config = ConfigLoader::load_with_env(path)?;

    let result = ConfigValidator::validate(&config)?;
    report(&result);
    if !result.is_valid() {
        return Err(format!("configuration has {} error(s)", result.errors.len()).into());
    }
    Ok(config)
}

fn report(result: &ValidationResult) {
    for warning in &result.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    for err in &result.errors {
        error!("{}: {}", err.path, err.message);
    }
}

/// Run the server in foreground until shutdown.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting relay-worker v{}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(AppState::from_config(&config)?);
    let server = RelayServer::new(
        ServerConfig::new(config.server.host.clone(), config.server.port),
        state,
    );

    info!("Endpoints:");
    info!("  POST /solve-pdf      - PDF question answering");
    info!("  POST /screenshot     - Web page screenshot");
    info!("  POST /generate-image - Image generation");
    info!("  POST /voiceover      - Text-to-speech");
    info!("  GET  /health         - Health check");
    if config.lifecycle.max_requests > 0 {
        info!(
            "Recycling after {} requests",
            config.lifecycle.max_requests
        );
    }

    server.run().await?;

    info!("Shutting down...");
    Ok(())
}
