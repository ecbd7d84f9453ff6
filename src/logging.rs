use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "site.log";
const DEFAULT_FILTER: &str = "meatra_site=info,tower_http=warn";

/// Console output plus a daily-rotated JSON file under `logs/`.
/// `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let _ = std::fs::create_dir_all(LOG_DIR);
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(LOG_DIR, LOG_FILE));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    std::mem::forget(guard);
}
