use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "dewana-checkin.log";

/// Console logging, plus daily JSON files when `log_dir` is set.
/// Keep the returned guard alive for the life of the process.
pub fn init(log_dir: Option<&str>) -> Option<WorkerGuard> {
    let stdout_layer = tracing_subscriber::fmt::layer().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );

    let Some(dir) = log_dir.map(str::trim).filter(|dir| !dir.is_empty()) else {
        tracing_subscriber::registry().with(stdout_layer).init();
        return None;
    };

    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();
    tracing::info!("writing JSON logs to {}", dir);
    Some(guard)
}
