use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::infra::config::AppConfig;

/// JSON logs roll daily into the configured directory; the console layer
/// follows `RUST_LOG` and defaults to `info`.
pub fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("app_logs")
        .filename_suffix("jsonl")
        .build(&config.logger.log_path)
        .expect("valid log directory");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer().json().with_writer(writer);
    let console_layer = fmt::layer().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
