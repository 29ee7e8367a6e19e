use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
///
/// Logs go to a rolling file; stdout belongs to the REPL unless
/// `log_to_stdout` is set.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let file_appender = match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // sqlx logs every statement at info; keep it quiet unless asked
    let filter_str = format!("{},sqlx=warn", config.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Exactly one of the two file layers is present
    let json_file = config.use_json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking.clone())
            .with_ansi(false)
    });
    let text_file = (!config.use_json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(non_blocking.clone())
            .with_ansi(false)
    });
    let stdout = config
        .log_to_stdout
        .then(|| fmt::layer().with_target(false).with_ansi(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_file)
        .with(text_file)
        .with(stdout)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in this crate that installs the global subscriber
    #[test]
    fn test_init_logging_writes_json_file() {
        let dir = std::env::temp_dir().join(format!("user_ledger_logs_{}", std::process::id()));
        let config = AppConfig {
            log_dir: dir.display().to_string(),
            log_file: "test.log".to_string(),
            rotation: "never".to_string(),
            use_json: true,
            ..AppConfig::default()
        };

        let guard = init_logging(&config);
        tracing::info!(target: "user_ledger", "logging ready");
        drop(guard);

        assert!(dir.join("test.log").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
