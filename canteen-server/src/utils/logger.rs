//! Tracing setup
//!
//! Console output during development, daily-rotated files in deployment.
//! The level string accepts full `EnvFilter` directives, so per-module
//! overrides like `info,canteen_server::sync=debug` work from config.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize tracing with console output at `info`
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize tracing, writing to `log_dir` when it names an existing
/// directory and to stdout otherwise
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_new(log_level.unwrap_or("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_dir.map(Path::new).filter(|p| p.exists()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "canteen-server.log");
            builder.with_writer(appender).with_ansi(false).init();
        }
        None => builder.init(),
    }
}
