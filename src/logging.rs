// src/logging.rs

use crate::constants::LOG_BASENAME;
use crate::models::ApiCallLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use log::info;
use std::path::Path;

/// Starts file logging under `log_dir`. `RUST_LOG` takes precedence over
/// the configured level.
pub fn init_logging(log_dir: &Path, level: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_BASENAME)
                .suppress_timestamp(),
        )
        .append()
        .format(flexi_logger::detailed_format)
        .start()?;
    Ok(handle)
}

/// Logs one completed HTTP exchange.
pub fn log_api_call(log: &ApiCallLog) {
    info!(
        target: "chatbox::api",
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );
}
