// src/logging.rs

use crate::config::get_config;
use crate::errors::{NewsflowError, NewsflowResult};
use chrono::{DateTime, Utc};
use flexi_logger::{FileSpec, Logger, WriteMode};

/// Details of one backend call, recorded after the response (or failure)
/// arrives.
#[derive(Debug, Clone)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

/// Starts the file logger. The terminal is owned by the TUI, so nothing may
/// write to stdout/stderr after this point.
pub fn init_logging() -> NewsflowResult<()> {
    let config = get_config();
    Logger::try_with_str(&config.log_level)
        .map_err(|e| NewsflowError::config_error(format!("Invalid log level: {}", e)))?
        .log_to_file(FileSpec::default().basename("newsflow").suppress_timestamp())
        .write_mode(WriteMode::BufferAndFlush)
        .start()
        .map_err(|e| NewsflowError::config_error(format!("Failed to start logger: {}", e)))?;
    Ok(())
}

/// Logs one API call at info level.
pub fn log_api_call(log: &ApiCallLog) {
    log::info!(
        "[{}] {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.response_status,
        log.response_time_ms
    );
}
