// src/logging.rs

use crate::config::Config;
use crate::errors::MiloResult;
use chrono::{DateTime, Utc};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use log::info;

/// One remote call, as recorded in the log file.
#[derive(Debug, Clone)]
pub struct RequestLog {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

/// Starts the file logger. The terminal belongs to the UI, so nothing goes to stderr.
///
/// `RUST_LOG` takes precedence over `config.log_level`. Keep the returned handle
/// alive for the lifetime of the program.
pub fn init_logging(config: &Config) -> MiloResult<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(&config.log_dir)
                .basename("milo-chat"),
        )
        .format(flexi_logger::detailed_format)
        .start()?;

    info!(
        "milo-chat {} starting, backend {}",
        env!("CARGO_PKG_VERSION"),
        config.base_url
    );
    Ok(handle)
}

pub fn format_request(entry: &RequestLog) -> String {
    format!(
        "[{}] {} {} - Status: {} - Time: {}ms",
        entry.timestamp.to_rfc3339(),
        entry.request_id,
        entry.endpoint,
        entry.response_status,
        entry.response_time_ms
    )
}

/// Logs a completed remote call.
pub fn log_request(entry: &RequestLog) {
    info!("{}", format_request(entry));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_request() {
        let entry = RequestLog {
            request_id: "abc".to_string(),
            timestamp: DateTime::parse_from_rfc3339("2024-05-01T10:00:00+00:00")
                .unwrap()
                .with_timezone(&Utc),
            endpoint: "http://localhost/get_response".to_string(),
            response_status: 200,
            response_time_ms: 42,
        };

        assert_eq!(
            format_request(&entry),
            "[2024-05-01T10:00:00+00:00] abc http://localhost/get_response - Status: 200 - Time: 42ms"
        );
    }
}
