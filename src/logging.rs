//! Logging setup.
//!
//! Library code only emits `tracing` events. The binary owns the subscriber
//! and installs it once at startup through [`init`].

use std::error::Error;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Level used when neither an explicit level nor `RUST_LOG` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Build the event filter.
///
/// An explicit level (flag or config file) wins; otherwise `RUST_LOG`, then
/// [`DEFAULT_LOG_LEVEL`].
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    }
}

/// Install the global subscriber, writing to stderr so command output on
/// stdout stays machine-readable.
pub fn init(level: Option<&str>, format: LogFormat) -> Result<(), Box<dyn Error>> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Text => subscriber.try_init(),
    };

    installed.map_err(|e| format!("Failed to initialize logging: {}", e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    // Serializes tests that touch RUST_LOG
    fn test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn test_explicit_level_beats_rust_log() {
        let _lock = test_lock().lock();
        unsafe {
            std::env::set_var("RUST_LOG", "warn");
        }
        let filter = build_filter(Some("debug"));
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_rust_log_used_without_explicit_level() {
        let _lock = test_lock().lock();
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
        let filter = build_filter(None);
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn test_default_level_without_rust_log() {
        let _lock = test_lock().lock();
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        assert_eq!(build_filter(None).to_string(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_log_format_deserialization() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_default_is_text() {
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }
}
