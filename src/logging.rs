//! Structured logging configuration
//!
//! Logging is off unless `PROMPTVAULT_LOG_LEVEL` is set. Output goes to
//! stderr so it never mixes with prompt text piped from stdout.

use anyhow::Result;
use std::env;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::storage::Persistence;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
    pub colored: bool,
    /// Include file and line of each event
    pub with_location: bool,
    /// Emit span open/close events
    pub with_spans: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
            format: LogFormat::Pretty,
            colored: is_terminal::IsTerminal::is_terminal(&std::io::stderr()),
            with_location: false,
            with_spans: false,
        }
    }
}

impl LogConfig {
    /// Read `PROMPTVAULT_LOG_*` variables.
    pub fn from_env() -> Self {
        let level = env::var("PROMPTVAULT_LOG_LEVEL")
            .or_else(|_| env::var("LOG_LEVEL"))
            .unwrap_or_else(|_| "error".to_string());

        let format = match env::var("PROMPTVAULT_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let colored = env::var("PROMPTVAULT_LOG_COLOR")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or_else(|_| is_terminal::IsTerminal::is_terminal(&std::io::stderr()));

        let with_location = env::var("PROMPTVAULT_LOG_LOCATION")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let with_spans = env::var("PROMPTVAULT_LOG_SPANS")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            level,
            format,
            colored,
            with_location,
            with_spans,
        }
    }
}

/// Initialize the global tracing subscriber
pub fn init_logging(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("error"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    let span_events = if config.with_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.colored)
        .with_span_events(span_events)
        .with_file(config.with_location)
        .with_line_number(config.with_location);

    match config.format {
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize JSON logging: {}", e))?,
        LogFormat::Pretty => subscriber
            .pretty()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize pretty logging: {}", e))?,
        LogFormat::Compact => subscriber
            .compact()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize compact logging: {}", e))?,
    }

    info!(
        level = %config.level,
        format = ?config.format,
        colored = config.colored,
        "Logging initialized"
    );

    Ok(())
}

/// Log a command execution with timing and outcome
pub fn log_command_execution<T>(command_name: &str, duration_ms: u64, result: &Result<T>) {
    let span = tracing::info_span!(
        "command_execution",
        command = command_name,
        duration_ms = duration_ms
    );
    let _enter = span.enter();

    match result {
        Ok(_) => info!(
            command = command_name,
            duration_ms = duration_ms,
            "Command completed successfully"
        ),
        Err(e) => error!(
            command = command_name,
            duration_ms = duration_ms,
            error = %e,
            "Command failed"
        ),
    }
}

/// Log a store mutation and whether it reached storage
pub fn log_store_operation(store: &str, operation: &str, id: Option<&str>, status: &Persistence) {
    match status {
        Persistence::Saved => debug!(
            store = store,
            operation = operation,
            id = id,
            "Store operation persisted"
        ),
        Persistence::Failed(e) => warn!(
            store = store,
            operation = operation,
            id = id,
            error = %e,
            "Store operation kept in memory only"
        ),
    }
}
