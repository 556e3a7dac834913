//! Runtime configuration for the Lambda function.
//!
//! Lambda passes no arguments to `bootstrap`, so every option is read from
//! the function's environment variables.

use clap::{Parser, ValueEnum};
use echo_core::{InvocationMode, StructuredLogger};

/// Configuration for the Echo API Lambda function.
#[derive(Parser, Debug, Clone)]
#[command(name = "bootstrap", version, about = "Echo API Lambda function")]
pub struct Config {
    /// Event shape the function accepts (proxy or non-proxy)
    #[arg(long, env = "ECHO_INVOCATION", default_value = "proxy")]
    pub invocation: InvocationMode,

    /// Where echo log records are written
    #[arg(long, env = "ECHO_LOG_SINK", value_enum, default_value_t = LogSink::Stdout)]
    pub log_sink: LogSink,

    /// Filter for runtime diagnostics, in `RUST_LOG` syntax
    #[arg(long, env = "ECHO_TRACING_FILTER", default_value = "info")]
    pub tracing_filter: String,
}

/// Output stream for echo log records.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
    Stderr,
}

impl LogSink {
    pub fn logger(self) -> StructuredLogger {
        match self {
            LogSink::Stdout => StructuredLogger::stdout(),
            LogSink::Stderr => StructuredLogger::stderr(),
        }
    }
}
