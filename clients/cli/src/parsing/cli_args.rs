use std::path::PathBuf;

use anyhow::{format_err, Result};
use clap::Parser;
use echo_core::InvocationMode;
use serde_json::{Map, Value};

/// Command line arguments for the local echo invoker
#[derive(Parser, Debug)]
#[command(author, version, about = "Run the Echo API handler locally against an event")]
pub struct Cli {
    /// Event shape to feed the handler (proxy or non-proxy)
    #[arg(long, default_value = "proxy")]
    pub mode: InvocationMode,

    /// Read the event JSON from this file ("-" for stdin)
    #[arg(long, conflicts_with = "method")]
    pub event: Option<PathBuf>,

    /// Build the event from flags using this HTTP method
    #[arg(long)]
    pub method: Option<String>,

    /// Request path for a flag-built event
    #[arg(long, default_value = "/")]
    pub path: String,

    /// Request header as NAME=VALUE (repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// Query parameter as NAME=VALUE (repeatable)
    #[arg(long = "query", short = 'q')]
    pub query: Vec<String>,

    /// Request body for a flag-built event
    #[arg(long)]
    pub body: Option<String>,

    /// Stage recorded in a flag-built proxy event
    #[arg(long, default_value = "local")]
    pub stage: String,

    /// Pretty-print the result
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Discard echo log records instead of writing them to stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Enable verbose debug output
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

/// Parse `NAME=VALUE` pairs into a JSON object. Later pairs win.
pub fn parse_pairs_to_map(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut map = Map::new();

    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format_err!("Expected NAME=VALUE, got '{}'", pair))?;

        if key.is_empty() {
            return Err(format_err!("Missing name in '{}'", pair));
        }

        map.insert(key.to_string(), Value::String(value.to_string()));
    }

    Ok(map)
}
