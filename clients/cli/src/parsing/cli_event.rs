use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use echo_core::InvocationMode;
use serde_json::{json, Value};
use uuid::Uuid;

use super::cli_args::{parse_pairs_to_map, Cli};

/// Resolve the event to invoke: from a file, from flags, or from stdin.
pub fn load_event(cli: &Cli) -> Result<Value> {
    match (&cli.event, &cli.method) {
        (Some(path), _) => read_event(path),
        (None, Some(method)) => build_event(cli, method),
        (None, None) => read_event_from(io::stdin().lock()),
    }
}

fn read_event(path: &Path) -> Result<Value> {
    if path == Path::new("-") {
        return read_event_from(io::stdin().lock());
    }

    let file = File::open(path)
        .with_context(|| format!("Unable to open event file {}", path.display()))?;
    read_event_from(BufReader::new(file))
}

pub fn read_event_from<R: Read>(reader: R) -> Result<Value> {
    serde_json::from_reader(reader).context("Event is not valid JSON")
}

/// Assemble an event of the selected shape from command line flags.
pub fn build_event(cli: &Cli, method: &str) -> Result<Value> {
    let headers = parse_pairs_to_map(&cli.headers).context("Invalid --header")?;
    let query = parse_pairs_to_map(&cli.query).context("Invalid --query")?;

    let event = match cli.mode {
        InvocationMode::Proxy => json!({
            "httpMethod": method,
            "path": cli.path,
            "resource": cli.path,
            "headers": headers,
            "queryStringParameters": query,
            "body": cli.body,
            "isBase64Encoded": false,
            "requestContext": {
                "stage": cli.stage,
                "requestId": Uuid::new_v4().to_string(),
            },
        }),
        InvocationMode::NonProxy => json!({
            "httpMethod": method,
            "path": cli.path,
            "headers": headers,
            "queryStringParameters": query,
            "body": cli.body,
        }),
    };

    Ok(event)
}
