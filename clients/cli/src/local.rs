use anyhow::{Context, Result};
use echo_core::{EchoHandler, InvocationMode, NonProxyRequest, ProxyRequest};
use serde_json::Value;
use tracing::debug;

/// Run an event through the handler in-process and return the result as JSON.
pub fn handle_local(handler: &EchoHandler, mode: InvocationMode, event: Value) -> Result<Value> {
    debug!("Invoking {} handler locally", mode);

    let result = match mode {
        InvocationMode::Proxy => {
            let request: ProxyRequest = serde_json::from_value(event)
                .context("Event is not a valid proxy event")?;
            serde_json::to_value(handler.handle(request))?
        }
        InvocationMode::NonProxy => {
            let request: NonProxyRequest = serde_json::from_value(event)
                .context("Event is not a valid non-proxy event")?;
            serde_json::to_value(handler.handle(request))?
        }
    };

    Ok(result)
}

/// Render a result for stdout.
pub fn render(result: &Value, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(rendered)
}
