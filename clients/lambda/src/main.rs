//! Echo API Lambda function
//!
//! Reads its configuration from the environment, builds one logger and one
//! handler for the lifetime of the execution environment, and serves either
//! API Gateway proxy events or non-proxy events.

use std::sync::Arc;

use clap::Parser;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::info;

use echo_core::{EchoHandler, InvocationMode, NonProxyRequest, ProxyRequest};

mod config;
mod handler;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::parse();

    // Initialize tracing for Lambda CloudWatch logs
    tracing_subscriber::fmt()
        .with_env_filter(config.tracing_filter.as_str())
        .with_ansi(false) // Lambda doesn't support ANSI colors
        .without_time() // Lambda adds timestamps
        .init();

    info!(
        "Echo Lambda initializing (mode: {}, core {})",
        config.invocation,
        echo_core::VERSION
    );

    let logger = Arc::new(config.log_sink.logger());
    let echo = Arc::new(EchoHandler::new(logger));

    match config.invocation {
        InvocationMode::Proxy => {
            lambda_runtime::run(service_fn(move |event: LambdaEvent<ProxyRequest>| {
                let echo = Arc::clone(&echo);
                async move { handler::handle_proxy(&echo, event).await }
            }))
            .await?;
        }
        InvocationMode::NonProxy => {
            lambda_runtime::run(service_fn(move |event: LambdaEvent<NonProxyRequest>| {
                let echo = Arc::clone(&echo);
                async move { handler::handle_non_proxy(&echo, event).await }
            }))
            .await?;
        }
    }

    Ok(())
}
