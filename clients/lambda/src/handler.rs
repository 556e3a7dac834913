//! Lambda entry points for the two invocation shapes.
//!
//! Both functions hand the payload to the shared [`EchoHandler`] and always
//! return `Ok`: rejections and encoding failures are already turned into
//! well-formed results by the handler.

use lambda_runtime::{Error, LambdaEvent};
use tracing::{debug, info_span};

use echo_core::{EchoHandler, NonProxyOutcome, NonProxyRequest, ProxyRequest, ProxyResponse};

/// Handle an API Gateway proxy event.
pub async fn handle_proxy(handler: &EchoHandler, event: LambdaEvent<ProxyRequest>) -> Result<ProxyResponse, Error> {
    let span = info_span!("proxy", request_id = %event.context.request_id);
    let _guard = span.enter();

    debug!("Received proxy event for {} {}", event.payload.http_method, event.payload.path);
    let response = handler.handle(event.payload);
    debug!("Returning status {}", response.status_code);

    Ok(response)
}

/// Handle a non-proxy event.
pub async fn handle_non_proxy(handler: &EchoHandler, event: LambdaEvent<NonProxyRequest>) -> Result<NonProxyOutcome, Error> {
    let span = info_span!("non_proxy", request_id = %event.context.request_id);
    let _guard = span.enter();

    debug!("Received non-proxy event for {} {}", event.payload.http_method, event.payload.path);
    let outcome = handler.handle(event.payload);
    debug!("Echoed: {}", outcome.is_echoed());

    Ok(outcome)
}
