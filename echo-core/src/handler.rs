//! The echo algorithm shared by every invocation shape.
//!
//! An invocation type supplies its method, path and logging metadata and can
//! be broken into [`RequestParts`]; its outcome type knows how to wrap either
//! a successful echo or an error. [`EchoHandler::handle`] runs the same steps
//! for all of them:
//!
//! 1. log receipt
//! 2. check the method against the allowlist
//! 3. build, encode and log the echo response
//! 4. on rejection or encoding failure, build, encode and log an error response
//!
//! Every path returns exactly one outcome; nothing is propagated to the host.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;

use crate::clock::{Clock, SystemClock};
use crate::error::{EchoError, Result};
use crate::logger::{payload, LogData, StructuredLogger};
use crate::method::is_method_allowed;
use crate::model::{EchoResponse, EchoedRequest, ErrorResponse, ECHO_MESSAGE};

/// Request fields extracted from an accepted invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParts {
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub query_params: BTreeMap<String, String>,
    pub body: String,
}

/// Input side of an invocation shape.
pub trait EchoInvocation {
    /// Result type handed back to the caller of this shape.
    type Outcome: EchoOutcome;

    /// Message of the receipt log record.
    const RECEIPT_MESSAGE: &'static str;

    /// Message of the log record written after a successful echo.
    const SUCCESS_MESSAGE: &'static str;

    fn method(&self) -> &str;

    fn path(&self) -> &str;

    /// Metadata logged when the invocation is received.
    fn receipt_data(&self) -> LogData;

    fn into_parts(self) -> RequestParts;
}

/// Output side of an invocation shape.
pub trait EchoOutcome: Sized {
    /// Wrap a successful echo. `body` is the encoded response.
    fn echoed(response: EchoResponse, body: String) -> Self;

    /// Wrap a failure. `body` is the encoded error response.
    fn failed(status_code: u16, error: ErrorResponse, body: String) -> Self;
}

/// Runs echo invocations, logging through an explicitly provided logger.
pub struct EchoHandler {
    logger: Arc<StructuredLogger>,
    clock: Arc<dyn Clock>,
}

impl EchoHandler {
    pub fn new(logger: Arc<StructuredLogger>) -> Self {
        Self {
            logger,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to stamp requests and responses.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Process one invocation.
    pub fn handle<I: EchoInvocation>(&self, invocation: I) -> I::Outcome {
        self.logger.info(I::RECEIPT_MESSAGE, Some(invocation.receipt_data()));

        if !is_method_allowed(invocation.method()) {
            self.logger.warn(
                "Method not allowed",
                Some(payload(json!({
                    "method": invocation.method(),
                    "path": invocation.path(),
                }))),
            );
            return self.fail(&EchoError::MethodNotAllowed(invocation.method().to_string()));
        }

        let parts = invocation.into_parts();
        let request = EchoedRequest::new_at(
            self.clock.as_ref(),
            parts.method,
            parts.path,
            parts.headers,
            parts.query_params,
            parts.body,
        );
        let response = EchoResponse::new_at(self.clock.as_ref(), request, ECHO_MESSAGE);
        let encoded = response.to_json();

        self.complete(I::SUCCESS_MESSAGE, response, encoded)
    }

    fn complete<O: EchoOutcome>(&self, success_message: &str, response: EchoResponse, encoded: Result<String>) -> O {
        match encoded {
            Ok(body) => {
                self.logger.info(
                    success_message,
                    Some(payload(json!({
                        "response_size": body.len(),
                        "method": response.request.method,
                        "path": response.request.path,
                        "response_body": body,
                    }))),
                );
                O::echoed(response, body)
            }
            Err(e) => {
                self.logger.error(
                    "Failed to marshal response",
                    Some(payload(json!({ "error": e.to_string() }))),
                );
                self.fail(&e)
            }
        }
    }

    fn fail<O: EchoOutcome>(&self, err: &EchoError) -> O {
        let error = ErrorResponse::from_error(self.clock.as_ref(), err);
        let body = error.to_json_or_fallback();

        self.logger.error(
            "Error response generated",
            Some(payload(json!({
                "status_code": err.status_code(),
                "error": error.error,
                "message": error.message,
                "response_body": body,
            }))),
        );

        O::failed(err.status_code(), error, body)
    }
}

impl std::fmt::Debug for EchoHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EchoHandler").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::logger::{LogLevel, MemorySink};
    use crate::non_proxy::{NonProxyOutcome, NonProxyRequest};
    use crate::proxy::{response_headers, ProxyRequest, ProxyResponse};
    use chrono::{TimeZone, Utc};

    /// Minimal invocation shape used to exercise the core in isolation.
    struct Stub {
        method: &'static str,
    }

    #[derive(Debug)]
    enum StubOutcome {
        Echoed(EchoResponse, String),
        Failed(u16, ErrorResponse, String),
    }

    impl EchoInvocation for Stub {
        type Outcome = StubOutcome;
        const RECEIPT_MESSAGE: &'static str = "Processing stub";
        const SUCCESS_MESSAGE: &'static str = "Stub echoed";

        fn method(&self) -> &str {
            self.method
        }

        fn path(&self) -> &str {
            "/stub"
        }

        fn receipt_data(&self) -> LogData {
            payload(json!({ "method": self.method, "path": "/stub" }))
        }

        fn into_parts(self) -> RequestParts {
            RequestParts {
                method: self.method.to_string(),
                path: "/stub".to_string(),
                ..RequestParts::default()
            }
        }
    }

    impl EchoOutcome for StubOutcome {
        fn echoed(response: EchoResponse, body: String) -> Self {
            StubOutcome::Echoed(response, body)
        }

        fn failed(status_code: u16, error: ErrorResponse, body: String) -> Self {
            StubOutcome::Failed(status_code, error, body)
        }
    }

    fn handler() -> (EchoHandler, MemorySink) {
        let sink = MemorySink::new();
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 10, 17, 10, 0, 0).unwrap()));
        let logger = StructuredLogger::new(sink.clone()).with_clock(Arc::clone(&clock));
        (EchoHandler::new(Arc::new(logger)).with_clock(clock), sink)
    }

    fn echo_response() -> EchoResponse {
        let request = EchoedRequest::new("GET", "/stub", BTreeMap::new(), BTreeMap::new(), "");
        EchoResponse::new(request, ECHO_MESSAGE)
    }

    fn encoding_failure() -> Result<String> {
        let failure = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        Err(EchoError::from(failure))
    }

    #[test]
    fn accepted_method_logs_receipt_then_outcome() {
        let (handler, sink) = handler();

        match handler.handle(Stub { method: "GET" }) {
            StubOutcome::Echoed(response, body) => {
                assert_eq!(response.request.method, "GET");
                assert_eq!(response.processed_at, "2026-10-17T10:00:00.000Z");
                assert_eq!(EchoResponse::from_json(&body).unwrap(), response);
            }
            other => panic!("expected echo, got {other:?}"),
        }

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "Processing stub");
        assert_eq!(entries[1].level, LogLevel::Info);
        assert_eq!(entries[1].message, "Stub echoed");

        let data = entries[1].data.as_ref().unwrap();
        let body = data["response_body"].as_str().unwrap();
        assert_eq!(data["response_size"], body.len());
    }

    #[test]
    fn rejected_method_logs_warn_then_error() {
        let (handler, sink) = handler();

        match handler.handle(Stub { method: "DELETE" }) {
            StubOutcome::Failed(status, error, body) => {
                assert_eq!(status, 405);
                assert_eq!(error.error, "Method Not Allowed");
                assert_eq!(ErrorResponse::from_json(&body).unwrap(), error);
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        let levels: Vec<LogLevel> = sink.entries().iter().map(|entry| entry.level).collect();
        assert_eq!(levels, [LogLevel::Info, LogLevel::Warn, LogLevel::Error]);

        let entries = sink.entries();
        assert_eq!(entries[1].data.as_ref().unwrap()["method"], "DELETE");
        assert_eq!(entries[2].message, "Error response generated");
        assert_eq!(entries[2].data.as_ref().unwrap()["status_code"], 405);
    }

    #[test]
    fn encoding_failure_degrades_to_internal_error() {
        let (handler, sink) = handler();

        let outcome: StubOutcome = handler.complete("Stub echoed", echo_response(), encoding_failure());
        match outcome {
            StubOutcome::Failed(status, error, body) => {
                assert_eq!(status, 500);
                assert_eq!(error.error, "Internal Server Error");
                assert_eq!(error.message, "Failed to process response");
                assert!(body.contains("Internal Server Error"));
            }
            other => panic!("expected internal error, got {other:?}"),
        }

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "Failed to marshal response");
        assert_eq!(entries[0].level, LogLevel::Error);
        assert_eq!(entries[1].data.as_ref().unwrap()["status_code"], 500);
    }

    #[test]
    fn proxy_encoding_failure_is_a_500_with_fixed_headers() {
        let (handler, _sink) = handler();

        let response: ProxyResponse = handler.complete(ProxyRequest::SUCCESS_MESSAGE, echo_response(), encoding_failure());
        assert_eq!(response.status_code, 500);
        assert!(!response.is_base64_encoded);
        assert_eq!(response.headers, response_headers());

        let error = ErrorResponse::from_json(&response.body).unwrap();
        assert_eq!(error.error, "Internal Server Error");
        assert_eq!(error.message, "Failed to process response");
        assert_eq!(error.timestamp, "2026-10-17T10:00:00.000Z");
    }

    #[test]
    fn non_proxy_encoding_failure_is_a_bare_error_object() {
        let (handler, _sink) = handler();

        let outcome: NonProxyOutcome = handler.complete(NonProxyRequest::SUCCESS_MESSAGE, echo_response(), encoding_failure());
        let error = outcome.failed().unwrap();
        assert_eq!(error.error, "Internal Server Error");
        assert_eq!(error.message, "Failed to process response");

        let value = serde_json::to_value(&outcome).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.get("statusCode").is_none());
        assert!(object.get("request").is_none());
    }
}
