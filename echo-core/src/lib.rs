//! Core types and functionality for the Echo API.
//!
//! This crate provides everything needed to answer an echo invocation: the
//! echo data model and its JSON encoding, a structured JSON-lines logger, the
//! method allowlist, and a single handler algorithm that serves both the
//! API Gateway proxy event shape and the reduced non-proxy shape.

mod error;
mod clock;
mod logger;
mod model;
mod method;
mod mode;
mod handler;
mod proxy;
mod non_proxy;

// Re-export core types
pub use error::{EchoError, Result};
pub use clock::{Clock, SystemClock, FixedClock, format_timestamp};
pub use logger::{StructuredLogger, LogLevel, LogEntry, LogData, MemorySink, payload};
pub use model::{EchoedRequest, EchoResponse, ErrorResponse, encode_to_json, ECHO_MESSAGE};
pub use method::{is_method_allowed, ALLOWED_METHODS};
pub use mode::InvocationMode;
pub use handler::{EchoHandler, EchoInvocation, EchoOutcome, RequestParts};
pub use proxy::{ProxyRequest, ProxyRequestContext, ProxyResponse, response_headers};
pub use non_proxy::{NonProxyRequest, NonProxyOutcome};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
