//! Non-proxy integration shape.
//!
//! Same logical fields as the proxy event but no transport envelope: the
//! result is the echo (or error) object itself, with no status or headers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::handler::{EchoInvocation, EchoOutcome, RequestParts};
use crate::logger::{payload, LogData};
use crate::model::{null_as_default, EchoResponse, ErrorResponse};

/// Incoming non-proxy event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonProxyRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub http_method: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,

    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub query_string_parameters: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub body: Option<String>,
}

/// Result of a non-proxy invocation. Serializes to the bare echo or error
/// object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NonProxyOutcome {
    Echoed(EchoResponse),
    Failed(ErrorResponse),
}

impl NonProxyOutcome {
    pub fn is_echoed(&self) -> bool {
        matches!(self, NonProxyOutcome::Echoed(_))
    }

    pub fn echoed(&self) -> Option<&EchoResponse> {
        match self {
            NonProxyOutcome::Echoed(response) => Some(response),
            NonProxyOutcome::Failed(_) => None,
        }
    }

    pub fn failed(&self) -> Option<&ErrorResponse> {
        match self {
            NonProxyOutcome::Echoed(_) => None,
            NonProxyOutcome::Failed(error) => Some(error),
        }
    }
}

impl EchoInvocation for NonProxyRequest {
    type Outcome = NonProxyOutcome;
    const RECEIPT_MESSAGE: &'static str = "Processing non-proxy request";
    const SUCCESS_MESSAGE: &'static str = "Request processed successfully";

    fn method(&self) -> &str {
        &self.http_method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn receipt_data(&self) -> LogData {
        payload(json!({
            "method": self.http_method,
            "path": self.path,
            "headers": self.headers,
            "query": self.query_string_parameters,
            "body": self.body,
        }))
    }

    fn into_parts(self) -> RequestParts {
        RequestParts {
            method: self.http_method,
            path: self.path,
            headers: self.headers.unwrap_or_default(),
            query_params: self.query_string_parameters.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
        }
    }
}

impl EchoOutcome for NonProxyOutcome {
    fn echoed(response: EchoResponse, _body: String) -> Self {
        NonProxyOutcome::Echoed(response)
    }

    /// Mirrors the encoded body, which is the fixed fallback object when
    /// `error` itself could not be encoded.
    fn failed(_status_code: u16, error: ErrorResponse, body: String) -> Self {
        match ErrorResponse::from_json(&body) {
            Ok(sent) => NonProxyOutcome::Failed(sent),
            Err(_) => NonProxyOutcome::Failed(error),
        }
    }
}
