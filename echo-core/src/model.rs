//! Echo data model.
//!
//! Three shapes leave the handler: the echoed request, the echo response that
//! wraps it, and the error response used on every failure path. Field names
//! on the wire are fixed; see the serde attributes below.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::{EchoError, Result};

/// Message attached to every successful echo.
pub const ECHO_MESSAGE: &str = "Request successfully echoed";

/// The caller's request as it is echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoedRequest {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub query_params: BTreeMap<String, String>,
    /// Raw body text, never re-parsed
    #[serde(default)]
    pub body: String,
    /// When the request was parsed
    pub timestamp: String,
}

impl EchoedRequest {
    /// Build an echoed request stamped with the current system time.
    ///
    /// No validation happens here; empty methods, paths and maps are kept
    /// as given.
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        headers: BTreeMap<String, String>,
        query_params: BTreeMap<String, String>,
        body: impl Into<String>,
    ) -> Self {
        Self::new_at(&SystemClock, method, path, headers, query_params, body)
    }

    /// Same as [`EchoedRequest::new`] with an explicit clock.
    pub fn new_at(
        clock: &dyn Clock,
        method: impl Into<String>,
        path: impl Into<String>,
        headers: BTreeMap<String, String>,
        query_params: BTreeMap<String, String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers,
            query_params,
            body: body.into(),
            timestamp: clock.timestamp(),
        }
    }
}

/// Successful echo: the request plus processing metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoResponse {
    pub request: EchoedRequest,
    pub message: String,
    /// When the response was built; never earlier than `request.timestamp`
    pub processed_at: String,
}

impl EchoResponse {
    pub fn new(request: EchoedRequest, message: impl Into<String>) -> Self {
        Self::new_at(&SystemClock, request, message)
    }

    pub fn new_at(clock: &dyn Clock, request: EchoedRequest, message: impl Into<String>) -> Self {
        Self {
            request,
            message: message.into(),
            processed_at: clock.timestamp(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        encode_to_json(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Failure shape returned on rejection and on internal errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short category label, e.g. "Method Not Allowed"
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new_at(&SystemClock, error, message)
    }

    pub fn new_at(clock: &dyn Clock, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: clock.timestamp(),
        }
    }

    /// Build the public error shape for an [`EchoError`].
    pub fn from_error(clock: &dyn Clock, err: &EchoError) -> Self {
        Self::new_at(clock, err.label(), err.public_message())
    }

    pub fn to_json(&self) -> Result<String> {
        encode_to_json(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the response, or fall back to a fixed internal-error body that
    /// keeps this response's timestamp.
    pub fn to_json_or_fallback(&self) -> String {
        self.to_json().unwrap_or_else(|e| {
            tracing::error!("Failed to marshal error response: {}", e);
            format!(
                r#"{{"error":"Internal Server Error","message":"Failed to process error response","timestamp":"{}"}}"#,
                self.timestamp
            )
        })
    }
}

/// Deserialize a field that may be `null`, treating `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serialize any echo entity to compact JSON.
pub fn encode_to_json<T: Serialize>(entity: &T) -> Result<String> {
    serde_json::to_string(entity).map_err(EchoError::from)
}
