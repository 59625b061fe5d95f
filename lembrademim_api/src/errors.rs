//! Error types for the API client and the rules that turn a failed HTTP
//! response into a human-readable message.

use serde_json::Value;

use crate::credentials::StoreError;

/// Bodies longer than this are cut before being attached to an error.
pub const MAX_BODY_LEN: usize = 2000;

/// Raw error text is only used as the message when it is shorter than this.
const MAX_TEXT_MESSAGE_LEN: usize = 100;

/// Errors that can occur when making API requests.
///
/// Every variant can be read as the `{ message, status, body }` triple
/// through [`Error::message`], [`Error::status`] and [`Error::body`], so
/// callers can branch on the HTTP status without matching variants.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A candidate endpoint could not be reached (DNS, refused connection,
    /// timeout, or the body could not be read).
    #[error("{endpoint}: {message}")]
    Network { endpoint: String, message: String },
    /// A reachable endpoint answered with a status outside 2xx.
    #[error("{message}")]
    HttpStatus {
        status: u16,
        message: String,
        body: String,
    },
    /// The server answered 2xx with no body where one was expected.
    #[error("Empty response from server (HTTP {status})")]
    EmptyResponse { status: u16 },
    /// The body was not valid JSON, or did not match the expected shape.
    #[error("Failed to process server response: {message}")]
    Decode {
        status: u16,
        message: String,
        body: String,
    },
    /// Every candidate endpoint failed at the network level.
    #[error("{}", exhausted_message(.last))]
    AllEndpointsFailed { last: Option<Box<Error>> },
    /// The credential store could not be read and the client is configured
    /// to fail closed.
    #[error("Credential store unavailable: {0}")]
    Credentials(#[from] StoreError),
    /// A configured base URL is not an absolute http(s) URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

fn exhausted_message(last: &Option<Box<Error>>) -> String {
    match last {
        Some(err) => format!("All endpoints failed; last error: {}", err),
        None => "All endpoints failed".to_string(),
    }
}

impl Error {
    /// Human-readable message. For exhaustion errors this is the message of
    /// the last network failure.
    pub fn message(&self) -> String {
        match self {
            Self::HttpStatus { message, .. } => message.clone(),
            Self::AllEndpointsFailed { last: Some(last) } => last.message(),
            other => other.to_string(),
        }
    }

    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. }
            | Self::EmptyResponse { status }
            | Self::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw (possibly truncated) response body attached to this error.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } | Self::Decode { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// The attached body parsed as JSON, when it is JSON.
    pub fn json_body(&self) -> Option<Value> {
        self.body().and_then(|b| serde_json::from_str(b).ok())
    }

    /// True when no endpoint produced an HTTP response at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::AllEndpointsFailed { .. })
    }
}

/// Derives the message for a non-2xx response.
///
/// A JSON object body contributes its `message` key, then its `error` key.
/// A body that is not JSON is used verbatim when it is short. Anything else
/// falls back to `HTTP Error: <status>`.
pub fn normalize_error_message(status: u16, text: &str) -> String {
    let fallback = format!("HTTP Error: {}", status);
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(message_text)
            .or_else(|| map.get("error").and_then(message_text))
            .unwrap_or(fallback),
        Ok(_) => fallback,
        Err(_) => {
            if !text.is_empty() && text.chars().count() < MAX_TEXT_MESSAGE_LEN {
                text.to_string()
            } else {
                fallback
            }
        }
    }
}

// Validation errors arrive as an array of strings on some routes.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            Some(parts.join("; "))
        }
        other => Some(other.to_string()),
    }
}

/// Cuts a body down to [`MAX_BODY_LEN`] bytes on a char boundary.
pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_BODY_LEN {
        return body.to_string();
    }
    let mut end = MAX_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
