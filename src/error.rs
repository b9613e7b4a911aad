//! Error classification for campus-client operations.
//!
//! This module turns the raw failures produced by the network layer into
//! structured, category-tagged [`ErrorInfo`] values that the rest of the
//! crate (and UI call sites) can route on without re-inspecting response
//! bodies.
//!
//! # Failure shapes
//!
//! Raw failures arrive as a [`RawError`], a tagged union over the three
//! shapes the transport can produce:
//! - an HTTP response with a status code and a best-effort JSON body,
//! - a request that was dispatched but never answered (connectivity),
//! - a local failure that happened before any request left the device.
//!
//! # Classification
//!
//! [`classify`] is total: every `RawError` resolves to exactly one
//! [`ErrorCategory`], degrading to [`ErrorCategory::Unknown`] rather than
//! failing on unrecognized shapes.
//!
//! ```rust
//! use campus_client::error::{classify, ErrorCategory, RawError};
//! use serde_json::json;
//!
//! let raw = RawError::response(500, json!({"message": "boom"}));
//! let info = classify(&raw);
//! assert_eq!(info.category, ErrorCategory::Server);
//! assert_eq!(info.message, "boom");
//! ```

use crate::logging::log_debug;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Convenient result type for operations that fail with a [`RawError`].
pub type RawResult<T> = std::result::Result<T, RawError>;

/// Fallback summary when a 400 body carries validation entries but no
/// top-level message, and for [`format_details`] on an empty list.
pub const VALIDATION_FALLBACK_MESSAGE: &str = "Validation failed";

/// Fallback summary for 5xx responses without a body message.
pub const SERVER_FALLBACK_MESSAGE: &str = "Server error occurred";

/// Fixed summary for connectivity failures.
pub const NETWORK_MESSAGE: &str = "Network error - please check your connection";

/// Fallback summary for local failures with no message of their own.
pub const LOCAL_FALLBACK_MESSAGE: &str = "Request failed";

/// A raw failure from the network layer, decoded into the shape that was
/// actually observed.
///
/// The three variants mirror the three ways a request can fail: the server
/// answered with an error status, the request went out but nothing came
/// back, or the failure happened before dispatch (bad config, serialization,
/// a violated local precondition).
#[derive(Debug, Error)]
pub enum RawError {
    /// The server answered with a non-success status.
    ///
    /// `body` is the response body parsed as lenient JSON; `Value::Null`
    /// when the body was empty or not JSON at all.
    #[error("http status {status}")]
    Response {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, best-effort JSON.
        body: Value,
    },

    /// The request was dispatched but no response arrived.
    #[error("no response received")]
    NoResponse {
        /// The underlying transport error, when one is available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation failed before a request could be dispatched.
    #[error("{0}")]
    Local(#[from] anyhow::Error),
}

impl RawError {
    /// Create a `Response` failure from a status code and parsed body.
    pub fn response(status: u16, body: Value) -> Self {
        Self::Response { status, body }
    }

    /// Create a `NoResponse` failure, optionally wrapping the transport error.
    pub fn no_response(source: Option<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::NoResponse { source }
    }

    /// Create a `Local` failure from a plain message.
    pub fn local(message: impl Into<String>) -> Self {
        Self::Local(anyhow::anyhow!(message.into()))
    }
}

impl From<reqwest::Error> for RawError {
    fn from(err: reqwest::Error) -> Self {
        // Connect/timeout/send failures mean the request never got an
        // answer; decode and builder failures happened on our side.
        if err.is_connect() || err.is_timeout() {
            Self::NoResponse {
                source: Some(Box::new(err)),
            }
        } else if err.is_decode() || err.is_builder() {
            Self::Local(anyhow::Error::new(err))
        } else if err.is_request() {
            Self::NoResponse {
                source: Some(Box::new(err)),
            }
        } else {
            Self::Local(anyhow::Error::new(err))
        }
    }
}

/// High-level category of a classified failure, used for display routing
/// and form binding decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    /// HTTP 400 with structured per-field validation entries.
    Validation,

    /// Request sent, no response received.
    Network,

    /// HTTP 5xx.
    Server,

    /// Everything else: other client statuses, pre-dispatch failures,
    /// unrecognized shapes.
    Unknown,
}

/// Severity level for logging decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed but the system is stable.
    Error,

    /// Unexpected but recoverable situation.
    Warning,

    /// Expected failure, normal operation.
    Info,
}

impl ErrorCategory {
    /// Severity used when a classified failure is written to the
    /// diagnostic log.
    pub fn severity(self) -> ErrorSeverity {
        match self {
            Self::Validation => ErrorSeverity::Info,
            Self::Network => ErrorSeverity::Warning,
            Self::Server => ErrorSeverity::Error,
            Self::Unknown => ErrorSeverity::Error,
        }
    }
}

/// A single validation entry: a message optionally attributed to a named
/// input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    /// The input field this message is attributable to, when the backend
    /// named one.
    pub field: Option<String>,
    /// Human-readable message for this entry.
    pub message: String,
}

impl ErrorDetail {
    /// Detail bound to a named field.
    pub fn bound(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// General detail with no attributable field.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// The classified form of a raw failure. Immutable once constructed.
///
/// Invariants upheld by [`classify`]:
/// - `details` is non-empty only when `category` is
///   [`ErrorCategory::Validation`].
/// - `status_code` is set iff the failure carried an HTTP response.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Failure category.
    pub category: ErrorCategory,
    /// Human-readable summary.
    pub message: String,
    /// Per-field validation entries, in response order.
    pub details: Vec<ErrorDetail>,
    /// HTTP status, when a response was received.
    pub status_code: Option<u16>,
    /// Debug rendering of the original raw error. Logged, never shown.
    pub cause: String,
    /// When classification happened. Diagnostic only.
    pub occurred_at: DateTime<Utc>,
}

fn body_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn detail_from_entry(entry: &Value) -> ErrorDetail {
    let field = ["field", "path", "param"]
        .iter()
        .find_map(|key| entry.get(*key).and_then(Value::as_str))
        .map(str::to_owned);

    let message = entry
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| entry.get("msg").and_then(Value::as_str))
        .map(str::to_owned)
        .unwrap_or_else(|| entry.to_string());

    ErrorDetail { field, message }
}

fn extract_details(body: &Value) -> Vec<ErrorDetail> {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(detail_from_entry).collect())
        .unwrap_or_default()
}

/// Classify a raw failure into an [`ErrorInfo`].
///
/// Total over every `RawError` shape: unrecognized bodies and statuses
/// degrade to [`ErrorCategory::Unknown`] with a best-effort message rather
/// than producing a secondary failure.
pub fn classify(raw: &RawError) -> ErrorInfo {
    let cause = format!("{raw:?}");
    let occurred_at = Utc::now();

    let (category, message, details, status_code) = match raw {
        RawError::Response { status, body } => {
            let details = if *status == 400 {
                extract_details(body)
            } else {
                Vec::new()
            };

            if *status == 400 && !details.is_empty() {
                let message =
                    body_message(body).unwrap_or_else(|| VALIDATION_FALLBACK_MESSAGE.to_string());
                (ErrorCategory::Validation, message, details, Some(*status))
            } else if *status >= 500 {
                let message =
                    body_message(body).unwrap_or_else(|| SERVER_FALLBACK_MESSAGE.to_string());
                (ErrorCategory::Server, message, Vec::new(), Some(*status))
            } else {
                let message = body_message(body)
                    .unwrap_or_else(|| format!("Request failed with status {status}"));
                (ErrorCategory::Unknown, message, Vec::new(), Some(*status))
            }
        }

        RawError::NoResponse { .. } => (
            ErrorCategory::Network,
            NETWORK_MESSAGE.to_string(),
            Vec::new(),
            None,
        ),

        RawError::Local(err) => {
            let message = err.to_string();
            let message = if message.is_empty() {
                LOCAL_FALLBACK_MESSAGE.to_string()
            } else {
                message
            };
            (ErrorCategory::Unknown, message, Vec::new(), None)
        }
    };

    log_debug!(
        category = ?category,
        status = ?status_code,
        detail_count = details.len(),
        "classified request failure"
    );

    ErrorInfo {
        category,
        message,
        details,
        status_code,
        cause,
        occurred_at,
    }
}

/// Render validation details for display.
///
/// Field-bound entries are grouped by field in first-seen order, one line
/// per field with its messages comma-joined. General entries follow, one
/// per line. Trailing whitespace is trimmed. An empty list renders the
/// validation fallback message (defensive; [`classify`] never attaches an
/// empty details list to a validation failure).
pub fn format_details(details: &[ErrorDetail]) -> String {
    if details.is_empty() {
        return VALIDATION_FALLBACK_MESSAGE.to_string();
    }

    let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut general: Vec<&str> = Vec::new();

    for detail in details {
        match detail.field.as_deref() {
            Some(field) => {
                if let Some((_, messages)) = grouped.iter_mut().find(|(name, _)| *name == field) {
                    messages.push(detail.message.as_str());
                } else {
                    grouped.push((field, vec![detail.message.as_str()]));
                }
            }
            None => general.push(detail.message.as_str()),
        }
    }

    let mut rendered = String::new();
    for (field, messages) in &grouped {
        rendered.push_str(field);
        rendered.push_str(": ");
        rendered.push_str(&messages.join(", "));
        rendered.push('\n');
    }
    rendered.push_str(&general.join("\n"));

    rendered.trim_end().to_string()
}

/// Group field-bound details into per-field message lists for form binding.
///
/// Fields appear in first-seen order; repeated fields accumulate messages.
/// Entries without a field are not attributable to any form control and are
/// dropped here (they remain in [`ErrorInfo::details`] for display).
pub fn group_field_errors(details: &[ErrorDetail]) -> Vec<(String, Vec<String>)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();

    for detail in details {
        let Some(field) = detail.field.as_deref() else {
            continue;
        };
        if let Some((_, messages)) = grouped.iter_mut().find(|(name, _)| name == field) {
            messages.push(detail.message.clone());
        } else {
            grouped.push((field.to_string(), vec![detail.message.clone()]));
        }
    }

    grouped
}
