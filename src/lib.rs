//! # campus-client
//!
//! Client-side request state and error classification for school-management
//! REST backends. The parent/teacher mobile app and the web admin console
//! share this plumbing: screens wrap their service calls in a
//! [`RequestState`], and every failure flows through the classifier into a
//! category-tagged [`ErrorInfo`] that drives toasts, detail panels, form
//! field errors, or the diagnostic log.
//!
//! ## Key pieces
//!
//! - **Classification**: [`error::classify`] is total over every failure
//!   shape the transport produces — Validation / Network / Server / Unknown.
//! - **Display routing**: [`handler::handle`] surfaces classified errors
//!   through a configurable [`DisplayChannel`] behind the [`Notifier`] seam.
//! - **Request state**: [`RequestState`] binds an async operation to
//!   observable `{data, loading, error}` state with success/error callbacks
//!   and form binding.
//! - **Transport**: [`ApiClient`] is the shared JSON-over-HTTP transport;
//!   [`auth::bootstrap`] resolves the starting auth state from a stored
//!   token.
//!
//! ## Example
//!
//! ```rust,no_run
//! use campus_client::{ApiClient, ApiConfig, RequestState};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), campus_client::RawError> {
//! let client = Arc::new(ApiClient::from_config(ApiConfig {
//!     base_url: "https://api.campus.example".to_string(),
//!     ..ApiConfig::default()
//! })?);
//!
//! let fetch_student = {
//!     let client = client.clone();
//!     move |student_id: String| {
//!         let client = client.clone();
//!         async move {
//!             client
//!                 .get::<serde_json::Value>(&format!("/api/students/{student_id}"))
//!                 .await
//!         }
//!     }
//! };
//!
//! let state = RequestState::with_defaults(fetch_student);
//! let _student = state.execute("stu-1".to_string()).await?;
//! # Ok(())
//! # }
//! ```

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod request;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use auth::{AuthState, Role, Session, TokenStore};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{
    classify, format_details, group_field_errors, ErrorCategory, ErrorDetail, ErrorInfo,
    ErrorSeverity, RawError, RawResult,
};
pub use handler::{display, handle, DisplayChannel, HandleOptions, LogNotifier, Notifier};
pub use request::{FormBinding, RequestOptions, RequestState, Snapshot};
