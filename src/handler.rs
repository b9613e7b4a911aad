//! Display routing for classified errors.
//!
//! [`classify`](crate::error::classify) is pure and side-effect free; this
//! module owns the side-effecting half: choosing a [`DisplayChannel`] and
//! pushing the classified error through the [`Notifier`] seam or the
//! diagnostic log. [`handle`] is the composition entry point call sites use.

use crate::error::{classify, format_details, ErrorCategory, ErrorInfo, ErrorSeverity, RawError};
use crate::logging::{log_error, log_info, log_warn};
use std::sync::Arc;

/// Panel title used when the caller does not supply one.
pub const DEFAULT_PANEL_TITLE: &str = "Error";

/// Toast duration used when the caller does not supply one.
pub const DEFAULT_TOAST_DURATION_SECS: f32 = 4.5;

/// How a classified error is surfaced. Selected per invocation through
/// [`HandleOptions`], not a property of the error itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayChannel {
    /// Transient message through [`Notifier::show_toast`].
    #[default]
    Toast,

    /// Persistent-until-dismissed panel through [`Notifier::show_panel`].
    DetailPanel,

    /// Full error written to the diagnostic log; no user-visible effect.
    ConsoleOnly,

    /// No side effect; the caller reads the returned [`ErrorInfo`] directly.
    SilentReturn,
}

/// The UI notification surface this crate renders into.
///
/// Implementations are best-effort: a failure to render must not disturb
/// the error path that triggered the display, so the methods are
/// infallible by contract.
pub trait Notifier: Send + Sync {
    /// Show a transient message for roughly `duration_secs` seconds.
    fn show_toast(&self, content: &str, duration_secs: f32);

    /// Show a persistent panel with a title and body.
    fn show_panel(&self, title: &str, content: &str);
}

/// Default [`Notifier`] that routes toasts and panels to the log.
///
/// Used by non-interactive flows (background refresh, tooling) and as the
/// default surface before a real UI notifier is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_toast(&self, content: &str, duration_secs: f32) {
        log_info!(duration_secs, content, "toast");
    }

    fn show_panel(&self, title: &str, content: &str) {
        log_info!(title, content, "detail panel");
    }
}

/// Callback invoked with the classified error after display.
///
/// Fallible: a returned error is logged at warn and never masks the
/// original failure path.
pub type ErrorCallback = Arc<dyn Fn(&ErrorInfo) -> anyhow::Result<()> + Send + Sync>;

/// Recognized options for [`handle`] and [`display`], with stated defaults.
#[derive(Clone)]
pub struct HandleOptions {
    /// Where the error is surfaced. Default [`DisplayChannel::Toast`].
    pub channel: DisplayChannel,
    /// Render grouped validation details instead of the summary message
    /// when available. Default true.
    pub show_validation_details: bool,
    /// Panel title. Default [`DEFAULT_PANEL_TITLE`].
    pub title: Option<String>,
    /// Overrides the classified message (details untouched). Default none.
    pub custom_message: Option<String>,
    /// Toast duration in seconds. Default [`DEFAULT_TOAST_DURATION_SECS`].
    pub duration_secs: f32,
    /// Invoked with the classified error. Default none.
    pub on_error: Option<ErrorCallback>,
}

impl Default for HandleOptions {
    fn default() -> Self {
        Self {
            channel: DisplayChannel::Toast,
            show_validation_details: true,
            title: None,
            custom_message: None,
            duration_secs: DEFAULT_TOAST_DURATION_SECS,
            on_error: None,
        }
    }
}

impl std::fmt::Debug for HandleOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleOptions")
            .field("channel", &self.channel)
            .field("show_validation_details", &self.show_validation_details)
            .field("title", &self.title)
            .field("custom_message", &self.custom_message)
            .field("duration_secs", &self.duration_secs)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Content selection shared by the toast and panel channels: grouped
/// validation details when configured and present, the summary otherwise.
fn display_content(info: &ErrorInfo, show_validation_details: bool) -> String {
    if info.category == ErrorCategory::Validation
        && show_validation_details
        && !info.details.is_empty()
    {
        format_details(&info.details)
    } else {
        info.message.clone()
    }
}

/// Render a classified error through the given channel.
///
/// [`DisplayChannel::SilentReturn`] is a no-op here; [`handle`] already
/// skips the call, this arm exists so direct callers get the same contract.
pub fn display(
    info: &ErrorInfo,
    channel: DisplayChannel,
    notifier: &dyn Notifier,
    options: &HandleOptions,
) {
    match channel {
        DisplayChannel::Toast => {
            notifier.show_toast(
                &display_content(info, options.show_validation_details),
                options.duration_secs,
            );
        }

        DisplayChannel::DetailPanel => {
            let title = options.title.as_deref().unwrap_or(DEFAULT_PANEL_TITLE);
            notifier.show_panel(title, &display_content(info, options.show_validation_details));
        }

        DisplayChannel::ConsoleOnly => {
            // The log line is the only place the raw cause surfaces.
            match info.category.severity() {
                ErrorSeverity::Error => log_error!(
                    category = ?info.category,
                    status = ?info.status_code,
                    details = ?info.details,
                    cause = %info.cause,
                    occurred_at = %info.occurred_at,
                    message = %info.message,
                    "request failed"
                ),
                ErrorSeverity::Warning => log_warn!(
                    category = ?info.category,
                    status = ?info.status_code,
                    details = ?info.details,
                    cause = %info.cause,
                    occurred_at = %info.occurred_at,
                    message = %info.message,
                    "request failed"
                ),
                ErrorSeverity::Info => log_info!(
                    category = ?info.category,
                    status = ?info.status_code,
                    details = ?info.details,
                    cause = %info.cause,
                    occurred_at = %info.occurred_at,
                    message = %info.message,
                    "request failed"
                ),
            }
        }

        DisplayChannel::SilentReturn => {}
    }
}

/// Classify a raw failure, surface it, and return the classified form.
///
/// Always returns the [`ErrorInfo`] regardless of channel, so silent
/// callers and display callers share one entry point.
pub fn handle(raw: &RawError, notifier: &dyn Notifier, options: &HandleOptions) -> ErrorInfo {
    let mut info = classify(raw);

    if let Some(message) = &options.custom_message {
        info.message = message.clone();
    }

    if options.channel != DisplayChannel::SilentReturn {
        display(&info, options.channel, notifier, options);
    }

    if let Some(callback) = &options.on_error {
        if let Err(err) = callback(&info) {
            log_warn!(error = %err, "on_error callback failed");
        }
    }

    info
}
