//! Request state binding for asynchronous operations.
//!
//! A [`RequestState`] wraps one async operation (typically a call through
//! [`ApiClient`](crate::client::ApiClient)) behind observable
//! `{data, loading, error}` state, with automatic error display through the
//! configured channel and optional binding of validation errors to a form
//! surface.
//!
//! One instance is owned by one call site for its lifetime. Concurrent
//! `execute` calls on the same instance run independently and
//! last-settled-wins on the shared fields; there is no cancellation and no
//! generation tagging. Callers that need newest-wins semantics must guard
//! at the call site.

use crate::error::{group_field_errors, ErrorCategory, ErrorInfo, RawResult};
use crate::handler::{
    handle, DisplayChannel, ErrorCallback, HandleOptions, LogNotifier, Notifier,
    DEFAULT_TOAST_DURATION_SECS,
};
use crate::logging::log_debug;
use futures_util::future::BoxFuture;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

type Operation<T, Args> = Arc<dyn Fn(Args) -> BoxFuture<'static, RawResult<T>> + Send + Sync>;

/// Callback invoked with the resolved value after a successful `execute`.
pub type SuccessCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// The form surface validation errors are pushed into when
/// [`RequestOptions::bind_form_errors`] is set.
pub trait FormBinding: Send + Sync {
    /// Replace the form's field-error lists. Fields arrive in first-seen
    /// order with accumulated messages per field.
    fn set_field_errors(&self, errors: Vec<(String, Vec<String>)>);
}

/// Recognized options for a [`RequestState`], with stated defaults.
pub struct RequestOptions<T> {
    /// Display channel for failures. Default [`DisplayChannel::Toast`].
    pub channel: DisplayChannel,
    /// Render grouped validation details in toasts/panels. Default true.
    pub show_validation_details: bool,
    /// Panel title override. Default none.
    pub title: Option<String>,
    /// Message override applied after classification. Default none.
    pub custom_message: Option<String>,
    /// Toast duration in seconds. Default 4.5.
    pub duration_secs: f32,
    /// Invoked with the resolved value on success. Default none.
    pub on_success: Option<SuccessCallback<T>>,
    /// Invoked with the classified error on failure. Default none.
    pub on_error: Option<ErrorCallback>,
    /// Push field-bound validation errors into the attached form.
    /// Default false; [`RequestState::with_form`] sets it.
    pub bind_form_errors: bool,
}

impl<T> Default for RequestOptions<T> {
    fn default() -> Self {
        Self {
            channel: DisplayChannel::Toast,
            show_validation_details: true,
            title: None,
            custom_message: None,
            duration_secs: DEFAULT_TOAST_DURATION_SECS,
            on_success: None,
            on_error: None,
            bind_form_errors: false,
        }
    }
}

impl<T> Clone for RequestOptions<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel,
            show_validation_details: self.show_validation_details,
            title: self.title.clone(),
            custom_message: self.custom_message.clone(),
            duration_secs: self.duration_secs,
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
            bind_form_errors: self.bind_form_errors,
        }
    }
}

impl<T> RequestOptions<T> {
    fn handle_options(&self) -> HandleOptions {
        HandleOptions {
            channel: self.channel,
            show_validation_details: self.show_validation_details,
            title: self.title.clone(),
            custom_message: self.custom_message.clone(),
            duration_secs: self.duration_secs,
            on_error: self.on_error.clone(),
        }
    }
}

/// Observable state of a [`RequestState`] at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    /// Result of the most recently settled successful execution.
    pub data: Option<T>,
    /// An execution is in flight.
    pub loading: bool,
    /// Classified error of the most recently settled failed execution.
    pub error: Option<ErrorInfo>,
}

impl<T> Snapshot<T> {
    fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Binds an async operation to observable `{data, loading, error}` state.
pub struct RequestState<T, Args> {
    operation: Operation<T, Args>,
    notifier: Arc<dyn Notifier>,
    form: Option<Arc<dyn FormBinding>>,
    options: RequestOptions<T>,
    inner: Arc<Mutex<Snapshot<T>>>,
}

impl<T, Args> RequestState<T, Args>
where
    T: Clone + Send + 'static,
{
    /// Bind `operation` with an explicit notifier and options.
    pub fn new<F, Fut>(operation: F, notifier: Arc<dyn Notifier>, options: RequestOptions<T>) -> Self
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RawResult<T>> + Send + 'static,
    {
        Self {
            operation: Arc::new(move |args: Args| -> BoxFuture<'static, RawResult<T>> {
                Box::pin(operation(args))
            }),
            notifier,
            form: None,
            options,
            inner: Arc::new(Mutex::new(Snapshot::idle())),
        }
    }

    /// Bind `operation` with default options and the log-backed notifier.
    pub fn with_defaults<F, Fut>(operation: F) -> Self
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RawResult<T>> + Send + 'static,
    {
        Self::new(operation, Arc::new(LogNotifier), RequestOptions::default())
    }

    /// Attach a form surface and enable validation-error binding.
    pub fn with_form(mut self, form: Arc<dyn FormBinding>) -> Self {
        self.form = Some(form);
        self.options.bind_form_errors = true;
        self
    }

    // Poisoning only happens if a panic hit between two field writes; the
    // snapshot stays usable either way.
    fn lock(&self) -> MutexGuard<'_, Snapshot<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the bound operation.
    ///
    /// Sets `loading` and clears any prior error, then on settlement stores
    /// exactly one of `data` or `error`. Failures are classified and
    /// displayed through the configured channel, pushed into the attached
    /// form when they are validation failures, and re-surfaced to the
    /// caller as the ORIGINAL raw error; the classified form is available
    /// through [`error`](Self::error).
    pub async fn execute(&self, args: Args) -> RawResult<T> {
        let request_id = Uuid::new_v4();
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }
        log_debug!(%request_id, "request started");

        match (self.operation)(args).await {
            Ok(value) => {
                {
                    let mut state = self.lock();
                    state.data = Some(value.clone());
                    state.loading = false;
                }
                log_debug!(%request_id, "request succeeded");
                if let Some(callback) = &self.options.on_success {
                    callback(&value);
                }
                Ok(value)
            }

            Err(raw) => {
                let info = handle(&raw, self.notifier.as_ref(), &self.options.handle_options());
                {
                    let mut state = self.lock();
                    state.error = Some(info.clone());
                    state.loading = false;
                }
                log_debug!(
                    %request_id,
                    category = ?info.category,
                    status = ?info.status_code,
                    "request failed"
                );

                if self.options.bind_form_errors && info.category == ErrorCategory::Validation {
                    if let Some(form) = &self.form {
                        form.set_field_errors(group_field_errors(&info.details));
                    }
                }

                Err(raw)
            }
        }
    }

    /// Return to idle. Does not cancel in-flight executions; one that later
    /// settles still writes into state.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.data = None;
        state.error = None;
        state.loading = false;
    }

    /// Current state, cloned out of the lock.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.lock().clone()
    }

    /// An execution is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Most recent successful result.
    pub fn data(&self) -> Option<T> {
        self.lock().data.clone()
    }

    /// Most recent classified failure.
    pub fn error(&self) -> Option<ErrorInfo> {
        self.lock().error.clone()
    }
}
