//! Test helper utilities for campus-client tests
//!
//! Reusable fixtures and recording doubles shared across test modules.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in
//! production code.

#![allow(dead_code)]

use crate::error::RawError;
use crate::handler::Notifier;
use crate::request::FormBinding;
use serde_json::json;
use std::sync::Mutex;

/// A 400 with a single field-bound entry, the canonical validation failure.
pub fn email_validation_raw() -> RawError {
    RawError::response(
        400,
        json!({
            "message": "Validation failed",
            "errors": [{"field": "email", "message": "Email is required"}]
        }),
    )
}

/// A 500 with a body message.
pub fn server_boom_raw() -> RawError {
    RawError::response(500, json!({"message": "boom"}))
}

/// A connectivity failure with no underlying source.
pub fn network_raw() -> RawError {
    RawError::no_response(None)
}

/// Notifier double that records every toast and panel it is asked to show.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<(String, f32)>>,
    pub panels: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn toast_count(&self) -> usize {
        self.toasts.lock().unwrap().len()
    }

    pub fn panel_count(&self) -> usize {
        self.panels.lock().unwrap().len()
    }

    pub fn last_toast(&self) -> Option<(String, f32)> {
        self.toasts.lock().unwrap().last().cloned()
    }

    pub fn last_panel(&self) -> Option<(String, String)> {
        self.panels.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn show_toast(&self, content: &str, duration_secs: f32) {
        self.toasts
            .lock()
            .unwrap()
            .push((content.to_string(), duration_secs));
    }

    fn show_panel(&self, title: &str, content: &str) {
        self.panels
            .lock()
            .unwrap()
            .push((title.to_string(), content.to_string()));
    }
}

/// Form double that records every field-error map pushed into it.
#[derive(Debug, Default)]
pub struct RecordingForm {
    pub calls: Mutex<Vec<Vec<(String, Vec<String>)>>>,
}

impl RecordingForm {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_errors(&self) -> Option<Vec<(String, Vec<String>)>> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl FormBinding for RecordingForm {
    fn set_field_errors(&self, errors: Vec<(String, Vec<String>)>) {
        self.calls.lock().unwrap().push(errors);
    }
}
