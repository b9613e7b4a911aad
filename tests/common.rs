//! Test helper utilities for campus-client integration tests
//!
//! Reusable fixtures shared across the integration test files.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in
//! production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use async_trait::async_trait;
use campus_client::{ApiClient, FormBinding, Notifier, TokenStore};
use std::sync::Mutex;
use wiremock::MockServer;

/// Start a mock backend and a client pointed at it.
pub async fn start_server_and_client() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&server.uri()).expect("client should build against mock server");
    (server, client)
}

/// Notifier double that records every toast and panel.
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

/// Form double that records pushed field-error maps.
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

/// In-memory token store standing in for device key-value storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    async fn save(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    async fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}
