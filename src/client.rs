//! Thin JSON transport for the campus backend.
//!
//! Every service call in the product flows through this client: relative
//! paths against one configured origin, JSON bodies both ways, bearer-token
//! auth. Failures come back as [`RawError`] so the classifier sees the
//! distinction between an answered error, an unanswered request, and a
//! local failure. Deliberately not a general HTTP client: no retry, no
//! backoff, no streaming.

use crate::config::ApiConfig;
use crate::error::{RawError, RawResult};
use crate::logging::log_debug;
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// JSON transport bound to one backend origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    auth_token: Option<String>,
    http: HttpClient,
}

impl ApiClient {
    /// Build a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RawError::Local`] when the configuration is invalid or the
    /// underlying transport cannot be constructed.
    pub fn from_config(config: ApiConfig) -> RawResult<Self> {
        config.validate()?;
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(RawError::from)?;

        log_debug!(base_url = %config.base_url, "ApiClient created");
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token,
            http,
        })
    }

    /// Build a client for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`RawError::Local`] when `base_url` is not an http(s) origin.
    pub fn new(base_url: &str) -> RawResult<Self> {
        Self::from_config(ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    /// A copy of this client that authenticates with `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            auth_token: Some(token.into()),
            http: self.http.clone(),
        }
    }

    /// A copy of this client with no authentication.
    pub fn without_token(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            auth_token: None,
            http: self.http.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn attach_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.auth_token.as_deref() {
            builder.bearer_auth(token)
        } else {
            builder
        }
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> RawResult<T> {
        self.send(self.http.get(self.url(path))).await
    }

    /// GET `path` with query parameters and decode the JSON response.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> RawResult<T> {
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    /// POST a JSON body to `path` and decode the JSON response.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> RawResult<T> {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    /// PUT a JSON body to `path` and decode the JSON response.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> RawResult<T> {
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    /// DELETE `path`, discarding any response body.
    pub async fn delete(&self, path: &str) -> RawResult<()> {
        let response = self
            .attach_auth(self.http.delete(self.url(path)))
            .send()
            .await
            .map_err(RawError::from)?;

        let status = response.status();
        log_debug!(path, status = status.as_u16(), "DELETE settled");
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_failure(response).await)
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> RawResult<T> {
        let response = self
            .attach_auth(builder)
            .send()
            .await
            .map_err(RawError::from)?;

        let status = response.status();
        log_debug!(status = status.as_u16(), "request settled");
        if status.is_success() {
            response.json::<T>().await.map_err(RawError::from)
        } else {
            Err(Self::status_failure(response).await)
        }
    }

    // Error bodies are lenient JSON; a non-JSON or empty body becomes Null
    // and the classifier falls back to status-based messages.
    async fn status_failure(response: Response) -> RawError {
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        RawError::response(status, body)
    }
}
