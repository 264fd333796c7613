//! HTTP client for the bookmark backend.
//!
//! Wraps `reqwest` behind the [`BookmarkApi`] and [`SettingsRemote`] traits so
//! the board and the settings store can be exercised against in-memory fakes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::types::bookmark::{Bookmark, BookmarkEdit, BookmarkRef};
use crate::types::errors::ApiError;
use crate::types::settings::DisplaySettings;

const URLS_ENDPOINT: &str = "/api/urls";
const SETTINGS_ENDPOINT: &str = "/api/settings";

/// Bookmark operations offered by the backend.
#[async_trait]
pub trait BookmarkApi: Send + Sync {
    async fn fetch_bookmarks(&self) -> Result<Vec<Bookmark>, ApiError>;
    async fn update_bookmark(&self, edit: &BookmarkEdit) -> Result<(), ApiError>;
    async fn delete_bookmark(&self, target: &BookmarkRef) -> Result<(), ApiError>;
    async fn record_visit(&self, id: i64) -> Result<(), ApiError>;
}

/// Server-side storage for display settings.
#[async_trait]
pub trait SettingsRemote: Send + Sync {
    async fn fetch_settings(&self) -> Result<DisplaySettings, ApiError>;
    async fn store_settings(&self, settings: &DisplaySettings) -> Result<(), ApiError>;
}

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Empty,
    Json(Value),
    Text(String),
}

/// `reqwest`-backed client for the bookmark REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    /// Sends a request and decodes the body by its `Content-Type`.
    ///
    /// Non-2xx responses become [`ApiError::Http`] carrying the backend message.
    pub async fn send_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(path)?;
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = self.execute(request, &method).await;
        if let Err(err) = &result {
            tracing::error!(method = %method, endpoint = path, error = %err, "API request failed");
        }
        result
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        method: &Method,
    ) -> Result<ApiResponse, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let empty_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "0");
        if *method == Method::HEAD || empty_length {
            return Ok(ApiResponse::Empty);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(ApiResponse::Empty);
        }
        if is_json {
            let value = serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(ApiResponse::Json(value))
        } else {
            Ok(ApiResponse::Text(text))
        }
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Prefers a JSON `message` or `error` field, otherwise returns the trimmed text.
pub fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
    }
    body.trim().to_string()
}

fn expect_json(response: ApiResponse) -> Result<Value, ApiError> {
    match response {
        ApiResponse::Json(value) => Ok(value),
        ApiResponse::Text(text) => serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("expected JSON body: {}", e))),
        ApiResponse::Empty => Err(ApiError::Decode("empty response body".to_string())),
    }
}

#[async_trait]
impl BookmarkApi for ApiClient {
    async fn fetch_bookmarks(&self) -> Result<Vec<Bookmark>, ApiError> {
        let body = expect_json(self.send_request::<()>(Method::GET, URLS_ENDPOINT, None).await?)?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn update_bookmark(&self, edit: &BookmarkEdit) -> Result<(), ApiError> {
        self.send_request(Method::PUT, URLS_ENDPOINT, Some(edit)).await?;
        Ok(())
    }

    async fn delete_bookmark(&self, target: &BookmarkRef) -> Result<(), ApiError> {
        self.send_request(Method::DELETE, URLS_ENDPOINT, Some(target)).await?;
        Ok(())
    }

    async fn record_visit(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("{}/{}/visit", URLS_ENDPOINT, id);
        self.send_request::<()>(Method::POST, &path, None).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsRemote for ApiClient {
    async fn fetch_settings(&self) -> Result<DisplaySettings, ApiError> {
        let body =
            expect_json(self.send_request::<()>(Method::GET, SETTINGS_ENDPOINT, None).await?)?;
        if !body.is_object() {
            return Err(ApiError::Decode("settings must be a JSON object".to_string()));
        }
        Ok(DisplaySettings::from_json_lenient(&body))
    }

    async fn store_settings(&self, settings: &DisplaySettings) -> Result<(), ApiError> {
        self.send_request(Method::PUT, SETTINGS_ENDPOINT, Some(settings)).await?;
        Ok(())
    }
}
