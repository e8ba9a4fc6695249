pub mod extract;

use reqwest::{
    Method, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::session::token_file::TokenFile;

const CSRF_HEADER: &str = "x-csrf-token";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    /// The message a user should see for this failure.
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Network(err) => err.to_string(),
            Self::Json(err) => err.to_string(),
        }
    }
}

/// Per-request configuration. Caller headers are merged over the defaults
/// and win on conflict.
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenFile,
    csrf_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String, tokens: TokenFile, csrf_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
            csrf_token,
        }
    }

    fn build_url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.base_url.clone();
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let token = self.tokens.token();
        if !token.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        if let Some(csrf) = self.csrf_token.as_deref() {
            if let Ok(value) = HeaderValue::from_str(csrf) {
                headers.insert(HeaderName::from_static(CSRF_HEADER), value);
            }
        }
        headers
    }

    /// Sends one request and returns the parsed payload. Non-2xx statuses
    /// become `ClientError::Api` carrying the server's `message`/`error`
    /// field when present, a templated message otherwise.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        let method = options.method.unwrap_or(Method::GET);
        let url = self.build_url(path);

        let mut headers = self.default_headers();
        for (name, value) in &options.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = name.as_str(), "skipping malformed header"),
            }
        }

        debug!(%method, %url, "api request");
        let mut req = self.http.request(method, &url).headers(headers);
        if let Some(body) = &options.body {
            req = req.body(body.to_string());
        }

        let resp = req.send().await?;
        let status = resp.status();
        let payload = parse_payload(resp).await?;

        if !status.is_success() {
            let message = error_message(&payload, status);
            warn!(%url, %status, "api request failed");
            return Err(ClientError::Api { status, message });
        }
        Ok(payload)
    }

    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request(path, RequestOptions::default()).await
    }

    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Value, ClientError> {
        let options = RequestOptions {
            method: Some(Method::POST),
            body: Some(serde_json::to_value(body)?),
            headers: Vec::new(),
        };
        self.request(path, options).await
    }
}

/// Declared-JSON responses are parsed as JSON; anything else is read as
/// text and wrapped so callers always get an object-ish payload.
async fn parse_payload(resp: reqwest::Response) -> Result<Value, ClientError> {
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));

    if is_json {
        return Ok(resp.json::<Value>().await?);
    }
    let text = resp.text().await?;
    if text.is_empty() {
        Ok(json!({}))
    } else {
        Ok(json!({ "message": text }))
    }
}

fn error_message(payload: &Value, status: StatusCode) -> String {
    payload
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| payload.get("error").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("server communication error ({})", status.as_u16()))
}
