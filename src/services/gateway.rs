//! Single chokepoint for outbound calls to the API monitoring service.

use crate::constants::api::{PRODUCT_NAME, PRODUCT_VERSION};
use crate::constants::env::{CONTAINER_SECRET_PATH, TOKEN, TOKEN_FILE};
use crate::constants::network::{
    ERROR_BODY_EXCERPT_BYTES, TIMEOUT_CONNECT_MS, TIMEOUT_POOL_MS, TIMEOUT_READ_MS,
    TIMEOUT_WRITE_MS,
};
use crate::constants::protocols::ALLOWED_HTTP;
use crate::errors::ToolError;
use crate::formatters::Formatter;
use crate::models::ApiResult;
use crate::services::credential::Credential;
use crate::services::logger::Logger;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid Credentials";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized to perform this action";

pub fn missing_credential_message() -> String {
    format!(
        "No API token configured. Set {} or {}, or mount the secret at {}.",
        TOKEN, TOKEN_FILE, CONTAINER_SECRET_PATH
    )
}

/// `<product>/<version> (<os> <family>; <arch>)`
pub fn user_agent() -> String {
    format!(
        "{}/{} ({} {}; {})",
        PRODUCT_NAME,
        PRODUCT_VERSION,
        std::env::consts::OS,
        std::env::consts::FAMILY,
        std::env::consts::ARCH
    )
}

/// One outbound call, described before it is issued.
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub formatter: Option<Formatter>,
    pub formatter_params: Option<Value>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub hints: Vec<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            formatter: None,
            formatter_params: None,
            query: Vec::new(),
            body: None,
            hints: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn formatter_params(mut self, params: Value) -> Self {
        self.formatter_params = Some(params);
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("formatted", &self.formatter.is_some())
            .field("query", &self.query)
            .finish()
    }
}

/// Upstream body reduced to the envelope's shape, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBody {
    pub records: Vec<Value>,
    pub total: i64,
    pub has_more: bool,
    pub error: Option<String>,
}

pub fn normalize_response(body: &Value) -> NormalizedBody {
    let (records, default_total) = match body.get("data") {
        None | Some(Value::Null) => (Vec::new(), 0),
        Some(Value::Array(items)) => (items.clone(), items.len() as i64),
        Some(single) => (vec![single.clone()], 1),
    };
    let explicit_total = body.get("total").and_then(Value::as_i64);
    let total = explicit_total.unwrap_or(default_total);
    let has_more = match (explicit_total, body.get("limit").and_then(Value::as_i64)) {
        (Some(total), Some(limit)) => {
            let skip = body.get("skip").and_then(Value::as_i64).unwrap_or(0);
            total - (skip + limit) > 0
        }
        _ => false,
    };
    NormalizedBody {
        records,
        total,
        has_more,
        error: upstream_error_message(body),
    }
}

/// `error` as a plain string, or `error.message`.
pub fn upstream_error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| Some(Value::Object(map.clone()).to_string())),
        other => Some(other.to_string()),
    }
}

fn excerpt(text: &str) -> &str {
    if text.len() <= ERROR_BODY_EXCERPT_BYTES {
        return text;
    }
    let mut end = ERROR_BODY_EXCERPT_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

pub struct Gateway {
    logger: Logger,
    base_url: url::Url,
}

impl Gateway {
    pub fn new(logger: Logger, base_url: url::Url) -> Self {
        Self {
            logger: logger.child("gateway"),
            base_url,
        }
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// Trigger URLs arrive absolute and are used as-is; everything else is
    /// an endpoint under the base URL.
    pub fn resolve_url(&self, path: &str) -> Result<url::Url, ToolError> {
        let trimmed = path.trim();
        let resolved = match url::Url::parse(trimmed) {
            Ok(absolute) => absolute,
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .base_url
                .join(trimmed.trim_start_matches('/'))
                .map_err(|err| ToolError::invalid_params(format!("Invalid path '{}': {}", path, err)))?,
            Err(err) => {
                return Err(ToolError::invalid_params(format!(
                    "Invalid URL '{}': {}",
                    path, err
                )))
            }
        };
        if !ALLOWED_HTTP.contains(&resolved.scheme()) {
            return Err(ToolError::invalid_params(format!(
                "Unsupported URL scheme '{}'. Allowed: {}",
                resolved.scheme(),
                ALLOWED_HTTP.join(", ")
            )));
        }
        Ok(resolved)
    }

    /// True when `url` points at a host other than the API base URL's.
    pub fn is_foreign_host(&self, url: &url::Url) -> bool {
        url.host_str() != self.base_url.host_str()
            || url.port_or_known_default() != self.base_url.port_or_known_default()
    }

    /// Connections live only as long as one call.
    fn build_client(&self) -> Result<reqwest::Client, ToolError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let connect = Duration::from_millis(TIMEOUT_CONNECT_MS);
        let read = Duration::from_millis(TIMEOUT_READ_MS);
        let write = Duration::from_millis(TIMEOUT_WRITE_MS);
        reqwest::Client::builder()
            .user_agent(user_agent())
            .default_headers(headers)
            .connect_timeout(connect)
            .read_timeout(read)
            .timeout(connect + write + read)
            .pool_idle_timeout(Duration::from_millis(TIMEOUT_POOL_MS))
            .build()
            .map_err(|err| ToolError::internal(format!("Failed to build HTTP client: {}", err)))
    }

    pub async fn request(
        &self,
        credential: Option<&Credential>,
        request: ApiRequest,
    ) -> Result<ApiResult, ToolError> {
        let Some(credential) = credential else {
            return Ok(ApiResult::failure(missing_credential_message()));
        };
        let url = self.resolve_url(&request.path)?;
        if self.is_foreign_host(&url) {
            self.logger.warn(
                "sending credential to a host outside the API base URL",
                Some(&serde_json::json!({
                    "host": url.host_str(),
                    "base_host": self.base_url.host_str(),
                })),
            );
        }
        let client = self.build_client()?;

        let mut builder = client
            .request(request.method.clone(), url.clone())
            .bearer_auth(credential.token());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        self.logger.debug(
            "upstream call",
            Some(&serde_json::json!({
                "method": request.method.as_str(),
                "path": url.path(),
                "status": status.as_u16(),
                "elapsed_ms": started.elapsed().as_millis() as u64,
            })),
        );

        if status == StatusCode::FORBIDDEN {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| upstream_error_message(&body))
                .unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string());
            return Ok(ApiResult::failure(message));
        }
        if status == StatusCode::UNAUTHORIZED {
            return Ok(ApiResult::failure(UNAUTHORIZED_MESSAGE));
        }
        if !status.is_success() {
            self.logger.warn(
                "upstream error status",
                Some(&serde_json::json!({"status": status.as_u16(), "path": url.path()})),
            );
            return Err(ToolError::upstream(
                status.as_u16(),
                format!(
                    "{} {} returned {}: {}",
                    request.method,
                    url.path(),
                    status,
                    excerpt(text.trim())
                ),
            )
            .with_details(serde_json::json!({"status": status.as_u16(), "url": url.as_str()})));
        }

        let body: Value = if text.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(&text).map_err(|err| {
                ToolError::validation(format!(
                    "Upstream returned a non-JSON body for {}: {}",
                    url.path(),
                    err
                ))
            })?
        };

        let normalized = normalize_response(&body);
        let records = match request.formatter {
            Some(apply) => apply(normalized.records, request.formatter_params.as_ref())?,
            None => normalized.records,
        };
        let mut result = ApiResult::success(records, normalized.total, normalized.has_more);
        result.error = normalized.error;
        if !request.hints.is_empty() {
            result.append_hints(request.hints);
        }
        Ok(result)
    }
}
