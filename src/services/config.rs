use crate::constants::env::BASE_URL;
use crate::constants::network::DEFAULT_BASE_URL;
use crate::errors::ToolError;
use crate::services::credential::{resolve_credential, Credential};
use crate::services::logger::Logger;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: url::Url,
    pub credential: Option<Credential>,
}

impl AppConfig {
    pub fn new(base_url: &str, credential: Option<Credential>) -> Result<Self, ToolError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            credential,
        })
    }

    pub fn from_env(logger: &Logger) -> Result<Self, ToolError> {
        let base_url = std::env::var(BASE_URL)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let credential = resolve_credential(logger);
        if credential.is_none() {
            logger.warn("No API token configured; every tool call will report it", None);
        }
        Self::new(&base_url, credential)
    }
}

/// Base URLs always end with `/` so relative endpoints join under them.
fn parse_base_url(raw: &str) -> Result<url::Url, ToolError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let parsed = url::Url::parse(&normalized).map_err(|err| {
        ToolError::invalid_params(format!("{} is not a valid URL: {}", BASE_URL, err))
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ToolError::invalid_params(format!(
            "{} must be an http(s) URL",
            BASE_URL
        )));
    }
    Ok(parsed)
}
