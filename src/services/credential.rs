use crate::constants::env::{CONTAINER_SECRET_PATH, TOKEN, TOKEN_FILE};
use crate::services::logger::Logger;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API token must be a non-empty string")]
    Empty,
    #[error("cannot read token file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token file {0} does not contain a token")]
    NoToken(PathBuf),
}

/// Bearer token for the upstream API. Immutable once resolved.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Result<Self, CredentialError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self(token))
    }

    /// Accepts `{"token": "..."}`, `token=...` / `token: ...` lines, or a
    /// file holding nothing but the token.
    pub fn from_file(path: &Path) -> Result<Self, CredentialError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CredentialError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        parse_token_file(&raw)
            .ok_or_else(|| CredentialError::NoToken(path.to_path_buf()))
            .and_then(Self::new)
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

fn parse_token_file(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') {
        let parsed: serde_json::Value = serde_json::from_str(trimmed).ok()?;
        return parsed
            .get("token")
            .or_else(|| parsed.get(TOKEN))
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string());
    }

    let lines: Vec<&str> = trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    for line in &lines {
        let Some((key, value)) = line.split_once('=').or_else(|| line.split_once(':')) else {
            continue;
        };
        let key = key.trim().trim_start_matches("export ").trim();
        if key.eq_ignore_ascii_case("token") || key == TOKEN {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    match lines.as_slice() {
        [single] if !single.contains('=') && !single.contains(char::is_whitespace) => {
            Some(single.to_string())
        }
        _ => None,
    }
}

/// Env token, then env token file, then the container secret. Failures are
/// logged and treated as "no credential"; the first call then reports it.
pub fn resolve_credential(logger: &Logger) -> Option<Credential> {
    if let Ok(raw) = std::env::var(TOKEN) {
        match Credential::new(raw) {
            Ok(credential) => return Some(credential),
            Err(err) => logger.warn(&format!("{} ignored: {}", TOKEN, err), None),
        }
    }

    let mut files: Vec<PathBuf> = Vec::new();
    if let Ok(path) = std::env::var(TOKEN_FILE) {
        if !path.trim().is_empty() {
            files.push(PathBuf::from(path.trim()));
        }
    }
    let secret = PathBuf::from(CONTAINER_SECRET_PATH);
    let include_secret = secret.exists();

    for path in files.iter().chain(include_secret.then_some(&secret)) {
        match Credential::from_file(path) {
            Ok(credential) => {
                logger.debug(
                    "API token loaded from file",
                    Some(&serde_json::json!({"path": path.display().to_string()})),
                );
                return Some(credential);
            }
            Err(err) => logger.warn(&err.to_string(), None),
        }
    }
    None
}
