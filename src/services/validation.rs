use crate::constants::protocols::ALLOWED_HTTP;
use crate::errors::ToolError;
use serde_json::{Map, Value};

/// Methods a request step may use.
pub const STEP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

#[derive(Clone)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_string(&self, value: &Value, label: &str, trim: bool) -> Result<String, ToolError> {
        let text = value.as_str().ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be a non-empty string", label))
        })?;
        let normalized = text.trim();
        if normalized.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(if trim {
            normalized.to_string()
        } else {
            text.to_string()
        })
    }

    pub fn ensure_optional_string(
        &self,
        value: Option<&Value>,
        label: &str,
        trim: bool,
    ) -> Result<Option<String>, ToolError> {
        match value {
            None => Ok(None),
            Some(val) if val.is_null() => Ok(None),
            Some(val) => self.ensure_string(val, label, trim).map(Some),
        }
    }

    /// Required string argument `key` of `args`.
    pub fn require_arg(&self, args: &Value, key: &str) -> Result<String, ToolError> {
        let value = args
            .get(key)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ToolError::invalid_params(format!("{} is required", key)))?;
        self.ensure_string(value, key, true)
    }

    /// Required id that becomes a URL path segment. Dot segments are
    /// rejected since URL resolution would collapse them.
    pub fn require_id(&self, args: &Value, key: &str) -> Result<String, ToolError> {
        let id = self.require_arg(args, key)?;
        let decoded = id.replace("%2e", ".").replace("%2E", ".");
        if decoded.chars().all(|c| c == '.') {
            return Err(ToolError::invalid_params(format!(
                "{} must not be a dot path segment",
                key
            )));
        }
        Ok(id)
    }

    pub fn optional_arg(&self, args: &Value, key: &str) -> Result<Option<String>, ToolError> {
        self.ensure_optional_string(args.get(key), key, true)
    }

    fn ensure_integer(&self, value: &Value, label: &str) -> Result<i64, ToolError> {
        value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
            .ok_or_else(|| ToolError::invalid_params(format!("{} must be an integer", label)))
    }

    pub fn ensure_positive_int(&self, value: Option<&Value>, label: &str) -> Result<i64, ToolError> {
        let value = value
            .filter(|v| !v.is_null())
            .ok_or_else(|| ToolError::invalid_params(format!("{} is required", label)))?;
        let numeric = self
            .ensure_integer(value, label)
            .map_err(|_| ToolError::invalid_params(format!("{} must be a positive integer", label)))?;
        if numeric < 1 {
            return Err(ToolError::invalid_params(format!(
                "{} must be a positive integer",
                label
            )));
        }
        Ok(numeric)
    }

    pub fn ensure_int_in_range(
        &self,
        value: Option<&Value>,
        label: &str,
        fallback: i64,
        min: i64,
        max: i64,
    ) -> Result<i64, ToolError> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(fallback);
        };
        let numeric = self.ensure_integer(value, label)?;
        if numeric < min || numeric > max {
            return Err(ToolError::invalid_params(format!(
                "{} must be an integer between {} and {}",
                label, min, max
            )));
        }
        Ok(numeric)
    }

    pub fn ensure_non_negative_int(
        &self,
        value: Option<&Value>,
        label: &str,
        fallback: i64,
    ) -> Result<i64, ToolError> {
        self.ensure_int_in_range(value, label, fallback, 0, i64::MAX)
            .map_err(|_| ToolError::invalid_params(format!("{} must be a non-negative integer", label)))
    }

    pub fn ensure_one_of(
        &self,
        value: &str,
        label: &str,
        allowed: &[&'static str],
    ) -> Result<&'static str, ToolError> {
        allowed
            .iter()
            .copied()
            .find(|candidate| candidate.eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                ToolError::invalid_params(format!(
                    "{} must be one of: {}",
                    label,
                    allowed.join(", ")
                ))
            })
    }

    /// Absolute http(s) URL. `{{variable}}` placeholders are accepted in
    /// place of the scheme and host.
    pub fn ensure_step_url(&self, value: &str) -> Result<String, ToolError> {
        let trimmed = value.trim();
        if trimmed.starts_with("{{") {
            return Ok(trimmed.to_string());
        }
        let parsed = url::Url::parse(trimmed).map_err(|_| {
            ToolError::invalid_params(format!(
                "url must be an absolute http(s) URL or start with a {{{{variable}}}}, got '{}'",
                value
            ))
        })?;
        if !ALLOWED_HTTP.contains(&parsed.scheme()) || !parsed.has_host() {
            return Err(ToolError::invalid_params(format!(
                "url must use one of: {}",
                ALLOWED_HTTP.join(", ")
            )));
        }
        Ok(trimmed.to_string())
    }

    pub fn ensure_object(&self, value: &Value, label: &str) -> Result<Map<String, Value>, ToolError> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| ToolError::invalid_params(format!("{} must be an object", label)))
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_arg_rejects_missing_and_blank() {
        let v = Validation::new();
        assert_eq!(v.require_arg(&json!({"bucket_key": " b1 "}), "bucket_key").unwrap(), "b1");
        let missing = v.require_arg(&json!({}), "bucket_key").unwrap_err();
        assert_eq!(missing.message, "bucket_key is required");
        assert!(v.require_arg(&json!({"bucket_key": "  "}), "bucket_key").is_err());
        assert!(v.require_arg(&json!({"bucket_key": 7}), "bucket_key").is_err());
    }

    #[test]
    fn path_ids_reject_dot_segments() {
        let v = Validation::new();
        for id in ["..", ".", "%2e%2E", ".%2e"] {
            let err = v.require_id(&json!({ "step_id": id }), "step_id").unwrap_err();
            assert_eq!(err.message, "step_id must not be a dot path segment", "{}", id);
        }
        assert_eq!(v.require_id(&json!({"step_id": "st.1"}), "step_id").unwrap(), "st.1");
        assert_eq!(
            v.require_id(&json!({"step_id": "../account"}), "step_id").unwrap(),
            "../account"
        );
    }

    #[test]
    fn range_uses_fallback_and_bounds() {
        let v = Validation::new();
        assert_eq!(v.ensure_int_in_range(None, "limit", 10, 1, 50).unwrap(), 10);
        assert_eq!(v.ensure_int_in_range(Some(&json!("25")), "limit", 10, 1, 50).unwrap(), 25);
        let err = v.ensure_int_in_range(Some(&json!(51)), "limit", 10, 1, 50).unwrap_err();
        assert_eq!(err.message, "limit must be an integer between 1 and 50");
        assert!(v.ensure_int_in_range(Some(&json!(0)), "limit", 10, 1, 50).is_err());
    }

    #[test]
    fn positive_int_rejects_zero_fraction_and_text() {
        let v = Validation::new();
        assert_eq!(v.ensure_positive_int(Some(&json!(3)), "duration").unwrap(), 3);
        assert!(v.ensure_positive_int(Some(&json!(0)), "duration").is_err());
        assert!(v.ensure_positive_int(Some(&json!(1.5)), "duration").is_err());
        assert!(v.ensure_positive_int(Some(&json!("soon")), "duration").is_err());
        assert!(v.ensure_positive_int(None, "duration").is_err());
    }

    #[test]
    fn one_of_normalizes_case() {
        let v = Validation::new();
        assert_eq!(v.ensure_one_of("post", "method", STEP_METHODS).unwrap(), "POST");
        assert!(v.ensure_one_of("FETCH", "method", STEP_METHODS).is_err());
    }

    #[test]
    fn step_url_accepts_http_and_templates() {
        let v = Validation::new();
        assert!(v.ensure_step_url("https://api.example.com/v1/users").is_ok());
        assert!(v.ensure_step_url("{{base_url}}/users").is_ok());
        assert!(v.ensure_step_url("ftp://files.example.com").is_err());
        assert!(v.ensure_step_url("/relative/path").is_err());
    }
}
