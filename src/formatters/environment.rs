use super::format_as;
use crate::errors::ToolError;
use crate::models::environment::Environment;
use serde_json::{Map, Value};

const CLIENT_CERTIFICATE: &str = "client_certificate";

/// Credentials and certificates are reduced to flags before validation, so
/// no secret material survives formatting.
pub fn format_environments(
    records: Vec<Value>,
    _params: Option<&Value>,
) -> Result<Vec<Value>, ToolError> {
    let records = records
        .into_iter()
        .map(|record| match record {
            Value::Object(map) => Value::Object(redact_auth(map)),
            other => other,
        })
        .collect();
    format_as::<Environment>("environment", records)
}

fn redact_auth(mut env: Map<String, Value>) -> Map<String, Value> {
    let auth_type = env
        .get("auth")
        .and_then(|auth| auth.get("auth_type"))
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string);

    let has_certificate = env
        .get(CLIENT_CERTIFICATE)
        .map(|cert| !cert.is_null())
        .unwrap_or(false);
    if has_certificate || auth_type.as_deref() == Some(CLIENT_CERTIFICATE) {
        env.insert("is_client_certificate_used".to_string(), Value::Bool(true));
    }
    env.remove(CLIENT_CERTIFICATE);

    if let Some(auth_type) = auth_type {
        env.insert("is_auth_enabled".to_string(), Value::Bool(true));
        env.insert("auth_type".to_string(), Value::String(auth_type));
    }
    env.remove("auth");
    env
}
