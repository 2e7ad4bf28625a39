use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipients: Option<Vec<Value>>,
}

/// Test environment. Authentication details never leave the core: the
/// formatter reduces them to `is_auth_enabled`, `auth_type` and
/// `is_client_certificate_used`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(alias = "id")]
    pub environment_id: String,
    pub test_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_variables: Option<BTreeMap<String, String>>,
    /// Retry once on failure when the run came from a schedule.
    pub retry_on_failure: bool,
    /// Runs before the first step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhooks: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrations: Option<Vec<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<EmailSettings>,
    pub preserve_cookies: bool,
    pub stop_on_failure: bool,
    pub verify_ssl: bool,
    pub http_version_support: String,
    pub force_h2c: bool,
    pub regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_agents: Option<Vec<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_request_scripts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_response_scripts: Option<Vec<String>>,
    #[serde(default)]
    pub is_client_certificate_used: bool,
    #[serde(default)]
    pub is_auth_enabled: bool,
    /// `basic`, `oauth1`, `oauth2` or `client_certificate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
}
