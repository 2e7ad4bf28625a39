use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const REQUEST_STEP_TYPE: &str = "request";
pub const PAUSE_STEP_TYPE: &str = "pause";

/// One step of a test: `request`, `pause`, `conditional`,
/// `conditional-loop`, `subtest` or `inbound`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStep {
    #[serde(alias = "id")]
    pub step_id: String,
    pub step_type: String,
    pub skipped: bool,
    /// Pause steps only, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multipart_form: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_body: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertions: Option<Vec<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<Map<String, Value>>>,
    /// Post-response scripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<String>>,
    /// Pre-request scripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_scripts: Option<Vec<String>>,
    /// Nested steps of conditional and loop steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_value: Option<String>,
    /// Subtest steps only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_key: Option<String>,
}
