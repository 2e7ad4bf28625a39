pub mod bucket;
pub mod environment;
pub mod result;
pub mod schedule;
pub mod step;
pub mod team;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope returned by every tool action.
///
/// `result` and `error` are independent: an empty success has neither, and an
/// upstream body may carry both. Advisory lists never change the outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<Vec<String>>,
}

impl ApiResult {
    pub fn success(records: Vec<Value>, total: i64, has_more: bool) -> Self {
        Self {
            result: Some(records),
            total: Some(total),
            has_more: Some(has_more),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn records(&self) -> &[Value] {
        self.result.as_deref().unwrap_or(&[])
    }

    pub fn append_info<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        append_to(&mut self.info, messages);
    }

    pub fn append_warnings<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        append_to(&mut self.warning, messages);
    }

    pub fn append_hints<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        append_to(&mut self.hint, messages);
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()))
    }
}

fn append_to<I, S>(target: &mut Option<Vec<String>>, messages: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let list = target.get_or_insert_with(Vec::new);
    list.extend(messages.into_iter().map(Into::into));
}
