use super::format_as;
use crate::errors::ToolError;
use crate::models::team::{Account, TeamUser};
use serde_json::Value;

const AI_CONSENT_FLAG: &str = "ai_consent";

/// Accounts are listed with their teams; each team's `flags` list collapses
/// into a single `ai_consent` boolean.
pub fn format_accounts(records: Vec<Value>, _params: Option<&Value>) -> Result<Vec<Value>, ToolError> {
    let records = records.into_iter().map(derive_ai_consent).collect();
    format_as::<Account>("account", records)
}

pub fn format_team_users(
    records: Vec<Value>,
    _params: Option<&Value>,
) -> Result<Vec<Value>, ToolError> {
    format_as::<TeamUser>("team user", records)
}

fn derive_ai_consent(mut account: Value) -> Value {
    let Some(teams) = account.get_mut("teams").and_then(Value::as_array_mut) else {
        return account;
    };
    for team in teams.iter_mut().filter_map(Value::as_object_mut) {
        let Some(flags) = team.remove("flags") else {
            continue;
        };
        let consent = flags
            .as_array()
            .map(|list| list.iter().any(|flag| flag.as_str() == Some(AI_CONSENT_FLAG)))
            .unwrap_or(false);
        team.insert("ai_consent".to_string(), Value::Bool(consent));
    }
    account
}
