use crate::errors::ToolError;
use crate::utils::suggest::suggest;

/// Typed error for an action string the family does not know, carrying a
/// did-you-mean hint and the full action list.
pub fn unknown_action_error(family: &str, action: &str, known_actions: &[&str]) -> ToolError {
    let suggestions = suggest(action, known_actions, 3);
    let mut hint = Vec::new();
    if !suggestions.is_empty() {
        hint.push(format!("Did you mean: {}?", suggestions.join(", ")));
    }
    hint.push(format!("Use one of: {}.", known_actions.join(", ")));

    ToolError::unknown_action(format!(
        "Action {} not found in {} manager tool",
        action, family
    ))
    .with_hint(hint.join(" "))
    .with_details(serde_json::json!({
        "family": family,
        "action": action,
        "known_actions": known_actions,
        "did_you_mean": suggestions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ToolErrorKind;

    #[test]
    fn names_action_and_family() {
        let err = unknown_action_error("schedules", "craete", &["read", "create", "list"]);
        assert_eq!(err.kind, ToolErrorKind::UnknownAction);
        assert_eq!(err.message, "Action craete not found in schedules manager tool");
        let hint = err.hint.expect("hint");
        assert!(hint.contains("Did you mean: create?"));
        assert!(hint.contains("Use one of: read, create, list."));
    }

    #[test]
    fn hint_lists_actions_without_suggestion() {
        let err = unknown_action_error("teams", "zzzzzzzz", &["list", "get_team_users"]);
        assert_eq!(err.hint.as_deref(), Some("Use one of: list, get_team_users."));
    }
}
