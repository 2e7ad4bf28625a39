use serde::{Deserialize, Serialize};

/// Member of a team, as returned by the team people endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamUser {
    #[serde(alias = "id")]
    pub user_id: String,
    pub name: String,
    pub email: String,
}

/// Team entry inside an account listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountTeam {
    #[serde(alias = "id")]
    pub team_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<TeamUser>,
    /// Set by the formatter from the wire `flags` list.
    #[serde(default)]
    pub ai_consent: bool,
}

/// The identity behind the credential, with every team it can reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(alias = "id")]
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<AccountTeam>>,
}
