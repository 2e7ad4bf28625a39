use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketTeam {
    #[serde(alias = "id")]
    pub team_id: String,
    pub name: String,
}

/// Named collection of tests owned by a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(alias = "key")]
    pub bucket_key: String,
    pub name: String,
    /// Unix timestamp.
    pub created_at: f64,
    /// Whether this is the team's default bucket.
    pub default: bool,
    pub is_private: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_uuid: Option<String>,
    #[serde(default)]
    pub tests_count: i64,
    /// Starts a bucket-level run of every test in the bucket.
    pub trigger_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<BucketTeam>,
}
