use super::{ActionSet, ManagerDeps};
use crate::constants::api::{team_people_endpoint, ACCOUNT_ENDPOINT};
use crate::errors::ToolError;
use crate::formatters::{format_accounts, format_team_users};
use crate::models::ApiResult;
use crate::services::gateway::ApiRequest;
use crate::services::tool_executor::{CallContext, ToolHandler};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamAction {
    List,
    GetTeamUsers,
}

impl ActionSet for TeamAction {
    const FAMILY: &'static str = "teams";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("list", TeamAction::List),
        ("get_team_users", TeamAction::GetTeamUsers),
    ];
}

pub struct TeamManager {
    deps: ManagerDeps,
}

impl TeamManager {
    pub fn new(deps: &ManagerDeps) -> Self {
        Self {
            deps: deps.scoped(TeamAction::FAMILY),
        }
    }

    /// The account behind the credential, with every team it can reach.
    pub async fn list(&self) -> Result<ApiResult, ToolError> {
        self.deps
            .call(
                ApiRequest::get(ACCOUNT_ENDPOINT)
                    .query("include_owner", "true")
                    .formatter(format_accounts),
            )
            .await
    }

    pub async fn get_team_users(&self, team_id: &str) -> Result<ApiResult, ToolError> {
        self.deps
            .call(
                ApiRequest::get(team_people_endpoint(team_id))
                    .formatter(format_team_users),
            )
            .await
    }
}

#[async_trait]
impl ToolHandler for TeamManager {
    fn family(&self) -> &'static str {
        TeamAction::FAMILY
    }

    async fn handle(
        &self,
        action: &str,
        args: Value,
        ctx: &CallContext,
    ) -> Result<ApiResult, ToolError> {
        let action = TeamAction::parse(action)?;
        self.deps.trace(ctx, action.name());
        match action {
            TeamAction::List => self.list().await,
            TeamAction::GetTeamUsers => {
                let team_id = self.deps.validation.require_id(&args, "team_id")?;
                self.get_team_users(&team_id).await
            }
        }
    }
}
