//! One manager per resource family. Managers build endpoints from their
//! arguments, pick a formatter and hand the request to the gateway; the
//! envelope the gateway returns is passed back untouched.

pub mod bucket;
pub mod environment;
pub mod result;
pub mod schedule;
pub mod step;
pub mod team;

use crate::errors::ToolError;
use crate::models::ApiResult;
use crate::services::credential::Credential;
use crate::services::gateway::{ApiRequest, Gateway};
use crate::services::logger::Logger;
use crate::services::tool_executor::CallContext;
use crate::services::validation::Validation;
use crate::utils::tool_errors::unknown_action_error;
use std::sync::Arc;

/// Closed set of actions a family understands, with the names the tool
/// boundary accepts for them.
pub trait ActionSet: Copy + 'static {
    const FAMILY: &'static str;
    const TABLE: &'static [(&'static str, Self)];

    fn parse(raw: &str) -> Result<Self, ToolError> {
        let trimmed = raw.trim();
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == trimmed)
            .map(|(_, action)| *action)
            .ok_or_else(|| unknown_action_error(Self::FAMILY, raw, &Self::names()))
    }

    fn names() -> Vec<&'static str> {
        Self::TABLE.iter().map(|(name, _)| *name).collect()
    }

    /// First table name bound to this action.
    fn name(self) -> &'static str
    where
        Self: PartialEq,
    {
        Self::TABLE
            .iter()
            .find(|(_, action)| *action == self)
            .map(|(name, _)| *name)
            .unwrap_or(Self::FAMILY)
    }
}

/// What every manager is built from.
#[derive(Clone)]
pub struct ManagerDeps {
    pub gateway: Arc<Gateway>,
    pub credential: Option<Credential>,
    pub validation: Validation,
    pub logger: Logger,
}

impl ManagerDeps {
    pub fn new(gateway: Arc<Gateway>, credential: Option<Credential>, logger: Logger) -> Self {
        Self {
            gateway,
            credential,
            validation: Validation::new(),
            logger,
        }
    }

    pub(crate) fn scoped(&self, family: &str) -> Self {
        Self {
            logger: self.logger.child(family),
            ..self.clone()
        }
    }

    pub(crate) async fn call(&self, request: ApiRequest) -> Result<ApiResult, ToolError> {
        self.gateway.request(self.credential.as_ref(), request).await
    }

    pub(crate) fn trace(&self, ctx: &CallContext, action: &str) {
        self.logger.debug(
            action,
            Some(&serde_json::json!({"trace_id": ctx.trace_id})),
        );
    }
}
