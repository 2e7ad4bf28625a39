use super::{ActionSet, ManagerDeps};
use crate::constants::api::{schedule_endpoint, schedules_create_endpoint, schedules_endpoint};
use crate::constants::schedule::CREATED_NOTE;
use crate::errors::ToolError;
use crate::formatters::format_schedules;
use crate::models::schedule::{CreateSchedule, ScheduleInterval};
use crate::models::ApiResult;
use crate::services::gateway::ApiRequest;
use crate::services::tool_executor::{CallContext, ToolHandler};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    Read,
    Create,
    List,
}

impl ActionSet for ScheduleAction {
    const FAMILY: &'static str = "schedules";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("read", ScheduleAction::Read),
        ("create", ScheduleAction::Create),
        ("list", ScheduleAction::List),
    ];
}

pub struct ScheduleManager {
    deps: ManagerDeps,
}

impl ScheduleManager {
    pub fn new(deps: &ManagerDeps) -> Self {
        Self {
            deps: deps.scoped(ScheduleAction::FAMILY),
        }
    }

    pub async fn read(
        &self,
        bucket_key: &str,
        test_id: &str,
        schedule_id: &str,
    ) -> Result<ApiResult, ToolError> {
        self.deps
            .call(ApiRequest::get(schedule_endpoint(bucket_key, test_id, schedule_id)).formatter(format_schedules))
            .await
    }

    pub async fn list(&self, bucket_key: &str, test_id: &str) -> Result<ApiResult, ToolError> {
        self.deps
            .call(ApiRequest::get(schedules_endpoint(bucket_key, test_id)).formatter(format_schedules))
            .await
    }

    /// An interval outside the supported set fails here, before any request.
    pub async fn create(
        &self,
        bucket_key: &str,
        test_id: &str,
        environment_id: &str,
        interval: &str,
    ) -> Result<ApiResult, ToolError> {
        let interval = match ScheduleInterval::parse(interval) {
            Ok(interval) => interval,
            Err(message) => return Ok(ApiResult::failure(message)),
        };
        let body = CreateSchedule::new(
            environment_id.to_string(),
            interval,
            Some(CREATED_NOTE.to_string()),
        );
        let body = serde_json::to_value(body)
            .map_err(|err| ToolError::internal(format!("Failed to encode schedule: {}", err)))?;
        self.deps
            .call(
                ApiRequest::post(schedules_create_endpoint(bucket_key, test_id))
                    .json(body)
                    .formatter(format_schedules),
            )
            .await
    }
}

#[async_trait]
impl ToolHandler for ScheduleManager {
    fn family(&self) -> &'static str {
        ScheduleAction::FAMILY
    }

    async fn handle(
        &self,
        action: &str,
        args: Value,
        ctx: &CallContext,
    ) -> Result<ApiResult, ToolError> {
        let action = ScheduleAction::parse(action)?;
        self.deps.trace(ctx, action.name());
        let v = &self.deps.validation;
        let bucket_key = v.require_id(&args, "bucket_key")?;
        let test_id = v.require_id(&args, "test_id")?;
        match action {
            ScheduleAction::Read => {
                let schedule_id = v.require_id(&args, "schedule_id")?;
                self.read(&bucket_key, &test_id, &schedule_id).await
            }
            ScheduleAction::Create => {
                let environment_id = v.require_arg(&args, "environment_id")?;
                let interval = v.require_arg(&args, "interval")?;
                self.create(&bucket_key, &test_id, &environment_id, &interval)
                    .await
            }
            ScheduleAction::List => self.list(&bucket_key, &test_id).await,
        }
    }
}
