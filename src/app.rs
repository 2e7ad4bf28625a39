use crate::constants::tools;
use crate::errors::ToolError;
use crate::managers::bucket::BucketManager;
use crate::managers::environment::EnvironmentManager;
use crate::managers::result::ResultManager;
use crate::managers::schedule::ScheduleManager;
use crate::managers::step::StepManager;
use crate::managers::team::TeamManager;
use crate::managers::test::TestManager;
use crate::managers::ManagerDeps;
use crate::mcp::catalog::tool_catalog;
use crate::services::config::AppConfig;
use crate::services::gateway::Gateway;
use crate::services::logger::Logger;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use std::collections::HashMap;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub tool_executor: Arc<ToolExecutor>,
}

impl App {
    fn validate_tool_wiring(handlers: &HashMap<String, Arc<dyn ToolHandler>>) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !handlers.contains_key(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_hint("Every tool in tool_catalog.json must have a handler.")
            .with_details(serde_json::json!({ "missing_tools": missing })))
    }

    pub fn handlers(deps: &ManagerDeps) -> HashMap<String, Arc<dyn ToolHandler>> {
        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        handlers.insert(tools::TEAMS.to_string(), Arc::new(TeamManager::new(deps)));
        handlers.insert(tools::BUCKETS.to_string(), Arc::new(BucketManager::new(deps)));
        handlers.insert(tools::TESTS.to_string(), Arc::new(TestManager::new(deps)));
        handlers.insert(tools::STEPS.to_string(), Arc::new(StepManager::new(deps)));
        handlers.insert(tools::SCHEDULES.to_string(), Arc::new(ScheduleManager::new(deps)));
        handlers.insert(
            tools::ENVIRONMENTS.to_string(),
            Arc::new(EnvironmentManager::new(deps)),
        );
        handlers.insert(tools::RESULTS.to_string(), Arc::new(ResultManager::new(deps)));
        handlers
    }

    pub fn initialize() -> Result<Self, ToolError> {
        let logger = Logger::new("apitest");
        let config = AppConfig::from_env(&logger)?;
        Self::with_config(logger, config)
    }

    pub fn with_config(logger: Logger, config: AppConfig) -> Result<Self, ToolError> {
        let gateway = Arc::new(Gateway::new(logger.clone(), config.base_url.clone()));
        let deps = ManagerDeps::new(gateway, config.credential, logger.child("managers"));
        let handlers = Self::handlers(&deps);
        Self::validate_tool_wiring(&handlers)?;

        logger.info(
            "initialized",
            Some(&serde_json::json!({
                "base_url": config.base_url.as_str(),
                "tools": handlers.len(),
                "credential": deps.credential.is_some(),
            })),
        );
        let tool_executor = Arc::new(ToolExecutor::new(logger.clone(), handlers));
        Ok(Self {
            logger,
            tool_executor,
        })
    }
}
