pub mod config;
pub mod credential;
pub mod gateway;
pub mod logger;
pub mod tool_executor;
pub mod validation;
