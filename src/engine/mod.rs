//! Execution engine for warehouse commands

pub mod executor;
pub mod usage;

pub use executor::{execute_command, explain_command, Defaults, ExecutionContext, ExecutionResult, ResultData, WarehouseInfo};
pub use usage::{usage_percent, UsageLevel};
