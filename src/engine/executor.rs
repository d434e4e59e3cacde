//! Command executor
//!
//! Runs parsed commands against a [`Registry`]. Mutating commands answer with
//! the warehouse they touched; any command naming an unknown warehouse falls
//! back to the listing instead of failing.

use serde::{Deserialize, Serialize};

use crate::container::{Entry, Registry};
use crate::engine::usage::{usage_percent, UsageLevel, DEFAULT_ALMOST_FULL};
use crate::error::{Result, StockpileError};
use crate::output::OutputFormat;
use crate::parser::{Command, CreateWarehouse, EditWarehouse, Transfer};

pub const DEFAULT_NAME: &str = "Unnamed";
pub const DEFAULT_CAPACITY: f64 = 100.0;
pub const DEFAULT_BALANCE: f64 = 0.0;
pub const DEFAULT_AMOUNT: f64 = 0.0;

/// Values used for fields a command leaves out
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub name: String,
    pub capacity: f64,
    pub initial_balance: f64,
    pub amount: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            capacity: DEFAULT_CAPACITY,
            initial_balance: DEFAULT_BALANCE,
            amount: DEFAULT_AMOUNT,
        }
    }
}

/// Execution context containing runtime configuration
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub output_format: OutputFormat,
    pub verbose: bool,
    pub defaults: Defaults,
    /// Usage percentage at or above which a warehouse is labelled almost full
    pub almost_full: f64,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            verbose: false,
            defaults: Defaults::default(),
            almost_full: DEFAULT_ALMOST_FULL,
        }
    }
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub data: ResultData,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ResultData {
    /// All warehouses
    Listing(Vec<WarehouseInfo>),
    /// A single warehouse
    Warehouse(WarehouseInfo),
    Explanation(String),
}

/// Display snapshot of one warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseInfo {
    pub id: u64,
    pub name: String,
    pub balance: f64,
    pub capacity: f64,
    pub free_space: f64,
    pub usage_percent: f64,
    pub level: UsageLevel,
    pub created_at: String,
}

impl WarehouseInfo {
    pub fn from_entry(id: u64, entry: &Entry, almost_full: f64) -> Self {
        let container = &entry.container;
        Self {
            id,
            name: entry.name.clone(),
            balance: container.balance(),
            capacity: container.capacity(),
            free_space: container.free_space(),
            usage_percent: usage_percent(container),
            level: UsageLevel::classify(container, almost_full),
            created_at: entry.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }
}

/// Execute a parsed command against the registry
pub fn execute_command(
    cmd: &Command,
    ctx: &ExecutionContext,
    registry: &mut Registry,
) -> Result<ExecutionResult> {
    match cmd {
        Command::List => Ok(listing(registry, ctx, None)),
        Command::Show(id) => execute_show(*id, ctx, registry),
        Command::Create(create) => execute_create(create, ctx, registry),
        Command::Edit(edit) => execute_edit(edit, ctx, registry),
        Command::Add(transfer) => execute_add(transfer, ctx, registry),
        Command::Take(transfer) => execute_take(transfer, ctx, registry),
        Command::Delete(id) => execute_delete(*id, ctx, registry),
        Command::Explain(inner) => execute_explain(inner, ctx),
    }
}

fn execute_show(id: u64, ctx: &ExecutionContext, registry: &mut Registry) -> Result<ExecutionResult> {
    match registry.get(id) {
        Ok(entry) => Ok(warehouse(id, entry, ctx, None)),
        Err(e) => fall_back_to_listing(e, registry, ctx),
    }
}

fn execute_create(
    create: &CreateWarehouse,
    ctx: &ExecutionContext,
    registry: &mut Registry,
) -> Result<ExecutionResult> {
    let defaults = &ctx.defaults;
    let name = create.name.clone().unwrap_or_else(|| defaults.name.clone());
    let capacity = create.capacity.unwrap_or(defaults.capacity);
    let initial_balance = create.initial_balance.unwrap_or(defaults.initial_balance);

    let id = registry.create(name, capacity, initial_balance);
    let entry = registry.get(id)?;
    let message = format!("Created warehouse '{}' with id {}", entry.name, id);
    Ok(warehouse(id, entry, ctx, Some(message)))
}

fn execute_edit(
    edit: &EditWarehouse,
    ctx: &ExecutionContext,
    registry: &mut Registry,
) -> Result<ExecutionResult> {
    if let Some(ref name) = edit.name {
        if let Err(e) = registry.rename(edit.id, name.clone()) {
            return fall_back_to_listing(e, registry, ctx);
        }
    }

    match registry.get_mut(edit.id) {
        Ok(entry) => {
            let capacity = edit.capacity.unwrap_or(entry.container.capacity());
            entry.container.resize(capacity);
            let message = format!("Updated warehouse '{}'", entry.name);
            Ok(warehouse(edit.id, entry, ctx, Some(message)))
        }
        Err(e) => fall_back_to_listing(e, registry, ctx),
    }
}

fn execute_add(
    transfer: &Transfer,
    ctx: &ExecutionContext,
    registry: &mut Registry,
) -> Result<ExecutionResult> {
    let amount = transfer.amount.unwrap_or(ctx.defaults.amount);

    match registry.get_mut(transfer.id) {
        Ok(entry) => {
            let before = entry.container.balance();
            entry.container.add(amount);
            let message = format!(
                "Added {:.1} of {:.1} to '{}'",
                entry.container.balance() - before,
                amount,
                entry.name
            );
            Ok(warehouse(transfer.id, entry, ctx, Some(message)))
        }
        Err(e) => fall_back_to_listing(e, registry, ctx),
    }
}

fn execute_take(
    transfer: &Transfer,
    ctx: &ExecutionContext,
    registry: &mut Registry,
) -> Result<ExecutionResult> {
    let amount = transfer.amount.unwrap_or(ctx.defaults.amount);

    match registry.get_mut(transfer.id) {
        Ok(entry) => {
            let before = entry.container.balance();
            entry.container.remove(amount);
            let message = format!(
                "Took {:.1} of {:.1} from '{}'",
                before - entry.container.balance(),
                amount,
                entry.name
            );
            Ok(warehouse(transfer.id, entry, ctx, Some(message)))
        }
        Err(e) => fall_back_to_listing(e, registry, ctx),
    }
}

fn execute_delete(id: u64, ctx: &ExecutionContext, registry: &mut Registry) -> Result<ExecutionResult> {
    let message = match registry.get(id) {
        Ok(entry) => format!("Deleted warehouse '{}'", entry.name),
        Err(_) => format!("Warehouse {} not found", id),
    };
    registry.remove(id);
    Ok(listing(registry, ctx, Some(message)))
}

fn execute_explain(cmd: &Command, ctx: &ExecutionContext) -> Result<ExecutionResult> {
    Ok(ExecutionResult {
        data: ResultData::Explanation(format!("EXPLAIN: {}", explain_command(cmd, ctx))),
        message: None,
    })
}

/// Describe what a command would do, with defaults filled in
pub fn explain_command(cmd: &Command, ctx: &ExecutionContext) -> String {
    let defaults = &ctx.defaults;
    match cmd {
        Command::List => "Would list all warehouses".to_string(),
        Command::Show(id) => format!("Would show warehouse {}", id),
        Command::Create(c) => format!(
            "Would create warehouse '{}' with capacity {} and balance {}",
            c.name.as_deref().unwrap_or(&defaults.name),
            c.capacity.unwrap_or(defaults.capacity),
            c.initial_balance.unwrap_or(defaults.initial_balance)
        ),
        Command::Edit(e) => {
            let mut changes = Vec::new();
            if let Some(ref name) = e.name {
                changes.push(format!("rename it to '{}'", name));
            }
            if let Some(capacity) = e.capacity {
                changes.push(format!("set its capacity to {}", capacity));
            }
            if changes.is_empty() {
                changes.push("leave it unchanged".to_string());
            }
            format!("Would edit warehouse {} and {}", e.id, changes.join(" and "))
        }
        Command::Add(t) => format!(
            "Would add {} to warehouse {}, up to its capacity",
            t.amount.unwrap_or(defaults.amount),
            t.id
        ),
        Command::Take(t) => format!(
            "Would take {} from warehouse {}, down to zero",
            t.amount.unwrap_or(defaults.amount),
            t.id
        ),
        Command::Delete(id) => format!("Would delete warehouse {}", id),
        Command::Explain(inner) => explain_command(inner, ctx),
    }
}

fn warehouse(id: u64, entry: &Entry, ctx: &ExecutionContext, message: Option<String>) -> ExecutionResult {
    ExecutionResult {
        data: ResultData::Warehouse(WarehouseInfo::from_entry(id, entry, ctx.almost_full)),
        message,
    }
}

fn listing(registry: &Registry, ctx: &ExecutionContext, message: Option<String>) -> ExecutionResult {
    let warehouses = registry
        .list()
        .into_iter()
        .map(|(id, entry)| WarehouseInfo::from_entry(id, entry, ctx.almost_full))
        .collect();

    ExecutionResult {
        data: ResultData::Listing(warehouses),
        message,
    }
}

/// An unknown warehouse sends the caller back to the listing
fn fall_back_to_listing(
    err: StockpileError,
    registry: &Registry,
    ctx: &ExecutionContext,
) -> Result<ExecutionResult> {
    match err {
        StockpileError::NotFound(id) => {
            tracing::debug!(id, "unknown warehouse, showing listing");
            Ok(listing(registry, ctx, Some(format!("Warehouse {} not found", id))))
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_command;

    fn run(cmd: &str, registry: &mut Registry) -> ExecutionResult {
        let cmd = parse_command(cmd).unwrap();
        execute_command(&cmd, &ExecutionContext::default(), registry).unwrap()
    }

    fn expect_warehouse(result: &ExecutionResult) -> &WarehouseInfo {
        match &result.data {
            ResultData::Warehouse(info) => info,
            other => panic!("Expected warehouse view, got {:?}", other),
        }
    }

    fn expect_listing(result: &ExecutionResult) -> &[WarehouseInfo] {
        match &result.data {
            ResultData::Listing(list) => list,
            other => panic!("Expected listing, got {:?}", other),
        }
    }

    #[test]
    fn test_list_empty() {
        let mut registry = Registry::new();
        let result = run("LIST", &mut registry);
        assert!(expect_listing(&result).is_empty());
    }

    #[test]
    fn test_create() {
        let mut registry = Registry::new();
        let result = run(r#"CREATE "Test Warehouse" CAPACITY 100 BALANCE 50"#, &mut registry);
        let info = expect_warehouse(&result);
        assert_eq!(info.id, 1);
        assert_eq!(info.name, "Test Warehouse");
        assert_eq!(info.capacity, 100.0);
        assert_eq!(info.balance, 50.0);
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_create_uses_defaults() {
        let mut registry = Registry::new();
        let result = run("CREATE", &mut registry);
        let info = expect_warehouse(&result);
        assert_eq!(info.name, "Unnamed");
        assert_eq!(info.capacity, 100.0);
        assert_eq!(info.balance, 0.0);
        assert_eq!(info.level, UsageLevel::Empty);
    }

    #[test]
    fn test_create_uses_configured_defaults() {
        let mut registry = Registry::new();
        let ctx = ExecutionContext {
            defaults: Defaults {
                name: "Depot".to_string(),
                capacity: 40.0,
                initial_balance: 10.0,
                amount: 5.0,
            },
            ..ExecutionContext::default()
        };

        let create = parse_command("CREATE").unwrap();
        execute_command(&create, &ctx, &mut registry).unwrap();
        let add = parse_command("ADD TO 1").unwrap();
        let result = execute_command(&add, &ctx, &mut registry).unwrap();

        let info = expect_warehouse(&result);
        assert_eq!(info.name, "Depot");
        assert_eq!(info.capacity, 40.0);
        assert_eq!(info.balance, 15.0);
    }

    #[test]
    fn test_show() {
        let mut registry = Registry::new();
        run(r#"CREATE "My Warehouse" CAPACITY 200 BALANCE 75"#, &mut registry);
        let result = run("SHOW 1", &mut registry);
        let info = expect_warehouse(&result);
        assert_eq!(info.name, "My Warehouse");
        assert_eq!(info.balance, 75.0);
        assert_eq!(info.capacity, 200.0);
        assert!(result.message.is_none());
    }

    #[test]
    fn test_show_not_found_falls_back_to_listing() {
        let mut registry = Registry::new();
        let result = run("SHOW 999", &mut registry);
        assert!(expect_listing(&result).is_empty());
        assert_eq!(result.message.as_deref(), Some("Warehouse 999 not found"));
    }

    #[test]
    fn test_edit() {
        let mut registry = Registry::new();
        run(r#"CREATE "Original Name" CAPACITY 100 BALANCE 30"#, &mut registry);
        let result = run(r#"EDIT 1 NAME "Updated Name" CAPACITY 150"#, &mut registry);
        let info = expect_warehouse(&result);
        assert_eq!(info.name, "Updated Name");
        assert_eq!(info.capacity, 150.0);
        assert_eq!(info.balance, 30.0);
    }

    #[test]
    fn test_edit_reduces_capacity_below_balance() {
        let mut registry = Registry::new();
        run(r#"CREATE "Reduce Test" CAPACITY 100 BALANCE 80"#, &mut registry);
        run(r#"EDIT 1 NAME "Reduce Test" CAPACITY 50"#, &mut registry);
        let container = registry.get(1).unwrap().container;
        assert_eq!(container.balance(), 50.0);
        assert_eq!(container.capacity(), 50.0);
    }

    #[test]
    fn test_edit_without_capacity_keeps_it() {
        let mut registry = Registry::new();
        run(r#"CREATE "Keep" CAPACITY 120 BALANCE 10"#, &mut registry);
        run(r#"EDIT 1 NAME "Kept""#, &mut registry);
        let entry = registry.get(1).unwrap();
        assert_eq!(entry.name, "Kept");
        assert_eq!(entry.container.capacity(), 120.0);
    }

    #[test]
    fn test_edit_trims_overfull_warehouse() {
        let mut registry = Registry::new();
        run("CREATE CAPACITY 10 BALANCE 25", &mut registry);
        assert_eq!(registry.get(1).unwrap().container.balance(), 25.0);

        run(r#"EDIT 1 NAME "Trimmed""#, &mut registry);
        assert_eq!(registry.get(1).unwrap().container.balance(), 10.0);
    }

    #[test]
    fn test_edit_not_found() {
        let mut registry = Registry::new();
        let result = run(r#"EDIT 999 NAME "x""#, &mut registry);
        expect_listing(&result);
    }

    #[test]
    fn test_add_and_take() {
        let mut registry = Registry::new();
        run(r#"CREATE "Add Test" CAPACITY 100 BALANCE 20"#, &mut registry);
        let result = run("ADD 30 TO 1", &mut registry);
        assert_eq!(expect_warehouse(&result).balance, 50.0);

        let result = run("TAKE 20 FROM 1", &mut registry);
        assert_eq!(expect_warehouse(&result).balance, 30.0);
    }

    #[test]
    fn test_add_reports_clamped_amount() {
        let mut registry = Registry::new();
        run("CREATE CAPACITY 100 BALANCE 80", &mut registry);
        let result = run("ADD 50 TO 1", &mut registry);
        assert_eq!(expect_warehouse(&result).balance, 100.0);
        assert_eq!(result.message.as_deref(), Some("Added 20.0 of 50.0 to 'Unnamed'"));
    }

    #[test]
    fn test_add_and_take_not_found() {
        let mut registry = Registry::new();
        expect_listing(&run("ADD 10 TO 999", &mut registry));
        expect_listing(&run("TAKE 10 FROM 999", &mut registry));
    }

    #[test]
    fn test_delete() {
        let mut registry = Registry::new();
        run(r#"CREATE "Delete Test""#, &mut registry);
        let result = run("DELETE 1", &mut registry);
        assert!(expect_listing(&result).is_empty());
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_delete_not_found() {
        let mut registry = Registry::new();
        run(r#"CREATE "Stay""#, &mut registry);
        let result = run("DELETE 999", &mut registry);
        assert_eq!(expect_listing(&result).len(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut registry = Registry::new();
        for _ in 0..3 {
            run("CREATE", &mut registry);
        }
        run("DELETE 2", &mut registry);
        let result = run("CREATE", &mut registry);
        assert_eq!(expect_warehouse(&result).id, 4);
    }

    #[test]
    fn test_usage_label() {
        let mut registry = Registry::new();
        run(r#"CREATE "Usage Test" CAPACITY 100 BALANCE 90"#, &mut registry);
        let result = run("SHOW 1", &mut registry);
        let info = expect_warehouse(&result);
        assert_eq!(info.usage_percent, 90.0);
        assert_eq!(info.level, UsageLevel::AlmostFull);
    }

    #[test]
    fn test_explain_command_fills_defaults() {
        let ctx = ExecutionContext::default();
        let cmd = parse_command("CREATE CAPACITY 40").unwrap();
        assert_eq!(
            explain_command(&cmd, &ctx),
            "Would create warehouse 'Unnamed' with capacity 40 and balance 0"
        );
        let cmd = parse_command("TAKE FROM 2").unwrap();
        assert_eq!(explain_command(&cmd, &ctx), "Would take 0 from warehouse 2, down to zero");
    }

    #[test]
    fn test_explain_does_not_execute() {
        let mut registry = Registry::new();
        let result = run(r#"EXPLAIN CREATE "Ghost""#, &mut registry);
        match result.data {
            ResultData::Explanation(text) => assert!(text.contains("Ghost")),
            other => panic!("Expected explanation, got {:?}", other),
        }
        assert!(registry.is_empty());
    }
}
