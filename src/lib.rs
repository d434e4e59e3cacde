//! Stockpile - bounded-capacity warehouse accounting
//!
//! Each warehouse holds a balance that never drops below zero or rises above
//! its capacity. A [`Registry`] keeps warehouses under ids that are never
//! reused, and a small command language drives it from scripts, the command
//! line, or an interactive REPL.
//!
//! # Example
//!
//! ```
//! use stockpile::{parse_command, execute_command, ExecutionContext, Registry};
//!
//! let mut registry = Registry::new();
//! let ctx = ExecutionContext::default();
//! let cmd = parse_command(r#"CREATE "North" CAPACITY 100 BALANCE 50"#).unwrap();
//! execute_command(&cmd, &ctx, &mut registry).unwrap();
//!
//! let north = registry.get(1).unwrap();
//! assert_eq!(north.container.balance(), 50.0);
//! ```

pub mod cli;
pub mod container;
pub mod engine;
pub mod error;
pub mod output;
pub mod parser;
pub mod repl;
pub mod script;

pub use container::{Container, Entry, Registry};
pub use engine::{execute_command, ExecutionContext, ExecutionResult};
pub use error::{Result, StockpileError};
pub use output::{format_output, OutputFormat};
pub use parser::{parse_command, parse_script, Command, Script};
pub use script::{ScriptResult, ScriptRunner};
