//! Script runner for executing .stock files

use std::fs;
use std::path::Path;

use crate::container::Registry;
use crate::engine::{execute_command, explain_command, ExecutionContext, ExecutionResult};
use crate::error::{Result, StockpileError};
use crate::output::format_output;
use crate::parser::{parse_script, Script};

/// File extension expected for script files
pub const SCRIPT_EXTENSION: &str = "stock";

/// Result of script execution
#[derive(Debug)]
pub struct ScriptResult {
    /// All results from executed statements
    pub results: Vec<ExecutionResult>,
    /// Total statements executed
    pub statements_executed: usize,
    /// Whether the script completed successfully
    pub success: bool,
    /// Error message if script failed
    pub error: Option<String>,
}

/// Runs scripts against a registry that lives as long as the runner
pub struct ScriptRunner {
    exec_ctx: ExecutionContext,
    registry: Registry,
    /// Print each result as it is produced
    echo: bool,
}

impl ScriptRunner {
    /// Create a new script runner with an empty registry
    pub fn new(exec_ctx: ExecutionContext) -> Self {
        Self {
            exec_ctx,
            registry: Registry::new(),
            echo: true,
        }
    }

    /// Collect results without printing them
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Load and run a script file
    pub fn run_file(&mut self, path: &Path) -> Result<ScriptResult> {
        if path.extension().is_none_or(|e| e != SCRIPT_EXTENSION) {
            return Err(StockpileError::ExecutionError(format!(
                "Script file must have .{} extension: {}",
                SCRIPT_EXTENSION,
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let script = parse_script(&content)?;
        tracing::debug!(path = %path.display(), statements = script.statements.len(), "running script");

        self.run_script(&script)
    }

    /// Parse and run statements given inline
    pub fn run_source(&mut self, source: &str) -> Result<ScriptResult> {
        let script = parse_script(source)?;
        self.run_script(&script)
    }

    /// Run a parsed script
    pub fn run_script(&mut self, script: &Script) -> Result<ScriptResult> {
        let mut results = Vec::new();
        let mut statements_executed = 0;

        for cmd in &script.statements {
            match execute_command(cmd, &self.exec_ctx, &mut self.registry) {
                Ok(result) => {
                    statements_executed += 1;

                    if self.echo {
                        println!("{}\n", format_output(&result, &self.exec_ctx.output_format));
                    }

                    results.push(result);
                }
                Err(e) => {
                    return Ok(ScriptResult {
                        results,
                        statements_executed,
                        success: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(ScriptResult {
            results,
            statements_executed,
            success: true,
            error: None,
        })
    }

    /// The registry the script has been running against
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Explain a script without executing
pub fn explain_script(script: &Script, ctx: &ExecutionContext) -> Vec<String> {
    script
        .statements
        .iter()
        .enumerate()
        .map(|(i, cmd)| format!("{}. {}: {}", i + 1, cmd, explain_command(cmd, ctx)))
        .collect()
}
