//! CLI argument parsing

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::executor::{
    Defaults, ExecutionContext, DEFAULT_AMOUNT, DEFAULT_BALANCE, DEFAULT_CAPACITY, DEFAULT_NAME,
};
use crate::engine::usage::DEFAULT_ALMOST_FULL;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "stockpile")]
#[command(author, version, about = "Keep track of bounded-capacity warehouses", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub defaults: DefaultArgs,
}

/// Values used when a command leaves a field out
#[derive(ClapArgs, Debug, Clone)]
pub struct DefaultArgs {
    /// Name given to warehouses created without one
    #[arg(long, global = true, env = "STOCKPILE_DEFAULT_NAME", default_value = DEFAULT_NAME)]
    pub default_name: String,

    /// Capacity of warehouses created without one
    #[arg(long, global = true, env = "STOCKPILE_DEFAULT_CAPACITY", value_parser = parse_finite, default_value_t = DEFAULT_CAPACITY)]
    pub default_capacity: f64,

    /// Starting balance of warehouses created without one
    #[arg(long, global = true, env = "STOCKPILE_DEFAULT_BALANCE", value_parser = parse_finite, default_value_t = DEFAULT_BALANCE)]
    pub default_balance: f64,

    /// Usage percentage at which a warehouse is reported as almost full
    #[arg(long, global = true, env = "STOCKPILE_ALMOST_FULL", value_parser = parse_threshold, default_value_t = DEFAULT_ALMOST_FULL)]
    pub almost_full: f64,
}

/// Parse a number that must be finite
fn parse_finite(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|e| format!("invalid number '{}': {}", s, e))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", s));
    }
    Ok(value)
}

/// Parse a usage percentage threshold, which must be above zero
fn parse_threshold(s: &str) -> std::result::Result<f64, String> {
    let value = parse_finite(s)?;
    if value <= 0.0 {
        return Err(format!("threshold must be greater than 0, got {}", value));
    }
    Ok(value)
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Execute statements separated by ';' against a fresh registry
    Exec {
        /// The statements to execute
        statements: String,
    },

    /// Run a Stockpile script file (.stock)
    Run {
        /// Path to the .stock script file
        file: PathBuf,
    },

    /// Explain a statement or script without executing
    Explain {
        /// Statement or path to a .stock script file
        input: String,
    },

    /// Start interactive REPL mode
    Repl,
}

impl Args {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    /// Build the execution context from the parsed flags
    pub fn execution_context(&self) -> ExecutionContext {
        ExecutionContext {
            output_format: self.output_format(),
            verbose: self.verbose,
            defaults: Defaults {
                name: self.defaults.default_name.clone(),
                capacity: self.defaults.default_capacity,
                initial_balance: self.defaults.default_balance,
                amount: DEFAULT_AMOUNT,
            },
            almost_full: self.defaults.almost_full,
        }
    }
}
