//! Interactive REPL implementation

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::container::Registry;
use crate::engine::{execute_command, ExecutionContext};
use crate::error::{Result, StockpileError};
use crate::output::format_output;
use crate::parser::parse_command;

pub fn run_repl(exec_ctx: ExecutionContext) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(|e| StockpileError::ExecutionError(e.to_string()))?;

    println!("Stockpile v{} - Interactive Mode", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, 'exit' to quit\n");

    // One registry for the whole session
    let mut registry = Registry::new();

    loop {
        let prompt = format!("stockpile [{}]> ", registry.count());

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match line.to_lowercase().as_str() {
                    "exit" | "quit" | "q" => {
                        println!("Goodbye!");
                        break;
                    }
                    "help" | "?" => {
                        print_help();
                        continue;
                    }
                    "clear" | "cls" => {
                        print!("\x1B[2J\x1B[1;1H");
                        continue;
                    }
                    _ => {}
                }

                let _ = rl.add_history_entry(line);

                let command_str = expand_shortcuts(line);
                match parse_command(&command_str) {
                    Ok(cmd) => match execute_command(&cmd, &exec_ctx, &mut registry) {
                        Ok(result) => {
                            let output = format_output(&result, &exec_ctx.output_format);
                            if !output.is_empty() {
                                println!("{}\n", output);
                            }
                        }
                        Err(e) => eprintln!("Error: {}\n", e),
                    },
                    Err(e) => eprintln!("{}\n", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Expand common shortcuts to full commands
fn expand_shortcuts(input: &str) -> String {
    let lower = input.to_lowercase();

    if lower == "ls" {
        return "LIST".to_string();
    }
    if let Some(id) = lower.strip_prefix("rm ") {
        return format!("DELETE {}", id.trim());
    }
    if lower.chars().all(|c| c.is_ascii_digit()) {
        return format!("SHOW {}", input);
    }

    input.to_string()
}

fn print_help() {
    println!(
        r#"
Stockpile Commands
==================

WAREHOUSES:
  LIST                                      - List all warehouses
  SHOW 1                                    - Show warehouse 1
  CREATE "name" CAPACITY 100 BALANCE 0      - Create a warehouse
  EDIT 1 NAME "name" CAPACITY 150           - Rename and/or resize
  ADD 30 TO 1                               - Stock up, capped at capacity
  TAKE 20 FROM 1                            - Take out, never below zero
  DELETE 1                                  - Delete a warehouse

  Every clause of CREATE, and the amount of ADD / TAKE, is optional.

OTHER:
  EXPLAIN <command>                         - Show what a command would do

SHORTCUTS:
  ls                                        - Same as LIST
  rm 1                                      - Same as DELETE 1
  1                                         - Same as SHOW 1

REPL Commands:
  help, ?                                   - Show this help
  clear, cls                                - Clear screen
  exit, quit, q                             - Exit REPL
"#
    );
}
