//! Stockpile CLI - keep track of bounded-capacity warehouses

use clap::Parser;
use stockpile::cli::{Args, SubCommand};
use stockpile::parser::Command;
use stockpile::script::{explain_script, ScriptRunner, SCRIPT_EXTENSION};
use stockpile::{execute_command, format_output, parse_command, parse_script, Registry};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> stockpile::Result<()> {
    let ctx = args.execution_context();
    tracing::info!(format = ?ctx.output_format, "starting stockpile");

    match args.command {
        SubCommand::Exec { statements } => {
            let mut runner = ScriptRunner::new(ctx);
            let result = runner.run_source(&statements)?;

            if !result.success {
                if let Some(err) = result.error {
                    return Err(stockpile::StockpileError::ExecutionError(err));
                }
            }
            Ok(())
        }

        SubCommand::Run { file } => {
            let verbose = ctx.verbose;
            let mut runner = ScriptRunner::new(ctx);
            let result = runner.run_file(&file)?;

            if !result.success {
                if let Some(err) = result.error {
                    return Err(stockpile::StockpileError::ExecutionError(err));
                }
            }

            if verbose {
                println!(
                    "--- Script completed: {} statements executed ---",
                    result.statements_executed
                );
            }

            Ok(())
        }

        SubCommand::Explain { input } => {
            let path = std::path::Path::new(&input);

            if path.exists() && path.extension().is_some_and(|e| e == SCRIPT_EXTENSION) {
                let content = std::fs::read_to_string(path)?;
                let script = parse_script(&content)?;

                println!("Script: {}", path.display());
                println!("Statements: {}\n", script.statements.len());

                for explanation in explain_script(&script, &ctx) {
                    println!("{}", explanation);
                }
            } else {
                let cmd = parse_command(&input)?;
                let explain = match cmd {
                    Command::Explain(_) => cmd,
                    other => Command::Explain(Box::new(other)),
                };
                // Explaining never touches the registry
                let result = execute_command(&explain, &ctx, &mut Registry::new())?;
                println!("{}", format_output(&result, &ctx.output_format));
            }

            Ok(())
        }

        SubCommand::Repl => stockpile::repl::run_repl(ctx),
    }
}
