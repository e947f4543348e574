//! Sitecraft CLI entry point.
//!
//! Binary name: `sitecraft`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use console::style;

use sitecraft_core::builder::suggestions::QUICK_IMPROVEMENTS;
use sitecraft_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, OutputMode};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mode = OutputMode {
        json: cli.json,
        quiet: cli.quiet,
    };

    // Shell completions and the static suggestion list don't need app state
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "sitecraft", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Suggestions => {
            print_suggestions(mode)?;
            return Ok(());
        }
        _ => {}
    }

    let state = AppState::load().await;

    match cli.command {
        Commands::Build { description, out } => {
            cli::build::run_build(&state, description, out, mode).await?;
        }
        Commands::Generate { description, out } => {
            cli::generate::generate_site(&state, &description, out, mode).await?;
        }
        Commands::Improve {
            artifact,
            request,
            out,
        } => {
            cli::improve::improve_site(&state, &artifact, &request, out, mode).await?;
        }
        Commands::Component { request } => {
            cli::component::generate_component(&state, &request, mode).await?;
        }
        Commands::Suggestions | Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn print_suggestions(mode: OutputMode) -> anyhow::Result<()> {
    if mode.json {
        println!("{}", serde_json::to_string_pretty(QUICK_IMPROVEMENTS)?);
        return Ok(());
    }

    println!();
    println!("  {} Quick improvements:", style("*").cyan().bold());
    println!();
    for (i, suggestion) in QUICK_IMPROVEMENTS.iter().enumerate() {
        println!("  {} {}", style(format!("{:>2}.", i + 1)).dim(), suggestion);
    }
    println!();
    Ok(())
}
