//! pz - command-line client for Paperzilla research feeds.
//!
//! Logs in with an emailed one-time code, keeps the session fresh, and
//! renders projects and their paper feeds in the terminal.

mod commands;
mod prompt;
mod utils;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use paperzilla_core::Config;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::feed::FeedArgs;
use commands::project::{ProjectArgs, ProjectCommand};
use commands::Context;

#[derive(Parser, Debug)]
#[command(name = "pz", version, about = "Paperzilla from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with a one-time code sent to your email
    Login,

    /// List projects, or show one project by ID
    #[command(args_conflicts_with_subcommands = true)]
    Project(ProjectArgs),

    /// Show the paper feed for a project
    Feed(FeedArgs),
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    debug!(api_url = %config.api_url, tokens = %config.tokens_path.display(), "Loaded config");

    let ctx = Context::new(&config)?;

    match cli.command {
        Command::Login => commands::login::run(&ctx).await,
        Command::Project(args) => match (args.command, args.id) {
            (Some(ProjectCommand::List), _) => commands::project::list(&ctx).await,
            (None, Some(id)) => commands::project::show(&ctx, &id).await,
            (None, None) => {
                let mut cmd = Cli::command();
                if let Some(project) = cmd.find_subcommand_mut("project") {
                    project.print_help()?;
                }
                Ok(())
            }
        },
        Command::Feed(args) => commands::feed::run(&ctx, &args).await,
    }
}
