#![cfg_attr(not(test), deny(clippy::expect_used, clippy::unwrap_used))]

mod commands;
mod config;
mod context;
mod render;
mod shell;
mod terminal;
mod watch;

#[cfg(test)]
mod test_support;

use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use commands::nodes::NodesCommand;
use commands::replications::ReplicationsCommand;
use config::{ConfigArgs, ConsoleConfig};
use context::ServiceContext;
use shell::Route;

#[derive(Debug, Parser)]
#[command(name = "hubconsole", version)]
#[command(about = "Administrative console for the replication hub")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Live view of a route (`/` or `/nodes`), refreshed every 10 seconds
    Watch {
        #[arg(default_value = "/")]
        route: String,
    },
    /// Print a route once
    Show {
        #[arg(default_value = "/")]
        route: String,
    },
    /// Manage replications
    #[command(subcommand, visible_alias = "rep")]
    Replications(ReplicationsCommand),
    /// Manage nodes
    #[command(subcommand)]
    Nodes(NodesCommand),
    /// List saved searches usable as replication filters
    Queries,
    /// Show the getting-started guide
    Guide,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HUBCONSOLE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Shows the guide on the very first run.
async fn greet_first_visit(context: &ServiceContext) {
    match context.settings_service().take_first_visit().await {
        Ok(true) => println!("{}", shell::help_dialog()),
        Ok(false) => {}
        Err(err) => tracing::warn!("Could not read first-visit flag: {}", err),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = ConsoleConfig::from_args(cli.config);
    let context = Arc::new(ServiceContext::build(&config)?);

    let command = cli.command.unwrap_or(Command::Watch {
        route: "/".to_string(),
    });
    if !matches!(command, Command::Guide) {
        greet_first_visit(&context).await;
    }

    match command {
        Command::Watch { route } => watch::run(Arc::clone(&context), Route::parse(&route), &config).await,
        Command::Show { route } => commands::show(&context, &Route::parse(&route)).await,
        Command::Replications(command) => commands::replications::execute(&context, command).await,
        Command::Nodes(command) => commands::nodes::execute(&context, command).await,
        Command::Queries => commands::saved_queries(&context).await,
        Command::Guide => {
            println!("{}", shell::help_dialog());
            Ok(())
        }
    }
}
