//! rmysql: operator tool for reactive MySQL pool configuration.
//!
//! # Usage
//!
//! ```text
//! rmysql resolve --config rmysql.toml --datasource orders
//! rmysql run --config rmysql.toml --event-loops 8
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod env_credentials;

const DEFAULT_LOG_FILTER: &str = "info,reactive_mysql=debug";

#[derive(Parser)]
#[command(
    name = "rmysql",
    about = "Resolve and bootstrap reactive MySQL pools",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved pool and connect options as JSON.
    ///
    /// Passwords are never printed.
    Resolve {
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: PathBuf,
        /// Data source to resolve; all configured data sources when omitted
        #[arg(short, long)]
        datasource: Option<String>,
        /// Process-wide event-loop count
        #[arg(long)]
        event_loops: Option<i32>,
    },
    /// Bootstrap every configured pool and close them on Ctrl-C.
    Run {
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: PathBuf,
        /// Process-wide event-loop count
        #[arg(long)]
        event_loops: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            config,
            datasource,
            event_loops,
        } => commands::resolve::resolve(&config, datasource.as_deref(), event_loops),
        Commands::Run {
            config,
            event_loops,
        } => commands::run::run(&config, event_loops).await,
    }
}
