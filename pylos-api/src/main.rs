//! Pylos server and client.
//!
//! Usage:
//!   pylos server [--host localhost] [--port 5000]
//!   pylos client <NAME> [--host 127.0.0.1] [--port 5000] [--depth 3] [--strategy minimax]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pylos_advisor::Strategy;
use pylos_api::{AppConfig, Client};

#[derive(Parser)]
#[command(name = "pylos", about = "Pylos game server and automated client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Host a game for two clients
    Server {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Join a server and let the advisor play
    Client {
        /// Player name
        name: String,

        #[command(flatten)]
        common: CommonArgs,

        /// Search depth in plies
        #[arg(long)]
        depth: Option<usize>,

        #[arg(long, value_enum)]
        strategy: Option<Strategy>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Host to bind (server) or to connect to (client)
    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    /// Debug logging
    #[arg(long)]
    verbose: bool,

    /// Path to TOML config file
    #[arg(long, default_value = "pylos.toml")]
    config: PathBuf,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(common: &CommonArgs) -> Result<AppConfig> {
    AppConfig::load_or_default(&common.config)
        .with_context(|| format!("loading {}", common.config.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Server { common } => {
            init_logging(common.verbose);
            let mut config = load_config(&common)?;
            if let Some(host) = common.host {
                config.server.host = host;
            }
            if let Some(port) = common.port {
                config.server.port = port;
            }
            config.validate()?;

            pylos_api::server::run(&config.server)
                .await
                .with_context(|| {
                    format!("serving on {}:{}", config.server.host, config.server.port)
                })?;
        }
        Command::Client {
            name,
            common,
            depth,
            strategy,
        } => {
            init_logging(common.verbose);
            let mut config = load_config(&common)?;
            if let Some(host) = common.host {
                config.client.host = host;
            }
            if let Some(port) = common.port {
                config.client.port = port;
            }
            if let Some(depth) = depth {
                config.advisor.depth = depth;
            }
            if let Some(strategy) = strategy {
                config.advisor.strategy = strategy;
            }
            config.validate()?;

            let base_url = config.client.base_url();
            log::info!(
                "{} connecting to {} ({} advisor, depth {})",
                name,
                base_url,
                config.advisor.strategy,
                config.advisor.depth
            );
            let mut client = Client::new(
                base_url,
                name,
                config.advisor.clone(),
                config.client.poll_interval(),
            );
            let winner = client.run().await.context("client stopped")?;
            println!("{} wins", winner);
        }
    }

    Ok(())
}
