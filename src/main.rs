//! relay-worker
//!
//! Main entry point for the relay-worker CLI and server.

mod cli;
mod server;

use clap::Parser;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    server::init_tracing(cli.log_dir.as_deref())?;

    let config_path = server::resolve_config_path(cli.config);

    match cli.command.unwrap_or_default() {
        Commands::Run { host, port } => {
            let mut config = server::load_config(config_path.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::run_server(config).await
        }
        Commands::CheckConfig => {
            server::load_config(config_path.as_deref())?;
            println!("Configuration OK");
            Ok(())
        }
    }
}
