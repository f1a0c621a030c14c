//! CLI definitions for relay-worker.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// relay-worker CLI.
#[derive(Parser)]
#[command(name = "relay-worker")]
#[command(about = "HTTP relay for document QA, screenshots, image generation and voiceover")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to the user config dir when present)
    #[arg(short, long, env = "RELAY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for daily-rotated log files
    #[arg(long, env = "RELAY_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Run the server in foreground (default)
    Run {
        /// Server host, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Server port, overrides the config file and PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate the configuration and exit
    CheckConfig,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Run {
            host: None,
            port: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["relay-worker"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.command.unwrap_or_default(), Commands::default());
    }

    #[test]
    fn test_run_overrides() {
        let cli =
            Cli::try_parse_from(["relay-worker", "run", "--host", "127.0.0.1", "--port", "9000"])
                .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Run {
                host: Some("127.0.0.1".to_string()),
                port: Some(9000),
            })
        );
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["relay-worker", "check-config", "--config", "relay.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::CheckConfig));
        assert_eq!(cli.config, Some(PathBuf::from("relay.toml")));
    }

    #[test]
    fn test_invalid_port() {
        assert!(Cli::try_parse_from(["relay-worker", "run", "--port", "99999"]).is_err());
    }
}
