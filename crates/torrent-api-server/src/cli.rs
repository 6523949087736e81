//! Command line flags of the `torrent-api` binary.

use std::net::SocketAddr;

use clap::Parser;

use crate::config::{ApiConfig, DEFAULT_WHITELIST, DaemonConfig, Whitelist};

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The address to listen on for HTTP requests.
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Comma-separated client addresses allowed to use the API. `localhost` matches any loopback
    /// address. Pass an empty string to allow everyone.
    #[arg(short, long, default_value = DEFAULT_WHITELIST)]
    pub whitelist: String,
}

impl Cli {
    /// Combines the CLI flags with the daemon settings.
    pub fn into_config(self, daemon: DaemonConfig) -> ApiConfig {
        ApiConfig {
            listen: self.listen,
            whitelist: Whitelist::parse(&self.whitelist),
            daemon,
        }
    }
}
