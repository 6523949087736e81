//! Server and daemon configuration.

use std::{
    env, fmt,
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use thiserror::Error;
use tracing::warn;

/// Default daemon host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default daemon RPC port.
pub const DEFAULT_PORT: u16 = 9091;
/// Default daemon RPC path.
pub const DEFAULT_RPC_PATH: &str = "/transmission/rpc";
/// Default connect and request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default client allow list.
pub const DEFAULT_WHITELIST: &str = "localhost,127.0.0.1,::1";

/// Error variants for configuration loading.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `TRANSMISSION_PORT` is not a port number.
    #[error("invalid TRANSMISSION_PORT {0:?}")]
    InvalidPort(String),

    /// `TRANSMISSION_TIMEOUT_SECS` is not a positive number of seconds.
    #[error("invalid TRANSMISSION_TIMEOUT_SECS {0:?}")]
    InvalidTimeout(String),
}

/// Where and how to reach the Transmission daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    /// Daemon host name or IP address.
    pub host: String,
    /// Daemon RPC port.
    pub port: u16,
    /// Daemon RPC path, always starting with `/`.
    pub rpc_path: String,
    /// Connect and per-call timeout.
    pub timeout: Duration,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rpc_path: DEFAULT_RPC_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl DaemonConfig {
    /// Reads the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for unset or empty keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("TRANSMISSION_HOST") {
            config.host = host.trim().to_string();
        }
        if let Some(port) = get("TRANSMISSION_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(path) = get("TRANSMISSION_RPC_PATH") {
            let path = path.trim();
            config.rpc_path = if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            };
        }
        if let Some(timeout) = get("TRANSMISSION_TIMEOUT_SECS") {
            let secs: u64 = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(timeout.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(timeout));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// The full RPC endpoint URL.
    pub fn rpc_url(&self) -> String {
        let host = match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(_)) => format!("[{}]", self.host),
            _ => self.host.clone(),
        };
        format!("http://{host}:{}{}", self.port, self.rpc_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum WhitelistEntry {
    Loopback,
    Address(IpAddr),
}

/// Client addresses allowed to use the API.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    enabled: bool,
    entries: Vec<WhitelistEntry>,
}

impl Whitelist {
    /// Parses a comma-separated list of IP addresses and `localhost`.
    ///
    /// Unparseable entries are skipped with a warning. An empty list disables the check. A list
    /// whose entries are all invalid stays enabled and allows nobody.
    pub fn parse(list: &str) -> Self {
        let raw: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();
        let entries: Vec<WhitelistEntry> = raw
            .iter()
            .filter_map(|entry| {
                if entry.eq_ignore_ascii_case("localhost") {
                    return Some(WhitelistEntry::Loopback);
                }
                match entry.parse::<IpAddr>() {
                    Ok(ip) => Some(WhitelistEntry::Address(ip.to_canonical())),
                    Err(_) => {
                        warn!("Ignoring invalid whitelist entry {entry:?}");
                        None
                    }
                }
            })
            .collect();
        if !raw.is_empty() && entries.is_empty() {
            warn!("No valid whitelist entry in {list:?}, denying all clients");
        }
        Self {
            enabled: !raw.is_empty(),
            entries,
        }
    }

    /// Whether any address restriction applies.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a client at `ip` may use the API. An unknown address is only allowed when the
    /// whitelist is disabled.
    pub fn allows(&self, ip: Option<IpAddr>) -> bool {
        if !self.is_enabled() {
            return true;
        }
        let Some(ip) = ip.map(|ip| ip.to_canonical()) else {
            return false;
        };
        self.entries.iter().any(|entry| match entry {
            WhitelistEntry::Loopback => ip.is_loopback(),
            WhitelistEntry::Address(allowed) => *allowed == ip,
        })
    }
}

impl fmt::Debug for Whitelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_enabled() {
            return f.write_str("Whitelist(disabled)");
        }
        let entries: Vec<String> = self
            .entries
            .iter()
            .map(|entry| match entry {
                WhitelistEntry::Loopback => "localhost".to_string(),
                WhitelistEntry::Address(ip) => ip.to_string(),
            })
            .collect();
        write!(f, "Whitelist({})", entries.join(","))
    }
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP server binds to.
    pub listen: SocketAddr,
    /// Client allow list.
    pub whitelist: Whitelist,
    /// Daemon connection settings.
    pub daemon: DaemonConfig,
}
