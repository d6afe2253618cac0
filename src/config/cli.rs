//! Command-line flag surface and the resolution entry point.

use clap::Parser;
use std::ffi::OsString;

use super::defaults::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_WORKER_POOL};
use super::types::{Config, ConfigError};
use super::validation;

/// Broker command-line flags.
///
/// Every listener and pool flag defaults to the documented default record.
/// Passing `--config` switches resolution to file mode: the decoded file
/// replaces the flag-derived record wholesale.
#[derive(Parser, Debug)]
#[command(name = "beacond", version, about = "Beacon MQTT broker daemon")]
pub struct Cli {
    /// Regular worker pool size, prefer (client num)/10.
    #[arg(long, visible_alias = "rew", value_name = "N", default_value_t = DEFAULT_WORKER_POOL)]
    regularworker: usize,

    /// Special worker pool size, prefer (client num)/10.
    #[arg(long, visible_alias = "spw", value_name = "N", default_value_t = DEFAULT_WORKER_POOL)]
    specialworker: usize,

    /// Supreme worker pool size, prefer (client num)/10.
    #[arg(long, visible_alias = "suw", value_name = "N", default_value_t = DEFAULT_WORKER_POOL)]
    supremeworker: usize,

    /// Port for the plaintext listener.
    #[arg(short, long, value_name = "PORT", default_value = DEFAULT_PORT)]
    port: String,

    /// Network host for the plaintext listener.
    #[arg(long, value_name = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port for the WebSocket listener; empty disables it.
    #[arg(long, visible_alias = "ws", value_name = "PORT", default_value = "")]
    wsport: String,

    /// Request path for the WebSocket listener.
    #[arg(long, visible_alias = "wsp", value_name = "PATH", default_value = "")]
    wspath: String,

    /// Path to a JSON config file; replaces all flag-derived values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    /// Turn parsed flags into a validated configuration record.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) if !path.is_empty() => Config::from_file(path)?,
            _ => Config {
                regular_workers: self.regularworker,
                special_workers: self.specialworker,
                supreme_workers: self.supremeworker,
                host: self.host,
                port: self.port,
                ws_port: self.wsport,
                ws_path: self.wspath,
                debug: self.debug,
                ..Config::default()
            },
        };
        validation::validate(&mut config)?;
        Ok(config)
    }
}

/// Resolve the broker configuration from process arguments.
///
/// Malformed or unknown flags terminate the process with a parse error and
/// `-h`/`--help` prints usage and exits successfully, per the flag set's
/// exit-on-error contract. Every other failure is returned to the caller.
pub fn resolve<I, T>(args: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args).into_config()
}
