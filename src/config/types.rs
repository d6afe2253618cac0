//! Core configuration types and JSON file decode.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::validation::ValidationError;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Resolved broker configuration.
///
/// Ports are strings so that an empty value can disable a listener; the
/// JSON keys mirror the broker's established wire shape. Unknown keys in a
/// config file are ignored. The record is resolved once at startup and
/// treated as read-only by every later consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Regular worker pool size.
    #[serde(rename = "regularWorkerNum")]
    pub regular_workers: usize,
    /// Special worker pool size.
    #[serde(rename = "specialWorkerNum")]
    pub special_workers: usize,
    /// Supreme worker pool size.
    #[serde(rename = "supremeWorkerNum")]
    pub supreme_workers: usize,
    /// Plaintext listener host.
    pub host: String,
    /// Plaintext listener port; empty disables the listener.
    pub port: String,
    /// TLS listener host.
    pub tls_host: String,
    /// TLS listener port; empty disables the listener.
    pub tls_port: String,
    /// WebSocket request path.
    pub ws_path: String,
    /// WebSocket listener port; empty disables the listener.
    pub ws_port: String,
    /// Serve the WebSocket listener over TLS.
    #[serde(rename = "wsTLS")]
    pub ws_tls: bool,
    /// TLS key material locations.
    pub tls_info: TlsInfo,
    /// Enable ACL enforcement (the enforcement itself lives in the engine).
    pub acl: bool,
    /// Path to the ACL configuration; meaningful only when `acl` is set.
    pub acl_conf: String,
    /// Enable debug logging.
    pub debug: bool,
}

/// TLS key material locations and the client-verification switch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TlsInfo {
    /// Require and verify client certificates.
    pub verify: bool,
    /// Optional CA bundle used to verify client certificates.
    pub ca_file: String,
    /// Server certificate chain (PEM).
    pub cert_file: String,
    /// Server private key (PKCS#8 PEM).
    pub key_file: String,
}

impl Config {
    /// Decode a configuration record from a JSON file.
    ///
    /// The file replaces the flag-derived record wholesale; nothing is
    /// merged on top of it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let shown = path.as_ref().display().to_string();
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: shown,
            source,
        })?;
        Ok(config)
    }
}
