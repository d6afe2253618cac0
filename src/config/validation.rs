//! Configuration validation.
//!
//! Applies the default-fill rules and cross-field invariants to a record
//! assembled from flags or a config file. Fills happen in place; the only
//! hard failure is a TLS listener without its key material.

use super::defaults::{DEFAULT_HOST, DEFAULT_WORKER_POOL};
use super::types::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A TLS port is configured but the key material is incomplete.
    #[error("tls listener configured without {missing}")]
    MissingTlsMaterial { missing: &'static str },
}

/// Validate a record in place.
///
/// Zero worker counts become [`DEFAULT_WORKER_POOL`] and empty hosts become
/// the wildcard address; neither is an error. File existence is not checked
/// here, only field presence.
pub fn validate(config: &mut Config) -> Result<(), ValidationError> {
    if config.regular_workers == 0 {
        config.regular_workers = DEFAULT_WORKER_POOL;
    }
    if config.special_workers == 0 {
        config.special_workers = DEFAULT_WORKER_POOL;
    }
    if config.supreme_workers == 0 {
        config.supreme_workers = DEFAULT_WORKER_POOL;
    }

    if !config.port.is_empty() && config.host.is_empty() {
        config.host = DEFAULT_HOST.to_string();
    }

    if !config.tls_port.is_empty() {
        let missing = match (
            config.tls_info.cert_file.is_empty(),
            config.tls_info.key_file.is_empty(),
        ) {
            (true, true) => Some("certFile and keyFile"),
            (true, false) => Some("certFile"),
            (false, true) => Some("keyFile"),
            (false, false) => None,
        };
        if let Some(missing) = missing {
            return Err(ValidationError::MissingTlsMaterial { missing });
        }
        if config.tls_host.is_empty() {
            config.tls_host = DEFAULT_HOST.to_string();
        }
    }

    Ok(())
}
