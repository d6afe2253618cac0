//! beacond - Beacon MQTT broker daemon.
//!
//! Startup core: resolves the broker configuration, assembles the TLS trust
//! material, and binds the configured listeners for the session engine.

use beacond::config;
use beacond::network::{Gateway, TrustContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Resolution happens before the subscriber exists; a failure here
    // surfaces through the binary's error exit rather than the log stream.
    let config = config::resolve(std::env::args())?;

    let default_filter = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(true)
        .init();

    info!(
        host = %config.host,
        port = %config.port,
        regular_workers = config.regular_workers,
        special_workers = config.special_workers,
        supreme_workers = config.supreme_workers,
        "starting beacond"
    );

    if config.acl {
        info!(path = %config.acl_conf, "acl enforcement enabled");
    }

    let trust = if config.tls_port.is_empty() {
        None
    } else {
        let trust = TrustContext::build(&config.tls_info)?;
        info!(
            subject = %trust.leaf().subject,
            not_after = %trust.leaf().not_after,
            client_auth = ?trust.client_auth(),
            "tls trust material loaded"
        );
        Some(trust)
    };

    let _gateway = Gateway::bind(&config, trust.as_ref()).await?;
    info!("listeners bound; broker core ready");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    Ok(())
}
