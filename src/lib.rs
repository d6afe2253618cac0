//! beacond - startup core for the Beacon MQTT broker.
//!
//! Two components composed sequentially at process startup:
//! - [`config`] resolves the runtime configuration from command-line flags,
//!   an optional JSON config file, and documented defaults.
//! - [`network`] turns the TLS subset of the resolved record into verified
//!   trust material and binds the configured listeners.
//!
//! Session handling, subscription matching, routing, and ACL enforcement
//! live in the broker engine, which consumes what this crate produces.

pub mod config;
pub mod network;
