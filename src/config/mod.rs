//! Configuration resolution.
//!
//! This module is split into logical submodules:
//! - [`types`]: record definitions and JSON file decode (Config, TlsInfo)
//! - [`cli`]: the command-line flag surface and the [`resolve`] entry point
//! - [`validation`]: default-fill rules and cross-field invariants
//! - [`defaults`]: default values shared by the flag set and validation

mod cli;
mod defaults;
mod types;
mod validation;

pub use cli::{Cli, resolve};
pub use defaults::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_WORKER_POOL};
pub use types::{Config, ConfigError, TlsInfo};
pub use validation::{ValidationError, validate};
