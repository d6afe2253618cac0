//! Default values shared by the flag set and validation.

/// Worker pool size applied when a count is unset or zero.
pub const DEFAULT_WORKER_POOL: usize = 1024;

/// Wildcard bind address applied when a listener has a port but no host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default plaintext listener port.
pub const DEFAULT_PORT: &str = "1883";
