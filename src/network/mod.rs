//! Network listener setup and transport security.
//!
//! - [`tls`]: trust material loading and server-side TLS policy assembly
//! - [`gateway`]: binds the listeners named by the resolved configuration

mod gateway;
pub mod tls;

pub use gateway::{Gateway, WsEndpoint};
pub use tls::{ClientAuth, LeafCertificate, TlsError, TrustContext};
