//! TLS trust material loading and server-side policy assembly.
//!
//! Builds a [`TrustContext`] from the resolved [`TlsInfo`]: the certificate
//! chain and private key, a parsed leaf certificate for introspection, the
//! optional client-CA pool, and the finished rustls server configuration
//! with a hard TLS 1.2 floor. The context is built once at startup and never
//! rebuilt without a process restart.

use crate::config::TlsInfo;
use rustls_pemfile::{certs, pkcs8_private_keys};
use std::io::{BufReader, Cursor};
use std::sync::Arc;
use thiserror::Error;
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::server::{VerifierBuilderError, WebPkiClientVerifier};
use tokio_rustls::rustls::version::{TLS12, TLS13};
use tokio_rustls::rustls::{ProtocolVersion, RootCertStore, ServerConfig};
use x509_parser::prelude::{FromDer, X509Certificate};

/// Lowest protocol version the listener will negotiate. Not configurable.
pub const MIN_PROTOCOL_VERSION: ProtocolVersion = ProtocolVersion::TLSv1_2;

/// Errors assembling the trust context.
///
/// Fatal to TLS setup; whether a configured plaintext listener still starts
/// is the caller's decision.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Pem {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no certificates found in {0}")]
    NoCertificates(String),
    #[error("no private key found in {0}")]
    NoPrivateKey(String),
    #[error("error parsing X509 certificate/key pair: {0}")]
    KeyPair(#[source] tokio_rustls::rustls::Error),
    #[error("error parsing certificate: {0}")]
    Leaf(String),
    #[error("ca file {0} is empty")]
    EmptyCaFile(String),
    #[error("failed to parse root CA certificate(s) in {0}")]
    CaParse(String),
    #[error("client verification enabled but no CA certificates available")]
    NoClientCaRoots,
    #[error("failed to build client certificate verifier: {0}")]
    ClientVerifier(#[source] VerifierBuilderError),
}

/// Server-side client certificate policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientAuth {
    /// No client certificate requested.
    #[default]
    None,
    /// Client certificate required and cryptographically verified.
    RequireAndVerify,
}

/// Summary of the end-entity certificate, parsed for introspection and
/// startup logging. Carries no cryptographic weight of its own.
#[derive(Debug, Clone)]
pub struct LeafCertificate {
    /// Subject distinguished name.
    pub subject: String,
    /// Issuer distinguished name.
    pub issuer: String,
    /// Start of the validity window.
    pub not_before: String,
    /// End of the validity window.
    pub not_after: String,
}

/// Ready-to-use transport security context for the TLS listener.
///
/// Holds the loaded chain, the parsed leaf, the client-auth policy, the
/// optional client-CA pool, and the assembled rustls configuration. Built
/// once, immutable for the listener's entire lifetime.
#[derive(Debug)]
pub struct TrustContext {
    cert_chain: Vec<CertificateDer<'static>>,
    leaf: LeafCertificate,
    client_auth: ClientAuth,
    roots: Option<RootCertStore>,
    server_config: Arc<ServerConfig>,
}

impl TrustContext {
    /// Assemble the trust context from file-based key material.
    ///
    /// Loads the certificate/key pair, parses the leaf, loads the CA bundle
    /// when one is named, and builds the rustls server configuration. The CA
    /// pool verifies client certificates only; it never validates the
    /// server's own chain. When `verify` is set without a CA bundle, the
    /// platform trust store stands in as the anchor set.
    ///
    /// No retries: every failure is reported once, synchronously.
    pub fn build(tls_info: &TlsInfo) -> Result<Self, TlsError> {
        let cert_chain = load_certs(&tls_info.cert_file)?;
        let key = load_key(&tls_info.key_file)?;
        let leaf = parse_leaf(&cert_chain[0])?;

        let client_auth = if tls_info.verify {
            ClientAuth::RequireAndVerify
        } else {
            ClientAuth::None
        };

        let roots = if tls_info.ca_file.is_empty() {
            None
        } else {
            Some(load_ca_pool(&tls_info.ca_file)?)
        };

        let builder = ServerConfig::builder_with_protocol_versions(&[&TLS13, &TLS12]);
        let builder = match client_auth {
            ClientAuth::None => builder.with_no_client_auth(),
            ClientAuth::RequireAndVerify => {
                let anchors = match &roots {
                    Some(roots) => roots.clone(),
                    None => native_roots()?,
                };
                let verifier = WebPkiClientVerifier::builder(Arc::new(anchors))
                    .build()
                    .map_err(TlsError::ClientVerifier)?;
                builder.with_client_cert_verifier(verifier)
            }
        };
        let server_config = builder
            .with_single_cert(cert_chain.clone(), key)
            .map_err(TlsError::KeyPair)?;

        Ok(Self {
            cert_chain,
            leaf,
            client_auth,
            roots,
            server_config: Arc::new(server_config),
        })
    }

    /// Certificates loaded from the configured chain, leaf first.
    pub fn certificate_chain(&self) -> &[CertificateDer<'static>] {
        &self.cert_chain
    }

    /// Parsed end-entity certificate.
    pub fn leaf(&self) -> &LeafCertificate {
        &self.leaf
    }

    /// Client certificate policy.
    pub fn client_auth(&self) -> ClientAuth {
        self.client_auth
    }

    /// CA pool loaded from the configured bundle, if any.
    pub fn ca_pool(&self) -> Option<&RootCertStore> {
        self.roots.as_ref()
    }

    /// Lowest protocol version the assembled configuration negotiates.
    pub fn min_protocol_version(&self) -> ProtocolVersion {
        MIN_PROTOCOL_VERSION
    }

    /// Assembled rustls server configuration.
    pub fn server_config(&self) -> Arc<ServerConfig> {
        Arc::clone(&self.server_config)
    }

    /// Acceptor for the TLS listener.
    pub fn acceptor(&self) -> TlsAcceptor {
        TlsAcceptor::from(self.server_config())
    }
}

fn load_certs(path: &str) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let data = std::fs::read(path).map_err(|source| TlsError::Io {
        path: path.to_string(),
        source,
    })?;
    let reader = &mut BufReader::new(Cursor::new(data));
    let chain: Vec<CertificateDer<'static>> = certs(reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Pem {
            path: path.to_string(),
            source,
        })?;
    if chain.is_empty() {
        return Err(TlsError::NoCertificates(path.to_string()));
    }
    Ok(chain)
}

fn load_key(path: &str) -> Result<PrivateKeyDer<'static>, TlsError> {
    let data = std::fs::read(path).map_err(|source| TlsError::Io {
        path: path.to_string(),
        source,
    })?;
    let reader = &mut BufReader::new(Cursor::new(data));
    let mut keys: Vec<PrivateKeyDer<'static>> = pkcs8_private_keys(reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Pem {
            path: path.to_string(),
            source,
        })?
        .into_iter()
        .map(PrivateKeyDer::from)
        .collect();
    if keys.is_empty() {
        return Err(TlsError::NoPrivateKey(path.to_string()));
    }
    Ok(keys.remove(0))
}

fn parse_leaf(cert: &CertificateDer<'_>) -> Result<LeafCertificate, TlsError> {
    let (_, parsed) =
        X509Certificate::from_der(cert.as_ref()).map_err(|e| TlsError::Leaf(e.to_string()))?;
    Ok(LeafCertificate {
        subject: parsed.subject().to_string(),
        issuer: parsed.issuer().to_string(),
        not_before: parsed.validity().not_before.to_string(),
        not_after: parsed.validity().not_after.to_string(),
    })
}

fn load_ca_pool(path: &str) -> Result<RootCertStore, TlsError> {
    let data = std::fs::read(path).map_err(|source| TlsError::Io {
        path: path.to_string(),
        source,
    })?;
    if data.is_empty() {
        return Err(TlsError::EmptyCaFile(path.to_string()));
    }
    let reader = &mut BufReader::new(Cursor::new(data));
    let mut roots = RootCertStore::empty();
    // Bundles in the wild carry stray blocks; only the anchored count matters.
    for cert in certs(reader).flatten() {
        let _ = roots.add(cert);
    }
    if roots.is_empty() {
        return Err(TlsError::CaParse(path.to_string()));
    }
    Ok(roots)
}

fn native_roots() -> Result<RootCertStore, TlsError> {
    let mut roots = RootCertStore::empty();
    let loaded = rustls_native_certs::load_native_certs();
    for e in &loaded.errors {
        tracing::warn!(error = %e, "error loading native root certificate");
    }
    for cert in loaded.certs {
        let _ = roots.add(cert);
    }
    if roots.is_empty() {
        return Err(TlsError::NoClientCaRoots);
    }
    Ok(roots)
}
