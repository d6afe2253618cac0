//! Generated certificate assets for TLS integration tests.

use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair,
};
use std::path::{Path, PathBuf};

/// PEM assets written into a test directory: a CA, plus server and client
/// pairs signed by it.
#[derive(Debug)]
pub struct CertAssets {
    pub ca: PathBuf,
    pub server_cert: PathBuf,
    pub server_key: PathBuf,
    pub client_cert: PathBuf,
    pub client_key: PathBuf,
}

/// Generate a full asset set under `dir`.
pub fn generate(dir: &Path) -> anyhow::Result<CertAssets> {
    let (ca_cert, ca_key) = authority("beacond-test-ca")?;
    let (server_cert, server_key) = end_entity(
        "localhost",
        &["localhost".to_string(), "127.0.0.1".to_string()],
        &ca_cert,
        &ca_key,
    )?;
    let (client_cert, client_key) = end_entity("beacond-test-client", &[], &ca_cert, &ca_key)?;

    let assets = CertAssets {
        ca: dir.join("ca.pem"),
        server_cert: dir.join("server.pem"),
        server_key: dir.join("server.key"),
        client_cert: dir.join("client.pem"),
        client_key: dir.join("client.key"),
    };
    std::fs::write(&assets.ca, ca_cert.pem())?;
    std::fs::write(&assets.server_cert, server_cert.pem())?;
    std::fs::write(&assets.server_key, server_key.serialize_pem())?;
    std::fs::write(&assets.client_cert, client_cert.pem())?;
    std::fs::write(&assets.client_key, client_key.serialize_pem())?;

    Ok(assets)
}

fn authority(cn: &str) -> anyhow::Result<(Certificate, KeyPair)> {
    let mut params = CertificateParams::default();
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(DnType::CommonName, cn);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let key_pair = KeyPair::generate()?;
    let cert = params.self_signed(&key_pair)?;
    Ok((cert, key_pair))
}

fn end_entity(
    cn: &str,
    sans: &[String],
    ca_cert: &Certificate,
    ca_key: &KeyPair,
) -> anyhow::Result<(Certificate, KeyPair)> {
    let mut params = CertificateParams::new(sans.to_vec())?;
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(DnType::CommonName, cn);
    params.is_ca = IsCa::NoCa;
    let key_pair = KeyPair::generate()?;
    let cert = params.signed_by(&key_pair, ca_cert, ca_key)?;
    Ok((cert, key_pair))
}
