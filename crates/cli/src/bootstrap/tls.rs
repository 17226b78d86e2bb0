use anyhow::{anyhow, Context};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;
use sentinel_dns_domain::config::TlsConfig;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use tracing::info;

pub fn load_tls_config(tls: &TlsConfig) -> anyhow::Result<Arc<ServerConfig>> {
    let cert_file = File::open(&tls.cert_path)
        .with_context(|| format!("Failed to open TLS certificate '{}'", tls.cert_path))?;
    let certs: Vec<CertificateDer<'static>> =
        rustls_pemfile::certs(&mut BufReader::new(cert_file))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to parse certificates from '{}'", tls.cert_path))?;

    if certs.is_empty() {
        return Err(anyhow!("No certificates found in '{}'", tls.cert_path));
    }

    let key_file = File::open(&tls.key_path)
        .with_context(|| format!("Failed to open TLS private key '{}'", tls.key_path))?;
    let key: PrivateKeyDer<'static> = rustls_pemfile::private_key(&mut BufReader::new(key_file))
        .with_context(|| format!("Failed to parse PEM private key from '{}'", tls.key_path))?
        .ok_or_else(|| anyhow!("No private key found in '{}'", tls.key_path))?;

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let mut config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("Failed to build TLS server config")?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    info!(cert = %tls.cert_path, "TLS certificate loaded");

    Ok(Arc::new(config))
}
