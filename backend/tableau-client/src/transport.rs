//! HTTP client factory: timeouts and TLS policy.

use crate::config::TransportConfig;
use crate::error::transport::TransportError;

use common::ErrorLocation;

use std::path::Path;

use log::{debug, info, warn};
use reqwest::{Certificate, Client, Identity};

/// Build the HTTP client every request of a [`crate::TableauClient`] goes through.
///
/// * the connection must be established within `connect_timeout`;
/// * each request then has `read_write_timeout` in total to finish, body included;
/// * server certificates are verified unless `accept_invalid_certs` is set;
/// * with `use_client_certificates` and both cert/key paths configured, the PEM
///   pair is presented as client identity and `ca_path` (if any) is trusted.
///
/// Nothing is sent over the network here.
///
/// # Errors
///
/// Returns [`TransportError`] when the TLS material cannot be read or parsed, or
/// the underlying client cannot be constructed. Misconfigured certificates are
/// never silently ignored.
#[track_caller]
pub fn build_http_client(config: &TransportConfig) -> Result<Client, TransportError> {
    let mut builder = Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.read_write_timeout);

    if config.accept_invalid_certs {
        warn!(
            "TLS certificate verification is DISABLED for this client; \
             only use this against servers you control"
        );
        builder = builder.danger_accept_invalid_certs(true);
    }

    if config.use_client_certificates {
        match config.tls.identity_paths() {
            Some((cert_path, key_path)) => {
                builder = builder.identity(load_identity(cert_path, key_path)?);
                info!("Loaded client certificate from {}", cert_path.display());

                if let Some(ca_path) = &config.tls.ca_path {
                    let roots = load_ca_bundle(ca_path)?;
                    debug!(
                        "Trusting {} CA certificate(s) from {}",
                        roots.len(),
                        ca_path.display()
                    );
                    for root in roots {
                        builder = builder.add_root_certificate(root);
                    }
                }
            }
            None => {
                debug!("Client certificates requested but no certificate/key pair configured");
            }
        }
    }

    builder.build().map_err(|e| TransportError::ClientBuild {
        location: ErrorLocation::caller(),
        message: e.to_string(),
    })
}

#[track_caller]
fn read_pem(path: &Path) -> Result<Vec<u8>, TransportError> {
    std::fs::read(path).map_err(|source| TransportError::TlsRead {
        location: ErrorLocation::caller(),
        path: path.to_path_buf(),
        source,
    })
}

/// Certificate and key are concatenated into the single PEM buffer rustls expects.
#[track_caller]
fn load_identity(cert_path: &Path, key_path: &Path) -> Result<Identity, TransportError> {
    let mut pem = read_pem(cert_path)?;
    if !pem.ends_with(b"\n") {
        pem.push(b'\n');
    }
    pem.extend_from_slice(&read_pem(key_path)?);

    Identity::from_pem(&pem).map_err(|e| TransportError::Identity {
        location: ErrorLocation::caller(),
        cert_path: cert_path.to_path_buf(),
        key_path: key_path.to_path_buf(),
        message: e.to_string(),
    })
}

#[track_caller]
fn load_ca_bundle(path: &Path) -> Result<Vec<Certificate>, TransportError> {
    let pem = read_pem(path)?;

    let certificates = Certificate::from_pem_bundle(&pem).map_err(|e| TransportError::CaBundle {
        location: ErrorLocation::caller(),
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if certificates.is_empty() {
        return Err(TransportError::CaBundle {
            location: ErrorLocation::caller(),
            path: path.to_path_buf(),
            message: String::from("no certificates found in bundle"),
        });
    }

    Ok(certificates)
}
