use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

/// Failures while building the HTTP client. No request has been sent yet.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("TLS Read Error: {}: {source} {location}", path.display())]
    TlsRead {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "TLS Identity Error: {} + {}: {message} {location}",
        cert_path.display(),
        key_path.display()
    )]
    Identity {
        location: ErrorLocation,
        cert_path: PathBuf,
        key_path: PathBuf,
        message: String,
    },

    #[error("TLS CA Bundle Error: {}: {message} {location}", path.display())]
    CaBundle {
        location: ErrorLocation,
        path: PathBuf,
        message: String,
    },

    #[error("HTTP Client Build Error: {message} {location}")]
    ClientBuild {
        location: ErrorLocation,
        message: String,
    },
}
