//! Timeout and TLS settings for the HTTP client, optionally read from the
//! environment (and a `.env` file, when one is found).

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, warn};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_READ_WRITE_TIMEOUT: Duration = Duration::from_secs(20);

pub const ENV_CONNECT_TIMEOUT: &str = "TABLEAU_CONNECT_TIMEOUT";
pub const ENV_READ_WRITE_TIMEOUT: &str = "TABLEAU_READWRITE_TIMEOUT";
pub const ENV_CLIENT_CERT: &str = "TABLEAU_HTTP_SSLCERT";
pub const ENV_CLIENT_KEY: &str = "TABLEAU_HTTP_SSLKEY";
pub const ENV_CA_FILE: &str = "TABLEAU_CA_FILE";
pub const ENV_USE_CLIENT_CERTS: &str = "TABLEAU_USE_CLIENT_CERTS";
pub const ENV_ACCEPT_INVALID_CERTS: &str = "TABLEAU_ACCEPT_INVALID_CERTS";

/// Filesystem locations of PEM-encoded TLS material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsMaterial {
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
    pub ca_path: Option<PathBuf>,
}

impl TlsMaterial {
    /// Certificate and key, when both are configured.
    pub fn identity_paths(&self) -> Option<(&PathBuf, &PathBuf)> {
        self.cert_path.as_ref().zip(self.key_path.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// Absolute deadline for the whole exchange once the request is issued.
    pub read_write_timeout: Duration,
    /// Present `tls.cert_path`/`tls.key_path` as a client identity.
    pub use_client_certificates: bool,
    pub tls: TlsMaterial,
    /// Skip server certificate verification. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_write_timeout: DEFAULT_READ_WRITE_TIMEOUT,
            use_client_certificates: false,
            tls: TlsMaterial::default(),
            accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Read the transport settings from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first when present;
    /// a missing file is not an error. Unset or empty variables keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvValue`] when a variable is set but cannot
    /// be parsed (e.g. `TABLEAU_CONNECT_TIMEOUT=soon`).
    pub fn from_env() -> Result<Self, ConfigError> {
        try_load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TransportConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_CONNECT_TIMEOUT) {
            config.connect_timeout = parse_duration(ENV_CONNECT_TIMEOUT, &value)?;
        }
        if let Some(value) = get(ENV_READ_WRITE_TIMEOUT) {
            config.read_write_timeout = parse_duration(ENV_READ_WRITE_TIMEOUT, &value)?;
        }
        if let Some(value) = get(ENV_USE_CLIENT_CERTS) {
            config.use_client_certificates = parse_bool(ENV_USE_CLIENT_CERTS, &value)?;
        }
        if let Some(value) = get(ENV_ACCEPT_INVALID_CERTS) {
            config.accept_invalid_certs = parse_bool(ENV_ACCEPT_INVALID_CERTS, &value)?;
        }

        config.tls = TlsMaterial {
            cert_path: get(ENV_CLIENT_CERT).map(PathBuf::from),
            key_path: get(ENV_CLIENT_KEY).map(PathBuf::from),
            ca_path: get(ENV_CA_FILE).map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_timeouts(mut self, connect: Duration, read_write: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_write_timeout = read_write;
        self
    }

    pub fn with_client_certificates(mut self, tls: TlsMaterial) -> Self {
        self.use_client_certificates = true;
        self.tls = tls;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for zero timeouts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::validation("connect timeout must be non-zero"));
        }
        if self.read_write_timeout.is_zero() {
            return Err(ConfigError::validation(
                "read/write timeout must be non-zero",
            ));
        }
        Ok(())
    }
}

#[track_caller]
fn parse_duration(variable: &str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidEnvValue {
        location: ErrorLocation::caller(),
        variable: variable.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[track_caller]
fn parse_bool(variable: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvValue {
            location: ErrorLocation::caller(),
            variable: variable.to_string(),
            value: value.to_string(),
            reason: String::from("expected a boolean (true/false/1/0/yes/no/on/off)"),
        }),
    }
}

/// Load `.env` from the working directory, if there is one.
fn try_load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded .env from: {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found - using process environment"),
        Err(e) => warn!("Failed to parse .env, using process environment: {}", e),
    }
}
