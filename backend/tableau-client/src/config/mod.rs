pub mod transport;

pub use transport::{TlsMaterial, TransportConfig};

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::env;

use url::Url;

pub const DEFAULT_SERVER: &str = "http://localhost:8000";
pub const DEFAULT_API_VERSION: &str = "2.0";
pub const DEFAULT_BOUNDARY: &str = "813e3160-3c95-11e5-a151-feff819cdc9f";

pub const ENV_API_VERSION: &str = "TABLEAU_API_VERSION";
pub const ENV_DEBUG: &str = "TABLEAU_DEBUG";

/// RFC 2046 caps multipart boundaries at 70 characters.
const MAX_BOUNDARY_LEN: usize = 70;

/// Connection settings for one Tableau Server.
///
/// Immutable once handed to the client; the session token lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    server: String,
    version: String,
    boundary: String,
    transport: TransportConfig,
    debug: bool,
}

impl ClientConfig {
    /// Validate `server` and apply defaults for everything else.
    ///
    /// Trailing slashes are stripped so `format!("{server}/api/...")` never
    /// produces `//`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServerUrl`] if `server` is not an absolute
    /// `http`/`https` URL.
    #[track_caller]
    pub fn new(server: &str) -> Result<Self, ConfigError> {
        let server = server.trim().trim_end_matches('/');

        let parsed = Url::parse(server).map_err(|e| ConfigError::InvalidServerUrl {
            location: ErrorLocation::caller(),
            url: server.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidServerUrl {
                location: ErrorLocation::caller(),
                url: server.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::InvalidServerUrl {
                location: ErrorLocation::caller(),
                url: server.to_string(),
                reason: String::from("server URL cannot carry a query or fragment"),
            });
        }

        Ok(Self {
            server: server.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            boundary: DEFAULT_BOUNDARY.to_string(),
            transport: TransportConfig::default(),
            debug: false,
        })
    }

    /// [`ClientConfig::new`] plus transport settings, API version and debug
    /// flag from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an invalid server URL or unparsable variable.
    pub fn from_env(server: &str) -> Result<Self, ConfigError> {
        let transport = TransportConfig::from_env()?;
        let mut config = Self::new(server)?.with_transport(transport);

        if let Ok(version) = env::var(ENV_API_VERSION)
            && !version.trim().is_empty()
        {
            config = config.with_version(version.trim());
        }

        if let Ok(debug) = env::var(ENV_DEBUG) {
            config = config.with_debug(matches!(
                debug.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = boundary.into();
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Log request and response bodies at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the version or boundary
    /// cannot be used on the wire, or the transport settings are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Spliced into the URL path: digits and dots only.
        if self.version.is_empty()
            || !self
                .version
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.')
        {
            return Err(ConfigError::validation(format!(
                "invalid API version '{}'",
                self.version
            )));
        }

        if self.boundary.is_empty() || self.boundary.len() > MAX_BOUNDARY_LEN {
            return Err(ConfigError::validation(format!(
                "multipart boundary must be 1-{MAX_BOUNDARY_LEN} characters"
            )));
        }

        if self
            .boundary
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || !c.is_ascii())
        {
            return Err(ConfigError::validation(
                "multipart boundary cannot contain whitespace, quotes or non-ASCII characters",
            ));
        }

        self.transport.validate()
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// `<server>/api/<version>`, the prefix of every endpoint.
    pub fn api_base(&self) -> String {
        format!("{}/api/{}", self.server, self.version)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            boundary: DEFAULT_BOUNDARY.to_string(),
            transport: TransportConfig::default(),
            debug: false,
        }
    }
}
