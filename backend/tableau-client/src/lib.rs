//! Async client for the Tableau Server REST API.
//!
//! [`TableauClient`] signs in, keeps the session token and exposes one method
//! per supported endpoint. The lower layers (request building, multipart
//! encoding, response classification) are public so they can be used and
//! tested on their own.

pub mod config;
pub mod error;
pub mod logger;
pub mod multipart;
pub mod request;
pub mod response;
pub mod session;
pub mod tableau_client;
pub mod transport;

#[cfg(test)]
mod tests;

pub use config::{ClientConfig, TlsMaterial, TransportConfig};
pub use error::{ApiError, ConfigError, CoreError, TransportError};
pub use request::{RequestDescriptor, build_request};
pub use response::{classify_response, decode_response};
pub use session::Session;
pub use tableau_client::TableauClient;
pub use transport::build_http_client;
