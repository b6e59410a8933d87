//! Shared building blocks for the Tableau REST client workspace.
//!
//! ## Architecture
//!
//! - **common** (this crate): error location tracking, status codes, secrets
//! - **models**: XML wire types for the REST API
//! - **tableau-client**: transport, encoding and the endpoint catalog
//!
//! Nothing in here touches the network.

pub mod error;
pub mod http_status;
pub mod redacted_token;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::{HttpStatusCode, StatusClass};
pub use redacted_token::RedactedToken;
