//! Outcome of a single REST call that did not produce its payload.
//!
//! The variant set is closed: a request either fails in transport, hits a
//! 404, gets a decoded server error envelope, or returns a body that does not
//! match the expected XML. `Encode` covers request bodies that could not be
//! produced and therefore never left the process.

use common::{ErrorLocation, HttpStatusCode};

use quick_xml::de::DeError;
use quick_xml::se::SeError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        is_timeout: bool,
        is_connect: bool,
        location: ErrorLocation,
    },

    #[error("Not Found {location}")]
    NotFound { location: ErrorLocation },

    #[error("Server Error: HTTP {status} - Code:{code}, Summary:{summary}, Detail:{detail} {location}")]
    Server {
        status: HttpStatusCode,
        code: String,
        summary: String,
        detail: String,
        location: ErrorLocation,
    },

    #[error("Decode Error: HTTP {status} - {source} {location}")]
    Decode {
        status: HttpStatusCode,
        body: Vec<u8>,
        #[source]
        source: DeError,
        location: ErrorLocation,
    },

    #[error("Encode Error: {source} {location}")]
    Encode {
        #[source]
        source: SeError,
        location: ErrorLocation,
    },
}

impl ApiError {
    /// A request that could not be assembled (bad URL, method or header).
    #[track_caller]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
            is_timeout: false,
            is_connect: false,
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn not_found() -> Self {
        ApiError::NotFound {
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn decode(status: HttpStatusCode, body: &[u8], source: DeError) -> Self {
        ApiError::Decode {
            status,
            body: body.to_vec(),
            source,
            location: ErrorLocation::caller(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// HTTP status, when the failure happened after a response arrived.
    pub fn status_code(&self) -> Option<HttpStatusCode> {
        match self {
            ApiError::NotFound { .. } => Some(HttpStatusCode::NOT_FOUND),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Decode { status, .. } => Some(*status),
            ApiError::Transport { .. } | ApiError::Encode { .. } => None,
        }
    }

    /// Server error code (e.g. `401002`), when the body carried an envelope.
    pub fn server_code(&self) -> Option<&str> {
        match self {
            ApiError::Server { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Raw response body of a decode failure, lossily decoded for display.
    pub fn raw_body(&self) -> Option<String> {
        match self {
            ApiError::Decode { body, .. } => Some(String::from_utf8_lossy(body).into_owned()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        // Classify before the error is flattened into a message.
        ApiError::Transport {
            is_timeout: error.is_timeout(),
            is_connect: error.is_connect(),
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<url::ParseError> for ApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiError::invalid_request(format!("invalid URL: {error}"))
    }
}

impl From<SeError> for ApiError {
    #[track_caller]
    fn from(source: SeError) -> Self {
        ApiError::Encode {
            source,
            location: ErrorLocation::caller(),
        }
    }
}
