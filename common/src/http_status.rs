//! HTTP status classification for REST responses.

/// How a response status is treated by the response classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Below 300: the body is the requested payload (if any).
    Success,
    /// Exactly 404: the body is never inspected.
    NotFound,
    /// 300 and above (except 404): the body is an error envelope.
    Failure,
}

/// HTTP status code as returned by the server.
///
/// Stored directly rather than parsed from error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const NOT_FOUND: HttpStatusCode = HttpStatusCode(404);

    /// Anything below 300, including 1xx which the transport never surfaces.
    pub fn is_success(&self) -> bool {
        self.0 < 300
    }

    pub fn is_not_found(&self) -> bool {
        *self == Self::NOT_FOUND
    }

    /// 4xx client errors.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// 404 is checked before the generic failure range.
    pub fn class(&self) -> StatusClass {
        if self.is_not_found() {
            StatusClass::NotFound
        } else if self.is_success() {
            StatusClass::Success
        } else {
            StatusClass::Failure
        }
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
