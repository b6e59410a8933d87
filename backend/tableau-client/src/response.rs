//! Status classification and XML decoding of responses.
//!
//! Decision order, per response:
//! 1. 404 is `NotFound`, whatever the body says;
//! 2. any other status from 300 up must carry an `<error>` envelope, which
//!    becomes `Server`; a body that is not one becomes `Decode`;
//! 3. below 300 the body is decoded into the requested shape, or ignored when
//!    the caller asked for none.

use crate::error::api::ApiError;

use common::{ErrorLocation, HttpStatusCode, StatusClass};
use models::ErrorResponse;

use serde::de::DeserializeOwned;

/// Classify a response whose body the caller does not need (sign-out, delete).
///
/// # Errors
///
/// `NotFound` for 404, `Server`/`Decode` for other statuses from 300 up.
#[track_caller]
pub fn classify_response(status: impl Into<HttpStatusCode>, body: &[u8]) -> Result<(), ApiError> {
    let status = status.into();
    match status.class() {
        StatusClass::Success => Ok(()),
        StatusClass::NotFound => Err(ApiError::not_found()),
        StatusClass::Failure => Err(decode_error_envelope(status, body)),
    }
}

/// Classify a response and decode its body into `T`.
///
/// # Errors
///
/// As [`classify_response`], plus `Decode` when a successful body does not
/// match `T`. An empty or mismatched body is never turned into a default value.
#[track_caller]
pub fn decode_response<T>(status: impl Into<HttpStatusCode>, body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let status = status.into();
    classify_response(status, body)?;
    quick_xml::de::from_reader(body).map_err(|e| ApiError::decode(status, body, e))
}

#[track_caller]
fn decode_error_envelope(status: HttpStatusCode, body: &[u8]) -> ApiError {
    match quick_xml::de::from_reader::<_, ErrorResponse>(body) {
        Ok(envelope) => ApiError::Server {
            status,
            code: envelope.error.code,
            summary: envelope.error.summary,
            detail: envelope.error.detail,
            location: ErrorLocation::caller(),
        },
        Err(e) => ApiError::decode(status, body, e),
    }
}
