use crate::error::api::ApiError;
use crate::error::config::ConfigError;
use crate::error::CoreError;

use common::HttpStatusCode;

/// **VALUE**: Verifies errors point at the line that created them.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` being dropped from the helper
/// constructors, which would make every location point into `error/api.rs`.
#[test]
fn given_helper_constructed_error_when_displayed_then_location_is_caller() {
    // GIVEN/WHEN: Errors built through helpers in this file
    let not_found = ApiError::not_found();
    let invalid = ApiError::invalid_request("bad header");

    // THEN: Both locations name this test file
    assert!(not_found.to_string().contains("tests/error.rs"), "{not_found}");
    assert!(invalid.to_string().contains("tests/error.rs"), "{invalid}");
}

#[test]
fn given_transport_and_encode_errors_then_no_status_code() {
    assert_eq!(ApiError::invalid_request("x").status_code(), None);
    assert_eq!(ApiError::not_found().status_code(), Some(HttpStatusCode(404)));
    assert_eq!(ApiError::not_found().server_code(), None);
}

#[test]
fn given_core_error_when_displayed_then_inner_message_is_transparent() {
    let inner = ConfigError::validation("boundary must be set");
    let expected = inner.to_string();

    let core = CoreError::from(inner);

    assert_eq!(core.to_string(), expected);
    assert!(matches!(core, CoreError::Config(_)));
}

#[test]
fn given_api_error_when_converted_then_core_api_variant() {
    let core: CoreError = ApiError::not_found().into();
    assert!(matches!(core, CoreError::Api(ApiError::NotFound { .. })));
}
