use crate::{HttpStatusCode, StatusClass};

/// **VALUE**: Pins the three-way status split used by the response classifier.
///
/// **WHY THIS MATTERS**: 404 is the only status mapped to a sentinel. If it fell into the
/// generic failure range, callers checking for "does not exist" would instead get a decode
/// error from an empty 404 body.
#[test]
fn given_boundary_statuses_when_classified_then_not_found_wins_over_failure() {
    assert_eq!(HttpStatusCode(200).class(), StatusClass::Success);
    assert_eq!(HttpStatusCode(201).class(), StatusClass::Success);
    assert_eq!(HttpStatusCode(299).class(), StatusClass::Success);
    assert_eq!(HttpStatusCode(300).class(), StatusClass::Failure);
    assert_eq!(HttpStatusCode(401).class(), StatusClass::Failure);
    assert_eq!(HttpStatusCode(404).class(), StatusClass::NotFound);
    assert_eq!(HttpStatusCode(405).class(), StatusClass::Failure);
    assert_eq!(HttpStatusCode(500).class(), StatusClass::Failure);
}

#[test]
fn given_status_ranges_when_checked_then_client_and_server_errors_are_disjoint() {
    assert!(HttpStatusCode(400).is_client_error());
    assert!(!HttpStatusCode(400).is_server_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(503).is_client_error());
    assert!(!HttpStatusCode(302).is_client_error());
}

#[test]
fn given_status_code_when_displayed_then_prints_bare_number() {
    assert_eq!(HttpStatusCode::from(409).to_string(), "409");
}
