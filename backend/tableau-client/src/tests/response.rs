use crate::error::api::ApiError;
use crate::response::{classify_response, decode_response};

use common::HttpStatusCode;
use models::{
    QueryDatasourcesResponse, QueryProjectsResponse, QuerySiteResponse, QuerySitesResponse,
};

const ERROR_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tsResponse xmlns="http://tableausoftware.com/api" version-and-namespace-settings="">
  <error code="401002">
    <summary>Unauthorized Access</summary>
    <detail>Invalid authentication credentials were provided.</detail>
  </error>
</tsResponse>"#;

const SITES_BODY: &str = r#"<tsResponse xmlns="http://tableausoftware.com/api">
  <pagination pageNumber="1" pageSize="100" totalAvailable="2"/>
  <sites>
    <site id="s1" name="Default" contentUrl="" adminMode="ContentAndUsers" state="Active"/>
    <site id="s2" name="Finance" contentUrl="finance" adminMode="ContentOnly" state="Active"/>
  </sites>
</tsResponse>"#;

/// **VALUE**: Verifies 404 is classified before any body inspection.
///
/// **WHY THIS MATTERS**: Callers probe for existence (`query_site_by_name`) and branch
/// on `is_not_found()`. Tableau sends a perfectly valid error envelope with its 404s.
///
/// **BUG THIS CATCHES**: Would catch a reordering that decodes the envelope first and
/// reports a 404 as a generic `Server` error.
#[test]
fn given_404_with_valid_envelope_when_classified_then_not_found() {
    // GIVEN/WHEN: A 404 carrying a well-formed error envelope
    let err = classify_response(404, ERROR_BODY.as_bytes()).unwrap_err();

    // THEN: NotFound wins
    assert!(err.is_not_found());
    assert_eq!(err.status_code(), Some(HttpStatusCode::NOT_FOUND));
}

#[test]
fn given_404_when_decoding_then_not_found_not_decode() {
    let err = decode_response::<QuerySiteResponse>(404, b"").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn given_error_status_with_envelope_when_classified_then_server_error_with_exact_fields() {
    let err = classify_response(401, ERROR_BODY.as_bytes()).unwrap_err();

    match err {
        ApiError::Server {
            status,
            code,
            summary,
            detail,
            ..
        } => {
            assert_eq!(status, HttpStatusCode(401));
            assert_eq!(code, "401002");
            assert_eq!(summary, "Unauthorized Access");
            assert_eq!(detail, "Invalid authentication credentials were provided.");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[test]
fn given_server_error_when_displayed_then_includes_code_summary_and_detail() {
    let err = classify_response(500, ERROR_BODY.as_bytes()).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("HTTP 500"));
    assert!(message.contains("Code:401002"));
    assert!(message.contains("Summary:Unauthorized Access"));
    assert_eq!(err.server_code(), Some("401002"));
}

/// **VALUE**: Verifies an unreadable error body surfaces as `Decode`, raw body kept.
///
/// **BUG THIS CATCHES**: Would catch a proxy's HTML error page being turned into an
/// empty `Server` error, hiding what actually answered the request.
#[test]
fn given_error_status_with_malformed_body_when_classified_then_decode_error() {
    // GIVEN: A 502 from a proxy with an HTML body
    let body = b"<html><body>Bad Gateway</body>";

    // WHEN: Classifying
    let err = classify_response(502, body).unwrap_err();

    // THEN: Decode error with status and raw body
    assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
    assert_eq!(err.status_code(), Some(HttpStatusCode(502)));
    assert_eq!(err.raw_body().as_deref(), Some("<html><body>Bad Gateway</body>"));
}

#[test]
fn given_redirect_with_empty_body_when_classified_then_decode_error() {
    let err = classify_response(302, b"").unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[test]
fn given_success_without_expected_shape_when_classified_then_body_ignored() {
    assert!(classify_response(204, b"").is_ok());
    assert!(classify_response(200, b"not xml at all").is_ok());
}

#[test]
fn given_success_with_expected_shape_when_decoded_then_payload_returned() {
    let response: QuerySitesResponse = decode_response(200, SITES_BODY.as_bytes()).unwrap();

    let names: Vec<_> = response
        .sites
        .sites
        .iter()
        .map(|site| site.name.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["Default", "Finance"]);
}

/// **VALUE**: Verifies a 2xx body that does not match the requested shape is an error.
///
/// **BUG THIS CATCHES**: Would catch the decoder falling back to `Default`, which would
/// hand callers an empty `Site` as if the server had returned one.
#[test]
fn given_success_with_mismatched_body_when_decoded_then_decode_error() {
    // GIVEN: A 200 whose body has a project where a site was expected, and an empty 200
    let mismatched = br#"<tsResponse><project id="p1" name="x"/></tsResponse>"#;

    // WHEN: Decoding as a site response
    let mismatch = decode_response::<QuerySiteResponse>(200, mismatched).unwrap_err();
    let empty = decode_response::<QuerySiteResponse>(201, b"").unwrap_err();

    // THEN: Both are Decode errors carrying the success status
    assert!(matches!(mismatch, ApiError::Decode { .. }));
    assert_eq!(mismatch.status_code(), Some(HttpStatusCode(200)));
    assert!(matches!(empty, ApiError::Decode { .. }));
    assert_eq!(empty.status_code(), Some(HttpStatusCode(201)));
}

/// **VALUE**: Verifies listings never come back empty from a wrong-shaped 2xx body.
///
/// **WHY THIS MATTERS**: A maintenance page or a bare `<tsResponse/>` served with 200
/// is well-formed XML. Reported as "no projects", it makes cleanup scripts believe a
/// site is empty.
///
/// **BUG THIS CATCHES**: Would catch the collection wrapper fields defaulting when
/// their element is missing.
#[test]
fn given_well_formed_body_without_collection_when_listing_decoded_then_decode_error() {
    // GIVEN: Well-formed 200 bodies that carry no collection element
    let bodies: [&[u8]; 2] = [b"<html><body>x</body></html>", b"<tsResponse/>"];

    for body in bodies {
        // WHEN: Decoding them as each listing response
        let sites = decode_response::<QuerySitesResponse>(200, body).unwrap_err();
        let projects = decode_response::<QueryProjectsResponse>(200, body).unwrap_err();
        let datasources = decode_response::<QueryDatasourcesResponse>(200, body).unwrap_err();

        // THEN: All three are Decode errors
        for err in [sites, projects, datasources] {
            assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
        }
    }
}

#[test]
fn given_empty_collection_element_when_listing_decoded_then_empty_list() {
    let projects: QueryProjectsResponse =
        decode_response(200, b"<tsResponse><projects/></tsResponse>").unwrap();

    assert!(projects.projects.projects.is_empty());
}
