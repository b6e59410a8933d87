use crate::helpers::{TEST_SITE_ID, client_for, error_body, signed_in_client, xml, xml_with_status};

use tableau_client::{ApiError, ClientConfig, CoreError, TableauClient, TransportConfig};

use common::HttpStatusCode;

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies a 404 surfaces as `NotFound` even with an error envelope.
///
/// **BUG THIS CATCHES**: Would catch lookups of missing sites reporting a generic
/// server error, breaking existence checks built on `is_not_found()`.
#[tokio::test]
async fn given_missing_site_when_queried_then_not_found() {
    // GIVEN: A 404 with Tableau's usual envelope
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/sites/nope"))
        .respond_with(xml_with_status(
            404,
            error_body("404000", "Resource Not Found", "Site 'nope' could not be found."),
        ))
        .mount(&server)
        .await;

    // WHEN: Querying it
    let err = client.query_site_by_name("nope", false).await.unwrap_err();

    // THEN: NotFound
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn given_bad_credentials_when_signing_in_then_server_error_and_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/auth/signin"))
        .respond_with(xml_with_status(
            401,
            error_body("401001", "Signin Error", "Error signing in to Tableau Server"),
        ))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = client
        .sign_in("admin", "wrong", "", None)
        .await
        .unwrap_err();

    match &err {
        ApiError::Server {
            status,
            code,
            summary,
            detail,
            ..
        } => {
            assert_eq!(*status, HttpStatusCode(401));
            assert_eq!(code, "401001");
            assert_eq!(summary, "Signin Error");
            assert_eq!(detail, "Error signing in to Tableau Server");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
    assert!(!client.is_signed_in().await);
}

#[tokio::test]
async fn given_sign_in_response_without_token_when_signing_in_then_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/auth/signin"))
        .respond_with(xml("<tsResponse><credentials/></tsResponse>"))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = client.sign_in("admin", "pw", "", None).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
    assert!(!client.is_signed_in().await);
}

#[tokio::test]
async fn given_malformed_success_body_when_queried_then_decode_error_with_raw_body() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/2.0/sites/{TEST_SITE_ID}/projects")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>maintenance"))
        .mount(&server)
        .await;

    let err = client.query_projects(TEST_SITE_ID).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
    assert_eq!(err.status_code(), Some(HttpStatusCode(200)));
    assert_eq!(err.raw_body().as_deref(), Some("<html><body>maintenance"));
}

#[tokio::test]
async fn given_error_status_with_html_body_when_deleting_then_decode_error() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/2.0/sites/{TEST_SITE_ID}/projects/p1")))
        .respond_with(ResponseTemplate::new(503).set_body_string("<h1>Service Unavailable</h1>"))
        .mount(&server)
        .await;

    let err = client.delete_project(TEST_SITE_ID, "p1").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
    assert_eq!(err.status_code(), Some(HttpStatusCode(503)));
}

/// **VALUE**: Verifies connection failures are reported as transport errors with the
/// connect flag set.
///
/// **BUG THIS CATCHES**: Would catch the reqwest error being flattened before
/// classification, so callers could no longer tell "server down" from other failures.
#[tokio::test]
async fn given_unreachable_server_when_querying_then_transport_connect_error() {
    // GIVEN: A server URL nothing listens on
    let client = TableauClient::new(ClientConfig::new("http://127.0.0.1:1").unwrap()).unwrap();

    // WHEN: Calling any endpoint
    let err = client.server_info().await.unwrap_err();

    // THEN: Transport error flagged as a connect failure
    match err {
        ApiError::Transport { is_connect, .. } => assert!(is_connect),
        other => panic!("expected Transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_slow_server_when_deadline_passes_then_transport_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/serverinfo"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    let transport = TransportConfig::default()
        .with_timeouts(Duration::from_secs(1), Duration::from_millis(200));
    let config = ClientConfig::new(&server.uri())
        .unwrap()
        .with_transport(transport);
    let client = TableauClient::new(config).unwrap();

    let err = client.server_info().await.unwrap_err();

    assert!(
        matches!(err, ApiError::Transport { is_timeout: true, .. }),
        "got {err:?}"
    );
}

#[test]
fn given_invalid_boundary_when_client_created_then_config_error() {
    let config = ClientConfig::new("http://localhost:8000")
        .unwrap()
        .with_boundary("not valid");

    let err = TableauClient::new(config).unwrap_err();

    assert!(matches!(err, CoreError::Config(_)), "got {err:?}");
}
