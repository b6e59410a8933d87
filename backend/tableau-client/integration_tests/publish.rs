use crate::helpers::{TEST_SITE_ID, client_for, signed_in_client, xml_with_status};

use tableau_client::ApiError;
use tableau_client::config::DEFAULT_BOUNDARY;
use tableau_client::multipart::encode_datasource_publish;

use models::{ConnectionCredentials, DatasourceBuilder, DatasourceCreateRequest, ToXml};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer};

const TDS: &[u8] = b"<?xml version='1.0' encoding='utf-8' ?>\n<datasource formatted-name='sales' version='10.0'/>\n";

fn published_response() -> String {
    String::from(
        r#"<tsResponse>
  <datasource id="d-42" name="sales" contentUrl="sales" type="sqlserver">
    <project id="p-1" name="Finance"/>
    <owner id="u-1"/>
  </datasource>
</tsResponse>"#,
    )
}

/// **VALUE**: Verifies the publish request on the wire: URL, headers and exact body.
///
/// **WHY THIS MATTERS**: Publishing is the only multipart call. The server needs the
/// boundary in `Content-Type` to match the body, a `Content-Length` for the whole
/// payload, and both query flags.
///
/// **BUG THIS CATCHES**: Would catch boundary drift between header and body, a missing
/// `overwrite` flag, or metadata built from something other than the caller's input.
#[tokio::test]
async fn given_tds_and_metadata_when_published_then_multipart_request_is_exact() {
    // GIVEN: Validated metadata and a server accepting the upload
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    let metadata = DatasourceBuilder::default()
        .with_name("sales")
        .with_project_id("p-1")
        .with_connection_credentials(ConnectionCredentials::new("db_user", "db_pass", true))
        .build()
        .unwrap();
    Mock::given(method("POST"))
        .and(path(format!("/api/2.0/sites/{TEST_SITE_ID}/datasources")))
        .and(query_param("datasourceType", "tds"))
        .and(query_param("overwrite", "true"))
        .respond_with(xml_with_status(201, published_response()))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Publishing
    let published = client
        .publish_tds(TEST_SITE_ID, &metadata, TDS, true)
        .await
        .unwrap();

    // THEN: Response decoded, and the request carried the exact multipart payload
    assert_eq!(published.id.as_deref(), Some("d-42"));
    assert_eq!(
        published.project.as_ref().and_then(|p| p.name.as_deref()),
        Some("Finance")
    );

    let requests = server.received_requests().await.unwrap();
    let publish = requests
        .iter()
        .find(|request| request.url.path().ends_with("/datasources"))
        .unwrap();

    let metadata_xml = DatasourceCreateRequest {
        datasource: metadata.clone(),
    }
    .to_xml()
    .unwrap();
    let expected = encode_datasource_publish(metadata_xml.as_bytes(), TDS, "sales", DEFAULT_BOUNDARY);
    assert_eq!(publish.body, expected);

    assert_eq!(
        publish.headers.get("Content-Type").unwrap(),
        format!("multipart/mixed; boundary={DEFAULT_BOUNDARY}").as_str()
    );
    assert_eq!(
        publish.headers.get("Content-Length").unwrap(),
        expected.len().to_string().as_str()
    );
    assert!(metadata_xml.contains(r#"<connectionCredentials name="db_user" password="db_pass" embed="true"/>"#));
    assert!(metadata_xml.contains(r#"<project id="p-1"/>"#));
}

#[tokio::test]
async fn given_overwrite_false_when_published_then_flag_sent_as_false() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    let metadata = DatasourceBuilder::default().with_name("sales").build().unwrap();
    Mock::given(method("POST"))
        .and(path(format!("/api/2.0/sites/{TEST_SITE_ID}/datasources")))
        .and(query_param("overwrite", "false"))
        .respond_with(xml_with_status(201, published_response()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.publish_tds(TEST_SITE_ID, &metadata, TDS, false).await;

    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
async fn given_metadata_without_name_when_published_then_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let metadata = models::Datasource::default();

    let err = client
        .publish_tds(TEST_SITE_ID, &metadata, TDS, false)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }), "got {err:?}");
    assert!(server.received_requests().await.unwrap().is_empty());
}
