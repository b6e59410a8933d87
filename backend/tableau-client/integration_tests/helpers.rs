//! Shared fixtures for client integration tests against a `wiremock` server.

use tableau_client::{ClientConfig, TableauClient};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "12ab34cd56ef78ab90cd12ef34ab56cd";
pub const TEST_SITE_ID: &str = "9a8b7c6d-5e4f-3a2b-1c0d-9e8f7a6b5c4d";
pub const TEST_USER_ID: &str = "9f9e9d9c-8b8a-8f8e-7d7c-7b7a6f6d6e6c";

pub fn xml(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "application/xml")
        .set_body_string(body.into())
}

pub fn xml_with_status(status: u16, body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("Content-Type", "application/xml")
        .set_body_string(body.into())
}

pub fn sign_in_body(token: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<tsResponse xmlns="http://tableausoftware.com/api">
  <credentials token="{token}">
    <site id="{TEST_SITE_ID}" contentUrl=""/>
    <user id="{TEST_USER_ID}"/>
  </credentials>
</tsResponse>"#
    )
}

pub fn error_body(code: &str, summary: &str, detail: &str) -> String {
    format!(
        r#"<tsResponse xmlns="http://tableausoftware.com/api">
  <error code="{code}">
    <summary>{summary}</summary>
    <detail>{detail}</detail>
  </error>
</tsResponse>"#
    )
}

pub fn client_for(server: &MockServer) -> TableauClient {
    let config = ClientConfig::new(&server.uri()).expect("mock server URI is a valid server URL");
    TableauClient::new(config).expect("client should build with default transport")
}

/// Mount a sign-in endpoint and sign in through it.
pub async fn signed_in_client(server: &MockServer) -> TableauClient {
    Mock::given(method("POST"))
        .and(path("/api/2.0/auth/signin"))
        .respond_with(xml(sign_in_body(TEST_TOKEN)))
        .mount(server)
        .await;

    let client = client_for(server);
    client
        .sign_in("admin", "s3cret", "", None)
        .await
        .expect("sign-in against mock server should succeed");
    client
}
