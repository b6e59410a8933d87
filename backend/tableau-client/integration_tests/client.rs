use crate::helpers::{
    TEST_SITE_ID, TEST_TOKEN, TEST_USER_ID, client_for, error_body, sign_in_body,
    signed_in_client, xml, xml_with_status,
};

use tableau_client::ApiError;
use tableau_client::request::AUTH_HEADER;

use models::Project;

use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the full authentication handshake: the token from sign-in is
/// stored and sent on every following call.
///
/// **WHY THIS MATTERS**: Every endpoint except sign-in is rejected with 401 without
/// `X-Tableau-Auth`.
///
/// **BUG THIS CATCHES**: Would catch the token not being stored, stored redacted, or
/// attached under the wrong header name.
#[tokio::test]
async fn given_successful_sign_in_when_querying_sites_then_token_header_sent() {
    // GIVEN: A server issuing a token and serving sites only with that token
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/auth/signin"))
        .and(body_string_contains(r#"name="admin""#))
        .and(body_string_contains(r#"password="s3cret""#))
        .respond_with(xml(sign_in_body(TEST_TOKEN)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/sites"))
        .and(header(AUTH_HEADER, TEST_TOKEN))
        .respond_with(xml(
            r#"<tsResponse>
  <pagination pageNumber="1" pageSize="100" totalAvailable="1"/>
  <sites><site id="s1" name="Default" contentUrl=""/></sites>
</tsResponse>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    // WHEN: Signing in and listing sites
    let credentials = client.sign_in("admin", "s3cret", "", None).await.unwrap();
    let sites = client.query_sites().await.unwrap();

    // THEN: Session holds the token and the call was authenticated
    assert!(client.is_signed_in().await);
    assert_eq!(credentials.token.as_deref(), Some(TEST_TOKEN));
    assert_eq!(
        credentials.site.and_then(|site| site.id).as_deref(),
        Some(TEST_SITE_ID)
    );
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].name.as_deref(), Some("Default"));

    let requests = server.received_requests().await.unwrap();
    assert!(
        requests[0].headers.get(AUTH_HEADER).is_none(),
        "sign-in must not carry a token"
    );
}

#[tokio::test]
async fn given_impersonation_when_signing_in_then_user_id_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/auth/signin"))
        .and(body_string_contains(format!(r#"<user id="{TEST_USER_ID}"/>"#)))
        .and(body_string_contains(r#"contentUrl="finance""#))
        .respond_with(xml(sign_in_body(TEST_TOKEN)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .sign_in("admin", "s3cret", "finance", Some(TEST_USER_ID))
        .await;

    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
async fn given_signed_in_client_when_signing_out_then_token_cleared() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/auth/signout"))
        .and(header(AUTH_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.sign_out().await.unwrap();

    assert!(!client.is_signed_in().await);
}

/// **VALUE**: Verifies a rejected sign-out keeps the local session.
///
/// **BUG THIS CATCHES**: Would catch the token being cleared before the server answered,
/// leaving a live server session the caller can no longer close.
#[tokio::test]
async fn given_sign_out_rejected_when_signing_out_then_token_kept() {
    // GIVEN: A signed-in client and a server refusing the sign-out
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/auth/signout"))
        .respond_with(xml_with_status(
            500,
            error_body("500000", "Internal Server Error", "try again"),
        ))
        .mount(&server)
        .await;

    // WHEN: Signing out
    let result = client.sign_out().await;

    // THEN: Error surfaced and the session still holds the token
    assert!(matches!(result, Err(ApiError::Server { .. })));
    assert!(client.is_signed_in().await);
}

#[tokio::test]
async fn given_cloned_client_when_original_signs_in_then_clone_is_authenticated() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let clone = client.clone();
    Mock::given(method("POST"))
        .and(path("/api/2.0/auth/signin"))
        .respond_with(xml(sign_in_body(TEST_TOKEN)))
        .mount(&server)
        .await;

    client.sign_in("admin", "s3cret", "", None).await.unwrap();

    assert!(clone.is_signed_in().await);
}

#[tokio::test]
async fn given_server_info_endpoint_when_queried_then_versions_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/serverinfo"))
        .respond_with(xml(
            r#"<tsResponse>
  <serverInfo>
    <productVersion build="10000.16.0101.1234">10.0</productVersion>
    <restApiVersion>2.0</restApiVersion>
  </serverInfo>
</tsResponse>"#,
        ))
        .mount(&server)
        .await;

    let info = client_for(&server).server_info().await.unwrap();

    let product = info.product_version.unwrap();
    assert_eq!(product.version, "10.0");
    assert_eq!(product.build.as_deref(), Some("10000.16.0101.1234"));
    assert_eq!(info.rest_api_version.as_deref(), Some("2.0"));
}

#[tokio::test]
async fn given_include_storage_when_querying_site_then_usage_returned() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/2.0/sites/{TEST_SITE_ID}")))
        .and(query_param("includeStorage", "true"))
        .respond_with(xml(format!(
            r#"<tsResponse>
  <site id="{TEST_SITE_ID}" name="Default" contentUrl="" storageQuota="1024">
    <usage number-of-users="12" storage="256"/>
  </site>
</tsResponse>"#
        )))
        .expect(1)
        .mount(&server)
        .await;

    let site = client.query_site(TEST_SITE_ID, true).await.unwrap();

    assert_eq!(site.storage_quota, Some(1024));
    let usage = site.usage.unwrap();
    assert_eq!(usage.number_of_users, 12);
    assert_eq!(usage.storage, 256);
}

/// **VALUE**: Verifies site names are percent-encoded as one path segment.
///
/// **BUG THIS CATCHES**: Would catch names being spliced into the URL verbatim, which
/// breaks on spaces and lets a `/` in a name address a different resource.
#[tokio::test]
async fn given_site_name_with_space_and_slash_when_querying_by_name_then_segment_encoded() {
    // GIVEN: A site whose name needs escaping
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/sites/Finance%20EU%2FUK"))
        .and(query_param("key", "name"))
        .respond_with(xml(r#"<tsResponse><site id="s9" name="Finance EU/UK"/></tsResponse>"#))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Querying by name
    let site = client.query_site_by_name("Finance EU/UK", false).await.unwrap();

    // THEN: The encoded request matched
    assert_eq!(site.id.as_deref(), Some("s9"));
}

#[tokio::test]
async fn given_content_url_when_querying_site_then_content_url_key_used() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/sites/finance"))
        .and(query_param("key", "contentUrl"))
        .respond_with(xml(r#"<tsResponse><site id="s2" contentUrl="finance"/></tsResponse>"#))
        .expect(1)
        .mount(&server)
        .await;

    let site = client.query_site_by_content_url("finance", false).await.unwrap();

    assert_eq!(site.content_url.as_deref(), Some("finance"));
}

#[tokio::test]
async fn given_project_when_created_then_xml_body_sent_and_project_returned() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("/api/2.0/sites/{TEST_SITE_ID}/projects")))
        .and(header("Content-Type", "application/xml"))
        .and(body_string_contains(
            r#"<tsRequest><project name="Finance" description="Quarterly"/></tsRequest>"#,
        ))
        .respond_with(xml_with_status(
            201,
            r#"<tsResponse><project id="p-1" name="Finance" description="Quarterly"/></tsResponse>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_project(TEST_SITE_ID, &Project::named("Finance").description("Quarterly"))
        .await
        .unwrap();

    assert_eq!(created.id.as_deref(), Some("p-1"));
    assert_eq!(created.name.as_deref(), Some("Finance"));
}

#[tokio::test]
async fn given_projects_and_datasources_when_listed_then_all_returned() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/2.0/sites/{TEST_SITE_ID}/projects")))
        .respond_with(xml(
            r#"<tsResponse><projects>
  <project id="p1" name="default"/>
  <project id="p2" name="Finance"/>
</projects></tsResponse>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/2.0/sites/{TEST_SITE_ID}/datasources")))
        .respond_with(xml(
            r#"<tsResponse><datasources>
  <datasource id="d1" name="sales" type="sqlserver"><project id="p2"/><owner id="u1"/></datasource>
</datasources></tsResponse>"#,
        ))
        .mount(&server)
        .await;

    let projects = client.query_projects(TEST_SITE_ID).await.unwrap();
    let datasources = client.query_datasources(TEST_SITE_ID).await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].name.as_deref(), Some("Finance"));
    assert_eq!(datasources.len(), 1);
    assert_eq!(datasources[0].kind.as_deref(), Some("sqlserver"));
    assert_eq!(
        datasources[0].project.as_ref().and_then(|p| p.id.as_deref()),
        Some("p2")
    );
}

#[tokio::test]
async fn given_empty_collections_when_listed_then_empty_vectors() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/2.0/sites/{TEST_SITE_ID}/projects")))
        .respond_with(xml("<tsResponse><projects/></tsResponse>"))
        .mount(&server)
        .await;

    let projects = client.query_projects(TEST_SITE_ID).await.unwrap();

    assert!(projects.is_empty());
}

#[tokio::test]
async fn given_user_on_site_when_queried_then_user_decoded() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/2.0/sites/{TEST_SITE_ID}/users/{TEST_USER_ID}"
        )))
        .respond_with(xml(format!(
            r#"<tsResponse><user id="{TEST_USER_ID}" name="jdoe" siteRole="Publisher" fullName="J. Doe"/></tsResponse>"#
        )))
        .mount(&server)
        .await;

    let user = client
        .query_user_on_site(TEST_SITE_ID, TEST_USER_ID)
        .await
        .unwrap();

    assert_eq!(user.name.as_deref(), Some("jdoe"));
    assert_eq!(user.site_role.as_deref(), Some("Publisher"));
}

/// **VALUE**: Verifies each delete hits its resource path with DELETE.
///
/// **BUG THIS CATCHES**: Would catch a datasource delete addressed under `projects/`,
/// which deletes nothing (or the wrong thing) while reporting success.
#[tokio::test]
async fn given_delete_endpoints_when_called_then_correct_paths_used() {
    // GIVEN: Mocks for every delete path, each expected exactly once
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    for (url_path, key) in [
        (format!("/api/2.0/sites/{TEST_SITE_ID}/datasources/d1"), None),
        (format!("/api/2.0/sites/{TEST_SITE_ID}/projects/p1"), None),
        (String::from("/api/2.0/sites/s-old"), None),
        (String::from("/api/2.0/sites/Old%20Site"), Some("name")),
        (String::from("/api/2.0/sites/oldsite"), Some("contentUrl")),
    ] {
        let mut mock = Mock::given(method("DELETE")).and(path(url_path));
        if let Some(key) = key {
            mock = mock.and(query_param("key", key));
        }
        mock.respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    // WHEN: Calling every delete operation
    client.delete_datasource(TEST_SITE_ID, "d1").await.unwrap();
    client.delete_project(TEST_SITE_ID, "p1").await.unwrap();
    client.delete_site("s-old").await.unwrap();
    client.delete_site_by_name("Old Site").await.unwrap();
    client.delete_site_by_content_url("oldsite").await.unwrap();

    // THEN: `expect(1)` on each mock is verified when the server drops
}
