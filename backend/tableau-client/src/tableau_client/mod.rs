use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::error::api::ApiError;
use crate::multipart::{encode_datasource_publish, multipart_content_type};
use crate::request::{RequestDescriptor, XML_CONTENT_TYPE, build_request};
use crate::response::{classify_response, decode_response};
use crate::session::Session;
use crate::transport::build_http_client;

use common::{HttpStatusCode, RedactedToken};
use models::{
    AuthResponse, CreateProjectRequest, Credentials, Datasource, DatasourceCreateRequest,
    DatasourceResponse, Project, ProjectResponse, QueryDatasourcesResponse, QueryProjectsResponse,
    QuerySiteResponse, QuerySitesResponse, QueryUserOnSiteResponse, ServerInfo,
    ServerInfoResponse, SignInRequest, Site, ToXml, User,
};

use log::{debug, info};
use quick_xml::de::DeError;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::de::Error as _;
use url::Url;

const SITE_KEY_NAME: &str = "name";
const SITE_KEY_CONTENT_URL: &str = "contentUrl";
const TDS_DATASOURCE_TYPE: &str = "tds";

/// Handle to one Tableau Server.
///
/// Clones share the HTTP client and the session, so signing in once
/// authenticates every clone.
#[derive(Debug, Clone)]
pub struct TableauClient {
    config: ClientConfig,
    http: Client,
    session: Session,
}

impl TableauClient {
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if `config` fails validation and
    /// [`CoreError::Transport`] if the HTTP client (TLS material included)
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let http = build_http_client(config.transport())?;

        Ok(Self {
            config,
            http,
            session: Session::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn is_signed_in(&self) -> bool {
        self.session.is_signed_in().await
    }

    // ============================================
    // AUTHENTICATION
    // ============================================

    /// Sign in and keep the issued token for subsequent calls.
    ///
    /// `content_url` selects the site (`""` for the default site);
    /// `impersonate_user_id` signs in as another user when the account is allowed to.
    ///
    /// # Errors
    /// Any [`ApiError`]; a success body without a token is a `Decode` error.
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
        content_url: &str,
        impersonate_user_id: Option<&str>,
    ) -> Result<Credentials, ApiError> {
        let url = self.endpoint(&["auth", "signin"])?;

        let mut credentials = Credentials::sign_in(username, password, content_url);
        if let Some(user_id) = impersonate_user_id.filter(|id| !id.is_empty()) {
            credentials = credentials.impersonate(user_id);
        }
        let payload = SignInRequest { credentials }.to_xml()?;

        let descriptor = RequestDescriptor::post(url.as_str()).with_xml(payload);
        let (status, body) = self.execute(&descriptor, false).await?;
        let response: AuthResponse = decode_response(status, &body)?;

        let token = response
            .credentials
            .token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiError::decode(
                    status,
                    &body,
                    DeError::custom("sign-in response carries no session token"),
                )
            })?;

        self.session.set(RedactedToken::new(token)).await;
        info!("Signed in as '{username}' to site '{content_url}'");

        Ok(response.credentials)
    }

    /// Invalidate the session on the server, then forget the local token.
    ///
    /// The token is only dropped once the server accepted the sign-out; on
    /// error it is kept.
    ///
    /// # Errors
    /// Any [`ApiError`].
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["auth", "signout"])?;
        let descriptor = RequestDescriptor::post(url.as_str())
            .with_header(CONTENT_TYPE.as_str(), XML_CONTENT_TYPE);

        self.call_without_payload(&descriptor).await?;
        self.session.clear().await;
        info!("Signed out");
        Ok(())
    }

    // ============================================
    // SERVER & SITES
    // ============================================

    pub async fn server_info(&self) -> Result<ServerInfo, ApiError> {
        let url = self.endpoint(&["serverinfo"])?;
        let response: ServerInfoResponse = self.call(&RequestDescriptor::get(url.as_str())).await?;
        Ok(response.server_info)
    }

    pub async fn query_sites(&self) -> Result<Vec<Site>, ApiError> {
        let url = self.endpoint(&["sites"])?;
        let response: QuerySitesResponse = self.call(&RequestDescriptor::get(url.as_str())).await?;
        Ok(response.sites.sites)
    }

    pub async fn query_site(&self, site_id: &str, include_storage: bool) -> Result<Site, ApiError> {
        let mut url = self.endpoint(&["sites", site_id])?;
        if include_storage {
            url.query_pairs_mut().append_pair("includeStorage", "true");
        }
        let response: QuerySiteResponse = self.call(&RequestDescriptor::get(url.as_str())).await?;
        Ok(response.site)
    }

    pub async fn query_site_by_name(
        &self,
        name: &str,
        include_storage: bool,
    ) -> Result<Site, ApiError> {
        self.query_site_by_key(SITE_KEY_NAME, name, include_storage)
            .await
    }

    pub async fn query_site_by_content_url(
        &self,
        content_url: &str,
        include_storage: bool,
    ) -> Result<Site, ApiError> {
        self.query_site_by_key(SITE_KEY_CONTENT_URL, content_url, include_storage)
            .await
    }

    async fn query_site_by_key(
        &self,
        key: &str,
        value: &str,
        include_storage: bool,
    ) -> Result<Site, ApiError> {
        let mut url = self.endpoint(&["sites", value])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", key);
            if include_storage {
                query.append_pair("includeStorage", "true");
            }
        }
        let response: QuerySiteResponse = self.call(&RequestDescriptor::get(url.as_str())).await?;
        Ok(response.site)
    }

    pub async fn delete_site(&self, site_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["sites", site_id])?;
        self.delete(url).await
    }

    pub async fn delete_site_by_name(&self, name: &str) -> Result<(), ApiError> {
        self.delete_site_by_key(SITE_KEY_NAME, name).await
    }

    pub async fn delete_site_by_content_url(&self, content_url: &str) -> Result<(), ApiError> {
        self.delete_site_by_key(SITE_KEY_CONTENT_URL, content_url)
            .await
    }

    async fn delete_site_by_key(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let mut url = self.endpoint(&["sites", value])?;
        url.query_pairs_mut().append_pair("key", key);
        self.delete(url).await
    }

    // ============================================
    // PROJECTS
    // ============================================

    pub async fn query_projects(&self, site_id: &str) -> Result<Vec<Project>, ApiError> {
        let url = self.endpoint(&["sites", site_id, "projects"])?;
        let response: QueryProjectsResponse =
            self.call(&RequestDescriptor::get(url.as_str())).await?;
        Ok(response.projects.projects)
    }

    pub async fn create_project(&self, site_id: &str, project: &Project) -> Result<Project, ApiError> {
        let url = self.endpoint(&["sites", site_id, "projects"])?;
        let payload = CreateProjectRequest {
            project: project.clone(),
        }
        .to_xml()?;

        let descriptor = RequestDescriptor::post(url.as_str()).with_xml(payload);
        let response: ProjectResponse = self.call(&descriptor).await?;
        Ok(response.project)
    }

    pub async fn delete_project(&self, site_id: &str, project_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["sites", site_id, "projects", project_id])?;
        self.delete(url).await
    }

    // ============================================
    // DATASOURCES & USERS
    // ============================================

    pub async fn query_datasources(&self, site_id: &str) -> Result<Vec<Datasource>, ApiError> {
        let url = self.endpoint(&["sites", site_id, "datasources"])?;
        let response: QueryDatasourcesResponse =
            self.call(&RequestDescriptor::get(url.as_str())).await?;
        Ok(response.datasources.datasources)
    }

    /// Publish a `.tds` document with its metadata as one `multipart/mixed` request.
    ///
    /// `metadata.name` doubles as the uploaded file name. Build the metadata
    /// with [`models::DatasourceBuilder`] to have it validated.
    ///
    /// # Errors
    /// Any [`ApiError`]; metadata without a name fails before anything is sent.
    pub async fn publish_tds(
        &self,
        site_id: &str,
        metadata: &Datasource,
        tds: &[u8],
        overwrite: bool,
    ) -> Result<Datasource, ApiError> {
        let name = metadata
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::invalid_request("datasource metadata requires a name"))?;

        let mut url = self.endpoint(&["sites", site_id, "datasources"])?;
        url.query_pairs_mut()
            .append_pair("datasourceType", TDS_DATASOURCE_TYPE)
            .append_pair("overwrite", if overwrite { "true" } else { "false" });

        let metadata_xml = DatasourceCreateRequest {
            datasource: metadata.clone(),
        }
        .to_xml()?;

        let boundary = self.config.boundary();
        let payload = encode_datasource_publish(metadata_xml.as_bytes(), tds, name, boundary);

        let descriptor = RequestDescriptor::post(url.as_str())
            .with_header(CONTENT_TYPE.as_str(), multipart_content_type(boundary))
            .with_body(payload);

        let response: DatasourceResponse = self.call(&descriptor).await?;
        info!("Published datasource '{name}' to site {site_id}");
        Ok(response.datasource)
    }

    pub async fn delete_datasource(&self, site_id: &str, datasource_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["sites", site_id, "datasources", datasource_id])?;
        self.delete(url).await
    }

    pub async fn query_user_on_site(&self, site_id: &str, user_id: &str) -> Result<User, ApiError> {
        let url = self.endpoint(&["sites", site_id, "users", user_id])?;
        let response: QueryUserOnSiteResponse =
            self.call(&RequestDescriptor::get(url.as_str())).await?;
        Ok(response.user)
    }

    // ============================================
    // TRANSPORT PLUMBING
    // ============================================

    /// `<server>/api/<version>/<segments...>`, each segment percent-encoded.
    #[track_caller]
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.config.api_base())?;
        url.path_segments_mut()
            .map_err(|_| ApiError::invalid_request("server URL cannot be used as a base"))?
            .extend(segments);
        Ok(url)
    }

    async fn delete(&self, url: Url) -> Result<(), ApiError> {
        self.call_without_payload(&RequestDescriptor::delete(url.as_str()))
            .await
    }

    async fn call<T>(&self, descriptor: &RequestDescriptor) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let (status, body) = self.execute(descriptor, true).await?;
        decode_response(status, &body)
    }

    async fn call_without_payload(&self, descriptor: &RequestDescriptor) -> Result<(), ApiError> {
        let (status, body) = self.execute(descriptor, true).await?;
        classify_response(status, &body)
    }

    /// Send one request and read the whole body. Bodies are only logged when
    /// diagnostics are on and `log_bodies` is set (never for sign-in).
    async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        log_bodies: bool,
    ) -> Result<(HttpStatusCode, Vec<u8>), ApiError> {
        let token = self.session.token().await;
        let request = build_request(descriptor, token.as_ref())?;
        let log_bodies = log_bodies && self.config.debug();

        let method = request.method().clone();
        let url = request.url().clone();
        debug!("{method} {url}");
        if log_bodies && let Some(body) = &descriptor.body {
            debug!("{method} {url} request body: {}", String::from_utf8_lossy(body));
        }

        let response = self.http.execute(request).await?;
        let status = HttpStatusCode(response.status().as_u16());
        let body = response.bytes().await?.to_vec();

        debug!("{method} {url} -> HTTP {status} ({} bytes)", body.len());
        if log_bodies {
            debug!("{method} {url} response body: {}", String::from_utf8_lossy(&body));
        }

        Ok((status, body))
    }
}
