//! `tsRequest` / `tsResponse` envelopes.
//!
//! Response wrappers only name the child they care about; the root element
//! name, namespace declarations and siblings such as `<pagination>` are ignored
//! when decoding.

use crate::{
    Credentials, Datasource, Datasources, Project, Projects, ServerInfo, Site, Sites, User,
};

use std::fmt;

use quick_xml::se::SeError;
use serde::{Deserialize, Serialize};

/// Request bodies that serialize to a `<tsRequest>` document.
pub trait ToXml: Serialize {
    fn to_xml(&self) -> Result<String, SeError> {
        quick_xml::se::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tsRequest")]
pub struct SignInRequest {
    pub credentials: Credentials,
}

impl ToXml for SignInRequest {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tsRequest")]
pub struct CreateProjectRequest {
    pub project: Project,
}

impl ToXml for CreateProjectRequest {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tsRequest")]
pub struct DatasourceCreateRequest {
    pub datasource: Datasource,
}

impl ToXml for DatasourceCreateRequest {}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfoResponse {
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySitesResponse {
    pub sites: Sites,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySiteResponse {
    pub site: Site,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryProjectsResponse {
    pub projects: Projects,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectResponse {
    pub project: Project,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryDatasourcesResponse {
    pub datasources: Datasources,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasourceResponse {
    pub datasource: Datasource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryUserOnSiteResponse {
    pub user: User,
}

/// Body of every response with a status of 300 or above (404 excepted).
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: TsError,
}

/// `<error code="401002"><summary>…</summary><detail>…</detail></error>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsError {
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub detail: String,
}

impl fmt::Display for TsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Code:{}, Summary:{}, Detail:{}",
            self.code, self.summary, self.detail
        )
    }
}
