//! XML wire types for the Tableau REST API.
//!
//! Pure data: entities, the `tsRequest`/`tsResponse` envelopes they travel in,
//! and the `error` envelope returned with failing statuses. Scalar fields map to
//! XML attributes (`@name` in serde terms), nested records to child elements.
//! Optional fields that are `None` are left out of serialized requests.

pub mod credentials;
pub mod datasource;
pub mod envelope;
pub mod error;
pub mod project;
pub mod server_info;
pub mod site;
pub mod user;

#[cfg(test)]
mod tests;

pub use credentials::Credentials;
pub use datasource::{ConnectionCredentials, Datasource, DatasourceBuilder, Datasources};
pub use envelope::{
    AuthResponse, CreateProjectRequest, DatasourceCreateRequest, DatasourceResponse,
    ErrorResponse, ProjectResponse, QueryDatasourcesResponse, QueryProjectsResponse,
    QuerySiteResponse, QuerySitesResponse, QueryUserOnSiteResponse, ServerInfoResponse,
    SignInRequest, ToXml, TsError,
};
pub use error::model_error::ModelError;
pub use project::{Project, Projects};
pub use server_info::{ProductVersion, ServerInfo};
pub use site::{Site, SiteUsage, Sites};
pub use user::User;

pub use common::ErrorLocation;
