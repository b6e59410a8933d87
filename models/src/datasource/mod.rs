pub mod builder;

pub use builder::DatasourceBuilder;

use crate::{Project, User};

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datasource {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@contentUrl", default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(
        rename = "connectionCredentials",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_credentials: Option<ConnectionCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
}

/// `<datasources>` collection element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datasources {
    #[serde(rename = "datasource", default)]
    pub datasources: Vec<Datasource>,
}

/// Credentials the server uses to connect to the underlying database.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCredentials {
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@password", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Store the credentials with the datasource instead of prompting viewers.
    #[serde(rename = "@embed", default)]
    pub embed: bool,
}

impl ConnectionCredentials {
    pub fn new(name: impl Into<String>, password: impl Into<String>, embed: bool) -> Self {
        Self {
            name: Some(name.into()),
            password: Some(password.into()),
            embed,
        }
    }
}

impl fmt::Debug for ConnectionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionCredentials")
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("embed", &self.embed)
            .finish()
    }
}
