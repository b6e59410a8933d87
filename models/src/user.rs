use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@siteRole", default, skip_serializing_if = "Option::is_none")]
    pub site_role: Option<String>,
    #[serde(rename = "@fullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl User {
    /// A bare reference by id (impersonation target, datasource owner).
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}
