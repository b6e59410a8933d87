use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URL fragment identifying the site; the empty string is the default site.
    #[serde(rename = "@contentUrl", default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(rename = "@adminMode", default, skip_serializing_if = "Option::is_none")]
    pub admin_mode: Option<String>,
    #[serde(rename = "@userQuota", default, skip_serializing_if = "Option::is_none")]
    pub user_quota: Option<String>,
    #[serde(rename = "@storageQuota", default, skip_serializing_if = "Option::is_none")]
    pub storage_quota: Option<u64>,
    #[serde(rename = "@state", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "@statusReason", default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    /// Only present when queried with `includeStorage=true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<SiteUsage>,
}

impl Site {
    pub fn with_content_url(content_url: impl Into<String>) -> Self {
        Self {
            content_url: Some(content_url.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteUsage {
    #[serde(rename = "@number-of-users", default)]
    pub number_of_users: u64,
    #[serde(rename = "@storage", default)]
    pub storage: u64,
}

/// `<sites>` collection element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sites {
    #[serde(rename = "site", default)]
    pub sites: Vec<Site>,
}
