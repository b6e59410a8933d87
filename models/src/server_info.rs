use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    #[serde(rename = "productVersion", default, skip_serializing_if = "Option::is_none")]
    pub product_version: Option<ProductVersion>,
    #[serde(rename = "restApiVersion", default, skip_serializing_if = "Option::is_none")]
    pub rest_api_version: Option<String>,
}

/// `<productVersion build="10000.16.0101.1234">10.0</productVersion>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVersion {
    #[serde(rename = "@build", default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    #[serde(rename = "$text", default)]
    pub version: String,
}
