use serde::{Deserialize, Serialize};

/// A project on a site. Datasources and workbooks live inside projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Project {
    /// A project to be created; the server assigns the id.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A reference to an existing project, as embedded in publish metadata.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// `<projects>` collection element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projects {
    #[serde(rename = "project", default)]
    pub projects: Vec<Project>,
}

impl Projects {
    /// Order projects by name. Unnamed projects sort first; ties keep server order.
    pub fn sort_by_name(&mut self) {
        self.projects.sort_by(|a, b| a.name.cmp(&b.name));
    }
}
