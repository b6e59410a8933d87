use crate::error::model_error::ModelError;
use crate::{ConnectionCredentials, Datasource, ErrorLocation, Project, User};

/// Builder for the metadata part of a datasource publish request.
///
/// The name ends up inside a `Content-Disposition` header of the multipart
/// body (`filename="<name>.tds"`), so it is validated here rather than left to
/// the server to reject.
#[derive(Debug, Default)]
pub struct DatasourceBuilder {
    name: Option<String>,
    project_id: Option<String>,
    owner_id: Option<String>,
    connection_credentials: Option<ConnectionCredentials>,
}

impl DatasourceBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn with_connection_credentials(mut self, credentials: ConnectionCredentials) -> Self {
        self.connection_credentials = Some(credentials);
        self
    }

    /// Build the Datasource with validation.
    #[track_caller]
    pub fn build(self) -> Result<Datasource, ModelError> {
        let name = self.name.ok_or_else(|| ModelError::Validation {
            message: String::from("Datasource name is required"),
            location: ErrorLocation::caller(),
        })?;

        if name.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Datasource name cannot be empty"),
                location: ErrorLocation::caller(),
            });
        }

        if name.contains(['"', '\r', '\n']) {
            return Err(ModelError::Validation {
                message: format!("Datasource name cannot contain quotes or line breaks: {name:?}"),
                location: ErrorLocation::caller(),
            });
        }

        if let Some(project_id) = &self.project_id
            && project_id.is_empty()
        {
            return Err(ModelError::Validation {
                message: String::from("Project id cannot be empty"),
                location: ErrorLocation::caller(),
            });
        }

        Ok(Datasource {
            name: Some(name),
            project: self.project_id.map(Project::with_id),
            owner: self.owner_id.map(User::with_id),
            connection_credentials: self.connection_credentials,
            ..Datasource::default()
        })
    }
}
