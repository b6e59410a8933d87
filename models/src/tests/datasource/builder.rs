use crate::{ConnectionCredentials, DatasourceBuilder, ModelError};

/// **VALUE**: Verifies that builder validation rejects a missing name.
///
/// **WHY THIS MATTERS**: The publish request derives the multipart filename from the
/// datasource name. Without one the part header would read `filename=".tds"` and the
/// server rejects the upload with an opaque 400.
///
/// **BUG THIS CATCHES**: Would catch if the required-field check is removed during
/// refactoring or the builder silently defaults the name.
#[test]
fn given_missing_name_when_building_datasource_then_returns_validation_error() {
    // GIVEN: Builder with everything but a name
    let builder = DatasourceBuilder::default().with_project_id("proj-1");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Datasource name is required");
        }
    }
}

#[test]
fn given_blank_name_when_building_then_returns_validation_error() {
    let result = DatasourceBuilder::default().with_name("   ").build();

    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Datasource name cannot be empty");
        }
    }
}

/// **VALUE**: Rejects names that would break out of the quoted `filename` parameter.
///
/// **BUG THIS CATCHES**: A name like `evil"\r\nX-Injected: 1` reaching the multipart
/// encoder verbatim and forging part headers.
#[test]
fn given_name_with_quote_or_newline_when_building_then_returns_validation_error() {
    for name in ["sales\"2024", "line\nbreak", "carriage\rreturn"] {
        let result = DatasourceBuilder::default().with_name(name).build();
        assert!(result.is_err(), "{name:?} should be rejected");
    }
}

#[test]
fn given_empty_project_id_when_building_then_returns_validation_error() {
    let result = DatasourceBuilder::default()
        .with_name("sales")
        .with_project_id("")
        .build();

    match result.unwrap_err() {
        ModelError::Validation { message, location } => {
            assert_eq!(message, "Project id cannot be empty");
            assert!(location.file.contains("builder.rs"));
        }
    }
}

#[test]
fn given_complete_builder_when_building_then_nests_references_by_value() {
    // GIVEN: Every optional piece set
    let datasource = DatasourceBuilder::default()
        .with_name("sales")
        .with_project_id("proj-1")
        .with_owner_id("user-9")
        .with_connection_credentials(ConnectionCredentials::new("db", "pw", true))
        .build()
        .expect("valid datasource");

    // THEN: References carry only ids, server-assigned fields stay empty
    assert_eq!(datasource.name.as_deref(), Some("sales"));
    assert_eq!(
        datasource.project.and_then(|p| p.id).as_deref(),
        Some("proj-1")
    );
    assert_eq!(datasource.owner.and_then(|u| u.id).as_deref(), Some("user-9"));
    assert!(datasource.connection_credentials.unwrap().embed);
    assert!(datasource.id.is_none());
}
