use crate::{Project, Projects};

#[test]
fn given_unordered_projects_when_sorted_by_name_then_names_ascend() {
    // GIVEN: Projects as the server listed them, one without a name
    let mut projects = Projects {
        projects: vec![
            Project::named("Sales"),
            Project::with_id("p-unnamed"),
            Project::named("Finance"),
            Project::named("default"),
        ],
    };

    // WHEN: Sorting by name
    projects.sort_by_name();

    // THEN: Byte order, unnamed first
    let names: Vec<_> = projects
        .projects
        .iter()
        .map(|project| project.name.as_deref())
        .collect();
    assert_eq!(
        names,
        vec![None, Some("Finance"), Some("Sales"), Some("default")]
    );
}

#[test]
fn given_duplicate_names_when_sorted_then_original_order_kept() {
    let mut projects = Projects {
        projects: vec![
            Project::named("Ops").description("second"),
            Project::named("Ops").description("first"),
        ],
    };

    projects.sort_by_name();

    assert_eq!(projects.projects[0].description.as_deref(), Some("second"));
}
