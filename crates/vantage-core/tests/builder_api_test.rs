//! Integration tests for the workspace builder API
//!
//! These tests exercise the public API end to end: building a model,
//! registering views and styles, and dumping diagram code.

use vantage_core::{
    Container, ElementStyle, ModelError, Person, Relationship, SoftwareSystem, View, Workspace,
};

fn fantastic_workspace() -> Workspace {
    let mut workspace = Workspace::new("fantastic_webapp");
    let model = workspace.model_mut();

    let customer = model.add_person(Person::new("Rich Customer")).unwrap();
    let webapp = model
        .add_software_system(SoftwareSystem::new("Fantastic Web App"))
        .unwrap();
    let frontend = model
        .add_container(webapp, Container::new("Smooth UI").technology("React"))
        .unwrap();
    let legacy = model
        .add_software_system(SoftwareSystem::new("Legacy Systems").tag("external"))
        .unwrap();
    let db = model
        .add_container(legacy, Container::new("Slow Database").tag("database"))
        .unwrap();

    model.relate(customer, frontend, "Uses").unwrap();
    model
        .add_relationship(
            Relationship::new(frontend, db)
                .description("Reads from and writes to")
                .technology("JDBC/HTTPS"),
        )
        .unwrap();

    workspace.add_view(View::system_context(webapp)).unwrap();
    workspace
        .add_style(ElementStyle::tag("external").background("#807f7e").unwrap());
    workspace
}

#[test]
fn dump_is_deterministic() {
    let first = fantastic_workspace().dump();
    let second = fantastic_workspace().dump();
    assert_eq!(first, second);
}

#[test]
fn dump_contains_full_hierarchy() {
    let code = fantastic_workspace().dump();

    assert!(code.starts_with("workspace {\n"));
    assert!(code.contains("model {"));
    assert!(code.contains("views {"));
    assert!(code.contains("rich_customer = person \"Rich Customer\""));
    assert!(code.contains("smooth_ui = container \"Smooth UI\" \"\" \"React\""));
    assert!(code.contains("slow_database = container \"Slow Database\" \"\" \"\" \"database\""));
    assert!(code.contains("systemContext fantastic_web_app \"fantastic_web_app_context\""));
}

#[test]
fn relationships_refer_to_element_identifiers() {
    let code = fantastic_workspace().dump();
    assert!(code.contains("rich_customer -> smooth_ui \"Uses\""));
    assert!(code.contains("smooth_ui -> slow_database \"Reads from and writes to\" \"JDBC/HTTPS\""));
}

#[test]
fn duplicate_view_keys_are_rejected() {
    let mut workspace = Workspace::new("dupes");
    let webapp = workspace
        .model_mut()
        .add_software_system(SoftwareSystem::new("Web App"))
        .unwrap();

    workspace
        .add_view(View::system_context(webapp).key("main"))
        .unwrap();
    let err = workspace
        .add_view(View::container(webapp).key("main"))
        .unwrap_err();
    assert!(matches!(err, ModelError::DuplicateViewKey(key) if key == "main"));
}

#[test]
fn derived_view_keys_do_not_collide_across_kinds() {
    let mut workspace = Workspace::new("derived");
    let webapp = workspace
        .model_mut()
        .add_software_system(SoftwareSystem::new("Web App"))
        .unwrap();

    workspace.add_view(View::system_context(webapp)).unwrap();
    workspace.add_view(View::container(webapp)).unwrap();

    let code = workspace.dump();
    assert!(code.contains("\"web_app_context\""));
    assert!(code.contains("\"web_app_containers\""));
}

#[test]
fn view_target_must_belong_to_the_workspace() {
    let mut other = Workspace::new("other");
    let foreign = other
        .model_mut()
        .add_software_system(SoftwareSystem::new("Foreign"))
        .unwrap();

    // The local model also issues its first id, so the foreign id's index
    // coincides with a valid one here.
    let mut workspace = Workspace::new("ws");
    workspace
        .model_mut()
        .add_software_system(SoftwareSystem::new("Local"))
        .unwrap();
    let err = workspace.add_view(View::system_context(foreign)).unwrap_err();
    assert!(matches!(err, ModelError::UnknownElement(_)));
}

#[test]
fn envelope_carries_code_and_sources() {
    let workspace = fantastic_workspace();
    let envelope = workspace.diagram_source(["views/app.rs", "views/shared.rs"]);

    assert_eq!(envelope.name, "fantastic_webapp");
    assert_eq!(envelope.code, workspace.dump());
    assert_eq!(envelope.sources.len(), 2);
}
