//! C4 model of My Fantastic Solution.
//!
//! Run through the CLI, e.g.:
//! `vantage dump --view "cargo run --quiet --example fantastic_webapp"`

use vantage_core::{
    Component, Container, ElementStyle, Person, Relationship, SoftwareSystem, View, Workspace,
    emit,
};

fn main() -> Result<(), vantage_core::ModelError> {
    let mut workspace = Workspace::new("fantastic_webapp");
    let model = workspace.model_mut();

    // 1. Define the model
    let customer = model.add_person(Person::new("Rich Customer"))?;

    let webapp = model.add_software_system(SoftwareSystem::new("Fantastic Web App"))?;
    let frontend = model.add_container(webapp, Container::new("Smooth UI").technology("React"))?;
    let _renderer = model.add_component(frontend, Component::new("Document Renderer"))?;
    let backend_client = model.add_component(frontend, Component::new("Backend Client"))?;
    let backend = model.add_container(
        webapp,
        Container::new("Overengineered API").technology("Connexion"),
    )?;
    let db_client = model.add_component(backend, Component::new("Database Client"))?;

    let legacy = model.add_software_system(SoftwareSystem::new("Legacy Systems").tag("external"))?;
    let db = model.add_container(
        legacy,
        Container::new("Slow Database").tag("database").tag("external"),
    )?;

    // 2. Define the relationships
    model.relate(customer, frontend, "Uses")?;
    model.relate(backend_client, backend, "Sends requests to")?;
    model.add_relationship(
        Relationship::new(db_client, db)
            .description("Reads from and writes to")
            .technology("JDBC/HTTPS"),
    )?;

    // 3. Views and styling
    workspace.add_view(View::system_context(webapp))?;
    workspace.add_view(View::container(webapp).description("Containers of the web app"))?;
    workspace.add_style(
        ElementStyle::tag("external")
            .background("#807f7e")?
            .color("#ffffff")?,
    );

    emit(&workspace, &[file!()])
}
