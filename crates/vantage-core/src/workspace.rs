//! The top-level workspace container.

use log::debug;

use crate::dump::Dumper;
use crate::error::ModelError;
use crate::identifier::slug;
use crate::model::Model;
use crate::source::DiagramSource;
use crate::style::ElementStyle;
use crate::view::View;

/// A named workspace: one model, its views, and workspace-wide styles.
///
/// This is the root object a view program builds and hands to [`crate::emit`].
///
/// # Examples
///
/// ```
/// use vantage_core::{Person, SoftwareSystem, View, Workspace};
///
/// let mut workspace = Workspace::new("my_solution");
/// let customer = workspace.model_mut().add_person(Person::new("Customer"))?;
/// let system = workspace
///     .model_mut()
///     .add_software_system(SoftwareSystem::new("Web App"))?;
/// workspace.model_mut().relate(customer, system, "Uses")?;
/// workspace.add_view(View::system_context(system))?;
///
/// let code = workspace.dump();
/// assert!(code.starts_with("workspace {"));
/// # Ok::<(), vantage_core::ModelError>(())
/// ```
#[derive(Debug)]
pub struct Workspace {
    name: String,
    model: Model,
    views: Vec<View>,
    styles: Vec<ElementStyle>,
}

impl Workspace {
    /// Creates an empty workspace. The name is used for output file naming
    /// and upload object defaults, not for the diagram itself.
    pub fn new(name: impl Into<String>) -> Self {
        Workspace {
            name: name.into(),
            model: Model::new(),
            views: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// The workspace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read access to the model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Mutable access to the model, for adding elements and relationships.
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// Registers a view.
    ///
    /// A view without an explicit key gets one derived from its target
    /// element's name and zoom level (e.g. `web_app_containers`).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if the view's target does not
    /// belong to this workspace's model, or [`ModelError::DuplicateViewKey`]
    /// if the (explicit or derived) key is already taken.
    pub fn add_view(&mut self, view: View) -> Result<(), ModelError> {
        let target = view.kind.target();
        self.model.check_id(target)?;

        let key = match &view.key {
            Some(key) => key.clone(),
            None => {
                let target_name = self
                    .model
                    .name_of(target)
                    .unwrap_or_default();
                format!("{}_{}", slug(target_name), view.kind.key_suffix())
            }
        };
        if self.views.iter().any(|v| v.key.as_deref() == Some(&key)) {
            return Err(ModelError::DuplicateViewKey(key));
        }

        debug!(key = key; "Registering view");
        let mut view = view;
        view.key = Some(key);
        self.views.push(view);
        Ok(())
    }

    /// Registers a tag-based element style.
    pub fn add_style(&mut self, style: ElementStyle) {
        self.styles.push(style);
    }

    pub(crate) fn views(&self) -> &[View] {
        &self.views
    }

    pub(crate) fn styles(&self) -> &[ElementStyle] {
        &self.styles
    }

    /// Serializes the workspace to Structurizr DSL diagram code.
    ///
    /// The output is deterministic for a given construction order: elements,
    /// relationships, views, and styles appear in insertion order.
    pub fn dump(&self) -> String {
        debug!(
            workspace = self.name,
            elements = self.model.len(),
            views = self.views.len();
            "Dumping workspace to diagram code"
        );
        Dumper::new().dump(self)
    }

    /// Bundles the diagram code with the source files that produced it.
    ///
    /// `sources` are the files the CLI should watch for live preview; view
    /// programs usually pass `file!()` plus any modules they include.
    pub fn diagram_source<I, P>(&self, sources: I) -> DiagramSource
    where
        I: IntoIterator<Item = P>,
        P: Into<std::path::PathBuf>,
    {
        DiagramSource {
            name: self.name.clone(),
            code: self.dump(),
            sources: sources.into_iter().map(Into::into).collect(),
        }
    }
}
