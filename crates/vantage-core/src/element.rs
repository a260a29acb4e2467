//! Element kinds of the C4 metamodel and their typed ids.
//!
//! Each element kind comes as a builder-style spec type ([`Person`],
//! [`SoftwareSystem`], [`Container`], [`Component`]) that is consumed by the
//! `Model::add_*` methods, which return a typed id. The typed ids encode the
//! containment hierarchy (a [`Container`] lives in a software system, a
//! [`Component`] in a container) so misplaced nesting does not compile.

use std::fmt;

/// Untyped handle to an element stored in a [`crate::Model`].
///
/// Ids are issued by the model on insertion and are only valid for the model
/// that issued them. Each id carries the serial number of its model, so an id
/// from another model is rejected even when the numeric index coincides with
/// one this model issued. All typed ids convert into `ElementId` for use in
/// relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub(crate) model: u64,
    pub(crate) index: usize,
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

macro_rules! typed_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) ElementId);

        impl From<$name> for ElementId {
            fn from(id: $name) -> ElementId {
                id.0
            }
        }
    };
}

typed_id! {
    /// Handle to a person element.
    PersonId
}
typed_id! {
    /// Handle to a software-system element.
    SystemId
}
typed_id! {
    /// Handle to a container element.
    ContainerId
}
typed_id! {
    /// Handle to a component element.
    ComponentId
}

/// Discriminates the four C4 element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Person,
    SoftwareSystem,
    Container,
    Component,
}

impl ElementKind {
    /// The Structurizr DSL keyword for this kind.
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            ElementKind::Person => "person",
            ElementKind::SoftwareSystem => "softwareSystem",
            ElementKind::Container => "container",
            ElementKind::Component => "component",
        }
    }
}

/// Element data as stored in the model arena.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) kind: ElementKind,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) technology: Option<String>,
    pub(crate) tags: Vec<String>,
    pub(crate) parent: Option<ElementId>,
}

macro_rules! common_builders {
    () => {
        /// Sets the description.
        pub fn description(mut self, description: impl Into<String>) -> Self {
            self.description = Some(description.into());
            self
        }

        /// Adds a tag. Tags select [`crate::ElementStyle`]s at render time.
        pub fn tag(mut self, tag: impl Into<String>) -> Self {
            self.tags.push(tag.into());
            self
        }
    };
}

/// Spec for a person (an actor outside or inside the modeled software).
#[derive(Debug, Clone)]
pub struct Person {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) tags: Vec<String>,
}

impl Person {
    /// Creates a person spec with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Person {
            name: name.into(),
            description: None,
            tags: Vec::new(),
        }
    }

    common_builders!();
}

/// Spec for a software system, the top granularity of the C4 model.
#[derive(Debug, Clone)]
pub struct SoftwareSystem {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) tags: Vec<String>,
}

impl SoftwareSystem {
    /// Creates a software-system spec with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        SoftwareSystem {
            name: name.into(),
            description: None,
            tags: Vec::new(),
        }
    }

    common_builders!();
}

/// Spec for a container (an independently deployable unit inside a system).
#[derive(Debug, Clone)]
pub struct Container {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) technology: Option<String>,
    pub(crate) tags: Vec<String>,
}

impl Container {
    /// Creates a container spec with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Container {
            name: name.into(),
            description: None,
            technology: None,
            tags: Vec::new(),
        }
    }

    /// Sets the implementation technology (e.g. "React", "PostgreSQL").
    pub fn technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = Some(technology.into());
        self
    }

    common_builders!();
}

/// Spec for a component (a grouping of related code inside a container).
#[derive(Debug, Clone)]
pub struct Component {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) technology: Option<String>,
    pub(crate) tags: Vec<String>,
}

impl Component {
    /// Creates a component spec with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Component {
            name: name.into(),
            description: None,
            technology: None,
            tags: Vec::new(),
        }
    }

    /// Sets the implementation technology.
    pub fn technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = Some(technology.into());
        self
    }

    common_builders!();
}
