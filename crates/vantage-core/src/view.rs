//! Diagram views over the model.
//!
//! A view selects a scope (a software system or a container) and a zoom level
//! of the C4 notation. Every view emits `include *` and `autoLayout`, leaving
//! layout to the external renderer.

use crate::element::{ContainerId, ElementId, SystemId};

/// The scope and zoom level of a view.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ViewKind {
    /// A system-context diagram centered on a software system.
    SystemContext(SystemId),
    /// A container diagram of a software system.
    Container(SystemId),
    /// A component diagram of a container.
    Component(ContainerId),
}

impl ViewKind {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            ViewKind::SystemContext(_) => "systemContext",
            ViewKind::Container(_) => "container",
            ViewKind::Component(_) => "component",
        }
    }

    pub(crate) fn target(self) -> ElementId {
        match self {
            ViewKind::SystemContext(id) => id.into(),
            ViewKind::Container(id) => id.into(),
            ViewKind::Component(id) => id.into(),
        }
    }

    /// Suffix used when deriving a default view key.
    pub(crate) fn key_suffix(self) -> &'static str {
        match self {
            ViewKind::SystemContext(_) => "context",
            ViewKind::Container(_) => "containers",
            ViewKind::Component(_) => "components",
        }
    }
}

/// A single diagram view registered on a workspace.
#[derive(Debug, Clone)]
pub struct View {
    pub(crate) kind: ViewKind,
    pub(crate) key: Option<String>,
    pub(crate) description: Option<String>,
}

impl View {
    /// A system-context view of the given software system.
    pub fn system_context(system: SystemId) -> Self {
        View {
            kind: ViewKind::SystemContext(system),
            key: None,
            description: None,
        }
    }

    /// A container view of the given software system.
    pub fn container(system: SystemId) -> Self {
        View {
            kind: ViewKind::Container(system),
            key: None,
            description: None,
        }
    }

    /// A component view of the given container.
    pub fn component(container: ContainerId) -> Self {
        View {
            kind: ViewKind::Component(container),
            key: None,
            description: None,
        }
    }

    /// Sets an explicit view key. Keys must be unique per workspace; without
    /// one, a key is derived from the target element's name.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the view description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
