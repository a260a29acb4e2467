//! Relationships between model elements.

use crate::element::ElementId;

/// A directed relationship between two elements of the same model.
///
/// Any two elements can be related regardless of kind or nesting level; the
/// C4 notation leaves it to the view which relationships become visible.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub(crate) source: ElementId,
    pub(crate) destination: ElementId,
    pub(crate) description: Option<String>,
    pub(crate) technology: Option<String>,
    pub(crate) tags: Vec<String>,
}

impl Relationship {
    /// Creates a relationship from `source` to `destination`.
    pub fn new(source: impl Into<ElementId>, destination: impl Into<ElementId>) -> Self {
        Relationship {
            source: source.into(),
            destination: destination.into(),
            description: None,
            technology: None,
            tags: Vec::new(),
        }
    }

    /// Sets the description shown on the arrow (e.g. "Reads from").
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the interaction technology (e.g. "JDBC/HTTPS").
    pub fn technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = Some(technology.into());
        self
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// The source element.
    pub fn source(&self) -> ElementId {
        self.source
    }

    /// The destination element.
    pub fn destination(&self) -> ElementId {
        self.destination
    }
}
