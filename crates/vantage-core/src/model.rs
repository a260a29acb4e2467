//! The element arena and relationship store.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use log::trace;

use crate::element::{
    Component, ComponentId, Container, ContainerId, Element, ElementId, ElementKind, Person,
    PersonId, SoftwareSystem, SystemId,
};
use crate::error::ModelError;
use crate::relationship::Relationship;

/// Serial numbers distinguishing models within a process, so that an element
/// id cannot be spent in a model other than the one that issued it.
static MODEL_SERIAL: AtomicU64 = AtomicU64::new(0);

/// The model section of a workspace: elements plus relationships.
///
/// Elements are stored in insertion order, which makes the emitted diagram
/// code deterministic for a given construction order. Element names must be
/// unique within their scope (the model root for people and software systems,
/// the parent element for containers and components).
///
/// # Examples
///
/// ```
/// use vantage_core::{Model, Person, Relationship, SoftwareSystem};
///
/// let mut model = Model::new();
/// let customer = model.add_person(Person::new("Customer"))?;
/// let webapp = model.add_software_system(SoftwareSystem::new("Web App"))?;
/// model.add_relationship(Relationship::new(customer, webapp).description("Uses"))?;
/// # Ok::<(), vantage_core::ModelError>(())
/// ```
#[derive(Debug)]
pub struct Model {
    serial: u64,
    elements: IndexMap<ElementId, Element>,
    relationships: Vec<Relationship>,
    next_index: usize,
}

impl Default for Model {
    fn default() -> Self {
        Model {
            serial: MODEL_SERIAL.fetch_add(1, Ordering::Relaxed),
            elements: IndexMap::new(),
            relationships: Vec::new(),
            next_index: 0,
        }
    }
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a person to the model root.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateName`] if a root element with the same
    /// name already exists.
    pub fn add_person(&mut self, spec: Person) -> Result<PersonId, ModelError> {
        let id = self.insert(Element {
            kind: ElementKind::Person,
            name: spec.name,
            description: spec.description,
            technology: None,
            tags: spec.tags,
            parent: None,
        })?;
        Ok(PersonId(id))
    }

    /// Adds a software system to the model root.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateName`] if a root element with the same
    /// name already exists.
    pub fn add_software_system(&mut self, spec: SoftwareSystem) -> Result<SystemId, ModelError> {
        let id = self.insert(Element {
            kind: ElementKind::SoftwareSystem,
            name: spec.name,
            description: spec.description,
            technology: None,
            tags: spec.tags,
            parent: None,
        })?;
        Ok(SystemId(id))
    }

    /// Adds a container inside the given software system.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if `parent` does not belong to
    /// this model, or [`ModelError::DuplicateName`] if the system already has
    /// a container with the same name.
    pub fn add_container(
        &mut self,
        parent: SystemId,
        spec: Container,
    ) -> Result<ContainerId, ModelError> {
        self.check_id(parent.into())?;
        let id = self.insert(Element {
            kind: ElementKind::Container,
            name: spec.name,
            description: spec.description,
            technology: spec.technology,
            tags: spec.tags,
            parent: Some(parent.into()),
        })?;
        Ok(ContainerId(id))
    }

    /// Adds a component inside the given container.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if `parent` does not belong to
    /// this model, or [`ModelError::DuplicateName`] if the container already
    /// has a component with the same name.
    pub fn add_component(
        &mut self,
        parent: ContainerId,
        spec: Component,
    ) -> Result<ComponentId, ModelError> {
        self.check_id(parent.into())?;
        let id = self.insert(Element {
            kind: ElementKind::Component,
            name: spec.name,
            description: spec.description,
            technology: spec.technology,
            tags: spec.tags,
            parent: Some(parent.into()),
        })?;
        Ok(ComponentId(id))
    }

    /// Adds a relationship after validating both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if either endpoint id was not
    /// issued by this model.
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<(), ModelError> {
        self.check_id(relationship.source)?;
        self.check_id(relationship.destination)?;
        trace!(
            source:% = relationship.source,
            destination:% = relationship.destination;
            "Adding relationship"
        );
        self.relationships.push(relationship);
        Ok(())
    }

    /// Shorthand for a described relationship, mirroring `a.uses(b, "...")`
    /// phrasing of C4 tooling.
    ///
    /// # Errors
    ///
    /// Same as [`Model::add_relationship`].
    pub fn relate(
        &mut self,
        source: impl Into<ElementId>,
        destination: impl Into<ElementId>,
        description: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.add_relationship(Relationship::new(source.into(), destination.into()).description(description))
    }

    /// Number of elements in the model.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the model has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The name of an element, if the id belongs to this model.
    pub fn name_of(&self, id: impl Into<ElementId>) -> Option<&str> {
        self.elements.get(&id.into()).map(|e| e.name.as_str())
    }

    pub(crate) fn check_id(&self, id: ElementId) -> Result<(), ModelError> {
        // The model serial is part of the key, so ids from other models miss
        // here even when their index coincides with one this model issued.
        if id.model == self.serial && self.elements.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::UnknownElement(id.index))
        }
    }

    pub(crate) fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Root elements in insertion order.
    pub(crate) fn roots(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .filter(|(_, e)| e.parent.is_none())
            .map(|(id, e)| (*id, e))
    }

    /// Direct children of `parent` in insertion order.
    pub(crate) fn children_of(&self, parent: ElementId) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .filter(move |(_, e)| e.parent == Some(parent))
            .map(|(id, e)| (*id, e))
    }

    pub(crate) fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    fn insert(&mut self, element: Element) -> Result<ElementId, ModelError> {
        let duplicate = self
            .elements
            .values()
            .any(|e| e.parent == element.parent && e.name == element.name);
        if duplicate {
            let scope = match element.parent.and_then(|p| self.get(p)) {
                Some(parent) => format!("element {:?}", parent.name),
                None => "the model root".to_string(),
            };
            return Err(ModelError::DuplicateName {
                name: element.name,
                scope,
            });
        }

        let id = ElementId {
            model: self.serial,
            index: self.next_index,
        };
        self.next_index += 1;
        trace!(id:% = id, name = element.name; "Adding element");
        self.elements.insert(id, element);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_root_name_is_rejected() {
        let mut model = Model::new();
        model.add_person(Person::new("Customer")).unwrap();
        let err = model.add_person(Person::new("Customer")).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateName { .. }));
    }

    #[test]
    fn same_name_in_different_scopes_is_fine() {
        let mut model = Model::new();
        let a = model
            .add_software_system(SoftwareSystem::new("A"))
            .unwrap();
        let b = model
            .add_software_system(SoftwareSystem::new("B"))
            .unwrap();
        model.add_container(a, Container::new("api")).unwrap();
        model.add_container(b, Container::new("api")).unwrap();
        assert_eq!(model.len(), 4);
    }

    #[test]
    fn foreign_id_is_rejected_even_when_indices_coincide() {
        let mut theirs = Model::new();
        let alice = theirs.add_person(Person::new("Alice")).unwrap();

        // Both models issue index 0 first, so only the model stamp can tell
        // `alice` apart from `bob`.
        let mut ours = Model::new();
        let bob = ours.add_person(Person::new("Bob")).unwrap();

        let err = ours
            .add_relationship(Relationship::new(alice, bob))
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownElement(_)));
        assert_eq!(ours.relationships().len(), 0);
    }

    #[test]
    fn foreign_id_is_not_resolvable_by_name() {
        let mut theirs = Model::new();
        let alice = theirs.add_person(Person::new("Alice")).unwrap();

        let mut ours = Model::new();
        ours.add_person(Person::new("Bob")).unwrap();

        assert_eq!(ours.name_of(alice), None);
    }

    #[test]
    fn fresh_model_is_empty_until_first_insert() {
        let mut model = Model::new();
        assert!(model.is_empty());
        model.add_person(Person::new("Customer")).unwrap();
        assert!(!model.is_empty());
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn children_preserve_insertion_order() {
        let mut model = Model::new();
        let sys = model
            .add_software_system(SoftwareSystem::new("Sys"))
            .unwrap();
        model.add_container(sys, Container::new("first")).unwrap();
        model.add_container(sys, Container::new("second")).unwrap();

        let names: Vec<_> = model
            .children_of(sys.into())
            .map(|(_, e)| e.name.clone())
            .collect();
        assert_eq!(names, ["first", "second"]);
    }
}
