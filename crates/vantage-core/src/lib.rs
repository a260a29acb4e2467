//! Vantage core - C4 model types and diagram-code emission.
//!
//! This crate provides the modeling vocabulary of the C4 notation (people,
//! software systems, containers, components, relationships) as a builder-style
//! Rust API, plus serialization of a built [`Workspace`] to Structurizr DSL
//! text, the intermediate "diagram code" consumed by external renderers.
//!
//! View programs are ordinary Rust programs that construct a [`Workspace`] and
//! finish with [`emit`], which prints a JSON envelope ([`DiagramSource`]) on
//! stdout for the `vantage` CLI to pick up.

mod dump;
mod element;
mod error;
mod identifier;
mod model;
mod relationship;
mod source;
mod style;
mod view;
mod workspace;

pub use element::{
    Component, ComponentId, Container, ContainerId, ElementId, ElementKind, Person, PersonId,
    SoftwareSystem, SystemId,
};
pub use error::ModelError;
pub use model::Model;
pub use relationship::Relationship;
pub use source::{DiagramSource, emit};
pub use style::{Color, ElementStyle, Shape};
pub use view::View;
pub use workspace::Workspace;
