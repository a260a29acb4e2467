//! Error types for model construction and emission.

use thiserror::Error;

/// The error type for building and serializing C4 models.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An element with this name already exists in the same scope.
    #[error("duplicate element name {name:?} in {scope}")]
    DuplicateName {
        /// The offending element name.
        name: String,
        /// Human-readable description of the scope (model root or parent element).
        scope: String,
    },

    /// A view with this key is already registered on the workspace.
    #[error("duplicate view key {0:?}")]
    DuplicateViewKey(String),

    /// An element id does not belong to this model.
    ///
    /// Ids are only meaningful for the model that issued them; passing an id
    /// from another model (or after the model was replaced) ends up here.
    #[error("element id #{0} is not part of this model")]
    UnknownElement(usize),

    /// A color string is not of the form `#rrggbb`.
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    /// The diagram-source envelope could not be serialized.
    #[error("failed to serialize diagram source: {0}")]
    Emit(#[from] serde_json::Error),
}
