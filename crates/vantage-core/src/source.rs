//! The JSON envelope exchanged between view programs and the CLI.
//!
//! A view program builds a [`crate::Workspace`] and calls [`emit`]. The CLI
//! runs the view program as a child process, reads its stdout, and parses the
//! envelope back into a [`DiagramSource`].

use std::io::{self, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::workspace::Workspace;

/// Diagram code plus provenance, as produced by a view program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramSource {
    /// Workspace name, used for output file and upload object naming.
    pub name: String,
    /// The diagram code (Structurizr DSL text).
    pub code: String,
    /// Source files that produced the workspace. The live-preview loop
    /// watches these and regenerates on change.
    pub sources: Vec<PathBuf>,
}

/// Serializes the workspace envelope to stdout.
///
/// This is the last call of a view program. `sources` should name the files
/// that define the workspace, typically `&[file!()]`.
///
/// # Errors
///
/// Returns [`ModelError::Emit`] if serialization fails and an I/O error if
/// stdout is closed.
///
/// # Examples
///
/// ```no_run
/// use vantage_core::{Workspace, emit};
///
/// let workspace = Workspace::new("my_solution");
/// emit(&workspace, &[file!()]).expect("emit failed");
/// ```
pub fn emit(workspace: &Workspace, sources: &[&str]) -> Result<(), ModelError> {
    let envelope = workspace.diagram_source(sources.iter().copied());
    let json = serde_json::to_string(&envelope)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").map_err(|err| ModelError::Emit(serde_json::Error::io(err)))?;
    Ok(())
}
