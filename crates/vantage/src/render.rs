//! Rendering diagram code to SVG through an external renderer.
//!
//! Vantage never lays out diagrams itself; it hands the diagram code to a
//! renderer that understands Structurizr DSL. Two renderers are provided:
//! [`KrokiRenderer`] posts the code to a kroki server (the hosted
//! <https://kroki.io> by default), and [`CommandRenderer`] pipes the code
//! through a local renderer process.

mod command;
mod kroki;

pub use command::CommandRenderer;
pub use kroki::KrokiRenderer;

use std::io;

use thiserror::Error;

/// Errors from the rendering stage.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The HTTP request to the renderer failed.
    #[error("renderer request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The renderer answered with a non-success status.
    #[error("renderer returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The renderer command could not be spawned.
    #[error("failed to spawn renderer {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The renderer command exited unsuccessfully.
    #[error("renderer {program:?} exited with {status}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
    },

    /// The renderer produced output that is not UTF-8.
    #[error("renderer produced non-UTF-8 output")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error while talking to renderer: {0}")]
    Io(#[from] io::Error),
}

/// A renderer turning diagram code into an SVG document.
pub trait Renderer {
    /// Renders the given diagram code to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the renderer cannot be reached, rejects
    /// the diagram code, or produces unusable output.
    fn render_svg(&self, code: &str) -> Result<String, RenderError>;
}
