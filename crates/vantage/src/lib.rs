//! Vantage - a C4 diagrams-as-code pipeline.
//!
//! Generation, rendering, and upload for C4 architecture diagrams. Diagrams
//! are described by view programs built on [`vantage_core`]; this crate runs
//! them in a child process, hands the resulting diagram code to an external
//! SVG renderer, and optionally uploads the result to cloud storage.

pub mod config;
pub mod render;
pub mod storage;

mod error;
mod generate;

pub use error::VantageError;
pub use generate::{GenerateError, ViewCommand};
pub use vantage_core::DiagramSource;
pub use render::RenderError;
pub use storage::StorageError;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use config::AppConfig;

/// Name of the SVG file written into preview and scratch directories.
pub const DIAGRAM_FILE: &str = "diagram.svg";

/// Ties configuration, generation, and rendering together.
///
/// # Examples
///
/// ```rust,no_run
/// use vantage::{Pipeline, ViewCommand, config::AppConfig};
///
/// let pipeline = Pipeline::new(AppConfig::default());
/// let view = ViewCommand::parse("cargo run --quiet --example fantastic_webapp")?;
///
/// let source = pipeline.generate(&view)?;
/// let svg = pipeline.render_svg(&source.code)?;
/// # Ok::<(), vantage::VantageError>(())
/// ```
#[derive(Default)]
pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the view program and returns its diagram source.
    ///
    /// # Errors
    ///
    /// Returns `VantageError::Generate` if the view program fails or emits a
    /// malformed envelope.
    pub fn generate(&self, view: &ViewCommand) -> Result<DiagramSource, VantageError> {
        info!(program = view.program(); "Generating diagram code");
        let source = view.run()?;
        debug!(name = source.name; "Diagram code generated");
        Ok(source)
    }

    /// Renders diagram code to an SVG string using the configured renderer.
    ///
    /// # Errors
    ///
    /// Returns `VantageError::Config` for an unusable renderer configuration
    /// and `VantageError::Render` for renderer failures.
    pub fn render_svg(&self, code: &str) -> Result<String, VantageError> {
        let renderer = self.config.renderer().build()?;
        let svg = renderer.render_svg(code)?;
        info!(svg_bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Renders diagram code and writes it as `diagram.svg` into `dir`,
    /// creating the directory if needed. Returns the written path.
    ///
    /// # Errors
    ///
    /// Same as [`Pipeline::render_svg`], plus I/O errors writing the file.
    pub fn render_to_dir(&self, code: &str, dir: &Path) -> Result<PathBuf, VantageError> {
        let svg = self.render_svg(code)?;
        fs::create_dir_all(dir)?;
        let path = dir.join(DIAGRAM_FILE);
        fs::write(&path, svg)?;
        info!(path = path.display().to_string(); "SVG written");
        Ok(path)
    }
}
