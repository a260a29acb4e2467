//! Configuration types for the Vantage pipeline.
//!
//! This module provides configuration structures controlling how diagrams are
//! rendered and previewed. All types implement [`serde::Deserialize`] so the
//! CLI can load them from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining renderer and preview settings.
//! - [`RendererConfig`] - Selects and parameterizes the SVG renderer.
//! - [`PreviewConfig`] - Controls the live-preview server.

use std::time::Duration;

use serde::Deserialize;

use crate::error::VantageError;
use crate::render::{CommandRenderer, KrokiRenderer, Renderer};

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Renderer configuration section.
    #[serde(default)]
    renderer: RendererConfig,

    /// Live-preview configuration section.
    #[serde(default)]
    preview: PreviewConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(renderer: RendererConfig, preview: PreviewConfig) -> Self {
        Self { renderer, preview }
    }

    /// Returns the renderer configuration.
    pub fn renderer(&self) -> &RendererConfig {
        &self.renderer
    }

    /// Returns the preview configuration.
    pub fn preview(&self) -> &PreviewConfig {
        &self.preview
    }
}

/// Which renderer implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererMode {
    /// POST diagram code to a kroki server.
    #[default]
    Kroki,
    /// Pipe diagram code through a local command.
    Command,
}

/// Renderer selection and parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Renderer implementation.
    mode: RendererMode,

    /// Kroki endpoint, for [`RendererMode::Kroki`].
    endpoint: String,

    /// Request timeout in seconds, for [`RendererMode::Kroki`].
    timeout_secs: u64,

    /// Renderer command line, for [`RendererMode::Command`]. The command
    /// receives diagram code on stdin and must print SVG on stdout.
    command: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            mode: RendererMode::default(),
            endpoint: "https://kroki.io".to_string(),
            timeout_secs: 30,
            command: Vec::new(),
        }
    }
}

impl RendererConfig {
    /// Returns the configured renderer mode.
    pub fn mode(&self) -> RendererMode {
        self.mode
    }

    /// Instantiates the configured renderer.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::Config`] if the command renderer is selected
    /// without a command, and [`VantageError::Render`] if the HTTP client
    /// cannot be built.
    pub fn build(&self) -> Result<Box<dyn Renderer>, VantageError> {
        match self.mode {
            RendererMode::Kroki => {
                let renderer =
                    KrokiRenderer::new(&self.endpoint, Duration::from_secs(self.timeout_secs))?;
                Ok(Box::new(renderer))
            }
            RendererMode::Command => {
                let (program, args) = self.command.split_first().ok_or_else(|| {
                    VantageError::Config(
                        "renderer.command must be set when renderer.mode is \"command\""
                            .to_string(),
                    )
                })?;
                Ok(Box::new(CommandRenderer::new(program, args.to_vec())))
            }
        }
    }
}

/// Live-preview server settings.
///
/// The preview server is an external command spawned in the preview
/// directory; `{port}` tokens in the command are replaced with the configured
/// port.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Static-file server command, run with the preview directory as its
    /// working directory.
    server_command: Vec<String>,

    /// Port the preview is reachable on.
    port: u16,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            server_command: [
                "python3",
                "-m",
                "http.server",
                "{port}",
                "--bind",
                "127.0.0.1",
            ]
            .map(String::from)
            .to_vec(),
            port: 8044,
        }
    }
}

impl PreviewConfig {
    /// Returns the preview port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the server command with `{port}` tokens substituted.
    pub fn server_command(&self) -> Vec<String> {
        self.server_command
            .iter()
            .map(|arg| arg.replace("{port}", &self.port.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_hosted_kroki() {
        let config = AppConfig::default();
        assert_eq!(config.renderer().mode(), RendererMode::Kroki);
        assert_eq!(config.renderer().endpoint, "https://kroki.io");
        assert_eq!(config.preview().port(), 8044);
    }

    #[test]
    fn new_assembles_the_given_sections() {
        let config = AppConfig::new(RendererConfig::default(), PreviewConfig::default());
        assert_eq!(config.renderer().mode(), RendererMode::Kroki);
        assert_eq!(config.preview().port(), 8044);
    }

    #[test]
    fn deserializes_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [renderer]
            mode = "command"
            command = ["structurizr-renderer", "--format", "svg"]

            [preview]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.renderer().mode(), RendererMode::Command);
        assert_eq!(config.preview().port(), 9000);
        // Unset fields keep their defaults.
        assert_eq!(config.renderer().timeout_secs, 30);
    }

    #[test]
    fn command_mode_without_command_is_a_config_error() {
        let config: AppConfig = toml::from_str("[renderer]\nmode = \"command\"\n").unwrap();
        assert!(matches!(
            config.renderer().build(),
            Err(VantageError::Config(_))
        ));
    }

    #[test]
    fn port_token_is_substituted() {
        let config: AppConfig = toml::from_str(
            "[preview]\nserver_command = [\"serve\", \"--port\", \"{port}\"]\nport = 7000\n",
        )
        .unwrap();
        assert_eq!(
            config.preview().server_command(),
            ["serve", "--port", "7000"]
        );
    }
}
