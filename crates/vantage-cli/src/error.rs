//! CLI error type with miette diagnostics.
//!
//! Pipeline errors carry no source spans, so the diagnostics here are plain
//! wrappers with help text for the mistakes users actually make (bad config,
//! missing preview server, unreachable renderer).

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use vantage::VantageError;

/// The error type for CLI operations.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(code(vantage::pipeline))]
    Pipeline(#[from] VantageError),

    #[error("failed to read configuration file {path}")]
    #[diagnostic(code(vantage::config::read))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration file {path}")]
    #[diagnostic(
        code(vantage::config::parse),
        help("expected TOML with optional [renderer] and [preview] sections")
    )]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to watch source files")]
    #[diagnostic(
        code(vantage::dev::watch),
        help("the view program must report source paths that exist relative to the working directory")
    )]
    Watch(#[from] notify::Error),

    #[error("failed to start the preview server {program:?}")]
    #[diagnostic(
        code(vantage::dev::preview),
        help("set preview.server_command in the configuration to a command available on this machine")
    )]
    PreviewSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize diagram source")]
    #[diagnostic(code(vantage::dump))]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    #[diagnostic(code(vantage::io))]
    Io(#[from] io::Error),
}
