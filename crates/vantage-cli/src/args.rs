//! Command-line argument definitions for the Vantage CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. The view to operate on is always given as a generator
//! command (a program that prints a diagram-source envelope), e.g.
//! `--view "cargo run --quiet --example fantastic_webapp"`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the Vantage diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

/// The Vantage subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the generated diagram code
    Dump {
        /// The view command to generate
        #[arg(long)]
        view: String,

        /// Dump the diagram code and its source files as a JSON object
        #[arg(long, default_value_t = false)]
        as_json: bool,
    },

    /// Render the view to an SVG file
    Render {
        /// The view command to render
        #[arg(long)]
        view: String,

        /// Directory the SVG is written into
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },

    /// Live preview: render, serve, and re-render on source changes
    Dev {
        /// The view command to develop
        #[arg(long)]
        view: String,
    },

    /// Render the view and upload the SVG to Google Cloud Storage
    Build {
        /// The view command to build
        #[arg(long)]
        view: String,

        /// Path to a file containing a GCS access token; when omitted the
        /// token is obtained from `gcloud auth print-access-token`
        #[arg(long)]
        gcs_credentials: Option<PathBuf>,

        /// Name of the bucket on Google Cloud Storage
        #[arg(long)]
        bucket_name: String,

        /// Name of the object on Google Cloud Storage; defaults to
        /// `<workspace name>.svg`
        #[arg(long)]
        object_name: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dump_with_flags() {
        let args = Args::parse_from([
            "vantage",
            "dump",
            "--view",
            "cargo run --quiet --example fantastic_webapp",
            "--as-json",
        ]);
        match args.command {
            Command::Dump { view, as_json } => {
                assert!(view.starts_with("cargo run"));
                assert!(as_json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn render_defaults_output_directory() {
        let args = Args::parse_from(["vantage", "render", "--view", "./view"]);
        match args.command {
            Command::Render { output, .. } => assert_eq!(output, PathBuf::from("output")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let args = Args::parse_from(["vantage", "dev", "--view", "./view", "--log-level", "debug"]);
        assert_eq!(args.log_level, "debug");
    }
}
