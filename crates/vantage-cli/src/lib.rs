//! CLI logic for the Vantage diagram tool.
//!
//! Each subcommand drives the [`vantage::Pipeline`]: `dump` prints diagram
//! code, `render` writes an SVG file, `dev` runs the live-preview loop, and
//! `build` uploads the rendered SVG to cloud storage.

pub mod error;

mod args;
mod config;
mod dev;
mod preview;
mod watch;

pub use args::{Args, Command};

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use vantage::storage::{CloudStorage, GcsStorage};
use vantage::{Pipeline, VantageError, ViewCommand};

use error::CliError;

/// Run the Vantage CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - View-program and renderer failures
/// - File I/O errors
/// - Preview and upload errors
pub fn run(args: &Args) -> Result<(), CliError> {
    let app_config = config::load_config(args.config.as_deref())?;
    let pipeline = Pipeline::new(app_config);

    match &args.command {
        Command::Dump { view, as_json } => dump(&pipeline, view, *as_json),
        Command::Render { view, output } => render(&pipeline, view, output),
        Command::Dev { view } => dev::run(&pipeline, &parse_view(view)?),
        Command::Build {
            view,
            gcs_credentials,
            bucket_name,
            object_name,
        } => build(
            &pipeline,
            view,
            gcs_credentials.as_deref(),
            bucket_name,
            object_name.as_deref(),
        ),
    }
}

fn dump(pipeline: &Pipeline, view: &str, as_json: bool) -> Result<(), CliError> {
    let source = pipeline.generate(&parse_view(view)?)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&source)?);
    } else {
        print!("{}", source.code);
    }
    Ok(())
}

fn render(pipeline: &Pipeline, view: &str, output: &Path) -> Result<(), CliError> {
    println!("Rendering SVG diagram...");
    let source = pipeline.generate(&parse_view(view)?)?;
    let svg = pipeline.render_svg(&source.code)?;

    fs::create_dir_all(output)?;
    let path = output.join(format!("{}.svg", file_stem(&source.name)));
    fs::write(&path, svg)?;

    info!(path = path.display().to_string(); "SVG exported successfully");
    println!("Rendered SVG saved in {}", path.display());
    Ok(())
}

fn build(
    pipeline: &Pipeline,
    view: &str,
    gcs_credentials: Option<&Path>,
    bucket_name: &str,
    object_name: Option<&str>,
) -> Result<(), CliError> {
    let source = pipeline.generate(&parse_view(view)?)?;
    let svg_path = pipeline.render_to_dir(&source.code, &scratch_dir())?;

    let storage = match gcs_credentials {
        Some(path) => GcsStorage::from_token_file(path),
        None => GcsStorage::from_gcloud(),
    }
    .map_err(VantageError::from)?;

    let object = object_name
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.svg", file_stem(&source.name)));
    let url = storage
        .upload_file(&svg_path, bucket_name, &object)
        .map_err(VantageError::from)?;

    println!("{url}");
    Ok(())
}

fn parse_view(view: &str) -> Result<ViewCommand, CliError> {
    ViewCommand::parse(view)
        .map_err(VantageError::from)
        .map_err(CliError::from)
}

/// Scratch directory shared by `dev` and `build`.
pub(crate) fn scratch_dir() -> PathBuf {
    env::temp_dir().join("vantage")
}

/// Turns a workspace name into a safe output file stem.
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "diagram".to_string()
    } else {
        stem
    }
}
