//! The live-preview loop behind `vantage dev`.
//!
//! Flow: render once into a scratch directory, start the preview server over
//! that directory, then block on source-file changes and re-render. The
//! watched set is refreshed after every successful regeneration because the
//! view program decides which files it is built from.

use std::fs;
use std::path::PathBuf;

use log::{error, info};

use vantage::{Pipeline, ViewCommand};

use crate::error::CliError;
use crate::preview::PreviewServer;
use crate::watch::SourceWatcher;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Runs the preview loop; only returns on failure to set the loop up or when
/// the watcher backend dies. Regeneration failures (e.g. a view program that
/// currently does not compile) are logged and the loop keeps going.
pub(crate) fn run(pipeline: &Pipeline, view: &ViewCommand) -> Result<(), CliError> {
    let preview_dir = crate::scratch_dir();
    fs::create_dir_all(&preview_dir)?;
    fs::write(preview_dir.join("index.html"), INDEX_HTML)?;

    info!(dir = preview_dir.display().to_string(); "Preparing live preview");
    println!("Generating diagram...");
    let source = pipeline.generate(view)?;
    pipeline.render_to_dir(&source.code, &preview_dir)?;

    println!("Launching preview server...");
    let _server = PreviewServer::spawn(pipeline.config().preview(), &preview_dir)?;
    println!(
        "Preview of {} available at http://127.0.0.1:{}/",
        source.name,
        pipeline.config().preview().port()
    );

    let mut watcher = SourceWatcher::new()?;
    watcher.watch_sources(&source.sources)?;

    loop {
        watcher.wait_for_change()?;
        info!("Source change detected, regenerating");

        match regenerate(pipeline, view, &preview_dir) {
            Ok(sources) => watcher.watch_sources(&sources)?,
            Err(err) => error!(err:% = err; "Regeneration failed, keeping previous diagram"),
        }
    }
}

fn regenerate(
    pipeline: &Pipeline,
    view: &ViewCommand,
    preview_dir: &std::path::Path,
) -> Result<Vec<PathBuf>, CliError> {
    let source = pipeline.generate(view)?;
    pipeline.render_to_dir(&source.code, preview_dir)?;
    Ok(source.sources)
}
