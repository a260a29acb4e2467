//! Running a view program in a child process.
//!
//! The user's diagram lives in an ordinary program (the "view program") that
//! links `vantage-core` and prints a [`DiagramSource`] JSON envelope on its
//! last stdout line. This module spawns that program and parses the envelope.
//! Stderr is inherited so compiler output and the program's own logging stay
//! visible.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

use log::{debug, info};
use thiserror::Error;

use vantage_core::DiagramSource;

/// Errors from spawning or interpreting a view program.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The view command string contained no tokens.
    #[error("empty view command")]
    EmptyCommand,

    /// The view program could not be spawned.
    #[error("failed to spawn view command {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The view program ran but exited unsuccessfully.
    #[error("view command {program:?} exited with {status}")]
    Failed { program: String, status: ExitStatus },

    /// The view program exited successfully but printed no envelope.
    #[error("view command {program:?} produced no output")]
    NoOutput { program: String },

    /// The last stdout line was not a valid diagram-source envelope.
    #[error("invalid diagram-source envelope: {0}")]
    InvalidEnvelope(#[from] serde_json::Error),
}

/// A user-supplied command that generates a diagram when run.
///
/// Parsed from a whitespace-separated command line, e.g.
/// `cargo run --quiet --example fantastic_webapp`. Shell quoting is not
/// interpreted; arguments may not contain spaces.
#[derive(Debug, Clone)]
pub struct ViewCommand {
    program: String,
    args: Vec<String>,
}

impl ViewCommand {
    /// Parses a command line into program and arguments.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::EmptyCommand`] for a blank command line.
    pub fn parse(command_line: &str) -> Result<Self, GenerateError> {
        let mut tokens = command_line.split_whitespace().map(str::to_string);
        let program = tokens.next().ok_or(GenerateError::EmptyCommand)?;
        Ok(ViewCommand {
            program,
            args: tokens.collect(),
        })
    }

    /// The program name, for log and error messages.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs the view program and parses its envelope.
    ///
    /// The envelope is expected on the last non-empty stdout line, which
    /// tolerates programs that print other diagnostics to stdout first.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] if the program cannot be spawned, exits
    /// unsuccessfully, or prints a malformed envelope.
    pub fn run(&self) -> Result<DiagramSource, GenerateError> {
        info!(program = self.program, args:? = self.args; "Running view program");

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| GenerateError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GenerateError::Failed {
                program: self.program.clone(),
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let envelope_line = stdout
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| GenerateError::NoOutput {
                program: self.program.clone(),
            })?;

        let source: DiagramSource = serde_json::from_str(envelope_line.trim())?;
        debug!(
            name = source.name,
            code_bytes = source.code.len(),
            sources = source.sources.len();
            "View program produced diagram source"
        );
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn parse_splits_program_and_args() {
        let cmd = ViewCommand::parse("cargo run --quiet --example fantastic_webapp").unwrap();
        assert_eq!(cmd.program(), "cargo");
        assert_eq!(cmd.args, ["run", "--quiet", "--example", "fantastic_webapp"]);
    }

    #[test]
    fn parse_rejects_blank_command() {
        assert!(matches!(
            ViewCommand::parse("   "),
            Err(GenerateError::EmptyCommand)
        ));
    }

    #[test]
    fn spawn_failure_names_the_program() {
        let cmd = ViewCommand::parse("definitely-not-a-real-program-5a1c").unwrap();
        match cmd.run() {
            Err(GenerateError::Spawn { program, .. }) => {
                assert_eq!(program, "definitely-not-a-real-program-5a1c");
            }
            other => panic!("expected spawn error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    fn script_command(dir: &std::path::Path, body: &str) -> ViewCommand {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("view.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        ViewCommand::parse(path.to_str().unwrap()).unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn run_parses_last_stdout_line() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = script_command(
            dir.path(),
            concat!(
                "echo preamble\n",
                r#"printf '%s\n' '{"name":"demo","code":"workspace {\n}\n","sources":["views/demo.rs"]}'"#,
            ),
        );

        let source = cmd.run().unwrap();
        assert_eq!(source.name, "demo");
        assert!(source.code.starts_with("workspace {"));
        assert_eq!(source.sources.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = script_command(dir.path(), "exit 3");
        assert!(matches!(cmd.run(), Err(GenerateError::Failed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn garbage_output_is_an_envelope_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = script_command(dir.path(), "echo not-json");
        assert!(matches!(cmd.run(), Err(GenerateError::InvalidEnvelope(_))));
    }
}
