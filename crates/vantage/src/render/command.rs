//! Renderer that shells out to a local renderer process.

use std::io::Write;
use std::process::{Command, Stdio};

use log::info;

use super::{RenderError, Renderer};

/// Renders diagram code by piping it through an external command.
///
/// The command receives the diagram code on stdin and must print the SVG
/// document on stdout, e.g. a local Structurizr or kroki CLI wrapper.
#[derive(Debug)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// Creates a renderer for the given program and arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandRenderer {
            program: program.into(),
            args,
        }
    }
}

impl Renderer for CommandRenderer {
    fn render_svg(&self, code: &str) -> Result<String, RenderError> {
        info!(program = self.program, args:? = self.args; "Rendering diagram via command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // A renderer that rejects the input may exit before draining stdin;
        // the broken pipe is surfaced as an exit-status error below instead.
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(code.as_bytes()) {
                if err.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(err.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status: output.status,
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
