//! The preview web server child process.

use std::path::Path;
use std::process::{Child, Command, Stdio};

use log::{info, warn};

use vantage::config::PreviewConfig;

use crate::error::CliError;

/// A static-file server spawned for the preview directory.
///
/// The child is killed when the guard is dropped, so the server never
/// outlives the `dev` loop, including on error paths.
pub(crate) struct PreviewServer {
    child: Child,
    program: String,
}

impl PreviewServer {
    /// Spawns the configured server command with `dir` as working directory.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::PreviewSpawn`] if the command is empty or cannot
    /// be started.
    pub(crate) fn spawn(config: &PreviewConfig, dir: &Path) -> Result<Self, CliError> {
        let command = config.server_command();
        let (program, args) = command.split_first().ok_or_else(|| CliError::PreviewSpawn {
            program: String::new(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "preview.server_command is empty",
            ),
        })?;

        let child = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CliError::PreviewSpawn {
                program: program.clone(),
                source,
            })?;

        info!(
            program = program,
            pid = child.id(),
            dir = dir.display().to_string();
            "Preview server started"
        );
        Ok(PreviewServer {
            child,
            program: program.clone(),
        })
    }
}

impl Drop for PreviewServer {
    fn drop(&mut self) {
        if let Err(err) = self.child.kill() {
            warn!(program = self.program, err:% = err; "Failed to kill preview server");
            return;
        }
        let _ = self.child.wait();
        info!(program = self.program; "Preview server stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn spawns_and_kills_the_server() {
        let dir = tempfile::tempdir().unwrap();
        let config: PreviewConfig = toml::from_str("server_command = [\"sleep\", \"60\"]").unwrap();

        let server = PreviewServer::spawn(&config, dir.path()).unwrap();
        let pid = server.child.id();
        drop(server);

        // After the guard is dropped the process must be gone.
        let alive = std::process::Command::new("kill")
            .args(["-0", &pid.to_string()])
            .status()
            .unwrap()
            .success();
        assert!(!alive);
    }

    #[test]
    fn missing_server_command_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config: PreviewConfig =
            toml::from_str("server_command = [\"definitely-not-a-server-5a1c\"]").unwrap();

        assert!(matches!(
            PreviewServer::spawn(&config, dir.path()),
            Err(CliError::PreviewSpawn { .. })
        ));
    }
}
