// src/exec/command.rs

//! Shell-command handler used by the `dirmon` binary.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{info, warn};

use super::backend::ChangeHandler;

/// Placeholder replaced by the changed path list.
pub const DEFAULT_TOKEN: &str = "%%";

/// Replace every occurrence of `token` in `template` with `paths` joined by
/// single spaces. A template without the token is returned unchanged.
///
/// Paths are not quoted.
pub fn render_command(template: &str, token: &str, paths: &[PathBuf]) -> String {
    if token.is_empty() || !template.contains(token) {
        return template.to_string();
    }
    let joined = paths
        .iter()
        .map(|p| p.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
    template.replace(token, &joined)
}

/// Runs a shell command for each delivery.
///
/// Stdout/stderr are inherited so command output shows up directly. A
/// non-zero exit is logged and watching continues; failing to start the
/// shell at all is an error.
#[derive(Debug, Clone)]
pub struct ShellCommand {
    template: String,
    token: String,
    verbose: bool,
}

impl ShellCommand {
    pub fn new(template: impl Into<String>, token: impl Into<String>, verbose: bool) -> Self {
        Self {
            template: template.into(),
            token: token.into(),
            verbose,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn render(&self, paths: &[PathBuf]) -> String {
        render_command(&self.template, &self.token, paths)
    }
}

impl ChangeHandler for ShellCommand {
    fn handle(
        &mut self,
        changed: Vec<PathBuf>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let cmd = self.render(&changed);
        let verbose = self.verbose;

        Box::pin(async move {
            if verbose {
                println!("{cmd}");
            }
            info!(cmd = %cmd, files = changed.len(), "running command");

            let status = run_shell(&cmd).await?;
            if !status.success() {
                warn!(
                    cmd = %cmd,
                    exit_code = status.code().unwrap_or(-1),
                    "command exited unsuccessfully"
                );
            }
            Ok(())
        })
    }
}

/// Run `cmd` through the platform shell and wait for it.
pub async fn run_shell(cmd: &str) -> Result<ExitStatus> {
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    command
        .status()
        .await
        .with_context(|| format!("spawning shell for command '{cmd}'"))
}
