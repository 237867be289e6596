// ABOUTME: Provisioning sequencer - ordered remote commands with fail-fast.
// ABOUTME: Abstracted over a CommandRunner trait so tests can script outputs.

use crate::ssh::{self, CommandOutput, Session};
use async_trait::async_trait;
use thiserror::Error;

/// Executes a single remote shell command.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run_command(&self, command: &str) -> ssh::Result<CommandOutput>;
}

#[async_trait]
impl CommandRunner for Session {
    async fn run_command(&self, command: &str) -> ssh::Result<CommandOutput> {
        self.exec(command).await
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// A command returned a non-zero exit status. Captures the command text
    /// and stderr for diagnostics.
    #[error("`{command}` exited with status {exit_status}: {stderr}")]
    CommandFailed {
        command: String,
        exit_status: u32,
        stderr: String,
    },

    #[error(transparent)]
    Session(#[from] ssh::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Run `commands` strictly in order, stopping at the first non-zero exit.
///
/// Commands following the failed one are never executed. There is no
/// per-command retry or timeout beyond what the session itself enforces.
pub async fn run_sequence<R: CommandRunner + ?Sized>(runner: &R, commands: &[String]) -> Result<()> {
    for command in commands {
        tracing::info!(%command, "running provisioning command");
        let output = runner.run_command(command).await?;

        if !output.success() {
            return Err(Error::CommandFailed {
                command: command.clone(),
                exit_status: output.exit_code,
                stderr: output.stderr,
            });
        }
    }

    Ok(())
}
