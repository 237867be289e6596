// ABOUTME: Shared test doubles for integration tests.
// ABOUTME: Scripted command runner standing in for a live SSH session.

use async_trait::async_trait;
use skiff::provision::CommandRunner;
use skiff::ssh::{self, CommandOutput};
use std::collections::HashMap;
use std::sync::Mutex;

/// Command runner that replays scripted exit codes and records every command
/// it was asked to run. Commands without a script entry succeed silently.
pub struct ScriptedRunner {
    scripts: HashMap<String, (u32, String)>,
    executed: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Script `command` to exit with `exit_code` and the given stderr.
    pub fn script(mut self, command: &str, exit_code: u32, stderr: &str) -> Self {
        self.scripts
            .insert(command.to_string(), (exit_code, stderr.to_string()));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run_command(&self, command: &str) -> ssh::Result<CommandOutput> {
        self.executed.lock().unwrap().push(command.to_string());

        let (exit_code, stderr) = self
            .scripts
            .get(command)
            .cloned()
            .unwrap_or((0, String::new()));

        Ok(CommandOutput {
            exit_code,
            stdout: String::new(),
            stderr,
        })
    }
}
