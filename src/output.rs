// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal and JSON output modes.

use crate::deploy::Outcome;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Print a progress message (suppressed in JSON mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a workflow outcome in the configured mode.
    pub fn outcome(&self, outcome: &Outcome) {
        match self.mode {
            OutputMode::Normal => match outcome {
                Outcome::Success { message, url, data } => {
                    println!("✓ {message}");
                    if let Some(url) = url {
                        println!("  {url}");
                    }
                    if let Some(data) = data {
                        match serde_json::to_string_pretty(data) {
                            Ok(pretty) => println!("{pretty}"),
                            Err(_) => println!("{data}"),
                        }
                    }
                }
                Outcome::Error { message, .. } => {
                    eprintln!("✗ {message}");
                }
            },
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(outcome) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print an arbitrary JSON value (voices, history).
    pub fn json(&self, value: &serde_json::Value) {
        match self.mode {
            OutputMode::Normal => match serde_json::to_string_pretty(value) {
                Ok(pretty) => println!("{pretty}"),
                Err(_) => println!("{value}"),
            },
            OutputMode::Json => println!("{value}"),
        }
    }
}
