// ABOUTME: Configuration for the remote media-conversion job service.
// ABOUTME: Endpoint, bearer token reference, and polling budget.

use super::env_value::EnvValue;
use crate::jobs::PollPolicy;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    /// Base URL of the conversion API.
    pub base_url: String,

    /// Bearer token, usually referenced from the environment:
    /// `api_token: { env: CONVERSION_API_TOKEN }`.
    pub api_token: EnvValue,

    /// Maximum number of status polls before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between status polls.
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(5)
}

impl ConversionConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            max_attempts: self.max_attempts,
            interval: self.poll_interval,
        }
    }
}
