// ABOUTME: Async job poller - submit/poll/terminal state machine.
// ABOUTME: Drives a remote media-conversion job over HTTP to completion.

mod client;
mod error;

pub use client::ConversionClient;
pub use error::{Error, Result};

use async_trait::async_trait;
use std::time::Duration;

/// Identifier returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileId(pub String);

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a submitted conversion job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobId(pub String);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Voice parameters for a conversion request.
#[derive(Debug, Clone)]
pub struct VoiceParams {
    pub voice_id: String,
    pub speaking_rate: f64,
    pub pitch: f64,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            voice_id: "default".to_string(),
            speaking_rate: 1.0,
            pitch: 1.0,
        }
    }
}

/// A document to convert, with its voice parameters.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub document: Vec<u8>,
    pub voice: VoiceParams,
}

/// Payload of a completed conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutput {
    pub audio_url: String,
    pub duration: Option<f64>,
    pub word_count: Option<u64>,
}

/// Observed state of a remote job. The poller only observes; job state is
/// mutated by the remote service alone.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    /// Any non-terminal status, carrying the raw status text.
    InProgress(String),
    Completed(ConversionOutput),
    Failed,
}

/// Polling budget: a hard attempt ceiling with a fixed delay between polls.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            interval: Duration::from_secs(5),
        }
    }
}

/// The conversion service API surface the poller drives.
///
/// Implemented over HTTP by [`ConversionClient`]; tests use scripted doubles.
#[async_trait]
pub trait ConversionApi: Send + Sync {
    /// Upload the document. Non-2xx responses are fatal; no retry.
    async fn upload(&self, document: &[u8]) -> Result<FileId>;

    /// Start a conversion for an uploaded document.
    async fn start_conversion(&self, file: &FileId, voice: &VoiceParams) -> Result<JobId>;

    /// Query the current status of a job.
    async fn job_status(&self, job: &JobId) -> Result<JobStatus>;
}

/// Drive a conversion from submission to a terminal state.
///
/// Submit is upload + convert; any submit failure is reported immediately.
/// The poll loop issues at most `max_attempts` status queries at a fixed
/// interval (no backoff; a latency/cost tradeoff, not a correctness one).
/// Exhausting the budget yields [`Error::PollTimeout`], distinct from
/// [`Error::JobFailed`]: the job may still be running remotely.
pub async fn run_conversion<A: ConversionApi + ?Sized>(
    api: &A,
    request: &ConversionRequest,
    policy: &PollPolicy,
) -> Result<ConversionOutput> {
    let file = api.upload(&request.document).await?;
    let job = api.start_conversion(&file, &request.voice).await?;
    tracing::info!(%job, "conversion job submitted");

    for attempt in 1..=policy.max_attempts {
        match api.job_status(&job).await? {
            JobStatus::Completed(output) => {
                tracing::info!(%job, attempt, "conversion completed");
                return Ok(output);
            }
            JobStatus::Failed => {
                return Err(Error::JobFailed { job });
            }
            JobStatus::InProgress(status) => {
                tracing::debug!(%job, %status, attempt, "job not finished yet");
                if attempt < policy.max_attempts {
                    tokio::time::sleep(policy.interval).await;
                }
            }
        }
    }

    Err(Error::PollTimeout {
        job,
        attempts: policy.max_attempts,
    })
}
