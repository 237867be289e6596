// ABOUTME: Error types for the async job poller.
// ABOUTME: Distinguishes job failure from poll-budget exhaustion.

use super::JobId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("upload rejected with HTTP status {status}")]
    UploadRejected { status: u16 },

    #[error("conversion request rejected with HTTP status {status}")]
    SubmitRejected { status: u16 },

    #[error("status query rejected with HTTP status {status}")]
    StatusRejected { status: u16 },

    #[error("response missing field `{0}`")]
    MissingField(&'static str),

    /// The remote service reported the job as failed.
    #[error("conversion job {job} failed")]
    JobFailed { job: JobId },

    /// The attempt budget ran out before the job reached a terminal state.
    /// The job may still be running remotely.
    #[error("conversion job {job} not finished after {attempts} polls")]
    PollTimeout { job: JobId, attempts: u32 },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
