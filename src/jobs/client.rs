// ABOUTME: HTTP client for the media-conversion service.
// ABOUTME: Bearer-token authenticated upload, convert, status, and read endpoints.

use super::error::{Error, Result};
use super::{ConversionApi, ConversionOutput, FileId, JobId, JobStatus, VoiceParams};
use crate::config::ConversionConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

#[derive(Deserialize)]
struct UploadResponse {
    file_id: String,
}

#[derive(Deserialize)]
struct ConvertResponse {
    conversion_id: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    status: String,
    audio_url: Option<String>,
    duration: Option<f64>,
    word_count: Option<u64>,
}

/// HTTP client for the conversion service. Every call carries the bearer
/// token.
#[derive(Debug, Clone)]
pub struct ConversionClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ConversionClient {
    pub fn new(config: &ConversionConfig) -> crate::error::Result<Self> {
        let token = config.api_token.resolve()?;
        Self::with_url(&config.base_url, token)
    }

    pub fn with_url(url: &str, token: impl Into<String>) -> crate::error::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| crate::error::Error::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_owned(),
            token: token.into(),
        })
    }

    /// List the voices the service offers.
    pub async fn voices(&self) -> Result<serde_json::Value> {
        let url = format!("{}/voices", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::StatusRejected {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch past conversions.
    pub async fn history(&self) -> Result<serde_json::Value> {
        let url = format!("{}/history", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::StatusRejected {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ConversionApi for ConversionClient {
    async fn upload(&self, document: &[u8]) -> Result<FileId> {
        let url = format!("{}/upload", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/pdf")
            .body(document.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::UploadRejected {
                status: response.status().as_u16(),
            });
        }

        let body: UploadResponse = response.json().await?;
        Ok(FileId(body.file_id))
    }

    async fn start_conversion(&self, file: &FileId, voice: &VoiceParams) -> Result<JobId> {
        let url = format!("{}/convert", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({
                "file_id": file.0,
                "voice_id": voice.voice_id,
                "speaking_rate": voice.speaking_rate,
                "pitch": voice.pitch,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::SubmitRejected {
                status: response.status().as_u16(),
            });
        }

        let body: ConvertResponse = response.json().await?;
        Ok(JobId(body.conversion_id))
    }

    async fn job_status(&self, job: &JobId) -> Result<JobStatus> {
        let url = format!("{}/status/{}", self.base_url, job.0);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::StatusRejected {
                status: response.status().as_u16(),
            });
        }

        let body: StatusResponse = response.json().await?;
        match body.status.as_str() {
            "completed" => {
                let audio_url = body.audio_url.ok_or(Error::MissingField("audio_url"))?;
                Ok(JobStatus::Completed(ConversionOutput {
                    audio_url,
                    duration: body.duration,
                    word_count: body.word_count,
                }))
            }
            "failed" => Ok(JobStatus::Failed),
            other => Ok(JobStatus::InProgress(other.to_string())),
        }
    }
}
