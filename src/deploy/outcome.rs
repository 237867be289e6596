// ABOUTME: Uniform outcome value returned by every deployment workflow.
// ABOUTME: Tagged success/error shape; serializes to the status surface.

use super::error::WorkflowError;
use serde::Serialize;

/// Classifies which layer a workflow failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Session setup or transport failure.
    Connection,
    /// A specific upload or mkdir failed during sync.
    Transfer,
    /// A provisioning command returned non-zero.
    Command,
}

/// Result of an orchestrated workflow.
///
/// Workflows never raise past the orchestrator boundary; every leaf failure
/// is converted into `Outcome::Error` with a populated message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },
    Error {
        kind: FailureKind,
        message: String,
    },
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Outcome::Success {
            message: message.into(),
            url: None,
            data: None,
        }
    }

    pub fn with_url(self, url: impl Into<String>) -> Self {
        match self {
            Outcome::Success { message, data, .. } => Outcome::Success {
                message,
                url: Some(url.into()),
                data,
            },
            error => error,
        }
    }

    pub fn with_data(self, data: serde_json::Value) -> Self {
        match self {
            Outcome::Success { message, url, .. } => Outcome::Success {
                message,
                url,
                data: Some(data),
            },
            error => error,
        }
    }

    pub fn failure(error: WorkflowError) -> Self {
        Outcome::Error {
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success { message, .. } | Outcome::Error { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_serializes_with_status_tag() {
        let outcome = Outcome::success("frontend deployed").with_url("https://example.com/unity");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "frontend deployed");
        assert_eq!(json["url"], "https://example.com/unity");
    }

    #[test]
    fn success_omits_absent_payload_fields() {
        let json = serde_json::to_value(Outcome::success("ok")).unwrap();
        assert!(json.get("url").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn failure_carries_kind_and_message() {
        let error = WorkflowError::Ssh(crate::ssh::Error::AuthenticationFailed);
        let outcome = Outcome::failure(error);
        assert!(!outcome.is_success());

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "connection");
        assert!(!json["message"].as_str().unwrap().is_empty());
    }
}
