// ABOUTME: Internal error union for deployment workflows.
// ABOUTME: Converted to Outcome values at the orchestrator boundary.

use super::outcome::FailureKind;
use crate::{provision, ssh, sync};

/// Union of the leaf failures a workflow can hit. Never leaves the
/// orchestrator; [`crate::deploy::Outcome::failure`] flattens it into a
/// tagged outcome value.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Ssh(#[from] ssh::Error),

    #[error(transparent)]
    Transfer(#[from] sync::Error),

    #[error(transparent)]
    Command(#[from] provision::Error),
}

impl WorkflowError {
    pub fn kind(&self) -> FailureKind {
        match self {
            WorkflowError::Ssh(_) => FailureKind::Connection,
            WorkflowError::Transfer(_) => FailureKind::Transfer,
            WorkflowError::Command(provision::Error::Session(_)) => FailureKind::Connection,
            WorkflowError::Command(_) => FailureKind::Command,
        }
    }
}
