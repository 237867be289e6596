// ABOUTME: Deployment orchestrator - named workflows over SSH.
// ABOUTME: Frontend/backend deploys, TLS provisioning, and hosting stats.

mod error;
mod outcome;

pub use error::WorkflowError;
pub use outcome::{FailureKind, Outcome};

use crate::config::{Config, ServerConfig, SiteConfig};
use crate::provision::{self, CommandRunner};
use crate::ssh::Session;
use crate::sync;
use serde_json::json;
use std::path::Path;

/// Composes the synchronizer and sequencer into named workflows.
///
/// Every workflow opens its own session and discards it afterwards; nothing
/// is pooled. Concurrent deploys to the same remote path are not mutually
/// excluded; callers are expected to serialize deploys.
pub struct Deployer {
    server: ServerConfig,
    site: SiteConfig,
}

/// Result of the TLS workflow before it is flattened into an Outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsStatus {
    /// A certificate for the domain already exists; nothing was issued.
    AlreadyIssued,
    /// The issuance command ran successfully.
    Issued,
}

impl Deployer {
    pub fn new(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            site: config.site.clone(),
        }
    }

    /// Upload the compiled front-end bundle to `<web_root>/<frontend_dir>`.
    ///
    /// Idempotent in effect but not in cost: every file is re-uploaded on
    /// every run.
    pub async fn deploy_frontend(&self, build_path: &Path) -> Outcome {
        tracing::info!(path = %build_path.display(), "deploying frontend");
        match self
            .sync_workflow(build_path, &self.site.frontend_remote_path())
            .await
        {
            Ok(()) => Outcome::success("frontend deployed").with_url(self.site.frontend_url()),
            Err(e) => Outcome::failure(e),
        }
    }

    /// Upload the backend tree to `<web_root>/<backend_dir>`, then run the
    /// fixed provisioning sequence (venv, dependencies, service restart).
    pub async fn deploy_backend(&self, backend_path: &Path) -> Outcome {
        tracing::info!(path = %backend_path.display(), "deploying backend");
        match self.backend_workflow(backend_path).await {
            Ok(()) => Outcome::success("backend deployed").with_url(self.site.backend_url()),
            Err(e) => Outcome::failure(e),
        }
    }

    /// Issue a TLS certificate for the domain unless one already exists.
    pub async fn provision_tls(&self) -> Outcome {
        tracing::info!(domain = %self.site.domain, "provisioning TLS");
        let result = async {
            let session = self.connect().await?;
            let status = provision_tls_over(&session, &self.site).await;
            close(session).await;
            status
        }
        .await;

        match result {
            Ok(TlsStatus::AlreadyIssued) => Outcome::success("TLS certificate already present"),
            Ok(TlsStatus::Issued) => Outcome::success("TLS certificate issued"),
            Err(e) => Outcome::failure(e),
        }
    }

    /// Aggregate hosting status: disk, memory, and recent access log lines.
    pub async fn hosting_stats(&self) -> Outcome {
        let result = async {
            let session = self.connect().await?;
            let stats = self.collect_stats(&session).await;
            close(session).await;
            stats
        }
        .await;

        match result {
            Ok(data) => Outcome::success("hosting status").with_data(data),
            Err(e) => Outcome::failure(e),
        }
    }

    async fn connect(&self) -> Result<Session, WorkflowError> {
        Ok(Session::connect(self.server.session_config()).await?)
    }

    async fn sync_workflow(&self, local: &Path, remote: &str) -> Result<(), WorkflowError> {
        let session = self.connect().await?;
        let result = async {
            let channel = session.open_file_channel().await?;
            sync::sync_tree(&channel, local, remote).await?;
            Ok(())
        }
        .await;
        close(session).await;
        result
    }

    async fn backend_workflow(&self, local: &Path) -> Result<(), WorkflowError> {
        let session = self.connect().await?;
        let result = async {
            let channel = session.open_file_channel().await?;
            sync::sync_tree(&channel, local, &self.site.backend_remote_path()).await?;
            provision::run_sequence(&session, &self.site.backend_provision_commands()).await?;
            Ok(())
        }
        .await;
        close(session).await;
        result
    }

    async fn collect_stats(&self, session: &Session) -> Result<serde_json::Value, WorkflowError> {
        let disk = session.exec("df -h /").await?;
        let memory = session.exec("free -m").await?;
        let access = session
            .exec(&format!("tail -n 100 {}", self.site.access_log))
            .await?;

        Ok(json!({
            "disk_usage": disk.stdout,
            "memory_usage": memory.stdout,
            "recent_access_logs": access.stdout,
        }))
    }
}

/// TLS issuance over any command runner.
///
/// Probes certbot for an existing certificate first; on a hit the issuance
/// command is never executed.
pub async fn provision_tls_over<R: CommandRunner + ?Sized>(
    runner: &R,
    site: &SiteConfig,
) -> Result<TlsStatus, WorkflowError> {
    let probe = runner.run_command(&site.tls_probe_command()).await?;
    if probe.success() {
        tracing::info!(domain = %site.domain, "certificate already issued");
        return Ok(TlsStatus::AlreadyIssued);
    }

    provision::run_sequence(runner, &[site.tls_issue_command()]).await?;
    Ok(TlsStatus::Issued)
}

async fn close(session: Session) {
    // Disconnect failures are non-fatal; the workflow result stands.
    if let Err(e) = session.disconnect().await {
        tracing::warn!("SSH disconnect failed: {}", e);
    }
}
