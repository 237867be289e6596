// ABOUTME: Directory synchronizer - mirrors a local tree onto a remote path.
// ABOUTME: Worklist-based walk over a RemoteFs trait so tests can use doubles.

use crate::ssh::{self, FileChannel};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Remote filesystem operations needed by the synchronizer.
///
/// Implemented by the SFTP file channel in production and by recording
/// doubles in tests.
#[async_trait]
pub trait RemoteFs: Send + Sync {
    /// Probe whether a remote path exists.
    async fn exists(&self, path: &str) -> ssh::Result<bool>;

    /// Create a remote directory.
    async fn create_dir(&self, path: &str) -> ssh::Result<()>;

    /// Upload a local file to a remote path, overwriting it.
    async fn upload(&self, local: &Path, remote: &str) -> ssh::Result<()>;
}

#[async_trait]
impl RemoteFs for FileChannel {
    async fn exists(&self, path: &str) -> ssh::Result<bool> {
        FileChannel::exists(self, path).await
    }

    async fn create_dir(&self, path: &str) -> ssh::Result<()> {
        FileChannel::create_dir(self, path).await
    }

    async fn upload(&self, local: &Path, remote: &str) -> ssh::Result<()> {
        FileChannel::upload(self, local, remote).await
    }
}

/// Errors from a sync run. Each variant names the path that failed.
///
/// A failed sync may leave a partially populated remote tree; there is no
/// rollback of files already uploaded.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to upload {path}: {source}")]
    Upload { path: String, source: ssh::Error },

    #[error("failed to create remote directory {path}: {source}")]
    CreateDir { path: String, source: ssh::Error },

    #[error("failed to probe remote path {path}: {source}")]
    Probe { path: String, source: ssh::Error },

    #[error("failed to read local directory {path}: {source}")]
    LocalRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Mirror `local_root` onto `remote_root`.
///
/// Every file is re-uploaded unconditionally. Each directory is probed with a
/// remote stat and created if absent, always before anything is transferred
/// into it. Empty directories are still created. The walk uses an explicit
/// worklist rather than recursion, so nesting depth is bounded only by the
/// tree size.
///
/// Stops at the first failed operation; siblings queued after the failure are
/// not transferred.
pub async fn sync_tree<F: RemoteFs + ?Sized>(
    fs: &F,
    local_root: &Path,
    remote_root: &str,
) -> Result<()> {
    let mut pending = vec![(local_root.to_path_buf(), remote_root.to_string())];

    while let Some((local_dir, remote_dir)) = pending.pop() {
        ensure_remote_dir(fs, &remote_dir).await?;

        let mut entries =
            tokio::fs::read_dir(&local_dir)
                .await
                .map_err(|source| Error::LocalRead {
                    path: local_dir.clone(),
                    source,
                })?;

        loop {
            let entry = entries
                .next_entry()
                .await
                .map_err(|source| Error::LocalRead {
                    path: local_dir.clone(),
                    source,
                })?;
            let Some(entry) = entry else { break };

            let name = entry.file_name().to_string_lossy().into_owned();
            let remote_path = format!("{remote_dir}/{name}");

            let file_type = entry
                .file_type()
                .await
                .map_err(|source| Error::LocalRead {
                    path: entry.path(),
                    source,
                })?;

            if file_type.is_dir() {
                pending.push((entry.path(), remote_path));
            } else {
                // Symlinks are followed and transferred as regular files.
                tracing::debug!(local = %entry.path().display(), remote = %remote_path, "uploading");
                fs.upload(&entry.path(), &remote_path)
                    .await
                    .map_err(|source| Error::Upload {
                        path: remote_path,
                        source,
                    })?;
            }
        }
    }

    Ok(())
}

/// Stat-probe a remote directory and create it if absent.
///
/// The probe is issued per directory per call; results are not cached across
/// sync runs.
async fn ensure_remote_dir<F: RemoteFs + ?Sized>(fs: &F, path: &str) -> Result<()> {
    let present = fs.exists(path).await.map_err(|source| Error::Probe {
        path: path.to_string(),
        source,
    })?;

    if !present {
        tracing::debug!(remote = %path, "creating remote directory");
        fs.create_dir(path).await.map_err(|source| Error::CreateDir {
            path: path.to_string(),
            source,
        })?;
    }

    Ok(())
}
