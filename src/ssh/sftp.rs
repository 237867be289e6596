// ABOUTME: SFTP file channel built on russh-sftp.
// ABOUTME: Supports existence probes, directory creation, and file upload.

use super::error::Result;
use russh_sftp::client::SftpSession;
use russh_sftp::protocol::OpenFlags;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// File-transfer channel opened on an SSH session.
///
/// One channel serves a whole sync run; operations are issued sequentially.
pub struct FileChannel {
    sftp: SftpSession,
}

impl FileChannel {
    pub(crate) fn new(sftp: SftpSession) -> Self {
        Self { sftp }
    }

    /// Probe whether a remote path exists (file or directory).
    pub async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.sftp.try_exists(path).await?)
    }

    /// Create a remote directory. Fails if it already exists.
    pub async fn create_dir(&self, path: &str) -> Result<()> {
        self.sftp.create_dir(path).await?;
        Ok(())
    }

    /// Upload a local file to a remote path, overwriting any existing file.
    ///
    /// The whole file is re-uploaded unconditionally; there is no content
    /// comparison. Requires the sftp subsystem enabled in sshd_config on the
    /// remote machine.
    pub async fn upload(&self, local: &Path, remote: &str) -> Result<()> {
        let contents = tokio::fs::read(local).await?;

        let mut file = self
            .sftp
            .open_with_flags(
                remote,
                OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::WRITE,
            )
            .await?;
        file.write_all(&contents).await?;
        file.flush().await?;
        file.shutdown().await?;

        Ok(())
    }
}
