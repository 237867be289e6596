// ABOUTME: SSH session management module.
// ABOUTME: Provides connection, command execution, and SFTP file transfer.

mod client;
mod error;
mod sftp;

pub use client::{CommandOutput, Session, SessionConfig};
pub use error::{Error, Result};
pub use sftp::FileChannel;
