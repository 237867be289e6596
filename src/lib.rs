// ABOUTME: Library root for skiff - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod error;
pub mod jobs;
pub mod output;
pub mod provision;
pub mod ssh;
pub mod sync;
