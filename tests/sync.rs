// ABOUTME: Integration tests for the directory synchronizer.
// ABOUTME: Uses a recording RemoteFs double to verify operation invariants.

use async_trait::async_trait;
use skiff::ssh;
use skiff::sync::{self, RemoteFs};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Probe(String),
    Mkdir(String),
    Upload(String),
}

/// Remote filesystem double that records every operation in order.
struct RecordingFs {
    ops: Mutex<Vec<Op>>,
    existing: HashSet<String>,
    fail_upload: Option<String>,
}

impl RecordingFs {
    fn new() -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            existing: HashSet::new(),
            fail_upload: None,
        }
    }

    fn with_existing(mut self, path: &str) -> Self {
        self.existing.insert(path.to_string());
        self
    }

    fn fail_upload_of(mut self, path: &str) -> Self {
        self.fail_upload = Some(path.to_string());
        self
    }

    fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteFs for RecordingFs {
    async fn exists(&self, path: &str) -> ssh::Result<bool> {
        self.ops.lock().unwrap().push(Op::Probe(path.to_string()));
        Ok(self.existing.contains(path))
    }

    async fn create_dir(&self, path: &str) -> ssh::Result<()> {
        self.ops.lock().unwrap().push(Op::Mkdir(path.to_string()));
        Ok(())
    }

    async fn upload(&self, _local: &Path, remote: &str) -> ssh::Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(Op::Upload(remote.to_string()));

        if self.fail_upload.as_deref() == Some(remote) {
            return Err(ssh::Error::CommandFailed("scripted upload failure".into()));
        }
        Ok(())
    }
}

/// Build a local tree:
///   root/a.txt
///   root/sub/b.txt
///   root/sub/deep/c.txt
///   root/empty/
fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::write(root.join("a.txt"), "a").unwrap();
    std::fs::create_dir_all(root.join("sub/deep")).unwrap();
    std::fs::write(root.join("sub/b.txt"), "b").unwrap();
    std::fs::write(root.join("sub/deep/c.txt"), "c").unwrap();
    std::fs::create_dir(root.join("empty")).unwrap();
    dir
}

fn parent_dir(remote: &str) -> &str {
    &remote[..remote.rfind('/').unwrap()]
}

/// Test: full sync of a nested tree.
/// Expected: exactly one mkdir per directory node and one upload per file
/// node, including the empty directory.
#[tokio::test]
async fn count_invariant_one_op_per_node() {
    let tree = sample_tree();
    let fs = RecordingFs::new();

    sync::sync_tree(&fs, tree.path(), "/remote/site")
        .await
        .expect("sync should succeed");

    let ops = fs.ops();
    let mkdirs: Vec<_> = ops
        .iter()
        .filter_map(|op| match op {
            Op::Mkdir(p) => Some(p.clone()),
            _ => None,
        })
        .collect();
    let uploads: Vec<_> = ops
        .iter()
        .filter_map(|op| match op {
            Op::Upload(p) => Some(p.clone()),
            _ => None,
        })
        .collect();

    let expected_dirs: HashSet<String> = [
        "/remote/site",
        "/remote/site/sub",
        "/remote/site/sub/deep",
        "/remote/site/empty",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    let expected_files: HashSet<String> = [
        "/remote/site/a.txt",
        "/remote/site/sub/b.txt",
        "/remote/site/sub/deep/c.txt",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    assert_eq!(mkdirs.len(), expected_dirs.len(), "one mkdir per directory");
    assert_eq!(
        mkdirs.iter().cloned().collect::<HashSet<_>>(),
        expected_dirs
    );
    assert_eq!(uploads.len(), expected_files.len(), "one upload per file");
    assert_eq!(
        uploads.iter().cloned().collect::<HashSet<_>>(),
        expected_files
    );
}

/// Test: ordering invariant.
/// Expected: the mkdir for a directory precedes every upload into it.
#[tokio::test]
async fn directory_created_before_children_transferred() {
    let tree = sample_tree();
    let fs = RecordingFs::new();

    sync::sync_tree(&fs, tree.path(), "/remote/site")
        .await
        .expect("sync should succeed");

    let ops = fs.ops();
    for (i, op) in ops.iter().enumerate() {
        if let Op::Upload(remote) = op {
            let dir = parent_dir(remote);
            let mkdir_pos = ops
                .iter()
                .position(|op| matches!(op, Op::Mkdir(p) if p == dir))
                .unwrap_or_else(|| panic!("no mkdir recorded for {dir}"));
            assert!(
                mkdir_pos < i,
                "mkdir of {dir} must precede upload of {remote}"
            );
        }
    }
}

/// Test: a pre-existing remote directory is probed but not re-created.
#[tokio::test]
async fn existing_directory_is_not_recreated() {
    let tree = sample_tree();
    let fs = RecordingFs::new().with_existing("/remote/site");

    sync::sync_tree(&fs, tree.path(), "/remote/site")
        .await
        .expect("sync should succeed");

    let ops = fs.ops();
    assert!(ops.contains(&Op::Probe("/remote/site".to_string())));
    assert!(
        !ops.contains(&Op::Mkdir("/remote/site".to_string())),
        "existing directory must not be re-created"
    );
}

/// Test: a failed upload aborts the sync.
/// Expected: TransferError naming the path; the failing upload is the last
/// operation recorded (no silent skip to later siblings).
#[tokio::test]
async fn failed_upload_aborts_sync() {
    let tree = sample_tree();
    let failing = "/remote/site/sub/b.txt";
    let fs = RecordingFs::new().fail_upload_of(failing);

    let result = sync::sync_tree(&fs, tree.path(), "/remote/site").await;

    let err = result.expect_err("sync should fail");
    match &err {
        sync::Error::Upload { path, .. } => assert_eq!(path, failing),
        other => panic!("expected Upload error, got: {other:?}"),
    }

    let ops = fs.ops();
    assert_eq!(
        ops.last(),
        Some(&Op::Upload(failing.to_string())),
        "nothing may run after the failed upload"
    );
}

/// Test: syncing an empty directory still creates it remotely.
#[tokio::test]
async fn empty_tree_creates_root() {
    let dir = tempfile::tempdir().unwrap();
    let fs = RecordingFs::new();

    sync::sync_tree(&fs, dir.path(), "/remote/empty")
        .await
        .expect("sync should succeed");

    assert_eq!(
        fs.ops(),
        vec![
            Op::Probe("/remote/empty".to_string()),
            Op::Mkdir("/remote/empty".to_string()),
        ]
    );
}
