// ABOUTME: Integration tests for the provisioning sequencer.
// ABOUTME: Verifies strict ordering and fail-fast semantics with a scripted runner.

mod support;

use async_trait::async_trait;
use skiff::provision::{self, CommandRunner};
use skiff::ssh::{self, CommandOutput};
use support::ScriptedRunner;

fn commands(cmds: &[&str]) -> Vec<String> {
    cmds.iter().map(|s| s.to_string()).collect()
}

/// Test: all commands succeed.
/// Expected: every command runs, in order.
#[tokio::test]
async fn runs_all_commands_in_order() {
    let runner = ScriptedRunner::new();
    let sequence = commands(&["cmd-a", "cmd-b", "cmd-c"]);

    provision::run_sequence(&runner, &sequence)
        .await
        .expect("sequence should succeed");

    assert_eq!(runner.executed(), vec!["cmd-a", "cmd-b", "cmd-c"]);
}

/// Test: [A(exit 0), B(exit 1), C(exit 0)].
/// Expected: A and B execute, the error names B with its stderr, and C is
/// never executed.
#[tokio::test]
async fn halts_at_first_failing_command() {
    let runner = ScriptedRunner::new().script("cmd-b", 1, "boom");
    let sequence = commands(&["cmd-a", "cmd-b", "cmd-c"]);

    let err = provision::run_sequence(&runner, &sequence)
        .await
        .expect_err("sequence should fail");

    match err {
        provision::Error::CommandFailed {
            command,
            exit_status,
            stderr,
        } => {
            assert_eq!(command, "cmd-b");
            assert_eq!(exit_status, 1);
            assert_eq!(stderr, "boom");
        }
        other => panic!("expected CommandFailed, got: {other:?}"),
    }

    assert_eq!(
        runner.executed(),
        vec!["cmd-a", "cmd-b"],
        "cmd-c must never execute"
    );
}

/// Test: empty sequence is a no-op.
#[tokio::test]
async fn empty_sequence_succeeds() {
    let runner = ScriptedRunner::new();

    provision::run_sequence(&runner, &[])
        .await
        .expect("empty sequence should succeed");

    assert!(runner.executed().is_empty());
}

/// Runner whose transport fails outright.
struct BrokenRunner;

#[async_trait]
impl CommandRunner for BrokenRunner {
    async fn run_command(&self, _command: &str) -> ssh::Result<CommandOutput> {
        Err(ssh::Error::ChannelClosed)
    }
}

/// Test: a transport-level failure propagates as a session error, not a
/// command failure.
#[tokio::test]
async fn transport_failure_propagates() {
    let err = provision::run_sequence(&BrokenRunner, &commands(&["cmd-a"]))
        .await
        .expect_err("sequence should fail");

    assert!(matches!(err, provision::Error::Session(_)));
}
