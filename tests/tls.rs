// ABOUTME: Tests for the TLS provisioning workflow.
// ABOUTME: Verifies the issuance command is skipped when a certificate exists.

mod support;

use skiff::config::SiteConfig;
use skiff::deploy::{self, TlsStatus};
use support::ScriptedRunner;

fn site() -> SiteConfig {
    SiteConfig {
        domain: "example.com".to_string(),
        web_root: "/public_html".to_string(),
        frontend_dir: "unity".to_string(),
        backend_dir: "api".to_string(),
        service_unit: "site-api".to_string(),
        tls_email: "admin@example.com".to_string(),
        access_log: "/var/log/apache2/access.log".to_string(),
    }
}

/// Test: the certificate probe succeeds.
/// Expected: success without ever invoking the issuance command.
#[tokio::test]
async fn existing_certificate_skips_issuance() {
    let site = site();
    // Probe exits 0: certificate present.
    let runner = ScriptedRunner::new();

    let status = deploy::provision_tls_over(&runner, &site)
        .await
        .expect("workflow should succeed");

    assert_eq!(status, TlsStatus::AlreadyIssued);
    assert_eq!(
        runner.executed(),
        vec![site.tls_probe_command()],
        "issuance command must never be executed"
    );
}

/// Test: no certificate yet (probe exits non-zero).
/// Expected: the issuance command runs and the workflow reports Issued.
#[tokio::test]
async fn missing_certificate_triggers_issuance() {
    let site = site();
    let runner = ScriptedRunner::new().script(&site.tls_probe_command(), 1, "");

    let status = deploy::provision_tls_over(&runner, &site)
        .await
        .expect("workflow should succeed");

    assert_eq!(status, TlsStatus::Issued);
    assert_eq!(
        runner.executed(),
        vec![site.tls_probe_command(), site.tls_issue_command()]
    );
}

/// Test: issuance fails.
/// Expected: a command error naming the certbot invocation.
#[tokio::test]
async fn failed_issuance_reports_command_error() {
    let site = site();
    let runner = ScriptedRunner::new()
        .script(&site.tls_probe_command(), 1, "")
        .script(&site.tls_issue_command(), 1, "challenge failed");

    let err = deploy::provision_tls_over(&runner, &site)
        .await
        .expect_err("workflow should fail");

    let message = err.to_string();
    assert!(message.contains("certbot"));
    assert!(message.contains("challenge failed"));
}
