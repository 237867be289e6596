// ABOUTME: Site configuration - domain, remote web root layout, TLS contact.
// ABOUTME: Derives remote paths, public URLs, and provisioning command lines.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub domain: String,

    /// Remote web root under which the site lives.
    #[serde(default = "default_web_root")]
    pub web_root: String,

    /// Subdirectory for the compiled front-end bundle.
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,

    /// Subdirectory for the backend service.
    #[serde(default = "default_backend_dir")]
    pub backend_dir: String,

    /// systemd unit restarted after a backend deploy.
    pub service_unit: String,

    /// Contact email for certificate issuance.
    pub tls_email: String,

    #[serde(default = "default_access_log")]
    pub access_log: String,
}

fn default_web_root() -> String {
    "/public_html".to_string()
}

fn default_frontend_dir() -> String {
    "unity".to_string()
}

fn default_backend_dir() -> String {
    "api".to_string()
}

fn default_access_log() -> String {
    "/var/log/apache2/access.log".to_string()
}

impl SiteConfig {
    pub fn frontend_remote_path(&self) -> String {
        format!("{}/{}", self.web_root, self.frontend_dir)
    }

    pub fn backend_remote_path(&self) -> String {
        format!("{}/{}", self.web_root, self.backend_dir)
    }

    pub fn frontend_url(&self) -> String {
        format!("https://{}/{}", self.domain, self.frontend_dir)
    }

    pub fn backend_url(&self) -> String {
        format!("https://{}/{}", self.domain, self.backend_dir)
    }

    /// Post-upload provisioning sequence for the backend: create the virtual
    /// environment, install declared dependencies, restart the service unit.
    ///
    /// Each command is self-contained (`cd ... &&`) because every exec runs
    /// in a fresh remote shell.
    pub fn backend_provision_commands(&self) -> Vec<String> {
        let remote = self.backend_remote_path();
        vec![
            format!("cd {remote} && python3 -m venv venv"),
            format!("cd {remote} && ./venv/bin/pip install -r requirements.txt"),
            format!("systemctl restart {}", self.service_unit),
        ]
    }

    /// Query whether a certificate for the domain is already issued.
    /// Exit status zero means a certificate exists.
    pub fn tls_probe_command(&self) -> String {
        format!("certbot certificates | grep {}", self.domain)
    }

    /// Non-interactive certificate issuance for the domain and its www
    /// alternate.
    pub fn tls_issue_command(&self) -> String {
        format!(
            "certbot --apache -d {domain} -d www.{domain} --non-interactive --agree-tos --email {email}",
            domain = self.domain,
            email = self.tls_email,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig {
            domain: "example.com".to_string(),
            web_root: default_web_root(),
            frontend_dir: default_frontend_dir(),
            backend_dir: default_backend_dir(),
            service_unit: "site-api".to_string(),
            tls_email: "admin@example.com".to_string(),
            access_log: default_access_log(),
        }
    }

    #[test]
    fn remote_paths_join_web_root() {
        let site = site();
        assert_eq!(site.frontend_remote_path(), "/public_html/unity");
        assert_eq!(site.backend_remote_path(), "/public_html/api");
    }

    #[test]
    fn urls_use_domain() {
        let site = site();
        assert_eq!(site.frontend_url(), "https://example.com/unity");
        assert_eq!(site.backend_url(), "https://example.com/api");
    }

    #[test]
    fn backend_commands_end_with_service_restart() {
        let commands = site().backend_provision_commands();
        assert_eq!(commands.len(), 3);
        assert!(commands[0].contains("venv"));
        assert!(commands[1].contains("requirements.txt"));
        assert_eq!(commands[2], "systemctl restart site-api");
    }

    #[test]
    fn tls_issue_command_is_non_interactive() {
        let command = site().tls_issue_command();
        assert!(command.contains("--non-interactive"));
        assert!(command.contains("-d example.com"));
        assert!(command.contains("-d www.example.com"));
        assert!(command.contains("admin@example.com"));
    }
}
