// ABOUTME: Server configuration for SSH connections.
// ABOUTME: Parses formats like "host", "user@host", "host:port", "user@host:port".

use crate::ssh::SessionConfig;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub key_path: Option<PathBuf>,
    #[serde(default)]
    pub known_hosts: Option<PathBuf>,
    /// Whether to accept and record an unknown host key on first connect.
    /// Off by default; first-use trust is an explicit configuration choice.
    #[serde(default)]
    pub trust_first_connection: bool,
}

fn default_port() -> u16 {
    22
}

impl ServerConfig {
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("server address cannot be empty".to_string());
        }

        // Parse format: [user@]host[:port]
        let (user_part, rest) = if let Some(at_pos) = s.find('@') {
            (Some(&s[..at_pos]), &s[at_pos + 1..])
        } else {
            (None, s)
        };

        let (host, port) = if let Some(colon_pos) = rest.rfind(':') {
            let port_str = &rest[colon_pos + 1..];
            let port = port_str
                .parse::<u16>()
                .map_err(|_| format!("invalid port: {}", port_str))?;
            (&rest[..colon_pos], port)
        } else {
            (rest, 22)
        };

        if host.is_empty() {
            return Err("hostname cannot be empty".to_string());
        }

        Ok(ServerConfig {
            host: host.to_string(),
            port,
            user: user_part.map(|s| s.to_string()),
            key_path: None,
            known_hosts: None,
            trust_first_connection: false,
        })
    }

    /// Build the SSH session configuration for this server.
    pub fn session_config(&self) -> SessionConfig {
        let user = self.user.as_deref().unwrap_or("root");
        let mut config = SessionConfig::new(&self.host, user)
            .port(self.port)
            .trust_on_first_use(self.trust_first_connection);

        if let Some(ref key_path) = self.key_path {
            config = config.key_path(key_path);
        }
        if let Some(ref known_hosts) = self.known_hosts {
            config = config.known_hosts_path(known_hosts);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_host() {
        let server = ServerConfig::parse("server.example.com").unwrap();
        assert_eq!(server.host, "server.example.com");
        assert_eq!(server.port, 22);
        assert!(server.user.is_none());
    }

    #[test]
    fn parse_user_host_port() {
        let server = ServerConfig::parse("deploy@server.example.com:2222").unwrap();
        assert_eq!(server.host, "server.example.com");
        assert_eq!(server.port, 2222);
        assert_eq!(server.user.as_deref(), Some("deploy"));
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(ServerConfig::parse("").is_err());
        assert!(ServerConfig::parse("user@").is_err());
        assert!(ServerConfig::parse("host:notaport").is_err());
    }

    #[test]
    fn session_config_defaults_user_to_root() {
        let server = ServerConfig::parse("server.example.com").unwrap();
        let config = server.session_config();
        assert_eq!(config.user, "root");
        assert!(!config.trust_on_first_use);
    }
}
