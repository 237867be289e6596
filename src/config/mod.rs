// ABOUTME: Configuration types and parsing for skiff.yml.
// ABOUTME: Handles YAML parsing, env var references, and config discovery.

mod conversion;
mod env_value;
mod server;
mod site;

pub use conversion::ConversionConfig;
pub use env_value::EnvValue;
pub use server::ServerConfig;
pub use site::SiteConfig;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "skiff.yml";
pub const CONFIG_FILENAME_ALT: &str = "skiff.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".skiff/config.yml";

/// Top-level configuration, constructed once at process start and passed
/// into components by reference. No component reads environment state
/// directly; env references are resolved through [`EnvValue`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,

    pub site: SiteConfig,

    /// Settings for the media-conversion job service. Optional; only the
    /// convert/voices/history commands need it.
    #[serde(default)]
    pub conversion: Option<ConversionConfig>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Settings for the conversion service, or an error if the section is
    /// missing from the config file.
    pub fn conversion(&self) -> Result<&ConversionConfig> {
        self.conversion.as_ref().ok_or_else(|| {
            Error::InvalidConfig("missing `conversion` section in config".to_string())
        })
    }
}

/// Write a starter skiff.yml into `dir`.
pub fn init_config(dir: &Path, domain: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let domain = domain.unwrap_or("example.com");
    let yaml = format!(
        r#"server:
  host: server.example.com
  port: 22
  user: deploy
  key_path: ~/.ssh/id_ed25519

site:
  domain: {domain}
  web_root: /public_html
  service_unit: site-api
  tls_email: admin@{domain}

conversion:
  base_url: https://api.nvcf.example.com/v2
  api_token:
    env: CONVERSION_API_TOKEN
"#
    );
    std::fs::write(&config_path, yaml)?;

    Ok(())
}
