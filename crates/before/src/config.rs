//! Configuration file structure (before.toml).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub site: SiteConfig,
    pub build: BuildSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Before".to_string(),
            base_url: "/".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub output: String,
    /// Script URL for pages that allow client script
    pub client_script: Option<String>,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: "dist".to_string(),
            client_script: None,
            styles: vec![],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub base_path: String,
    pub static_dir: Option<String>,
    pub client_script: Option<String>,
    pub content_security_policy: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            base_path: "/_before".to_string(),
            static_dir: None,
            client_script: None,
            content_security_policy: None,
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the file exists but is malformed.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("{} not found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn parse(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = load(&temp.path().join("before.toml")).unwrap();

        assert_eq!(config.site.title, "Before");
        assert_eq!(config.build.output, "dist");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.base_path, "/_before");
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = parse(
            r#"
[build]
output = "public"

[server]
port = 9000
client_script = "/_before/assets/main.js"
"#,
        )
        .unwrap();

        assert_eq!(config.build.output, "public");
        assert_eq!(config.site.base_url, "/");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.server.client_script.as_deref(),
            Some("/_before/assets/main.js")
        );
    }

    #[test]
    fn malformed_file_errors() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("before.toml");
        fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();

        assert!(load(&path).is_err());
    }
}
