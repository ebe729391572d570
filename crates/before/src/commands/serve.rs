//! Page server command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use before_server::{Host, ServerConfig};

use crate::config::ConfigFile;

/// Run the serve command.
pub async fn run(file_config: ConfigFile, port: Option<u16>, open: bool) -> Result<()> {
    let settings = file_config.server;
    let static_dir = settings.static_dir.map(PathBuf::from);

    if let Some(dir) = &static_dir {
        if !dir.exists() {
            anyhow::bail!("Static directory not found: {}", dir.display());
        }
    }

    let mut config = ServerConfig {
        host: settings.host,
        port: port.unwrap_or(settings.port),
        base_path: settings.base_path,
        title: file_config.site.title,
        static_dir,
        client_script: settings.client_script,
        open,
        ..Default::default()
    };
    if let Some(policy) = settings.content_security_policy {
        config.content_security_policy = policy;
    }

    tracing::info!("Starting page server on port {}", config.port);

    Host::new(config)
        .start()
        .await
        .context("Page server failed")?;

    Ok(())
}
