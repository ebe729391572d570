//! Static site build command.

use std::path::PathBuf;

use anyhow::Result;
use before_static::{BuildConfig, StaticBuilder};

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(file_config: ConfigFile, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building static pages...");

    let config = BuildConfig {
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.build.output)),
        base_url: file_config.site.base_url,
        title: file_config.site.title,
        client_script: file_config.build.client_script,
        styles: file_config.build.styles,
    };

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
