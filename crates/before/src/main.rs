//! Before pages CLI - build and serve the static pages of Before.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "before")]
#[command(about = "Build and serve the static pages of Before")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to before.toml config file
    #[arg(short, long, default_value = "before.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build static pages, fragments and the route manifest
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve pages over HTTP
    Serve {
        /// Port to listen on (defaults to config or 8000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Open browser
        #[arg(long)]
        open: bool,
    },

    /// Print one page's markup
    Render {
        /// Route path
        #[arg(default_value = "info")]
        route: String,

        /// Print extracted text instead of HTML
        #[arg(long)]
        text: bool,
    },

    /// List routes and their delivery configuration as JSON
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build { output } => {
            let file_config = config::load(&cli.config)?;
            commands::build::run(file_config, output).await?;
        }
        Commands::Serve { port, open } => {
            let file_config = config::load(&cli.config)?;
            commands::serve::run(file_config, port, open).await?;
        }
        Commands::Render { route, text } => {
            commands::render::run(&route, text)?;
        }
        Commands::Routes => {
            commands::render::list_routes()?;
        }
    }

    Ok(())
}
