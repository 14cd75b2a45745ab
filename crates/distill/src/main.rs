//! Distill CLI - LLM-ready documentation from a built Storybook.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "distill")]
#[command(about = "Generate llms.txt documentation from a Storybook static build")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default distill.toml in the current project
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Extract story metadata and write the llms output tree
    Generate {
        /// Storybook static build directory (defaults to config or "storybook-static")
        #[arg(short, long)]
        dist: Option<PathBuf>,

        /// Base URL prefixed to generated links
        #[arg(long)]
        base_url: Option<String>,

        /// Summary document title
        #[arg(long)]
        title: Option<String>,

        /// Summary document description
        #[arg(long)]
        description: Option<String>,
    },
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

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
        Commands::Generate {
            dist,
            base_url,
            title,
            description,
        } => {
            commands::generate::run(dist, base_url, title, description).await?;
        }
    }

    Ok(())
}
