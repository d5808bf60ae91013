//! # orbit CLI
//!
//! Command-line interface for the orbit static blog generator.

mod cache;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orbit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "orbit.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new orbit project
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Build the article index and site artifacts
    Build,

    /// Start development server with rebuild on change
    Dev {
        /// Server port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Search article content
    Search {
        /// Search query
        query: String,

        /// Maximum results to return
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,

        /// Filter by tags (comma separated, display form)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// List tags with article counts
    Tags {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run the build pipeline and report diagnostics
    Verify {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Build => commands::build_site(&cli.config),
        Commands::Dev { port } => commands::dev_server(&cli.config, port).await,
        Commands::Search {
            query,
            limit,
            json,
            tags,
        } => {
            let opts = commands::SearchOptions { limit, json, tags };
            commands::search_site(&cli.config, &query, opts)
        }
        Commands::Tags { json } => commands::list_tags(&cli.config, json),
        Commands::Verify { json } => commands::verify_site(&cli.config, json),
    }
}
