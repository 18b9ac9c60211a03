use std::path::PathBuf;

use clap::{Parser, Subcommand};
use duckov_wiki::WikiError;
use duckov_wiki::logging::init_logging;

mod build;
mod pages;
mod server;

#[derive(Parser)]
#[command(name = "duckov-wiki", about = "Build and serve the DuckovWiki site", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the whole site into the output directory
    Build {
        /// Root of the markdown content tree
        #[arg(long, default_value = "content")]
        content: PathBuf,
        /// Directory holding the per-locale dictionary JSON files
        #[arg(long, default_value = "locales")]
        locales: PathBuf,
        #[arg(long, default_value = "dist")]
        out: PathBuf,
        /// Absolute URL the site is published under, used for the sitemap
        #[arg(long, default_value = "https://duckovwiki.example")]
        base_url: String,
    },
    /// Serve a built site, redirecting locale-less requests
    Serve {
        /// The build output directory to serve
        #[arg(long, default_value = "dist")]
        dir: PathBuf,
        #[arg(long, default_value = "locales")]
        locales: PathBuf,
        #[arg(long, default_value_t = 1998)]
        port: u16,
        /// Listen on 0.0.0.0 instead of localhost
        #[arg(long)]
        host: bool,
    },
}

fn main() -> Result<(), WikiError> {
    init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            content,
            locales,
            out,
            base_url,
        } => build::build(&content, &locales, &out, &base_url),
        Commands::Serve {
            dir,
            locales,
            port,
            host,
        } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(dir, locales, port, host))
        }
    }
}
