use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sitenav",
    about = "sitenav: self-hosted website navigation dashboard",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./sitenav.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data file holding the website collection
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List stored websites
    List(ListArgs),
    /// Discover icon candidates for a site
    Favicon(FaviconArgs),
    /// Write the stored collection as JSON
    Export(ExportArgs),
    /// Replace the stored collection from a JSON file
    Import(ImportArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub images: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct FaviconArgs {
    pub url: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file of the form {"websites": [...]}
    pub file: PathBuf,
    /// Save the current collection here before replacing it
    #[arg(long)]
    pub backup: Option<PathBuf>,
}
