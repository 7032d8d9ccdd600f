use crate::tracing::LogFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moonsearch")]
#[command(about = "Generate the client-side search script for a documentation site", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the search script from a site manifest and write it to the output directory
    Build {
        /// JSON manifest mapping output paths to site files
        #[arg(short, long)]
        files: PathBuf,
        /// Build directory the script is written into
        #[arg(short, long)]
        out: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the documentation layout identifier
        #[arg(long)]
        layout: Option<String>,
        /// Override the script path relative to the build directory
        #[arg(long)]
        output_path: Option<String>,
        /// Verify the existing script is up to date instead of writing it
        #[arg(long)]
        check: bool,
    },
    /// Preview the ranked results a query would show on the search page
    Search {
        query: String,
        #[arg(short, long)]
        files: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
    /// Print the canonical search URL a form submission navigates to
    Url {
        input: String,
        /// Page URL the form is submitted from
        #[arg(short, long, default_value = "http://localhost/")]
        base: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
