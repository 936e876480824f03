use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vitae - LaTeX resume compiler with watch mode and job-posting scraping
#[derive(Parser, Debug)]
#[command(name = "vitae")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable output (NDJSON for watch)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a resume template to PDF
    Compile {
        /// Template name (stem of a .tex file); prompts when omitted
        name: Option<String>,

        /// Templates directory (overrides config)
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Watch templates and recompile on save
    Watch {
        /// Templates directory (overrides config)
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Scrape a job-posting URL and print its content
    Scrape {
        /// Job posting URL to scrape
        url: String,

        /// Request only the main content of the page
        #[arg(long)]
        only_main_content: bool,
    },
}
