//! CLI definitions for autofill.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use autofill_protocols::BackendKind;

/// Autofill CLI.
#[derive(Parser)]
#[command(name = "autofill")]
#[command(about = "Fill web forms from a profile with a tool-calling LLM")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: config/autofill.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the page context extracted from an HTML file
    Extract {
        /// HTML file to load
        #[arg(long)]
        page: PathBuf,

        /// Print the items as JSON instead of the prompt rendering
        #[arg(long)]
        json: bool,
    },

    /// Print the prompt that would be sent to the model
    Prompt {
        /// HTML file to load
        #[arg(long)]
        page: PathBuf,

        /// Profile text file (default: the selected configured profile)
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Run the full pipeline and print the filled form fields
    Fill {
        /// HTML file to load
        #[arg(long)]
        page: PathBuf,

        /// Profile text file (default: the selected configured profile)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Backend to use (gemini, openai, anthropic)
        #[arg(long)]
        provider: Option<BackendKind>,

        /// Model name (default: configured model, else the backend default)
        #[arg(long)]
        model: Option<String>,

        /// API key (default: configured key)
        #[arg(long, env = "AUTOFILL_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}
