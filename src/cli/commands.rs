//! CLI command definitions and argument parsing

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "ricorda")]
#[command(about = "Conversational note memory with semantic retrieval")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a note in a conversation's memory
    Remember {
        /// Conversation namespace the note belongs to
        namespace: String,
        /// Note text to store
        text: String,
    },
    /// Search a conversation's notes semantically
    Search {
        /// Conversation namespace to search in
        namespace: String,
        /// Query text
        query: String,
        /// Maximum number of results (default from config)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Minimum similarity score (default from config)
        #[arg(short, long)]
        threshold: Option<f32>,
    },
    /// Delete every note in a conversation's namespace
    Forget {
        /// Conversation namespace to clear
        namespace: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Draft caption variants from a brief
    Draft {
        /// Creative brief for the caption
        brief: String,
        /// Conversation namespace holding the language setting
        #[arg(short, long, default_value = "cli")]
        namespace: String,
        /// Override the conversation's language phase (IT or EN)
        #[arg(short, long)]
        phase: Option<String>,
        /// Number of variants to request
        #[arg(long, default_value = "3")]
        variants: usize,
    },
    /// Show or set a conversation's language phase
    Phase {
        /// New phase (IT or EN); omit to show the current one
        value: Option<String>,
        /// Conversation namespace
        #[arg(short, long, default_value = "cli")]
        namespace: String,
    },
    /// Show which services are configured
    Status,
}
