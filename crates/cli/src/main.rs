//! ChatRAG CLI — the main entry point.
//!
//! Commands:
//! - `index`    — Index a conversation file and report chunk statistics
//! - `search`   — Rank conversation chunks against a query
//! - `context`  — Print the budgeted context (or full prompt) for a query
//! - `config`   — Show, locate, validate or initialize the configuration file

use std::path::PathBuf;

use chatrag_config::AppConfig;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "chatrag",
    about = "ChatRAG — relevant conversation history for LLM prompts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (default: ~/.chatrag/config.toml)
    #[arg(short, long, global = true, env = "CHATRAG_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a conversation file and print chunk statistics
    Index {
        /// Conversation JSON (object with `messages`, or a bare message array)
        file: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank conversation chunks against a query
    Search {
        /// Conversation JSON file
        file: PathBuf,

        /// Free-text query
        query: String,

        /// Number of chunks to return (default from config)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Show relevance scores
        #[arg(long)]
        scores: bool,
    },

    /// Print the context assembled for a query
    Context {
        /// Conversation JSON file
        file: PathBuf,

        /// Free-text query
        query: String,

        /// Print the full prompt prefix instead of the bare context
        #[arg(long)]
        prompt: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Check that the config file parses and its values are in range
    Validate,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);

    // Config commands must work even when the file on disk is broken.
    if let Commands::Config { action } = cli.command {
        init_tracing(if cli.verbose { "debug" } else { "info" }, cli.json_logs);
        match action {
            ConfigAction::Show => commands::config_cmd::show(&config_path)?,
            ConfigAction::Path => commands::config_cmd::path(&config_path),
            ConfigAction::Validate => commands::config_cmd::validate(&config_path)?,
            ConfigAction::Init { force } => commands::config_cmd::init(&config_path, force)?,
        }
        return Ok(());
    }

    let config = AppConfig::load_with_overrides(&config_path)
        .map_err(|e| format!("Failed to load config: {e}"))?;
    let level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    init_tracing(level, cli.json_logs || config.logging.json);

    match cli.command {
        Commands::Index { file, json } => commands::index::run(&config, &file, json)?,
        Commands::Search {
            file,
            query,
            top_k,
            scores,
        } => commands::search::run(&config, &file, &query, top_k, scores)?,
        Commands::Context {
            file,
            query,
            prompt,
        } => commands::context::run(&config, &file, &query, prompt)?,
        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}
