mod commands;
mod render;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashdeck", about = "Flashcard deck server and validator", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Run the upload and study-session HTTP server
    Serve {
        /// TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Listen address (overrides the config file)
        #[arg(long)]
        bind: Option<SocketAddr>,
        /// Upload size limit in bytes (overrides the config file)
        #[arg(long)]
        max_upload_bytes: Option<usize>,
    },

    /// Validate a deck file and print the normalized decks
    Check {
        /// YAML deck file
        file: PathBuf,
        /// Output format
        #[arg(long, default_value = "plain")]
        format: OutputFormat,
        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },

    /// Study a deck from a file in the terminal
    Study {
        /// YAML deck file
        file: PathBuf,
        /// Deck title (case-insensitive prefix match, defaults to the first deck)
        #[arg(long)]
        deck: Option<String>,
        /// Move learned cards to the end of the queue instead of removing them
        #[arg(long)]
        keep_on_got_it: bool,
        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, bind, max_upload_bytes } => {
            commands::serve::run(config.as_deref(), bind, max_upload_bytes)?;
        }
        Command::Check { file, format, no_color } => {
            let use_color = !no_color && atty_check();
            commands::check::run(&file, &format, use_color)?;
        }
        Command::Study { file, deck, keep_on_got_it, no_color } => {
            let use_color = !no_color && atty_check();
            commands::study::run(&file, deck.as_deref(), keep_on_got_it, use_color)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
