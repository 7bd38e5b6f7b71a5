use std::path::Path;

use anyhow::{Context, Result};

use flashdeck_lib::flashcards::{import_yaml, DeckPayload};

use crate::render::terminal;
use crate::OutputFormat;

pub fn run(file: &Path, format: &OutputFormat, use_color: bool) -> Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let decks = import_yaml(&bytes)
        .with_context(|| format!("{} is not a valid deck file", file.display()))?;

    match format {
        OutputFormat::Json => {
            let output: Vec<DeckPayload> = decks.into_iter().map(DeckPayload::from).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let rendered: Vec<String> = decks
                .iter()
                .map(|deck| terminal::render_deck(deck, use_color))
                .collect();
            println!("{}", rendered.join("\n\n"));
        }
    }

    Ok(())
}
