//! Deck validation error types

use std::fmt;

use thiserror::Error;

/// Which half of a card failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Question,
    Answer,
}

impl CardField {
    /// Key used in deck files
    pub fn key(self) -> &'static str {
        match self {
            Self::Question => "q",
            Self::Answer => "a",
        }
    }

    /// Long-form key accepted when the short one is absent
    pub fn long_key(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors raised while normalizing an uploaded document.
///
/// All of these describe bad user input. Card indexes are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Card #{index} in deck '{deck_title}' must be a mapping with 'q' and 'a'.")]
    Shape { deck_title: String, index: usize },

    #[error("Card #{index} in deck '{deck_title}' has empty or missing '{field}'.")]
    EmptyField {
        deck_title: String,
        index: usize,
        field: CardField,
    },

    #[error("Each deck must have a non-empty 'title'.")]
    MissingTitle,

    #[error("Deck '{deck_title}' must have a non-empty 'cards' list.")]
    EmptyCardList { deck_title: String },

    #[error("'decks' must be a non-empty list.")]
    EmptyDeckList,

    #[error("No valid decks found.")]
    NoValidDecks,

    #[error(
        "YAML must be either a single deck with 'title' and 'cards', \
         or an object with 'decks: [...]'."
    )]
    UnrecognizedShape,
}
