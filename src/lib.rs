//! Flashdeck: upload YAML flashcard decks and study them by token.

pub mod config;
pub mod flashcards;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use flashcards::{Card, Deck, DeckStore, ImportError, StoreError, ValidationError};
pub use server::{start_server, DeckServer};
