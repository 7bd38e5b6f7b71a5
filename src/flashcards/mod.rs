//! Flashcard decks uploaded as YAML
//!
//! This module provides:
//! - Card, deck and document validation with whitespace normalization
//! - YAML import that separates syntax errors from validation errors
//! - An in-memory, token-keyed deck store backing study sessions
//! - The study session queue (flip, grade, restart)

pub mod errors;
pub mod import;
pub mod models;
pub mod session;
pub mod storage;
pub mod validator;

pub use errors::{CardField, ValidationError};
pub use import::{import_yaml, ImportError};
pub use models::*;
pub use session::{Grade, Progress, StudySession};
pub use storage::{DeckStore, StoreError};
pub use validator::{normalize_deck, validate_card, validate_document};
