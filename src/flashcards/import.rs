//! Deck file import
//!
//! Parses raw YAML and hands the resulting document to the validator, keeping
//! syntax errors apart from validation errors so callers can report each.

use serde_yaml::Value;
use thiserror::Error;

use super::errors::ValidationError;
use super::models::Deck;
use super::validator::validate_document;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Parse and validate a deck file
pub fn import_yaml(bytes: &[u8]) -> Result<Vec<Deck>, ImportError> {
    let doc: Value = serde_yaml::from_slice(bytes)?;
    Ok(validate_document(&doc)?)
}
