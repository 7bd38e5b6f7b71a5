//! Validation and normalization of parsed deck documents
//!
//! Accepts two document shapes:
//! ```yaml
//! # single deck
//! title: Capitals
//! cards:
//!   - q: France?
//!     a: Paris
//!
//! # several decks
//! decks:
//!   - title: Capitals
//!     cards: [...]
//!   - title: Rivers
//!     cards: [...]
//! ```
//!
//! Validation is a single fail-fast pass: the first error aborts the whole
//! document and no partial result is returned.

use serde_yaml::Value;

use super::errors::{CardField, ValidationError};
use super::models::{Card, Deck};

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validate one card of `deck_title`. `index` is 1-based.
pub fn validate_card(card: &Value, deck_title: &str, index: usize) -> Result<Card> {
    if card.as_mapping().is_none() {
        return Err(ValidationError::Shape {
            deck_title: deck_title.to_string(),
            index,
        });
    }

    let question = card_field(card, CardField::Question, deck_title, index)?;
    let answer = card_field(card, CardField::Answer, deck_title, index)?;
    Ok(Card { question, answer })
}

/// Read a trimmed, non-empty string field from a card mapping
fn card_field(card: &Value, field: CardField, deck_title: &str, index: usize) -> Result<String> {
    card.get(field.key())
        .or_else(|| card.get(field.long_key()))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ValidationError::EmptyField {
            deck_title: deck_title.to_string(),
            index,
            field,
        })
}

/// Normalize a raw deck mapping into a [`Deck`] with a freshly generated id
pub fn normalize_deck(raw: &Value) -> Result<Deck> {
    let title = raw
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ValidationError::MissingTitle)?;

    let raw_cards = raw
        .get("cards")
        .and_then(Value::as_sequence)
        .filter(|cards| !cards.is_empty())
        .ok_or_else(|| ValidationError::EmptyCardList {
            deck_title: title.to_string(),
        })?;

    let cards = raw_cards
        .iter()
        .enumerate()
        .map(|(i, card)| validate_card(card, title, i + 1))
        .collect::<Result<Vec<_>>>()?;

    Ok(Deck::new(title.to_string(), cards))
}

/// Validate a whole parsed document, returning its decks in input order.
///
/// On success the returned list is never empty.
pub fn validate_document(doc: &Value) -> Result<Vec<Deck>> {
    if doc.as_mapping().is_none() {
        return Err(ValidationError::UnrecognizedShape);
    }

    if let Some(decks) = doc.get("decks") {
        let entries = decks
            .as_sequence()
            .filter(|entries| !entries.is_empty())
            .ok_or(ValidationError::EmptyDeckList)?;

        // Non-mapping entries are skipped rather than rejected.
        let decks = entries
            .iter()
            .filter(|entry| entry.is_mapping())
            .map(normalize_deck)
            .collect::<Result<Vec<_>>>()?;

        if decks.is_empty() {
            return Err(ValidationError::NoValidDecks);
        }
        if decks.len() < entries.len() {
            log::debug!(
                "Skipped {} non-mapping entries in 'decks'",
                entries.len() - decks.len()
            );
        }
        return Ok(decks);
    }

    if doc.get("title").is_some() && doc.get("cards").is_some() {
        return Ok(vec![normalize_deck(doc)?]);
    }

    Err(ValidationError::UnrecognizedShape)
}
