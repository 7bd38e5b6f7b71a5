//! Data models for uploaded flashcard decks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single question and answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub question: String,
    pub answer: String,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A named, ordered collection of cards.
///
/// The id is generated on every normalization and never read from input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub title: String,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(title: String, cards: Vec<Card>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            cards,
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

/// Everything produced by one successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: String,
    pub decks: Vec<Deck>,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(token: String, decks: Vec<Deck>) -> Self {
        Self {
            token,
            decks,
            created_at: Utc::now(),
        }
    }

    /// Find a deck by id (linear scan, decks per upload are few)
    pub fn find_deck(&self, deck_id: Uuid) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == deck_id)
    }
}

/// Deck listing entry shown after an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub deck_id: Uuid,
    pub title: String,
    pub count: usize,
}

impl From<&Deck> for DeckSummary {
    fn from(deck: &Deck) -> Self {
        Self {
            deck_id: deck.id,
            title: deck.title.clone(),
            count: deck.card_count(),
        }
    }
}

/// Full deck handed to a study session client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckPayload {
    pub deck_id: Uuid,
    pub title: String,
    pub cards: Vec<Card>,
    pub count: usize,
}

impl From<Deck> for DeckPayload {
    fn from(deck: Deck) -> Self {
        let count = deck.card_count();
        Self {
            deck_id: deck.id,
            title: deck.title,
            cards: deck.cards,
            count,
        }
    }
}
