//! In-memory deck storage keyed by upload token
//!
//! Sessions live for the lifetime of the process. There is no eviction and
//! no update or delete: each token is written once and read many times.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Deck, SessionRecord};

/// Length of generated upload tokens
const TOKEN_LEN: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid or expired token.")]
    TokenNotFound,

    #[error("Deck not found.")]
    DeckNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Token-keyed store of normalized decks, safe to share across request handlers
#[derive(Debug, Default)]
pub struct DeckStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl DeckStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the decks from one upload and return the token that retrieves them
    pub fn create(&self, decks: Vec<Deck>) -> String {
        self.create_session(decks).token
    }

    /// Store the decks from one upload and return a copy of the new session
    pub fn create_session(&self, decks: Vec<Deck>) -> SessionRecord {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);

        let mut token = generate_token();
        while sessions.contains_key(&token) {
            token = generate_token();
        }

        let record = SessionRecord::new(token.clone(), decks);
        log::info!(
            "Stored {} deck(s) under token {}… at {}",
            record.decks.len(),
            &token[..6],
            record.created_at.to_rfc3339()
        );
        sessions.insert(token, record.clone());
        record
    }

    /// The session stored under `token`
    pub fn get_session(&self, token: &str) -> Result<SessionRecord> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.get(token).cloned().ok_or(StoreError::TokenNotFound)
    }

    /// All decks stored under `token`, in upload order
    pub fn get_decks(&self, token: &str) -> Result<Vec<Deck>> {
        self.get_session(token).map(|record| record.decks)
    }

    /// A single deck stored under `token`.
    ///
    /// `deck_id` comes straight from the client; anything that is not the id
    /// of one of the token's decks is a miss.
    pub fn get_deck(&self, token: &str, deck_id: &str) -> Result<Deck> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        let record = sessions.get(token).ok_or(StoreError::TokenNotFound)?;
        Uuid::parse_str(deck_id)
            .ok()
            .and_then(|id| record.find_deck(id))
            .cloned()
            .ok_or_else(|| StoreError::DeckNotFound(deck_id.to_string()))
    }

    /// Number of stored sessions
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::flashcards::models::Card;

    fn deck(title: &str) -> Deck {
        Deck::new(title.to_string(), vec![Card::new("Q", "A")])
    }

    #[test]
    fn test_create_and_get_decks() {
        let store = DeckStore::new();
        let decks = vec![deck("A"), deck("B"), deck("C")];

        let token = store.create(decks.clone());

        assert_eq!(token.len(), TOKEN_LEN);
        assert_eq!(store.get_decks(&token).unwrap(), decks);
    }

    #[test]
    fn test_get_deck_by_id() {
        let store = DeckStore::new();
        let a = deck("A");
        let b = deck("B");
        let b_clone = b.clone();

        let token = store.create(vec![a, b]);

        assert_eq!(
            store.get_deck(&token, &b_clone.id.to_string()).unwrap(),
            b_clone
        );
    }

    #[test]
    fn test_unknown_token() {
        let store = DeckStore::new();
        let d = deck("A");
        store.create(vec![d.clone()]);

        assert_eq!(store.get_decks("missing"), Err(StoreError::TokenNotFound));
        assert_eq!(
            store.get_deck("missing", &d.id.to_string()),
            Err(StoreError::TokenNotFound)
        );
    }

    #[test]
    fn test_unknown_deck_id() {
        let store = DeckStore::new();
        let token = store.create(vec![deck("A")]);
        let other = Uuid::new_v4().to_string();

        assert_eq!(
            store.get_deck(&token, &other),
            Err(StoreError::DeckNotFound(other))
        );
        assert!(matches!(
            store.get_deck(&token, "not-a-uuid"),
            Err(StoreError::DeckNotFound(_))
        ));
    }

    #[test]
    fn test_session_keeps_token_and_creation_time() {
        let store = DeckStore::new();
        let before = chrono::Utc::now();

        let created = store.create_session(vec![deck("A")]);
        let fetched = store.get_session(&created.token).unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.token.len(), TOKEN_LEN);
        assert!(fetched.created_at >= before);
        assert_eq!(store.get_session("missing"), Err(StoreError::TokenNotFound));
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = DeckStore::new();
        let tokens: HashSet<String> = (0..100).map(|_| store.create(vec![deck("A")])).collect();

        assert_eq!(tokens.len(), 100);
        assert_eq!(store.len(), 100);
    }

    #[test]
    fn test_concurrent_creates() {
        let store = Arc::new(DeckStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..25)
                        .map(|j| store.create(vec![deck(&format!("{}-{}", i, j))]))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let tokens: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(store.len(), 200);
        for token in &tokens {
            assert_eq!(store.get_decks(token).unwrap().len(), 1);
        }
    }
}
