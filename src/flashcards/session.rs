//! Study session queue
//!
//! Cards are shown from a queue of indices in deck order. A card graded
//! "again" is requeued a few positions back; a card graded "got it" leaves the
//! queue, or moves to the end when cards are kept after being learned.

use std::collections::VecDeque;
use std::fmt;

use super::models::Card;

/// How far back a card graded "again" is requeued
pub const REQUEUE_DISTANCE: usize = 3;

/// Outcome of showing a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Again,
    GotIt,
}

/// Snapshot of how far a session has come
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the current card, 0 when nothing is left
    pub current: usize,
    pub total: usize,
    pub remaining: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.remaining > 0 {
            write!(
                f,
                "Card {} of {}, {} remaining",
                self.current, self.total, self.remaining
            )
        } else {
            write!(f, "Session complete. {} / {} learned.", self.total, self.total)
        }
    }
}

#[derive(Debug, Clone)]
pub struct StudySession {
    cards: Vec<Card>,
    queue: VecDeque<usize>,
    showing_answer: bool,
    remove_on_got_it: bool,
}

impl StudySession {
    pub fn new(cards: Vec<Card>, remove_on_got_it: bool) -> Self {
        let queue = (0..cards.len()).collect();
        Self {
            cards,
            queue,
            showing_answer: false,
            remove_on_got_it,
        }
    }

    /// Card at the front of the queue
    pub fn current(&self) -> Option<&Card> {
        self.queue.front().map(|&i| &self.cards[i])
    }

    /// Text currently facing the user: the question, or the answer once flipped
    pub fn face(&self) -> Option<&str> {
        self.current().map(|card| {
            if self.showing_answer {
                card.answer.as_str()
            } else {
                card.question.as_str()
            }
        })
    }

    pub fn is_showing_answer(&self) -> bool {
        self.showing_answer
    }

    pub fn flip(&mut self) {
        if !self.queue.is_empty() {
            self.showing_answer = !self.showing_answer;
        }
    }

    pub fn grade(&mut self, grade: Grade) {
        let Some(idx) = self.queue.pop_front() else {
            return;
        };

        match grade {
            Grade::Again => {
                let pos = REQUEUE_DISTANCE.min(self.queue.len());
                self.queue.insert(pos, idx);
            }
            Grade::GotIt if !self.remove_on_got_it => self.queue.push_back(idx),
            Grade::GotIt => {}
        }
        self.showing_answer = false;
    }

    /// Put every card back in deck order
    pub fn restart(&mut self) {
        self.queue = (0..self.cards.len()).collect();
        self.showing_answer = false;
    }

    pub fn set_remove_on_got_it(&mut self, remove: bool) {
        self.remove_on_got_it = remove;
    }

    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn progress(&self) -> Progress {
        let total = self.cards.len();
        let remaining = self.queue.len();
        let current = if total == 0 || remaining == 0 {
            0
        } else {
            total.saturating_sub(remaining) + 1
        };
        Progress {
            current,
            total,
            remaining,
        }
    }
}
