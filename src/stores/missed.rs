use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::Question;
use crate::storage::KeyValueStorage;

/// Persisted key; matches the record written by earlier versions of the
/// app, full Question objects rather than bare identifiers.
const MISSED_KEY: &str = "quiz_failed_questions";

/// Personal deck of previously-missed questions, keyed by question
/// number and persisted across sessions. Mutated only at session
/// completion: wrong answers enter the deck, questions answered
/// correctly while reviewing the deck leave it.
#[derive(Clone)]
pub struct MissedQuestionsStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for MissedQuestionsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MissedQuestionsStore").finish_non_exhaustive()
    }
}

impl MissedQuestionsStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Current deck contents, insertion-ordered. An uninitialized store
    /// reads as empty.
    pub fn list(&self) -> AppResult<Vec<Question>> {
        match self.storage.get(MISSED_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(vec![]),
        }
    }

    /// Appends a question unless one with the same number is already
    /// present. Idempotent.
    pub fn add(&self, question: &Question) -> AppResult<()> {
        let mut deck = self.list()?;
        if deck.iter().any(|q| q.number == question.number) {
            return Ok(());
        }
        deck.push(question.clone());
        self.write(&deck)
    }

    /// Removes the question with the given number, if present. Idempotent.
    pub fn remove(&self, number: &str) -> AppResult<()> {
        let deck = self.list()?;
        let kept: Vec<Question> = deck.into_iter().filter(|q| q.number != number).collect();
        self.write(&kept)
    }

    pub fn clear(&self) -> AppResult<()> {
        self.storage.remove(MISSED_KEY)
    }

    fn write(&self, deck: &[Question]) -> AppResult<()> {
        let raw = serde_json::to_string(deck)
            .map_err(|err| AppError::StorageUnavailable(format!("serializing deck: {}", err)))?;
        self.storage.set(MISSED_KEY, &raw)
    }
}
