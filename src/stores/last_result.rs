use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::QuizResult;
use crate::storage::KeyValueStorage;

const RESULT_KEY: &str = "lastQuizResult";

/// Single-slot handoff between session completion and the result
/// screen. Overwritten by every finished session, never versioned.
#[derive(Clone)]
pub struct LastResultStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl LastResultStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn save(&self, result: &QuizResult) -> AppResult<()> {
        let raw = serde_json::to_string(result)
            .map_err(|err| AppError::StorageUnavailable(format!("serializing result: {}", err)))?;
        self.storage.set(RESULT_KEY, &raw)
    }

    pub fn load(&self) -> AppResult<Option<QuizResult>> {
        match self.storage.get(RESULT_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}
