use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// Minimum correct answers to pass. The official exam is 30 questions
/// with at most 3 errors; the mark is a fixed constant, not a fraction
/// of `total`, so shorter sessions (e.g. a small missed-questions deck)
/// can never pass under the literal rule.
pub const PASS_SCORE: u32 = 27;

/// Immutable snapshot produced once at session completion and handed to
/// the result screen. Serialized shape matches the persisted
/// `lastQuizResult` record.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    pub questions: Vec<Question>,
    /// Question number → chosen option letter. Unanswered questions have
    /// no entry.
    pub answers: HashMap<String, String>,
    pub score: u32,
    pub total: u32,
    #[serde(rename = "timeSpent")]
    pub time_spent_secs: u32,
    pub date: DateTime<Utc>,
}

impl QuizResult {
    pub fn is_passed(&self) -> bool {
        self.score >= PASS_SCORE
    }

    /// Rounded percentage of correct answers; 0 for an empty session.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.score as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn incorrect_count(&self) -> u32 {
        self.total - self.score
    }
}
