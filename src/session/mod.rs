pub mod engine;

pub use engine::QuizEngine;

use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Where the session's question sequence comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizMode {
    /// Cross-theme random sample.
    Random,
    /// Contents of the missed-questions deck.
    Favorites,
    /// One theme's question set, shuffled and capped.
    Theme(String),
}

impl FromStr for QuizMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(QuizMode::Random),
            "favorites" => Ok(QuizMode::Favorites),
            _ => match s.strip_prefix("theme:") {
                Some(slug) if !slug.is_empty() => Ok(QuizMode::Theme(slug.to_string())),
                _ => Err(AppError::LoadError(format!("unknown quiz mode '{}'", s))),
            },
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Random => write!(f, "random"),
            QuizMode::Favorites => write!(f, "favorites"),
            QuizMode::Theme(slug) => write!(f, "theme:{}", slug),
        }
    }
}

/// When correctness is revealed to the user. Fixed for the session's
/// lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FeedbackPolicy {
    /// Reveal at the end; re-selecting an answer overwrites it.
    #[default]
    Standard,
    /// Reveal after each answer; an answer locks once given.
    Immediate,
}

impl FromStr for FeedbackPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(FeedbackPolicy::Standard),
            "immediate" => Ok(FeedbackPolicy::Immediate),
            _ => Err(AppError::LoadError(format!(
                "unknown feedback policy '{}'",
                s
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Completed,
}

/// Per-session knobs. Defaults mirror the official exam: 30 questions,
/// 30 minutes, timer on, feedback at the end.
#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
    pub feedback: FeedbackPolicy,
    pub timer: bool,
    pub session_size: usize,
    pub time_limit_secs: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            feedback: FeedbackPolicy::Standard,
            timer: true,
            session_size: 30,
            time_limit_secs: 30 * 60,
        }
    }
}

/// What happened to a submitted answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Answer recorded. `all_answered` signals "ready to finish"; the
    /// caller confirms with the user rather than the engine finishing
    /// on its own.
    Recorded { all_answered: bool },
    /// Dropped: the question is locked under the immediate policy, or
    /// the session is already completed.
    Locked,
}

/// Result of one timer tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Timer disabled or session already completed.
    Idle,
    Running { remaining_secs: u32 },
    /// The budget hit zero; the session completed with whatever answers
    /// were recorded.
    Expired(crate::models::QuizResult),
}
