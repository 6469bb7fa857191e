use std::collections::HashMap;

use chrono::Utc;
use rand::seq::SliceRandom;

use crate::bank::QuestionBank;
use crate::errors::{AppError, AppResult};
use crate::models::{Question, QuizResult};
use crate::session::{
    FeedbackPolicy, QuizMode, SessionOptions, SessionPhase, SubmitOutcome, TickOutcome,
};
use crate::stores::MissedQuestionsStore;

/// The quiz-session state machine. Owns the question sequence, the
/// recorded answers, the cursor and the remaining time budget; mutates
/// the missed-questions deck exactly once, at completion.
///
/// `Active` is entered through the fallible constructors (question
/// acquisition is the only suspension point); `Completed` is terminal
/// and a new engine must be built for another attempt.
#[derive(Debug)]
pub struct QuizEngine {
    questions: Vec<Question>,
    answers: HashMap<String, String>,
    position: usize,
    phase: SessionPhase,
    mode: QuizMode,
    options: SessionOptions,
    remaining_secs: Option<u32>,
    missed: MissedQuestionsStore,
    result: Option<QuizResult>,
}

impl QuizEngine {
    /// Acquires the question sequence for `mode` and enters `Active`.
    /// Fails with `LoadError` when acquisition fails or yields nothing;
    /// the caller is expected to fall back to a random session.
    pub fn start(
        bank: &QuestionBank,
        missed: MissedQuestionsStore,
        mode: QuizMode,
        options: SessionOptions,
    ) -> AppResult<Self> {
        let questions = match &mode {
            QuizMode::Random => bank.sample_random(options.session_size)?,
            QuizMode::Favorites => missed.list().unwrap_or_else(|err| {
                log::warn!("missed-questions deck unavailable ({}); treating as empty", err);
                vec![]
            }),
            QuizMode::Theme(slug) => {
                let mut questions = bank.load_theme(slug)?.questions;
                questions.shuffle(&mut rand::thread_rng());
                questions.truncate(options.session_size);
                questions
            }
        };

        Self::with_questions(questions, missed, mode, options)
    }

    /// Enters `Active` over an already-acquired question sequence.
    pub fn with_questions(
        questions: Vec<Question>,
        missed: MissedQuestionsStore,
        mode: QuizMode,
        options: SessionOptions,
    ) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::LoadError(format!(
                "no questions available for mode '{}'",
                mode
            )));
        }

        log::info!(
            "session started: mode={} questions={} feedback={:?} timer={}",
            mode,
            questions.len(),
            options.feedback,
            options.timer
        );

        Ok(Self {
            questions,
            answers: HashMap::new(),
            position: 0,
            phase: SessionPhase::Active,
            mode,
            options,
            remaining_secs: options.timer.then_some(options.time_limit_secs),
            missed,
            result: None,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.position]
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> &QuizMode {
        &self.mode
    }

    pub fn feedback(&self) -> FeedbackPolicy {
        self.options.feedback
    }

    /// `None` when the timer is disabled.
    pub fn remaining_secs(&self) -> Option<u32> {
        self.remaining_secs
    }

    pub fn answer_for(&self, number: &str) -> Option<&str> {
        self.answers.get(number).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn all_answered(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// The result, once `Completed`.
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    /// Records an answer for the current question. Under the immediate
    /// policy an existing answer locks the question; under the standard
    /// policy re-selection overwrites. Pacing between questions is the
    /// caller's concern; the engine only reports whether everything is
    /// answered.
    pub fn submit_answer(&mut self, letter: &str) -> SubmitOutcome {
        if self.phase == SessionPhase::Completed {
            return SubmitOutcome::Locked;
        }

        let number = self.current_question().number.clone();
        if self.options.feedback == FeedbackPolicy::Immediate && self.answers.contains_key(&number)
        {
            return SubmitOutcome::Locked;
        }

        self.answers.insert(number, letter.to_string());
        SubmitOutcome::Recorded {
            all_answered: self.all_answered(),
        }
    }

    /// Moves the cursor to `index`. The cursor never leaves
    /// `[0, len)`; an invalid target is rejected, not clamped.
    pub fn go_to(&mut self, index: usize) -> AppResult<()> {
        if index >= self.questions.len() {
            return Err(AppError::OutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.position = index;
        Ok(())
    }

    /// Advances to the next question; returns false on the last one.
    pub fn advance(&mut self) -> bool {
        if self.position + 1 < self.questions.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Steps back one question; returns false on the first one.
    pub fn previous(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// One second of timer budget. Ticks are idempotent at zero and the
    /// budget only decreases; crossing zero completes the session with
    /// whatever answers exist.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase == SessionPhase::Completed {
            return TickOutcome::Idle;
        }
        let Some(remaining) = self.remaining_secs else {
            return TickOutcome::Idle;
        };

        let remaining = remaining.saturating_sub(1);
        self.remaining_secs = Some(remaining);

        if remaining == 0 {
            log::info!("time budget exhausted, completing session");
            TickOutcome::Expired(self.finish())
        } else {
            TickOutcome::Running {
                remaining_secs: remaining,
            }
        }
    }

    /// `Active → Completed`. Scores the session, settles the
    /// missed-questions deck and produces the immutable result. Calling
    /// again returns the same result. Deck write failures are logged
    /// and do not block completion.
    pub fn finish(&mut self) -> QuizResult {
        if let Some(result) = &self.result {
            return result.clone();
        }

        let mut correct = 0u32;
        for question in &self.questions {
            match self.answers.get(&question.number) {
                Some(letter) if question.is_correct_answer(letter) => {
                    correct += 1;
                    // Answering a reviewed question correctly retires it.
                    if self.mode == QuizMode::Favorites {
                        if let Err(err) = self.missed.remove(&question.number) {
                            log::warn!("could not retire question {}: {}", question.number, err);
                        }
                    }
                }
                Some(_) => {
                    if let Err(err) = self.missed.add(question) {
                        log::warn!(
                            "could not record missed question {}: {}",
                            question.number,
                            err
                        );
                    }
                }
                // Unanswered questions count against the score but leave
                // the deck untouched.
                None => {}
            }
        }

        let time_spent_secs = match self.remaining_secs {
            Some(remaining) => self.options.time_limit_secs - remaining,
            None => 0,
        };

        let result = QuizResult {
            questions: self.questions.clone(),
            answers: self.answers.clone(),
            score: correct,
            total: self.questions.len() as u32,
            time_spent_secs,
            date: Utc::now(),
        };

        log::info!(
            "session completed: {}/{} correct, {}s spent",
            result.score,
            result.total,
            result.time_spent_secs
        );

        self.phase = SessionPhase::Completed;
        self.result = Some(result.clone());
        result
    }
}
