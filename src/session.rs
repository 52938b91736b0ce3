use log::{debug, info};

use crate::error::QuizError;
use crate::generator::{generate_questions, OperandSource};
use crate::question::{Question, MAX_OPERAND};

/// Settings a quiz is started with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub difficulty: i64,
    pub question_count: usize,
}

impl SessionConfig {
    pub fn new(difficulty: i64, question_count: usize) -> Self {
        Self {
            difficulty,
            question_count,
        }
    }

    /// Upper bound of the operand range `1..=difficulty + 2`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidConfig` for an empty quiz, a difficulty below 1,
    /// or a difficulty whose bound exceeds `MAX_OPERAND` (its products would not fit an answer).
    pub fn operand_upper(&self) -> Result<u32, QuizError> {
        if self.question_count == 0 {
            return Err(QuizError::invalid_config("question count must be positive"));
        }
        if self.difficulty < 1 {
            return Err(QuizError::invalid_config(format!(
                "difficulty must be at least 1, got {}",
                self.difficulty
            )));
        }
        self.difficulty
            .checked_add(2)
            .and_then(|upper| u32::try_from(upper).ok())
            .filter(|&upper| upper <= MAX_OPERAND)
            .ok_or_else(|| {
                QuizError::invalid_config(format!("difficulty {} is too large", self.difficulty))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    /// More questions remain; `question` is now current
    Next { question: Question, score: i64 },
    Complete { final_score: i64 },
}

impl SubmitResult {
    pub fn is_complete(&self) -> bool {
        matches!(self, SubmitResult::Complete { .. })
    }
}

/// One run of generated questions from start to completion
#[derive(Debug, Clone)]
pub struct QuizSession {
    config: SessionConfig,
    questions: Vec<Question>,
    current_index: usize,
    score: i64,
    complete: bool,
}

impl QuizSession {
    /// Generate the question list and open a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidConfig` when `config` cannot produce a quiz.
    pub fn start<S: OperandSource + ?Sized>(
        config: SessionConfig,
        source: &mut S,
    ) -> Result<Self, QuizError> {
        let upper = config.operand_upper()?;
        let questions = generate_questions(upper, config.question_count, source);
        info!(
            "starting quiz: {} questions, operands 1..={}",
            questions.len(),
            upper
        );

        Ok(Self {
            config,
            questions,
            current_index: 0,
            score: 0,
            complete: false,
        })
    }

    pub fn difficulty(&self) -> i64 {
        self.config.difficulty
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn current_prompt(&self) -> Result<Question, QuizError> {
        if self.complete {
            return Err(QuizError::InvalidState {
                operation: "read the current prompt",
                phase: Phase::Finished,
            });
        }
        self.questions
            .get(self.current_index)
            .copied()
            .ok_or(QuizError::OutOfRange {
                index: self.current_index,
                len: self.questions.len(),
            })
    }

    /// Score `value` against the current question and move on.
    ///
    /// A correct answer adds one point and anything else takes one away; the score has no floor.
    pub fn submit_answer(&mut self, value: i64) -> Result<SubmitResult, QuizError> {
        if self.complete {
            return Err(QuizError::InvalidState {
                operation: "submit an answer",
                phase: Phase::Finished,
            });
        }
        let question = self.current_prompt()?;

        let correct = question.is_correct(value);
        self.score += if correct { 1 } else { -1 };
        debug!(
            "answer {} to {}: {} (score {})",
            value,
            question.prompt().trim_end(),
            if correct { "correct" } else { "incorrect" },
            self.score
        );

        if self.current_index + 1 == self.questions.len() {
            self.complete = true;
            info!("quiz finished with score {}", self.score);
            return Ok(SubmitResult::Complete {
                final_score: self.score,
            });
        }

        self.current_index += 1;
        let next = self.questions[self.current_index];
        debug!("next question: {}", next.prompt().trim_end());
        Ok(SubmitResult::Next {
            question: next,
            score: self.score,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Configuring,
    Active,
    Finished,
}

/// Owns the operand source and at most one live session.
///
/// Starting is only allowed while configuring; answering only while active.
/// `reset` returns to configuring from anywhere.
#[derive(Debug)]
pub struct Quiz<S: OperandSource> {
    source: S,
    session: Option<QuizSession>,
}

impl<S: OperandSource> Quiz<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            session: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.session {
            None => Phase::Configuring,
            Some(s) if s.is_complete() => Phase::Finished,
            Some(_) => Phase::Active,
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn score(&self) -> Option<i64> {
        self.session.as_ref().map(QuizSession::score)
    }

    /// Final score of a finished session
    pub fn final_score(&self) -> Option<i64> {
        self.session
            .as_ref()
            .filter(|s| s.is_complete())
            .map(QuizSession::score)
    }

    pub fn start(&mut self, config: SessionConfig) -> Result<&QuizSession, QuizError> {
        let phase = self.phase();
        if phase != Phase::Configuring {
            return Err(QuizError::InvalidState {
                operation: "start a quiz",
                phase,
            });
        }
        let session = QuizSession::start(config, &mut self.source)?;
        Ok(&*self.session.insert(session))
    }

    pub fn current_prompt(&self) -> Result<Question, QuizError> {
        self.active("read the current prompt")?.current_prompt()
    }

    pub fn submit_answer(&mut self, value: i64) -> Result<SubmitResult, QuizError> {
        match self.session.as_mut() {
            Some(session) => session.submit_answer(value),
            None => Err(QuizError::InvalidState {
                operation: "submit an answer",
                phase: Phase::Configuring,
            }),
        }
    }

    /// Discard the current session, if any
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            debug!("quiz session discarded");
        }
    }

    fn active(&self, operation: &'static str) -> Result<&QuizSession, QuizError> {
        self.session.as_ref().ok_or(QuizError::InvalidState {
            operation,
            phase: Phase::Configuring,
        })
    }
}
