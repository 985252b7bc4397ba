//! Quiz session state machine
//!
//! One session covers a single attempt at a lesson's questions:
//!
//! ```text
//! Presenting(0) --submit--> Revealed(0) --advance--> Presenting(1) ... --advance--> Completed
//! ```
//!
//! Each question contributes at most one point, on its first submission.

use std::collections::HashSet;

use thiserror::Error;

use crate::course::QuizQuestion;

/// Illegal quiz transitions. The session is left untouched when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("lesson has no quiz questions")]
    NoQuestions,

    #[error("the quiz opens from the last slide of the lesson")]
    NotOnLastSlide,

    #[error("no quiz in progress")]
    NotStarted,

    #[error("select an answer first")]
    NoSelection,

    #[error("option {index} does not exist (question has {count} options)")]
    OptionOutOfRange { index: usize, count: usize },

    #[error("answer already submitted")]
    NotPresenting,

    #[error("submit an answer before moving on")]
    NotRevealed,
}

/// Where the session is in its question sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Waiting for an answer to `question`
    Presenting { question: usize, selected: Option<usize> },
    /// Answer to `question` submitted and explanation visible
    Revealed { question: usize, selected: usize, correct: bool },
    /// All questions answered
    Completed { score: usize },
}

/// Result of moving past a revealed answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Showing the next question
    Next(usize),
    /// Quiz finished with this score
    Completed(usize),
}

/// A single attempt at a lesson's quiz
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    state: QuizState,
    score: usize,
    scored: HashSet<usize>,
    answers: Vec<Option<bool>>,
}

impl QuizSession {
    /// Start a fresh attempt at the first question
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            state: QuizState::Presenting { question: 0, selected: None },
            score: 0,
            scored: HashSet::new(),
            answers,
        })
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    /// First-attempt correct answers so far
    pub fn score(&self) -> usize {
        self.score
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, QuizState::Completed { .. })
    }

    /// Index of the question on screen (the last one once completed)
    pub fn position(&self) -> usize {
        match self.state {
            QuizState::Presenting { question, .. } | QuizState::Revealed { question, .. } => {
                question
            }
            QuizState::Completed { .. } => self.questions.len() - 1,
        }
    }

    /// The question on screen, if the quiz is still running
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            QuizState::Completed { .. } => None,
            _ => self.questions.get(self.position()),
        }
    }

    /// Tentative or submitted choice for the current question
    pub fn selected(&self) -> Option<usize> {
        match self.state {
            QuizState::Presenting { selected, .. } => selected,
            QuizState::Revealed { selected, .. } => Some(selected),
            QuizState::Completed { .. } => None,
        }
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, QuizState::Revealed { .. })
    }

    /// Explanation for the current question, once its answer is revealed
    pub fn explanation(&self) -> Option<&str> {
        match self.state {
            QuizState::Revealed { question, .. } => {
                self.questions.get(question).map(|q| q.explanation.as_str())
            }
            _ => None,
        }
    }

    /// Correctness of the first submission for each question (`None` if unanswered)
    pub fn answers(&self) -> &[Option<bool>] {
        &self.answers
    }

    /// Record a tentative choice; replaces any earlier one
    pub fn select_option(&mut self, index: usize) -> Result<(), QuizError> {
        let QuizState::Presenting { question, .. } = self.state else {
            return Err(QuizError::NotPresenting);
        };
        let count = self.questions[question].options.len();
        if index >= count {
            return Err(QuizError::OptionOutOfRange { index, count });
        }
        self.state = QuizState::Presenting { question, selected: Some(index) };
        Ok(())
    }

    /// Move the tentative choice by `delta`, wrapping around the options
    pub fn cycle_selection(&mut self, delta: isize) -> Result<(), QuizError> {
        let QuizState::Presenting { question, selected } = self.state else {
            return Err(QuizError::NotPresenting);
        };
        let count = self.questions[question].options.len() as isize;
        let next = match selected {
            Some(current) => (current as isize + delta).rem_euclid(count),
            None if delta < 0 => count - 1,
            None => 0,
        };
        self.select_option(next as usize)
    }

    /// Submit the tentative choice and reveal the answer.
    ///
    /// Returns whether the choice was correct.
    pub fn submit_answer(&mut self) -> Result<bool, QuizError> {
        let QuizState::Presenting { question, selected } = self.state else {
            return Err(QuizError::NotPresenting);
        };
        let Some(selected) = selected else {
            return Err(QuizError::NoSelection);
        };

        let correct = self.questions[question].is_correct(selected);
        if self.scored.insert(question) {
            if correct {
                self.score += 1;
            }
            self.answers[question] = Some(correct);
        }

        self.state = QuizState::Revealed { question, selected, correct };
        Ok(correct)
    }

    /// Leave a revealed answer for the next question or the final score
    pub fn advance(&mut self) -> Result<QuizStep, QuizError> {
        let QuizState::Revealed { question, .. } = self.state else {
            return Err(QuizError::NotRevealed);
        };

        if question + 1 >= self.questions.len() {
            self.state = QuizState::Completed { score: self.score };
            Ok(QuizStep::Completed(self.score))
        } else {
            self.state = QuizState::Presenting { question: question + 1, selected: None };
            Ok(QuizStep::Next(question + 1))
        }
    }
}
