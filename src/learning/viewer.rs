//! Course viewer: navigation, quiz, and progress working together
//!
//! This is the only object the presentation layer talks to. Every user action
//! maps to one method here; the UI reads state back through the accessors.

use std::time::{Duration, Instant};

use super::navigator::{Cursor, NavigationError, Navigator};
use super::progress::{ProgressReport, ProgressTracker, SubmissionOutcome};
use super::quiz::{QuizError, QuizSession, QuizStep};
use crate::course::{Course, Lesson};

/// Default pause between finishing a quiz and moving to the next lesson
pub const DEFAULT_AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(1500);

/// A scheduled move to the next lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    /// When the move should happen
    pub due: Instant,
    /// Lesson the move starts from; the move is dropped if the cursor left it
    pub from_lesson: usize,
}

/// What happened after moving past a revealed answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizProgress {
    /// Next question is on screen
    NextQuestion(usize),
    /// Quiz done; lesson committed locally and this report should be persisted
    Finished(ProgressReport),
}

/// Short message for the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

/// State for one course being viewed
#[derive(Debug)]
pub struct CourseViewer {
    navigator: Navigator,
    quiz: Option<QuizSession>,
    tracker: ProgressTracker,
    pending_advance: Option<PendingAdvance>,
    auto_advance_delay: Duration,
    last_score: Option<(usize, usize)>,
    notice: Option<Notice>,
}

impl CourseViewer {
    /// Open a course at its first slide. Fails only for a course with no lessons.
    pub fn new(course: Course) -> Result<Self, NavigationError> {
        let tracker = ProgressTracker::new(&course);
        let navigator = Navigator::new(course)?;
        Ok(Self {
            navigator,
            quiz: None,
            tracker,
            pending_advance: None,
            auto_advance_delay: DEFAULT_AUTO_ADVANCE_DELAY,
            last_score: None,
            notice: None,
        })
    }

    /// Set the pause before auto-advancing after a quiz
    pub fn with_auto_advance_delay(mut self, delay: Duration) -> Self {
        self.auto_advance_delay = delay;
        self
    }

    pub fn course(&self) -> &Course {
        self.navigator.course()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn cursor(&self) -> Cursor {
        self.navigator.cursor()
    }

    pub fn current_lesson(&self) -> &Lesson {
        self.navigator.current_lesson()
    }

    pub fn current_slide(&self) -> &str {
        self.navigator.current_slide()
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    pub fn is_quiz_active(&self) -> bool {
        self.quiz.is_some()
    }

    pub fn pending_advance(&self) -> Option<PendingAdvance> {
        self.pending_advance
    }

    /// Score and question count of the most recently finished quiz
    pub fn last_score(&self) -> Option<(usize, usize)> {
        self.last_score
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Whether the "take quiz" affordance should be shown
    pub fn can_take_quiz(&self) -> bool {
        self.quiz.is_none() && self.navigator.quiz_available()
    }

    pub fn next_slide(&mut self) -> bool {
        self.navigator.next_slide()
    }

    pub fn previous_slide(&mut self) -> bool {
        self.navigator.previous_slide()
    }

    pub fn first_slide(&mut self) {
        self.navigator.first_slide();
    }

    pub fn last_slide(&mut self) {
        self.navigator.last_slide();
    }

    pub fn next_lesson(&mut self) -> bool {
        let moved = self.navigator.next_lesson();
        if moved {
            self.left_lesson();
        }
        moved
    }

    pub fn previous_lesson(&mut self) -> bool {
        let moved = self.navigator.previous_lesson();
        if moved {
            self.left_lesson();
        }
        moved
    }

    /// Jump to a lesson. Out-of-range requests leave everything as it was.
    pub fn go_to_lesson(&mut self, index: usize) -> Result<(), NavigationError> {
        match self.navigator.go_to_lesson(index) {
            Ok(()) => {
                self.left_lesson();
                Ok(())
            }
            Err(e) => {
                tracing::debug!("Ignoring navigation request: {}", e);
                Err(e)
            }
        }
    }

    /// Start a fresh quiz attempt for the current lesson
    pub fn start_quiz(&mut self) -> Result<(), QuizError> {
        if self.quiz.is_some() {
            return Ok(());
        }
        if !self.navigator.is_on_last_slide() {
            return Err(QuizError::NotOnLastSlide);
        }
        let session = QuizSession::new(self.current_lesson().quizzes.clone())?;
        tracing::debug!("Starting quiz for lesson {}", self.current_lesson().id);
        if self.pending_advance.take().is_some() {
            tracing::debug!("Cancelled auto-advance for a new quiz attempt");
        }
        self.quiz = Some(session);
        Ok(())
    }

    /// Leave the quiz without completing it
    pub fn exit_quiz(&mut self) {
        if self.quiz.take().is_some() {
            tracing::debug!("Quiz abandoned for lesson {}", self.current_lesson().id);
        }
    }

    pub fn select_option(&mut self, index: usize) -> Result<(), QuizError> {
        self.active_quiz()?.select_option(index)
    }

    pub fn cycle_selection(&mut self, delta: isize) -> Result<(), QuizError> {
        self.active_quiz()?.cycle_selection(delta)
    }

    pub fn submit_answer(&mut self) -> Result<bool, QuizError> {
        self.active_quiz()?.submit_answer()
    }

    /// Move past a revealed answer.
    ///
    /// Finishing the quiz commits the lesson locally, closes the quiz, and
    /// schedules the move to the next lesson unless this is the last one.
    pub fn advance_quiz(&mut self, now: Instant) -> Result<QuizProgress, QuizError> {
        let quiz = self.active_quiz()?;
        let total = quiz.question_count();
        match quiz.advance()? {
            QuizStep::Next(question) => Ok(QuizProgress::NextQuestion(question)),
            QuizStep::Completed(score) => {
                self.quiz = None;
                self.last_score = Some((score, total));

                let lesson_index = self.cursor().lesson_index;
                let report = self
                    .tracker
                    .mark_lesson_complete(lesson_index, score)
                    .ok_or(QuizError::NotStarted)?;

                self.notice = Some(Notice {
                    message: format!("Quiz complete: {}/{} correct", score, total),
                    is_error: false,
                });

                if !self.navigator.is_last_lesson() {
                    self.pending_advance = Some(PendingAdvance {
                        due: now + self.auto_advance_delay,
                        from_lesson: lesson_index,
                    });
                }
                Ok(QuizProgress::Finished(report))
            }
        }
    }

    /// Fire the auto-advance if it is due. Returns whether the cursor moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending_advance else {
            return false;
        };
        if now < pending.due {
            return false;
        }
        self.pending_advance = None;

        if self.cursor().lesson_index != pending.from_lesson || self.quiz.is_some() {
            tracing::debug!("Dropping stale auto-advance from lesson {}", pending.from_lesson);
            return false;
        }
        self.navigator.next_lesson()
    }

    /// Record how a background progress submission went
    pub fn record_submission(&mut self, outcome: &SubmissionOutcome) {
        if let Some(ref error) = outcome.error {
            self.notice = Some(Notice {
                message: format!("Progress not saved: {}", error),
                is_error: true,
            });
        }
    }

    fn active_quiz(&mut self) -> Result<&mut QuizSession, QuizError> {
        self.quiz.as_mut().ok_or(QuizError::NotStarted)
    }

    /// Cursor moved to another lesson by the user
    fn left_lesson(&mut self) {
        self.quiz = None;
        if self.pending_advance.take().is_some() {
            tracing::debug!("Cancelled auto-advance after manual navigation");
        }
    }
}
