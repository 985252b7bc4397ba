//! Navigation, quizzing, and progress for a loaded course
//!
//! The pieces compose top-down: the navigator segments lessons on demand, a
//! quiz session runs on the last slide of a lesson, and the tracker records the
//! result. [`CourseViewer`] wires them together for the UI.

pub mod navigator;
pub mod progress;
pub mod quiz;
pub mod viewer;

pub use navigator::{Cursor, NavigationError, Navigator};
pub use progress::{ProgressReport, ProgressTracker, SubmissionOutcome, submit_in_background};
pub use quiz::{QuizError, QuizSession, QuizState, QuizStep};
pub use viewer::{CourseViewer, DEFAULT_AUTO_ADVANCE_DELAY, Notice, PendingAdvance, QuizProgress};
