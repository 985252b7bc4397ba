//! Lesson completion tracking
//!
//! Completion is committed locally first. Each commit yields a
//! [`ProgressReport`] which is then handed to a [`ProgressSink`] in the
//! background; the outcome comes back as a [`SubmissionOutcome`] and never
//! rolls back the local state.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::api::ProgressSink;
use crate::course::Course;

/// A completed lesson result, ready to be persisted remotely
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressReport {
    pub course_id: String,
    pub lesson_id: String,
    pub quiz_score: usize,
}

/// How a background submission went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub report: ProgressReport,
    /// Error message if the sink rejected the report
    pub error: Option<String>,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Completed lessons for the current session
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    course_id: String,
    lesson_ids: Vec<String>,
    completed: BTreeSet<usize>,
}

impl ProgressTracker {
    pub fn new(course: &Course) -> Self {
        Self {
            course_id: course.id.clone(),
            lesson_ids: course.lessons.iter().map(|l| l.id.clone()).collect(),
            completed: BTreeSet::new(),
        }
    }

    pub fn lesson_count(&self) -> usize {
        self.lesson_ids.len()
    }

    /// Mark a lesson complete and build the report to persist.
    ///
    /// Repeat calls leave the completed set unchanged but still produce a report.
    /// Returns `None` only when the lesson index is not part of the course.
    pub fn mark_lesson_complete(&mut self, lesson_index: usize, score: usize) -> Option<ProgressReport> {
        let lesson_id = self.lesson_ids.get(lesson_index)?.clone();
        if self.completed.insert(lesson_index) {
            tracing::info!("Lesson {} complete with score {}", lesson_id, score);
        } else {
            tracing::debug!("Lesson {} already complete, resubmitting score {}", lesson_id, score);
        }
        Some(ProgressReport { course_id: self.course_id.clone(), lesson_id, quiz_score: score })
    }

    pub fn is_completed(&self, lesson_index: usize) -> bool {
        self.completed.contains(&lesson_index)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Fraction of lessons completed, from 0.0 to 1.0
    pub fn completion_percentage(&self) -> f64 {
        if self.lesson_ids.is_empty() {
            return 0.0;
        }
        self.completed.len() as f64 / self.lesson_ids.len() as f64
    }

    /// Completion as a whole percent for display
    pub fn percent_display(&self) -> u8 {
        (self.completion_percentage() * 100.0).round() as u8
    }

    pub fn is_course_finished(&self) -> bool {
        !self.lesson_ids.is_empty() && self.completed.len() == self.lesson_ids.len()
    }
}

/// Send a report to the sink once, without blocking the caller.
///
/// The outcome is delivered on `tx`; a closed receiver is ignored.
pub fn submit_in_background(
    sink: Arc<dyn ProgressSink>,
    report: ProgressReport,
    tx: mpsc::UnboundedSender<SubmissionOutcome>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = submit(sink.as_ref(), report).await;
        let _ = tx.send(outcome);
    })
}

/// Send a report to the sink once and describe what happened
pub async fn submit(sink: &dyn ProgressSink, report: ProgressReport) -> SubmissionOutcome {
    match sink.submit_progress(&report).await {
        Ok(()) => {
            tracing::info!("Saved progress for lesson {}", report.lesson_id);
            SubmissionOutcome { report, error: None }
        }
        Err(e) => {
            tracing::warn!(
                recoverable = e.is_recoverable(),
                "Failed to save progress for lesson {}: {}",
                report.lesson_id,
                e
            );
            SubmissionOutcome { report, error: Some(e.user_message()) }
        }
    }
}
