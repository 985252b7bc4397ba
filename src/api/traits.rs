//! Boundaries the viewer depends on
//!
//! The course is read once before navigation starts; progress is written once
//! per completed quiz. Neither side retries.

use async_trait::async_trait;

use super::error::ApiError;
use crate::course::{Course, CourseSummary};
use crate::learning::ProgressReport;

/// Where courses come from
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// List the catalog
    async fn list_courses(&self) -> Result<Vec<CourseSummary>, ApiError>;

    /// Fetch a course with all lessons and questions
    async fn fetch_course(&self, course_id: &str) -> Result<Course, ApiError>;
}

/// Where completed lesson results go
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn submit_progress(&self, report: &ProgressReport) -> Result<(), ApiError>;
}
