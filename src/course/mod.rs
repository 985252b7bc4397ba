//! Course data and slide segmentation

pub mod model;
pub mod segment;

pub use model::{Course, CourseError, CourseSummary, Lesson, QuizQuestion};
pub use segment::{PLACEHOLDER_SLIDE, segment, segment_at_level, slide_count};
