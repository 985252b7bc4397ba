//! Coursewalk - a terminal client for slide-based online courses
//!
//! Lessons are split into slides at their top-level headings, each lesson can
//! end in a short quiz, and finished lessons are reported back to the course
//! API without blocking the reader.

pub mod api;
pub mod app;
pub mod config;
pub mod course;
pub mod learning;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use course::Course;
pub use learning::CourseViewer;
pub use theme::Theme;
