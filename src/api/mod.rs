//! Course API integration
//!
//! Provides the data-source and progress-sink boundaries plus an HTTP client
//! implementing both against the course REST API.

pub mod client;
pub mod error;
pub mod traits;

// Re-export commonly used types
pub use client::{CourseApiClient, ProgressUpdate};
pub use error::ApiError;
pub use traits::{CourseSource, ProgressSink};
