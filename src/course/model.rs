//! Content model for courses
//!
//! A course is an ordered list of lessons. Each lesson carries its raw text body
//! and zero or more multiple-choice questions. Records are deserialized from the
//! course API and are immutable for the rest of a viewing session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found while validating a loaded course
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseError {
    /// A question has no options to choose from
    #[error("question {question_id} in lesson {lesson_id} has no options")]
    NoOptions { lesson_id: String, question_id: String },

    /// The correct answer does not point at one of the options
    #[error(
        "question {question_id} in lesson {lesson_id} marks option {index} correct but has {option_count} options"
    )]
    CorrectAnswerOutOfRange {
        lesson_id: String,
        question_id: String,
        index: usize,
        option_count: usize,
    },
}

/// Catalog entry for a course (no lesson bodies)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Subject the course was generated for
    #[serde(default)]
    pub subject: String,
    /// Number of lessons, when the catalog reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_count: Option<usize>,
}

/// A complete course with its lessons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Subject the course was generated for
    #[serde(default)]
    pub subject: String,
    /// Lessons in display order
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Create an empty course
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            subject: String::new(),
            lessons: Vec::new(),
        }
    }

    /// Number of lessons
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// Whether there is anything to navigate
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Total estimated duration across all lessons
    pub fn total_duration_minutes(&self) -> u32 {
        self.lessons.iter().map(|l| l.duration_minutes).sum()
    }

    /// Check every question against its options
    pub fn validate(&self) -> Vec<CourseError> {
        self.lessons
            .iter()
            .flat_map(|lesson| {
                lesson
                    .quizzes
                    .iter()
                    .filter_map(move |q| q.validate().err().map(|e| e.in_lesson(&lesson.id)))
            })
            .collect()
    }

    /// Put lessons in `lesson_order` and drop questions that cannot be answered.
    ///
    /// Applied once after loading so navigation only ever sees well-formed data.
    pub fn normalize(mut self) -> Self {
        self.lessons.sort_by_key(|l| l.lesson_order);
        for lesson in &mut self.lessons {
            let lesson_id = lesson.id.clone();
            lesson.quizzes.retain(|q| match q.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!("Dropping malformed question: {}", e.in_lesson(&lesson_id));
                    false
                }
            });
        }
        self
    }
}

/// One lesson of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Raw lesson body (markdown, rendered elsewhere)
    #[serde(default)]
    pub content: String,
    /// Position within the course (1-indexed, for display)
    #[serde(default)]
    pub lesson_order: u32,
    /// Estimated time to work through the lesson
    #[serde(default)]
    pub duration_minutes: u32,
    /// Questions asked at the end of the lesson
    #[serde(default)]
    pub quizzes: Vec<QuizQuestion>,
}

impl Lesson {
    /// Create a lesson with no questions
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            lesson_order: 0,
            duration_minutes: 0,
            quizzes: Vec::new(),
        }
    }

    /// Set the display order
    pub fn with_order(mut self, lesson_order: u32) -> Self {
        self.lesson_order = lesson_order;
        self
    }

    /// Set the estimated duration
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Attach questions
    pub fn with_quizzes(mut self, quizzes: Vec<QuizQuestion>) -> Self {
        self.quizzes = quizzes;
        self
    }

    /// Whether the lesson ends with a quiz
    pub fn has_quiz(&self) -> bool {
        !self.quizzes.is_empty()
    }
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Unique identifier
    pub id: String,
    /// Question text
    pub question: String,
    /// Answer options in display order
    pub options: Vec<String>,
    /// Index of the correct option
    pub correct_answer_index: usize,
    /// Shown after the answer is revealed
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    /// Create a question
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer_index: usize,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            options,
            correct_answer_index,
            explanation: String::new(),
        }
    }

    /// Set the explanation
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Whether `index` is the correct option
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_answer_index
    }

    fn validate(&self) -> Result<(), QuestionDefect> {
        if self.options.is_empty() {
            return Err(QuestionDefect::NoOptions { question_id: self.id.clone() });
        }
        if self.correct_answer_index >= self.options.len() {
            return Err(QuestionDefect::OutOfRange {
                question_id: self.id.clone(),
                index: self.correct_answer_index,
                option_count: self.options.len(),
            });
        }
        Ok(())
    }
}

/// Question-level defect, before the owning lesson is known
enum QuestionDefect {
    NoOptions { question_id: String },
    OutOfRange { question_id: String, index: usize, option_count: usize },
}

impl QuestionDefect {
    fn in_lesson(self, lesson_id: &str) -> CourseError {
        let lesson_id = lesson_id.to_string();
        match self {
            QuestionDefect::NoOptions { question_id } => {
                CourseError::NoOptions { lesson_id, question_id }
            }
            QuestionDefect::OutOfRange { question_id, index, option_count } => {
                CourseError::CorrectAnswerOutOfRange { lesson_id, question_id, index, option_count }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn question(id: &str, options: &[&str], correct: usize) -> QuizQuestion {
        QuizQuestion::new(id, "?", options.iter().map(|s| s.to_string()).collect(), correct)
    }

    #[test]
    fn course_deserializes_from_api_json() {
        let json = r#"{
            "id": "c1",
            "title": "Rust Basics",
            "description": "Learn Rust",
            "subject": "rust",
            "lessons": [{
                "id": "l1",
                "title": "Ownership",
                "content": "Body",
                "lesson_order": 1,
                "duration_minutes": 10,
                "quizzes": [{
                    "id": "q1",
                    "question": "Who owns it?",
                    "options": ["me", "you"],
                    "correct_answer_index": 0,
                    "explanation": "The binding does."
                }]
            }]
        }"#;

        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.lesson_count(), 1);
        assert_eq!(course.lessons[0].quizzes[0].explanation, "The binding does.");
        assert!(course.lessons[0].has_quiz());
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"id": "c1", "title": "T", "lessons": [{"id": "l1", "title": "L"}]}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.description, "");
        assert_eq!(course.lessons[0].content, "");
        assert!(!course.lessons[0].has_quiz());
    }

    #[test]
    fn normalize_sorts_by_lesson_order() {
        let mut course = Course::new("c", "C");
        course.lessons.push(Lesson::new("b", "B", "").with_order(2));
        course.lessons.push(Lesson::new("a", "A", "").with_order(1));

        let course = course.normalize();
        let ids: Vec<_> = course.lessons.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn validate_reports_bad_questions() {
        let mut course = Course::new("c", "C");
        course.lessons.push(Lesson::new("l1", "L", "").with_quizzes(vec![
            question("ok", &["a", "b"], 1),
            question("empty", &[], 0),
            question("range", &["a"], 3),
        ]));

        let errors = course.validate();
        assert_eq!(
            errors,
            vec![
                CourseError::NoOptions { lesson_id: "l1".into(), question_id: "empty".into() },
                CourseError::CorrectAnswerOutOfRange {
                    lesson_id: "l1".into(),
                    question_id: "range".into(),
                    index: 3,
                    option_count: 1,
                },
            ]
        );
    }

    #[test]
    fn normalize_drops_bad_questions() {
        let mut course = Course::new("c", "C");
        course.lessons.push(
            Lesson::new("l1", "L", "")
                .with_quizzes(vec![question("ok", &["a", "b"], 1), question("range", &["a"], 3)]),
        );

        let course = course.normalize();
        assert_eq!(course.lessons[0].quizzes.len(), 1);
        assert!(course.validate().is_empty());
    }

    #[test]
    fn total_duration_sums_lessons() {
        let mut course = Course::new("c", "C");
        course.lessons.push(Lesson::new("a", "A", "").with_duration(5));
        course.lessons.push(Lesson::new("b", "B", "").with_duration(7));
        assert_eq!(course.total_duration_minutes(), 12);
    }
}
