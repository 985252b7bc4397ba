//! Lesson and slide cursor

use thiserror::Error;

use crate::course::{Course, Lesson, segment};

/// Rejected navigation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The course has no lessons to show
    #[error("course has no lessons")]
    EmptyCourse,

    /// Requested lesson does not exist
    #[error("lesson {index} is out of range (course has {count} lessons)")]
    LessonOutOfRange { index: usize, count: usize },
}

/// Position within a course
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub lesson_index: usize,
    pub slide_index: usize,
}

impl Cursor {
    pub fn new(lesson_index: usize, slide_index: usize) -> Self {
        Self { lesson_index, slide_index }
    }
}

/// Owns the course and the cursor into it.
///
/// Slides are recomputed from the current lesson on every query, so the slide
/// index is always checked against the lesson actually being shown.
#[derive(Debug, Clone)]
pub struct Navigator {
    course: Course,
    cursor: Cursor,
}

impl Navigator {
    /// Start at the first slide of the first lesson
    pub fn new(course: Course) -> Result<Self, NavigationError> {
        if course.is_empty() {
            return Err(NavigationError::EmptyCourse);
        }
        Ok(Self { course, cursor: Cursor::default() })
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn lesson_count(&self) -> usize {
        self.course.lesson_count()
    }

    /// The lesson under the cursor
    pub fn current_lesson(&self) -> &Lesson {
        // Construction guarantees at least one lesson and moves keep the index in range
        &self.course.lessons[self.cursor.lesson_index]
    }

    /// Slides of the current lesson
    pub fn slides(&self) -> Vec<&str> {
        segment(&self.current_lesson().content)
    }

    pub fn slide_count(&self) -> usize {
        self.slides().len()
    }

    /// Raw text of the slide under the cursor
    pub fn current_slide(&self) -> &str {
        let slides = self.slides();
        let last = slides.len() - 1;
        slides[self.cursor.slide_index.min(last)]
    }

    /// Jump to a lesson, starting at its first slide
    pub fn go_to_lesson(&mut self, index: usize) -> Result<(), NavigationError> {
        let count = self.lesson_count();
        if index >= count {
            return Err(NavigationError::LessonOutOfRange { index, count });
        }
        self.cursor = Cursor::new(index, 0);
        Ok(())
    }

    /// Move to the next lesson; returns whether the cursor moved
    pub fn next_lesson(&mut self) -> bool {
        self.go_to_lesson(self.cursor.lesson_index + 1).is_ok()
    }

    /// Move to the previous lesson; returns whether the cursor moved
    pub fn previous_lesson(&mut self) -> bool {
        match self.cursor.lesson_index.checked_sub(1) {
            Some(index) => self.go_to_lesson(index).is_ok(),
            None => false,
        }
    }

    /// Move to the next slide; returns whether the cursor moved
    pub fn next_slide(&mut self) -> bool {
        if self.is_on_last_slide() {
            return false;
        }
        self.cursor.slide_index += 1;
        true
    }

    /// Move to the previous slide; returns whether the cursor moved
    pub fn previous_slide(&mut self) -> bool {
        if self.cursor.slide_index == 0 {
            return false;
        }
        self.cursor.slide_index -= 1;
        true
    }

    pub fn first_slide(&mut self) {
        self.cursor.slide_index = 0;
    }

    pub fn last_slide(&mut self) {
        self.cursor.slide_index = self.slide_count() - 1;
    }

    pub fn is_on_last_slide(&self) -> bool {
        self.cursor.slide_index + 1 >= self.slide_count()
    }

    pub fn is_last_lesson(&self) -> bool {
        self.cursor.lesson_index + 1 == self.lesson_count()
    }

    pub fn current_lesson_has_quiz(&self) -> bool {
        self.current_lesson().has_quiz()
    }

    /// The quiz is offered only from the last slide of a lesson with questions
    pub fn quiz_available(&self) -> bool {
        self.is_on_last_slide() && self.current_lesson_has_quiz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Lesson, QuizQuestion};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn course() -> Course {
        let mut course = Course::new("c1", "Course");
        course.lessons.push(
            Lesson::new("l1", "First", "# A\na\n# B\nb\n# C\nc").with_quizzes(vec![
                QuizQuestion::new("q1", "?", vec!["x".into(), "y".into()], 0),
            ]),
        );
        course.lessons.push(Lesson::new("l2", "Second", "Only one slide"));
        course.lessons.push(Lesson::new("l3", "Third", ""));
        course
    }

    #[test]
    fn empty_course_is_rejected() {
        let err = Navigator::new(Course::new("c", "Empty")).unwrap_err();
        assert_eq!(err, NavigationError::EmptyCourse);
    }

    #[test]
    fn starts_at_origin() {
        let nav = Navigator::new(course()).unwrap();
        assert_eq!(nav.cursor(), Cursor::new(0, 0));
        assert_eq!(nav.current_slide(), "# A\na\n");
    }

    #[test]
    fn next_slide_stops_at_last() {
        let mut nav = Navigator::new(course()).unwrap();
        assert!(nav.next_slide());
        assert!(nav.next_slide());
        assert!(!nav.next_slide());
        assert_eq!(nav.cursor(), Cursor::new(0, 2));
        assert!(nav.is_on_last_slide());
    }

    #[test]
    fn previous_slide_at_start_is_noop() {
        let mut nav = Navigator::new(course()).unwrap();
        for _ in 0..3 {
            assert!(!nav.previous_slide());
        }
        assert_eq!(nav.cursor(), Cursor::new(0, 0));
    }

    #[test]
    fn lesson_change_resets_slide() {
        let mut nav = Navigator::new(course()).unwrap();
        nav.last_slide();
        assert!(nav.next_lesson());
        assert_eq!(nav.cursor(), Cursor::new(1, 0));
        assert!(nav.is_on_last_slide());
    }

    #[test]
    fn go_to_lesson_out_of_range_keeps_cursor() {
        let mut nav = Navigator::new(course()).unwrap();
        nav.next_slide();
        let err = nav.go_to_lesson(3).unwrap_err();
        assert_eq!(err, NavigationError::LessonOutOfRange { index: 3, count: 3 });
        assert_eq!(nav.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn lesson_boundaries_are_noops() {
        let mut nav = Navigator::new(course()).unwrap();
        assert!(!nav.previous_lesson());
        nav.go_to_lesson(2).unwrap();
        assert!(!nav.next_lesson());
        assert!(nav.is_last_lesson());
        assert_eq!(nav.cursor(), Cursor::new(2, 0));
    }

    #[test]
    fn empty_lesson_shows_placeholder_and_no_quiz() {
        let mut nav = Navigator::new(course()).unwrap();
        nav.go_to_lesson(2).unwrap();
        assert_eq!(nav.slides(), vec![crate::course::PLACEHOLDER_SLIDE]);
        assert!(nav.is_on_last_slide());
        assert!(!nav.quiz_available());
    }

    #[test]
    fn quiz_only_available_on_last_slide() {
        let mut nav = Navigator::new(course()).unwrap();
        assert!(nav.current_lesson_has_quiz());
        assert!(!nav.quiz_available());
        nav.last_slide();
        assert!(nav.quiz_available());
    }

    #[derive(Debug, Clone)]
    enum Move {
        NextSlide,
        PreviousSlide,
        NextLesson,
        PreviousLesson,
        GoTo(usize),
    }

    fn any_move() -> impl Strategy<Value = Move> {
        prop_oneof![
            Just(Move::NextSlide),
            Just(Move::PreviousSlide),
            Just(Move::NextLesson),
            Just(Move::PreviousLesson),
            (0usize..5).prop_map(Move::GoTo),
        ]
    }

    proptest! {
        #[test]
        fn cursor_always_valid(moves in prop::collection::vec(any_move(), 0..40)) {
            let mut nav = Navigator::new(course()).unwrap();
            for m in moves {
                let before = nav.cursor();
                match m {
                    Move::NextSlide => { nav.next_slide(); }
                    Move::PreviousSlide => { nav.previous_slide(); }
                    Move::NextLesson => { nav.next_lesson(); }
                    Move::PreviousLesson => { nav.previous_lesson(); }
                    Move::GoTo(i) => { let _ = nav.go_to_lesson(i); }
                }
                let after = nav.cursor();
                prop_assert!(after.lesson_index < nav.lesson_count());
                prop_assert!(after.slide_index < nav.slide_count());
                if after.lesson_index != before.lesson_index {
                    prop_assert_eq!(after.slide_index, 0);
                }
            }
        }
    }
}
