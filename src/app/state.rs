//! Application state definitions

use std::time::Instant;

use super::input::Action;
use crate::learning::{CourseViewer, ProgressReport, QuizProgress};

/// Which screen is currently displayed
#[derive(Debug)]
pub enum Screen {
    /// A course with at least one lesson
    Course(Box<CourseViewer>),
    /// Nothing to navigate; shows a message only
    Empty { title: String, message: String },
}

/// Work the event loop must do after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Persist a finished lesson in the background
    Submit(ProgressReport),
}

/// State for the status line
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Message to display
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
}

impl StatusLine {
    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    /// Clear the message
    pub fn clear(&mut self) {
        self.message = None;
    }
}

/// Full application state
#[derive(Debug)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Whether the key help overlay is shown
    pub show_help: bool,

    /// Status line below the content
    pub status: StatusLine,
}

impl AppState {
    pub fn new(screen: Screen) -> Self {
        Self { screen, show_help: false, status: StatusLine::default() }
    }

    pub fn viewer(&self) -> Option<&CourseViewer> {
        match &self.screen {
            Screen::Course(viewer) => Some(viewer),
            Screen::Empty { .. } => None,
        }
    }

    pub fn viewer_mut(&mut self) -> Option<&mut CourseViewer> {
        match &mut self.screen {
            Screen::Course(viewer) => Some(viewer),
            Screen::Empty { .. } => None,
        }
    }

    pub fn in_quiz(&self) -> bool {
        self.viewer().is_some_and(|v| v.is_quiz_active())
    }

    /// Apply one user action to the state
    pub fn apply(&mut self, action: Action, now: Instant) -> Effect {
        if action == Action::Quit {
            return Effect::Quit;
        }
        if action == Action::Help {
            self.show_help = !self.show_help;
            return Effect::None;
        }
        if self.show_help && action == Action::Back {
            self.show_help = false;
            return Effect::None;
        }

        let Some(viewer) = self.viewer_mut() else {
            return Effect::None;
        };

        let mut effect = Effect::None;
        let result = match action {
            Action::NextSlide => {
                viewer.next_slide();
                Ok(())
            }
            Action::PreviousSlide => {
                viewer.previous_slide();
                Ok(())
            }
            Action::FirstSlide => {
                viewer.first_slide();
                Ok(())
            }
            Action::LastSlide => {
                viewer.last_slide();
                Ok(())
            }
            Action::NextLesson => {
                viewer.next_lesson();
                Ok(())
            }
            Action::PreviousLesson => {
                viewer.previous_lesson();
                Ok(())
            }
            Action::GoToLesson(index) => {
                let _ = viewer.go_to_lesson(index);
                Ok(())
            }
            Action::TakeQuiz => viewer.start_quiz().map_err(|e| e.to_string()),
            Action::OptionUp => viewer.cycle_selection(-1).map_err(|e| e.to_string()),
            Action::OptionDown => viewer.cycle_selection(1).map_err(|e| e.to_string()),
            Action::SelectOption(index) => viewer.select_option(index).map_err(|e| e.to_string()),
            Action::Confirm => confirm(viewer, now, &mut effect),
            Action::Back => {
                viewer.exit_quiz();
                Ok(())
            }
            Action::Help | Action::Quit => Ok(()),
        };

        match result {
            Err(message) => self.status.set_error(message),
            Ok(()) => {
                if !self.take_notice() {
                    self.status.clear();
                }
            }
        }
        effect
    }

    /// Move a pending viewer notice to the status line; returns whether there was one
    pub fn take_notice(&mut self) -> bool {
        let Some(notice) = self.viewer_mut().and_then(|v| {
            let notice = v.notice().cloned();
            v.clear_notice();
            notice
        }) else {
            return false;
        };
        if notice.is_error {
            self.status.set_error(notice.message);
        } else {
            self.status.set_message(notice.message);
        }
        true
    }
}

/// Enter: submit or move on inside a quiz, otherwise open the quiz or turn the page
fn confirm(viewer: &mut CourseViewer, now: Instant, effect: &mut Effect) -> Result<(), String> {
    let Some(quiz) = viewer.quiz() else {
        if viewer.can_take_quiz() {
            return viewer.start_quiz().map_err(|e| e.to_string());
        }
        viewer.next_slide();
        return Ok(());
    };

    if quiz.is_revealed() {
        match viewer.advance_quiz(now).map_err(|e| e.to_string())? {
            QuizProgress::NextQuestion(_) => {}
            QuizProgress::Finished(report) => *effect = Effect::Submit(report),
        }
        Ok(())
    } else {
        viewer.submit_answer().map(|_| ()).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Course, Lesson, QuizQuestion};
    use crate::learning::Cursor;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        let mut course = Course::new("c1", "Course");
        course.lessons.push(
            Lesson::new("l1", "One", "# A\na\n# B\nb").with_quizzes(vec![QuizQuestion::new(
                "q1",
                "Pick a",
                vec!["a".into(), "b".into()],
                0,
            )]),
        );
        course.lessons.push(Lesson::new("l2", "Two", "text"));
        AppState::new(Screen::Course(Box::new(CourseViewer::new(course).unwrap())))
    }

    fn cursor(state: &AppState) -> Cursor {
        state.viewer().unwrap().cursor()
    }

    #[test]
    fn quit_action_requests_exit() {
        let mut state = state();
        assert_eq!(state.apply(Action::Quit, Instant::now()), Effect::Quit);
    }

    #[test]
    fn enter_turns_pages_then_opens_quiz() {
        let mut state = state();
        let now = Instant::now();
        state.apply(Action::Confirm, now);
        assert_eq!(cursor(&state), Cursor::new(0, 1));
        state.apply(Action::Confirm, now);
        assert!(state.in_quiz());
    }

    #[test]
    fn enter_without_selection_shows_error() {
        let mut state = state();
        let now = Instant::now();
        state.apply(Action::LastSlide, now);
        state.apply(Action::TakeQuiz, now);
        state.apply(Action::Confirm, now);
        assert!(state.status.is_error);
        assert!(!state.viewer().unwrap().quiz().unwrap().is_revealed());
    }

    #[test]
    fn finishing_quiz_requests_submission() {
        let mut state = state();
        let now = Instant::now();
        state.apply(Action::LastSlide, now);
        state.apply(Action::TakeQuiz, now);
        state.apply(Action::SelectOption(0), now);
        state.apply(Action::Confirm, now);
        let effect = state.apply(Action::Confirm, now);

        assert_eq!(
            effect,
            Effect::Submit(ProgressReport {
                course_id: "c1".into(),
                lesson_id: "l1".into(),
                quiz_score: 1,
            })
        );
        assert!(!state.in_quiz());
        assert_eq!(state.status.message.as_deref(), Some("Quiz complete: 1/1 correct"));
    }

    #[test]
    fn escape_leaves_quiz() {
        let mut state = state();
        let now = Instant::now();
        state.apply(Action::LastSlide, now);
        state.apply(Action::TakeQuiz, now);
        state.apply(Action::Back, now);
        assert!(!state.in_quiz());
    }

    #[test]
    fn empty_screen_ignores_navigation() {
        let mut state = AppState::new(Screen::Empty {
            title: "Nothing".into(),
            message: "This course has no lessons".into(),
        });
        assert_eq!(state.apply(Action::NextSlide, Instant::now()), Effect::None);
        assert!(state.viewer().is_none());
    }
}
