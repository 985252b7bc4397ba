//! Key handling

use crossterm::event::{KeyCode, KeyModifiers};

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Slides and lessons
    NextSlide,
    PreviousSlide,
    FirstSlide,
    LastSlide,
    NextLesson,
    PreviousLesson,
    GoToLesson(usize),

    // Quiz
    TakeQuiz,
    OptionUp,
    OptionDown,
    SelectOption(usize),

    // General
    Confirm,
    Back,
    Help,
    Quit,
}

/// Keys while reading slides
pub fn content_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char(' ') => Some(Action::NextSlide),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::PreviousSlide),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstSlide),
        KeyCode::Char('G') | KeyCode::End => Some(Action::LastSlide),
        KeyCode::Char(']') | KeyCode::Char('n') => Some(Action::NextLesson),
        KeyCode::Char('[') | KeyCode::Char('p') => Some(Action::PreviousLesson),
        KeyCode::Char(c @ '1'..='9') => Some(Action::GoToLesson(digit_index(c))),
        KeyCode::Char('t') => Some(Action::TakeQuiz),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Keys while a quiz is open
pub fn quiz_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::OptionDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::OptionUp),
        KeyCode::Char(c @ '1'..='9') => Some(Action::SelectOption(digit_index(c))),
        KeyCode::Char(c @ 'a'..='i') => Some(Action::SelectOption((c as u8 - b'a') as usize)),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Map a key, honouring Ctrl+C as quit everywhere
pub fn key_to_action(key: KeyCode, modifiers: KeyModifiers, in_quiz: bool) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    if in_quiz { quiz_key_to_action(key) } else { content_key_to_action(key) }
}

/// '1' -> 0, '2' -> 1, ...
fn digit_index(c: char) -> usize {
    (c as u8 - b'1') as usize
}
