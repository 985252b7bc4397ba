//! UI rendering components

pub mod course_screen;
pub mod layout;
pub mod quiz_panel;

use ratatui::Frame;

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) {
    match &state.screen {
        Screen::Course(viewer) => course_screen::draw(frame, viewer, &state.status, theme),
        Screen::Empty { title, message } => layout::draw_empty(frame, title, message, theme),
    }

    if state.show_help {
        let area = frame.area();
        layout::draw_help(frame, area, theme);
    }
}
