//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Key bindings shown by the help overlay
const HELP_KEYS: &[(&str, &str)] = &[
    ("l / Right / Space", "next slide"),
    ("h / Left", "previous slide"),
    ("g / G", "first / last slide"),
    ("] / [", "next / previous lesson"),
    ("1-9", "jump to lesson"),
    ("t / Enter", "take quiz (last slide)"),
    ("j / k, a-i", "choose an answer"),
    ("Enter", "submit / continue"),
    ("Esc", "leave quiz"),
    ("q", "quit"),
];

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Screen for a course with nothing to navigate
pub fn draw_empty(frame: &mut Frame, title: &str, message: &str, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let text = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(theme.fg_muted))),
        Line::from(""),
        Line::from(Span::styled("[q] Quit", Style::default().fg(theme.fg_muted))),
    ];

    let inner = centered_rect(60, 30, area);
    let para = Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

/// Key help as a centered overlay
pub fn draw_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay = centered_rect(60, 60, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let lines: Vec<Line> = HELP_KEYS
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{:>20}  ", keys), Style::default().fg(theme.accent_secondary)),
                Span::styled(*what, Style::default().fg(theme.fg_secondary)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}
