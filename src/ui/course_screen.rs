//! Course screen: lesson sidebar, slide content, footer and status line

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::quiz_panel;
use crate::app::state::StatusLine;
use crate::learning::CourseViewer;
use crate::theme::Theme;

/// Height of the footer in lines
pub const FOOTER_HEIGHT: u16 = 2;

/// Width of the lesson sidebar
const SIDEBAR_WIDTH: u16 = 32;

pub fn draw(frame: &mut Frame, viewer: &CourseViewer, status: &StatusLine, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [header, body, footer] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(FOOTER_HEIGHT)])
            .areas(area);
    let [sidebar, content] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)]).areas(body);

    draw_header(frame, header, viewer, theme);
    draw_lessons(frame, sidebar, viewer, theme);
    draw_slide(frame, content, viewer, theme);
    draw_footer(frame, footer, viewer, status, theme);

    if let Some(quiz) = viewer.quiz() {
        quiz_panel::draw(frame, content, quiz, theme);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, viewer: &CourseViewer, theme: &Theme) {
    let course = viewer.course();
    let progress = viewer.progress();
    let mut spans = vec![
        Span::styled(
            format!(" {} ", course.title),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " {}/{} lessons  {}%  ~{} min ",
                progress.completed_count(),
                progress.lesson_count(),
                progress.percent_display(),
                course.total_duration_minutes()
            ),
            Style::default().fg(theme.fg_muted),
        ),
    ];
    if progress.is_course_finished() {
        spans.push(Span::styled(
            " \u{2713} Course complete ",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ));
    }
    let line = Line::from(spans);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.bg_secondary)),
        area,
    );
}

/// Lesson list with completion marks
fn draw_lessons(frame: &mut Frame, area: Rect, viewer: &CourseViewer, theme: &Theme) {
    let current = viewer.cursor().lesson_index;
    let progress = viewer.progress();

    let items: Vec<ListItem> = viewer
        .course()
        .lessons
        .iter()
        .enumerate()
        .map(|(i, lesson)| {
            let marker = if progress.is_completed(i) { "\u{2713}" } else { " " }; // ✓
            let title_style = if i == current {
                Style::default().fg(theme.fg_primary).bg(theme.selection).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_secondary)
            };
            let marker_style = Style::default().fg(theme.success);

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", marker), marker_style),
                    Span::styled(lesson.title.as_str(), title_style),
                ]),
                Line::from(Span::styled(
                    format!("  Lesson {} \u{00B7} {} min", lesson.lesson_order, lesson.duration_minutes),
                    Style::default().fg(theme.fg_muted),
                )),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Lessons ")
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_slide(frame: &mut Frame, area: Rect, viewer: &CourseViewer, theme: &Theme) {
    let navigator = viewer.navigator();
    let lesson = viewer.current_lesson();

    let block = Block::default()
        .title(format!(" {} ", lesson.title))
        .title_bottom(Line::from(format!(
            " Slide {} of {} ",
            viewer.cursor().slide_index + 1,
            navigator.slide_count()
        )))
        .borders(Borders::NONE)
        .style(Style::default().bg(theme.bg_primary));

    let lines: Vec<Line> = viewer.current_slide().lines().map(|line| styled_line(line, theme)).collect();

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(para, inner_margin(area));
}

/// Headings stand out; everything else is plain text
fn styled_line<'a>(line: &'a str, theme: &Theme) -> Line<'a> {
    if line.starts_with('#') {
        Line::from(Span::styled(
            line.trim_start_matches('#').trim_start(),
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(line, Style::default().fg(theme.fg_primary)))
    }
}

fn inner_margin(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(2),
        y: area.y,
        width: area.width.saturating_sub(4),
        height: area.height,
    }
}

fn draw_footer(
    frame: &mut Frame,
    area: Rect,
    viewer: &CourseViewer,
    status: &StatusLine,
    theme: &Theme,
) {
    let [hints_area, status_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.fg_muted));
    let label = |l: &'static str| Span::styled(l, Style::default().fg(theme.fg_secondary));

    let mut hints = vec![
        key("[h/l]"),
        label(" slide  "),
        key("[ [/] ]"),
        label(" lesson  "),
    ];
    if viewer.can_take_quiz() {
        hints.push(Span::styled(
            "[t] Take Quiz  ",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        ));
    }
    if viewer.pending_advance().is_some() {
        hints.push(Span::styled("Next lesson coming up...  ", Style::default().fg(theme.info)));
    }
    hints.push(key("[?]"));
    hints.push(label(" help  "));
    hints.push(key("[q]"));
    hints.push(label(" quit"));
    frame.render_widget(Paragraph::new(Line::from(hints)), hints_area);

    if let Some(message) = &status.message {
        let color = if status.is_error { theme.error } else { theme.success };
        frame.render_widget(
            Paragraph::new(Span::styled(message.as_str(), Style::default().fg(color))),
            status_area,
        );
    } else if let Some((score, total)) = viewer.last_score() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Last quiz: {}/{} correct", score, total),
                Style::default().fg(theme.fg_muted),
            )),
            status_area,
        );
    }
}
