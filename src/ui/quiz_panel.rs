//! Quiz panel overlay component

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::layout::centered_rect;
use crate::learning::{QuizSession, QuizState};
use crate::theme::Theme;

/// Draw the quiz as a centered overlay over the slide
pub fn draw(frame: &mut Frame, area: Rect, quiz: &QuizSession, theme: &Theme) {
    let overlay_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" Quiz ")
        .title_bottom(Line::from(format!(" Score: {}/{} ", quiz.score(), quiz.question_count())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    draw_question(frame, inner, quiz, theme);
}

/// Draw current question
fn draw_question(frame: &mut Frame, area: Rect, quiz: &QuizSession, theme: &Theme) {
    let Some(question) = quiz.current_question() else {
        return;
    };
    let revealed = match quiz.state() {
        QuizState::Revealed { correct, .. } => Some(correct),
        _ => None,
    };
    let selected = quiz.selected();

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Question {} of {}", quiz.position() + 1, quiz.question_count()),
            Style::default().fg(theme.fg_muted),
        )),
        answer_marks(quiz, theme),
        Line::from(""),
        Line::from(Span::styled(
            question.question.as_str(),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, option) in question.options.iter().enumerate() {
        let is_selected = selected == Some(i);
        let prefix = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
        let letter = option_label(i);

        let style = match revealed {
            Some(_) if i == question.correct_answer_index => {
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
            }
            Some(_) if is_selected => Style::default().fg(theme.error),
            None if is_selected => {
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
            }
            _ => Style::default().fg(theme.fg_secondary),
        };

        lines.push(Line::from(Span::styled(format!("  {} {}) {}", prefix, letter, option), style)));
    }

    lines.push(Line::from(""));

    if let Some(correct) = revealed {
        let (verdict, color) =
            if correct { ("Correct!", theme.success) } else { ("Not quite.", theme.error) };
        lines.push(Line::from(Span::styled(
            verdict,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        if let Some(explanation) = quiz.explanation().filter(|e| !e.is_empty()) {
            lines.push(Line::from(Span::styled(explanation, Style::default().fg(theme.fg_secondary))));
        }
        lines.push(Line::from(""));
    }

    let hint = if revealed.is_some() {
        "[Enter] Continue    [Esc] Leave quiz"
    } else {
        "[j/k] Select    [Enter] Submit    [Esc] Leave quiz"
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(theme.fg_muted))));

    let para = Paragraph::new(lines).alignment(Alignment::Left).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

/// One mark per question: answered right, answered wrong, or not yet answered
fn answer_marks<'a>(quiz: &QuizSession, theme: &Theme) -> Line<'a> {
    let spans: Vec<Span> = quiz
        .answers()
        .iter()
        .map(|answer| match answer {
            Some(true) => Span::styled("\u{2713} ", Style::default().fg(theme.success)), // ✓
            Some(false) => Span::styled("\u{2717} ", Style::default().fg(theme.error)), // ✗
            None => Span::styled("\u{00B7} ", Style::default().fg(theme.fg_muted)), // ·
        })
        .collect();
    Line::from(spans)
}

/// A, B, ... Z for the first options, then plain numbers
fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::QuizQuestion;
    use pretty_assertions::assert_eq;

    #[test]
    fn option_labels_fall_back_to_numbers() {
        assert_eq!(option_label(0), "A");
        assert_eq!(option_label(25), "Z");
        assert_eq!(option_label(26), "27");
        assert_eq!(option_label(300), "301");
    }

    #[test]
    fn answer_marks_follow_first_submissions() {
        let questions = (0..3)
            .map(|i| QuizQuestion::new(format!("q{}", i), "?", vec!["a".into(), "b".into()], 0))
            .collect();
        let mut quiz = QuizSession::new(questions).unwrap();
        quiz.select_option(0).unwrap();
        quiz.submit_answer().unwrap();
        quiz.advance().unwrap();
        quiz.select_option(1).unwrap();
        quiz.submit_answer().unwrap();

        let marks: String = answer_marks(&quiz, &Theme::default())
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(marks, "\u{2713} \u{2717} \u{00B7} ");
    }
}
