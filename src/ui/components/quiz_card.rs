use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::quiz::QuizState;
use crate::ui::theme::Theme;

/// The active question: target word with reading hints on top, the four
/// meaning options below. After an answer is revealed the correct option is
/// highlighted and a wrong selection marked.
pub struct QuizCard<'a> {
    pub quiz: &'a QuizState,
    pub theme: &'a Theme,
}

impl Widget for QuizCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let Some(current) = self.quiz.current() else {
            return;
        };

        let block = Block::bordered()
            .title(format!(
                " Question {}/{} ",
                self.quiz.index + 1,
                self.quiz.queue.len()
            ))
            .border_style(Style::default().fg(colors.border_focused()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(4),
            ])
            .split(inner);

        let mut word_line = vec![Span::styled(
            current.word.clone(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )];
        if !current.kana.is_empty() {
            word_line.push(Span::styled(
                format!("  {}", current.kana),
                Style::default().fg(colors.fg()),
            ));
        }
        if !current.romaji.is_empty() {
            word_line.push(Span::styled(
                format!("  ({})", current.romaji),
                Style::default().fg(colors.muted()),
            ));
        }
        Paragraph::new(Line::from(word_line))
            .alignment(Alignment::Center)
            .render(rows[0], buf);

        if !current.category.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                current.category.clone(),
                Style::default().fg(colors.muted()),
            )))
            .alignment(Alignment::Center)
            .render(rows[1], buf);
        }

        let mut lines = Vec::new();
        for (i, option) in self.quiz.options.iter().enumerate() {
            let is_target = option.word == current.word;
            let is_selected = self.quiz.selected == Some(i);
            let revealed = self.quiz.selected.is_some();

            let style = if revealed && is_target {
                Style::default()
                    .fg(colors.option_correct())
                    .add_modifier(Modifier::BOLD)
            } else if revealed && is_selected {
                Style::default()
                    .fg(colors.option_incorrect())
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if revealed {
                Style::default().fg(colors.muted())
            } else {
                Style::default().fg(colors.fg())
            };

            let marker = if revealed && is_target {
                "✓"
            } else if revealed && is_selected {
                "✗"
            } else {
                " "
            };

            lines.push(Line::from(vec![
                Span::styled(format!(" {marker} "), style),
                Span::styled(format!("[{}] ", i + 1), style),
                Span::styled(option.meaning.clone(), style),
            ]));
            lines.push(Line::default());
        }
        Paragraph::new(lines).render(rows[2], buf);
    }
}
