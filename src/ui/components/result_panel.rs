use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::result::SessionResult;
use crate::ui::theme::Theme;

pub struct ResultPanel<'a> {
    pub result: &'a SessionResult,
    pub theme: &'a Theme,
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Session Complete ")
            .border_style(Style::default().fg(colors.border_focused()));
        let inner = block.inner(area);
        block.render(area, buf);

        let score_color = if self.result.accuracy >= 80.0 {
            colors.success()
        } else if self.result.accuracy >= 50.0 {
            colors.accent()
        } else {
            colors.error()
        };

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                format!("{} / {}", self.result.score, self.result.total),
                Style::default()
                    .fg(score_color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{:.0}% correct", self.result.accuracy),
                Style::default().fg(colors.fg()),
            )),
            Line::default(),
            Line::from(Span::styled(
                "[enter] again   [esc] menu",
                Style::default().fg(colors.muted()),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
