use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;
use crate::vocab::fetch::VocabSource;

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: "1".to_string(),
                    label: "Start Quiz".to_string(),
                    description: "Adaptive review of the words you get wrong most".to_string(),
                },
                MenuItem {
                    key: "2".to_string(),
                    label: "Reload Vocabulary".to_string(),
                    description: "Fetch the word list again from the configured source".to_string(),
                },
                MenuItem {
                    key: "3".to_string(),
                    label: "Settings".to_string(),
                    description: "Theme and profile".to_string(),
                },
                MenuItem {
                    key: "q".to_string(),
                    label: "Quit".to_string(),
                    description: String::new(),
                },
            ],
            selected: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        self.selected = (self.selected + self.items.len() - 1) % self.items.len();
    }
}

/// Menu screen: item list plus a word/mastery summary line.
pub struct MenuView<'a> {
    pub menu: &'a Menu<'a>,
    pub word_count: usize,
    pub mastered_count: usize,
    pub source: VocabSource,
    pub theme: &'a Theme,
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" kotoba ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(4)])
            .split(inner);

        let summary = Line::from(vec![
            Span::styled(
                format!("{} words loaded", self.word_count),
                Style::default().fg(colors.fg()),
            ),
            Span::styled("  ·  ", Style::default().fg(colors.muted())),
            Span::styled(
                format!("{} mastered", self.mastered_count),
                Style::default().fg(colors.success()),
            ),
            Span::styled(
                match self.source {
                    VocabSource::Remote => "  ·  remote list",
                    VocabSource::Cache => "  ·  cached list",
                    VocabSource::Bundled => "  ·  bundled list",
                },
                Style::default().fg(colors.muted()),
            ),
        ]);
        Paragraph::new(summary)
            .alignment(Alignment::Center)
            .render(rows[0], buf);

        let mut lines = Vec::new();
        for (i, item) in self.menu.items.iter().enumerate() {
            let selected = i == self.menu.selected;
            let marker = if selected { "▸ " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("[{}] ", item.key), style),
                Span::styled(item.label.clone(), style),
                Span::styled(
                    if item.description.is_empty() {
                        String::new()
                    } else {
                        format!("  — {}", item.description)
                    },
                    Style::default().fg(colors.muted()),
                ),
            ]));
        }
        Paragraph::new(lines).render(rows[1], buf);
    }
}
