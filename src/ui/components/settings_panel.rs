use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::config::Config;
use crate::ui::theme::Theme;

/// Settings screen. Only the theme is editable in-app (enter cycles it and
/// persists through the same merge path as answers); the rest mirrors
/// config.toml for reference.
pub struct SettingsPanel<'a> {
    pub config: &'a Config,
    pub theme: &'a Theme,
}

impl Widget for SettingsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Settings ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let label = |s: &str| Span::styled(format!("  {s:<18}"), Style::default().fg(colors.muted()));
        let value = |s: String| Span::styled(s, Style::default().fg(colors.fg()));

        let lines = vec![
            Line::default(),
            Line::from(vec![
                label("Theme"),
                Span::styled(
                    self.theme.name.clone(),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  [enter] next theme", Style::default().fg(colors.muted())),
            ]),
            Line::from(vec![label("Profile"), value(self.config.profile.clone())]),
            Line::from(vec![
                label("Session size"),
                value(self.config.session_size.to_string()),
            ]),
            Line::from(vec![
                label("Mastery threshold"),
                value(self.config.mastery_threshold.to_string()),
            ]),
            Line::from(vec![
                label("Source URL"),
                value(if self.config.source_url.is_empty() {
                    "(bundled)".to_string()
                } else {
                    self.config.source_url.clone()
                }),
            ]),
            Line::from(vec![
                label("Remote store"),
                value(if self.config.remote_url.is_empty() {
                    "(disabled)".to_string()
                } else {
                    self.config.remote_url.clone()
                }),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "  Edit other values in config.toml   [esc] back",
                Style::default().fg(colors.muted()),
            )),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}
