use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

const DISPLAY_MILLIS: u64 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient banner; expires on the tick after `DISPLAY_MILLIS`.
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    expires_at: Instant,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_millis(DISPLAY_MILLIS),
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

pub struct NotificationBanner<'a> {
    pub notification: &'a Notification,
    pub theme: &'a Theme,
}

impl Widget for NotificationBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let color = match self.notification.kind {
            NotificationKind::Success => colors.success(),
            NotificationKind::Error => colors.error(),
        };

        let block = Block::bordered().border_style(Style::default().fg(color));
        Paragraph::new(self.notification.message.clone())
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(block)
            .render(area, buf);
    }
}
