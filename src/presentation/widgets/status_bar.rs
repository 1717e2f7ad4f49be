//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{Notification, NotificationLevel};

const fn level_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Info => Color::Green,
        NotificationLevel::Warn => Color::Yellow,
        NotificationLevel::Error => Color::Red,
    }
}

/// Bottom line with the last message, row counts and the API endpoint.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    message: Option<&'a Notification>,
    visible: usize,
    total: usize,
    pending: usize,
    endpoint: &'a str,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(visible: usize, total: usize) -> Self {
        Self {
            message: None,
            visible,
            total,
            pending: 0,
            endpoint: "",
        }
    }

    #[must_use]
    pub const fn message(mut self, message: Option<&'a Notification>) -> Self {
        self.message = message;
        self
    }

    /// Number of requests still in flight.
    #[must_use]
    pub const fn pending(mut self, pending: usize) -> Self {
        self.pending = pending;
        self
    }

    #[must_use]
    pub const fn endpoint(mut self, endpoint: &'a str) -> Self {
        self.endpoint = endpoint;
        self
    }

    fn counts(&self) -> String {
        let mut text = if self.visible == self.total {
            format!("{} students", self.total)
        } else {
            format!("{}/{} students", self.visible, self.total)
        };
        if self.pending > 0 {
            text.push_str(" · syncing");
        }
        text
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let counts = self.counts();
        let counts_width = u16::try_from(counts.width()).unwrap_or(u16::MAX);
        let endpoint_width = u16::try_from(self.endpoint.width()).unwrap_or(u16::MAX);

        let [left, center, right] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(counts_width.saturating_add(2)),
            Constraint::Length(endpoint_width.saturating_add(1)),
        ])
        .areas(area);

        if let Some(message) = self.message {
            let style = Style::default().fg(level_color(message.level));
            let line = Line::from(vec![
                Span::styled(
                    format!(" {} ", message.title),
                    style.add_modifier(Modifier::BOLD),
                ),
                Span::styled(message.message.as_str(), style),
            ]);
            Paragraph::new(line).render(left, buf);
        }

        Paragraph::new(counts)
            .style(Style::default().fg(Color::Cyan))
            .centered()
            .render(center, buf);
        Paragraph::new(self.endpoint)
            .style(Style::default().fg(Color::DarkGray))
            .right_aligned()
            .render(right, buf);
    }
}
