use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{Notification, NotificationLevel};

const MAX_WIDTH: u16 = 60;
const DISMISS_HINT: &str = "Press any key to close";

/// Modal message box centred over the screen.
pub struct AlertPopup<'a> {
    notification: &'a Notification,
}

impl<'a> AlertPopup<'a> {
    #[must_use]
    pub const fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }

    fn popup_area(&self, area: Rect) -> Rect {
        let title = format!(" {} ", self.notification.title);
        let message_width = u16::try_from(self.notification.message.width()).unwrap_or(u16::MAX);
        let title_width = u16::try_from(title.width()).unwrap_or(0);
        let hint_width = u16::try_from(DISMISS_HINT.width()).unwrap_or(0);

        let width = message_width
            .max(title_width)
            .max(hint_width)
            .saturating_add(4)
            .min(MAX_WIDTH)
            .min(area.width);

        let inner_width = width.saturating_sub(2).max(1);
        let lines = message_width.div_ceil(inner_width).max(1);
        let height = lines.saturating_add(4).min(area.height);

        Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        )
    }
}

impl Widget for AlertPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = self.popup_area(area);
        if popup_area.area() == 0 {
            return;
        }

        let color = match self.notification.level {
            NotificationLevel::Info => Color::Cyan,
            NotificationLevel::Warn => Color::Yellow,
            NotificationLevel::Error => Color::Red,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.notification.title))
            .border_style(Style::default().fg(color));

        let text = vec![
            Line::from(Span::styled(
                self.notification.message.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                DISMISS_HINT,
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        ];

        Clear.render(popup_area, buf);
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(popup_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_is_centered() {
        let notification = Notification::error("Invalid input", "Please fill all required fields");
        let popup = AlertPopup::new(&notification);

        let area = popup.popup_area(Rect::new(0, 0, 100, 40));

        assert_eq!(area.width, 35);
        assert_eq!(area.x, 32);
        assert_eq!(area.height, 5);
        assert_eq!(area.y, 17);
    }

    #[test]
    fn test_long_message_wraps() {
        let notification = Notification::error("Invalid input", "x".repeat(150));
        let area = AlertPopup::new(&notification).popup_area(Rect::new(0, 0, 100, 40));

        assert_eq!(area.width, MAX_WIDTH);
        assert_eq!(area.height, 7);
    }

    #[test]
    fn test_render_shows_title_and_hint() {
        let notification = Notification::error("Invalid input", "Birth date is invalid");
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);

        AlertPopup::new(&notification).render(area, &mut buf);

        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(screen.contains("Invalid input"));
        assert!(screen.contains("Birth date is invalid"));
        assert!(screen.contains(DISMISS_HINT));
    }
}
