use crate::domain::keybinding::Keybind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    #[default]
    Form,
    Filters,
    Table,
    Alert,
}

impl FocusContext {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Form => "FORM",
            Self::Filters => "FILTER",
            Self::Table => "TABLE",
            Self::Alert => "ALERT",
        }
    }
}

pub struct FooterBarStyle {
    pub label_style: Style,
    pub key_style: Style,
    pub focus_indicator: Style,
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self {
            label_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().fg(Color::White).bg(Color::DarkGray),
            focus_indicator: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Key hints for the focused part of the screen.
pub struct FooterBar<'a> {
    keybindings: &'a [Keybind],
    focus_context: FocusContext,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(keybindings: &'a [Keybind], focus_context: FocusContext) -> Self {
        Self {
            keybindings,
            focus_context,
            style: FooterBarStyle::default(),
        }
    }

    fn format_key(key: &KeyEvent) -> String {
        use std::fmt::Write;
        let mut s = String::new();
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("C-");
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("A-");
        }
        if key.modifiers.contains(KeyModifiers::SHIFT)
            && !matches!(key.code, KeyCode::Char(_) | KeyCode::BackTab)
        {
            s.push_str("S-");
        }

        match key.code {
            KeyCode::Char(c) => s.push(c),
            KeyCode::Enter => s.push_str("Enter"),
            KeyCode::Esc => s.push_str("Esc"),
            KeyCode::Tab => s.push_str("Tab"),
            KeyCode::BackTab => s.push_str("S-Tab"),
            KeyCode::Delete => s.push_str("Del"),
            KeyCode::Home => s.push_str("Home"),
            KeyCode::End => s.push_str("End"),
            KeyCode::Up => s.push('↑'),
            KeyCode::Down => s.push('↓'),
            other => {
                let _ = write!(s, "{other:?}");
            }
        }
        s
    }

    fn spans(&self) -> Vec<Span<'_>> {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.focus_context.display_name()),
                self.style.focus_indicator,
            ),
            Span::raw(" "),
        ];

        for (i, binding) in self.keybindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {} ", binding.label),
                self.style.label_style,
            ));
            spans.push(Span::styled(
                format!(" {} ", Self::format_key(&binding.key)),
                self.style.key_style,
            ));
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        Paragraph::new(Line::from(self.spans())).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keybinding::Action;

    #[test]
    fn test_format_key() {
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        let delete = KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE);

        assert_eq!(FooterBar::format_key(&ctrl_r), "C-r");
        assert_eq!(FooterBar::format_key(&back_tab), "S-Tab");
        assert_eq!(FooterBar::format_key(&delete), "Del");
    }

    #[test]
    fn test_render_focus_and_hints() {
        let binds = vec![Keybind::new(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            Action::Reload,
            "Reload",
        )];
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);

        FooterBar::new(&binds, FocusContext::Table).render(area, &mut buf);

        let text: String = (0..area.width).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(text.starts_with(" TABLE   Reload  C-r "));
    }
}
