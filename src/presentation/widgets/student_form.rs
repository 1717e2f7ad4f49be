//! Add-student form panel.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, StatefulWidget, Widget},
};

use super::input::TextInput;
use crate::application::dto::{FormField, StudentForm};

const SUBMIT_LABEL: &str = "[ Add ]";

/// Form inputs plus the hit areas recorded on the last render.
#[derive(Debug, Clone)]
pub struct StudentFormState {
    inputs: Vec<(FormField, TextInput)>,
    field_areas: Vec<(FormField, Rect)>,
    submit_area: Rect,
}

impl StudentFormState {
    #[must_use]
    pub fn new() -> Self {
        let inputs = FormField::ALL
            .iter()
            .map(|&field| {
                (
                    field,
                    TextInput::new(field.label()).placeholder(field.placeholder()),
                )
            })
            .collect();

        Self {
            inputs,
            field_areas: Vec::new(),
            submit_area: Rect::default(),
        }
    }

    /// Marks `field` as focused, or none when `None`.
    pub fn focus(&mut self, field: Option<FormField>) {
        for (f, input) in &mut self.inputs {
            input.set_focused(Some(*f) == field);
        }
    }

    #[must_use]
    pub fn input(&self, field: FormField) -> Option<&TextInput> {
        self.inputs
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, input)| input)
    }

    pub fn input_mut(&mut self, field: FormField) -> Option<&mut TextInput> {
        self.inputs
            .iter_mut()
            .find(|(f, _)| *f == field)
            .map(|(_, input)| input)
    }

    /// Snapshot of the raw input values.
    #[must_use]
    pub fn to_form(&self) -> StudentForm {
        let mut form = StudentForm::default();
        for (field, input) in &self.inputs {
            form.set(*field, input.value());
        }
        form
    }

    pub fn clear(&mut self) {
        for (_, input) in &mut self.inputs {
            input.clear();
        }
    }

    /// Input under `position`, as laid out on the last render.
    #[must_use]
    pub fn field_at(&self, position: Position) -> Option<FormField> {
        self.field_areas
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(field, _)| *field)
    }

    #[must_use]
    pub fn is_submit_at(&self, position: Position) -> bool {
        self.submit_area.contains(position)
    }
}

impl Default for StudentFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders [`StudentFormState`] as two rows of three inputs and an add button.
pub struct StudentFormPanel {
    focused: bool,
}

impl StudentFormPanel {
    /// Rows the panel needs, borders included.
    pub const HEIGHT: u16 = 9;

    #[must_use]
    pub const fn new(focused: bool) -> Self {
        Self { focused }
    }
}

impl StatefulWidget for StudentFormPanel {
    type State = StudentFormState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Add student ");
        let inner = block.inner(area);
        block.render(area, buf);

        let [first_row, second_row, button_row] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).spacing(1);
        let cells: Vec<Rect> = columns
            .split(first_row)
            .iter()
            .chain(columns.split(second_row).iter())
            .copied()
            .collect();

        state.field_areas.clear();
        for ((field, input), cell) in state.inputs.iter().zip(cells) {
            Widget::render(input, cell, buf);
            state.field_areas.push((*field, cell));
        }

        let label_width = u16::try_from(SUBMIT_LABEL.chars().count()).unwrap_or(0);
        let submit_area = Rect {
            width: label_width.min(button_row.width),
            ..button_row
        };
        let button_style = if self.focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        Span::styled(SUBMIT_LABEL, button_style).render(submit_area, buf);
        state.submit_area = submit_area;
    }
}
