use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, StatefulWidget, Widget},
};

use super::input::TextInput;
use crate::domain::{FilterField, RosterFilter};

#[derive(Debug, Clone)]
pub struct FilterBarState {
    inputs: Vec<(FilterField, TextInput)>,
    field_areas: Vec<(FilterField, Rect)>,
}

impl FilterBarState {
    #[must_use]
    pub fn new() -> Self {
        let inputs = FilterField::ALL
            .iter()
            .map(|&field| {
                let input = match field {
                    FilterField::StartYear | FilterField::EndYear => {
                        TextInput::new(field.label()).placeholder("YYYY")
                    }
                    FilterField::Name | FilterField::Faculty => TextInput::new(field.label()),
                };
                (field, input)
            })
            .collect();

        Self {
            inputs,
            field_areas: Vec::new(),
        }
    }

    pub fn focus(&mut self, field: Option<FilterField>) {
        for (f, input) in &mut self.inputs {
            input.set_focused(Some(*f) == field);
        }
    }

    #[must_use]
    pub fn input(&self, field: FilterField) -> Option<&TextInput> {
        self.inputs
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, input)| input)
    }

    pub fn input_mut(&mut self, field: FilterField) -> Option<&mut TextInput> {
        self.inputs
            .iter_mut()
            .find(|(f, _)| *f == field)
            .map(|(_, input)| input)
    }

    #[must_use]
    pub fn to_filter(&self) -> RosterFilter {
        let mut filter = RosterFilter::default();
        for (field, input) in &self.inputs {
            filter.set(*field, input.value());
        }
        filter
    }

    #[must_use]
    pub fn field_at(&self, position: Position) -> Option<FilterField> {
        self.field_areas
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(field, _)| *field)
    }
}

impl Default for FilterBarState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FilterBar {
    focused: bool,
}

impl FilterBar {
    pub const HEIGHT: u16 = 5;

    #[must_use]
    pub const fn new(focused: bool) -> Self {
        Self { focused }
    }
}

impl StatefulWidget for FilterBar {
    type State = FilterBarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Filter ");
        let inner = block.inner(area);
        block.render(area, buf);

        let cells = Layout::horizontal([
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .spacing(1)
        .split(inner);

        state.field_areas.clear();
        for ((field, input), cell) in state.inputs.iter().zip(cells.iter()) {
            Widget::render(input, *cell, buf);
            state.field_areas.push((*field, *cell));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_filter_mirrors_inputs() {
        let mut state = FilterBarState::new();
        state.input_mut(FilterField::Name).unwrap().set_value("smith");
        state.input_mut(FilterField::EndYear).unwrap().set_value("2028");

        let filter = state.to_filter();

        assert_eq!(filter.name, "smith");
        assert_eq!(filter.end_year, "2028");
        assert!(filter.faculty.is_empty());
    }

    #[test]
    fn test_render_records_hit_areas() {
        let mut state = FilterBarState::new();
        let area = Rect::new(0, 0, 60, FilterBar::HEIGHT);
        let mut buf = Buffer::empty(area);

        FilterBar::new(false).render(area, &mut buf, &mut state);

        assert_eq!(state.field_at(Position::new(1, 2)), Some(FilterField::Name));
        assert_eq!(state.field_at(Position::new(58, 2)), Some(FilterField::EndYear));
        assert_eq!(state.field_at(Position::new(30, 0)), None);
    }
}
