//! Roster table with a sortable header and per-row delete controls.

use std::fmt::Write;

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::domain::entities::{SortKey, Student};
use crate::domain::{StudyStatus, age_in_years};

const FALLBACK_DATE_FORMAT: &str = "%d.%m.%Y";
const DELETE_SYMBOL: &str = "✕";
const SORT_INDICATOR: &str = " ▲";
const COLUMN_COUNT: usize = 5;
const DELETE_COLUMN: usize = 4;

const COLUMN_WIDTHS: [Constraint; COLUMN_COUNT] = [
    Constraint::Fill(3),
    Constraint::Length(20),
    Constraint::Length(20),
    Constraint::Fill(2),
    Constraint::Length(3),
];

/// Formats a date with a chrono pattern, falling back to `DD.MM.YYYY` on a bad pattern.
#[must_use]
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", date.format(FALLBACK_DATE_FORMAT));
    }
    out
}

/// Birth date column text: the date with the age in years, or `N/A`.
#[must_use]
pub fn birth_date_cell(student: &Student, today: NaiveDate, pattern: &str) -> String {
    student.birth_date().map_or_else(
        || "N/A".to_string(),
        |birth| {
            format!(
                "{} ({} y.o.)",
                format_date(birth, pattern),
                age_in_years(birth, today)
            )
        },
    )
}

/// Selection plus the geometry of the last render, used for mouse hits.
#[derive(Debug, Default, Clone)]
pub struct StudentTableState {
    table: TableState,
    header_area: Rect,
    rows_area: Rect,
    columns: [Rect; COLUMN_COUNT],
    row_count: usize,
}

impl StudentTableState {
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.table.selected()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.table.select(index);
    }

    /// Sortable column whose header is under `position`.
    #[must_use]
    pub fn header_column_at(&self, position: Position) -> Option<SortKey> {
        if !self.header_area.contains(position) {
            return None;
        }
        self.columns
            .iter()
            .position(|column| (column.left()..column.right()).contains(&position.x))
            .and_then(SortKey::from_column)
    }

    /// Visible row index under `position`.
    #[must_use]
    pub fn row_at(&self, position: Position) -> Option<usize> {
        if !self.rows_area.contains(position) {
            return None;
        }
        let index = self.table.offset() + usize::from(position.y - self.rows_area.y);
        (index < self.row_count).then_some(index)
    }

    /// Visible row index whose delete control is under `position`.
    #[must_use]
    pub fn delete_control_at(&self, position: Position) -> Option<usize> {
        let column = self.columns[DELETE_COLUMN];
        if (column.left()..column.right()).contains(&position.x) {
            self.row_at(position)
        } else {
            None
        }
    }
}

pub struct StudentTable<'a> {
    students: &'a [&'a Student],
    today: NaiveDate,
    date_format: &'a str,
    sort_key: Option<SortKey>,
    focused: bool,
}

impl<'a> StudentTable<'a> {
    #[must_use]
    pub const fn new(students: &'a [&'a Student], today: NaiveDate, date_format: &'a str) -> Self {
        Self {
            students,
            today,
            date_format,
            sort_key: None,
            focused: false,
        }
    }

    #[must_use]
    pub const fn sort_key(mut self, sort_key: Option<SortKey>) -> Self {
        self.sort_key = sort_key;
        self
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn header(&self) -> Row<'static> {
        let mut titles: Vec<String> = SortKey::ALL
            .iter()
            .map(|&key| {
                if self.sort_key == Some(key) {
                    format!("{}{SORT_INDICATOR}", key.title())
                } else {
                    key.title().to_string()
                }
            })
            .collect();
        titles.push(String::new());

        Row::new(titles).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }

    fn row(&self, student: &Student) -> Row<'static> {
        Row::new([
            Line::from(student.full_name()),
            Line::from(birth_date_cell(student, self.today, self.date_format)),
            Line::from(StudyStatus::for_start_year(student.study_start(), self.today).to_string()),
            Line::from(student.faculty().to_string()),
            Line::from(DELETE_SYMBOL).alignment(Alignment::Center).red(),
        ])
    }
}

impl StatefulWidget for StudentTable<'_> {
    type State = StudentTableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Students ");
        let inner = block.inner(area);
        block.render(area, buf);

        let [header_area, rows_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        let columns: [Rect; COLUMN_COUNT] = Layout::horizontal(COLUMN_WIDTHS)
            .spacing(1)
            .areas(inner);

        state.header_area = header_area;
        state.rows_area = rows_area;
        state.columns = columns;
        state.row_count = self.students.len();

        if self.students.is_empty() {
            state.table.select(None);
        }

        let widths = columns.map(|column| Constraint::Length(column.width));
        let rows: Vec<Row> = self.students.iter().map(|s| self.row(s)).collect();
        let highlight = if self.focused {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        };

        let table = Table::new(rows, widths)
            .header(self.header())
            .column_spacing(1)
            .row_highlight_style(highlight);

        StatefulWidget::render(table, inner, buf, &mut state.table);

        if self.students.is_empty() {
            Paragraph::new("No students")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(rows_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::StudentId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn student(id: &str, surname: &str, start: i32) -> Student {
        Student::new(StudentId::new(id), "Ivan", surname, start, "Physics")
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_birth_date_cell() {
        let dated = student("1", "Petrov", 2021).with_birth_date(date(2003, 12, 31));
        let undated = student("2", "Sidorov", 2021);
        let today = date(2025, 5, 1);

        assert_eq!(birth_date_cell(&dated, today, "%d.%m.%Y"), "31.12.2003 (22 y.o.)");
        assert_eq!(birth_date_cell(&undated, today, "%d.%m.%Y"), "N/A");
    }

    #[test]
    fn test_invalid_date_pattern_falls_back() {
        assert_eq!(format_date(date(2003, 5, 12), "%Q"), "12.05.2003");
        assert_eq!(format_date(date(2003, 5, 12), "%Y-%m-%d"), "2003-05-12");
    }

    #[test]
    fn test_render_rows_and_sort_indicator() {
        let a = student("1", "Petrov", 2021);
        let b = student("2", "Smirnov", 2020);
        let rows = vec![&a, &b];
        let area = Rect::new(0, 0, 90, 6);
        let mut buf = Buffer::empty(area);
        let mut state = StudentTableState::default();

        StudentTable::new(&rows, date(2025, 5, 1), "%d.%m.%Y")
            .sort_key(Some(SortKey::FullName))
            .render(area, &mut buf, &mut state);

        assert!(line(&buf, 1).contains("Full name ▲"));
        assert!(line(&buf, 2).contains("Petrov Ivan"));
        assert!(line(&buf, 2).contains("2021-2025 (5 курс)"));
        assert!(line(&buf, 3).contains("graduated"));
        assert!(line(&buf, 3).contains(DELETE_SYMBOL));
    }

    #[test]
    fn test_mouse_geometry() {
        let a = student("1", "Petrov", 2021);
        let b = student("2", "Smirnov", 2020);
        let rows = vec![&a, &b];
        let area = Rect::new(0, 0, 90, 8);
        let mut buf = Buffer::empty(area);
        let mut state = StudentTableState::default();

        StudentTable::new(&rows, date(2025, 5, 1), "%d.%m.%Y").render(area, &mut buf, &mut state);

        assert_eq!(
            state.header_column_at(Position::new(2, 1)),
            Some(SortKey::FullName)
        );
        assert_eq!(state.header_column_at(Position::new(87, 1)), None);
        assert_eq!(state.row_at(Position::new(2, 3)), Some(1));
        assert_eq!(state.row_at(Position::new(2, 5)), None);
        assert_eq!(state.delete_control_at(Position::new(87, 2)), Some(0));
        assert_eq!(state.delete_control_at(Position::new(2, 2)), None);
    }

    #[test]
    fn test_empty_table_shows_placeholder() {
        let rows: Vec<&Student> = Vec::new();
        let area = Rect::new(0, 0, 90, 5);
        let mut buf = Buffer::empty(area);
        let mut state = StudentTableState::default();
        state.select(Some(3));

        StudentTable::new(&rows, date(2025, 5, 1), "%d.%m.%Y").render(area, &mut buf, &mut state);

        assert!(line(&buf, 2).contains("No students"));
        assert_eq!(state.selected(), None);
    }
}
