//! Client-side roster filtering.

use crate::domain::entities::Student;

/// Filter input a user can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Name,
    Faculty,
    StartYear,
    EndYear,
}

impl FilterField {
    /// Fields in display order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Faculty, Self::StartYear, Self::EndYear];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Faculty => "Faculty",
            Self::StartYear => "Start year",
            Self::EndYear => "End year",
        }
    }
}

/// Raw filter texts. Empty text passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    pub name: String,
    pub faculty: String,
    pub start_year: String,
    pub end_year: String,
}

impl RosterFilter {
    /// Replaces the text of one field.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Name => self.name = value,
            FilterField::Faculty => self.faculty = value,
            FilterField::StartYear => self.start_year = value,
            FilterField::EndYear => self.end_year = value,
        }
    }

    /// Returns whether `student` passes every filter.
    #[must_use]
    pub fn matches(&self, student: &Student) -> bool {
        let name = self.name.trim().to_lowercase();
        let faculty = self.faculty.trim().to_lowercase();

        let name_match = name.is_empty() || student.full_name().to_lowercase().contains(&name);
        let faculty_match =
            faculty.is_empty() || student.faculty().to_lowercase().contains(&faculty);
        let start_match = parse_year(&self.start_year).is_none_or(|y| student.study_start() == y);
        let end_match = parse_year(&self.end_year).is_none_or(|y| student.study_end() == y);

        name_match && faculty_match && start_match && end_match
    }

    /// Returns the students passing the filter, in roster order.
    #[must_use]
    pub fn apply<'a>(&self, students: &'a [Student]) -> Vec<&'a Student> {
        students.iter().filter(|s| self.matches(s)).collect()
    }
}

/// The whole trimmed text must be an integer; "2024x" is not a year and filters nothing.
fn parse_year(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}
