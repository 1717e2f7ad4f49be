//! In-memory roster of students.

use std::cmp::Ordering;

use super::student::{Student, StudentId};
use crate::domain::ports::Collation;

/// Column a roster can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Surname, name and patronymic.
    FullName,
    /// Birth date, undated records first.
    BirthDate,
    /// Study start year.
    StartYear,
    /// Faculty name.
    Faculty,
}

impl SortKey {
    /// Sortable keys in table column order.
    pub const ALL: [Self; 4] = [Self::FullName, Self::BirthDate, Self::StartYear, Self::Faculty];

    /// Returns the key for a table column, if that column is sortable.
    #[must_use]
    pub fn from_column(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the table column this key sorts.
    #[must_use]
    pub const fn column(self) -> usize {
        match self {
            Self::FullName => 0,
            Self::BirthDate => 1,
            Self::StartYear => 2,
            Self::Faculty => 3,
        }
    }

    /// Column header title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::BirthDate => "Birth date (age)",
            Self::StartYear => "Study years",
            Self::Faculty => "Faculty",
        }
    }

    /// Compares two students by this key.
    pub fn compare(self, a: &Student, b: &Student, collation: &dyn Collation) -> Ordering {
        match self {
            Self::FullName => collation.compare(&a.full_name(), &b.full_name()),
            Self::Faculty => collation.compare(a.faculty(), b.faculty()),
            Self::BirthDate => a.birth_date().cmp(&b.birth_date()),
            Self::StartYear => a.study_start().cmp(&b.study_start()),
        }
    }
}

/// Ordered collection of students for the current session.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the roster and fills it with `students`.
    pub fn replace_all(&mut self, students: impl IntoIterator<Item = Student>) {
        self.students.clear();
        self.students.extend(students);
    }

    /// Adds a student at the end.
    pub fn append(&mut self, student: Student) {
        self.students.push(student);
    }

    /// Removes the first student with `id`. Absent ids are ignored.
    pub fn remove_by_id(&mut self, id: &StudentId) -> Option<Student> {
        let index = self.students.iter().position(|s| s.id() == id)?;
        Some(self.students.remove(index))
    }

    /// Stable in-place sort by `key`.
    pub fn sort_by(&mut self, key: SortKey, collation: &dyn Collation) {
        self.students.sort_by(|a, b| key.compare(a, b, collation));
    }

    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::OrdinalCollation;
    use chrono::NaiveDate;

    fn student(id: &str, surname: &str, start: i32, faculty: &str) -> Student {
        Student::new(id, "Name", surname, start, faculty)
    }

    fn ids(roster: &Roster) -> Vec<&str> {
        roster.students().iter().map(|s| s.id().as_str()).collect()
    }

    #[test]
    fn test_replace_all_discards_previous() {
        let mut roster = Roster::new();
        roster.append(student("1", "A", 2020, "X"));
        roster.replace_all(vec![student("2", "B", 2021, "Y"), student("3", "C", 2022, "Z")]);

        assert_eq!(ids(&roster), vec!["2", "3"]);
    }

    #[test]
    fn test_remove_by_id_removes_first_match_only() {
        let mut roster = Roster::new();
        roster.replace_all(vec![
            student("1", "A", 2020, "X"),
            student("2", "B", 2021, "Y"),
            student("2", "C", 2022, "Z"),
        ]);

        let removed = roster.remove_by_id(&StudentId::new("2"));

        assert_eq!(removed.map(|s| s.surname().to_string()), Some("B".to_string()));
        assert_eq!(ids(&roster), vec!["1", "2"]);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut roster = Roster::new();
        roster.append(student("1", "A", 2020, "X"));

        assert!(roster.remove_by_id(&StudentId::new("9")).is_none());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_sort_by_start_year_is_stable() {
        let mut roster = Roster::new();
        roster.replace_all(vec![
            student("1", "A", 2022, "X"),
            student("2", "B", 2020, "X"),
            student("3", "C", 2022, "X"),
            student("4", "D", 2020, "X"),
        ]);

        roster.sort_by(SortKey::StartYear, &OrdinalCollation);

        assert_eq!(ids(&roster), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_sort_by_full_name_is_idempotent() {
        let mut roster = Roster::new();
        roster.replace_all(vec![
            student("1", "Smirnov", 2022, "X"),
            student("2", "Abramov", 2020, "X"),
            student("3", "Kuznetsov", 2021, "X"),
        ]);

        roster.sort_by(SortKey::FullName, &OrdinalCollation);
        let once = ids(&roster).join(",");
        roster.sort_by(SortKey::FullName, &OrdinalCollation);

        assert_eq!(once, "2,3,1");
        assert_eq!(ids(&roster).join(","), once);
    }

    #[test]
    fn test_sort_by_birth_date_puts_undated_first() {
        let born = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let mut roster = Roster::new();
        roster.replace_all(vec![
            student("1", "A", 2020, "X").with_birth_date(born(2001, 3, 1)),
            student("2", "B", 2020, "X"),
            student("3", "C", 2020, "X").with_birth_date(born(1999, 12, 31)),
        ]);

        roster.sort_by(SortKey::BirthDate, &OrdinalCollation);

        assert_eq!(ids(&roster), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_by_faculty() {
        let mut roster = Roster::new();
        roster.replace_all(vec![
            student("1", "A", 2020, "Physics"),
            student("2", "B", 2020, "Chemistry"),
        ]);

        roster.sort_by(SortKey::Faculty, &OrdinalCollation);

        assert_eq!(ids(&roster), vec!["2", "1"]);
    }

    #[test]
    fn test_sort_key_columns_round_trip() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_column(key.column()), Some(key));
        }
        assert_eq!(SortKey::from_column(4), None);
    }
}
