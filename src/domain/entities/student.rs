//! Student entity.

use chrono::NaiveDate;
use serde::Serialize;

/// Server-assigned student identifier.
///
/// The service may hand out numeric or string ids, so the value is kept
/// opaque and compared as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StudentId(String);

impl StudentId {
    /// Creates an id from its textual form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StudentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for StudentId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Number of years a study programme lasts.
pub const STUDY_DURATION_YEARS: i32 = 4;

/// A student record as held by the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    name: String,
    surname: String,
    patronymic: Option<String>,
    birth_date: Option<NaiveDate>,
    study_start: i32,
    faculty: String,
}

impl Student {
    /// Creates a student with the mandatory fields.
    #[must_use]
    pub fn new(
        id: impl Into<StudentId>,
        name: impl Into<String>,
        surname: impl Into<String>,
        study_start: i32,
        faculty: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surname: surname.into(),
            patronymic: None,
            birth_date: None,
            study_start,
            faculty: faculty.into(),
        }
    }

    /// Sets the patronymic. Blank values are stored as absent.
    #[must_use]
    pub fn with_patronymic(mut self, patronymic: impl Into<String>) -> Self {
        let patronymic = patronymic.into();
        self.patronymic = if patronymic.trim().is_empty() {
            None
        } else {
            Some(patronymic)
        };
        self
    }

    /// Sets the birth date.
    #[must_use]
    pub const fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    #[must_use]
    pub const fn id(&self) -> &StudentId {
        &self.id
    }

    /// Given name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Family name.
    #[must_use]
    pub fn surname(&self) -> &str {
        &self.surname
    }

    #[must_use]
    pub fn patronymic(&self) -> Option<&str> {
        self.patronymic.as_deref()
    }

    #[must_use]
    pub const fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    /// Year the student started studying.
    #[must_use]
    pub const fn study_start(&self) -> i32 {
        self.study_start
    }

    /// Year the programme ends.
    #[must_use]
    pub const fn study_end(&self) -> i32 {
        self.study_start + STUDY_DURATION_YEARS
    }

    #[must_use]
    pub fn faculty(&self) -> &str {
        &self.faculty
    }

    /// Returns "surname name patronymic", skipping blank parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        [
            Some(self.surname.as_str()),
            Some(self.name.as_str()),
            self.patronymic.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// A validated candidate record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub study_start: i32,
    pub faculty: String,
}

impl NewStudent {
    /// Attaches a server-assigned id, producing the stored record.
    #[must_use]
    pub fn into_student(self, id: impl Into<StudentId>) -> Student {
        let mut student = Student::new(id, self.name, self.surname, self.study_start, self.faculty);
        if let Some(patronymic) = self.patronymic {
            student = student.with_patronymic(patronymic);
        }
        if let Some(birth_date) = self.birth_date {
            student = student.with_birth_date(birth_date);
        }
        student
    }
}
