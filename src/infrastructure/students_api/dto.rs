use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::entities::{NewStudent, Student};
use crate::domain::serde_utils::{optional_date, string_or_number, year};

/// Student record as returned by the API.
#[derive(Debug, Deserialize)]
pub struct StudentResponse {
    /// Server-assigned id, string or number.
    #[serde(with = "string_or_number")]
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub name: String,
    /// Family name.
    #[serde(default)]
    pub surname: String,
    /// Patronymic.
    #[serde(default)]
    pub lastname: Option<String>,
    /// Birth date as an ISO-8601 timestamp.
    #[serde(default, with = "optional_date")]
    pub birthday: Option<NaiveDate>,
    /// Study start year, string or number.
    #[serde(rename = "studyStart", with = "year")]
    pub study_start: i32,
    /// Faculty name.
    #[serde(default)]
    pub faculty: String,
}

impl From<StudentResponse> for Student {
    fn from(response: StudentResponse) -> Self {
        let mut student = Self::new(
            response.id,
            response.name,
            response.surname,
            response.study_start,
            response.faculty,
        );
        if let Some(lastname) = response.lastname {
            student = student.with_patronymic(lastname);
        }
        if let Some(birthday) = response.birthday {
            student = student.with_birth_date(birthday);
        }
        student
    }
}

/// Maps a students list record by record, skipping records that do not decode.
#[must_use]
pub fn students_from_records(records: Vec<Value>) -> Vec<Student> {
    records
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, record)| match serde_json::from_value::<StudentResponse>(record) {
                Ok(response) => Some(Student::from(response)),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed student record");
                    None
                }
            },
        )
        .collect()
}

/// Body of a create request.
#[derive(Debug, Serialize)]
pub struct CreateStudentBody<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub lastname: &'a str,
    #[serde(with = "optional_date")]
    pub birthday: Option<NaiveDate>,
    #[serde(rename = "studyStart", with = "year")]
    pub study_start: i32,
    pub faculty: &'a str,
}

impl<'a> From<&'a NewStudent> for CreateStudentBody<'a> {
    fn from(student: &'a NewStudent) -> Self {
        Self {
            name: &student.name,
            surname: &student.surname,
            lastname: student.patronymic.as_deref().unwrap_or_default(),
            birthday: student.birth_date,
            study_start: student.study_start,
            faculty: &student.faculty,
        }
    }
}

/// Error body some servers send alongside a failure status.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}
