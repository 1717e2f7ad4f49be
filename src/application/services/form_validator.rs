//! Validation of the add-student form.

use chrono::{Datelike, NaiveDate};

use crate::application::dto::{FormField, StudentForm};
use crate::domain::entities::NewStudent;
use crate::domain::errors::ValidationError;

/// Earliest study start year accepted.
pub const MIN_STUDY_START: i32 = 2000;

const BIRTH_DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", "%Y-%m-%d"];

/// Earliest birth date accepted.
#[must_use]
pub fn min_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Validates `form` as of `today` and builds a creation candidate.
///
/// # Errors
/// Returns the first rule the form breaks: required text fields, then
/// birth date, then start year.
pub fn validate_form(form: &StudentForm, today: NaiveDate) -> Result<NewStudent, ValidationError> {
    let missing: Vec<&'static str> = [FormField::Name, FormField::Surname, FormField::Faculty]
        .into_iter()
        .filter(|field| form.get(*field).trim().is_empty())
        .map(FormField::label)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { missing });
    }

    let birth_date = parse_birth_date(&form.birth_date, today)?;
    let study_start = parse_study_start(&form.study_start, today)?;

    let patronymic = form.patronymic.trim();

    Ok(NewStudent {
        name: form.name.trim().to_string(),
        surname: form.surname.trim().to_string(),
        patronymic: (!patronymic.is_empty()).then(|| patronymic.to_string()),
        birth_date,
        study_start,
        faculty: form.faculty.trim().to_string(),
    })
}

fn parse_birth_date(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    BIRTH_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .filter(|date| (min_birth_date()..=today).contains(date))
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidBirthDate {
            input: input.to_string(),
        })
}

fn parse_study_start(input: &str, today: NaiveDate) -> Result<i32, ValidationError> {
    let input = input.trim();
    let current_year = today.year();

    input
        .parse::<i32>()
        .ok()
        .filter(|year| (MIN_STUDY_START..=current_year).contains(year))
        .ok_or_else(|| ValidationError::InvalidStartYear {
            input: input.to_string(),
            current_year,
        })
}
