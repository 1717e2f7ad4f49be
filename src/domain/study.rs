//! Derived study values: age and study status.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::domain::entities::STUDY_DURATION_YEARS;

/// Last 0-based month index of the final academic year.
const LAST_STUDY_MONTH0: u32 = 8;

/// Age as the difference of calendar years, ignoring month and day.
#[must_use]
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth_date.year()
}

/// Progress of a student through their programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyStatus {
    /// The programme is over.
    Graduated,
    /// Currently studying.
    Studying { start: i32, end: i32, course: i32 },
}

impl StudyStatus {
    /// Computes the status for a start year as of `today`.
    #[must_use]
    pub fn for_start_year(start: i32, today: NaiveDate) -> Self {
        let current_year = today.year();
        let end = start + STUDY_DURATION_YEARS;

        if end < current_year || (end == current_year && today.month0() > LAST_STUDY_MONTH0) {
            Self::Graduated
        } else {
            Self::Studying {
                start,
                end,
                course: current_year - start + 1,
            }
        }
    }
}

impl fmt::Display for StudyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graduated => write!(f, "graduated"),
            Self::Studying { start, end, course } => write!(f, "{start}-{end} ({course} курс)"),
        }
    }
}
