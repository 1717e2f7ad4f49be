//! Domain entity definitions.

mod roster;
mod student;

pub use roster::{Roster, SortKey};
pub use student::{NewStudent, STUDY_DURATION_YEARS, Student, StudentId};
