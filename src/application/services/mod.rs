//! Application services.

mod form_validator;

pub use form_validator::{MIN_STUDY_START, min_birth_date, validate_form};
