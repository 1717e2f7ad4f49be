//! Data transfer objects for the application layer.

mod student_form;

pub use student_form::{FormField, StudentForm};
