//! Student creation use case.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::application::dto::StudentForm;
use crate::application::services::validate_form;
use crate::domain::entities::Student;
use crate::domain::errors::SyncError;
use crate::domain::ports::StudentsPort;

/// Validates a form and creates the student on the server.
#[derive(Clone)]
pub struct CreateStudentUseCase {
    students_port: Arc<dyn StudentsPort>,
}

impl CreateStudentUseCase {
    #[must_use]
    pub const fn new(students_port: Arc<dyn StudentsPort>) -> Self {
        Self { students_port }
    }

    /// Validates `form` as of `today`, then sends it.
    ///
    /// Nothing is sent when validation fails.
    ///
    /// # Errors
    /// Returns [`SyncError::Validation`] for a rejected form and
    /// [`SyncError::Api`] when the server call fails.
    pub async fn execute(&self, form: &StudentForm, today: NaiveDate) -> Result<Student, SyncError> {
        let candidate = validate_form(form, today).map_err(|e| {
            debug!(error = %e, "Student form rejected");
            e
        })?;

        debug!(surname = %candidate.surname, "Creating student");

        let student = self.students_port.create(candidate).await.map_err(|e| {
            warn!(error = %e, "Failed to create student");
            e
        })?;

        info!(id = %student.id(), "Student created");
        Ok(student)
    }
}
