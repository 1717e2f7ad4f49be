//! Roster loading use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::Student;
use crate::domain::errors::ApiError;
use crate::domain::ports::StudentsPort;

/// Fetches the full students collection.
#[derive(Clone)]
pub struct LoadRosterUseCase {
    students_port: Arc<dyn StudentsPort>,
}

impl LoadRosterUseCase {
    #[must_use]
    pub const fn new(students_port: Arc<dyn StudentsPort>) -> Self {
        Self { students_port }
    }

    /// Loads every student. The caller replaces its roster only on success.
    ///
    /// # Errors
    /// Returns error on transport failure or non-success status.
    pub async fn execute(&self) -> Result<Vec<Student>, ApiError> {
        debug!("Loading students");

        let students = self.students_port.fetch_all().await.map_err(|e| {
            warn!(error = %e, "Failed to load students");
            e
        })?;

        if students.is_empty() {
            info!("No students found on the server");
        } else {
            info!(count = students.len(), "Students loaded");
        }

        Ok(students)
    }
}
