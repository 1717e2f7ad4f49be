//! Student deletion use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::StudentId;
use crate::domain::errors::ApiError;
use crate::domain::ports::StudentsPort;

/// Deletes a student on the server.
#[derive(Clone)]
pub struct DeleteStudentUseCase {
    students_port: Arc<dyn StudentsPort>,
}

impl DeleteStudentUseCase {
    #[must_use]
    pub const fn new(students_port: Arc<dyn StudentsPort>) -> Self {
        Self { students_port }
    }

    /// Requests deletion of `id`. The caller removes the row only on `Ok`.
    ///
    /// # Errors
    /// Returns error on transport failure or non-success status.
    pub async fn execute(&self, id: StudentId) -> Result<(), ApiError> {
        debug!(id = %id, "Deleting student");

        self.students_port.delete(id.clone()).await.map_err(|e| {
            warn!(id = %id, error = %e, "Failed to delete student");
            e
        })?;

        info!(id = %id, "Student deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockStudentsPort;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_delete_forwards_id() {
        let mut port = MockStudentsPort::new();
        port.expect_delete()
            .with(eq(StudentId::new("5")))
            .times(1)
            .returning(|_| Ok(()));

        let use_case = DeleteStudentUseCase::new(Arc::new(port));

        assert!(use_case.execute(StudentId::new("5")).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_failure_propagates() {
        let mut port = MockStudentsPort::new();
        port.expect_delete()
            .times(1)
            .returning(|_| Err(ApiError::status(404, "Not Found")));

        let use_case = DeleteStudentUseCase::new(Arc::new(port));
        let result = use_case.execute(StudentId::new("5")).await;

        assert_eq!(result, Err(ApiError::status(404, "Not Found")));
    }
}
