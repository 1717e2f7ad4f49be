//! Students collection port.

use async_trait::async_trait;

use crate::domain::entities::{NewStudent, Student, StudentId};
use crate::domain::errors::ApiError;

/// Port for the remote students collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsPort: Send + Sync {
    /// Fetches the whole collection.
    async fn fetch_all(&self) -> Result<Vec<Student>, ApiError>;

    /// Creates a student and returns it with its assigned id.
    async fn create(&self, student: NewStudent) -> Result<Student, ApiError>;

    /// Deletes the student with `id`.
    async fn delete(&self, id: StudentId) -> Result<(), ApiError>;
}
