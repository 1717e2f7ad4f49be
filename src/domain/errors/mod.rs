//! Domain error types.

mod api_error;
mod validation_error;

pub use api_error::{ApiError, SyncError};
pub use validation_error::ValidationError;
