//! Form validation error types.

use thiserror::Error;

/// Reason a candidate student was rejected before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("Please fill all required fields: {}", .missing.join(", "))]
    MissingFields { missing: Vec<&'static str> },

    #[error("Invalid birth date \"{input}\". It should be between 01.01.1900 and today.")]
    InvalidBirthDate { input: String },

    #[error("Invalid start year \"{input}\". It should be between 2000 and {current_year}.")]
    InvalidStartYear { input: String, current_year: i32 },
}

impl ValidationError {
    /// Short title for alert popups.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::MissingFields { .. } => "Missing fields",
            Self::InvalidBirthDate { .. } => "Invalid birth date",
            Self::InvalidStartYear { .. } => "Invalid start year",
        }
    }
}
