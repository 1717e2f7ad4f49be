//! Domain layer with core roster entities, rules and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Roster filtering.
pub mod filter;
/// Keybinding definitions.
pub mod keybinding;
/// User-facing notifications.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;
/// Age and study status rules.
pub mod study;

pub use entities::{NewStudent, Roster, SortKey, Student, StudentId};
pub use errors::{ApiError, SyncError, ValidationError};
pub use filter::{FilterField, RosterFilter};
pub use notification::{Notification, NotificationLevel};
pub use ports::{Collation, OrdinalCollation, StudentsPort};
pub use study::{StudyStatus, age_in_years};
