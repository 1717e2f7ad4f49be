//! Text collation port.

use std::cmp::Ordering;

/// Orders strings for display sorting.
pub trait Collation {
    /// Compares two strings.
    fn compare(&self, left: &str, right: &str) -> Ordering;
}

/// Plain code-point ordering, used when no locale data is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinalCollation;

impl Collation for OrdinalCollation {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        left.cmp(right)
    }
}
