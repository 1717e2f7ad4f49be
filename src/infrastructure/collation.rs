//! ICU-backed locale-aware string ordering.

use std::cmp::Ordering;

use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed, CollatorPreferences};
use icu::locale::Locale;
use thiserror::Error;

use crate::domain::ports::Collation;

#[derive(Debug, Error)]
pub enum CollationError {
    #[error("invalid locale {provided:?}: {message}")]
    InvalidLocale { provided: String, message: String },
    #[error("no collation data for locale {provided:?}: {message}")]
    MissingData { provided: String, message: String },
}

/// Collator for one locale, using compiled-in ICU data.
pub struct IcuCollation {
    collator: CollatorBorrowed<'static>,
}

impl IcuCollation {
    /// Creates a collator for a BCP-47 locale such as `ru` or `en-US`.
    ///
    /// # Errors
    /// Returns error if the locale does not parse or has no collation data.
    pub fn new(locale: &str) -> Result<Self, CollationError> {
        let parsed = Locale::try_from_str(locale).map_err(|e| CollationError::InvalidLocale {
            provided: locale.to_string(),
            message: e.to_string(),
        })?;

        let prefs = CollatorPreferences::from(&parsed);
        let collator = Collator::try_new(prefs, CollatorOptions::default()).map_err(|e| {
            CollationError::MissingData {
                provided: locale.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self { collator })
    }
}

impl Collation for IcuCollation {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        self.collator.compare(left, right)
    }
}
