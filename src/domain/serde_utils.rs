//! Serde helpers for the loosely typed students API.

use chrono::{DateTime, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Deserializes ids sent either as strings or numbers into a string.
pub mod string_or_number {
    use super::{de, fmt, Deserializer, Serializer, Visitor};

    /// Serializes the id as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    #[allow(clippy::ptr_arg)]
    pub fn serialize<S>(value: &String, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    /// Deserializes an id from a string or integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a string nor an integer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrNumberVisitor;

        impl Visitor<'_> for StringOrNumberVisitor {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer id")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }
        }

        deserializer.deserialize_any(StringOrNumberVisitor)
    }
}

/// Study years sent as strings of digits (`"2021"`) or plain numbers.
pub mod year {
    use super::{de, fmt, Deserializer, Serializer, Visitor};

    /// Serializes the year as a string of digits, the way the service stores it.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserializes a year from a string or integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an integer or integer string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct YearVisitor;

        impl Visitor<'_> for YearVisitor {
            type Value = i32;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a year as string or integer")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i32::try_from(value).map_err(de::Error::custom)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i32::try_from(value).map_err(de::Error::custom)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.trim().parse::<i32>().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(YearVisitor)
    }
}

/// Optional calendar dates sent as ISO-8601 timestamps or plain dates.
pub mod optional_date {
    use super::{de, fmt, parse_date, Deserializer, NaiveDate, Serializer, Visitor};

    /// Serializes the date as a UTC midnight timestamp, or `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => {
                let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
                serializer.serialize_str(&midnight.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional date. Null, missing and blank values map to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-blank value is not a recognizable date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OptionalDateVisitor;

        impl<'de> Visitor<'de> for OptionalDateVisitor {
            type Value = Option<NaiveDate>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an ISO-8601 date or timestamp")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_str(self)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let value = value.trim();
                if value.is_empty() {
                    return Ok(None);
                }
                parse_date(value)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid date: {value}")))
            }
        }

        deserializer.deserialize_option(OptionalDateVisitor)
    }
}

/// Parses an RFC 3339 timestamp or a `YYYY-MM-DD` date.
fn parse_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}
