//! Birth moment value object.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::domain::foundation::ValidationError;

/// Format of the joined `"{date} {time}"` string.
const BIRTH_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A birth date/time as entered, without any timezone arithmetic.
///
/// The timezone name is carried along only so it can be forwarded to the
/// external calculation tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthMoment {
    local: NaiveDateTime,
    timezone: String,
}

impl BirthMoment {
    /// Parses separate `YYYY-MM-DD` and `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` if the joined string does not
    /// match `%Y-%m-%d %H:%M` or names a date that does not exist.
    pub fn parse(
        date: &str,
        time: &str,
        timezone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let joined = format!("{date} {time}");
        let local = NaiveDateTime::parse_from_str(&joined, BIRTH_FORMAT).map_err(|e| {
            ValidationError::invalid_format("birth", format!("'{joined}' is not a valid date/time: {e}"))
        })?;
        Ok(Self {
            local,
            timezone: timezone.into(),
        })
    }

    /// Wraps an already constructed local date-time.
    pub fn from_local(local: NaiveDateTime, timezone: impl Into<String>) -> Self {
        Self {
            local,
            timezone: timezone.into(),
        }
    }

    pub fn year(&self) -> i32 {
        self.local.year()
    }

    pub fn month(&self) -> u32 {
        self.local.month()
    }

    pub fn day(&self) -> u32 {
        self.local.day()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Days elapsed in the birth year before the birth date.
    ///
    /// Equal to the lengths of all earlier months (leap years included) plus
    /// `day - 1`.
    pub fn days_into_year(&self) -> u32 {
        self.local.ordinal0()
    }
}
