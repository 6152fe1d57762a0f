use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date '{0}': expected a real calendar date in YYYY-MM-DD form")]
pub struct InvalidDate(pub String);

/// A calendar date in canonical, zero-padded `YYYY-MM-DD` form.
///
/// Construction goes through [`QueryDate::parse`], which is strict: the input
/// must be a real calendar date (`2024-02-30` is rejected, no rollover) and
/// must already be in canonical form (`2024-6-01` is rejected). The
/// fixed-width canonical form is what makes the string ordering in
/// [`QueryDate::is_future`] sound.
///
/// # Examples
///
/// ```
/// use weathervane::QueryDate;
///
/// let date = QueryDate::parse("2020-06-01").unwrap();
/// assert_eq!(date.year(), 2020);
/// assert_eq!(date.month_day(), "06-01");
/// assert!(QueryDate::parse("2024-02-30").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryDate {
    raw: String,
    date: NaiveDate,
}

impl QueryDate {
    /// Parses a strict `YYYY-MM-DD` date string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDate`] when the input is not a real calendar date or
    /// not in canonical zero-padded form.
    pub fn parse(input: &str) -> Result<Self, InvalidDate> {
        // Fixed width up front: a 5-digit or unpadded year would survive the
        // round-trip check below while breaking string ordering.
        if input.len() != 10 {
            return Err(InvalidDate(input.to_string()));
        }
        let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map_err(|_| InvalidDate(input.to_string()))?;
        let canonical = date.format("%Y-%m-%d").to_string();
        if canonical != input {
            return Err(InvalidDate(input.to_string()));
        }
        Ok(Self {
            raw: canonical,
            date,
        })
    }

    fn from_naive(date: NaiveDate) -> Self {
        Self {
            raw: date.format("%Y-%m-%d").to_string(),
            date,
        }
    }

    /// Today according to the local clock, in canonical form.
    pub fn today() -> Self {
        Self::from_naive(chrono::Local::now().date_naive())
    }

    /// The 4-digit year.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// The `MM-DD` remainder after the year prefix.
    pub fn month_day(&self) -> &str {
        &self.raw[5..]
    }

    /// The same month and day in another year, or `None` when that calendar
    /// date does not exist (Feb 29 outside a leap year).
    pub fn with_year(&self, year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, self.date.month(), self.date.day()).map(Self::from_naive)
    }

    /// Whether this date counts as future relative to `today`.
    ///
    /// A date equal to today classifies as future. The comparison is a plain
    /// string comparison, valid because both sides are canonical fixed-width
    /// `YYYY-MM-DD`.
    pub fn is_future(&self, today: &QueryDate) -> bool {
        self.raw >= today.raw
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for QueryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for QueryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
