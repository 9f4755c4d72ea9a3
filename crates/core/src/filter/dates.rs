//! Date helpers for the certified-run list filter.
//!
//! Week shortcuts fill the from/to dropdowns for the "this week",
//! "last week", "previous", "next" and "today" buttons. Weeks run Monday
//! through Sunday.

use chrono::{Datelike, Duration, NaiveDate};

// ---------------------------------------------------------------------------
// Week boundaries
// ---------------------------------------------------------------------------

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Sunday of the week containing `date`.
pub fn sunday_of(date: NaiveDate) -> NaiveDate {
    monday_of(date) + Duration::days(6)
}

/// The (monday, sunday) pair of the week containing `today`.
pub fn this_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (monday_of(today), sunday_of(today))
}

/// The week before the one containing `today`.
pub fn last_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    this_week(today - Duration::days(7))
}

/// The week before the one starting at the current from-date.
pub fn previous_week(from: NaiveDate) -> (NaiveDate, NaiveDate) {
    this_week(from - Duration::days(7))
}

/// The week after the one ending at the current to-date.
pub fn next_week(to: NaiveDate) -> (NaiveDate, NaiveDate) {
    this_week(to + Duration::days(6))
}

/// Single-day range for the "today" button.
pub fn today_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today, today)
}

// ---------------------------------------------------------------------------
// Day/month/year select triples
// ---------------------------------------------------------------------------

/// One day/month/year `<select>` triple. Zero means no selection, matching
/// the placeholder entry the page selects use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateSelect {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl DateSelect {
    /// Fill the triple from a date.
    pub fn set(&mut self, date: NaiveDate) {
        self.day = date.day();
        self.month = date.month();
        self.year = date.year();
    }

    /// Reset the triple to the placeholder entries.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a day has been picked. The month and year selects default to
    /// the current month, so only the day distinguishes "untouched".
    pub fn is_set(&self) -> bool {
        self.day != 0
    }

    /// The selected date, if the triple forms a real calendar date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Query-string value, unpadded `YYYY-M-D` exactly as the list view
    /// expects it.
    pub fn query_value(&self) -> String {
        format!("{}-{}-{}", self.year, self.month, self.day)
    }
}

// ---------------------------------------------------------------------------
// Padded day strings
// ---------------------------------------------------------------------------

/// Zero-padded `YYYY-MM-DD` for the single-day filter, or an empty string
/// when the parts do not form a real calendar date between 1900 and 2999.
pub fn date_string(year: i32, month: u32, day: u32) -> String {
    if !(1900..=2999).contains(&year) {
        return String::new();
    }
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Whether `text` parses as a `year-month-day` calendar date. Padding is
/// not required, so the unpadded query-string form passes too.
pub fn is_valid_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
