//! Calendar-month window helpers shared by the listing and delta endpoints.

use serde::Deserialize;
use time::{Date, Month, OffsetDateTime, UtcOffset};

use crate::Error;

/// The optional `?month=M&year=Y` query parameters.
///
/// The original web client sends both or neither, so if either is missing
/// the pair falls back to the current local month.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct MonthQuery {
    /// The month to select, 1-12.
    pub month: Option<u8>,
    /// The year to select.
    pub year: Option<i32>,
}

impl MonthQuery {
    /// The (month, year) pair to use, defaulting to the current month in the
    /// given local offset.
    pub fn resolve(self, local_offset: UtcOffset) -> (u8, i32) {
        match (self.month, self.year) {
            (Some(month), Some(year)) => (month, year),
            _ => {
                let today = OffsetDateTime::now_utc().to_offset(local_offset).date();
                (today.month() as u8, today.year())
            }
        }
    }
}

/// The half-open date range `[first day of month, first day of next month)`.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `month` is not in 1-12 or the year is
/// out of the representable range.
pub fn month_window(month: u8, year: i32) -> Result<(Date, Date), Error> {
    let invalid = || Error::InvalidMonth { month, year };

    let month = Month::try_from(month).map_err(|_| invalid())?;
    let start = Date::from_calendar_date(year, month, 1).map_err(|_| invalid())?;
    let end = match month {
        Month::December => Date::from_calendar_date(year + 1, Month::January, 1),
        month => Date::from_calendar_date(year, month.next(), 1),
    }
    .map_err(|_| invalid())?;

    Ok((start, end))
}
