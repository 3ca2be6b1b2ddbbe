use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::errors::ValidationError;

/// Date formats accepted on input, tried in order.
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d-%m-%Y"];

/// Parses a date given as `YYYY-MM-DD` or `DD-MM-YYYY` into midnight of that day.
/// Without a date, `or_fn` supplies the value.
pub fn parse_datetime_or(
    date_string: Option<&str>,
    or_fn: impl FnOnce() -> NaiveDateTime,
) -> Result<NaiveDateTime, ValidationError> {
    let Some(ds) = date_string else {
        return Ok(or_fn());
    };

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(ds.trim(), format).ok())
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .ok_or_else(|| ValidationError::InvalidInput(format!("Could not parse date {}", ds)))
}

/// "Now" in UTC, without a timezone.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub mod fixtures {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    /// A fixed datetime for deterministic tests: the moment the iPhone was announced.
    pub fn iphone_launched_at() -> NaiveDateTime {
        NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2007, 1, 9).unwrap_or_default(),
            NaiveTime::from_hms_opt(9, 42, 0).unwrap_or_default(),
        )
    }
}
