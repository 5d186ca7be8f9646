//! Resolves the configured canonical timezone name to concrete local times.

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Look up the UTC offset for a canonical timezone name, e.g. "Asia/Kolkata".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current wall-clock date and time in the given timezone.
///
/// Query-time date ranges ("past week" etc.) and future-date validation are
/// both evaluated against this value.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if `canonical_timezone` does not name a
/// known timezone.
pub fn now_local(canonical_timezone: &str) -> Result<PrimitiveDateTime, Error> {
    let Some(local_offset) = get_local_offset(canonical_timezone) else {
        tracing::error!("Invalid timezone {}", canonical_timezone);
        return Err(Error::InvalidTimezone(canonical_timezone.to_owned()));
    };

    let now = OffsetDateTime::now_utc().to_offset(local_offset);
    Ok(PrimitiveDateTime::new(now.date(), now.time()))
}
