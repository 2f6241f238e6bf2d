//! Time calculations for scheduled maintenance.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::server::error::Error;

/// The naive UTC timestamp `days` days before `now`.
///
/// Used as the cutoff when selecting tickets to auto-close and notifications to clean up.
///
/// # Returns
/// - `Ok(NaiveDateTime)` - The cutoff timestamp
/// - `Err(Error::ParseError)` - `days` pushes the timestamp out of the representable range
pub fn cutoff_days_ago(now: DateTime<Utc>, days: i64) -> Result<NaiveDateTime, Error> {
    let duration = Duration::try_days(days)
        .ok_or_else(|| Error::ParseError(format!("{} days is out of range", days)))?;

    now.naive_utc().checked_sub_signed(duration).ok_or_else(|| {
        Error::ParseError(format!(
            "Failed to calculate timestamp {} days before {}",
            days, now
        ))
    })
}
