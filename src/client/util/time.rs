//! Local time math for the daily ZToken reset schedule.
//!
//! The backend is the authority on whether a reset is due. These helpers only compute the
//! nominal schedule (18:00 WIB every day) from a given instant so the UI can display a
//! countdown without a round trip. All arithmetic goes through chrono's `FixedOffset`; WIB
//! has no daylight saving so a fixed UTC+7 offset is exact.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};

use crate::client::error::Error;

/// Western Indonesian Time (UTC+7)
pub const WIB: FixedOffset = match FixedOffset::east_opt(7 * 60 * 60) {
    Some(offset) => offset,
    None => panic!("UTC+7 is within the valid offset range"),
};

/// Hour of day (in WIB) at which the daily reset becomes due
pub const RESET_HOUR: u32 = 18;

/// A daily trigger hour in a fixed time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSchedule {
    pub hour: u32,
    pub offset: FixedOffset,
}

impl Default for ResetSchedule {
    fn default() -> Self {
        Self {
            hour: RESET_HOUR,
            offset: WIB,
        }
    }
}

impl ResetSchedule {
    /// Calculates the next occurrence of the trigger hour relative to `now`.
    ///
    /// # Logic
    /// The next reset is:
    /// - Today at the trigger hour if the current local time is before it
    /// - Tomorrow at the trigger hour if the current local time is at or after it
    ///
    /// Being exactly on the trigger instant therefore rolls to the following day.
    ///
    /// # Arguments
    /// - `now` - Current UTC timestamp to calculate the next reset relative to
    ///
    /// # Returns
    /// - `Ok(DateTime<FixedOffset>)` - The next reset instant expressed in the schedule's zone
    /// - `Err(Error::ParseError)` - The trigger hour is not a valid hour of day or the date overflowed
    ///
    /// # Example
    /// ```ignore
    /// // At 17:59 WIB on 2024-01-15 the next reset is 2024-01-15 18:00 WIB
    /// // At 18:00 WIB on 2024-01-15 the next reset is 2024-01-16 18:00 WIB
    /// let next = ResetSchedule::default().next_reset_time(Utc::now())?;
    /// ```
    pub fn next_reset_time(&self, now: DateTime<Utc>) -> Result<DateTime<FixedOffset>, Error> {
        let local_now = now.with_timezone(&self.offset);
        let today = local_now.date_naive();

        let reset_date = if local_now.hour() >= self.hour {
            today.succ_opt().ok_or_else(|| {
                Error::ParseError(format!("Failed to calculate the day after {}", today))
            })?
        } else {
            today
        };

        self.reset_instant_on(reset_date)
    }

    /// Time remaining from `now` until [`Self::next_reset_time`].
    ///
    /// Always positive: at the trigger instant the next reset is a full day away.
    pub fn time_until_next_reset(&self, now: DateTime<Utc>) -> Result<Duration, Error> {
        let next = self.next_reset_time(now)?;

        Ok(next.with_timezone(&Utc) - now)
    }

    /// Advisory local check of whether today's reset should already have happened.
    ///
    /// The backend's `reset_needed` flag remains authoritative; this is only used to
    /// detect and log disagreement between the two.
    pub fn is_reset_due(&self, now: DateTime<Utc>, last_reset_date: Option<NaiveDate>) -> bool {
        let local_now = now.with_timezone(&self.offset);
        let today = local_now.date_naive();

        local_now.hour() >= self.hour && last_reset_date.map_or(true, |date| date < today)
    }

    fn reset_instant_on(&self, date: NaiveDate) -> Result<DateTime<FixedOffset>, Error> {
        let naive = date.and_hms_opt(self.hour, 0, 0).ok_or_else(|| {
            Error::ParseError(format!("Invalid reset hour: {}", self.hour))
        })?;

        self.offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| Error::ParseError(format!("Ambiguous reset time: {}", naive)))
    }
}

/// Next daily reset instant relative to the wall clock
pub fn get_next_reset_time() -> Result<DateTime<FixedOffset>, Error> {
    ResetSchedule::default().next_reset_time(Utc::now())
}

/// Milliseconds until the next daily reset relative to the wall clock
pub fn get_time_until_next_reset() -> Result<i64, Error> {
    Ok(ResetSchedule::default()
        .time_until_next_reset(Utc::now())?
        .num_milliseconds())
}

/// Renders a fractional number of hours as `"H hours M minutes"`.
///
/// Durations below one hour render minutes only. Negative or non-finite input is
/// treated as zero.
pub fn format_hours_until_reset(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return plural(0, "minute");
    }

    let total_minutes = (hours * 60.0).floor() as i64;
    let whole_hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if whole_hours == 0 {
        plural(minutes, "minute")
    } else {
        format!("{} {}", plural(whole_hours, "hour"), plural(minutes, "minute"))
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}
