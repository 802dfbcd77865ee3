//! Tests for ResetSchedule::next_reset_time.

use chrono::{FixedOffset, TimeZone, Utc};

use super::*;
use crate::client::{
    error::Error,
    util::time::{ResetSchedule, WIB},
};

/// Tests the minute before the trigger hour.
///
/// Expected: 18:00 WIB on the same day
#[test]
fn returns_today_before_trigger_hour() {
    let next = ResetSchedule::default()
        .next_reset_time(wib(15, 17, 59, 0))
        .unwrap();

    assert_eq!(next, WIB.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap());
}

/// Tests exactly the trigger instant.
///
/// Being on the trigger hour counts as "at or after", so the next reset
/// rolls to the following day.
///
/// Expected: 18:00 WIB on the next day
#[test]
fn rolls_to_tomorrow_at_trigger_instant() {
    let next = ResetSchedule::default()
        .next_reset_time(wib(15, 18, 0, 0))
        .unwrap();

    assert_eq!(next, WIB.with_ymd_and_hms(2024, 1, 16, 18, 0, 0).unwrap());
}

/// Tests the minute after the trigger hour.
///
/// Expected: 18:00 WIB on the next day
#[test]
fn rolls_to_tomorrow_after_trigger_hour() {
    let next = ResetSchedule::default()
        .next_reset_time(wib(15, 18, 1, 0))
        .unwrap();

    assert_eq!(next, WIB.with_ymd_and_hms(2024, 1, 16, 18, 0, 0).unwrap());
}

/// Tests that the WIB date is used rather than the UTC date.
///
/// 20:00 UTC on the 14th is already 03:00 WIB on the 15th.
///
/// Expected: 18:00 WIB on the 15th
#[test]
fn uses_wib_calendar_date() {
    let now = Utc.with_ymd_and_hms(2024, 1, 14, 20, 0, 0).unwrap();

    let next = ResetSchedule::default().next_reset_time(now).unwrap();

    assert_eq!(next, WIB.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap());
    assert_eq!(
        next.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap()
    );
}

/// Tests rolling over a month boundary.
///
/// Expected: 18:00 WIB on February 1st
#[test]
fn rolls_over_month_boundary() {
    let next = ResetSchedule::default()
        .next_reset_time(wib(31, 23, 30, 0))
        .unwrap();

    assert_eq!(next, WIB.with_ymd_and_hms(2024, 2, 1, 18, 0, 0).unwrap());
}

/// Tests a custom schedule in another zone.
///
/// Expected: next 06:00 UTC+0 after 07:00 UTC is the following day
#[test]
fn supports_custom_schedule() {
    let schedule = ResetSchedule {
        hour: 6,
        offset: FixedOffset::east_opt(0).unwrap(),
    };
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 7, 0, 0).unwrap();

    let next = schedule.next_reset_time(now).unwrap();

    assert_eq!(
        next.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2024, 1, 16, 6, 0, 0).unwrap()
    );
}

/// Tests an invalid trigger hour.
///
/// Expected: Err(Error::ParseError)
#[test]
fn fails_for_invalid_hour() {
    let schedule = ResetSchedule {
        hour: 24,
        offset: WIB,
    };

    let result = schedule.next_reset_time(wib(15, 12, 0, 0));

    assert!(matches!(result, Err(Error::ParseError(_))));
}
