//! Synthetic Ramadan schedule
//!
//! Pure functions of the fixed Ramadan 1447 start date. Fajr drifts one
//! minute earlier every three days from 04:55, maghrib one minute later from
//! 17:45, and isha trails maghrib by 75 minutes. No geolocation and no
//! external calendar service are involved.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::utils::arabic::format_time_12h;

/// First day of Ramadan 1447 AH, local midnight.
pub static RAMADAN_START: Lazy<NaiveDateTime> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(2026, 2, 18)
        .expect("valid Ramadan 1447 start date")
        .and_hms_opt(0, 0, 0)
        .expect("valid midnight")
});

pub const RAMADAN_DAYS: u32 = 30;

const FAJR_BASE_MINUTES: u32 = 4 * 60 + 55;
const MAGHRIB_BASE_MINUTES: u32 = 17 * 60 + 45;
const ISHA_OFFSET_MINUTES: u32 = 75;

/// One row of the printed timetable. Times are Arabic display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRow {
    pub day: u32,
    pub date: NaiveDate,
    pub fajr: String,
    pub maghrib: String,
    pub isha: String,
}

/// Remaining time until the start of Ramadan. All zeros once it has begun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub const ZERO: Countdown = Countdown {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };
}

fn format_minutes(total: u32) -> String {
    format_time_12h(total / 60, total % 60)
}

/// The full 30-day schedule.
pub fn schedule() -> Vec<TimetableRow> {
    (0..RAMADAN_DAYS)
        .map(|i| {
            let date = RAMADAN_START.date() + Duration::days(i as i64);
            let drift = i / 3;
            let maghrib = MAGHRIB_BASE_MINUTES + drift;
            TimetableRow {
                day: i + 1,
                date,
                fajr: format_minutes(FAJR_BASE_MINUTES - drift),
                maghrib: format_minutes(maghrib),
                isha: format_minutes(maghrib + ISHA_OFFSET_MINUTES),
            }
        })
        .collect()
}

/// 1-based Ramadan day index for `now`. Zero or negative before the start,
/// above 30 after the month ends; callers clamp for display.
pub fn ramadan_day(now: NaiveDateTime) -> i64 {
    let secs = (now - *RAMADAN_START).num_seconds();
    secs.div_euclid(86_400) + 1
}

/// Today's row, or the first row when `now` falls outside the month.
pub fn today_row(now: NaiveDateTime, rows: &[TimetableRow]) -> TimetableRow {
    let day = ramadan_day(now);
    rows.iter()
        .find(|row| i64::from(row.day) == day)
        .or_else(|| rows.first())
        .cloned()
        .unwrap_or_else(|| TimetableRow {
            day: 1,
            date: RAMADAN_START.date(),
            fajr: format_minutes(FAJR_BASE_MINUTES),
            maghrib: format_minutes(MAGHRIB_BASE_MINUTES),
            isha: format_minutes(MAGHRIB_BASE_MINUTES + ISHA_OFFSET_MINUTES),
        })
}

/// Countdown to the start of Ramadan.
pub fn countdown(now: NaiveDateTime) -> Countdown {
    let diff = *RAMADAN_START - now;
    if diff <= Duration::zero() {
        return Countdown::ZERO;
    }

    Countdown {
        days: diff.num_days(),
        hours: diff.num_hours() % 24,
        minutes: diff.num_minutes() % 60,
        seconds: diff.num_seconds() % 60,
    }
}
