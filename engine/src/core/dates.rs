//! Calendar and duration primitives shared by the analytics modules.
//!
//! All calendar math is UTC. Nothing here reads a clock; callers pass the
//! current instant so every derivation stays reproducible.

use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

/// True when `ts` falls inside the trailing `days`-day window ending at `now`.
pub fn within_last_days(ts: OffsetDateTime, days: i64, now: OffsetDateTime) -> bool {
    ts > now - Duration::days(days)
}

/// Midnight UTC of the current week's Sunday. Every weekly computation goes
/// through this boundary.
pub fn start_of_week(now: OffsetDateTime) -> OffsetDateTime {
    let back = Duration::days(i64::from(now.date().weekday().number_days_from_sunday()));
    (now.date() - back).midnight().assume_utc()
}

/// Whole days between two instants, truncated toward zero.
pub fn day_diff(later: OffsetDateTime, earlier: OffsetDateTime) -> i64 {
    (later - earlier).whole_days()
}

/// Consecutive-day practice streak, walking backward from today.
///
/// Timestamps are visited newest first with a day cursor starting at today's
/// date. A timestamp on the cursor day or the day before it counts and steps
/// the cursor back one day; anything else is skipped without resetting the
/// streak. A duplicate that entered through the previous-day branch leaves
/// the cursor on its own day and therefore counts twice; duplicates on today
/// do not.
pub fn practice_streak(timestamps: &[OffsetDateTime], now: OffsetDateTime) -> u32 {
    let mut sorted = timestamps.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 0;
    let mut cursor = now.date();
    for ts in sorted {
        let day = ts.date();
        if day == cursor || cursor.previous_day() == Some(day) {
            streak += 1;
            match cursor.previous_day() {
                Some(previous) => cursor = previous,
                None => break,
            }
        }
    }
    streak
}

/// `DD/MM` axis label from a user-entered `YYYY-MM-DD` date. Falls back to
/// the raw value when it does not parse.
pub fn day_month_label(date: &str) -> String {
    Date::parse(date, &format_description!("[year]-[month]-[day]"))
        .map(|d| format!("{:02}/{:02}", d.day(), u8::from(d.month())))
        .unwrap_or_else(|_| date.to_string())
}
