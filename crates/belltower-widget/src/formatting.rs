use chrono::NaiveDateTime;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Picks the singular or plural phrase for `count` units.
fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Formats the age of `created` relative to `now` in a human-readable form,
/// e.g. `just now`, `5 minutes ago`, `yesterday` or `3 weeks ago`.
///
/// Timestamps in the future are treated as `just now`.
pub fn relative_time(created: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - created).num_seconds();

    if seconds < MINUTE {
        return "just now".to_string();
    }
    if seconds < HOUR {
        return ago(seconds / MINUTE, "minute");
    }
    if seconds < DAY {
        return ago(seconds / HOUR, "hour");
    }

    let days = seconds / DAY;
    match days {
        1 => "yesterday".to_string(),
        2..=6 => ago(days, "day"),
        7..=30 => ago(days / 7, "week"),
        31..=364 => ago(days / 30, "month"),
        _ => ago(days / 365, "year"),
    }
}
