//! Date and duration formatting helpers.

use chrono::{DateTime, TimeDelta, Utc};

/// Calendar date in `YYYY-MM-DD` form.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Elapsed time in minutes and seconds, e.g. `2m 05s`.
pub fn format_duration(elapsed: TimeDelta) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{}m {:02}s", secs / 60, secs % 60)
}
