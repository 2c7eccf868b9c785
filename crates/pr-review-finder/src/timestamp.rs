//! Slack message timestamp formatting.

use chrono::{DateTime, Local};

/// Convert a Slack `ts` (e.g. `"1712345678.000200"`) to `YYYY-MM-DD HH:MM`
/// in local time. Unparseable input is returned as-is.
///
/// Only the part before the first `.` is read, as a float, so exponent
/// forms like `"1.7e9"` lose everything after the dot.
#[must_use]
pub fn format_slack_timestamp(ts: &str) -> String {
    let secs = ts.split('.').next().unwrap_or(ts).trim();
    secs.parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite())
        .and_then(|secs| {
            #[allow(clippy::cast_possible_truncation)]
            let whole = secs.trunc() as i64;
            DateTime::from_timestamp(whole, 0)
        })
        .map_or_else(
            || ts.to_string(),
            |dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        )
}
