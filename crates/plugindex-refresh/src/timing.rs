//! Refresh timing helpers.

use chrono::{DateTime, Duration, Utc};

/// The ISO-8601 timestamp for `now + interval_secs`.
#[must_use]
pub fn next_refresh_timestamp(interval_secs: u64) -> String {
    next_refresh_after(Utc::now(), interval_secs)
}

fn next_refresh_after(now: DateTime<Utc>, interval_secs: u64) -> String {
    (now + Duration::seconds(interval_secs as i64)).to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_refresh_is_interval_ahead() {
        let now = DateTime::parse_from_rfc3339("2026-02-17T12:00:00+00:00")
            .expect("parse")
            .with_timezone(&Utc);
        assert_eq!(
            next_refresh_after(now, 3_600),
            "2026-02-17T13:00:00+00:00"
        );
    }
}
