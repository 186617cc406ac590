/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Whole minutes elapsed between two millisecond timestamps (floored).
///
/// Negative spans clamp to zero; timeline timestamps are monotonically
/// non-decreasing, so a negative span only appears with a skewed clock.
pub fn minutes_between(start_ms: i64, end_ms: i64) -> i64 {
    (end_ms - start_ms).max(0) / 60_000
}
