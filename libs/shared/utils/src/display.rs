//! Display formatting for date/time wire strings.
//!
//! These functions format already-serialized values for presentation and
//! are deliberately forgiving: malformed input degrades to partial or empty
//! output. They must never be used for validation.

/// Reduce an `"HH:MM[:SS...]"` string to `"HH:MM"`.
///
/// Already-formatted input passes through unchanged.
pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }

    let mut parts = time.splitn(3, ':');
    match (parts.next(), parts.next()) {
        (Some(hours), Some(minutes)) => format!("{}:{}", hours, minutes),
        (Some(hours), None) => hours.to_string(),
        _ => String::new(),
    }
}

/// Reorder a `"YYYY-MM-DD"` string into `"DD/MM/YYYY"`.
///
/// The components are swapped verbatim; nothing checks that the calendar
/// date exists. Input without three dash-separated components (including
/// already-formatted output) passes through unchanged.
pub fn format_date(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = date.splitn(3, '-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{}/{}/{}", day, month, year),
        _ => date.to_string(),
    }
}

/// Format an ISO-style `"YYYY-MM-DDTHH:MM..."` string as
/// `"DD/MM/YYYY HH:MM"`.
///
/// The string is split at the first `'T'`; a missing separator leaves the
/// time half empty and the empty piece propagates into the output.
pub fn format_date_time(date_time: &str) -> String {
    if date_time.is_empty() {
        return String::new();
    }

    let (date, time) = date_time.split_once('T').unwrap_or((date_time, ""));
    format!("{} {}", format_date(date), format_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_date_into_day_first_order() {
        assert_eq!(format_date("2024-03-07"), "07/03/2024");
    }

    #[test]
    fn empty_date_stays_empty() {
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn formats_time_dropping_seconds() {
        assert_eq!(format_time("14:05:00"), "14:05");
    }

    #[test]
    fn empty_time_stays_empty() {
        assert_eq!(format_time(""), "");
    }

    #[test]
    fn formats_date_time_with_single_space() {
        assert_eq!(format_date_time("2024-03-07T14:05:00"), "07/03/2024 14:05");
    }

    #[test]
    fn formatting_is_idempotent() {
        assert_eq!(format_time(&format_time("14:05:00")), "14:05");
        assert_eq!(format_date(&format_date("2024-03-07")), "07/03/2024");
    }

    #[test]
    fn malformed_input_degrades_without_panicking() {
        assert_eq!(format_time("14"), "14");
        assert_eq!(format_date("2024-03"), "2024-03");
        // Missing separator leaves the time half empty.
        assert_eq!(format_date_time("2024-03-07"), "07/03/2024 ");
    }
}
