//! Reading timestamps: defaults and display.
//!
//! Timestamps travel through the calculator as the strings they were given
//! in; only presentation parses them.

use chrono::{DateTime, Local, NaiveDateTime};

/// Format of timestamps produced by the input form.
pub const FORM_FORMAT: &str = "%Y-%m-%dT%H:%M";

const DISPLAY_FORMAT: &str = "%-d %b %Y, %-I:%M %P";

/// The current local time, formatted as the input form would.
pub fn now_local() -> String {
    Local::now().format(FORM_FORMAT).to_string()
}

/// Parse a form timestamp, with or without seconds, or an RFC 3339 time.
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, FORM_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|t| t.naive_local())
        })
}

/// Human-readable form of a timestamp, e.g. "14 Nov 2024, 8:30 am".
///
/// Missing timestamps show as "N/A"; unparseable ones are shown as given.
pub fn display(timestamp: Option<&str>) -> String {
    match timestamp {
        None => "N/A".to_owned(),
        Some(s) if s.trim().is_empty() => "N/A".to_owned(),
        Some(s) => match parse(s) {
            Some(t) => t.format(DISPLAY_FORMAT).to_string(),
            None => {
                tracing::debug!("could not parse timestamp {:?}", s);
                s.to_owned()
            }
        },
    }
}
