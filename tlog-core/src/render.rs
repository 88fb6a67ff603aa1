//! Display helpers, the inverse direction of the parser.
//!
//! Duration:  `0m`, `45m`, `1h`, `1h 30m`
//! Date:      `22. led 2025` (cs) or `22 Jan 2025` (en)
//! Canonical: `22.1.2025 8:00 30m Call #work @acme`

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::entry::ParsedEntry;
use crate::months::{Locale, Month};
use crate::parse_input::{extract_duration, extract_time};

pub fn format_duration(minutes: u32) -> String {
    if minutes == 0 {
        return "0m".to_string();
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Medium-length date for preview chips. Not meant to be parsed back.
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    let month = Month::from_number(date.month())
        .map(|m| m.abbreviation(locale))
        .unwrap_or_default();
    match locale {
        Locale::Cs => format!("{}. {} {}", date.day(), month, date.year()),
        Locale::En => format!("{} {} {}", date.day(), month, date.year()),
    }
}

/// `HH:MM`
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Lays an entry out in the order the parser consumes it, so re-parsing the
/// line gives back the same date, time, duration, tags and clients.
///
/// A zero duration is written out as `0m` only when the description starts
/// with something the time or duration stage would otherwise claim.
pub fn format_canonical(entry: &ParsedEntry) -> String {
    let date = entry.date;
    let mut parts = vec![format!("{}.{}.{}", date.day(), date.month(), date.year())];
    if let Some(time) = entry.time {
        parts.push(format!("{}:{:02}", time.hour(), time.minute()));
    }
    let shields_description = (entry.time.is_none() && extract_time(&entry.description).is_some())
        || extract_duration(&entry.description).is_some();
    if entry.duration_minutes > 0 || shields_description {
        parts.push(format!("{}m", entry.duration_minutes));
    }
    if !entry.description.is_empty() {
        parts.push(entry.description.clone());
    }
    parts.extend(entry.hashtags.iter().map(|tag| format!("#{tag}")));
    parts.extend(entry.clients.iter().map(|client| format!("@{client}")));
    parts.join(" ")
}
