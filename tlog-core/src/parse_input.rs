use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::entry::{
    Ambiguity, AmbiguityKind, AmbiguityOption, Interpretation, ParseResult, ParsedEntry,
};
use crate::months::Months;
use crate::render::format_duration;

/// Configuration options for parsing functions.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions {
    /// The date used when the line carries no date, and whose year completes
    /// dates written without one.
    pub reference_date: Option<NaiveDate>,
}

/// What a stage pulled off the head of the text, and what it left behind.
pub(crate) struct Extracted<'a, T> {
    value: T,
    matched: &'a str,
    rest: &'a str,
}

type DateExtractor = fn(&Captures, i32) -> Option<NaiveDate>;

struct DatePattern {
    name: &'static str,
    regex: Regex,
    extract: DateExtractor,
}

type DurationExtractor = fn(&Captures) -> Option<u32>;

struct DurationPattern {
    name: &'static str,
    regex: Regex,
    minutes: DurationExtractor,
}

/// Unicode letters reachable in Czech text plus ASCII word characters.
const WORD_CLASS: &str = r"[A-Za-z0-9_\x{00C0}-\x{017F}]";

/// Tried top to bottom, first hit wins. Dated variants come before their
/// year-less counterparts so the year is not left behind in the description.
static DATE_PATTERNS: Lazy<Vec<DatePattern>> = Lazy::new(|| {
    let months = Months::alternation();
    vec![
        DatePattern {
            name: "numeric with year",
            regex: Regex::new(r"^([0-9]{1,2})[./]([0-9]{1,2})[./]([0-9]{2,4})\.?").unwrap(),
            extract: numeric_date,
        },
        DatePattern {
            name: "numeric",
            regex: Regex::new(r"^([0-9]{1,2})[./]([0-9]{1,2})\.?").unwrap(),
            extract: numeric_date,
        },
        DatePattern {
            name: "textual with year",
            regex: Regex::new(&format!(r"(?i)^([0-9]{{1,2}})\s+({months})\s*([0-9]{{2,4}})"))
                .unwrap(),
            extract: textual_date,
        },
        DatePattern {
            name: "textual",
            regex: Regex::new(&format!(r"(?i)^([0-9]{{1,2}})\s+({months})")).unwrap(),
            extract: textual_date,
        },
    ]
});

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})").unwrap());

static DURATION_PATTERNS: Lazy<Vec<DurationPattern>> = Lazy::new(|| {
    vec![
        DurationPattern {
            name: "minutes",
            regex: Regex::new(r"(?i)^([0-9]+)\s*m(?:in)?(?:\s|$)").unwrap(),
            minutes: |caps| caps[1].parse().ok(),
        },
        DurationPattern {
            name: "hours and minutes",
            regex: Regex::new(r"(?i)^([0-9]+)\s*h(?:od)?\s*([0-9]+)\s*m(?:in)?(?:\s|$)").unwrap(),
            minutes: |caps| {
                let hours: u32 = caps[1].parse().ok()?;
                let minutes: u32 = caps[2].parse().ok()?;
                hours.checked_mul(60)?.checked_add(minutes)
            },
        },
        DurationPattern {
            name: "hours",
            regex: Regex::new(r"(?i)^([0-9]+)\s*h(?:od)?(?:\s|$)").unwrap(),
            minutes: |caps| caps[1].parse::<u32>().ok()?.checked_mul(60),
        },
        DurationPattern {
            name: "decimal hours",
            regex: Regex::new(r"(?i)^([0-9]+)[.,]([0-9]+)\s*h(?:od)?(?:\s|$)").unwrap(),
            minutes: decimal_hours,
        },
        DurationPattern {
            name: "colon",
            regex: Regex::new(r"^([0-9]+):([0-9]{2})(?:\s|$)").unwrap(),
            minutes: |caps| {
                let hours: u32 = caps[1].parse().ok()?;
                let minutes: u32 = caps[2].parse().ok()?;
                colon_minutes(hours, minutes)
            },
        },
    ]
});

static HASHTAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("#({WORD_CLASS}+)")).unwrap());

static CLIENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("@({WORD_CLASS}+)")).unwrap());

/// The main entry point: turns one free-text log line into a structured entry.
///
/// Stages run in a fixed order, each one anchored at the head of whatever the
/// previous stage left: date, clock time, duration. Hashtags and client
/// mentions are then collected from the whole remainder and what is left over
/// becomes the description.
///
/// Never fails. Anything a stage does not recognise is passed on untouched,
/// so in the worst case the whole line ends up in the description.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use tlog_core::parse_input::{parse_entry, ParseOptions};
/// let opts = ParseOptions {
///     reference_date: NaiveDate::from_ymd_opt(2025, 3, 1),
/// };
/// let result = parse_entry("22.1. 30m Call with client #work @acme", Some(opts));
///
/// assert_eq!(result.entry.date, NaiveDate::from_ymd_opt(2025, 1, 22).unwrap());
/// assert_eq!(result.entry.duration_minutes, 30);
/// assert_eq!(result.entry.description, "Call with client");
/// assert_eq!(result.entry.hashtags, vec!["work"]);
/// assert_eq!(result.entry.clients, vec!["acme"]);
/// ```
pub fn parse_entry(input: &str, options: Option<ParseOptions>) -> ParseResult {
    let options = options.unwrap_or_default();
    let reference_date = options
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());

    let remaining = input.trim();

    let (date, remaining) = match extract_date(remaining, reference_date.year()) {
        Some(found) => (found.value, found.rest),
        None => (reference_date, remaining),
    };

    let (time, time_token, remaining) = match extract_time(remaining) {
        Some(found) => (Some(found.value), Some(found.matched), found.rest),
        None => (None, None, remaining),
    };

    let (duration, remaining) = match extract_duration(remaining) {
        Some(found) => (Some(found.value), found.rest),
        None => (None, remaining),
    };

    let mut ambiguities = Vec::new();
    if let (Some(time), Some(token), None) = (time, time_token, duration) {
        if let Some(ambiguity) = time_or_duration(token, time) {
            ambiguities.push(ambiguity);
        }
    }

    let entry = ParsedEntry {
        date,
        time,
        duration_minutes: duration.unwrap_or(0),
        description: extract_description(remaining),
        hashtags: extract_hashtags(remaining),
        clients: extract_clients(remaining),
        raw_text: input.to_string(),
    };

    ParseResult { entry, ambiguities }
}

/// Every hashtag body in `text`, in order of appearance.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG_PATTERN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Every `@client` body in `text`, in order of appearance.
pub fn extract_clients(text: &str) -> Vec<String> {
    CLIENT_PATTERN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// `text` without hashtags and mentions, whitespace collapsed and trimmed.
pub fn extract_description(text: &str) -> String {
    let without_tags = HASHTAG_PATTERN.replace_all(text, "");
    let without_clients = CLIENT_PATTERN.replace_all(&without_tags, "");
    without_clients
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A token that reads as a date but names a day that does not exist ends the
/// stage: trying a shorter pattern would move the entry to another year.
fn extract_date(text: &str, reference_year: i32) -> Option<Extracted<'_, NaiveDate>> {
    for pattern in DATE_PATTERNS.iter() {
        let Some(caps) = pattern.regex.captures(text) else {
            continue;
        };
        let end = caps.get(0)?.end();
        if !ends_at_boundary(text, end) {
            trace!("date pattern '{}' glued to following text", pattern.name);
            continue;
        }
        let Some(date) = (pattern.extract)(&caps, reference_year) else {
            debug!("no such date '{}' ({})", &text[..end], pattern.name);
            return None;
        };
        debug!("date {date} from '{}' ({})", &text[..end], pattern.name);
        return Some(Extracted {
            value: date,
            matched: &text[..end],
            rest: text[end..].trim(),
        });
    }
    None
}

pub(crate) fn extract_time(text: &str) -> Option<Extracted<'_, NaiveTime>> {
    let caps = TIME_PATTERN.captures(text)?;
    let end = caps.get(0)?.end();
    if text[end..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    let time = NaiveTime::from_hms_opt(hours, minutes, 0)?;
    debug!("time {} from '{}'", time.format("%H:%M"), &text[..end]);
    Some(Extracted {
        value: time,
        matched: &text[..end],
        rest: text[end..].trim(),
    })
}

pub(crate) fn extract_duration(text: &str) -> Option<Extracted<'_, u32>> {
    DURATION_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.regex.captures(text)?;
        let end = caps.get(0)?.end();
        let minutes = (pattern.minutes)(&caps)?;
        debug!("duration {minutes}m from '{}' ({})", text[..end].trim_end(), pattern.name);
        Some(Extracted {
            value: minutes,
            matched: text[..end].trim_end(),
            rest: text[end..].trim(),
        })
    })
}

/// A lone `H:MM` claimed as a clock time could just as well have been meant
/// as a duration. `0:00` is not: a zero duration is no duration.
fn time_or_duration(token: &str, time: NaiveTime) -> Option<Ambiguity> {
    let caps = TIME_PATTERN.captures(token)?;
    let minutes = colon_minutes(caps[1].parse().ok()?, caps[2].parse().ok()?)?;
    if minutes == 0 {
        return None;
    }
    Some(Ambiguity {
        kind: AmbiguityKind::TimeOrDuration,
        value: token.to_string(),
        options: vec![
            AmbiguityOption {
                label: format!("time {}", time.format("%H:%M")),
                resolved: Interpretation::Time(time),
            },
            AmbiguityOption {
                label: format!("duration {}", format_duration(minutes)),
                resolved: Interpretation::Duration(minutes),
            },
        ],
    })
}

fn numeric_date(caps: &Captures, reference_year: i32) -> Option<NaiveDate> {
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year = parse_year(caps.get(3).map(|m| m.as_str()), reference_year)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn textual_date(caps: &Captures, reference_year: i32) -> Option<NaiveDate> {
    let day: u32 = caps[1].parse().ok()?;
    let month = Months::lookup(&caps[2])?;
    let year = parse_year(caps.get(3).map(|m| m.as_str()), reference_year)?;
    NaiveDate::from_ymd_opt(year, month.number(), day)
}

/// Two-digit years are in this century, a missing year is the reference year.
fn parse_year(year: Option<&str>, reference_year: i32) -> Option<i32> {
    match year {
        None => Some(reference_year),
        Some(y) => {
            let y: i32 = y.parse().ok()?;
            Some(if y < 100 { 2000 + y } else { y })
        }
    }
}

fn decimal_hours(caps: &Captures) -> Option<u32> {
    let hours: f64 = format!("{}.{}", &caps[1], &caps[2]).parse().ok()?;
    let minutes = (hours * 60.0).round();
    if minutes.is_finite() && minutes <= u32::MAX as f64 {
        Some(minutes as u32)
    } else {
        None
    }
}

fn colon_minutes(hours: u32, minutes: u32) -> Option<u32> {
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// A date token ending in `.` is always complete; otherwise it must not run
/// straight into a letter or digit (`1.5h`, `22 ledovec`), nor into a colon
/// (`30 jan 12:00`, where `12` is the hour and not the year).
fn ends_at_boundary(text: &str, end: usize) -> bool {
    if text[..end].ends_with('.') {
        return true;
    }
    !text[end..].starts_with(|c: char| c.is_alphanumeric() || c == ':')
}
