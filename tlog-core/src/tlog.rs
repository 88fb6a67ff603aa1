use crate::{
    Config,
    entry::{EntryPayload, ParseResult, ParsedEntry},
    parse_input::{ParseOptions, parse_entry},
};
use anyhow::Result;
use log::debug;
use std::fmt;

/// Why a parsed entry cannot be submitted. The parser itself never produces
/// these; they are the policy applied on top of its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    EmptyDescription,
    DurationTooLong { minutes: u32, max: u32 },
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryError::EmptyDescription => write!(f, "entry has no description"),
            EntryError::DurationTooLong { minutes, max } => {
                write!(f, "duration of {minutes} minutes must be below {max}")
            }
        }
    }
}

impl std::error::Error for EntryError {}

pub struct Tlog {
    pub config: Config,
}

impl Tlog {
    /// Creates a new `Tlog` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    /// Creates a new `Tlog` instance with a specific `Config`.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Parses one line against the configured reference date. Used both for
    /// fresh input and for re-parsing an edited `raw_text`.
    pub fn parse_user_input(&self, input: &str) -> ParseResult {
        let opts = ParseOptions {
            reference_date: Some(self.config.reference_date),
        };
        parse_entry(input, Some(opts))
    }

    pub fn validate(&self, entry: &ParsedEntry) -> Result<(), EntryError> {
        if !entry.is_valid() {
            return Err(EntryError::EmptyDescription);
        }
        let max = self.config.max_duration_minutes;
        if entry.duration_minutes >= max {
            return Err(EntryError::DurationTooLong {
                minutes: entry.duration_minutes,
                max,
            });
        }
        Ok(())
    }

    /// Parse, validate and build what the storage layer receives.
    pub fn submission(&self, input: &str) -> Result<EntryPayload> {
        let result = self.parse_user_input(input);
        self.validate(&result.entry)?;
        debug!("submitting entry for {}", result.entry.date);
        Ok(result.entry.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mk_config;
    use chrono::{NaiveDate, NaiveTime};

    fn mk_tlog() -> Tlog {
        Tlog::with_config(mk_config(NaiveDate::from_ymd_opt(2025, 8, 15)))
    }

    #[test]
    fn uses_configured_reference_date() {
        let tlog = mk_tlog();
        let p = tlog.parse_user_input("Coffee with team").entry;
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());

        let p = tlog.parse_user_input("3.2. Coffee").entry;
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
    }

    #[test]
    fn reparsing_edited_text_replaces_fields() {
        let tlog = mk_tlog();
        let first = tlog.parse_user_input("8:00 30m Standup #team").entry;
        let edited = tlog.parse_user_input("9:00 45m Standup #team @acme").entry;
        assert_eq!(first.time, NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(edited.time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(edited.duration_minutes, 45);
        assert_eq!(edited.clients, vec!["acme"]);
        assert_eq!(edited.raw_text, "9:00 45m Standup #team @acme");
    }

    #[test]
    fn validate_rejects_empty_description() {
        let tlog = mk_tlog();
        let p = tlog.parse_user_input("22.1. 30m #work @acme").entry;
        assert_eq!(tlog.validate(&p), Err(EntryError::EmptyDescription));
    }

    #[test]
    fn validate_rejects_full_day() {
        let tlog = mk_tlog();
        let p = tlog.parse_user_input("24h Marathon").entry;
        assert_eq!(
            tlog.validate(&p),
            Err(EntryError::DurationTooLong {
                minutes: 1440,
                max: 1440
            })
        );
        let p = tlog.parse_user_input("23:59 Late").entry;
        assert!(tlog.validate(&p).is_ok());
    }

    #[test]
    fn submission_builds_payload() {
        let tlog = mk_tlog();
        let payload = tlog
            .submission("22.1. 8:00 1,5h Client call #work @acme")
            .expect("valid entry");
        assert_eq!(payload.date, "2025-01-22");
        assert_eq!(payload.time.as_deref(), Some("08:00"));
        assert_eq!(payload.duration_minutes, 90);
        assert_eq!(payload.description, "Client call");
        assert_eq!(payload.raw_text, "22.1. 8:00 1,5h Client call #work @acme");
    }

    #[test]
    fn submission_error_message() {
        let tlog = mk_tlog();
        let err = tlog.submission("30m #only @tags").unwrap_err();
        assert_eq!(err.to_string(), "entry has no description");
    }
}
