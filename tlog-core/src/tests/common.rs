use crate::Config;
use crate::config::DEFAULT_MAX_DURATION_MINUTES;
use crate::months::Locale;
use chrono::{Local, NaiveDate};

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(reference_date: Option<NaiveDate>) -> Config {
    Config {
        locale: Locale::Cs,
        editor: None,
        max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
        reference_date: reference_date.unwrap_or(Local::now().date_naive()),
    }
}
