use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use log::{debug, warn};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::months::Locale;

/// One day, the ceiling upstream validation puts on a single entry.
pub const DEFAULT_MAX_DURATION_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Language used to render dates in previews. Parsing accepts all of them.
    pub locale: Locale,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// Entries at or above this many minutes are refused on submission.
    pub max_duration_minutes: u32,
    /// "Today" for lines without a date. Never read from the config file.
    pub reference_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    locale: Option<String>,
    editor: Option<String>,
    max_duration_minutes: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_config(FileConfig::default())
    }
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native)
    /// and apply defaults. A config file that cannot be read or parsed is
    /// reported and ignored.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|e| {
            warn!("ignoring config file: {e:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    /// Load a specific config file. Unlike [`Config::load`], any problem with
    /// the file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file_config =
            Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let locale = file_config
            .locale
            .as_deref()
            .and_then(Self::parse_locale)
            .unwrap_or_default();

        Self {
            locale,
            editor: file_config.editor,
            max_duration_minutes: file_config
                .max_duration_minutes
                .unwrap_or(DEFAULT_MAX_DURATION_MINUTES),
            reference_date: Local::now().date_naive(),
        }
    }

    fn parse_locale(locale: &str) -> Option<Locale> {
        match Locale::from_str(locale) {
            Ok(l) => Some(l),
            Err(_) => {
                warn!("unknown locale '{locale}', using the default");
                None
            }
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("tlog").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("tlog").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            debug!("reading config from {}", path.display());
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b.home_dir().join(".config").join("tlog").join("config.toml");
            let expected_native = b.config_dir().join("tlog").join("config.toml");
            let c = super::Config::config_file_paths();
            assert_eq!(c.get(0), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_all_keys() {
        let toml = r#"
            locale = "en"
            editor = "hx"
            max_duration_minutes = 600
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        assert_eq!(fc.locale.as_deref(), Some("en"));
        assert_eq!(fc.editor.as_deref(), Some("hx"));
        assert_eq!(fc.max_duration_minutes, Some(600));
    }

    #[test]
    fn defaults_apply_for_missing_keys() {
        let c = Config::default();
        assert_eq!(c.locale, Locale::Cs);
        assert!(c.editor.is_none());
        assert_eq!(c.max_duration_minutes, 1440);
        assert_eq!(c.reference_date, Local::now().date_naive());
    }

    #[test]
    fn unknown_locale_falls_back_to_default() {
        let fc = super::Config::parse_file(r#"locale = "klingon""#).unwrap();
        let c = Config::from_file_config(fc);
        assert_eq!(c.locale, Locale::Cs);
    }

    #[test]
    fn load_from_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "locale = \"EN\"\neditor = \"nano\"").unwrap();
        let c = Config::load_from(file.path()).unwrap();
        assert_eq!(c.locale, Locale::En);
        assert_eq!(c.editor.as_deref(), Some("nano"));
        assert_eq!(c.max_duration_minutes, DEFAULT_MAX_DURATION_MINUTES);
    }

    #[test]
    fn load_from_reports_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_duration_minutes = \"lots\"").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }

    #[test]
    fn load_from_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{err}").starts_with("reading"));
    }
}
