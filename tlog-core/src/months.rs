use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// Display language for dates. Parsing always accepts every known month name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    Cs,
    En,
}

/// Every spelling the parser accepts, per month: Czech stems and declensions
/// first, then the English three-letter abbreviation.
const MONTH_NAMES: &[(Month, &[&str])] = &[
    (Month::January, &["led", "leden", "ledna", "jan"]),
    (Month::February, &["úno", "únor", "února", "feb"]),
    (Month::March, &["bře", "březen", "března", "mar"]),
    (Month::April, &["dub", "duben", "dubna", "apr"]),
    (Month::May, &["kvě", "květen", "května", "may"]),
    (Month::June, &["čer", "červen", "června", "jun"]),
    (Month::July, &["červenec", "července", "jul"]),
    (Month::August, &["srp", "srpen", "srpna", "aug"]),
    (Month::September, &["zář", "září", "sep"]),
    (Month::October, &["říj", "říjen", "října", "oct"]),
    (Month::November, &["list", "listopad", "listopadu", "nov"]),
    (Month::December, &["pros", "prosinec", "prosince", "dec"]),
];

impl Month {
    /// Calendar number, 1 for January.
    pub fn number(self) -> u32 {
        Month::iter().position(|m| m == self).unwrap_or(0) as u32 + 1
    }

    pub fn from_number(n: u32) -> Option<Month> {
        n.checked_sub(1).and_then(|i| Month::iter().nth(i as usize))
    }

    /// Short month name used when rendering a date, e.g. `led` / `Jan`.
    pub fn abbreviation(self, locale: Locale) -> &'static str {
        const CS: [&str; 12] = [
            "led", "úno", "bře", "dub", "kvě", "čvn", "čvc", "srp", "zář", "říj", "lis", "pro",
        ];
        const EN: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let i = (self.number() - 1) as usize;
        match locale {
            Locale::Cs => CS[i],
            Locale::En => EN[i],
        }
    }
}

pub struct Months;

impl Months {
    /// Lowercased month name → month. Built once, never written afterwards, so
    /// it can be read from any number of threads.
    fn table() -> &'static HashMap<String, Month> {
        static TABLE: Lazy<HashMap<String, Month>> = Lazy::new(|| {
            MONTH_NAMES
                .iter()
                .flat_map(|(month, names)| names.iter().map(move |n| (n.to_string(), *month)))
                .collect()
        });
        &TABLE
    }

    /// Case-insensitive lookup of a single month name.
    pub fn lookup(name: &str) -> Option<Month> {
        Self::table().get(&name.to_lowercase()).copied()
    }

    /// Regex alternation of all month names, longest first, so a regex engine
    /// that picks the first matching branch prefers `července` over `červen`.
    pub fn alternation() -> &'static str {
        static ALTERNATION: Lazy<String> = Lazy::new(|| {
            let mut names: Vec<&str> = MONTH_NAMES
                .iter()
                .flat_map(|(_, names)| names.iter().copied())
                .collect();
            names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
            names
                .iter()
                .map(|n| regex::escape(n))
                .collect::<Vec<_>>()
                .join("|")
        });
        &ALTERNATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn czech_declensions_resolve_to_same_month() {
        assert_eq!(Months::lookup("led"), Some(Month::January));
        assert_eq!(Months::lookup("leden"), Some(Month::January));
        assert_eq!(Months::lookup("ledna"), Some(Month::January));
        assert_eq!(Months::lookup("června"), Some(Month::June));
        assert_eq!(Months::lookup("července"), Some(Month::July));
        assert_eq!(Months::lookup("listopadu"), Some(Month::November));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Months::lookup("JAN"), Some(Month::January));
        assert_eq!(Months::lookup("Dec"), Some(Month::December));
        assert_eq!(Months::lookup("ŘÍJNA"), Some(Month::October));
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(Months::lookup("january"), None);
        assert_eq!(Months::lookup(""), None);
    }

    #[test]
    fn numbers_round_trip() {
        for month in Month::iter() {
            assert_eq!(Month::from_number(month.number()), Some(month));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn alternation_lists_longer_names_first() {
        let alt = Months::alternation();
        let july = alt.find("července").unwrap();
        let june = alt.find("|červen|").unwrap();
        assert!(july < june);
        assert!(alt.find("listopadu").unwrap() < alt.find("|list|").unwrap());
    }

    #[test]
    fn abbreviations_per_locale() {
        assert_eq!(Month::January.abbreviation(Locale::Cs), "led");
        assert_eq!(Month::July.abbreviation(Locale::Cs), "čvc");
        assert_eq!(Month::July.abbreviation(Locale::En), "Jul");
    }

    #[test]
    fn locale_from_str() {
        assert_eq!(Locale::from_str("cs").unwrap(), Locale::Cs);
        assert_eq!(Locale::from_str("EN").unwrap(), Locale::En);
        assert!(Locale::from_str("de").is_err());
    }
}
