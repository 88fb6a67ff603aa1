use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use strum_macros::AsRefStr;

/// One log line after parsing. A throwaway value: every call to the parser
/// builds a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub duration_minutes: u32,
    pub description: String,
    pub hashtags: Vec<String>,
    pub clients: Vec<String>,
    /// The input exactly as it was given to the parser.
    pub raw_text: String,
}

impl ParsedEntry {
    /// An entry may be submitted only when some free text survived extraction.
    pub fn is_valid(&self) -> bool {
        !self.description.is_empty()
    }

    pub fn payload(&self) -> EntryPayload {
        EntryPayload {
            raw_text: self.raw_text.clone(),
            // NaiveDate carries the local calendar day, no UTC shift can sneak in.
            date: self.date.format("%Y-%m-%d").to_string(),
            time: self.time.map(|t| t.format("%H:%M").to_string()),
            duration_minutes: self.duration_minutes,
            description: self.description.clone(),
            hashtags: self.hashtags.clone(),
            clients: self.clients.clone(),
        }
    }
}

/// Body of a create/update call to the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPayload {
    pub raw_text: String,
    pub date: String,
    pub time: Option<String>,
    pub duration_minutes: u32,
    pub description: String,
    pub hashtags: Vec<String>,
    pub clients: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AmbiguityKind {
    TimeOrDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    Time(NaiveTime),
    Duration(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguityOption {
    pub label: String,
    pub resolved: Interpretation,
}

/// A token the parser could have read in more than one way. `options[0]` is
/// the reading that ended up in the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub kind: AmbiguityKind,
    pub value: String,
    pub options: Vec<AmbiguityOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub entry: ParsedEntry,
    pub ambiguities: Vec<Ambiguity>,
}
