pub mod autocomplete;
pub mod config;
pub mod entry;
pub mod months;
pub mod parse_input;
pub mod render;
pub mod tlog;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use entry::{Ambiguity, AmbiguityKind, EntryPayload, Interpretation, ParseResult, ParsedEntry};
pub use months::Locale;
pub use parse_input::{ParseOptions, parse_entry};
pub use tlog::{EntryError, Tlog};
