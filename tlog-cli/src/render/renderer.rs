use super::theme::{Chip, OneDark};
use termimad::{MadSkin, crossterm::style::Stylize};
use tlog_core::{
    Interpretation, Locale, ParseResult,
    autocomplete::{AutocompleteQuery, SuggestionKind},
    render::{format_date, format_duration, format_time},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub locale: Locale,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    locale: Locale::default(),
                    use_color: true,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    /// One line per recognised field, then any readings the parser had to
    /// choose between.
    pub fn print_preview(&self, result: &ParseResult) {
        let entry = &result.entry;
        let mut chips = vec![(Chip::Date, format_date(entry.date, self.opts.locale))];
        if let Some(time) = entry.time {
            chips.push((Chip::Time, format_time(time)));
        }
        if entry.duration_minutes > 0 {
            chips.push((Chip::Duration, format_duration(entry.duration_minutes)));
        }
        if !entry.description.is_empty() {
            chips.push((Chip::Description, entry.description.clone()));
        }
        chips.extend(entry.hashtags.iter().map(|t| (Chip::Tag, format!("#{t}"))));
        chips.extend(entry.clients.iter().map(|c| (Chip::Client, format!("@{c}"))));

        for (chip, value) in chips {
            self.print_chip(chip, &value);
        }

        for ambiguity in &result.ambiguities {
            let readings: Vec<&str> = ambiguity
                .options
                .iter()
                .map(|o| o.label.as_str())
                .collect();
            let chosen = match ambiguity.options.first().map(|o| o.resolved) {
                Some(Interpretation::Time(_)) => "time",
                Some(Interpretation::Duration(_)) => "duration",
                None => continue,
            };
            self.print_md(&format!(
                "* `{}` read as {chosen}, could be: {}",
                ambiguity.value,
                readings.join(" / ")
            ));
        }
    }

    fn print_chip(&self, chip: Chip, value: &str) {
        let label = match chip {
            Chip::Date => "date",
            Chip::Time => "time",
            Chip::Duration => "duration",
            Chip::Description => "description",
            Chip::Tag => "tag",
            Chip::Client => "client",
        };
        if self.opts.use_color {
            let label = format!("{label:>11}");
            println!("{} {}", label.dim(), value.with(OneDark::chip(chip)));
        } else {
            println!("{label:>11} {value}");
        }
    }

    pub fn print_autocomplete(&self, query: &AutocompleteQuery) {
        let kind = match query.kind {
            SuggestionKind::Tag => "tag",
            SuggestionKind::Client => "client",
        };
        self.print_info(&format!(
            "Completing {kind} '{}{}' at {}",
            query.kind.sigil(),
            query.prefix,
            query.start
        ));
    }
}
