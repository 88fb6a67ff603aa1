mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::debug;
use render::{ColorMode, RenderOptions, Renderer};
use std::io::{self, IsTerminal, Write};
use std::{
    fs,
    process::{Command, ExitCode},
};
use tlog_core::{Config, Locale, Tlog, autocomplete::detect_autocomplete};

/// tlog: parse one-line time log entries
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Print the payload sent to storage as JSON instead of the preview.
    #[arg(long, conflicts_with = "complete")]
    json: bool,
    /// Date used as "today" (e.g. `--today 2025-01-31`).
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Language of rendered dates: `cs` or `en`.
    #[arg(long, env = "TLOG_LOCALE")]
    locale: Option<Locale>,
    /// Opens your $EDITOR with the text so it can be changed before parsing.
    #[arg(long, short)]
    edit: bool,
    /// Show which tag or client is being typed at this char position of the text.
    #[arg(long, value_name = "CURSOR")]
    complete: Option<usize>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
    /// The log line (e.g., `tlog 22.1. 30m Client call #project @client`).
    #[arg()]
    text: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tlog: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(today) = cli.today {
        config.reference_date = today;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    let tlog = Tlog::with_config(config);

    let use_color = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                false
            } else {
                io::stdout().is_terminal()
            }
        }
    };
    let renderer = Renderer::new(Some(RenderOptions {
        locale: tlog.config.locale,
        use_color,
    }));

    let mut text = cli.text.join(" ");

    if let Some(cursor) = cli.complete {
        match detect_autocomplete(&text, cursor) {
            Some(query) => renderer.print_autocomplete(&query),
            None => renderer.print_info("Nothing to complete at the cursor."),
        }
        return Ok(());
    }

    if cli.edit || text.is_empty() {
        let editor = resolve_editor(&tlog);
        debug!("opening editor {editor}");
        text = create_editor_buffer(&editor, &text)?;
    }
    // The file an editor saves usually ends with a newline.
    let text = text.trim_end_matches(['\n', '\r']);
    if text.trim().is_empty() {
        renderer.print_info("Nothing to parse, because no text was received.");
        return Ok(());
    }

    if cli.json {
        let payload = tlog.submission(text)?;
        let json = serde_json::to_string_pretty(&payload).context("serializing payload")?;
        println!("{json}");
        return Ok(());
    }

    let result = tlog.parse_user_input(text);
    renderer.print_preview(&result);
    tlog.validate(&result.entry)?;
    Ok(())
}

fn resolve_editor(t: &Tlog) -> String {
    t.config
        .editor
        .as_deref()
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

/// Opens `editor_cmd` on a temp file holding `initial` and returns what was saved.
fn create_editor_buffer(editor_cmd: &str, initial: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("tlog")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(initial.as_bytes())
        .context("writing text to edit")?;
    file.flush()?;

    let path = file.path().to_path_buf();
    let status = Command::new(editor_cmd).arg(&path).status()?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(fs::read_to_string(&path)?)
}

