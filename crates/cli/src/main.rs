use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tally_tui::{AppOptions, theme};
use tally_types::TextDirection;
use tally_util::{UserPreferences, expand_tilde};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "tally.log";

/// Enter an expense amount with a keypad and describe it with suggestion fields.
#[derive(Parser, Debug)]
#[command(name = "tally", version, about)]
struct Cli {
    /// Disable the sign toggle so amounts stay non-negative
    #[arg(long)]
    positive_only: bool,

    /// Show the keypad only while the amount is being edited
    #[arg(long)]
    keypad_on_demand: bool,

    /// Keep suggestion chips visible while fields are not being edited
    #[arg(long)]
    always_show_suggestions: bool,

    /// Lay out labelled inputs right to left
    #[arg(long)]
    rtl: bool,

    /// Theme identifier (dracula, nord, ansi256, ...)
    #[arg(long, value_name = "ID")]
    theme: Option<String>,

    /// Preferences file to read widget defaults from
    #[arg(long, value_name = "PATH")]
    preferences: Option<String>,

    /// Write logs to this file instead of the default location
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Starting amount in minor units
    #[arg(long, value_name = "MINOR_UNITS", allow_negative_numbers = true)]
    amount: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.as_deref().map(expand_tilde).unwrap_or_else(default_log_path);
    init_tracing(&log_path)?;

    let preferences = load_preferences(cli.preferences.as_deref());
    let options = build_options(cli, preferences)?;
    tracing::info!(theme = ?options.theme, amount = options.initial_amount, "Starting tally");

    tally_tui::run(options).await
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_tracing(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn default_log_path() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tally")
        .join(LOG_FILE_NAME)
}

/// Reads preferences, falling back to an in-memory store when the file is
/// unusable.
fn load_preferences(explicit_path: Option<&str>) -> UserPreferences {
    let loaded = match explicit_path {
        Some(path) => UserPreferences::load_from(expand_tilde(path)),
        None => UserPreferences::new(),
    };
    loaded.unwrap_or_else(|error| {
        tracing::warn!(%error, "Preferences unavailable; using defaults");
        UserPreferences::ephemeral()
    })
}

/// Stored preferences first, command-line flags on top.
fn build_options(cli: Cli, preferences: UserPreferences) -> Result<AppOptions> {
    if let Some(requested) = cli.theme.as_deref()
        && theme::catalog::resolve(requested).is_none()
    {
        let known: Vec<&str> = theme::catalog::THEME_DEFINITIONS.iter().map(|definition| definition.id).collect();
        bail!("unknown theme '{requested}' (expected one of: {})", known.join(", "));
    }

    let payload = preferences.payload().clone();
    let mut numeric = payload.numeric;
    numeric.positive_only |= cli.positive_only;
    numeric.only_show_keypad_when_editing |= cli.keypad_on_demand;

    let mut suggestions = payload.suggestions;
    if cli.always_show_suggestions {
        suggestions.show_suggestion_only_when_editing = false;
    }

    let direction = if cli.rtl { TextDirection::RightToLeft } else { TextDirection::LeftToRight };

    Ok(AppOptions {
        numeric,
        suggestions,
        currency: payload.currency,
        initial_amount: cli.amount.unwrap_or_default(),
        direction,
        theme: cli.theme,
        preferences,
    })
}
