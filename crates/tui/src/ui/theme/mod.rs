//! Theme styling for the widgets.
//!
//! Palettes implement the semantic [`Theme`] trait; widgets only ask for
//! roles (chip, border, muted text) and never hard-code colors.

use std::env;

use tracing::debug;

pub mod catalog;
pub mod palettes;
pub mod roles;
pub mod theme_helpers;

pub use catalog::ThemeDefinition;
pub use palettes::{Ansi256Theme, DraculaTheme, NordTheme};
pub use roles::{Theme, ThemeRoles};

/// Environment variable forcing a theme by id or alias.
pub const THEME_ENV: &str = "TUI_THEME";

/// Theme plus metadata describing how it was selected.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Selects a theme from the environment, then `preferred_theme`, falling back
/// to the indexed palette on terminals without truecolor.
pub fn load(preferred_theme: Option<&str>) -> LoadedTheme {
    if matches!(detect_color_capability(), ColorCapability::Ansi256) {
        debug!("ANSI-only terminal detected; forcing fallback palette");
        return LoadedTheme::from_definition(catalog::default_ansi());
    }

    let requested = env::var(THEME_ENV).ok();
    let candidates = requested.as_deref().into_iter().chain(preferred_theme);
    for name in candidates {
        if let Some(definition) = catalog::resolve(name) {
            return LoadedTheme::from_definition(definition);
        }
        debug!(theme = name, "Unknown theme requested; ignoring");
    }

    LoadedTheme::from_definition(catalog::default_truecolor())
}

fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var("TUI_COLOR_MODE").ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") || term.contains("direct") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}
