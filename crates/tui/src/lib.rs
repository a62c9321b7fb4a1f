//! # Tally terminal widgets
//!
//! Two reusable input widgets and a terminal host for them:
//!
//! - an amount keypad ([`NumericEntryController`]) that accumulates keypad
//!   presses into an integer owned by the caller,
//! - a suggestion field ([`SuggestionFieldController`]) with a draft/commit
//!   protocol and inline, modal or page presentation.
//!
//! The controllers are UI-agnostic: callers hand them a
//! [`Binding`](tally_types::Binding) into their own state and receive
//! [`Effect`](tally_types::Effect)s to carry out. [`run`] hosts both widgets in
//! a ratatui form.

mod app;
mod ui;

use anyhow::Result;

pub use app::AppOptions;
pub use ui::components::numeric_entry::{KeypadKey, NumericEntryController, NumericEntryState, keypad_rows};
pub use ui::components::suggestion_field::{EditingState, SuggestionFieldController, SuggestionFieldState};
pub use ui::theme;

/// Runs the terminal form until the user quits with Ctrl+C.
///
/// # Errors
///
/// Fails when the terminal cannot be switched into raw mode or the alternate
/// screen, or when drawing fails.
pub async fn run(options: AppOptions) -> Result<()> {
    ui::runtime::run_app(options).await
}
