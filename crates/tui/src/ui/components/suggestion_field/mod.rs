//! Text field with suggestion chips and a draft/commit protocol.
//!
//! One controller serves three presentation profiles: inline editing, a
//! chips-first modal sheet and an input-first page sheet.

pub mod state;
pub mod suggestion_field_component;

pub use state::{EditingState, SuggestionFieldController, SuggestionFieldState};
pub use suggestion_field_component::SuggestionFieldComponent;
