//! UI components: the amount keypad and suggestion fields.

pub mod common;
pub mod component;
pub mod numeric_entry;
pub mod suggestion_field;

pub use component::*;
pub use numeric_entry::NumericEntryComponent;
pub use suggestion_field::SuggestionFieldComponent;
