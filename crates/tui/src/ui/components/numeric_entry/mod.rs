//! Amount keypad: a calculator-style integer entry bound to an owner's value.
//!
//! `state` holds the UI-agnostic controller plus the host-side visibility
//! toggle; `numeric_entry_component` renders the keypad and maps keys and
//! clicks onto keypad operations.

pub mod numeric_entry_component;
pub mod state;

pub use numeric_entry_component::NumericEntryComponent;
pub use state::{KeypadKey, NumericEntryController, NumericEntryState, keypad_rows};
