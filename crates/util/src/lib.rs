//! Utilities shared by the Tally binary and terminal widgets.

pub mod currency;
pub mod path_processing;
pub mod preferences;

pub use currency::format_amount;
pub use path_processing::expand_tilde;
pub use preferences::{PreferencesError, PreferencesPayload, UserPreferences};
