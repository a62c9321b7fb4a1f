//! Shared vocabulary for the Tally input widgets.
//!
//! The controllers in `tally-tui` speak in the types defined here: values are
//! reached through a [`Binding`], host-facing side effects are reported as
//! [`Effect`]s, and rejected operations surface as [`EntryError`].

pub mod binding;
pub mod config;
pub mod effect;
pub mod error;

pub use binding::Binding;
pub use config::{
    CurrencyFormat, FeedbackPolicy, NumericEntryConfig, OverflowPolicy, PresentationStyle, SuggestionFieldConfig, TextDirection,
};
pub use effect::{Effect, FeedbackStyle, Msg};
pub use error::{EntryError, KeypadOperation};
