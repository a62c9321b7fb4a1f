//! Construction-time configuration for the input widgets.
//!
//! Every type here is serializable so the preferences file can carry widget
//! defaults. Unknown or missing fields fall back to [`Default`].

use serde::{Deserialize, Serialize};

use crate::error::KeypadOperation;

/// Decides what happens when digit accumulation leaves the `i64` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Leave the value untouched and report `EntryError::ArithmeticOverflow`.
    #[default]
    Reject,
    /// Clamp to `i64::MAX` or `i64::MIN` according to the sign.
    Saturate,
}

/// Per-operation switch for tactile feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackPolicy {
    pub digit: bool,
    pub double_zero: bool,
    pub sign_toggle: bool,
    pub clear: bool,
}

impl Default for FeedbackPolicy {
    fn default() -> Self {
        Self {
            digit: true,
            double_zero: true,
            sign_toggle: false,
            clear: true,
        }
    }
}

impl FeedbackPolicy {
    /// Feedback on every mutating operation, sign toggle included.
    pub fn uniform() -> Self {
        Self {
            sign_toggle: true,
            ..Self::default()
        }
    }

    /// No feedback at all.
    pub fn silent() -> Self {
        Self {
            digit: false,
            double_zero: false,
            sign_toggle: false,
            clear: false,
        }
    }

    pub fn emits(&self, operation: KeypadOperation) -> bool {
        match operation {
            KeypadOperation::Digit(_) => self.digit,
            KeypadOperation::DoubleZero => self.double_zero,
            KeypadOperation::SignToggle => self.sign_toggle,
            KeypadOperation::Clear => self.clear,
        }
    }
}

/// Configuration of the amount keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericEntryConfig {
    /// Disables the sign toggle and negative accumulation.
    pub positive_only: bool,
    /// Render the keypad only while the amount is being edited.
    pub only_show_keypad_when_editing: bool,
    pub feedback: FeedbackPolicy,
    pub overflow: OverflowPolicy,
}

/// How a suggestion field presents its editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationStyle {
    /// Edits in place; submitting keeps focus.
    #[default]
    Inline,
    /// Sheet with suggestion chips first and the free-text input below.
    Modal,
    /// Plain page with the input first; chips carry no selection highlight.
    Page,
}

impl PresentationStyle {
    /// Modal and page profiles open a sheet when activated.
    pub fn is_sheet(self) -> bool {
        !matches!(self, PresentationStyle::Inline)
    }
}

/// Configuration of a suggestion field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionFieldConfig {
    pub label: Option<String>,
    pub suggestions: Vec<String>,
    pub show_suggestion_only_when_editing: bool,
    pub presentation: PresentationStyle,
}

impl Default for SuggestionFieldConfig {
    fn default() -> Self {
        Self {
            label: None,
            suggestions: Vec::new(),
            show_suggestion_only_when_editing: true,
            presentation: PresentationStyle::Inline,
        }
    }
}

impl SuggestionFieldConfig {
    pub fn new<I, S>(label: Option<&str>, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.map(str::to_string),
            suggestions: suggestions.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_presentation(mut self, presentation: PresentationStyle) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_show_suggestion_only_when_editing(mut self, value: bool) -> Self {
        self.show_suggestion_only_when_editing = value;
        self
    }
}

/// Reading direction of a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    pub fn flipped(self) -> Self {
        match self {
            TextDirection::LeftToRight => TextDirection::RightToLeft,
            TextDirection::RightToLeft => TextDirection::LeftToRight,
        }
    }
}

/// How amounts stored in minor units are displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    /// Number of fractional digits the stored integer carries.
    pub minor_digits: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            minor_digits: 2,
        }
    }
}
