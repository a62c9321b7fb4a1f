use std::fmt;

use thiserror::Error;

/// A single keypad command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadOperation {
    Digit(u8),
    DoubleZero,
    SignToggle,
    Clear,
}

impl fmt::Display for KeypadOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeypadOperation::Digit(digit) => write!(f, "digit {digit}"),
            KeypadOperation::DoubleZero => f.write_str("double zero"),
            KeypadOperation::SignToggle => f.write_str("sign toggle"),
            KeypadOperation::Clear => f.write_str("clear"),
        }
    }
}

/// Error surfaced when a widget rejects an operation.
///
/// A rejected operation never changes widget state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Accumulation left the supported integer range.
    #[error("amount out of range after {operation}")]
    ArithmeticOverflow { operation: KeypadOperation },
    /// The keypad was configured for positive amounts only.
    #[error("sign toggle is unavailable for positive-only amounts")]
    SignToggleUnavailable,
    #[error("digit {0} is outside 0..=9")]
    InvalidDigit(u8),
    /// Empty suggestions are not selectable.
    #[error("empty suggestions cannot be selected")]
    EmptySuggestion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_message_names_the_operation() {
        let error = EntryError::ArithmeticOverflow {
            operation: KeypadOperation::Digit(7),
        };
        assert_eq!(error.to_string(), "amount out of range after digit 7");
        let error = EntryError::ArithmeticOverflow {
            operation: KeypadOperation::DoubleZero,
        };
        assert!(error.to_string().contains("double zero"));
    }
}
