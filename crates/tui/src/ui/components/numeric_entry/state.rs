use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tally_types::{Binding, Effect, EntryError, FeedbackStyle, KeypadOperation, Msg, NumericEntryConfig, OverflowPolicy};

/// Calculator-style accumulation of keypad presses into a bound integer.
///
/// The controller holds no copy of the amount. Each operation reads the
/// current value through the binding, computes the next one and writes it
/// back, so edits made by the owner between presses are respected.
#[derive(Debug, Clone)]
pub struct NumericEntryController {
    value: Binding<i64>,
    config: NumericEntryConfig,
}

impl NumericEntryController {
    pub fn new(value: Binding<i64>, config: NumericEntryConfig) -> Self {
        Self { value, config }
    }

    pub fn value(&self) -> i64 {
        self.value.get()
    }

    pub fn config(&self) -> &NumericEntryConfig {
        &self.config
    }

    pub fn positive_only(&self) -> bool {
        self.config.positive_only
    }

    pub fn is_sign_toggle_available(&self) -> bool {
        !self.config.positive_only
    }

    /// Appends a digit.
    ///
    /// From zero, the digit also sets the sign: negative unless the keypad is
    /// positive-only.
    pub fn press_digit(&self, digit: u8) -> Result<Vec<Effect>, EntryError> {
        if digit > 9 {
            return Err(EntryError::InvalidDigit(digit));
        }
        let operation = KeypadOperation::Digit(digit);
        let current = self.current_for_accumulation(operation)?;
        let digit = i64::from(digit);
        let next = if current == 0 {
            Some(if self.config.positive_only { digit } else { -digit })
        } else if current > 0 {
            current.checked_mul(10).and_then(|shifted| shifted.checked_add(digit))
        } else {
            current.checked_mul(10).and_then(|shifted| shifted.checked_sub(digit))
        };
        let next = self.resolve_overflow(next, current, operation)?;
        Ok(self.commit(operation, next))
    }

    /// Multiplies by one hundred. Zero stays zero and keeps no sign.
    pub fn press_double_zero(&self) -> Result<Vec<Effect>, EntryError> {
        let operation = KeypadOperation::DoubleZero;
        let current = self.current_for_accumulation(operation)?;
        let next = self.resolve_overflow(current.checked_mul(100), current, operation)?;
        Ok(self.commit(operation, next))
    }

    pub fn press_sign_toggle(&self) -> Result<Vec<Effect>, EntryError> {
        if self.config.positive_only {
            return Err(EntryError::SignToggleUnavailable);
        }
        let operation = KeypadOperation::SignToggle;
        let current = self.value.get();
        let next = match current.checked_neg() {
            Some(negated) => negated,
            None if self.config.overflow == OverflowPolicy::Saturate => i64::MAX,
            None => return Err(EntryError::ArithmeticOverflow { operation }),
        };
        Ok(self.commit(operation, next))
    }

    pub fn press_clear(&self) -> Vec<Effect> {
        self.commit(KeypadOperation::Clear, 0)
    }

    /// Dispatches a keypad operation.
    pub fn apply(&self, operation: KeypadOperation) -> Result<Vec<Effect>, EntryError> {
        match operation {
            KeypadOperation::Digit(digit) => self.press_digit(digit),
            KeypadOperation::DoubleZero => self.press_double_zero(),
            KeypadOperation::SignToggle => self.press_sign_toggle(),
            KeypadOperation::Clear => Ok(self.press_clear()),
        }
    }

    /// Reads the bound value, folding a negative amount written by the owner
    /// into its magnitude when the keypad is positive-only.
    fn current_for_accumulation(&self, operation: KeypadOperation) -> Result<i64, EntryError> {
        let current = self.value.get();
        if !self.config.positive_only || current >= 0 {
            return Ok(current);
        }
        match current.checked_abs() {
            Some(magnitude) => Ok(magnitude),
            None if self.config.overflow == OverflowPolicy::Saturate => Ok(i64::MAX),
            None => Err(EntryError::ArithmeticOverflow { operation }),
        }
    }

    fn resolve_overflow(&self, next: Option<i64>, current: i64, operation: KeypadOperation) -> Result<i64, EntryError> {
        match (next, self.config.overflow) {
            (Some(value), _) => Ok(value),
            (None, OverflowPolicy::Saturate) => Ok(if current < 0 { i64::MIN } else { i64::MAX }),
            (None, OverflowPolicy::Reject) => Err(EntryError::ArithmeticOverflow { operation }),
        }
    }

    fn commit(&self, operation: KeypadOperation, next: i64) -> Vec<Effect> {
        self.value.set(next);
        let mut effects = vec![Effect::SendMsg(Msg::AmountChanged(next))];
        if self.config.feedback.emits(operation) {
            effects.push(Effect::Feedback(FeedbackStyle::Medium));
        }
        effects
    }
}

/// A key on the rendered keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadKey {
    pub operation: KeypadOperation,
}

impl KeypadKey {
    pub fn label(&self) -> String {
        match self.operation {
            KeypadOperation::Digit(digit) => digit.to_string(),
            KeypadOperation::DoubleZero => "00".to_string(),
            KeypadOperation::SignToggle => "-/+".to_string(),
            KeypadOperation::Clear => "Clear".to_string(),
        }
    }
}

/// Keypad rows top to bottom; the sign key is absent for positive-only pads.
pub fn keypad_rows(positive_only: bool) -> Vec<Vec<KeypadKey>> {
    let digit = |value: u8| KeypadKey {
        operation: KeypadOperation::Digit(value),
    };
    let mut bottom = vec![
        KeypadKey {
            operation: KeypadOperation::DoubleZero,
        },
        digit(0),
    ];
    if !positive_only {
        bottom.push(KeypadKey {
            operation: KeypadOperation::SignToggle,
        });
    }
    bottom.push(KeypadKey {
        operation: KeypadOperation::Clear,
    });

    vec![
        vec![digit(1), digit(2), digit(3)],
        vec![digit(4), digit(5), digit(6)],
        vec![digit(7), digit(8), digit(9)],
        bottom,
    ]
}

/// Host-side state for the amount field: the controller plus keypad
/// visibility and focus.
#[derive(Debug, Clone)]
pub struct NumericEntryState {
    pub label: String,
    pub controller: NumericEntryController,
    /// Toggled by activating the amount button.
    pub is_editing: bool,
    /// Last rejected operation, shown until the next accepted one.
    pub error: Option<String>,
    pub container_focus: FocusFlag,
    pub f_value: FocusFlag,
}

impl NumericEntryState {
    pub fn new(label: impl Into<String>, value: Binding<i64>, config: NumericEntryConfig) -> Self {
        Self {
            label: label.into(),
            controller: NumericEntryController::new(value, config),
            is_editing: false,
            error: None,
            container_focus: FocusFlag::named("amount"),
            f_value: FocusFlag::named("amount.value"),
        }
    }

    pub fn keypad_visible(&self) -> bool {
        !self.controller.config().only_show_keypad_when_editing || self.is_editing
    }

    pub fn toggle_editing(&mut self) {
        self.is_editing = !self.is_editing;
    }

    /// Applies an operation, recording a rejection instead of propagating it.
    pub fn apply(&mut self, operation: KeypadOperation) -> Vec<Effect> {
        match self.controller.apply(operation) {
            Ok(effects) => {
                self.error = None;
                effects
            }
            Err(error) => {
                tracing::warn!(%operation, %error, "Keypad operation rejected");
                self.error = Some(error.to_string());
                Vec::new()
            }
        }
    }
}

impl HasFocus for NumericEntryState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        builder.leaf_widget(&self.f_value);
        builder.end(start);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tally_types::FeedbackPolicy;

    fn controller(initial: i64, config: NumericEntryConfig) -> NumericEntryController {
        let (binding, _cell) = Binding::shared(initial);
        NumericEntryController::new(binding, config)
    }

    fn positive_only() -> NumericEntryConfig {
        NumericEntryConfig {
            positive_only: true,
            ..Default::default()
        }
    }

    fn press_all(controller: &NumericEntryController, digits: &[u8]) {
        for digit in digits {
            controller.press_digit(*digit).expect("digit accepted");
        }
    }

    #[test]
    fn first_digit_from_zero_is_negative_by_default() {
        let keypad = controller(0, NumericEntryConfig::default());
        press_all(&keypad, &[1, 2, 3]);
        assert_eq!(keypad.value(), -123);
    }

    #[test]
    fn positive_only_accumulates_positive() {
        let keypad = controller(0, positive_only());
        press_all(&keypad, &[1, 2, 3]);
        assert_eq!(keypad.value(), 123);
    }

    #[test]
    fn positive_value_appends_digits() {
        let keypad = controller(12, NumericEntryConfig::default());
        keypad.press_digit(7).expect("digit");
        assert_eq!(keypad.value(), 127);
    }

    #[test]
    fn double_zero_multiplies_by_hundred() {
        let keypad = controller(5, NumericEntryConfig::default());
        keypad.press_double_zero().expect("double zero");
        assert_eq!(keypad.value(), 500);

        let keypad = controller(-7, NumericEntryConfig::default());
        keypad.press_double_zero().expect("double zero");
        assert_eq!(keypad.value(), -700);
    }

    #[test]
    fn double_zero_on_zero_stays_zero() {
        let keypad = controller(0, NumericEntryConfig::default());
        keypad.press_double_zero().expect("double zero");
        assert_eq!(keypad.value(), 0);
        keypad.press_digit(4).expect("digit");
        assert_eq!(keypad.value(), -4);
    }

    #[test]
    fn sign_toggle_negates() {
        let keypad = controller(-123, NumericEntryConfig::default());
        keypad.press_sign_toggle().expect("toggle");
        assert_eq!(keypad.value(), 123);
        keypad.press_sign_toggle().expect("toggle");
        assert_eq!(keypad.value(), -123);
    }

    #[test]
    fn sign_toggle_unavailable_when_positive_only() {
        let keypad = controller(42, positive_only());
        assert!(!keypad.is_sign_toggle_available());
        assert_eq!(keypad.press_sign_toggle(), Err(EntryError::SignToggleUnavailable));
        assert_eq!(keypad.value(), 42);
    }

    #[test]
    fn clear_is_idempotent() {
        let keypad = controller(-987, NumericEntryConfig::default());
        keypad.press_clear();
        assert_eq!(keypad.value(), 0);
        keypad.press_clear();
        assert_eq!(keypad.value(), 0);
    }

    #[test]
    fn digits_outside_range_are_rejected() {
        let keypad = controller(3, NumericEntryConfig::default());
        assert_eq!(keypad.press_digit(10), Err(EntryError::InvalidDigit(10)));
        assert_eq!(keypad.value(), 3);
    }

    #[test]
    fn reads_owner_writes_between_presses() {
        let (binding, cell) = Binding::shared(0_i64);
        let keypad = NumericEntryController::new(binding, NumericEntryConfig::default());
        keypad.press_digit(1).expect("digit");
        *cell.borrow_mut() = 40;
        keypad.press_digit(2).expect("digit");
        assert_eq!(*cell.borrow(), 402);
    }

    #[test]
    fn positive_only_folds_external_negative_values() {
        let (binding, cell) = Binding::shared(-12_i64);
        let keypad = NumericEntryController::new(binding, positive_only());
        keypad.press_digit(3).expect("digit");
        assert_eq!(*cell.borrow(), 123);
    }

    #[test]
    fn overflow_is_rejected_without_mutation() {
        let keypad = controller(i64::MAX / 10 + 1, NumericEntryConfig::default());
        let before = keypad.value();
        assert_eq!(
            keypad.press_digit(0),
            Err(EntryError::ArithmeticOverflow {
                operation: KeypadOperation::Digit(0)
            })
        );
        assert_eq!(keypad.value(), before);
        assert!(matches!(keypad.press_double_zero(), Err(EntryError::ArithmeticOverflow { .. })));
        assert_eq!(keypad.value(), before);

        let keypad = controller(i64::MIN, NumericEntryConfig::default());
        assert!(matches!(keypad.press_sign_toggle(), Err(EntryError::ArithmeticOverflow { .. })));
        assert_eq!(keypad.value(), i64::MIN);
    }

    #[test]
    fn overflow_saturates_when_configured() {
        let config = NumericEntryConfig {
            overflow: OverflowPolicy::Saturate,
            ..Default::default()
        };
        let keypad = controller(i64::MAX / 10 + 1, config);
        keypad.press_digit(9).expect("saturating digit");
        assert_eq!(keypad.value(), i64::MAX);

        let keypad = controller(i64::MIN / 100 - 1, config);
        keypad.press_double_zero().expect("saturating double zero");
        assert_eq!(keypad.value(), i64::MIN);

        keypad.press_sign_toggle().expect("saturating toggle");
        assert_eq!(keypad.value(), i64::MAX);
    }

    #[test]
    fn feedback_follows_policy() {
        let keypad = controller(0, NumericEntryConfig::default());
        let effects = keypad.press_digit(5).expect("digit");
        assert!(effects.contains(&Effect::Feedback(FeedbackStyle::Medium)));
        assert!(effects.contains(&Effect::SendMsg(Msg::AmountChanged(-5))));

        let effects = keypad.press_sign_toggle().expect("toggle");
        assert_eq!(effects, vec![Effect::SendMsg(Msg::AmountChanged(5))]);

        let silent = controller(
            0,
            NumericEntryConfig {
                feedback: FeedbackPolicy::silent(),
                ..Default::default()
            },
        );
        let effects = silent.press_clear();
        assert!(!effects.iter().any(|effect| matches!(effect, Effect::Feedback(_))));

        let uniform = controller(
            9,
            NumericEntryConfig {
                feedback: FeedbackPolicy::uniform(),
                ..Default::default()
            },
        );
        let effects = uniform.press_sign_toggle().expect("toggle");
        assert!(effects.contains(&Effect::Feedback(FeedbackStyle::Medium)));
    }

    #[test]
    fn keypad_rows_omit_sign_key_for_positive_only() {
        let signed = keypad_rows(false);
        assert_eq!(signed.len(), 4);
        assert!(signed[3].iter().any(|key| key.operation == KeypadOperation::SignToggle));
        assert_eq!(signed[3].last().map(KeypadKey::label).as_deref(), Some("Clear"));

        let positive = keypad_rows(true);
        assert!(!positive.iter().flatten().any(|key| key.operation == KeypadOperation::SignToggle));
    }

    #[test]
    fn keypad_visibility_respects_on_demand_config() {
        let (binding, _cell) = Binding::shared(0_i64);
        let mut state = NumericEntryState::new(
            "Amount",
            binding,
            NumericEntryConfig {
                only_show_keypad_when_editing: true,
                ..Default::default()
            },
        );
        assert!(!state.keypad_visible());
        state.toggle_editing();
        assert!(state.keypad_visible());
    }

    #[test]
    fn state_records_rejections() {
        let (binding, _cell) = Binding::shared(0_i64);
        let mut state = NumericEntryState::new("Amount", binding, positive_only());
        assert!(state.apply(KeypadOperation::SignToggle).is_empty());
        assert!(state.error.as_deref().is_some_and(|message| message.contains("positive-only")));
        state.apply(KeypadOperation::Digit(1));
        assert!(state.error.is_none());
    }

    proptest! {
        #[test]
        fn signed_digit_sequences_concatenate_negatively(digits in proptest::collection::vec(0_u8..=9, 1..15)) {
            let keypad = controller(0, NumericEntryConfig::default());
            press_all(&keypad, &digits);
            let significant: String = digits
                .iter()
                .skip_while(|digit| **digit == 0)
                .map(|digit| char::from(b'0' + digit))
                .collect();
            if significant.is_empty() {
                prop_assert_eq!(keypad.value(), 0);
            } else {
                prop_assert!(keypad.value() < 0);
                prop_assert_eq!(keypad.value().unsigned_abs().to_string(), significant);
            }
        }

        #[test]
        fn positive_only_never_goes_negative(
            start in 0_i64..1_000_000,
            presses in proptest::collection::vec(0_u8..=11, 0..30),
        ) {
            let keypad = controller(start, NumericEntryConfig { positive_only: true, overflow: OverflowPolicy::Saturate, ..Default::default() });
            for press in presses {
                let _ = match press {
                    10 => keypad.press_double_zero(),
                    11 => Ok(keypad.press_clear()),
                    digit => keypad.press_digit(digit),
                };
                prop_assert!(keypad.value() >= 0);
                prop_assert!(keypad.press_sign_toggle().is_err());
            }
        }
    }
}
