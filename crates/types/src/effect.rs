/// Strength of a tactile feedback notification. Keypad operations pulse at
/// medium strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackStyle {
    Medium,
}

/// Messages that can be sent to update the host state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic UI tick (status line expiry)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// An amount keypad wrote a new value
    AmountChanged(i64),
    /// A suggestion field committed text to its bound value
    TextCommitted(String),
}

/// Side effects reported by widgets for the host to carry out.
///
/// Widgets never perform these themselves; the host decides whether and how
/// to honour them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fire-and-forget tactile feedback
    Feedback(FeedbackStyle),
    /// Present the widget's editing sheet
    ShowModal,
    /// Dismiss the widget's editing sheet
    CloseModal,
    /// Deliver a message back to the host's update loop
    SendMsg(Msg),
}
