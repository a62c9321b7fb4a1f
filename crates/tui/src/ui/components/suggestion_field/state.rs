use indexmap::IndexSet;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tally_types::{Binding, Effect, EntryError, Msg, PresentationStyle, SuggestionFieldConfig, TextDirection};

use crate::ui::components::common::TextInputState;

/// Whether a suggestion field currently runs an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditingState {
    #[default]
    Inactive,
    Editing,
}

/// Draft/commit protocol for a text field with suggestion chips.
///
/// The committed value belongs to the owner and is reached through a
/// [`Binding`]. Edits go to a local draft that is copied from the committed
/// value whenever a session starts and written back only on submit or
/// suggestion selection.
#[derive(Debug, Clone)]
pub struct SuggestionFieldController {
    committed: Binding<String>,
    draft: String,
    suggestions: Vec<String>,
    config: SuggestionFieldConfig,
    state: EditingState,
    input_focused: bool,
}

impl SuggestionFieldController {
    pub fn new(committed: Binding<String>, config: SuggestionFieldConfig) -> Self {
        let draft = committed.get();
        Self {
            committed,
            draft,
            suggestions: config.suggestions.clone(),
            config,
            state: EditingState::Inactive,
            input_focused: false,
        }
    }

    pub fn committed_text(&self) -> String {
        self.committed.get()
    }

    pub fn draft_text(&self) -> &str {
        &self.draft
    }

    pub fn state(&self) -> EditingState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == EditingState::Editing
    }

    pub fn is_input_focused(&self) -> bool {
        self.is_editing() && self.input_focused
    }

    pub fn presentation(&self) -> PresentationStyle {
        self.config.presentation
    }

    /// A sheet is on screen: modal or page profile while editing.
    pub fn is_presented(&self) -> bool {
        self.config.presentation.is_sheet() && self.is_editing()
    }

    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }

    /// Starts an editing session with the draft re-synchronised from the
    /// committed value.
    pub fn activate(&mut self) -> Vec<Effect> {
        self.draft = self.committed.get();
        self.state = EditingState::Editing;
        if self.config.presentation.is_sheet() {
            self.input_focused = false;
            vec![Effect::ShowModal]
        } else {
            self.input_focused = true;
            Vec::new()
        }
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Commits the draft. Inline fields keep editing; sheets dismiss.
    pub fn submit_draft(&mut self) -> Vec<Effect> {
        self.committed.set(self.draft.clone());
        let mut effects = vec![Effect::SendMsg(Msg::TextCommitted(self.draft.clone()))];
        if self.config.presentation.is_sheet() {
            effects.extend(self.end_session());
        }
        effects
    }

    /// Commits a suggestion and always ends the session.
    pub fn select_suggestion(&mut self, suggestion: &str) -> Result<Vec<Effect>, EntryError> {
        if suggestion.is_empty() {
            return Err(EntryError::EmptySuggestion);
        }
        self.committed.set(suggestion.to_string());
        self.draft = suggestion.to_string();
        let mut effects = vec![Effect::SendMsg(Msg::TextCommitted(suggestion.to_string()))];
        effects.extend(self.end_session());
        Ok(effects)
    }

    /// Empties both buffers and leaves the input focused for typing. A closed
    /// sheet profile is presented again so the session stays visible.
    pub fn clear(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.config.presentation.is_sheet() && !self.is_editing() {
            effects.push(Effect::ShowModal);
        }
        self.committed.set(String::new());
        self.draft.clear();
        self.state = EditingState::Editing;
        self.input_focused = true;
        effects.push(Effect::SendMsg(Msg::TextCommitted(String::new())));
        effects
    }

    /// Ends the session without committing; the draft is discarded.
    pub fn dismiss(&mut self) -> Vec<Effect> {
        self.draft = self.committed.get();
        self.end_session()
    }

    pub fn focus_input(&mut self) {
        if self.is_editing() {
            self.input_focused = true;
        }
    }

    pub fn blur_input(&mut self) {
        self.input_focused = false;
    }

    /// A presented modal cannot be dismissed interactively while its input
    /// has focus.
    pub fn can_dismiss(&self) -> bool {
        !(self.config.presentation == PresentationStyle::Modal && self.is_input_focused())
    }

    /// Whether the chip row should be rendered.
    pub fn chips_visible(&self) -> bool {
        if self.config.presentation.is_sheet() {
            return self.is_presented();
        }
        !self.config.show_suggestion_only_when_editing || self.is_editing()
    }

    /// Non-empty suggestions in first-seen order, without duplicates.
    pub fn selectable_suggestions(&self) -> Vec<&str> {
        let unique: IndexSet<&str> = self
            .suggestions
            .iter()
            .map(String::as_str)
            .filter(|suggestion| !suggestion.is_empty())
            .collect();
        unique.into_iter().collect()
    }

    /// The page profile renders chips without a selection marker.
    pub fn highlights_selection(&self) -> bool {
        self.config.presentation != PresentationStyle::Page
    }

    /// Exact, case-sensitive match against the committed value.
    pub fn is_selected(&self, suggestion: &str) -> bool {
        self.highlights_selection() && !suggestion.is_empty() && self.committed.get() == suggestion
    }

    /// Labelled inputs read against the ambient direction.
    pub fn reading_direction(&self, ambient: TextDirection) -> TextDirection {
        if self.config.label.is_some() { ambient.flipped() } else { ambient }
    }

    /// Message shown in a sheet when nothing is selectable.
    pub fn empty_suggestions_notice(&self) -> Option<&'static str> {
        if self.selectable_suggestions().is_empty() {
            Some("No suggestions yet; type a value below.")
        } else {
            None
        }
    }

    fn end_session(&mut self) -> Vec<Effect> {
        let was_presented = self.is_presented();
        self.state = EditingState::Inactive;
        self.input_focused = false;
        if was_presented { vec![Effect::CloseModal] } else { Vec::new() }
    }
}

/// Host-side state for a suggestion field: controller, text cursor and chip
/// navigation.
#[derive(Debug, Clone)]
pub struct SuggestionFieldState {
    pub controller: SuggestionFieldController,
    /// Cursor-aware mirror of the draft used for keyboard editing.
    pub input: TextInputState,
    /// Index into `selectable_suggestions()` while navigating chips.
    pub chip_cursor: Option<usize>,
    pub container_focus: FocusFlag,
    pub f_entry: FocusFlag,
}

impl SuggestionFieldState {
    pub fn new(name: &'static str, committed: Binding<String>, config: SuggestionFieldConfig) -> Self {
        let controller = SuggestionFieldController::new(committed, config);
        let mut input = TextInputState::new();
        input.set_input(controller.draft_text());
        Self {
            controller,
            input,
            chip_cursor: None,
            container_focus: FocusFlag::named(name),
            f_entry: FocusFlag::default(),
        }
    }

    pub fn activate(&mut self) -> Vec<Effect> {
        let effects = self.controller.activate();
        self.sync_input_from_draft();
        effects
    }

    pub fn submit(&mut self) -> Vec<Effect> {
        self.controller.submit_draft()
    }

    /// Selects the chip at `index` in `selectable_suggestions()`. Out of
    /// range indices are ignored.
    pub fn select_chip(&mut self, index: usize) -> Vec<Effect> {
        let suggestion = self.controller.selectable_suggestions().get(index).map(|s| s.to_string());
        let Some(effects) = suggestion.and_then(|suggestion| self.controller.select_suggestion(&suggestion).ok()) else {
            return Vec::new();
        };
        self.chip_cursor = None;
        self.sync_input_from_draft();
        effects
    }

    pub fn clear(&mut self) -> Vec<Effect> {
        self.chip_cursor = None;
        let effects = self.controller.clear();
        self.sync_input_from_draft();
        effects
    }

    pub fn dismiss(&mut self) -> Vec<Effect> {
        self.chip_cursor = None;
        let effects = self.controller.dismiss();
        self.sync_input_from_draft();
        effects
    }

    /// Pushes the text buffer into the controller's draft after a keystroke.
    pub fn sync_draft_from_input(&mut self) {
        self.controller.edit_draft(self.input.input());
    }

    fn sync_input_from_draft(&mut self) {
        let draft = self.controller.draft_text().to_string();
        let cursor = draft.len();
        self.input.set_input(draft);
        self.input.set_cursor(cursor);
    }

    pub fn move_chip_cursor(&mut self, delta: isize) {
        let count = self.controller.selectable_suggestions().len();
        if count == 0 {
            self.chip_cursor = None;
            return;
        }
        let current = self.chip_cursor.unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, count as isize - 1);
        self.chip_cursor = Some(next as usize);
    }
}

impl HasFocus for SuggestionFieldState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        builder.leaf_widget(&self.f_entry);
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

    fn field(committed: &str, config: SuggestionFieldConfig) -> (SuggestionFieldController, std::rc::Rc<std::cell::RefCell<String>>) {
        let (binding, cell) = Binding::shared(committed.to_string());
        (SuggestionFieldController::new(binding, config), cell)
    }

    fn inline(suggestions: &[&str]) -> SuggestionFieldConfig {
        SuggestionFieldConfig::new(Some("Merchant"), suggestions.iter().copied())
    }

    #[test]
    fn activate_then_submit_keeps_committed_text() {
        let (mut controller, cell) = field("Coffee", inline(&["Tea"]));
        controller.activate();
        controller.submit_draft();
        assert_eq!(*cell.borrow(), "Coffee");
    }

    #[test]
    fn activate_resynchronises_draft_from_committed() {
        let (mut controller, cell) = field("old", inline(&[]));
        controller.activate();
        controller.edit_draft("typing");
        controller.dismiss();
        *cell.borrow_mut() = "owner edit".to_string();
        controller.activate();
        assert_eq!(controller.draft_text(), "owner edit");
    }

    #[test]
    fn edit_draft_leaves_committed_untouched() {
        let (mut controller, cell) = field("A", inline(&[]));
        controller.activate();
        controller.edit_draft("ABC");
        assert_eq!(controller.draft_text(), "ABC");
        assert_eq!(*cell.borrow(), "A");
    }

    #[test]
    fn inline_submit_keeps_editing() {
        let (mut controller, cell) = field("", inline(&[]));
        controller.activate();
        controller.edit_draft("Bakery");
        let effects = controller.submit_draft();
        assert_eq!(*cell.borrow(), "Bakery");
        assert!(controller.is_editing());
        assert!(controller.is_input_focused());
        assert_eq!(effects, vec![Effect::SendMsg(Msg::TextCommitted("Bakery".to_string()))]);
    }

    #[test]
    fn sheet_submit_dismisses() {
        let config = inline(&[]).with_presentation(PresentationStyle::Page);
        let (mut controller, cell) = field("", config);
        assert_eq!(controller.activate(), vec![Effect::ShowModal]);
        controller.focus_input();
        controller.edit_draft("Rent");
        let effects = controller.submit_draft();
        assert_eq!(*cell.borrow(), "Rent");
        assert_eq!(controller.state(), EditingState::Inactive);
        assert!(effects.contains(&Effect::CloseModal));
    }

    #[test]
    fn select_suggestion_commits_and_closes() {
        let (mut controller, cell) = field("A", inline(&["A", "B"]));
        controller.activate();
        let effects = controller.select_suggestion("B").expect("selectable");
        assert_eq!(*cell.borrow(), "B");
        assert_eq!(controller.draft_text(), "B");
        assert_eq!(controller.state(), EditingState::Inactive);
        assert!(!effects.contains(&Effect::CloseModal));

        let modal = inline(&["A", "B"]).with_presentation(PresentationStyle::Modal);
        let (mut controller, _cell) = field("A", modal);
        controller.activate();
        let effects = controller.select_suggestion("B").expect("selectable");
        assert!(effects.contains(&Effect::CloseModal));
        assert!(!controller.is_presented());
    }

    #[test]
    fn select_suggestion_rejects_empty() {
        let (mut controller, cell) = field("keep", inline(&["", "x"]));
        controller.activate();
        assert_eq!(controller.select_suggestion(""), Err(EntryError::EmptySuggestion));
        assert_eq!(*cell.borrow(), "keep");
        assert!(controller.is_editing());
    }

    #[test]
    fn clear_empties_both_buffers_and_keeps_focus() {
        let config = inline(&[]).with_presentation(PresentationStyle::Modal);
        let (mut controller, cell) = field("Groceries", config);
        controller.activate();
        controller.edit_draft("Groc");
        controller.clear();
        assert_eq!(*cell.borrow(), "");
        assert_eq!(controller.draft_text(), "");
        assert!(controller.is_editing());
        assert!(controller.is_input_focused());
        assert!(controller.is_presented());
    }

    #[test]
    fn clear_on_a_closed_sheet_presents_it() {
        let config = inline(&[]).with_presentation(PresentationStyle::Page);
        let (mut controller, cell) = field("Notes", config);
        let effects = controller.clear();
        assert_eq!(effects, vec![Effect::ShowModal, Effect::SendMsg(Msg::TextCommitted(String::new()))]);
        assert_eq!(*cell.borrow(), "");
        assert!(controller.is_presented());

        let (mut inline_controller, _) = field("Tea", inline(&[]));
        assert_eq!(inline_controller.clear(), vec![Effect::SendMsg(Msg::TextCommitted(String::new()))]);
    }

    #[test]
    fn select_chip_ignores_out_of_range_indices() {
        let (binding, cell) = Binding::shared("Tea".to_string());
        let mut state = SuggestionFieldState::new("chips", binding, inline(&["Coffee", "", "Coffee"]));
        state.activate();
        assert!(state.select_chip(1).is_empty());
        assert_eq!(*cell.borrow(), "Tea");
        assert!(state.controller.is_editing());
        assert_eq!(state.select_chip(0), vec![Effect::SendMsg(Msg::TextCommitted("Coffee".to_string()))]);
        assert_eq!(state.input.input(), "Coffee");
    }

    #[test]
    fn dismiss_discards_the_draft() {
        let (mut controller, cell) = field("Lunch", inline(&[]));
        controller.activate();
        controller.edit_draft("Dinner");
        controller.dismiss();
        assert_eq!(*cell.borrow(), "Lunch");
        assert_eq!(controller.draft_text(), "Lunch");
        assert!(!controller.is_editing());
    }

    #[test]
    fn modal_refuses_dismiss_while_input_focused() {
        let config = inline(&[]).with_presentation(PresentationStyle::Modal);
        let (mut controller, _cell) = field("", config);
        controller.activate();
        assert!(controller.can_dismiss());
        controller.focus_input();
        assert!(!controller.can_dismiss());
        controller.blur_input();
        assert!(controller.can_dismiss());
    }

    #[test]
    fn chips_follow_visibility_flag() {
        let (mut controller, _cell) = field("", inline(&["a"]));
        assert!(!controller.chips_visible());
        controller.activate();
        assert!(controller.chips_visible());

        let always = inline(&["a"]).with_show_suggestion_only_when_editing(false);
        let (controller, _cell) = field("", always);
        assert!(controller.chips_visible());
    }

    #[test]
    fn selectable_suggestions_skip_empty_and_duplicates() {
        let (controller, _cell) = field("", inline(&["KFC", "", "Tea", "KFC", "tea"]));
        assert_eq!(controller.selectable_suggestions(), vec!["KFC", "Tea", "tea"]);
    }

    #[test]
    fn selection_marker_is_exact_and_profile_dependent() {
        let (controller, _cell) = field("Tea", inline(&["Tea", "tea"]));
        assert!(controller.is_selected("Tea"));
        assert!(!controller.is_selected("tea"));

        let page = inline(&["Tea"]).with_presentation(PresentationStyle::Page);
        let (controller, _cell) = field("Tea", page);
        assert!(!controller.is_selected("Tea"));
    }

    #[test]
    fn selection_marker_ignores_the_draft() {
        let (mut controller, _cell) = field("Tea", inline(&["Tea", "Milk"]));
        controller.activate();
        controller.edit_draft("Milk");
        assert!(controller.is_selected("Tea"));
        assert!(!controller.is_selected("Milk"));
    }

    #[test]
    fn labelled_inputs_mirror_direction() {
        let (labelled, _cell) = field("", inline(&[]));
        assert_eq!(labelled.reading_direction(TextDirection::LeftToRight), TextDirection::RightToLeft);
        assert_eq!(labelled.reading_direction(TextDirection::RightToLeft), TextDirection::LeftToRight);

        let (unlabelled, _cell) = field("", SuggestionFieldConfig::new(None, Vec::<String>::new()));
        assert_eq!(unlabelled.reading_direction(TextDirection::LeftToRight), TextDirection::LeftToRight);
    }

    #[test]
    fn empty_notice_only_without_selectable_suggestions() {
        let (controller, _cell) = field("", inline(&["", ""]));
        assert!(controller.empty_suggestions_notice().is_some());
        let (controller, _cell) = field("", inline(&["x"]));
        assert!(controller.empty_suggestions_notice().is_none());
    }

    #[test]
    fn state_keeps_text_buffer_in_step() {
        let (binding, cell) = Binding::shared("Tea".to_string());
        let mut state = SuggestionFieldState::new("merchant", binding, inline(&["Coffee"]));
        state.activate();
        assert_eq!(state.input.input(), "Tea");
        state.input.insert_char('s');
        state.sync_draft_from_input();
        assert_eq!(state.controller.draft_text(), "Teas");

        state.move_chip_cursor(1);
        assert_eq!(state.chip_cursor, Some(0));
        state.select_chip(0);
        assert_eq!(*cell.borrow(), "Coffee");
        assert_eq!(state.input.input(), "Coffee");
        assert_eq!(state.chip_cursor, None);
    }
}
