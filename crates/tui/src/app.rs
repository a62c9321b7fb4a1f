//! Application state for the Tally terminal host.
//!
//! `App` owns the values the widgets edit (an [`Expense`]), hands the widgets
//! bindings into those cells, and keeps the cross-cutting context: theme,
//! currency format, focus and the status line.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tally_types::{
    Binding, CurrencyFormat, Effect, FeedbackStyle, Msg, NumericEntryConfig, PresentationStyle, SuggestionFieldConfig, TextDirection,
};
use tally_util::{UserPreferences, format_amount};
use tracing::{debug, info, warn};

use crate::ui::components::numeric_entry::NumericEntryState;
use crate::ui::components::suggestion_field::SuggestionFieldState;
use crate::ui::theme::{self, Theme, catalog};

/// How long a status message stays on screen.
const STATUS_TTL: Duration = Duration::from_secs(3);
/// How long the feedback indicator stays lit.
const FEEDBACK_TTL: Duration = Duration::from_millis(150);

const MERCHANT_SUGGESTIONS: &[&str] = &["Coffee Shop", "Bakery", "Grocer", "Pharmacy", "Coffee Shop"];
const CATEGORY_SUGGESTIONS: &[&str] = &["Food", "Transport", "Rent", "Utilities", "Leisure"];

/// Cross-cutting context shared by all components.
#[derive(Debug)]
pub struct SharedCtx {
    pub theme: Box<dyn Theme>,
    pub theme_id: &'static str,
    pub currency: CurrencyFormat,
    /// Ambient reading direction of the screen.
    pub direction: TextDirection,
}

/// The suggestion fields hosted by the demo, one per presentation profile by
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSlot {
    Merchant,
    Category,
    Note,
}

impl FieldSlot {
    pub const ALL: [FieldSlot; 3] = [FieldSlot::Merchant, FieldSlot::Category, FieldSlot::Note];

    pub fn title(self) -> &'static str {
        match self {
            FieldSlot::Merchant => "Merchant",
            FieldSlot::Category => "Category",
            FieldSlot::Note => "Note",
        }
    }
}

/// Which widget owns keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Amount,
    Field(FieldSlot),
}

/// The values edited on screen. Widgets never own these; they reach them
/// through bindings created by [`Expense::amount_binding`] and
/// [`Expense::text_binding`].
#[derive(Debug, Default)]
pub struct Expense {
    pub amount: Rc<RefCell<i64>>,
    pub merchant: Rc<RefCell<String>>,
    pub category: Rc<RefCell<String>>,
    pub note: Rc<RefCell<String>>,
}

impl Expense {
    pub fn new(amount: i64) -> Self {
        Self {
            amount: Rc::new(RefCell::new(amount)),
            ..Self::default()
        }
    }

    pub fn amount_binding(&self) -> Binding<i64> {
        Binding::from_cell(&self.amount)
    }

    pub fn text_binding(&self, slot: FieldSlot) -> Binding<String> {
        Binding::from_cell(self.cell(slot))
    }

    pub fn text(&self, slot: FieldSlot) -> String {
        self.cell(slot).borrow().clone()
    }

    fn cell(&self, slot: FieldSlot) -> &Rc<RefCell<String>> {
        match slot {
            FieldSlot::Merchant => &self.merchant,
            FieldSlot::Category => &self.category,
            FieldSlot::Note => &self.note,
        }
    }
}

/// Transient one-line message in the footer.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
    shown_at: Instant,
}

/// Construction options resolved from the command line and preferences.
#[derive(Debug, Default)]
pub struct AppOptions {
    pub numeric: NumericEntryConfig,
    /// Template for the suggestion fields. Every field takes its chip
    /// visibility from it; the merchant field also takes its presentation,
    /// and its non-empty suggestions replace the merchant defaults. Category
    /// and note keep the modal and page profiles.
    pub suggestions: SuggestionFieldConfig,
    pub currency: CurrencyFormat,
    pub initial_amount: i64,
    pub direction: TextDirection,
    /// Explicit theme request, taking precedence over the stored preference.
    pub theme: Option<String>,
    pub preferences: UserPreferences,
}

pub struct App {
    pub ctx: SharedCtx,
    pub expense: Expense,
    pub amount: NumericEntryState,
    pub merchant: SuggestionFieldState,
    pub category: SuggestionFieldState,
    pub note: SuggestionFieldState,
    /// The field whose sheet is on screen, if any.
    pub open_sheet: Option<FieldSlot>,
    pub status: Option<StatusLine>,
    /// Last feedback pulse, rendered as a short-lived indicator.
    pub feedback: Option<(FeedbackStyle, Instant)>,
    pub preferences: UserPreferences,
    pub focus: Focus,
    container_focus: FocusFlag,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let AppOptions {
            numeric,
            suggestions,
            currency,
            initial_amount,
            direction,
            theme: requested_theme,
            preferences,
        } = options;

        let loaded = theme::load(requested_theme.as_deref().or(preferences.preferred_theme()));
        debug!(theme = loaded.definition.id, "Theme selected");

        let merchant_suggestions = if suggestions.suggestions.is_empty() {
            owned(MERCHANT_SUGGESTIONS)
        } else {
            suggestions.suggestions.clone()
        };
        let expense = Expense::new(initial_amount);
        let amount = NumericEntryState::new("Amount", expense.amount_binding(), numeric);
        let merchant = SuggestionFieldState::new(
            "merchant",
            expense.text_binding(FieldSlot::Merchant),
            field_config(&suggestions, Some("Merchant"), merchant_suggestions, suggestions.presentation),
        );
        let category = SuggestionFieldState::new(
            "category",
            expense.text_binding(FieldSlot::Category),
            field_config(&suggestions, Some("Category"), owned(CATEGORY_SUGGESTIONS), PresentationStyle::Modal),
        );
        let note = SuggestionFieldState::new(
            "note",
            expense.text_binding(FieldSlot::Note),
            field_config(&suggestions, None, Vec::new(), PresentationStyle::Page),
        );

        let mut app = Self {
            ctx: SharedCtx {
                theme: loaded.theme,
                theme_id: loaded.definition.id,
                currency,
                direction,
            },
            expense,
            amount,
            merchant,
            category,
            note,
            open_sheet: None,
            status: None,
            feedback: None,
            preferences,
            focus: Focus::default(),
            container_focus: FocusFlag::named("tally"),
        };
        app.focus = FocusBuilder::build_for(&app);
        app.focus.first();
        app
    }

    pub fn field(&self, slot: FieldSlot) -> &SuggestionFieldState {
        match slot {
            FieldSlot::Merchant => &self.merchant,
            FieldSlot::Category => &self.category,
            FieldSlot::Note => &self.note,
        }
    }

    pub fn field_mut(&mut self, slot: FieldSlot) -> &mut SuggestionFieldState {
        match slot {
            FieldSlot::Merchant => &mut self.merchant,
            FieldSlot::Category => &mut self.category,
            FieldSlot::Note => &mut self.note,
        }
    }

    pub fn focused_target(&self) -> Option<FocusTarget> {
        if self.amount.f_value.get() {
            return Some(FocusTarget::Amount);
        }
        FieldSlot::ALL
            .into_iter()
            .find(|slot| self.field(*slot).f_entry.get())
            .map(FocusTarget::Field)
    }

    pub fn focus_target(&mut self, target: FocusTarget) {
        match target {
            FocusTarget::Amount => self.focus.focus(&self.amount.f_value),
            FocusTarget::Field(slot) => self.focus.focus(&self.field(slot).f_entry),
        }
    }

    /// Handles host messages. Widgets deliver theirs through
    /// `Effect::SendMsg`.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => self.expire_transients(Instant::now()),
            Msg::Resize(width, height) => debug!(width, height, "Terminal resized"),
            Msg::AmountChanged(value) => {
                let rendered = format_amount(*value, &self.ctx.currency);
                debug!(value, "Amount changed");
                self.set_status(format!("Amount {rendered}"), false);
            }
            Msg::TextCommitted(text) => {
                info!(length = text.len(), "Text committed");
                if text.is_empty() {
                    self.set_status("Field cleared", false);
                } else {
                    self.set_status(format!("Saved \"{text}\""), false);
                }
            }
        }
        Vec::new()
    }

    /// Records a feedback pulse. The terminal has no haptics, so the pulse is
    /// shown as an indicator and logged.
    pub fn pulse_feedback(&mut self, style: FeedbackStyle) {
        debug!(?style, "Feedback");
        self.feedback = Some((style, Instant::now()));
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error,
            shown_at: Instant::now(),
        });
    }

    /// Whether something on screen is waiting to expire.
    pub fn needs_animation(&self) -> bool {
        self.status.is_some() || self.feedback.is_some()
    }

    /// Switches to the next theme in the catalog and remembers the choice.
    pub fn cycle_theme(&mut self) {
        let definitions = catalog::THEME_DEFINITIONS;
        let current = definitions.iter().position(|definition| definition.id == self.ctx.theme_id).unwrap_or(0);
        let next = &definitions[(current + 1) % definitions.len()];
        self.ctx.theme = next.build();
        self.ctx.theme_id = next.id;
        if let Err(error) = self.preferences.set_preferred_theme(Some(next.id.to_string())) {
            warn!(%error, "Failed to persist theme preference");
        }
        self.set_status(format!("Theme: {}", next.label), false);
    }

    fn expire_transients(&mut self, now: Instant) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| now.duration_since(status.shown_at) >= STATUS_TTL)
        {
            self.status = None;
        }
        if self
            .feedback
            .is_some_and(|(_, at)| now.duration_since(at) >= FEEDBACK_TTL)
        {
            self.feedback = None;
        }
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        builder.widget(&self.amount);
        builder.widget(&self.merchant);
        builder.widget(&self.category);
        builder.widget(&self.note);
        builder.end(start);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

fn owned(suggestions: &[&str]) -> Vec<String> {
    suggestions.iter().map(|suggestion| suggestion.to_string()).collect()
}

fn field_config(template: &SuggestionFieldConfig, label: Option<&str>, suggestions: Vec<String>, presentation: PresentationStyle) -> SuggestionFieldConfig {
    SuggestionFieldConfig {
        label: label.map(str::to_string),
        suggestions,
        show_suggestion_only_when_editing: template.show_suggestion_only_when_editing,
        presentation,
    }
}

#[cfg(test)]
impl App {
    /// Demo app with an in-memory preference store and a `$2.50` amount.
    pub(crate) fn for_tests() -> Self {
        App::new(AppOptions {
            initial_amount: 250,
            preferences: UserPreferences::ephemeral(),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::for_tests()
    }

    #[test]
    fn widgets_write_through_to_the_expense() {
        let mut app = app();
        app.amount.apply(tally_types::KeypadOperation::DoubleZero);
        assert_eq!(*app.expense.amount.borrow(), 25_000);

        app.merchant.activate();
        let effects = app.merchant.select_chip(1);
        assert_eq!(app.expense.text(FieldSlot::Merchant), "Bakery");
        assert!(effects.contains(&Effect::SendMsg(Msg::TextCommitted("Bakery".to_string()))));
    }

    #[test]
    fn fields_use_one_profile_each() {
        let app = app();
        assert_eq!(app.merchant.controller.presentation(), PresentationStyle::Inline);
        assert_eq!(app.category.controller.presentation(), PresentationStyle::Modal);
        assert_eq!(app.note.controller.presentation(), PresentationStyle::Page);
        assert!(app.note.controller.empty_suggestions_notice().is_some());
        assert_eq!(app.merchant.controller.selectable_suggestions().len(), 4);
    }

    #[test]
    fn template_suggestions_replace_merchant_defaults() {
        let app = App::new(AppOptions {
            suggestions: SuggestionFieldConfig::new(None, ["Kiosk"]).with_show_suggestion_only_when_editing(false),
            preferences: UserPreferences::ephemeral(),
            ..Default::default()
        });
        assert_eq!(app.merchant.controller.selectable_suggestions(), vec!["Kiosk"]);
        assert!(app.merchant.controller.chips_visible());
        assert_eq!(app.category.controller.selectable_suggestions().len(), CATEGORY_SUGGESTIONS.len());
    }

    #[test]
    fn template_presentation_applies_to_the_merchant() {
        let app = App::new(AppOptions {
            suggestions: SuggestionFieldConfig::default().with_presentation(PresentationStyle::Modal),
            preferences: UserPreferences::ephemeral(),
            ..Default::default()
        });
        assert_eq!(app.merchant.controller.presentation(), PresentationStyle::Modal);
        assert_eq!(app.category.controller.presentation(), PresentationStyle::Modal);
        assert_eq!(app.note.controller.presentation(), PresentationStyle::Page);
    }

    #[test]
    fn messages_update_the_status_line() {
        let mut app = app();
        app.update(&Msg::AmountChanged(-1_234));
        assert_eq!(app.status.as_ref().map(|status| status.text.as_str()), Some("Amount -$12.34"));
        app.update(&Msg::TextCommitted(String::new()));
        assert_eq!(app.status.as_ref().map(|status| status.text.as_str()), Some("Field cleared"));
    }

    #[test]
    fn transients_expire() {
        let mut app = app();
        app.set_status("hello", false);
        app.pulse_feedback(FeedbackStyle::Medium);
        assert!(app.needs_animation());
        app.expire_transients(Instant::now() + STATUS_TTL);
        assert!(app.status.is_none());
        assert!(app.feedback.is_none());
    }

    #[test]
    fn cycling_themes_wraps_around() {
        let mut app = app();
        let first = app.ctx.theme_id;
        for _ in 0..catalog::THEME_DEFINITIONS.len() {
            app.cycle_theme();
        }
        assert_eq!(app.ctx.theme_id, first);
        assert_eq!(app.preferences.preferred_theme(), Some(first));
    }

    #[test]
    fn focus_starts_on_the_amount() {
        let app = app();
        assert_eq!(app.focused_target(), Some(FocusTarget::Amount));
    }
}
