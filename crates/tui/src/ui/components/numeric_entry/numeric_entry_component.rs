use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::Span,
    widgets::Paragraph,
};
use tally_types::{Effect, KeypadOperation};
use tally_util::format_amount;

use super::state::keypad_rows;
use crate::app::{App, FocusTarget};
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers as th;

const AMOUNT_HEIGHT: u16 = 3;
const KEY_HEIGHT: u16 = 3;
const KEYPAD_HEIGHT: u16 = KEY_HEIGHT * 4;

/// Rendered rectangles kept for pointer hit-testing.
#[derive(Debug, Default, Clone)]
struct NumericEntryLayout {
    amount_area: Rect,
    keys: Vec<(KeypadOperation, Rect)>,
}

/// Renders the amount and its keypad and translates input into keypad
/// operations on [`App::amount`].
#[derive(Debug, Default)]
pub struct NumericEntryComponent {
    layout: NumericEntryLayout,
}

impl NumericEntryComponent {
    /// Height the component wants for the current keypad visibility.
    pub fn preferred_height(app: &App) -> u16 {
        let keypad = if app.amount.keypad_visible() { KEYPAD_HEIGHT } else { 0 };
        2 + AMOUNT_HEIGHT + 1 + keypad
    }

    fn apply(&mut self, app: &mut App, operation: KeypadOperation) -> Vec<Effect> {
        let effects = app.amount.apply(operation);
        if let Some(message) = app.amount.error.clone() {
            app.set_status(message, true);
        }
        effects
    }
}

/// Maps a key to the keypad operation it stands for.
fn keypad_operation(code: KeyCode) -> Option<KeypadOperation> {
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() => c
            .to_digit(10)
            .and_then(|digit| u8::try_from(digit).ok())
            .map(KeypadOperation::Digit),
        KeyCode::Char('*') => Some(KeypadOperation::DoubleZero),
        KeyCode::Char('-') | KeyCode::Char('+') => Some(KeypadOperation::SignToggle),
        KeyCode::Backspace | KeyCode::Delete => Some(KeypadOperation::Clear),
        _ => None,
    }
}

impl Component for NumericEntryComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.amount.toggle_editing();
                Vec::new()
            }
            code => match keypad_operation(code) {
                Some(operation) if app.amount.keypad_visible() => self.apply(app, operation),
                _ => Vec::new(),
            },
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(mouse.column, mouse.row);

        if self.layout.amount_area.contains(position) {
            app.focus_target(FocusTarget::Amount);
            app.amount.toggle_editing();
            return Vec::new();
        }

        let hit = self
            .layout
            .keys
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(operation, _)| *operation);
        match hit {
            Some(operation) => {
                app.focus_target(FocusTarget::Amount);
                self.apply(app, operation)
            }
            None => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let state = &app.amount;
        let focused = state.f_value.get();
        let pulsing = app.feedback.is_some();

        let title = if pulsing { format!("{} •", state.label) } else { state.label.clone() };
        let block = th::block(theme, Some(&title), focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let keypad_height = if state.keypad_visible() { KEYPAD_HEIGHT } else { 0 };
        let [amount_area, message_area, keypad_area] = Layout::vertical([
            Constraint::Length(AMOUNT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(keypad_height),
        ])
        .areas(inner);

        let amount = format_amount(state.controller.value(), &app.ctx.currency);
        th::render_button(frame, amount_area, &amount, theme, focused, true);
        self.layout.amount_area = amount_area;

        if let Some(error) = state.error.as_deref() {
            frame.render_widget(Paragraph::new(error).style(theme.status_error()), message_area);
        }

        self.layout.keys.clear();
        if keypad_height == 0 {
            return;
        }
        let rows = keypad_rows(state.controller.positive_only());
        let row_areas = Layout::vertical([Constraint::Length(KEY_HEIGHT); 4]).split(keypad_area);
        for (row, row_area) in rows.iter().zip(row_areas.iter()) {
            let key_areas = Layout::horizontal(vec![Constraint::Fill(1); row.len()]).split(*row_area);
            for (key, key_area) in row.iter().zip(key_areas.iter()) {
                th::render_button(frame, *key_area, &key.label(), theme, pulsing && focused, true);
                self.layout.keys.push((key.operation, *key_area));
            }
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.ctx.theme;
        let on_demand = app.amount.controller.config().only_show_keypad_when_editing;
        if !app.amount.keypad_visible() {
            return th::build_hint_spans(theme, &[("Enter", " Show keypad  ")]);
        }
        let mut hints = vec![("0-9", " Digit  "), ("*", " 00  ")];
        if app.amount.controller.is_sign_toggle_available() {
            hints.push(("-", " Sign  "));
        }
        hints.push(("Bksp", " Clear  "));
        if on_demand {
            hints.push(("Enter", " Hide keypad  "));
        }
        th::build_hint_spans(theme, &hints)
    }
}
