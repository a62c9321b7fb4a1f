//! Main view: lays out the form, routes input to the focused widget and
//! presents suggestion sheets above the form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};
use tally_types::{Effect, Msg};
use tally_util::format_amount;
use tracing::debug;

use super::components::{Component, NumericEntryComponent, SuggestionFieldComponent};
use super::theme::theme_helpers as th;
use super::utils::centered_min;
use crate::app::{App, FieldSlot, FocusTarget};

/// Minimum sheet size; smaller terminals get the whole screen.
const SHEET_MIN_WIDTH: u16 = 40;
const SHEET_MIN_HEIGHT: u16 = 12;

#[derive(Debug)]
pub struct MainView {
    amount_view: NumericEntryComponent,
    /// One view per [`FieldSlot::ALL`] entry, in the same order.
    field_views: Vec<SuggestionFieldComponent>,
}

impl Default for MainView {
    fn default() -> Self {
        Self::new()
    }
}

impl MainView {
    pub fn new() -> Self {
        Self {
            amount_view: NumericEntryComponent::default(),
            field_views: FieldSlot::ALL.into_iter().map(SuggestionFieldComponent::new).collect(),
        }
    }

    fn field_view(&mut self, slot: FieldSlot) -> Option<&mut SuggestionFieldComponent> {
        self.field_views.iter_mut().find(|view| view.slot() == slot)
    }

    fn component_for(&mut self, target: FocusTarget) -> Option<&mut dyn Component> {
        match target {
            FocusTarget::Amount => Some(&mut self.amount_view),
            FocusTarget::Field(slot) => self.field_view(slot).map(|view| view as &mut dyn Component),
        }
    }

    /// Sheet overlay area for a screen of `area`.
    pub fn sheet_area(area: Rect) -> Rect {
        centered_min(60, 60, SHEET_MIN_WIDTH, SHEET_MIN_HEIGHT, area)
    }

    fn handle_field_keys(&mut self, app: &mut App, slot: FieldSlot, key: KeyEvent) -> Vec<Effect> {
        let mut effects = match self.field_view(slot) {
            Some(view) => view.handle_key_events(app, key),
            None => Vec::new(),
        };
        route_sheet_effects(app, slot, &mut effects);
        effects
    }

    fn move_focus(&mut self, app: &mut App, forward: bool) {
        let previous = app.focused_target();
        if forward {
            app.focus.next();
        } else {
            app.focus.prev();
        }
        leave_target(app, previous);
    }
}

/// Applies sheet effects for the field that emitted them. Widgets report
/// `ShowModal`/`CloseModal` without naming themselves; the host knows which
/// field it was talking to.
fn route_sheet_effects(app: &mut App, slot: FieldSlot, effects: &mut Vec<Effect>) {
    let navigation = effects
        .extract_if(.., |effect| matches!(effect, Effect::ShowModal | Effect::CloseModal))
        .collect::<Vec<Effect>>();

    for effect in navigation {
        match effect {
            Effect::ShowModal => {
                debug!(field = slot.title(), "Sheet presented");
                app.open_sheet = Some(slot);
            }
            Effect::CloseModal if app.open_sheet == Some(slot) => {
                debug!(field = slot.title(), "Sheet dismissed");
                app.open_sheet = None;
            }
            _ => {}
        }
    }
}

/// Ends an inline session when focus moves away; its draft is discarded.
fn leave_target(app: &mut App, previous: Option<FocusTarget>) {
    let Some(FocusTarget::Field(slot)) = previous else {
        return;
    };
    if app.focused_target() == previous {
        return;
    }
    let field = app.field_mut(slot);
    if !field.controller.presentation().is_sheet() && field.controller.is_editing() {
        field.dismiss();
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        app.update(msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('t') && key.modifiers.contains(KeyModifiers::CONTROL) {
            app.cycle_theme();
            return Vec::new();
        }

        // A presented sheet traps every key until it closes.
        if let Some(slot) = app.open_sheet {
            return self.handle_field_keys(app, slot, key);
        }

        match key.code {
            KeyCode::Tab => {
                self.move_focus(app, true);
                return Vec::new();
            }
            KeyCode::BackTab => {
                self.move_focus(app, false);
                return Vec::new();
            }
            _ => {}
        }

        match app.focused_target() {
            Some(FocusTarget::Field(slot)) => self.handle_field_keys(app, slot, key),
            Some(target) => self.component_for(target).map(|view| view.handle_key_events(app, key)).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if let Some(slot) = app.open_sheet {
            let mut effects = match self.field_view(slot) {
                Some(view) => view.handle_mouse_events(app, mouse),
                None => Vec::new(),
            };
            route_sheet_effects(app, slot, &mut effects);
            return effects;
        }

        let previous = app.focused_target();
        let mut effects = self.amount_view.handle_mouse_events(app, mouse);
        for view in self.field_views.iter_mut() {
            let mut field_effects = view.handle_mouse_events(app, mouse);
            route_sheet_effects(app, view.slot(), &mut field_effects);
            effects.extend(field_effects);
        }
        leave_target(app, previous);
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let background = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(background, area);

        let [title_area, body, status_area, hints_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let title = Line::from(vec![
            Span::styled("Tally", app.ctx.theme.accent_emphasis_style()),
            Span::styled("  new expense", app.ctx.theme.text_muted_style()),
        ]);
        frame.render_widget(Paragraph::new(title), title_area);

        let mut constraints = vec![Constraint::Length(NumericEntryComponent::preferred_height(app))];
        for view in &self.field_views {
            constraints.push(Constraint::Length(view.preferred_height(app, body.width)));
        }
        constraints.push(Constraint::Fill(1));
        let areas = Layout::vertical(constraints).split(body);

        self.amount_view.render(frame, areas[0], app);
        for (view, view_area) in self.field_views.iter_mut().zip(areas.iter().skip(1)) {
            view.render(frame, *view_area, app);
        }

        render_status(frame, status_area, app);
        let hints = Paragraph::new(Line::from(self.get_hint_spans(app))).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints, hints_area);

        if let Some(slot) = app.open_sheet {
            frame.render_widget(Block::default().style(app.ctx.theme.modal_background_style()).dim(), area);
            let sheet_area = Self::sheet_area(area);
            if let Some(view) = self.field_view(slot) {
                view.render_sheet(frame, sheet_area, app);
            }
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];

        if let Some(slot) = app.open_sheet {
            if let Some(view) = self.field_views.iter().find(|view| view.slot() == slot) {
                hint_spans.extend(view.get_hint_spans(app));
            }
            return hint_spans;
        }

        match app.focused_target() {
            Some(FocusTarget::Amount) => hint_spans.extend(self.amount_view.get_hint_spans(app)),
            Some(FocusTarget::Field(slot)) => {
                if let Some(view) = self.field_views.iter().find(|view| view.slot() == slot) {
                    hint_spans.extend(view.get_hint_spans(app));
                }
            }
            None => {}
        }

        hint_spans.extend(th::build_hint_spans(
            &*app.ctx.theme,
            &[("Tab", " Next field  "), ("Ctrl+T", " Theme  "), ("Ctrl+C", " Quit ")],
        ));
        hint_spans
    }
}

/// Status message if one is pending, otherwise a summary of the expense.
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &*app.ctx.theme;
    let line = match app.status.as_ref() {
        Some(status) => {
            let style = if status.is_error { theme.status_error() } else { theme.status_success() };
            Line::from(Span::styled(status.text.clone(), style))
        }
        None => {
            let amount = format_amount(*app.expense.amount.borrow(), &app.ctx.currency);
            let mut parts = vec![amount];
            for slot in FieldSlot::ALL {
                let text = app.expense.text(slot);
                parts.push(if text.is_empty() { format!("no {}", slot.title().to_lowercase()) } else { text });
            }
            Line::from(Span::styled(parts.join(" · "), theme.text_secondary_style()))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
