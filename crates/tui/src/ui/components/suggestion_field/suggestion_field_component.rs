use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::Modifier,
    text::Span,
    widgets::{Clear, Paragraph},
};
use tally_types::{Effect, PresentationStyle, TextDirection};
use unicode_width::UnicodeWidthStr;

use super::state::SuggestionFieldState;
use crate::app::{App, FieldSlot, FocusTarget};
use crate::ui::components::common::chip_flow::{flow_height, flow_layout, hit_test};
use crate::ui::components::component::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

const CLEAR_LABEL: &str = "Clear";
const CLEAR_WIDTH: u16 = 7;
const INPUT_PLACEHOLDER: &str = "Type a value";

/// Hit-test areas of the field as drawn in the form.
#[derive(Debug, Default, Clone)]
struct FieldLayout {
    entry_area: Rect,
    input_area: Rect,
    chips: Vec<Rect>,
}

/// Hit-test areas of the presented sheet.
#[derive(Debug, Default, Clone)]
struct SheetLayout {
    area: Rect,
    input_area: Rect,
    clear_area: Rect,
    chips: Vec<Rect>,
}

/// Renders one suggestion field and drives its controller from keys and
/// clicks. Inline fields edit in place; modal and page fields render a
/// button in the form and a sheet while presented.
#[derive(Debug)]
pub struct SuggestionFieldComponent {
    slot: FieldSlot,
    layout: FieldLayout,
    sheet: SheetLayout,
}

impl SuggestionFieldComponent {
    pub fn new(slot: FieldSlot) -> Self {
        Self {
            slot,
            layout: FieldLayout::default(),
            sheet: SheetLayout::default(),
        }
    }

    pub fn slot(&self) -> FieldSlot {
        self.slot
    }

    /// Height of the field in the form for the given width.
    pub fn preferred_height(&self, app: &App, width: u16) -> u16 {
        let controller = &app.field(self.slot).controller;
        if controller.presentation().is_sheet() {
            return 3;
        }
        let chip_rows = if controller.chips_visible() {
            flow_height(&controller.selectable_suggestions(), width.saturating_sub(2))
        } else {
            0
        };
        2 + 1 + chip_rows
    }

    /// Starts a session and places focus according to the profile: modal
    /// sheets open on their chips, page sheets and inline fields on the input.
    fn open(field: &mut SuggestionFieldState) -> Vec<Effect> {
        let effects = field.activate();
        match field.controller.presentation() {
            PresentationStyle::Modal if !field.controller.selectable_suggestions().is_empty() => {
                field.chip_cursor = Some(0);
            }
            _ => field.controller.focus_input(),
        }
        effects
    }

    fn enter_chips(field: &mut SuggestionFieldState) {
        if field.controller.selectable_suggestions().is_empty() {
            return;
        }
        field.controller.blur_input();
        field.chip_cursor = Some(0);
    }

    fn leave_chips(field: &mut SuggestionFieldState) {
        field.chip_cursor = None;
        field.controller.focus_input();
    }

    /// `Esc` blurs a focused input first and dismisses on the next press.
    fn escape(field: &mut SuggestionFieldState) -> Vec<Effect> {
        if field.controller.is_input_focused() {
            field.controller.blur_input();
            return Vec::new();
        }
        if field.controller.can_dismiss() {
            return field.dismiss();
        }
        Vec::new()
    }

    fn handle_chip_keys(field: &mut SuggestionFieldState, key: KeyEvent, cursor: usize) -> Vec<Effect> {
        let chips_above_input = field.controller.presentation() == PresentationStyle::Modal;
        match key.code {
            KeyCode::Left => field.move_chip_cursor(-1),
            KeyCode::Right => field.move_chip_cursor(1),
            KeyCode::Enter | KeyCode::Char(' ') => return field.select_chip(cursor),
            KeyCode::Up if !chips_above_input => Self::leave_chips(field),
            KeyCode::Down if chips_above_input => Self::leave_chips(field),
            KeyCode::Tab | KeyCode::BackTab => Self::leave_chips(field),
            _ => {}
        }
        Vec::new()
    }

    fn handle_input_keys(field: &mut SuggestionFieldState, key: KeyEvent) -> Vec<Effect> {
        let chips_above_input = field.controller.presentation() == PresentationStyle::Modal;
        match key.code {
            KeyCode::Enter => {
                field.sync_draft_from_input();
                field.submit()
            }
            KeyCode::Down if !chips_above_input => {
                Self::enter_chips(field);
                Vec::new()
            }
            KeyCode::Up if chips_above_input => {
                Self::enter_chips(field);
                Vec::new()
            }
            KeyCode::Tab | KeyCode::BackTab => {
                Self::enter_chips(field);
                Vec::new()
            }
            _ => {
                edit_input(field, key);
                Vec::new()
            }
        }
    }

    fn handle_sheet_mouse(&mut self, app: &mut App, position: Position) -> Vec<Effect> {
        let field = app.field_mut(self.slot);
        if let Some(index) = hit_test(&self.sheet.chips, position) {
            return field.select_chip(index);
        }
        if self.sheet.clear_area.contains(position) {
            return field.clear();
        }
        if self.sheet.input_area.contains(position) {
            Self::leave_chips(field);
            return Vec::new();
        }
        if !self.sheet.area.contains(position) && field.controller.can_dismiss() {
            return field.dismiss();
        }
        Vec::new()
    }

    /// Draws the presented sheet into `area`.
    pub fn render_sheet(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let field = app.field(self.slot);
        let controller = &field.controller;
        let direction = controller.reading_direction(app.ctx.direction);

        frame.render_widget(Clear, area);
        let title = controller.label().unwrap_or(self.slot.title());
        let block = th::block(theme, Some(title), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let suggestions = controller.selectable_suggestions();
        let chip_rows = flow_height(&suggestions, inner.width).max(1);
        let heading_style = theme.text_secondary_style().add_modifier(Modifier::BOLD);

        let (chips_area, input_row) = match controller.presentation() {
            PresentationStyle::Modal => {
                let [heading, chips, _, other, input_row] = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Length(chip_rows),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .areas(inner);
                frame.render_widget(Paragraph::new("Suggestions").style(heading_style), heading);
                frame.render_widget(Paragraph::new("Other").style(heading_style), other);
                (chips, input_row)
            }
            PresentationStyle::Page | PresentationStyle::Inline => {
                let [input_row, _, chips] =
                    Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Length(chip_rows)]).areas(inner);
                (chips, input_row)
            }
        };

        let [input_area, _, clear_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(1), Constraint::Length(CLEAR_WIDTH)]).areas(input_row);
        render_input(frame, input_area, theme, field, direction);
        th::render_button(frame, clear_area, CLEAR_LABEL, theme, false, true);

        let chips = match controller.empty_suggestions_notice() {
            Some(notice) => {
                frame.render_widget(Paragraph::new(notice).style(theme.text_muted_style()), chips_area);
                Vec::new()
            }
            None => render_chips(frame, chips_area, theme, field, &suggestions),
        };
        self.sheet = SheetLayout {
            area,
            input_area,
            clear_area,
            chips,
        };
    }

    fn render_inline(&mut self, frame: &mut Frame, rect: Rect, theme: &dyn Theme, field: &SuggestionFieldState, ambient: TextDirection) {
        let controller = &field.controller;
        let focused = field.f_entry.get();
        let block = th::block(theme, controller.label(), focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [input_area, chips_area] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
        render_input(frame, input_area, theme, field, controller.reading_direction(ambient));

        let chips = if controller.chips_visible() {
            render_chips(frame, chips_area, theme, field, &controller.selectable_suggestions())
        } else {
            Vec::new()
        };
        self.layout = FieldLayout {
            entry_area: rect,
            input_area,
            chips,
        };
    }

    fn render_entry_button(&mut self, frame: &mut Frame, rect: Rect, theme: &dyn Theme, field: &SuggestionFieldState) {
        let title = field.controller.label().unwrap_or(self.slot.title());
        let committed = field.controller.committed_text();
        let text = if committed.is_empty() {
            format!("Add {}", title.to_lowercase())
        } else {
            format!("{title}: {committed}")
        };
        th::render_button(frame, rect, &text, theme, field.f_entry.get(), true);
        self.layout = FieldLayout {
            entry_area: rect,
            ..FieldLayout::default()
        };
    }
}

impl Component for SuggestionFieldComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let field = app.field_mut(self.slot);

        if key.code == KeyCode::Char('u') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return field.clear();
        }

        if !field.controller.is_editing() {
            return match key.code {
                KeyCode::Enter => Self::open(field),
                KeyCode::Char(c) if !field.controller.presentation().is_sheet() => {
                    let effects = Self::open(field);
                    field.input.insert_char(c);
                    field.sync_draft_from_input();
                    effects
                }
                _ => Vec::new(),
            };
        }

        if key.code == KeyCode::Esc {
            return Self::escape(field);
        }
        if let Some(cursor) = field.chip_cursor {
            return Self::handle_chip_keys(field, key, cursor);
        }
        if field.controller.is_input_focused() {
            return Self::handle_input_keys(field, key);
        }

        // Editing with nothing focused: arrows reach the chips, anything
        // else goes back to the input.
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => Self::enter_chips(field),
            KeyCode::Enter => field.controller.focus_input(),
            _ => {
                field.controller.focus_input();
                edit_input(field, key);
            }
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(mouse.column, mouse.row);

        if app.open_sheet == Some(self.slot) {
            return self.handle_sheet_mouse(app, position);
        }

        if let Some(index) = hit_test(&self.layout.chips, position) {
            app.focus_target(FocusTarget::Field(self.slot));
            return app.field_mut(self.slot).select_chip(index);
        }
        if !self.layout.entry_area.contains(position) {
            return Vec::new();
        }

        app.focus_target(FocusTarget::Field(self.slot));
        let field = app.field_mut(self.slot);
        if !field.controller.is_editing() {
            return Self::open(field);
        }
        if self.layout.input_area.contains(position) {
            Self::leave_chips(field);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let field = app.field(self.slot);
        if field.controller.presentation().is_sheet() {
            self.render_entry_button(frame, rect, theme, field);
        } else {
            self.render_inline(frame, rect, theme, field, app.ctx.direction);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.ctx.theme;
        let field = app.field(self.slot);
        let controller = &field.controller;
        if !controller.is_editing() {
            let action = if controller.presentation().is_sheet() { " Open  " } else { " Edit  " };
            return th::build_hint_spans(theme, &[("Enter", action)]);
        }
        if field.chip_cursor.is_some() {
            return th::build_hint_spans(
                theme,
                &[("←/→", " Move  "), ("Enter", " Select  "), ("Tab", " Input  "), ("Esc", " Close  ")],
            );
        }
        if controller.is_input_focused() {
            return th::build_hint_spans(
                theme,
                &[("Enter", " Submit  "), ("Tab", " Suggestions  "), ("Ctrl+U", " Clear  "), ("Esc", " Done typing  ")],
            );
        }
        th::build_hint_spans(theme, &[("Tab", " Suggestions  "), ("Ctrl+U", " Clear  "), ("Esc", " Close  ")])
    }
}

/// Applies an editing key to the text buffer and mirrors it into the draft.
fn edit_input(field: &mut SuggestionFieldState, key: KeyEvent) {
    let input = &mut field.input;
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return,
    }
    field.sync_draft_from_input();
}

/// Draws the input line: the draft while editing, the committed text
/// otherwise. Right-to-left inputs are right aligned.
fn render_input(frame: &mut Frame, area: Rect, theme: &dyn Theme, field: &SuggestionFieldState, direction: TextDirection) {
    let controller = &field.controller;
    let focused = controller.is_input_focused();
    let alignment = match direction {
        TextDirection::LeftToRight => Alignment::Left,
        TextDirection::RightToLeft => Alignment::Right,
    };
    let text = if controller.is_editing() {
        field.input.input().to_string()
    } else {
        controller.committed_text()
    };
    let paragraph = if text.is_empty() && !focused {
        Paragraph::new(INPUT_PLACEHOLDER).style(th::input_style(theme, false).patch(theme.text_muted_style()))
    } else {
        Paragraph::new(text.clone()).style(th::input_style(theme, focused))
    };
    frame.render_widget(paragraph.alignment(alignment), area);

    if focused && area.width > 0 {
        let text_width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        let cursor = u16::try_from(field.input.cursor_columns()).unwrap_or(u16::MAX);
        let start = match direction {
            TextDirection::LeftToRight => area.x,
            TextDirection::RightToLeft => area.right().saturating_sub(text_width),
        };
        let x = start.saturating_add(cursor).clamp(area.x, area.right().saturating_sub(1));
        frame.set_cursor_position((x, area.y));
    }
}

/// Lays out and draws the chips, returning their areas for hit-testing.
fn render_chips(frame: &mut Frame, area: Rect, theme: &dyn Theme, field: &SuggestionFieldState, labels: &[&str]) -> Vec<Rect> {
    let rects = flow_layout(labels, area);
    for (index, (label, rect)) in labels.iter().zip(rects.iter()).enumerate() {
        let selected = field.controller.is_selected(label);
        let cursor = field.chip_cursor == Some(index);
        th::render_chip(frame, *rect, label, theme, selected, cursor);
    }
    rects
}
