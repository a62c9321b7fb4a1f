//! Component system for the Tally terminal host.
//!
//! Components own only their layout (the rectangles they drew last frame, used
//! for mouse hit-testing). Widget state lives on [`App`] so that focus can be
//! rebuilt from a single place and effects can be routed by the main view.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};
use tally_types::{Effect, Msg};

use crate::app::App;

/// A UI component with its own layout and behavior.
///
/// Handlers report side effects as [`Effect`]s instead of acting on them;
/// the runtime executes the effects after the handler returns.
pub(crate) trait Component {
    /// Handle an application message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events while this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events. Components hit-test against the areas they
    /// recorded during the last render.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Rendering may only record layout for hit-testing and place the cursor;
    /// widget state changes belong in the event handlers.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Footer hints shown while the component has focus.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }
}
