use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Semantic color roles used by the widgets.
#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub background: Color,
    pub surface: Color,
    pub surface_muted: Color,
    pub border: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    /// Filled chips and the keypad's active key.
    pub accent_primary: Color,
    /// Focus rings and hint keys.
    pub accent_secondary: Color,

    pub success: Color,
    pub error: Color,

    /// Chip under the keyboard cursor.
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub focus: Color,

    /// Background painted behind sheets so the sheet appears raised.
    pub modal_bg: Color,
}

/// Theme trait exposes semantic roles and common style builders.
pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().focus } else { self.roles().border };
        Style::default().fg(color)
    }

    fn modal_background_style(&self) -> Style {
        Style::default().bg(self.roles().modal_bg)
    }

    fn status_success(&self) -> Style {
        Style::default().fg(self.roles().success)
    }
    fn status_error(&self) -> Style {
        Style::default().fg(self.roles().error)
    }

    fn accent_emphasis_style(&self) -> Style {
        Style::default().fg(self.roles().accent_secondary).add_modifier(Modifier::BOLD)
    }

    /// Chip style: prominent fill when it matches the committed value, muted
    /// otherwise. The chip under the keyboard cursor takes the selection
    /// colors and keeps its weight.
    fn chip_style(&self, selected: bool, cursor: bool) -> Style {
        let roles = self.roles();
        let mut style = if selected {
            Style::default().fg(roles.background).bg(roles.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(roles.text).bg(roles.surface_muted)
        };
        if cursor {
            style = style.fg(roles.selection_fg).bg(roles.selection_bg);
        }
        style
    }
}
