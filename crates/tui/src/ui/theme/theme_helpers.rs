use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Input line style; bold while the input owns the cursor.
pub fn input_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    let ThemeRoles { surface_muted, text, .. } = *theme.roles();
    let style = Style::default().bg(surface_muted).fg(text);
    if focused { style.add_modifier(Modifier::BOLD) } else { style }
}

/// Renders a keypad key or other bordered button.
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, theme: &T, focused: bool, enabled: bool) {
    let (border_style, label_style) = if enabled {
        (theme.border_style(focused), theme.text_primary_style().add_modifier(Modifier::BOLD))
    } else {
        (theme.text_muted_style(), theme.text_muted_style())
    };
    let borders = if area.height >= 3 { Borders::ALL } else { Borders::NONE };
    frame.render_widget(
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(label_style)
            .block(Block::default().borders(borders).border_type(BorderType::Rounded).border_style(border_style)),
        area,
    );
}

/// Renders a suggestion chip as `( label )`.
pub fn render_chip<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, theme: &T, selected: bool, cursor: bool) {
    let text = format!("( {label} )");
    frame.render_widget(Paragraph::new(text).style(theme.chip_style(selected, cursor)), area);
}

/// Builds `key description` hint pairs for the footer.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}
