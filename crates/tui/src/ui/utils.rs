//! Layout helpers shared by the main view and sheets.

use ratatui::prelude::*;

/// Creates a rectangle centered in `r`, sized as a percentage of it.
///
/// Used to place the suggestion sheets over the form.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    area[1]
}

/// Like [`centered_rect`] but never smaller than `min_width` x `min_height`
/// (bounded by `r`).
pub fn centered_min(percent_x: u16, percent_y: u16, min_width: u16, min_height: u16, r: Rect) -> Rect {
    let area = centered_rect(percent_x, percent_y, r);
    let width = area.width.max(min_width).min(r.width);
    let height = area.height.max(min_height).min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let area = centered_rect(80, 60, parent);
        assert_eq!(area.width, 80);
        assert_eq!(area.height, 30);
        assert_eq!(area.x, 10);
        assert_eq!(area.y, 10);
    }

    #[test]
    fn centered_min_grows_small_areas() {
        let parent = Rect::new(0, 0, 40, 20);
        let area = centered_min(50, 50, 30, 14, parent);
        assert_eq!((area.width, area.height), (30, 14));
        assert_eq!((area.x, area.y), (5, 3));

        let tiny = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_min(50, 50, 30, 14, tiny), tiny);
    }
}
