//! Wrapping layout for rows of capsule-shaped chips.

use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

/// Horizontal gap between neighbouring chips.
const CHIP_GAP: u16 = 1;

/// Cells a chip occupies around its text: `( ` and ` )`.
const CHIP_DECORATION: u16 = 4;

/// Width of a rendered chip for `label`.
pub fn chip_width(label: &str) -> u16 {
    u16::try_from(label.width()).unwrap_or(u16::MAX).saturating_add(CHIP_DECORATION)
}

/// Lays chips out left to right, wrapping to a new line when the next chip
/// would overflow `area`. Chips that no longer fit vertically are dropped;
/// a chip wider than the area is truncated to the area width.
pub fn flow_layout<S: AsRef<str>>(labels: &[S], area: Rect) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(labels.len());
    if area.width == 0 || area.height == 0 {
        return rects;
    }

    let right = area.x.saturating_add(area.width);
    let bottom = area.y.saturating_add(area.height);
    let mut x = area.x;
    let mut y = area.y;
    for label in labels {
        let width = chip_width(label.as_ref()).min(area.width);
        if x > area.x && x.saturating_add(width) > right {
            x = area.x;
            y = y.saturating_add(1);
        }
        if y >= bottom {
            break;
        }
        rects.push(Rect::new(x, y, width, 1));
        x = x.saturating_add(width).saturating_add(CHIP_GAP);
    }
    rects
}

/// Number of rows `flow_layout` needs for `labels` at `width`.
pub fn flow_height<S: AsRef<str>>(labels: &[S], width: u16) -> u16 {
    if labels.is_empty() || width == 0 {
        return 0;
    }
    let mut rows = 1_u16;
    let mut used = 0_u16;
    for label in labels {
        let chip = chip_width(label.as_ref()).min(width);
        if used > 0 && used.saturating_add(chip) > width {
            rows = rows.saturating_add(1);
            used = 0;
        }
        used = used.saturating_add(chip).saturating_add(CHIP_GAP);
    }
    rows
}

/// Index of the chip under `position`, if any.
pub fn hit_test(rects: &[Rect], position: Position) -> Option<usize> {
    rects.iter().position(|rect| rect.contains(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chips_wrap_when_the_row_is_full() {
        let labels = ["KFC", "Coffee", "Tea"];
        // widths: 7, 10, 7
        let rects = flow_layout(&labels, Rect::new(0, 0, 20, 3));
        assert_eq!(rects[0], Rect::new(0, 0, 7, 1));
        assert_eq!(rects[1], Rect::new(8, 0, 10, 1));
        assert_eq!(rects[2], Rect::new(0, 1, 7, 1));
        assert_eq!(flow_height(&labels, 20), 2);
    }

    #[test]
    fn chips_beyond_the_area_are_dropped() {
        let labels = ["aaaa", "bbbb", "cccc"];
        let rects = flow_layout(&labels, Rect::new(2, 5, 9, 2));
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[1].y, 6);
    }

    #[test]
    fn wide_chips_are_truncated_to_the_area() {
        let rects = flow_layout(&["紫菜蛋花汤紫菜蛋花汤"], Rect::new(0, 0, 10, 1));
        assert_eq!(rects, vec![Rect::new(0, 0, 10, 1)]);
    }

    #[test]
    fn hit_test_finds_the_clicked_chip() {
        let rects = flow_layout(&["one", "two"], Rect::new(0, 0, 40, 1));
        assert_eq!(hit_test(&rects, Position::new(9, 0)), Some(1));
        assert_eq!(hit_test(&rects, Position::new(7, 0)), None);
    }
}
