//! Concrete palettes: Dracula and Nord for truecolor terminals, plus an
//! indexed fallback for 256-color terminals.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

macro_rules! palette_theme {
    ($name:ident, $roles:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            roles: ThemeRoles,
        }

        impl $name {
            pub fn new() -> Self {
                Self { roles: $roles }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Theme for $name {
            fn roles(&self) -> &ThemeRoles {
                &self.roles
            }
        }
    };
}

// Dracula (https://draculatheme.com/contribute)
const DRACULA_BG: Color = Color::Rgb(0x28, 0x2A, 0x36);
const DRACULA_CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A);
const DRACULA_FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2);
const DRACULA_COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4);
const DRACULA_CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD);
const DRACULA_GREEN: Color = Color::Rgb(0x50, 0xFA, 0x7B);
const DRACULA_PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6);
const DRACULA_RED: Color = Color::Rgb(0xFF, 0x55, 0x55);

palette_theme!(
    DraculaTheme,
    ThemeRoles {
        background: DRACULA_BG,
        surface: DRACULA_BG,
        surface_muted: DRACULA_CURRENT_LINE,
        border: DRACULA_CURRENT_LINE,
        text: DRACULA_FOREGROUND,
        text_secondary: DRACULA_COMMENT,
        text_muted: DRACULA_COMMENT,
        accent_primary: DRACULA_PINK,
        accent_secondary: DRACULA_CYAN,
        success: DRACULA_GREEN,
        error: DRACULA_RED,
        selection_bg: DRACULA_CURRENT_LINE,
        selection_fg: DRACULA_FOREGROUND,
        focus: DRACULA_CYAN,
        modal_bg: Color::Rgb(0x1D, 0x1F, 0x27),
    }
);

// Nord (https://www.nordtheme.com/docs/colors-and-palettes)
const NORD0: Color = Color::Rgb(0x2E, 0x34, 0x40);
const NORD1: Color = Color::Rgb(0x3B, 0x42, 0x52);
const NORD3: Color = Color::Rgb(0x4C, 0x56, 0x6A);
const NORD4: Color = Color::Rgb(0xD8, 0xDE, 0xE9);
const NORD6: Color = Color::Rgb(0xEC, 0xEF, 0xF4);
const NORD8: Color = Color::Rgb(0x88, 0xC0, 0xD0);
const NORD9: Color = Color::Rgb(0x81, 0xA1, 0xC1);
const NORD11: Color = Color::Rgb(0xBF, 0x61, 0x6A);
const NORD14: Color = Color::Rgb(0xA3, 0xBE, 0x8C);

palette_theme!(
    NordTheme,
    ThemeRoles {
        background: NORD0,
        surface: NORD0,
        surface_muted: NORD1,
        border: NORD3,
        text: NORD6,
        text_secondary: NORD4,
        text_muted: NORD3,
        accent_primary: NORD8,
        accent_secondary: NORD9,
        success: NORD14,
        error: NORD11,
        selection_bg: NORD1,
        selection_fg: NORD6,
        focus: NORD8,
        modal_bg: Color::Rgb(0x24, 0x29, 0x33),
    }
);

palette_theme!(
    Ansi256Theme,
    ThemeRoles {
        background: Color::Indexed(236),
        surface: Color::Indexed(236),
        surface_muted: Color::Indexed(239),
        border: Color::Indexed(239),
        text: Color::Indexed(255),
        text_secondary: Color::Indexed(250),
        text_muted: Color::Indexed(247),
        accent_primary: Color::Indexed(212),
        accent_secondary: Color::Indexed(117),
        success: Color::Indexed(84),
        error: Color::Indexed(203),
        selection_bg: Color::Indexed(239),
        selection_fg: Color::Indexed(255),
        focus: Color::Indexed(117),
        modal_bg: Color::Indexed(232),
    }
);
