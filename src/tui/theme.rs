//! Light/dark presentation tokens.
//!
//! [`resolve`] maps the dark-mode flag to a complete [`Theme`]. Every
//! view reads its colors from here. The renderer turns tokens into
//! ratatui styles.

use ratatui::style::{Color, Modifier, Style};
use serde::Serialize;

/// How raised cards are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shadow {
    /// Solid offset shadow (light mode "hard-shadow").
    Hard,
    /// Flat, no shadow.
    None,
}

/// Foreground/background pair for filled elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub fg: Color,
    pub bg: Color,
}

impl Swatch {
    pub fn style(self) -> Style {
        Style::new().fg(self.fg).bg(self.bg).add_modifier(Modifier::BOLD)
    }
}

/// Named presentation tokens. All fields are always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub dark: bool,
    pub background: Color,
    pub nav_background: Color,
    pub card_background: Color,
    pub text: Color,
    pub highlight: Color,
    pub border: Color,
    pub shadow: Shadow,
    pub hero_section: Color,
    pub vault_section: Color,
    pub note_section: Color,
    pub accent: Swatch,
    pub button: Swatch,
    pub footer_background: Color,
}

const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);
const BLACK: Color = Color::Rgb(0x00, 0x00, 0x00);
const GRAY_100: Color = Color::Rgb(0xf3, 0xf4, 0xf6);
const GRAY_300: Color = Color::Rgb(0xd1, 0xd5, 0xdb);
const GRAY_600: Color = Color::Rgb(0x4b, 0x55, 0x63);
const BLUE_500: Color = Color::Rgb(0x3b, 0x82, 0xf6);
const BLUE_600: Color = Color::Rgb(0x25, 0x63, 0xeb);
const YELLOW_300: Color = Color::Rgb(0xfd, 0xe0, 0x47);
const PINK_400: Color = Color::Rgb(0xf4, 0x72, 0xb6);

const LIGHT: Theme = Theme {
    dark: false,
    background: Color::Rgb(0xf0, 0xf0, 0xf0),
    nav_background: WHITE,
    card_background: WHITE,
    text: BLACK,
    highlight: BLUE_600,
    border: BLACK,
    shadow: Shadow::Hard,
    hero_section: YELLOW_300,
    vault_section: PINK_400,
    note_section: BLUE_500,
    accent: Swatch { fg: WHITE, bg: BLUE_500 },
    button: Swatch { fg: WHITE, bg: BLACK },
    footer_background: BLACK,
};

const DARK: Theme = Theme {
    dark: true,
    background: Color::Rgb(0x1a, 0x1a, 0x1a),
    nav_background: Color::Rgb(0x25, 0x25, 0x25),
    card_background: Color::Rgb(0x25, 0x25, 0x25),
    text: GRAY_300,
    highlight: GRAY_100,
    border: GRAY_600,
    shadow: Shadow::None,
    hero_section: Color::Rgb(0x1a, 0x1a, 0x1a),
    vault_section: Color::Rgb(0x20, 0x20, 0x20),
    note_section: Color::Rgb(0x1a, 0x1a, 0x1a),
    accent: Swatch { fg: WHITE, bg: GRAY_600 },
    button: Swatch { fg: BLACK, bg: GRAY_100 },
    footer_background: Color::Rgb(0x11, 0x11, 0x11),
};

/// Theme for the given mode.
pub fn resolve(dark_mode: bool) -> Theme {
    if dark_mode { DARK } else { LIGHT }
}

impl Theme {
    /// Base page style.
    pub fn page(&self) -> Style {
        Style::new().fg(self.text).bg(self.background)
    }

    /// Card surface style.
    pub fn card(&self) -> Style {
        Style::new().fg(self.text).bg(self.card_background)
    }

    /// Emphasized text (countdown digits, names).
    pub fn emphasis(&self) -> Style {
        Style::new().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::new().fg(self.border)
    }

    /// Glyph for the theme toggle.
    pub fn mode_glyph(&self) -> &'static str {
        if self.dark { "🌙" } else { "☀️" }
    }
}

// ============================================================================
// UI CHROME
// ============================================================================

/// Help line at the bottom of the screen.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

/// Key hint inside the help line.
pub const STYLE_KEY: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Active navigation entry.
pub const STYLE_ACTIVE: Style = Style::new().add_modifier(Modifier::REVERSED);

// ============================================================================
// TESTS
// ============================================================================
