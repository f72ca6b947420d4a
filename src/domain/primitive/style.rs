use serde::{Deserialize, Serialize};

/// The eight ANSI colors plus the terminal's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    #[default]
    Default,
}

impl Color {
    /// SGR parameter selecting this color as foreground.
    pub fn fg_code(self) -> u8 {
        match self {
            Self::Default => 39,
            other => 30 + other.offset(),
        }
    }

    /// SGR parameter selecting this color as background.
    pub fn bg_code(self) -> u8 {
        match self {
            Self::Default => 49,
            other => 40 + other.offset(),
        }
    }

    fn offset(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
            Self::Default => 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intensity {
    #[default]
    Normal,
    Bold,
    Faint,
}

impl Intensity {
    /// SGR parameter, `None` for normal intensity (implied by a leading reset).
    pub fn code(self) -> Option<u8> {
        match self {
            Self::Normal => None,
            Self::Bold => Some(1),
            Self::Faint => Some(2),
        }
    }
}

/// Text rendition: what the terminal is asked to draw the next characters with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub intensity: Intensity,
}

impl Style {
    pub const DEFAULT: Style = Style {
        fg: Color::Default,
        bg: Color::Default,
        intensity: Intensity::Normal,
    };

    /// SGR parameter list, always starting from a full reset (`0`) so the
    /// result does not depend on whatever attributes the terminal had before.
    pub fn sgr_params(&self) -> Vec<u8> {
        let mut params = vec![0];
        params.extend(self.intensity.code());
        if self.fg != Color::Default {
            params.push(self.fg.fg_code());
        }
        if self.bg != Color::Default {
            params.push(self.bg.bg_code());
        }
        params
    }
}

/// Renditions for the three parts of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Frame border and the `[row/col]` status.
    pub chrome: Style,
    /// Header line and the separator under it.
    pub header: Style,
    /// Scrolling data rows.
    pub data: Style,
}

impl Theme {
    pub const DEFAULT: Theme = Theme {
        chrome: Style {
            fg: Color::Blue,
            bg: Color::Default,
            intensity: Intensity::Normal,
        },
        header: Style {
            fg: Color::Green,
            bg: Color::Cyan,
            intensity: Intensity::Bold,
        },
        data: Style {
            fg: Color::Default,
            bg: Color::Cyan,
            intensity: Intensity::Faint,
        },
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::DEFAULT
    }
}
