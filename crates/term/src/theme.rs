//! Colour themes
//!
//! Both themes are strictly monochrome: one colour for blocks, grid and
//! border, the other for the background. Once the board has flipped, blocks
//! take the next colour of [`FLIP_PALETTE`] on every flip.

use std::str::FromStr;

use crate::fb::{CellStyle, Rgb};

/// Block colours cycled through by board flips.
pub const FLIP_PALETTE: [Rgb; 8] = [
    Rgb::new(0x94, 0x00, 0xd3), // violet
    Rgb::new(0x4b, 0x00, 0x82), // indigo
    Rgb::new(0x00, 0x00, 0xff), // blue
    Rgb::new(0x00, 0xff, 0x00), // green
    Rgb::new(0xff, 0xff, 0x00), // yellow
    Rgb::new(0xff, 0x7f, 0x00), // orange
    Rgb::new(0xff, 0x00, 0x00), // red
    Rgb::new(0xff, 0xff, 0xff), // white
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl FromStr for ThemeKind {
    type Err = String;

    /// Parse theme name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeKind::Light),
            "dark" => Ok(ThemeKind::Dark),
            _ => Err(format!("unknown theme `{s}` (light, dark)")),
        }
    }
}

impl ThemeKind {
    pub fn toggled(self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub foreground: Rgb,
}

impl Theme {
    pub const fn light() -> Self {
        Self {
            background: Rgb::new(255, 255, 255),
            foreground: Rgb::new(0, 0, 0),
        }
    }

    pub const fn dark() -> Self {
        Self {
            background: Rgb::new(0, 0, 0),
            foreground: Rgb::new(255, 255, 255),
        }
    }

    pub const fn of(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self::light(),
            ThemeKind::Dark => Self::dark(),
        }
    }

    /// Colour of locked and falling blocks after `flip_count` flips.
    ///
    /// A palette entry matching the background is skipped.
    pub fn block_color(&self, flip_count: u32) -> Rgb {
        if flip_count == 0 {
            return self.foreground;
        }
        let len = FLIP_PALETTE.len();
        let index = (flip_count as usize - 1) % len;
        let color = FLIP_PALETTE[index];
        if color == self.background {
            FLIP_PALETTE[(index + 1) % len]
        } else {
            color
        }
    }

    /// Background, borders and labels.
    pub fn base(&self) -> CellStyle {
        CellStyle::new(self.foreground, self.background)
    }

    pub fn block(&self, flip_count: u32) -> CellStyle {
        CellStyle::new(self.block_color(flip_count), self.background).bold()
    }

    pub fn ghost(&self, flip_count: u32) -> CellStyle {
        CellStyle::new(self.block_color(flip_count), self.background).dim()
    }

    pub fn grid(&self) -> CellStyle {
        self.base().dim()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse() {
        assert_eq!("Dark".parse::<ThemeKind>(), Ok(ThemeKind::Dark));
        assert_eq!("light".parse::<ThemeKind>(), Ok(ThemeKind::Light));
        assert!("sepia".parse::<ThemeKind>().unwrap_err().contains("sepia"));
        assert_eq!(ThemeKind::Light.toggled(), ThemeKind::Dark);
    }

    #[test]
    fn test_block_color_before_first_flip() {
        assert_eq!(Theme::light().block_color(0), Rgb::new(0, 0, 0));
        assert_eq!(Theme::dark().block_color(0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_block_color_cycles_per_flip() {
        let theme = Theme::dark();
        assert_eq!(theme.block_color(1), FLIP_PALETTE[0]);
        assert_eq!(theme.block_color(2), FLIP_PALETTE[1]);
        assert_eq!(theme.block_color(9), FLIP_PALETTE[0]);
    }

    #[test]
    fn test_block_color_skips_background() {
        // White on the light theme would be invisible.
        assert_eq!(Theme::light().block_color(8), FLIP_PALETTE[0]);
        assert_eq!(Theme::dark().block_color(8), FLIP_PALETTE[7]);
    }
}
