// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};

use crate::model::NodeCategory;

pub const PALETTE_ENV: &str = "TRELLIS_PALETTE";

/// Terminal colours. Without a palette override the terminal's own ANSI colours are used.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<Palette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let value = match env::var(PALETTE_ENV) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: PALETTE_ENV,
                    value: "<non-unicode>".to_owned(),
                    reason: "not valid unicode".to_owned(),
                })
            }
        };
        Self::from_value(value.as_deref())
    }

    /// Parses a palette override; `None` or blank keeps the terminal defaults.
    pub(crate) fn from_value(value: Option<&str>) -> Result<Self, ThemeError> {
        let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(Self::default());
        };
        let palette = Palette::parse_csv(value).map_err(|reason| ThemeError::InvalidEnv {
            name: PALETTE_ENV,
            value: value.to_owned(),
            reason,
        })?;
        Ok(Self {
            palette: Some(palette),
        })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn ansi(&self, color: Ansi) -> Color {
        match &self.palette {
            Some(palette) => palette.ansi[color as usize],
            None => color.into(),
        }
    }

    pub(crate) fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.ansi(Ansi::Yellow))
        } else {
            self.base_style().fg(self.ansi(Ansi::BrightBlack))
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi(Ansi::Black))
            .bg(self.ansi(Ansi::Yellow))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn tab_style(&self, active: bool) -> Style {
        if active {
            self.base_style()
                .fg(self.ansi(Ansi::BrightWhite))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            self.base_style().fg(self.ansi(Ansi::White))
        }
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.base_style().fg(self.ansi(Ansi::BrightBlack))
    }

    pub(crate) fn key_style(&self) -> Style {
        self.base_style().fg(self.ansi(Ansi::Cyan))
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.ansi(Ansi::Red))
    }

    /// Closest ANSI colour to the category's SVG tone.
    pub(crate) fn category_style(&self, category: NodeCategory) -> Style {
        let color = match category {
            NodeCategory::User => Ansi::BrightCyan,
            NodeCategory::Ledger => Ansi::BrightBlue,
            NodeCategory::Bridge => Ansi::BrightYellow,
            NodeCategory::Zk => Ansi::BrightGreen,
            NodeCategory::Chain => Ansi::BrightRed,
            NodeCategory::Infra | NodeCategory::External => Ansi::White,
        };
        self.base_style().fg(self.ansi(color))
    }
}

#[derive(Debug, Clone)]
struct Palette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl Palette {
    /// `fg,bg` followed by the sixteen ANSI colours in index order.
    const CSV_LEN: usize = 18;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts = value.split(',').map(str::trim).collect::<Vec<_>>();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg, then ansi 0-15), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let mut colors = parts
            .iter()
            .map(|part| parse_color(part))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();
        let fg = colors.next().unwrap_or(Color::Reset);
        let bg = colors.next().unwrap_or(Color::Reset);
        let mut ansi = [Color::Reset; 16];
        for (slot, color) in ansi.iter_mut().zip(colors) {
            *slot = color;
        }
        Ok(Self { fg, bg, ansi })
    }
}

/// Accepts `#RRGGBB`, `0xRRGGBB`, `RRGGBB` and X11 `rgb:RR/GG/BB` (2 or 4 hex digits per channel).
fn parse_color(value: &str) -> Result<Color, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = value.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let channels = rest
            .split('/')
            .map(parse_channel)
            .collect::<Result<Vec<_>, _>>()?;
        let [r, g, b] = channels[..] else {
            return Err(format!("invalid rgb: value {value}"));
        };
        return Ok(Color::Rgb(r, g, b));
    }

    let hex = lower
        .strip_prefix('#')
        .or_else(|| lower.strip_prefix("0x"))
        .unwrap_or(&lower);
    if hex.len() != 6 {
        return Err(format!("invalid hex color {value} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color {value}"))?;
    let [_, r, g, b] = rgb.to_be_bytes();
    Ok(Color::Rgb(r, g, b))
}

fn parse_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    let invalid = || format!("invalid rgb: channel {value}");
    match value.len() {
        2 => u8::from_str_radix(value, 16).map_err(|_| invalid()),
        4 => u16::from_str_radix(value, 16)
            .map(|wide| (wide >> 8) as u8)
            .map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// The ANSI slots the viewer draws with; discriminants index the 16-colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ansi {
    Black = 0,
    Red = 1,
    Yellow = 3,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl From<Ansi> for Color {
    fn from(value: Ansi) -> Self {
        match value {
            Ansi::Black => Color::Black,
            Ansi::Red => Color::Red,
            Ansi::Yellow => Color::Yellow,
            Ansi::Cyan => Color::Cyan,
            Ansi::White => Color::Gray,
            Ansi::BrightBlack => Color::DarkGray,
            Ansi::BrightRed => Color::LightRed,
            Ansi::BrightGreen => Color::LightGreen,
            Ansi::BrightYellow => Color::LightYellow,
            Ansi::BrightBlue => Color::LightBlue,
            Ansi::BrightCyan => Color::LightCyan,
            Ansi::BrightWhite => Color::White,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid env {name}={value}: {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Style};
    use rstest::rstest;

    use super::{parse_color, Palette, ThemeError, TuiTheme};
    use crate::model::NodeCategory;

    const CSV: &str = "#111111,#222222,#000000,#ff0000,#00ff00,#ffff00,#0000ff,#ff00ff,#00ffff,#ffffff,#1a1a1a,#ff1111,#11ff11,#ffff11,#1111ff,#ff11ff,#11ffff,#fefefe";

    #[test]
    fn palette_parses_fg_bg_and_sixteen_ansi_colours() {
        let palette = Palette::parse_csv(CSV).unwrap();
        assert_eq!(palette.fg, Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.bg, Color::Rgb(0x22, 0x22, 0x22));
        assert_eq!(palette.ansi[1], Color::Rgb(0xff, 0, 0));
        assert_eq!(palette.ansi[15], Color::Rgb(0xfe, 0xfe, 0xfe));
    }

    #[rstest]
    #[case("#38bdf8", Color::Rgb(0x38, 0xbd, 0xf8))]
    #[case("0xFBBF24", Color::Rgb(0xfb, 0xbf, 0x24))]
    #[case("34d399", Color::Rgb(0x34, 0xd3, 0x99))]
    #[case("rgb:ff/80/00", Color::Rgb(0xff, 0x80, 0x00))]
    #[case("rgb:ffff/8080/0000", Color::Rgb(0xff, 0x80, 0x00))]
    fn colour_formats(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(parse_color(input), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("#12345")]
    #[case("#gggggg")]
    #[case("rgb:ff/80")]
    fn bad_colours_are_rejected(#[case] input: &str) {
        assert!(parse_color(input).is_err());
    }

    #[test]
    fn blank_override_keeps_terminal_colours() {
        let theme = TuiTheme::from_value(Some("  ")).unwrap();
        assert_eq!(theme.base_style(), Style::default());
        let theme = TuiTheme::from_value(None).unwrap();
        assert_eq!(theme.base_style(), Style::default());
    }

    #[test]
    fn override_applies_to_category_styles() {
        let theme = TuiTheme::from_value(Some(CSV)).unwrap();
        assert_eq!(
            theme.category_style(NodeCategory::Chain).fg,
            Some(Color::Rgb(0xff, 0x11, 0x11))
        );
        assert_eq!(theme.base_style().bg, Some(Color::Rgb(0x22, 0x22, 0x22)));
    }

    #[test]
    fn palette_slots_follow_ansi_numbering() {
        let theme = TuiTheme::from_value(Some(CSV)).unwrap();
        assert_eq!(theme.key_style().fg, Some(Color::Rgb(0x00, 0xff, 0xff)));
        assert_eq!(theme.muted_style().fg, Some(Color::Rgb(0x1a, 0x1a, 0x1a)));
        assert_eq!(
            theme.category_style(NodeCategory::Ledger).fg,
            Some(Color::Rgb(0x11, 0x11, 0xff))
        );
        assert_eq!(
            theme.category_style(NodeCategory::User).fg,
            Some(Color::Rgb(0x11, 0xff, 0xff))
        );

        let plain = TuiTheme::from_value(None).unwrap();
        assert_eq!(plain.category_style(NodeCategory::Ledger).fg, Some(Color::LightBlue));
        assert_eq!(plain.tab_style(false).fg, Some(Color::Gray));
    }

    #[test]
    fn wrong_length_names_the_variable() {
        let err = TuiTheme::from_value(Some("#000000,#ffffff")).unwrap_err();
        let ThemeError::InvalidEnv { name, reason, .. } = &err;
        assert_eq!(*name, "TRELLIS_PALETTE");
        assert!(reason.contains("expected 18"), "{reason}");
    }
}
