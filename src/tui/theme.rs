// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

/// Optional palette override via `GALATEA_THEME`:
/// `fg,bg,accent,focus,error` as `#RRGGBB` (or `default` to keep the
/// terminal color). Absent or empty, the terminal defaults apply.
pub(crate) const THEME_ENV: &str = "GALATEA_THEME";

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<Palette>,
}

#[derive(Debug, Clone)]
struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    focus: Color,
    error: Color,
}

impl Palette {
    const CSV_LEN: usize = 5;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg,accent,focus,error), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        Ok(Self {
            fg: parse_palette_color(parts[0])?,
            bg: parse_palette_color(parts[1])?,
            accent: parse_palette_color(parts[2])?,
            focus: parse_palette_color(parts[3])?,
            error: parse_palette_color(parts[4])?,
        })
    }
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let value = match env::var(THEME_ENV) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => return Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    value: "<non-unicode>".to_owned(),
                });
            }
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let palette = Palette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
            value: format!("{trimmed} ({error})"),
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

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.focus_color())
        } else {
            self.base_style()
        }
    }

    pub(crate) fn key_style(&self) -> Style {
        self.base_style().fg(self.accent_color())
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style()
            .add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn toast_style(&self, is_error: bool) -> Style {
        if is_error {
            self.base_style().fg(self.error_color())
        } else {
            self.base_style().fg(self.accent_color())
        }
    }

    fn accent_color(&self) -> Color {
        self.palette
            .as_ref()
            .map(|p| p.accent)
            .unwrap_or(Color::Cyan)
    }

    fn focus_color(&self) -> Color {
        self.palette
            .as_ref()
            .map(|p| p.focus)
            .unwrap_or(Color::Yellow)
    }

    fn error_color(&self) -> Color {
        self.palette.as_ref().map(|p| p.error).unwrap_or(Color::Red)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ThemeError {
    InvalidEnv { value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { value } => {
                write!(f, "invalid {THEME_ENV} value: {value}")
            }
        }
    }
}

impl Error for ThemeError {}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }
    if trimmed.eq_ignore_ascii_case("default") {
        return Ok(Color::Reset);
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    Ok(Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::{parse_palette_color, Palette};
    use ratatui::style::Color;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            parse_palette_color("#1a2b3c"),
            Ok(Color::Rgb(0x1A, 0x2B, 0x3C))
        );
        assert_eq!(parse_palette_color("default"), Ok(Color::Reset));
        assert!(parse_palette_color("#12345").is_err());
        assert!(parse_palette_color("blue-ish").is_err());
    }

    #[test]
    fn csv_needs_exactly_five_entries() {
        assert!(Palette::parse_csv("#000000,#ffffff,#00ffff,#ffff00,#ff0000").is_ok());
        assert!(Palette::parse_csv("#000000,#ffffff").is_err());
    }
}
