use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid color '{0}': expected #rrggbb, #rgb or a CSS color name")]
pub struct ColorError(String);

/// An sRGB color, written out as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgb<u8>);

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return s
                .parse::<Srgb<u8>>()
                .map(Self)
                .map_err(|_| ColorError(s.to_string()));
        }
        palette::named::from_str(&s.to_ascii_lowercase())
            .map(Self)
            .ok_or_else(|| ColorError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "Theme::default_glyph")]
    pub glyph: Color,
    #[serde(default = "Theme::default_guide")]
    pub guide: Color,
}

impl Theme {
    fn default_glyph() -> Color {
        Color::new(0x00, 0x09, 0xf9)
    }

    fn default_guide() -> Color {
        Color::new(0x00, 0x00, 0xff)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            glyph: Self::default_glyph(),
            guide: Self::default_guide(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        let cases = vec![
            ("#0009F9", "#0009f9"),
            ("#fff", "#ffffff"),
            ("blue", "#0000ff"),
            ("Red", "#ff0000"),
        ];

        for (input, expected) in cases {
            let color: Color = input.parse().unwrap();
            assert_eq!(color.to_string(), expected);
        }
    }

    #[test]
    fn test_invalid_colors() {
        assert!("#12".parse::<Color>().is_err());
        assert!("not-a-color".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn test_theme_deserialization() {
        let theme: Theme = serde_json::from_str(r##"{"glyph": "#112233"}"##).unwrap();
        assert_eq!(theme.glyph.to_string(), "#112233");
        assert_eq!(theme.guide, Theme::default().guide);
    }
}
