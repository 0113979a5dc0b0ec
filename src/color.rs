// SPDX-License-Identifier: GPL-3.0-or-later
use std::convert::From;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};

/// An 8-bit RGB color, used for the boundary highlight.
///
/// This type can be formatted as a hex code using the standard formatting syntax. The formatted
/// output will have a leading '#'.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl From<&image::Rgb<u8>> for Color {
    fn from(pixel: &image::Rgb<u8>) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb(color.as_array())
    }
}

impl fmt::LowerHex for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.red(),
            self.green(),
            self.blue()
        )
    }
}

impl fmt::UpperHex for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}",
            self.red(),
            self.green(),
            self.blue()
        )
    }
}

impl Color {
    pub const BLACK: Self = Self::new(u8::MIN, u8::MIN, u8::MIN);

    pub const WHITE: Self = Self::new(u8::MAX, u8::MAX, u8::MAX);

    pub const RED: Self = Self::new(u8::MAX, u8::MIN, u8::MIN);

    pub const GREEN: Self = Self::new(u8::MIN, u8::MAX, u8::MIN);

    pub const BLUE: Self = Self::new(u8::MIN, u8::MIN, u8::MAX);

    pub const YELLOW: Self = Self::new(u8::MAX, u8::MAX, u8::MIN);

    pub const MAGENTA: Self = Self::new(u8::MAX, u8::MIN, u8::MAX);

    pub const CYAN: Self = Self::new(u8::MIN, u8::MAX, u8::MAX);

    /// Create a new [Color] with the given 8-bit color values.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// The 8-bit color value of the red component.
    pub fn red(&self) -> u8 {
        self.red
    }

    /// The 8-bit color value of the green component.
    pub fn green(&self) -> u8 {
        self.green
    }

    /// The 8-bit color value of the blue component.
    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn as_array(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// The luma of this color using the ITU-R BT.601 weights (0.299, 0.587, 0.114).
    ///
    /// The weights are applied in 14-bit fixed point and rounded, which keeps the result exact
    /// for the extremes (black is 0, white is 255) and for grays (every channel equal).
    pub fn luma(&self) -> u8 {
        const SHIFT: u32 = 14;
        const RED_WEIGHT: u32 = 4899;
        const GREEN_WEIGHT: u32 = 9617;
        const BLUE_WEIGHT: u32 = 1868;
        let weighted = self.red as u32 * RED_WEIGHT
            + self.green as u32 * GREEN_WEIGHT
            + self.blue as u32 * BLUE_WEIGHT;
        ((weighted + (1 << (SHIFT - 1))) >> SHIFT) as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" is neither a color name nor an \"#rrggbb\" hex code",
            self.0
        )
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(color_str: &str) -> Result<Self, Self::Err> {
        let normalized = color_str.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "red" => return Ok(Self::RED),
            "green" => return Ok(Self::GREEN),
            "blue" => return Ok(Self::BLUE),
            "yellow" => return Ok(Self::YELLOW),
            "magenta" => return Ok(Self::MAGENTA),
            "cyan" => return Ok(Self::CYAN),
            _ => (),
        }
        let hex = normalized.strip_prefix('#').unwrap_or(&normalized);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(color_str.to_string()));
        }
        let component = |start: usize| {
            u8::from_str_radix(&hex[start..start + 2], 16)
                .map_err(|_| ParseColorError(color_str.to_string()))
        };
        Ok(Self::new(component(0)?, component(2)?, component(4)?))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let color_str: String = Deserialize::deserialize(deserializer)?;
        color_str.parse().map_err(|_| {
            de::Error::invalid_value(
                de::Unexpected::Str(&color_str),
                &"a color name or an \"#rrggbb\" hex code",
            )
        })
    }
}

#[cfg(test)]
mod test {
    use super::Color;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        color: Color,
    }

    #[test]
    fn parse_hex() {
        assert_eq!("#ff0000".parse(), Ok(Color::RED));
        assert_eq!("00FF00".parse(), Ok(Color::GREEN));
        assert_eq!("#1a2B3c".parse(), Ok(Color::new(0x1a, 0x2b, 0x3c)));
    }

    #[test]
    fn parse_names() {
        assert_eq!("Red".parse(), Ok(Color::RED));
        assert_eq!(" cyan ".parse(), Ok(Color::CYAN));
    }

    #[test]
    fn parse_invalid() {
        assert!("#ff00".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("crimson".parse::<Color>().is_err());
    }

    #[test]
    fn format_hex() {
        let color = Color::new(0xab, 0x01, 0xff);
        assert_eq!(format!("{:x}", color), "#ab01ff");
        assert_eq!(format!("{:X}", color), "#AB01FF");
    }

    #[test]
    fn deserialize() {
        let parsed: Wrapper = toml::from_str("color = \"#0000ff\"").unwrap();
        assert_eq!(parsed.color, Color::BLUE);
        let invalid: Result<Wrapper, _> = toml::from_str("color = \"mauve\"");
        assert!(invalid.is_err());
    }

    #[test]
    fn luma_extremes() {
        assert_eq!(Color::BLACK.luma(), 0);
        assert_eq!(Color::WHITE.luma(), 255);
        assert_eq!(Color::new(128, 128, 128).luma(), 128);
    }

    #[test]
    fn luma_is_weighted() {
        // Green contributes the most, blue the least.
        assert_eq!(Color::RED.luma(), 76);
        assert_eq!(Color::GREEN.luma(), 150);
        assert_eq!(Color::BLUE.luma(), 29);
    }
}
