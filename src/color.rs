use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB color used for configuration and drawing.
///
/// Written in config files either as a hex string (`"#c89600"`) or as a CSS
/// color name (`"black"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from hex string like "#FF0000" or "FF0000"
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Look up a CSS/SVG color name such as "goldenrod"
    pub fn from_name(name: &str) -> Option<Self> {
        let rgb = palette::named::from_str(&name.to_lowercase())?;
        Some(Self::new(rgb.red, rgb.green, rgb.blue))
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for RgbColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s).ok_or_else(|| format!("Invalid hex color: {}", s));
        }
        Self::from_name(s)
            .or_else(|| Self::from_hex(s))
            .ok_or_else(|| format!("Unknown color: {}", s))
    }
}

impl Serialize for RgbColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RgbColor::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!("#c89600".parse(), Ok(RgbColor::new(200, 150, 0)));
        assert_eq!("C89600".parse(), Ok(RgbColor::new(200, 150, 0)));
        assert!("#c8960".parse::<RgbColor>().is_err());
        assert!("#gg0000".parse::<RgbColor>().is_err());
        // Six bytes, but not six hex digits
        assert!("aéabc".parse::<RgbColor>().is_err());
        assert!("#aéabc".parse::<RgbColor>().is_err());
        assert_eq!(RgbColor::from_hex("ééé"), None);
    }

    #[test]
    fn parses_css_names() {
        assert_eq!("black".parse(), Ok(RgbColor::BLACK));
        assert_eq!("White".parse(), Ok(RgbColor::WHITE));
        assert!("not-a-color".parse::<RgbColor>().is_err());
    }

    #[test]
    fn displays_as_lowercase_hex() {
        assert_eq!(RgbColor::new(200, 150, 0).to_string(), "#c89600");
    }
}
