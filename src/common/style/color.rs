use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::Deserialize;

use crate::common::error::{Error, Result};

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
///
/// # Examples
///
/// ```rust
/// use deckframe::common::RGBColor;
///
/// let red = RGBColor::new(255, 0, 0);
/// let blue = RGBColor::from_hex("#0000FF").unwrap();
/// assert_eq!(red.to_hex(), "FF0000");
/// assert_eq!(blue.b, 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Convert to hex string (without # prefix), as written in `<a:srgbClr val>`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl From<(u8, u8, u8)> for RGBColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// A color slot of the presentation theme (`<a:schemeClr>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Background1,
    Background2,
    Dark1,
    Dark2,
    FollowedHyperlink,
    Hyperlink,
    Light1,
    Light2,
    Text1,
    Text2,
}

/// Normalized theme color names: lowercase with `_`, `-` and spaces removed.
static THEME_COLOR_NAMES: phf::Map<&'static str, ThemeColor> = phf_map! {
    "accent1" => ThemeColor::Accent1,
    "accent2" => ThemeColor::Accent2,
    "accent3" => ThemeColor::Accent3,
    "accent4" => ThemeColor::Accent4,
    "accent5" => ThemeColor::Accent5,
    "accent6" => ThemeColor::Accent6,
    "background1" => ThemeColor::Background1,
    "bg1" => ThemeColor::Background1,
    "background2" => ThemeColor::Background2,
    "bg2" => ThemeColor::Background2,
    "dark1" => ThemeColor::Dark1,
    "dk1" => ThemeColor::Dark1,
    "dark2" => ThemeColor::Dark2,
    "dk2" => ThemeColor::Dark2,
    "followedhyperlink" => ThemeColor::FollowedHyperlink,
    "folhlink" => ThemeColor::FollowedHyperlink,
    "hyperlink" => ThemeColor::Hyperlink,
    "hlink" => ThemeColor::Hyperlink,
    "light1" => ThemeColor::Light1,
    "lt1" => ThemeColor::Light1,
    "light2" => ThemeColor::Light2,
    "lt2" => ThemeColor::Light2,
    "text1" => ThemeColor::Text1,
    "tx1" => ThemeColor::Text1,
    "text2" => ThemeColor::Text2,
    "tx2" => ThemeColor::Text2,
};

impl ThemeColor {
    /// Value of the `val` attribute on `<a:schemeClr>`.
    pub fn as_xml_val(&self) -> &'static str {
        match self {
            Self::Accent1 => "accent1",
            Self::Accent2 => "accent2",
            Self::Accent3 => "accent3",
            Self::Accent4 => "accent4",
            Self::Accent5 => "accent5",
            Self::Accent6 => "accent6",
            Self::Background1 => "bg1",
            Self::Background2 => "bg2",
            Self::Dark1 => "dk1",
            Self::Dark2 => "dk2",
            Self::FollowedHyperlink => "folHlink",
            Self::Hyperlink => "hlink",
            Self::Light1 => "lt1",
            Self::Light2 => "lt2",
            Self::Text1 => "tx1",
            Self::Text2 => "tx2",
        }
    }

    /// Look up a theme color by name. Accepts the XML token (`accent1`, `bg1`)
    /// as well as spelled-out forms such as `ACCENT_1` or `Background 2`.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        THEME_COLOR_NAMES.get(key.as_str()).copied()
    }
}

impl FromStr for ThemeColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown theme color {s:?}")))
    }
}

/// A color in the native DrawingML representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// `<a:srgbClr val="RRGGBB"/>`
    Rgb(RGBColor),
    /// `<a:schemeClr val="accent1"/>`
    Theme(ThemeColor),
}

const ACCEPTED_COLOR_FORMS: &str =
    "provide an RGB triple of 3 integers, a hex code such as \"#1F4E79\", or a theme color such as \"accent1\"";
const ACCEPTED_FONT_COLOR_FORMS: &str =
    "provide an RGB triple of 3 integers, or a hex code such as \"#1F4E79\"";

/// A user-supplied color descriptor.
///
/// Descriptors are kept as given and only resolved into a [`Color`] when a
/// style is applied, so a malformed hex code surfaces as an error at that
/// point.
///
/// # Examples
///
/// ```rust
/// use deckframe::common::{Color, ColorSpec, RGBColor, ThemeColor};
///
/// let spec = ColorSpec::from("#FF8000");
/// assert_eq!(spec.resolve().unwrap(), Color::Rgb(RGBColor::new(255, 128, 0)));
///
/// let spec = ColorSpec::from("ACCENT_2");
/// assert_eq!(spec.resolve().unwrap(), Color::Theme(ThemeColor::Accent2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub enum ColorSpec {
    /// Explicit RGB triple
    Rgb(RGBColor),
    /// Hex code, leading `#` optional
    Hex(String),
    /// Theme color reference
    Theme(ThemeColor),
}

impl ColorSpec {
    /// Resolve into the native color representation.
    pub fn resolve(&self) -> Result<Color> {
        match self {
            Self::Rgb(rgb) => Ok(Color::Rgb(*rgb)),
            Self::Hex(hex) => RGBColor::from_hex(hex).map(Color::Rgb).ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "incorrect color value {hex:?}: {ACCEPTED_COLOR_FORMS}"
                ))
            }),
            Self::Theme(theme) => Ok(Color::Theme(*theme)),
        }
    }

    /// Resolve a font color. Fonts only take explicit RGB values.
    pub fn resolve_rgb(&self) -> Result<RGBColor> {
        match self.resolve() {
            Ok(Color::Rgb(rgb)) => Ok(rgb),
            Ok(Color::Theme(theme)) => Err(Error::InvalidArgument(format!(
                "incorrect font color {}: {ACCEPTED_FONT_COLOR_FORMS}",
                theme.as_xml_val()
            ))),
            Err(_) => Err(Error::InvalidArgument(format!(
                "incorrect font color {self:?}: {ACCEPTED_FONT_COLOR_FORMS}"
            ))),
        }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::Theme(ThemeColor::Accent1)
    }
}

impl From<RGBColor> for ColorSpec {
    fn from(rgb: RGBColor) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<(u8, u8, u8)> for ColorSpec {
    fn from(rgb: (u8, u8, u8)) -> Self {
        Self::Rgb(rgb.into())
    }
}

impl From<ThemeColor> for ColorSpec {
    fn from(theme: ThemeColor) -> Self {
        Self::Theme(theme)
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        match ThemeColor::from_name(s) {
            Some(theme) => Self::Theme(theme),
            None => Self::Hex(s.to_string()),
        }
    }
}

impl From<String> for ColorSpec {
    fn from(s: String) -> Self {
        match ThemeColor::from_name(&s) {
            Some(theme) => Self::Theme(theme),
            None => Self::Hex(s),
        }
    }
}

/// Shapes a color descriptor may take in a configuration file.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Rgb([u8; 3]),
    Text(String),
}

impl TryFrom<ColorRepr> for ColorSpec {
    type Error = Error;

    fn try_from(repr: ColorRepr) -> Result<Self> {
        let spec = match repr {
            ColorRepr::Rgb([r, g, b]) => Self::Rgb(RGBColor::new(r, g, b)),
            ColorRepr::Text(s) => Self::from(s),
        };
        // Reject malformed hex at load time rather than at first use
        spec.resolve()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_with_and_without_marker() {
        assert_eq!(RGBColor::from_hex("1F4E79"), Some(RGBColor::new(0x1F, 0x4E, 0x79)));
        assert_eq!(RGBColor::from_hex("#1f4e79"), Some(RGBColor::new(0x1F, 0x4E, 0x79)));
        assert_eq!(RGBColor::from_hex("#12345"), None);
        assert_eq!(RGBColor::from_hex("GG0000"), None);
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(ThemeColor::from_name("ACCENT_1"), Some(ThemeColor::Accent1));
        assert_eq!(ThemeColor::from_name("bg2"), Some(ThemeColor::Background2));
        assert_eq!(ThemeColor::from_name("Followed Hyperlink"), Some(ThemeColor::FollowedHyperlink));
        assert_eq!(ThemeColor::from_name("ACCENT_7"), None);
        assert_eq!(ThemeColor::Background1.as_xml_val(), "bg1");
    }

    #[test]
    fn test_resolve_three_forms() {
        assert_eq!(
            ColorSpec::from((1, 2, 3)).resolve().unwrap(),
            Color::Rgb(RGBColor::new(1, 2, 3))
        );
        assert_eq!(
            ColorSpec::from("#0A0B0C").resolve().unwrap(),
            Color::Rgb(RGBColor::new(10, 11, 12))
        );
        assert_eq!(
            ColorSpec::from(ThemeColor::Text2).resolve().unwrap(),
            Color::Theme(ThemeColor::Text2)
        );
    }

    #[test]
    fn test_invalid_descriptors() {
        let err = ColorSpec::from("not a color").resolve().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(msg) if msg.contains("RGB triple")));

        let err = ColorSpec::from(ThemeColor::Accent1).resolve_rgb().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(msg) if msg.contains("hex code")));
        assert_eq!(ColorSpec::from("#FFFFFF").resolve_rgb().unwrap(), RGBColor::new(255, 255, 255));
    }
}
