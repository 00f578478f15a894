//! Configuration Model - Validated Display Options
//!
//! A [`Configuration`] is built once per display instance and reused for every
//! value rendered through it. It can only be obtained through validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::settings::{keys, Settings};
use crate::symbology::Symbology;
use crate::validation::{ValidationError, Validator};

pub const DEFAULT_WIDTH: u32 = 100;
pub const DEFAULT_HEIGHT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "SVG")]
    Svg,
    #[serde(rename = "PNG")]
    Png,
    #[serde(rename = "HTMLDIV")]
    HtmlDiv,
    #[serde(rename = "UNICODE")]
    Unicode,
    #[serde(rename = "BINARY")]
    Binary,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Svg,
        OutputFormat::Png,
        OutputFormat::HtmlDiv,
        OutputFormat::Unicode,
        OutputFormat::Binary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Svg => "SVG",
            OutputFormat::Png => "PNG",
            OutputFormat::HtmlDiv => "HTMLDIV",
            OutputFormat::Unicode => "UNICODE",
            OutputFormat::Binary => "BINARY",
        }
    }

    /// Label shown in display-format pickers.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Svg => "SVG Image",
            OutputFormat::Png => "PNG Image",
            OutputFormat::HtmlDiv => "HTML DIV",
            OutputFormat::Unicode => "Unicode String",
            OutputFormat::Binary => "Binary String",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Foreground color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| format!("'{}' is not a #RRGGBB color", s))?;
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Space around the symbol, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }
}

/// Built only by validation; not deserializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    #[serde(rename = "type")]
    symbology: Symbology,
    format: OutputFormat,
    color: Color,
    width: u32,
    height: u32,
    padding: Padding,
    show_value: bool,
    value: String,
}

impl Configuration {
    /// Validate raw settings against every symbology this crate knows.
    ///
    /// Use [`Validator::new`] to validate against a narrower encoder.
    pub fn validate(raw: &Settings) -> Result<Self, ValidationError> {
        Validator::default().validate(raw)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        symbology: Symbology,
        format: OutputFormat,
        color: Color,
        width: u32,
        height: u32,
        padding: Padding,
        show_value: bool,
        value: String,
    ) -> Self {
        Self { symbology, format, color, width, height, padding, show_value, value }
    }

    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn show_value(&self) -> bool {
        self.show_value
    }

    /// Fixed value of a block-style display; empty for per-item displays.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// One-line description for settings overviews.
    pub fn summary(&self) -> String {
        format!("Type: {}, Display format: {}", self.symbology, self.format)
    }

    /// Canonical settings that validate back to this configuration.
    pub fn to_settings(&self) -> Settings {
        Settings::new()
            .with(keys::TYPE, self.symbology.name())
            .with(keys::FORMAT, self.format.name())
            .with(keys::COLOR, self.color.to_string())
            .with(keys::WIDTH, self.width)
            .with(keys::HEIGHT, self.height)
            .with(keys::PADDING_TOP, self.padding.top)
            .with(keys::PADDING_RIGHT, self.padding.right)
            .with(keys::PADDING_BOTTOM, self.padding.bottom)
            .with(keys::PADDING_LEFT, self.padding.left)
            .with(keys::SHOW_VALUE, self.show_value)
            .with(keys::VALUE, self.value.as_str())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            symbology: Symbology::QrCode,
            format: OutputFormat::Svg,
            color: Color::BLACK,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            padding: Padding::default(),
            show_value: false,
            value: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_display() {
        let c: Color = "#FF8000".parse().unwrap();
        assert_eq!(c.rgb(), [255, 128, 0]);
        assert_eq!(c.to_string(), "#ff8000");
    }

    #[test]
    fn test_color_rejects_malformed() {
        for bad in ["000000", "#000", "#00000g", "#0000000", "", "#", "red"] {
            assert!(bad.parse::<Color>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_summary() {
        assert_eq!(Configuration::default().summary(), "Type: QRCODE, Display format: SVG");
    }

    #[test]
    fn test_to_settings_revalidates() {
        let config = Configuration::validate(
            &Settings::new()
                .with(keys::TYPE, "EAN13")
                .with(keys::FORMAT, "PNG")
                .with(keys::COLOR, "#336699")
                .with(keys::PADDING_LEFT, 4u32)
                .with(keys::SHOW_VALUE, true),
        )
        .unwrap();
        assert_eq!(Configuration::validate(&config.to_settings()).unwrap(), config);
    }
}
