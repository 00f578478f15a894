//! Validation System - Raw Settings to Configuration
//!
//! Every field is parsed and range-checked before an encoder ever sees it.
//! The first offending field is reported.

use serde::Serialize;
use thiserror::Error;

use crate::config::{Color, Configuration, OutputFormat, Padding, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::encoder::Encoder;
use crate::settings::{keys, SettingValue, Settings};
use crate::symbology::Symbology;

pub const MAX_DIMENSION: u32 = 10_000;
pub const MAX_PADDING: u32 = 9_999;

/// Malformed or out-of-range configuration input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validator bound to the symbology set of one encoder.
#[derive(Debug, Clone)]
pub struct Validator {
    supported: Vec<Symbology>,
}

impl Validator {
    pub fn new(supported: Vec<Symbology>) -> Self {
        Self { supported }
    }

    pub fn for_encoder<E: Encoder + ?Sized>(encoder: &E) -> Self {
        Self::new(encoder.supported_types())
    }

    pub fn validate(&self, raw: &Settings) -> Result<Configuration, ValidationError> {
        let symbology = self.symbology(raw.get(keys::TYPE))?;
        let format = output_format(raw.get(keys::FORMAT))?;
        let color = color(raw.get(keys::COLOR))?;
        let width = bounded(keys::WIDTH, raw.get(keys::WIDTH), DEFAULT_WIDTH, 1, MAX_DIMENSION)?;
        let height = bounded(keys::HEIGHT, raw.get(keys::HEIGHT), DEFAULT_HEIGHT, 1, MAX_DIMENSION)?;
        let padding = Padding {
            top: bounded(keys::PADDING_TOP, raw.get(keys::PADDING_TOP), 0, 0, MAX_PADDING)?,
            right: bounded(keys::PADDING_RIGHT, raw.get(keys::PADDING_RIGHT), 0, 0, MAX_PADDING)?,
            bottom: bounded(keys::PADDING_BOTTOM, raw.get(keys::PADDING_BOTTOM), 0, 0, MAX_PADDING)?,
            left: bounded(keys::PADDING_LEFT, raw.get(keys::PADDING_LEFT), 0, 0, MAX_PADDING)?,
        };
        let show_value = flag(keys::SHOW_VALUE, raw.get(keys::SHOW_VALUE))?;
        let value = text(keys::VALUE, raw.get(keys::VALUE))?;

        Ok(Configuration::from_parts(
            symbology, format, color, width, height, padding, show_value, value,
        ))
    }

    fn symbology(&self, raw: Option<&SettingValue>) -> Result<Symbology, ValidationError> {
        let name = match raw {
            None => return self.check_supported(Symbology::QrCode),
            Some(SettingValue::Text(s)) => s.as_str(),
            Some(other) => {
                return Err(ValidationError::new(
                    keys::TYPE,
                    format!("expected a barcode type name, got {}", other.describe()),
                ))
            }
        };
        let symbology = name
            .parse::<Symbology>()
            .map_err(|_| ValidationError::new(keys::TYPE, format!("unknown barcode type '{}'", name)))?;
        self.check_supported(symbology)
    }

    fn check_supported(&self, symbology: Symbology) -> Result<Symbology, ValidationError> {
        if self.supported.contains(&symbology) {
            Ok(symbology)
        } else {
            Err(ValidationError::new(
                keys::TYPE,
                format!("barcode type '{}' is not supported by the encoder", symbology),
            ))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Symbology::ALL.to_vec())
    }
}

fn output_format(raw: Option<&SettingValue>) -> Result<OutputFormat, ValidationError> {
    match raw {
        None => Ok(OutputFormat::Svg),
        Some(SettingValue::Text(s)) => s.parse().map_err(|_| {
            ValidationError::new(
                keys::FORMAT,
                format!("unknown display format '{}', expected one of SVG, PNG, HTMLDIV, UNICODE, BINARY", s),
            )
        }),
        Some(other) => Err(ValidationError::new(
            keys::FORMAT,
            format!("expected a display format name, got {}", other.describe()),
        )),
    }
}

fn color(raw: Option<&SettingValue>) -> Result<Color, ValidationError> {
    match raw {
        None => Ok(Color::BLACK),
        Some(SettingValue::Text(s)) => s.parse().map_err(|e: String| ValidationError::new(keys::COLOR, e)),
        Some(other) => Err(ValidationError::new(
            keys::COLOR,
            format!("'{}' is not a #RRGGBB color", other.describe()),
        )),
    }
}

fn bounded(
    field: &str,
    raw: Option<&SettingValue>,
    default: u32,
    min: u32,
    max: u32,
) -> Result<u32, ValidationError> {
    let n = match raw {
        None => return Ok(default),
        Some(SettingValue::Int(i)) => *i,
        Some(SettingValue::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::new(field, format!("'{}' is not a whole number", s.trim())))?,
        Some(SettingValue::Bool(b)) => {
            return Err(ValidationError::new(field, format!("'{}' is not a whole number", b)))
        }
    };
    if n < i64::from(min) || n > i64::from(max) {
        return Err(ValidationError::new(
            field,
            format!("{} is out of range {}..={}", n, min, max),
        ));
    }
    // In range, so the narrowing cannot fail.
    u32::try_from(n).map_err(|e| ValidationError::new(field, e.to_string()))
}

fn flag(field: &str, raw: Option<&SettingValue>) -> Result<bool, ValidationError> {
    match raw {
        None => Ok(false),
        Some(SettingValue::Bool(b)) => Ok(*b),
        Some(SettingValue::Int(0)) => Ok(false),
        Some(SettingValue::Int(1)) => Ok(true),
        Some(SettingValue::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            other => Err(ValidationError::new(field, format!("'{}' is not a boolean", other))),
        },
        Some(other) => Err(ValidationError::new(
            field,
            format!("'{}' is not a boolean", other.describe()),
        )),
    }
}

fn text(field: &str, raw: Option<&SettingValue>) -> Result<String, ValidationError> {
    match raw {
        None => Ok(String::new()),
        Some(SettingValue::Text(s)) => Ok(s.clone()),
        Some(SettingValue::Int(i)) => Ok(i.to_string()),
        Some(SettingValue::Bool(_)) => Err(ValidationError::new(field, "expected text")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(settings: Settings) -> String {
        Configuration::validate(&settings).unwrap_err().field
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::validate(&Settings::new()).unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_text_numbers_accepted() {
        let config = Configuration::validate(
            &Settings::new().with(keys::WIDTH, " 250 ").with(keys::PADDING_TOP, "12"),
        )
        .unwrap();
        assert_eq!(config.width(), 250);
        assert_eq!(config.padding().top, 12);
    }

    #[test]
    fn test_dimension_bounds() {
        assert_eq!(field_of(Settings::new().with(keys::WIDTH, 0u32)), "width");
        assert_eq!(field_of(Settings::new().with(keys::HEIGHT, "0")), "height");
        assert_eq!(field_of(Settings::new().with(keys::WIDTH, 10_001u32)), "width");
        assert_eq!(field_of(Settings::new().with(keys::HEIGHT, "tall")), "height");
        assert!(Configuration::validate(&Settings::new().with(keys::WIDTH, MAX_DIMENSION)).is_ok());
    }

    #[test]
    fn test_padding_bounds() {
        assert_eq!(field_of(Settings::new().with(keys::PADDING_LEFT, -1i64)), "padding_left");
        assert_eq!(field_of(Settings::new().with(keys::PADDING_RIGHT, "10000")), "padding_right");
        assert_eq!(field_of(Settings::new().with(keys::PADDING_BOTTOM, true)), "padding_bottom");
    }

    #[test]
    fn test_hyphenated_padding_keys_ignored() {
        let config = Configuration::validate(&Settings::new().with("padding-top", 20u32)).unwrap();
        assert_eq!(config.padding(), Padding::default());
    }

    #[test]
    fn test_unsupported_type_for_encoder() {
        let validator = Validator::new(vec![Symbology::Ean13]);
        let err = validator.validate(&Settings::new()).unwrap_err();
        assert_eq!(err.field, "type");
        assert!(validator.validate(&Settings::new().with(keys::TYPE, "EAN13")).is_ok());
    }

    #[test]
    fn test_show_value_flag() {
        let on = Configuration::validate(&Settings::new().with(keys::SHOW_VALUE, "yes")).unwrap();
        assert!(on.show_value());
        assert_eq!(field_of(Settings::new().with(keys::SHOW_VALUE, "maybe")), "show_value");
    }

    #[test]
    fn test_names_and_colors_match_exactly() {
        assert_eq!(field_of(Settings::new().with(keys::TYPE, " QRCODE")), "type");
        assert_eq!(field_of(Settings::new().with(keys::FORMAT, "UNICODE ")), "format");
        assert_eq!(field_of(Settings::new().with(keys::COLOR, " #000000")), "color");
        assert_eq!(field_of(Settings::new().with(keys::COLOR, "#000000\n")), "color");
    }
}
