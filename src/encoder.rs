//! Encoder - Symbol Construction Capability
//!
//! The renderer never builds modules itself; it asks an [`Encoder`].
//! [`StandardEncoder`] covers QR codes through `qrcode` and the linear
//! symbologies through `barcoders`. Hosts may plug in their own.

use barcoders::sym::codabar::Codabar;
use barcoders::sym::code11::Code11;
use barcoders::sym::code128::Code128;
use barcoders::sym::code39::Code39;
use barcoders::sym::code93::Code93;
use barcoders::sym::ean13::EAN13;
use barcoders::sym::ean8::EAN8;
use barcoders::sym::ean_supp::EANSUPP;
use barcoders::sym::tf::TF;
use qrcode::{EcLevel, QrCode};
use std::fmt::Display;
use thiserror::Error;

use crate::config::{Color, Configuration, Padding};
use crate::symbol::{Geometry, Symbol};
use crate::symbology::Symbology;

// Code 128 character-set selectors understood by `barcoders`.
const CODE128_SET_A: char = 'À';
const CODE128_SET_B: char = 'Ɓ';
const CODE128_SET_C: char = 'Ć';

const CODE39_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Empty value")]
    EmptyValue,

    #[error("Unsupported barcode type: {0}")]
    Unsupported(Symbology),

    #[error("{0}")]
    Rejected(String),

    #[error("PNG canvas of {width}x{height} pixels is too large")]
    CanvasTooLarge { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Everything an encoder needs to build one symbol.
#[derive(Debug, Clone)]
pub struct EncodeRequest<'a> {
    pub symbology: Symbology,
    pub value: &'a str,
    pub width: u32,
    pub height: u32,
    pub color: Color,
    pub padding: Padding,
}

impl<'a> EncodeRequest<'a> {
    pub fn from_config(config: &Configuration, value: &'a str) -> Self {
        Self {
            symbology: config.symbology(),
            value,
            width: config.width(),
            height: config.height(),
            color: config.color(),
            padding: config.padding(),
        }
    }

    fn geometry(&self) -> Geometry {
        Geometry {
            width: self.width,
            height: self.height,
            color: self.color,
            padding: self.padding,
        }
    }
}

pub trait Encoder {
    fn supported_types(&self) -> Vec<Symbology>;

    fn encode(&self, request: &EncodeRequest<'_>) -> Result<Symbol, EncodeError>;
}

impl<E: Encoder + ?Sized> Encoder for &E {
    fn supported_types(&self) -> Vec<Symbology> {
        (**self).supported_types()
    }

    fn encode(&self, request: &EncodeRequest<'_>) -> Result<Symbol, EncodeError> {
        (**self).encode(request)
    }
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn supported_types(&self) -> Vec<Symbology> {
        (**self).supported_types()
    }

    fn encode(&self, request: &EncodeRequest<'_>) -> Result<Symbol, EncodeError> {
        (**self).encode(request)
    }
}

/// Default encoder backed by the `qrcode` and `barcoders` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEncoder;

impl Encoder for StandardEncoder {
    fn supported_types(&self) -> Vec<Symbology> {
        Symbology::ALL.to_vec()
    }

    fn encode(&self, request: &EncodeRequest<'_>) -> Result<Symbol, EncodeError> {
        let value = request.value;
        if value.is_empty() {
            return Err(EncodeError::EmptyValue);
        }

        let (extended, columns, modules) = match request.symbology {
            Symbology::QrCode | Symbology::QrCodeL => qr(value, EcLevel::L)?,
            Symbology::QrCodeM => qr(value, EcLevel::M)?,
            Symbology::QrCodeQ => qr(value, EcLevel::Q)?,
            Symbology::QrCodeH => qr(value, EcLevel::H)?,
            Symbology::Code128 => {
                let set = if value.len() % 2 == 0 && is_digits(value) {
                    CODE128_SET_C
                } else {
                    CODE128_SET_B
                };
                code128(value, set)?
            }
            Symbology::Code128A => code128(value, CODE128_SET_A)?,
            Symbology::Code128B => code128(value, CODE128_SET_B)?,
            Symbology::Code128C => code128(value, CODE128_SET_C)?,
            Symbology::Code39 => row(value.to_string(), Code39::new(value).map(|b| b.encode()))?,
            Symbology::Code39Checked => {
                let check = code39_check_char(value).ok_or_else(|| {
                    EncodeError::Rejected(format!("'{}' contains characters outside Code 39", value))
                })?;
                row(format!("{}{}", value, check), Code39::with_checksum(value).map(|b| b.encode()))?
            }
            Symbology::Code93 => row(value.to_string(), Code93::new(value).map(|b| b.encode()))?,
            Symbology::Code11 => row(value.to_string(), Code11::new(value).map(|b| b.encode()))?,
            Symbology::Codabar => row(value.to_string(), Codabar::new(value).map(|b| b.encode()))?,
            Symbology::Ean13 => {
                let body = ean_body(value, 12)?;
                row(with_check_digit(&body), EAN13::new(body.as_str()).map(|b| b.encode()))?
            }
            Symbology::UpcA => {
                // UPC-A is EAN-13 with a leading zero.
                let body = ean_body(value, 11)?;
                let ean = format!("0{}", body);
                row(with_check_digit(&body), EAN13::new(ean.as_str()).map(|b| b.encode()))?
            }
            Symbology::Ean8 => {
                let body = ean_body(value, 7)?;
                row(with_check_digit(&body), EAN8::new(body.as_str()).map(|b| b.encode()))?
            }
            Symbology::Ean5 | Symbology::Ean2 => {
                let len = if request.symbology == Symbology::Ean5 { 5 } else { 2 };
                if value.len() != len || !is_digits(value) {
                    return Err(EncodeError::Rejected(format!(
                        "{} requires exactly {} digits",
                        request.symbology, len
                    )));
                }
                row(value.to_string(), EANSUPP::new(value).map(|b| b.encode()))?
            }
            Symbology::Interleaved2of5 => row(value.to_string(), TF::interleaved(value).map(|b| b.encode()))?,
            Symbology::Standard2of5 => row(value.to_string(), TF::standard(value).map(|b| b.encode()))?,
        };

        Symbol::new(request.symbology, extended, columns, modules, request.geometry())
    }
}

type Encoded = (String, usize, Vec<bool>);

fn qr(value: &str, level: EcLevel) -> Result<Encoded, EncodeError> {
    let code = QrCode::with_error_correction_level(value.as_bytes(), level)
        .map_err(|e| EncodeError::Rejected(e.to_string()))?;
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();
    Ok((value.to_string(), code.width(), modules))
}

fn code128(value: &str, set: char) -> Result<Encoded, EncodeError> {
    let data = format!("{}{}", set, value);
    row(value.to_string(), Code128::new(data.as_str()).map(|b| b.encode()))
}

fn row<E: Display>(extended: String, encoded: Result<Vec<u8>, E>) -> Result<Encoded, EncodeError> {
    let bits = encoded.map_err(|e| EncodeError::Rejected(e.to_string()))?;
    let modules: Vec<bool> = bits.into_iter().map(|b| b != 0).collect();
    Ok((extended, modules.len(), modules))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Strip and verify an optional trailing check digit, leaving `len` digits.
fn ean_body(value: &str, len: usize) -> Result<String, EncodeError> {
    if !is_digits(value) {
        return Err(EncodeError::Rejected(format!("'{}' must contain digits only", value)));
    }
    if value.len() == len {
        return Ok(value.to_string());
    }
    if value.len() == len + 1 {
        let body = &value[..len];
        if with_check_digit(body) == value {
            return Ok(body.to_string());
        }
        return Err(EncodeError::Rejected(format!("'{}' has an invalid check digit", value)));
    }
    Err(EncodeError::Rejected(format!(
        "'{}' must be {} or {} digits long",
        value,
        len,
        len + 1
    )))
}

/// GS1 mod-10 check digit, weights 3 and 1 from the right.
fn with_check_digit(digits: &str) -> String {
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    let check = (10 - sum % 10) % 10;
    format!("{}{}", digits, check)
}

fn code39_check_char(value: &str) -> Option<char> {
    let mut sum = 0;
    for c in value.chars() {
        sum += CODE39_CHARSET.find(c)?;
    }
    CODE39_CHARSET.chars().nth(sum % 43)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(symbology: Symbology, value: &str) -> EncodeRequest<'_> {
        EncodeRequest {
            symbology,
            value,
            width: 100,
            height: 100,
            color: Color::BLACK,
            padding: Padding::default(),
        }
    }

    #[test]
    fn test_check_digits() {
        assert_eq!(with_check_digit("590123412345"), "5901234123457");
        assert_eq!(with_check_digit("9638507"), "96385074");
        assert_eq!(with_check_digit("03600029145"), "036000291452");
    }

    #[test]
    fn test_ean13_extended_code_has_check_digit() {
        let symbol = StandardEncoder.encode(&request(Symbology::Ean13, "590123412345")).unwrap();
        assert_eq!(symbol.extended_code(), "5901234123457");
        assert_eq!(symbol.rows(), 1);
        assert_eq!(symbol.columns(), 95);
    }

    #[test]
    fn test_ean13_accepts_full_code() {
        let symbol = StandardEncoder.encode(&request(Symbology::Ean13, "5901234123457")).unwrap();
        assert_eq!(symbol.extended_code(), "5901234123457");
        assert!(StandardEncoder.encode(&request(Symbology::Ean13, "5901234123450")).is_err());
    }

    #[test]
    fn test_ean13_rejects_letters() {
        let err = StandardEncoder.encode(&request(Symbology::Ean13, "ABC")).unwrap_err();
        assert!(matches!(err, EncodeError::Rejected(_)));
    }

    #[test]
    fn test_qr_is_square() {
        let symbol = StandardEncoder.encode(&request(Symbology::QrCode, "https://example.com")).unwrap();
        assert_eq!(symbol.rows(), symbol.columns());
        assert!(symbol.columns() >= 21);
        assert_eq!(symbol.extended_code(), "https://example.com");
    }

    #[test]
    fn test_code39_checked() {
        assert_eq!(code39_check_char("CODE39"), Some('W'));
        let symbol = StandardEncoder.encode(&request(Symbology::Code39Checked, "CODE39")).unwrap();
        assert_eq!(symbol.extended_code(), "CODE39W");
        assert_eq!(code39_check_char("lower"), None);
    }

    #[test]
    fn test_empty_value_rejected() {
        assert!(matches!(
            StandardEncoder.encode(&request(Symbology::Code128, "")),
            Err(EncodeError::EmptyValue)
        ));
    }

    #[test]
    fn test_supplements_length() {
        assert!(StandardEncoder.encode(&request(Symbology::Ean5, "52495")).is_ok());
        assert!(StandardEncoder.encode(&request(Symbology::Ean2, "123")).is_err());
    }
}
