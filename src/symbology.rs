//! Symbology Catalogue

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Barcode encoding schemes known to this crate.
///
/// Names follow the conventional upper-case identifiers (`QRCODE,H`, `CODE39+`, ...).
/// Matching is exact: `qrcode` is not a symbology name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbology {
    #[serde(rename = "QRCODE")]
    QrCode,
    #[serde(rename = "QRCODE,L")]
    QrCodeL,
    #[serde(rename = "QRCODE,M")]
    QrCodeM,
    #[serde(rename = "QRCODE,Q")]
    QrCodeQ,
    #[serde(rename = "QRCODE,H")]
    QrCodeH,
    #[serde(rename = "CODE128")]
    Code128,
    #[serde(rename = "CODE128A")]
    Code128A,
    #[serde(rename = "CODE128B")]
    Code128B,
    #[serde(rename = "CODE128C")]
    Code128C,
    #[serde(rename = "CODE39")]
    Code39,
    #[serde(rename = "CODE39+")]
    Code39Checked,
    #[serde(rename = "CODE93")]
    Code93,
    #[serde(rename = "CODE11")]
    Code11,
    #[serde(rename = "CODABAR")]
    Codabar,
    #[serde(rename = "EAN13")]
    Ean13,
    #[serde(rename = "EAN8")]
    Ean8,
    #[serde(rename = "EAN5")]
    Ean5,
    #[serde(rename = "EAN2")]
    Ean2,
    #[serde(rename = "UPCA")]
    UpcA,
    #[serde(rename = "I25")]
    Interleaved2of5,
    #[serde(rename = "S25")]
    Standard2of5,
}

impl Symbology {
    pub const ALL: [Symbology; 21] = [
        Symbology::QrCode,
        Symbology::QrCodeL,
        Symbology::QrCodeM,
        Symbology::QrCodeQ,
        Symbology::QrCodeH,
        Symbology::Code128,
        Symbology::Code128A,
        Symbology::Code128B,
        Symbology::Code128C,
        Symbology::Code39,
        Symbology::Code39Checked,
        Symbology::Code93,
        Symbology::Code11,
        Symbology::Codabar,
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::Ean5,
        Symbology::Ean2,
        Symbology::UpcA,
        Symbology::Interleaved2of5,
        Symbology::Standard2of5,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Symbology::QrCode => "QRCODE",
            Symbology::QrCodeL => "QRCODE,L",
            Symbology::QrCodeM => "QRCODE,M",
            Symbology::QrCodeQ => "QRCODE,Q",
            Symbology::QrCodeH => "QRCODE,H",
            Symbology::Code128 => "CODE128",
            Symbology::Code128A => "CODE128A",
            Symbology::Code128B => "CODE128B",
            Symbology::Code128C => "CODE128C",
            Symbology::Code39 => "CODE39",
            Symbology::Code39Checked => "CODE39+",
            Symbology::Code93 => "CODE93",
            Symbology::Code11 => "CODE11",
            Symbology::Codabar => "CODABAR",
            Symbology::Ean13 => "EAN13",
            Symbology::Ean8 => "EAN8",
            Symbology::Ean5 => "EAN5",
            Symbology::Ean2 => "EAN2",
            Symbology::UpcA => "UPCA",
            Symbology::Interleaved2of5 => "I25",
            Symbology::Standard2of5 => "S25",
        }
    }

    /// Two-dimensional symbologies produce a square module matrix;
    /// everything else is a single row of bars.
    pub fn is_matrix(self) -> bool {
        matches!(
            self,
            Symbology::QrCode
                | Symbology::QrCodeL
                | Symbology::QrCodeM
                | Symbology::QrCodeQ
                | Symbology::QrCodeH
        )
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSymbology(pub String);

impl FromStr for Symbology {
    type Err = UnknownSymbology;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbology::ALL
            .iter()
            .copied()
            .find(|sym| sym.name() == s)
            .ok_or_else(|| UnknownSymbology(s.to_string()))
    }
}
