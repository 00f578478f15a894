//! Barcode Rendering Facade
//!
//! Encodes one value under one configuration and materializes the text
//! representations up front, so callers can pick a format afterwards without
//! touching the encoder again. The PNG raster is the one costly output; it is
//! only built when the configuration asks for PNG. Encoder failures come back
//! as [`RenderError`]; nothing here logs.

use serde::Serialize;
use thiserror::Error;

use crate::config::{Configuration, OutputFormat};
use crate::encoder::{EncodeError, EncodeRequest, Encoder, StandardEncoder};
use crate::hashing::render_fingerprint;
use crate::symbol::{GRID_OFF, GRID_ON};
use crate::symbology::Symbology;
use crate::validation::Validator;

pub const UNICODE_OFF: char = '\u{00A0}';
pub const UNICODE_ON: char = '\u{2584}';

/// The encoder rejected a value for the configured symbology.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Error: {message}, given: {value}")]
pub struct RenderError {
    pub message: String,
    pub value: String,
}

impl RenderError {
    fn new(err: impl ToString, value: &str) -> Self {
        Self {
            message: err.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub symbology: Symbology,
    pub value: String,
    pub extended_code: String,
    pub svg: String,
    /// Present only when the configuration's format is PNG.
    pub png: Option<Vec<u8>>,
    pub html_div: String,
    pub unicode_grid: String,
    pub binary_grid: String,
    pub fingerprint: String,
}

pub struct BarcodeRenderer<E = StandardEncoder> {
    encoder: E,
}

impl<E: Encoder> BarcodeRenderer<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn supported_types(&self) -> Vec<Symbology> {
        self.encoder.supported_types()
    }

    /// Validator restricted to what this renderer's encoder supports.
    pub fn validator(&self) -> Validator {
        Validator::for_encoder(&self.encoder)
    }

    pub fn render(&self, config: &Configuration, value: &str) -> Result<RenderResult, RenderError> {
        let symbology = config.symbology();
        if !self.encoder.supported_types().contains(&symbology) {
            return Err(RenderError::new(EncodeError::Unsupported(symbology), value));
        }

        let symbol = self
            .encoder
            .encode(&EncodeRequest::from_config(config, value))
            .map_err(|e| RenderError::new(e, value))?;

        let png = match config.format() {
            OutputFormat::Png => Some(symbol.to_png().map_err(|e| RenderError::new(e, value))?),
            _ => None,
        };
        let fingerprint = render_fingerprint(config, value).map_err(|e| RenderError::new(e, value))?;

        Ok(RenderResult {
            symbology,
            value: value.to_string(),
            extended_code: symbol.extended_code().to_string(),
            svg: symbol.to_svg(),
            png,
            html_div: symbol.to_html_div(),
            unicode_grid: symbol.to_grid(UNICODE_OFF, UNICODE_ON),
            binary_grid: symbol.to_grid(GRID_OFF, GRID_ON),
            fingerprint,
        })
    }
}

impl Default for BarcodeRenderer {
    fn default() -> Self {
        Self::new(StandardEncoder)
    }
}
