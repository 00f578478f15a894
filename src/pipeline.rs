//! Render Pipeline - Single Entry Point for Display Rendering
//!
//! render, present, and on failure log and move on. A bad value costs one
//! item, never the batch.

use crate::config::Configuration;
use crate::encoder::{Encoder, StandardEncoder};
use crate::log::{RenderLog, TracingLog};
use crate::present::{present, Presentation};
use crate::render::{BarcodeRenderer, RenderError};
use crate::symbology::Symbology;
use crate::validation::Validator;

pub struct RenderPipeline<E = StandardEncoder, L = TracingLog> {
    renderer: BarcodeRenderer<E>,
    log: L,
}

impl<E: Encoder, L: RenderLog> RenderPipeline<E, L> {
    pub fn new(renderer: BarcodeRenderer<E>, log: L) -> Self {
        Self { renderer, log }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// List the symbologies this pipeline can render
    pub fn supported_types(&self) -> Vec<Symbology> {
        self.renderer.supported_types()
    }

    pub fn validator(&self) -> Validator {
        self.renderer.validator()
    }

    pub fn render_one(&self, config: &Configuration, value: &str) -> Result<Presentation, RenderError> {
        match self.renderer.render(config, value).and_then(|result| present(&result, config)) {
            Ok(shown) => Ok(shown),
            Err(err) => {
                self.log.render_failed(&err);
                Err(err)
            }
        }
    }

    /// One result per value, in input order.
    pub fn render_batch<I, S>(&self, config: &Configuration, values: I) -> Vec<Result<Presentation, RenderError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .map(|value| self.render_one(config, value.as_ref()))
            .collect()
    }

    /// Render the configuration's own fixed value.
    pub fn render_display(&self, config: &Configuration) -> Result<Presentation, RenderError> {
        self.render_one(config, config.value())
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new(BarcodeRenderer::default(), TracingLog)
    }
}
