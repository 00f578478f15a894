//! Render failure logging.

use std::sync::Mutex;

use crate::render::RenderError;

pub const LOG_TARGET: &str = "barcodes";

/// Receives one entry per value that failed to render.
pub trait RenderLog {
    fn render_failed(&self, error: &RenderError);
}

/// Emits failures as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl RenderLog for TracingLog {
    fn render_failed(&self, error: &RenderError) {
        tracing::error!(
            target: LOG_TARGET,
            error = %error.message,
            value = %error.value,
            "Error: {}, given: {}",
            error.message,
            error.value
        );
    }
}

/// Keeps failures in memory so a host can show them next to the output.
#[derive(Debug, Default)]
pub struct CollectingLog {
    entries: Mutex<Vec<RenderError>>,
}

impl CollectingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<RenderError> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl RenderLog for CollectingLog {
    fn render_failed(&self, error: &RenderError) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(error.clone()),
            Err(poisoned) => poisoned.into_inner().push(error.clone()),
        }
    }
}

impl<L: RenderLog + ?Sized> RenderLog for &L {
    fn render_failed(&self, error: &RenderError) {
        (**self).render_failed(error)
    }
}
