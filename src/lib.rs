//! Barcodes Core - Barcode Rendering Configuration and Dispatch
//!
//! # Ground Rules
//! 1. Settings are validated before any encoder runs
//! 2. Encoders build symbols, this crate only arranges them
//! 3. Every render produces every format
//! 4. Same configuration and value, same bytes
//! 5. A bad value costs one item, never the batch

pub mod settings;
pub mod symbology;
pub mod config;
pub mod validation;
pub mod encoder;
pub mod symbol;
pub mod hashing;
pub mod render;
pub mod present;
pub mod log;
pub mod pipeline;
pub mod presets;

pub use settings::{Settings, SettingValue};
pub use symbology::Symbology;
pub use config::{Color, Configuration, OutputFormat, Padding};
pub use validation::{ValidationError, Validator};
pub use encoder::{EncodeError, EncodeRequest, Encoder, StandardEncoder};
pub use symbol::Symbol;
pub use hashing::{render_fingerprint, sha256_hex};
pub use render::{BarcodeRenderer, RenderError, RenderResult};
pub use present::{asset_key, present, Output, Presentation};
pub use log::{CollectingLog, RenderLog, TracingLog};
pub use pipeline::RenderPipeline;
pub use presets::{Preset, PresetRegistry};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
