//! Presentation Adapter
//!
//! Picks the output the configuration asks for and derives the per-type
//! asset names a host uses to attach styling and choose a template.

use base64::Engine as _;
use serde::Serialize;

use crate::config::{Configuration, OutputFormat};
use crate::render::{RenderError, RenderResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Output {
    #[serde(rename = "SVG")]
    Svg { markup: String },
    #[serde(rename = "PNG")]
    Png { data_uri: String },
    #[serde(rename = "HTMLDIV")]
    HtmlDiv { markup: String },
    #[serde(rename = "UNICODE")]
    Unicode { text: String },
    #[serde(rename = "BINARY")]
    Binary { text: String },
}

impl Output {
    pub fn format(&self) -> OutputFormat {
        match self {
            Output::Svg { .. } => OutputFormat::Svg,
            Output::Png { .. } => OutputFormat::Png,
            Output::HtmlDiv { .. } => OutputFormat::HtmlDiv,
            Output::Unicode { .. } => OutputFormat::Unicode,
            Output::Binary { .. } => OutputFormat::Binary,
        }
    }

    /// HTML snippet ready to drop into a page.
    pub fn to_markup(&self) -> String {
        match self {
            Output::Svg { markup } | Output::HtmlDiv { markup } => markup.clone(),
            Output::Png { data_uri } => format!("<img alt=\"Embedded Image\" src=\"{}\" />", data_uri),
            Output::Unicode { text } => format!(
                "<pre style=\"font-family:monospace;line-height:0.61em;font-size:6px;\">{}</pre>",
                text
            ),
            Output::Binary { text } => format!("<pre style=\"font-family:monospace;\">{}</pre>", text),
        }
    }
}

/// Everything a host needs to embed one rendered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub output: Output,
    pub asset_key: String,
    pub theme_hook: String,
    pub library: String,
    pub extended_value: String,
    /// The human-readable value, present when the display shows it.
    pub caption: Option<String>,
    /// Equal fingerprints mean identical output; usable as a cache key.
    pub fingerprint: String,
}

/// `CODE39+` -> `code39plus`.
pub fn asset_key(type_name: &str) -> String {
    type_name.to_lowercase().replace('+', "plus")
}

pub fn png_data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

/// Fails only when PNG is asked of a result rendered without one.
pub fn select_output(result: &RenderResult, format: OutputFormat) -> Result<Output, RenderError> {
    Ok(match format {
        OutputFormat::Svg => Output::Svg { markup: result.svg.clone() },
        OutputFormat::Png => {
            let png = result.png.as_deref().ok_or_else(|| RenderError {
                message: "PNG was not rendered for this configuration".to_string(),
                value: result.value.clone(),
            })?;
            Output::Png { data_uri: png_data_uri(png) }
        }
        OutputFormat::HtmlDiv => Output::HtmlDiv { markup: result.html_div.clone() },
        OutputFormat::Unicode => Output::Unicode { text: result.unicode_grid.clone() },
        OutputFormat::Binary => Output::Binary { text: result.binary_grid.clone() },
    })
}

pub fn present(result: &RenderResult, config: &Configuration) -> Result<Presentation, RenderError> {
    let key = asset_key(config.symbology().name());
    Ok(Presentation {
        output: select_output(result, config.format())?,
        theme_hook: format!("barcode__{}", key),
        library: format!("barcodes/{}", key),
        asset_key: key,
        extended_value: result.extended_code.clone(),
        caption: config.show_value().then(|| result.value.clone()),
        fingerprint: result.fingerprint.clone(),
    })
}
