//! Barcodes CLI
//!
//! Commands: types, validate, render
//! Rendered markup (or JSON) goes to stdout, logs to stderr.
//! Exit codes: 1 bad input, 2 invalid configuration, 3 a value failed to render.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use barcodes_core::{
    presets::PresetRegistry,
    settings::keys,
    OutputFormat, RenderPipeline, Settings,
};

const EXIT_INVALID_CONFIG: u8 = 2;
const EXIT_RENDER_FAILED: u8 = 3;

#[derive(Parser)]
#[command(name = "barcodes-cli")]
#[command(about = "Barcodes CLI - render barcodes and QR codes as SVG, PNG, HTML or text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to presets directory
    #[arg(short, long, default_value = "presets")]
    presets_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported barcode types and display formats
    Types,

    /// Validate display settings
    Validate {
        /// JSON payload (settings object)
        #[arg(short, long)]
        payload: String,
    },

    /// Render one or more values
    Render(RenderArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Start from a stored preset
    #[arg(long)]
    preset: Option<String>,

    /// Barcode type, e.g. QRCODE, CODE128, EAN13
    #[arg(short = 't', long = "type")]
    symbology: Option<String>,

    /// Display format: SVG, PNG, HTMLDIV, UNICODE or BINARY
    #[arg(short, long)]
    format: Option<String>,

    /// Foreground color as #RRGGBB
    #[arg(short, long)]
    color: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    width: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    height: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    padding_top: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    padding_right: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    padding_bottom: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    padding_left: Option<String>,

    /// Show the value next to the barcode (`--show-value=false` hides it)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    show_value: Option<bool>,

    /// Print the full presentation as JSON instead of markup
    #[arg(long)]
    json: bool,

    /// Values to encode; defaults to the preset's value
    values: Vec<String>,
}

impl RenderArgs {
    fn overrides(&self) -> Settings {
        let mut settings = Settings::new();
        let flags = [
            (keys::TYPE, &self.symbology),
            (keys::FORMAT, &self.format),
            (keys::COLOR, &self.color),
            (keys::WIDTH, &self.width),
            (keys::HEIGHT, &self.height),
            (keys::PADDING_TOP, &self.padding_top),
            (keys::PADDING_RIGHT, &self.padding_right),
            (keys::PADDING_BOTTOM, &self.padding_bottom),
            (keys::PADDING_LEFT, &self.padding_left),
        ];
        for (key, flag) in flags {
            if let Some(v) = flag {
                settings.set(key, v.as_str());
            }
        }
        if let Some(show) = self.show_value {
            settings.set(keys::SHOW_VALUE, show);
        }
        settings
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let pipeline = RenderPipeline::default();

    match cli.command {
        Commands::Types => {
            let formats: Vec<_> = OutputFormat::ALL
                .iter()
                .map(|f| serde_json::json!({"format": f.name(), "label": f.label()}))
                .collect();
            let types: Vec<_> = pipeline
                .supported_types()
                .iter()
                .map(|t| serde_json::json!({
                    "type": t.name(),
                    "asset_key": barcodes_core::asset_key(t.name()),
                    "matrix": t.is_matrix(),
                }))
                .collect();

            let output = serde_json::json!({"types": types, "formats": formats});
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
            ExitCode::SUCCESS
        }

        Commands::Validate { payload } => {
            let settings = match Settings::from_json(&payload) {
                Ok(s) => s,
                Err(e) => {
                    let output = serde_json::json!({"valid": false, "error": format!("Invalid payload: {}", e)});
                    println!("{}", output);
                    return ExitCode::FAILURE;
                }
            };

            match pipeline.validator().validate(&settings) {
                Ok(config) => {
                    let output = serde_json::json!({
                        "valid": true,
                        "summary": config.summary(),
                        "configuration": config,
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    let output = serde_json::json!({"valid": false, "error": e});
                    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
                    ExitCode::from(EXIT_INVALID_CONFIG)
                }
            }
        }

        Commands::Render(args) => {
            let mut settings = Settings::new();
            if let Some(id) = &args.preset {
                let registry = match PresetRegistry::load_from_dir(&cli.presets_dir) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("Failed to load presets: {}", e);
                        return ExitCode::FAILURE;
                    }
                };
                match registry.get(id) {
                    Some(preset) => settings.merge(&preset.settings),
                    None => {
                        eprintln!("Preset not found: {}", id);
                        return ExitCode::FAILURE;
                    }
                }
            }
            settings.merge(&args.overrides());

            let config = match pipeline.validator().validate(&settings) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::from(EXIT_INVALID_CONFIG);
                }
            };

            let results = if args.values.is_empty() {
                vec![pipeline.render_display(&config)]
            } else {
                pipeline.render_batch(&config, &args.values)
            };

            let mut failed = false;
            for result in results {
                match result {
                    Ok(shown) if args.json => {
                        println!("{}", serde_json::to_string(&shown).unwrap_or_default());
                    }
                    Ok(shown) => {
                        println!("{}", shown.output.to_markup());
                        if let Some(caption) = &shown.caption {
                            println!("{}", caption);
                        }
                    }
                    Err(_) => failed = true,
                }
            }

            if failed {
                ExitCode::from(EXIT_RENDER_FAILED)
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}
