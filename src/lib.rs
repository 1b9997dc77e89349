//! Sketchlayout: turn UI sketches into a layout tree and semantic HTML/CSS.
//!
//! A photographed or drawn wireframe goes through five stages: preprocessing
//! (edges), detection (typed rectangles), labelling (OCR text), layout
//! inference (rows of components) and code generation. Shapes drawn in a
//! canvas editor skip straight to layout.
//!
//! # Modules
//!
//! - [`ir`]: Component model and readers/writers (canvas JSON, payload JSON, CSV)
//! - [`preprocess`]: Image decoding and edge extraction
//! - [`detect`]: Contour classification and duplicate suppression
//! - [`label`]: OCR region preparation, engines and text normalisation
//! - [`layout`]: Row clustering and the Root/Row/Leaf tree
//! - [`codegen`]: HTML/CSS generation
//! - [`pipeline`]: Image-mode and canvas-mode orchestration
//! - [`config`]: Tunables, loadable from YAML or JSON
//! - [`error`]: Error types

pub mod codegen;
pub mod config;
pub mod detect;
pub mod error;
pub mod ir;
pub mod label;
pub mod layout;
pub mod pipeline;
pub mod preprocess;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{error, info};
use walkdir::WalkDir;

pub use config::PipelineConfig;
pub use error::SketchError;
pub use pipeline::{convert_canvas, convert_image, Conversion};

use label::{NullOcr, OcrEngine, TesseractEngine};

/// The sketchlayout CLI application.
#[derive(Parser)]
#[command(name = "sketchlayout")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a sketch image (PNG/JPEG) into HTML/CSS.
    Convert(ConvertArgs),
    /// Convert canvas-editor shapes (JSON) into HTML/CSS.
    Canvas(CanvasArgs),
    /// Detect components in a sketch image without OCR or layout.
    Detect(DetectArgs),
    /// Convert every image in a directory.
    Batch(BatchArgs),
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Sketch image.
    input: PathBuf,

    /// Write <name>.html, .css, .json and .csv into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Pipeline config (YAML or JSON).
    #[arg(long, env = "SKETCHLAYOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Skip OCR; every component gets its fallback text.
    #[arg(long)]
    no_ocr: bool,

    /// Report format for stdout ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

#[derive(clap::Args)]
struct CanvasArgs {
    /// Canvas shapes JSON.
    input: PathBuf,

    /// Write <name>.html, .css, .json and .csv into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Pipeline config (YAML or JSON).
    #[arg(long, env = "SKETCHLAYOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Report format for stdout ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

#[derive(clap::Args)]
struct DetectArgs {
    /// Sketch image.
    input: PathBuf,

    /// Pipeline config (YAML or JSON).
    #[arg(long, env = "SKETCHLAYOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format ('text', 'json' or 'csv').
    #[arg(long, default_value = "text")]
    output: String,
}

#[derive(clap::Args)]
struct BatchArgs {
    /// Directory searched recursively for .png/.jpg/.jpeg files.
    input: PathBuf,

    /// Output directory. Subdirectories of the input are mirrored here.
    #[arg(long)]
    out_dir: PathBuf,

    /// Pipeline config (YAML or JSON).
    #[arg(long, env = "SKETCHLAYOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Skip OCR; every component gets its fallback text.
    #[arg(long)]
    no_ocr: bool,
}

/// Run the sketchlayout CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), SketchError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Canvas(args)) => run_canvas(args),
        Some(Commands::Detect(args)) => run_detect(args),
        Some(Commands::Batch(args)) => run_batch(args),
        None => {
            println!("sketchlayout {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Turn UI sketches into HTML/CSS layouts.");
            println!();
            println!("Run 'sketchlayout --help' for usage information.");
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_pipeline_config(path: Option<&Path>) -> Result<PipelineConfig, SketchError> {
    match path {
        Some(path) => config::load_config(path),
        None => Ok(PipelineConfig::default()),
    }
}

fn ocr_engine(config: &PipelineConfig, no_ocr: bool) -> Box<dyn OcrEngine> {
    if no_ocr {
        Box::new(NullOcr)
    } else {
        Box::new(TesseractEngine::new(config.ocr.clone()))
    }
}

fn check_output(output: &str, supported: &[&str]) -> Result<(), SketchError> {
    if supported.contains(&output) {
        Ok(())
    } else {
        Err(SketchError::UnsupportedFormat(format!(
            "'{}' (supported: {})",
            output,
            supported.join(", ")
        )))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("layout")
        .to_string()
}

/// Writes `<stem>.html` (standalone document), `<stem>.css`, the
/// `<stem>.json` payload and the `<stem>.csv` component list.
fn write_outputs(out_dir: &Path, stem: &str, conversion: &Conversion) -> Result<(), SketchError> {
    fs::create_dir_all(out_dir)?;
    fs::write(
        out_dir.join(format!("{stem}.html")),
        conversion.page.to_document(),
    )?;
    fs::write(out_dir.join(format!("{stem}.css")), &conversion.page.css)?;
    ir::io_json::write_payload_json(&out_dir.join(format!("{stem}.json")), &conversion.payload())?;
    ir::io_csv::write_components_csv(
        &out_dir.join(format!("{stem}.csv")),
        &conversion.components,
    )?;
    info!(dir = %out_dir.display(), stem, "wrote outputs");
    Ok(())
}

fn print_conversion(conversion: &Conversion, output: &str) -> Result<(), SketchError> {
    match output {
        "json" => {
            let json = ir::io_json::to_json_string(&conversion.payload())
                .map_err(SketchError::JsonOutput)?;
            println!("{json}");
        }
        _ => {
            print!("{}", conversion);
            if let Some(report) = &conversion.detection {
                print!("{}", report);
            }
        }
    }
    Ok(())
}

fn run_convert(args: ConvertArgs) -> Result<(), SketchError> {
    check_output(&args.output, &["text", "json"])?;
    let config = load_pipeline_config(args.config.as_deref())?;
    let engine = ocr_engine(&config, args.no_ocr);

    let bytes = fs::read(&args.input)?;
    let conversion = convert_image(&bytes, &config, engine.as_ref())?;

    if let Some(out_dir) = &args.out_dir {
        write_outputs(out_dir, &file_stem(&args.input), &conversion)?;
    }
    print_conversion(&conversion, &args.output)
}

fn run_canvas(args: CanvasArgs) -> Result<(), SketchError> {
    check_output(&args.output, &["text", "json"])?;
    let config = load_pipeline_config(args.config.as_deref())?;

    let components = ir::io_canvas_json::read_canvas_json(&args.input)?;
    let conversion = convert_canvas(components, &config)?;

    if let Some(out_dir) = &args.out_dir {
        write_outputs(out_dir, &file_stem(&args.input), &conversion)?;
    }
    print_conversion(&conversion, &args.output)
}

fn run_detect(args: DetectArgs) -> Result<(), SketchError> {
    check_output(&args.output, &["text", "json", "csv"])?;
    let config = load_pipeline_config(args.config.as_deref())?;

    let bytes = fs::read(&args.input)?;
    let detection = pipeline::detect_image(&bytes, &config)?;

    match args.output.as_str() {
        "csv" => {
            print!(
                "{}",
                ir::io_csv::to_components_csv_string(&detection.components)?
            );
        }
        "json" => {
            let value = serde_json::json!({
                "components": detection.components,
                "report": detection.report,
            });
            let json = serde_json::to_string_pretty(&value).map_err(SketchError::JsonOutput)?;
            println!("{json}");
        }
        _ => {
            for component in &detection.components {
                let (x, y, w, h) = component.bbox.to_xywh();
                println!(
                    "{}  {:<9} x={} y={} w={} h={}",
                    component.id, component.component_type, x, y, w, h
                );
            }
            print!("{}", detection.report);
        }
    }
    Ok(())
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ["png", "jpg", "jpeg"]
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn collect_images(root: &Path) -> Result<Vec<PathBuf>, SketchError> {
    let mut images = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| SketchError::BatchWalk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_image_path(entry.path()) {
            images.push(entry.into_path());
        }
    }
    images.sort();
    Ok(images)
}

/// Output directory and stem for one batch input, mirroring its position
/// under the input root.
fn batch_target(root: &Path, out_dir: &Path, path: &Path) -> (PathBuf, String) {
    let relative_dir = path
        .strip_prefix(root)
        .ok()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""));
    (out_dir.join(relative_dir), file_stem(path))
}

fn run_batch(args: BatchArgs) -> Result<(), SketchError> {
    let config = load_pipeline_config(args.config.as_deref())?;
    let engine = ocr_engine(&config, args.no_ocr);
    let images = collect_images(&args.input)?;

    let total = images.len();
    let mut failed = 0usize;
    let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();
    for path in &images {
        let (dir, stem) = batch_target(&args.input, &args.out_dir, path);
        let output = dir.join(&stem);
        let result = match written.get(&output).cloned() {
            Some(previous) => Err(SketchError::OutputCollision {
                path: path.clone(),
                previous,
                output,
            }),
            None => fs::read(path)
                .map_err(SketchError::from)
                .and_then(|bytes| convert_image(&bytes, &config, engine.as_ref()))
                .and_then(|conversion| {
                    write_outputs(&dir, &stem, &conversion)?;
                    written.insert(output, path.clone());
                    Ok(conversion)
                }),
        };

        match result {
            Ok(conversion) => println!(
                "ok    {}: {} component(s), {} row(s)",
                path.display(),
                conversion.components.len(),
                conversion.row_count()
            ),
            Err(e) => {
                failed += 1;
                error!(path = %path.display(), error = %e, "conversion failed");
                println!("FAIL  {}: {}", path.display(), e);
            }
        }
    }

    println!("Processed {} image(s), {} failed", total, failed);
    if failed > 0 {
        Err(SketchError::BatchFailed { failed, total })
    } else {
        Ok(())
    }
}
