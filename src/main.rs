use clap::Parser;
use colored::Colorize;
use hexmap::constants::{DEFAULT_INPUT, IN_DIR, OUT_DIR};
use hexmap::map_document::load_map_document;
use hexmap::output::{collect_input_paths, map_name, save_image, timestamp_now};
use hexmap::{CanvasComposer, RenderConfig, load_font};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Render hex map descriptions (JSON) to JPEG images.
#[derive(Debug, Parser)]
#[command(name = "hexmap", version)]
struct Args {
    /// Map files to render; defaults to every .json file in --in-dir
    paths: Vec<PathBuf>,

    /// JSON file overriding render parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font used for labels (overrides the config value)
    #[arg(long)]
    font: Option<PathBuf>,

    #[arg(long, default_value = IN_DIR)]
    in_dir: PathBuf,

    #[arg(long, default_value = OUT_DIR)]
    out_dir: PathBuf,
}

fn render_one(composer: &CanvasComposer, path: &Path, out_dir: &Path) -> hexmap::error::Result<PathBuf> {
    let document = load_map_document(path)?;
    let image = composer.render_document(&document)?;
    save_image(
        &image,
        out_dir,
        &map_name(path),
        &timestamp_now(),
        composer.config().jpeg_quality,
    )
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match RenderConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                return ExitCode::FAILURE;
            }
        },
        None => RenderConfig::default(),
    };
    if let Some(font) = &args.font {
        config.font_path = font.clone();
    }

    let font = match load_font(&config.font_path) {
        Ok(font) => font,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    let composer = CanvasComposer::new(config, Box::new(font));

    let paths = collect_input_paths(&args.paths, &args.in_dir, Path::new(DEFAULT_INPUT));
    let total = paths.len();
    let mut failures = 0;

    for (i, path) in paths.iter().enumerate() {
        println!("[({}/{})generate: {}]", i, total, path.display().to_string().bold());
        match render_one(&composer, path, &args.out_dir) {
            Ok(saved) => println!("  -> {} {}", "saved.".green(), saved.display()),
            Err(e) => {
                failures += 1;
                println!("  -> {} {}", "failed:".red().bold(), e);
            }
        }
    }

    if failures > 0 {
        eprintln!("{} of {} map(s) failed", failures, total);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
