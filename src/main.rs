use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use log::{info, warn};

use sheetpack::cli::{CliArgs, CompressionLevel};
use sheetpack::config::{DEFAULT_MAX_DIMENSION, SheetConfig, compile_excludes, load_config};
use sheetpack::error::SheetError;
use sheetpack::output::{format_atlas, save_sheet_image, write_atlas};
use sheetpack::sheet::{pack, render_sheet};
use sheetpack::sprite::{discover_images, load_sprites};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., argument or config errors happen before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = match CliArgs::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let message = e.to_string();
            let message = message.trim_start_matches("error: ").trim_end();
            return Err(SheetError::Argument(message.to_string()).into());
        }
    };

    let merged = merge_config_with_args(&cli)?;

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .format_level(false)
        .target(env_logger::Target::Stdout)
        .init();

    info!("sheetpack v{}", env!("CARGO_PKG_VERSION"));

    let outputs = Outputs {
        image_dir: cli.image_dir,
        sheet: cli.sheet,
        atlas: cli.atlas,
    };
    pack_directory(&outputs, &merged)
}

/// Input directory and output file locations for one run.
struct Outputs {
    image_dir: PathBuf,
    sheet: PathBuf,
    atlas: PathBuf,
}

/// Discover, load, pack, and write the sheet and atlas.
///
/// Finding no images is not an error and writes nothing. Any failure before
/// the sheet is saved leaves the file system untouched; a failed atlas write
/// removes the sheet again.
fn pack_directory(outputs: &Outputs, merged: &MergedConfig) -> Result<()> {
    let excludes = compile_excludes(&merged.exclude)?;
    let paths = discover_images(&outputs.image_dir, &excludes)?;

    if paths.is_empty() {
        info!(
            "No image files found in {} or its subdirectories.",
            outputs.image_dir.display()
        );
        return Ok(());
    }

    info!("Found {} image(s).", paths.len());

    let sprites = load_sprites(&outputs.image_dir, &paths, merged.prepend_path.as_deref())?;

    // Nothing is written until the whole batch has packed
    let sheet = pack(sprites, merged.max_dimension)?;
    let image = render_sheet(&sheet);
    let atlas_text = format_atlas(&sheet, &outputs.sheet);

    ensure_parent_dir(&outputs.sheet)?;
    ensure_parent_dir(&outputs.atlas)?;

    save_sheet_image(&image, &outputs.sheet, merged.opaque, merged.compress)?;
    info!(
        "Spritesheet created successfully at: {}",
        outputs.sheet.display()
    );

    if let Err(e) = write_atlas(&atlas_text, &outputs.atlas) {
        if let Err(remove_err) = fs::remove_file(&outputs.sheet) {
            warn!(
                "Failed to remove {}: {}",
                outputs.sheet.display(),
                remove_err
            );
        }
        return Err(e.into());
    }
    info!(
        "Atlas text file created successfully at: {}",
        outputs.atlas.display()
    );

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))
        }
        _ => Ok(()),
    }
}

/// Merged configuration from CLI args and optional config file.
#[derive(Debug)]
struct MergedConfig {
    max_dimension: u32,
    prepend_path: Option<String>,
    exclude: Vec<String>,
    opaque: bool,
    compress: Option<CompressionLevel>,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CliArgs) -> Result<MergedConfig> {
    let config = if let Some(config_path) = &args.config {
        Some(
            load_config(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    merge(args, config.as_ref())
}

fn merge(args: &CliArgs, config: Option<&SheetConfig>) -> Result<MergedConfig> {
    let max_dimension = args
        .max_dimension
        .or_else(|| config.map(|c| c.max_dimension))
        .unwrap_or(DEFAULT_MAX_DIMENSION);

    let prepend_path = args
        .prepend_path
        .clone()
        .or_else(|| config.and_then(|c| c.prepend_path.clone()));

    // Exclude patterns accumulate from both sources
    let mut exclude = config.map(|c| c.exclude.clone()).unwrap_or_default();
    exclude.extend(args.exclude.iter().cloned());

    let opaque = args.opaque || config.is_some_and(|c| c.opaque);

    let compress = match (args.compress, config.and_then(|c| c.compress.as_ref())) {
        (Some(level), _) => Some(level),
        (None, Some(c)) => Some(
            c.level()
                .map_err(|e| anyhow::anyhow!("invalid compress value in config file: {}", e))?,
        ),
        (None, None) => None,
    };

    Ok(MergedConfig {
        max_dimension,
        prepend_path,
        exclude,
        opaque,
        compress,
    })
}
