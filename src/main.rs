//! # Thumbprint CLI
//!
//! Command-line interface for image fingerprints and bitmap chores.
//!
//! ## Usage
//!
//! ```bash
//! # Fingerprint some images (in parallel)
//! thumbprint hash photos/*.jpg
//!
//! # Same, as JSON
//! thumbprint hash --json a.png b.png
//!
//! # Compare two images, or an image with a stored fingerprint
//! thumbprint compare a.png b.png
//! thumbprint compare a.png 00ff00ff00ff00ff --metric bits
//!
//! # Resize, recolor, rotate, change format
//! thumbprint convert in.jpg out.png --width 320 --grayscale --rotate 90
//!
//! # Draw text
//! thumbprint caption in.png out.png --text "hello" --size 48 --font Inter.ttf
//!
//! # Composite one image onto another
//! thumbprint overlay base.png logo.png out.png --x 10 --y 10 --opacity 0.5
//! ```

use clap::{Parser, Subcommand};
use image::{DynamicImage, Rgba};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use thumbprint::{
    Fingerprint, FingerprintBuilder, ThumbprintError,
    bitmap::{
        adjust::{self, ColorMatrix},
        blend::{self, BlendMode},
        io, resize,
        text::{self, Font},
    },
    config::Profile,
    fingerprint::{Metric, from_hex},
    raster::ResampleFilter,
};

/// Thumbprint - perceptual image fingerprints and bitmap utilities
#[derive(Parser, Debug)]
#[command(name = "thumbprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Fingerprint profile (run `thumbprint profiles` to list)
    #[arg(long, global = true, default_value = "reference")]
    profile: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the fingerprint of each image
    Hash {
        /// Images to fingerprint
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit JSON instead of "<hex>  <path>" lines
        #[arg(long)]
        json: bool,
    },

    /// Score the distance between two images or fingerprints
    Compare {
        /// Image path or 16-character hex fingerprint
        a: String,

        /// Image path or 16-character hex fingerprint
        b: String,

        /// Distance metric: hamming (bytes), sum, bits
        #[arg(long, default_value = "hamming")]
        metric: String,

        /// Similarity threshold (defaults to the profile's, for the hamming metric)
        #[arg(long)]
        threshold: Option<u64>,
    },

    /// Resize, recolor, rotate and re-encode an image
    Convert {
        input: PathBuf,
        output: PathBuf,

        /// Target width (keeps aspect ratio unless --height is also given)
        #[arg(long)]
        width: Option<u32>,

        /// Target height (keeps aspect ratio unless --width is also given)
        #[arg(long)]
        height: Option<u32>,

        /// Resample filter: nearest, triangle, catmull-rom, gaussian, lanczos3
        #[arg(long, default_value = "lanczos3")]
        filter: String,

        /// Rotate clockwise by a multiple of 90 degrees
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        rotate: i32,

        /// Brightness, -100..=100
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        brightness: i32,

        /// Contrast, -100..=100
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        contrast: i32,

        #[arg(long)]
        grayscale: bool,

        #[arg(long)]
        sepia: bool,

        #[arg(long)]
        invert: bool,
    },

    /// Draw a line of text onto an image
    Caption {
        input: PathBuf,
        output: PathBuf,

        /// TTF/OTF font file (defaults to the built-in DejaVu Sans Mono)
        #[arg(long)]
        font: Option<PathBuf>,

        #[arg(long)]
        text: String,

        /// Text height in pixels
        #[arg(long, default_value = "32")]
        size: f32,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x: i32,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        y: i32,

        /// Text color as RRGGBB or RRGGBBAA hex
        #[arg(long, default_value = "ffffff")]
        color: String,
    },

    /// Composite TOP onto BASE
    Overlay {
        base: PathBuf,
        top: PathBuf,
        output: PathBuf,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x: i64,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        y: i64,

        /// Blend mode: normal, multiply, screen, overlay, add, difference, darken, lighten
        #[arg(long, default_value = "normal")]
        mode: String,

        #[arg(long, default_value = "1.0")]
        opacity: f32,
    },

    /// List fingerprint profiles
    Profiles,
}

/// One line of `hash --json` output.
#[derive(Debug, Serialize)]
struct HashRecord {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<Fingerprint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "thumbprint=debug"
    } else {
        "thumbprint=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), ThumbprintError> {
    let profile = Profile::by_name(&cli.profile).ok_or_else(|| {
        ThumbprintError::InvalidInput(format!(
            "Unknown profile '{}'. Available: {}",
            cli.profile,
            Profile::list().join(", ")
        ))
    })?;
    tracing::debug!(profile = profile.name, "using profile");

    match cli.command {
        Commands::Hash { files, json } => hash_files(&profile, &files, json),
        Commands::Compare {
            a,
            b,
            metric,
            threshold,
        } => compare(&profile, &a, &b, &metric, threshold),
        Commands::Convert {
            input,
            output,
            width,
            height,
            filter,
            rotate,
            brightness,
            contrast,
            grayscale,
            sepia,
            invert,
        } => {
            let filter = parse_filter(&filter)?;
            let mut img = io::load(&input)?;
            img = resize::rotate(&img, rotate)?;
            img = resize_to(&img, width, height, filter)?;

            // Applied one at a time so each stage clamps, like separate runs would.
            let stages = [
                (grayscale, ColorMatrix::grayscale(profile.weights)),
                (sepia, ColorMatrix::sepia()),
                (invert, ColorMatrix::invert()),
            ];
            for (_, matrix) in stages.iter().filter(|(enabled, _)| *enabled) {
                img = DynamicImage::ImageRgba8(matrix.apply(&img));
            }
            img = adjust::brightness_contrast(&img, brightness, contrast)?;

            io::save(&img, &output)?;
            println!("Saved to {} ({}x{})", output.display(), img.width(), img.height());
            Ok(())
        }
        Commands::Caption {
            input,
            output,
            font,
            text: caption,
            size,
            x,
            y,
            color,
        } => {
            let font = match font {
                Some(path) => Font::from_file(&path)?,
                None => Font::bundled()?,
            };
            let color = parse_color(&color)?;
            let mut canvas = io::load(&input)?.to_rgba8();
            text::draw_text(&mut canvas, &font, &caption, size, x, y, color)?;
            io::save(&DynamicImage::ImageRgba8(canvas), &output)?;
            println!("Saved to {}", output.display());
            Ok(())
        }
        Commands::Overlay {
            base,
            top,
            output,
            x,
            y,
            mode,
            opacity,
        } => {
            let mode = BlendMode::from_name(&mode).ok_or_else(|| {
                ThumbprintError::InvalidInput(format!("Unknown blend mode '{}'", mode))
            })?;
            let mut canvas = io::load(&base)?.to_rgba8();
            let layer = io::load(&top)?.to_rgba8();
            blend::composite(&mut canvas, &layer, x, y, mode, opacity)?;
            io::save(&DynamicImage::ImageRgba8(canvas), &output)?;
            println!("Saved to {}", output.display());
            Ok(())
        }
        Commands::Profiles => {
            println!("Available profiles:");
            for name in Profile::list() {
                if let Some(p) = Profile::by_name(name) {
                    println!(
                        "  {:<10} filter={:<12} threshold={}",
                        p.name,
                        p.filter.name(),
                        p.similarity_threshold
                    );
                }
            }
            Ok(())
        }
    }
}

/// Fingerprint all files in parallel, then print in argument order.
fn hash_files(profile: &Profile, files: &[PathBuf], json: bool) -> Result<(), ThumbprintError> {
    let builder = FingerprintBuilder::from_profile(profile);
    let results: Vec<Result<Fingerprint, ThumbprintError>> = files
        .par_iter()
        .map(|path| builder.build(&io::load(path)?))
        .collect();

    let mut failures = 0usize;
    let mut records = Vec::with_capacity(files.len());
    for (path, result) in files.iter().zip(results) {
        let (fingerprint, error) = match result {
            Ok(fp) => (Some(fp), None),
            Err(e) => {
                failures += 1;
                tracing::warn!(path = %path.display(), error = %e, "failed to fingerprint");
                (None, Some(e.to_string()))
            }
        };
        records.push(HashRecord {
            path: path.display().to_string(),
            fingerprint,
            error,
        });
    }

    if json {
        let text = serde_json::to_string_pretty(&records).map_err(std::io::Error::from)?;
        println!("{}", text);
    } else {
        for record in &records {
            match (&record.fingerprint, &record.error) {
                (Some(fp), _) => println!("{}  {}", fp, record.path),
                (None, Some(err)) => eprintln!("{}: {}", record.path, err),
                (None, None) => {}
            }
        }
    }

    if failures > 0 {
        return Err(ThumbprintError::InvalidInput(format!(
            "{} of {} files could not be fingerprinted",
            failures,
            files.len()
        )));
    }
    Ok(())
}

fn compare(
    profile: &Profile,
    a: &str,
    b: &str,
    metric: &str,
    threshold: Option<u64>,
) -> Result<(), ThumbprintError> {
    let metric = Metric::from_name(metric)
        .ok_or_else(|| ThumbprintError::InvalidInput(format!("Unknown metric '{}'", metric)))?;
    let builder = FingerprintBuilder::from_profile(profile);
    let fa = resolve_fingerprint(&builder, a)?;
    let fb = resolve_fingerprint(&builder, b)?;

    let distance = metric.distance(fa.as_bytes(), fb.as_bytes())?;
    println!("{}  {}", fa, a);
    println!("{}  {}", fb, b);
    println!("{} distance: {}", metric.name(), distance);

    let threshold = threshold.or(match metric {
        Metric::Hamming => Some(profile.similarity_threshold),
        _ => None,
    });
    if let Some(limit) = threshold {
        let verdict = if distance <= limit { "similar" } else { "different" };
        println!("{} (threshold {})", verdict, limit);
    }
    Ok(())
}

/// An argument is an image path if it exists on disk, otherwise a hex fingerprint.
fn resolve_fingerprint(builder: &FingerprintBuilder, arg: &str) -> Result<Fingerprint, ThumbprintError> {
    let path = Path::new(arg);
    if path.exists() {
        return builder.build(&io::load(path)?);
    }
    arg.parse::<Fingerprint>().map_err(|_| {
        ThumbprintError::InvalidInput(format!(
            "'{}' is neither an existing file nor a 16-character hex fingerprint",
            arg
        ))
    })
}

fn parse_filter(name: &str) -> Result<ResampleFilter, ThumbprintError> {
    ResampleFilter::from_name(name)
        .ok_or_else(|| ThumbprintError::InvalidInput(format!("Unknown filter '{}'", name)))
}

fn resize_to(
    img: &DynamicImage,
    width: Option<u32>,
    height: Option<u32>,
    filter: ResampleFilter,
) -> Result<DynamicImage, ThumbprintError> {
    match (width, height) {
        (Some(w), Some(h)) => resize::resize_exact(img, w, h, filter),
        (Some(w), None) => resize::resize_to_width(img, w, filter),
        (None, Some(h)) => {
            let aspect_ratio = img.width() as f64 / img.height().max(1) as f64;
            let w = ((h as f64 * aspect_ratio).round() as u32).max(1);
            resize::resize_exact(img, w, h, filter)
        }
        (None, None) => Ok(img.clone()),
    }
}

/// Parse `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
fn parse_color(text: &str) -> Result<Rgba<u8>, ThumbprintError> {
    let bytes = from_hex(text.trim_start_matches('#'))?;
    match bytes.as_slice() {
        [r, g, b] => Ok(Rgba([*r, *g, *b, 255])),
        [r, g, b, a] => Ok(Rgba([*r, *g, *b, *a])),
        _ => Err(ThumbprintError::InvalidInput(format!(
            "color must be RRGGBB or RRGGBBAA, got '{}'",
            text
        ))),
    }
}
