//! rasterkit - raster transform CLI
//!
//! Thin file-in/file-out front end over `rasterkit-core`. Formats are
//! deduced from filename suffixes; when no output path is given, one is
//! derived from the input by tagging the stem (photo.jpg -> photo.200x100.jpg).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use rasterkit_core::{
    blur, codec, composite, resize, rotate, Color, Fit, Gravity, Kernel, Raster, RotateFit,
};

#[derive(Parser)]
#[command(name = "rasterkit")]
#[command(version, about = "Resize, rotate and composite JPEG/PNG images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print image dimensions
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Resize an image
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Rotate an image by an angle in degrees
    Rotate(RotateArgs),

    /// Invert the RGB channels
    #[command(visible_alias = "neg")]
    Negative(SimpleArgs),

    /// Apply a 3x3 blur
    Blur(SimpleArgs),

    /// Alpha-composite an overlay onto a base image
    #[command(visible_alias = "comp")]
    Composite(CompositeArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image (.jpg/.jpeg/.png)
    file: PathBuf,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input image
    file: PathBuf,

    /// Destination width in pixels
    width: u32,

    /// Destination height in pixels
    height: u32,

    /// Interpolation kernel
    #[arg(short, long, value_enum, default_value_t = KernelArg::Bilinear)]
    kernel: KernelArg,

    /// Fit policy
    #[arg(short, long, value_enum, default_value_t = FitArg::Stretch)]
    fit: FitArg,

    /// Pad color as R,G,B[,A] (pad fit only)
    #[arg(long, value_parser = parse_color, default_value = "0,0,0,0")]
    pad_color: Color,

    /// Crop anchor as X,Y in [0,1] (crop fit only; 0.5,0.5 = center)
    #[arg(long, value_parser = parse_gravity, default_value = "0.5,0.5")]
    gravity: Gravity,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct RotateArgs {
    /// Input image
    file: PathBuf,

    /// Rotation angle in degrees (positive = counter-clockwise)
    degrees: f64,

    /// Destination sizing policy
    #[arg(short, long, value_enum, default_value_t = RotateFitArg::Same)]
    fit: RotateFitArg,

    /// Destination width (custom fit only)
    #[arg(long)]
    width: Option<u32>,

    /// Destination height (custom fit only)
    #[arg(long)]
    height: Option<u32>,

    /// Pad color as R,G,B[,A]
    #[arg(long, value_parser = parse_color, default_value = "0,0,0,0")]
    pad_color: Color,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct SimpleArgs {
    /// Input image
    file: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct CompositeArgs {
    /// Base image (drawn onto)
    base: PathBuf,

    /// Overlay image
    overlay: PathBuf,

    /// Horizontal paste offset (may be negative)
    #[arg(long, default_value_t = 0)]
    left: i64,

    /// Vertical paste offset (may be negative)
    #[arg(long, default_value_t = 0)]
    top: i64,

    /// Scale the overlay to this width before pasting
    #[arg(long)]
    width: Option<u32>,

    /// Scale the overlay to this height before pasting
    #[arg(long)]
    height: Option<u32>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct OutputArgs {
    /// Output path; derived from the input when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JPEG quality, 1-100
    #[arg(short, long)]
    quality: Option<u8>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KernelArg {
    Nearest,
    Bilinear,
    Bicubic,
    Hermite,
    Bezier,
}

impl From<KernelArg> for Kernel {
    fn from(arg: KernelArg) -> Self {
        match arg {
            KernelArg::Nearest => Kernel::Nearest,
            KernelArg::Bilinear => Kernel::Bilinear,
            KernelArg::Bicubic => Kernel::Bicubic,
            KernelArg::Hermite => Kernel::Hermite,
            KernelArg::Bezier => Kernel::Bezier,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FitArg {
    Stretch,
    Pad,
    Crop,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RotateFitArg {
    Same,
    Pad,
    Crop,
    Custom,
}

fn parse_color(s: &str) -> std::result::Result<Color, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!("expected R,G,B or R,G,B,A, got '{s}'"));
    }
    let mut channels = [255u8; 4];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| format!("invalid channel value '{part}'"))?;
    }
    Ok(Color::rgba(channels[0], channels[1], channels[2], channels[3]))
}

fn parse_gravity(s: &str) -> std::result::Result<Gravity, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected X,Y, got '{s}'"));
    }
    let x: f64 = parts[0]
        .trim()
        .parse()
        .map_err(|_| format!("invalid gravity '{}'", parts[0]))?;
    let y: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| format!("invalid gravity '{}'", parts[1]))?;
    Ok(Gravity::new(x, y))
}

/// Derive an output path by tagging the input stem: photo.jpg -> photo.TAG.jpg
fn derive_output(input: &Path, tag: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("png");
    input.with_file_name(format!("{stem}.{tag}.{ext}"))
}

fn load(path: &Path) -> Result<Raster> {
    let raster =
        codec::read_file(path).with_context(|| format!("failed to read {}", path.display()))?;
    info!(
        "loaded {} ({}x{})",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

fn save(raster: &Raster, path: &Path, quality: Option<u8>) -> Result<()> {
    codec::write_file(path, raster, quality)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(
        "wrote {} ({}x{})",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info(args) => {
            let raster = load(&args.file)?;
            println!("{}x{}", raster.width(), raster.height());
        }
        Commands::Resize(args) => {
            let raster = load(&args.file)?;
            let fit = match args.fit {
                FitArg::Stretch => Fit::Stretch,
                FitArg::Pad => Fit::Pad(args.pad_color),
                FitArg::Crop => Fit::Crop(args.gravity),
            };
            let out = resize(&raster, args.width, args.height, args.kernel.into(), &fit)?;
            let path = args
                .output
                .output
                .unwrap_or_else(|| derive_output(&args.file, &format!("{}x{}", args.width, args.height)));
            save(&out, &path, args.output.quality)?;
        }
        Commands::Rotate(args) => {
            let raster = load(&args.file)?;
            let fit = match args.fit {
                RotateFitArg::Same => RotateFit::Same,
                RotateFitArg::Pad => RotateFit::Pad,
                RotateFitArg::Crop => RotateFit::Crop,
                RotateFitArg::Custom => match (args.width, args.height) {
                    (Some(width), Some(height)) => RotateFit::Custom { width, height },
                    _ => bail!("custom fit requires --width and --height"),
                },
            };
            let out = rotate(&raster, args.degrees.to_radians(), fit, args.pad_color)?;
            let path = args
                .output
                .output
                .unwrap_or_else(|| derive_output(&args.file, &format!("r{}", args.degrees)));
            save(&out, &path, args.output.quality)?;
        }
        Commands::Negative(args) => {
            let raster = load(&args.file)?;
            let out = raster.negative();
            let path = args
                .output
                .output
                .unwrap_or_else(|| derive_output(&args.file, "neg"));
            save(&out, &path, args.output.quality)?;
        }
        Commands::Blur(args) => {
            let raster = load(&args.file)?;
            let out = blur(&raster)?;
            let path = args
                .output
                .output
                .unwrap_or_else(|| derive_output(&args.file, "blur"));
            save(&out, &path, args.output.quality)?;
        }
        Commands::Composite(args) => {
            let mut base = load(&args.base)?;
            let overlay = load(&args.overlay)?;
            let size = match (args.width, args.height) {
                (Some(w), Some(h)) => Some((w, h)),
                (None, None) => None,
                _ => bail!("--width and --height must be given together"),
            };
            composite::draw(&mut base, &overlay, args.left, args.top, size)?;
            let path = args
                .output
                .output
                .unwrap_or_else(|| derive_output(&args.base, "comp"));
            save(&base, &path, args.output.quality)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_rgb_defaults_opaque() {
        assert_eq!(parse_color("255,0,0").unwrap(), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_parse_color_rgba() {
        assert_eq!(
            parse_color("1, 2, 3, 4").unwrap(),
            Color::rgba(1, 2, 3, 4)
        );
    }

    #[test]
    fn test_parse_color_rejects_bad_input() {
        assert!(parse_color("255").is_err());
        assert!(parse_color("1,2,300").is_err());
        assert!(parse_color("a,b,c").is_err());
    }

    #[test]
    fn test_parse_gravity() {
        let g = parse_gravity("0.25,1").unwrap();
        assert_eq!(g.x, 0.25);
        assert_eq!(g.y, 1.0);
        assert!(parse_gravity("0.5").is_err());
    }

    #[test]
    fn test_derive_output() {
        assert_eq!(
            derive_output(Path::new("photo.jpg"), "200x100"),
            PathBuf::from("photo.200x100.jpg")
        );
        assert_eq!(
            derive_output(Path::new("dir/icon.png"), "neg"),
            PathBuf::from("dir/icon.neg.png")
        );
    }
}
