//! layerkit - image and mask tools for layer-style compositing
//!
//! Thin front end over `layerkit-ops`: every subcommand reads PNG/JPEG files,
//! runs one operation and writes the result.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use layerkit_core::Rgb;
use layerkit_ops::{BlendMode, ColorMap, FitMode, Filter, RotateMethod};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "layerkit")]
#[command(author, version, about = "Image and mask tools for layer-style compositing")]
#[command(long_about = "
Image and mask helpers behind a layer-style node pipeline, exposed over files.

Examples:
  layerkit blend bg.png fg.png -o out.png --mode overlay --opacity 60
  layerkit fit photo.jpg -o thumb.png -w 512 -H 512 --mode letterbox
  layerkit rotate in.png -o out.png -a 30 --ssaa 4
  layerkit shift in.png -o out.png --dx 40 --dy -10 --clip
  layerkit gradient -o grad.png --start '#FF0000' --end '#0000FF' -w 640 -H 360 --angle 45
  layerkit lut in.png -o graded.png -l film.cube
  layerkit colormap depth.png -o false.png --map jet
  layerkit tone in.png
  layerkit bbox mask.png --inscribed
  layerkit resources
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Blend a layer over a background
    #[command(visible_alias = "b")]
    Blend(BlendArgs),

    /// Resize to a target size (stretch, letterbox or crop)
    Fit(FitArgs),

    /// Rotate by an arbitrary angle, expanding the canvas
    Rotate(RotateArgs),

    /// Offset the image, wrapping or clipping
    Shift(ShiftArgs),

    /// Render an angled two-color gradient
    Gradient(GradientArgs),

    /// Apply a .cube LUT by path or by resource name
    Lut(LutArgs),

    /// Gamma-correct color channels
    Gamma(GammaArgs),

    /// Render luma through a false-color palette
    Colormap(ColormapArgs),

    /// Print dominant tone, average color and brightness
    Tone(ToneArgs),

    /// Match colors to a reference image in Lab space
    Transfer(TransferArgs),

    /// Grow or shrink a mask, then feather it
    #[command(name = "grow-mask")]
    GrowMask(GrowMaskArgs),

    /// Print the bounding or inscribed rectangle of a mask
    Bbox(BboxArgs),

    /// List discovered LUTs and fonts
    Resources(ResourcesArgs),
}

#[derive(Args)]
struct BlendArgs {
    /// Background image
    background: PathBuf,

    /// Layer image, same size and channels as the background
    layer: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Blend mode (normal, multiply, screen, overlay, ...)
    #[arg(short, long, default_value = "normal")]
    mode: BlendMode,

    /// Opacity in percent (0-100)
    #[arg(long, default_value = "100")]
    opacity: u32,
}

#[derive(Args)]
struct FitArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Target width
    #[arg(short, long)]
    width: u32,

    /// Target height
    #[arg(short = 'H', long)]
    height: u32,

    /// Fit mode: stretch, letterbox, crop
    #[arg(short, long, default_value = "letterbox")]
    mode: FitMode,

    /// Resampling filter: nearest, box, bilinear, hamming, bicubic, lanczos
    #[arg(short, long, default_value = "lanczos")]
    filter: Filter,
}

#[derive(Args)]
struct RotateArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Rotation angle in degrees (counter-clockwise)
    #[arg(short, long, allow_hyphen_values = true)]
    angle: f64,

    /// Resampling method: lanczos, bicubic, hamming, bilinear, box, nearest
    #[arg(short, long, default_value = "lanczos")]
    method: RotateMethod,

    /// Supersampling factor
    #[arg(long, default_value = "1")]
    ssaa: u32,

    /// Mask rotated alongside and attached as alpha
    #[arg(long)]
    mask: Option<PathBuf>,
}

#[derive(Args)]
struct ShiftArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Horizontal offset
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    dx: i64,

    /// Vertical offset
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    dy: i64,

    /// Fill for uncovered pixels when clipping (#RRGGBB)
    #[arg(long, default_value = "#000000", value_parser = parse_rgb)]
    background: Rgb,

    /// Clip instead of wrapping around
    #[arg(long)]
    clip: bool,
}

#[derive(Args)]
struct GradientArgs {
    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Start color (#RRGGBB)
    #[arg(long, value_parser = parse_rgb)]
    start: Rgb,

    /// End color (#RRGGBB)
    #[arg(long, value_parser = parse_rgb)]
    end: Rgb,

    /// Width
    #[arg(short, long)]
    width: u32,

    /// Height
    #[arg(short = 'H', long)]
    height: u32,

    /// Angle in degrees
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    angle: f64,
}

#[derive(Args)]
struct LutArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// LUT file, or the name of a LUT in the resource directory
    #[arg(short, long)]
    lut: String,
}

#[derive(Args)]
struct GammaArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Gamma exponent applied to normalized values
    #[arg(short, long)]
    gamma: f32,
}

#[derive(Args)]
struct ColormapArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Palette name or index (autumn, bone, jet, winter, rainbow, ocean, ...)
    #[arg(short, long, default_value = "jet")]
    map: ColorMap,
}

#[derive(Args)]
struct ToneArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct TransferArgs {
    /// Image to recolor
    input: PathBuf,

    /// Reference image
    reference: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct GrowMaskArgs {
    /// Mask image (first channel used)
    input: PathBuf,

    /// Output mask
    #[arg(short, long)]
    output: PathBuf,

    /// Pixels to grow (negative shrinks)
    #[arg(short, long, allow_hyphen_values = true)]
    grow: i32,

    /// Gaussian sigma applied afterwards
    #[arg(short, long, default_value = "0")]
    blur: f32,

    /// Invert the result
    #[arg(long)]
    invert: bool,
}

#[derive(Args)]
struct BboxArgs {
    /// Mask image
    input: PathBuf,

    /// Largest inscribed rectangle instead of the bounding one
    #[arg(long)]
    inscribed: bool,

    /// Also write a copy with the rectangle outlined
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ResourcesArgs {
    /// Install directory (defaults to LAYERKIT_HOME, then the executable's directory)
    #[arg(long)]
    home: Option<PathBuf>,
}

fn parse_rgb(s: &str) -> layerkit_core::Result<Rgb> {
    Rgb::from_hex(s)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Blend(args) => commands::blend::run(args),
        Commands::Fit(args) => commands::fit::run(args),
        Commands::Rotate(args) => commands::rotate::run(args),
        Commands::Shift(args) => commands::shift::run(args),
        Commands::Gradient(args) => commands::gradient::run(args),
        Commands::Lut(args) => commands::lut::run(args),
        Commands::Gamma(args) => commands::lut::run_gamma(args),
        Commands::Colormap(args) => commands::lut::run_colormap(args),
        Commands::Tone(args) => commands::tone::run(args),
        Commands::Transfer(args) => commands::tone::run_transfer(args),
        Commands::GrowMask(args) => commands::mask::run_grow(args),
        Commands::Bbox(args) => commands::mask::run_bbox(args),
        Commands::Resources(args) => commands::resources::run(args),
    }
}
