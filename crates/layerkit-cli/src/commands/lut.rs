//! LUT, gamma and color map commands

use crate::{ColormapArgs, GammaArgs, LutArgs};
use anyhow::{Context, Result};
use layerkit_lut::{read_cube, CubeLut};
use layerkit_ops::color::{apply_lut, colormap, gamma_correct};
use layerkit_resources::ResourceConfig;
use std::path::Path;
use tracing::{debug, info};

pub fn run(args: LutArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let lut = resolve_lut(&args.lut)?;

    info!(lut = %args.lut, entries = lut.len(), "Applying LUT");
    let result = apply_lut(&image, &lut).with_context(|| format!("Cannot apply {}", args.lut))?;
    super::save_image(&args.output, &result)
}

pub fn run_gamma(args: GammaArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    info!(gamma = args.gamma, "Gamma correcting");
    super::save_image(&args.output, &gamma_correct(&image, args.gamma))
}

pub fn run_colormap(args: ColormapArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    info!(map = %args.map, "Applying color map");
    let result = colormap(&image, args.map).context("Color map failed")?;
    super::save_image(&args.output, &result)
}

/// Reads `name` as a file path if it exists, otherwise looks it up in the resource directory.
fn resolve_lut(name: &str) -> Result<CubeLut> {
    let path = Path::new(name);
    if path.is_file() {
        debug!(path = %path.display(), "Reading LUT file");
        return read_cube(path).with_context(|| format!("Failed to read LUT: {}", name));
    }
    let resources = ResourceConfig::load(super::install_dir(None)?);
    resources
        .load_lut(name)
        .with_context(|| format!("No LUT file or resource named '{}'", name))
}
