//! CLI command implementations

pub mod blend;
pub mod fit;
pub mod gradient;
pub mod lut;
pub mod mask;
pub mod resources;
pub mod rotate;
pub mod shift;
pub mod tone;

use anyhow::{Context, Result};
use image::{ColorType, DynamicImage};
use layerkit_core::image::Layout;
use layerkit_core::{Image, Mask};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the install directory.
pub const HOME_VAR: &str = "LAYERKIT_HOME";

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    let dynamic = image::open(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let image = from_dynamic(dynamic)
        .with_context(|| format!("Unsupported pixel data in {}", path.display()))?;
    debug!(path = %path.display(), size = ?image.dimensions(), layout = ?image.layout(), "Loaded");
    Ok(image)
}

/// Load the first channel of an image as a mask
pub fn load_mask(path: &Path) -> Result<Mask> {
    Ok(Mask::from_image(&load_image(path)?))
}

/// Save image to path; format follows the extension
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    let (w, h) = image.dimensions();
    image::save_buffer(path, image.as_slice(), w, h, color_type(image.layout()))
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    debug!(path = %path.display(), size = ?(w, h), "Saved");
    Ok(())
}

fn from_dynamic(dynamic: DynamicImage) -> layerkit_core::Result<Image> {
    let (w, h) = (dynamic.width(), dynamic.height());
    let color = dynamic.color();
    let (layout, data) = match color {
        ColorType::L8 | ColorType::L16 => (Layout::L, dynamic.into_luma8().into_raw()),
        c if c.has_alpha() => (Layout::Rgba, dynamic.into_rgba8().into_raw()),
        _ => (Layout::Rgb, dynamic.into_rgb8().into_raw()),
    };
    Image::from_data(w, h, layout, data)
}

fn color_type(layout: Layout) -> ColorType {
    match layout {
        Layout::L => ColorType::L8,
        Layout::Rgb => ColorType::Rgb8,
        Layout::Rgba => ColorType::Rgba8,
    }
}

/// Install directory: explicit flag, then `LAYERKIT_HOME`, then the executable's directory.
pub fn install_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_VAR) {
        return Ok(PathBuf::from(dir));
    }
    let exe = std::env::current_exe().context("Cannot locate the layerkit executable")?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
