//! Rotate command - arbitrary angle rotation with canvas expansion

use crate::RotateArgs;
use anyhow::{Context, Result, bail};
use layerkit_ops::transform::{rotate_expand, rotate_with_alpha};
use tracing::info;

pub fn run(args: RotateArgs) -> Result<()> {
    if args.ssaa == 0 {
        bail!("--ssaa must be at least 1");
    }
    let input = super::load_image(&args.input)?;
    info!(angle = args.angle, method = ?args.method, ssaa = args.ssaa, "Rotating");

    let result = match &args.mask {
        Some(path) => {
            let mask = super::load_mask(path)?;
            rotate_with_alpha(&input.to_rgb(), args.angle, &mask, args.method, args.ssaa)
                .context("Rotation failed")?
                .composite
        }
        None => rotate_expand(&input, args.angle, args.ssaa, args.method).context("Rotation failed")?,
    };

    info!(size = ?result.dimensions(), "Rotated");
    super::save_image(&args.output, &result)
}
