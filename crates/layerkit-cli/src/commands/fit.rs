//! Fit command - conform an image to a target size

use crate::FitArgs;
use anyhow::{Context, Result};
use layerkit_ops::resize::fit_resize;
use tracing::info;

pub fn run(args: FitArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    info!(
        from = ?image.dimensions(),
        to = ?(args.width, args.height),
        mode = ?args.mode,
        filter = %args.filter,
        "Fitting"
    );

    let result = fit_resize(&image, args.width, args.height, args.mode, args.filter)
        .context("Fit failed")?;
    super::save_image(&args.output, &result)
}
