//! Gradient command - render an angled two-color gradient

use crate::GradientArgs;
use anyhow::{Context, Result};
use layerkit_ops::gradient::gradient;
use tracing::info;

pub fn run(args: GradientArgs) -> Result<()> {
    info!(
        start = %args.start.to_hex(),
        end = %args.end.to_hex(),
        size = ?(args.width, args.height),
        angle = args.angle,
        "Rendering gradient"
    );
    let result = gradient(args.start, args.end, args.width, args.height, args.angle)
        .context("Cannot render gradient")?;
    super::save_image(&args.output, &result)
}
