//! Blend command - composite a layer onto a background

use crate::BlendArgs;
use anyhow::{Context, Result};
use layerkit_ops::blend::blend;
use tracing::info;

pub fn run(args: BlendArgs) -> Result<()> {
    let background = super::load_image(&args.background)?;
    let layer = super::load_image(&args.layer)?;

    // Match the background layout so RGB layers can go over RGBA plates.
    let layer = layer.to_layout(background.layout());

    info!(mode = %args.mode, opacity = args.opacity, "Blending");
    let result = blend(&background, &layer, args.mode, args.opacity)
        .with_context(|| format!("Cannot blend {} onto {}", args.layer.display(), args.background.display()))?;

    super::save_image(&args.output, &result)
}
