//! Shift command - offset an image by whole pixels

use crate::ShiftArgs;
use anyhow::Result;
use layerkit_ops::transform::{shift, ShiftMode};
use tracing::info;

pub fn run(args: ShiftArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let mode = if args.clip { ShiftMode::Clipped } else { ShiftMode::Cyclic };
    info!(dx = args.dx, dy = args.dy, ?mode, "Shifting");

    let result = shift(&image, args.dx, args.dy, args.background, mode);
    super::save_image(&args.output, &result)
}
