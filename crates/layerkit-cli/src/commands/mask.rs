//! Mask commands - grow/shrink and rectangle detection

use crate::{BboxArgs, GrowMaskArgs};
use anyhow::{Context, Result};
use layerkit_core::Rgb;
use layerkit_ops::draw::draw_rect;
use layerkit_ops::mask::{grow_mask, invert_mask, max_inscribed_rect, min_bounding_rect};
use tracing::info;

pub fn run_grow(args: GrowMaskArgs) -> Result<()> {
    let mask = super::load_mask(&args.input)?;
    info!(grow = args.grow, blur = args.blur, invert = args.invert, "Growing mask");

    let mut result = grow_mask(&mask, args.grow, args.blur).context("Cannot grow mask")?;
    if args.invert {
        result = invert_mask(&result);
    }
    super::save_image(&args.output, &result.to_image())
}

pub fn run_bbox(args: BboxArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let rect = if args.inscribed {
        max_inscribed_rect(&image)
    } else {
        Some(min_bounding_rect(&image))
    };

    let Some(rect) = rect else {
        println!("no region");
        return Ok(());
    };
    println!("{} {} {} {}", rect.x, rect.y, rect.width, rect.height);

    if let Some(output) = &args.output {
        let outlined = draw_rect(&image, rect, Rgb([255, 0, 0]), 2, None);
        super::save_image(output, &outlined)?;
    }
    Ok(())
}
