//! Tone inspection and color transfer commands

use crate::{ToneArgs, TransferArgs};
use anyhow::{Context, Result};
use layerkit_ops::color::{average_brightness, average_color, color_transfer, dominant_tone};
use tracing::info;

pub fn run(args: ToneArgs) -> Result<()> {
    for path in &args.input {
        let image = super::load_image(path)?;
        let dominant = dominant_tone(&image).map(|c| c.to_hex());
        let brightness = average_brightness(&image);

        println!("{}:", path.display());
        println!("  dominant:   {}", dominant.as_deref().unwrap_or("-"));
        println!("  average:    {}", average_color(&image).to_hex());
        match brightness {
            Some(v) => println!("  brightness: {}", v),
            None => println!("  brightness: -"),
        }
    }
    Ok(())
}

pub fn run_transfer(args: TransferArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let reference = super::load_image(&args.reference)?;
    info!(reference = %args.reference.display(), "Transferring color");

    let result = color_transfer(&image, &reference).context("Color transfer failed")?;
    super::save_image(&args.output, &result)
}
