//! Resources command - list LUTs and fonts found in the install directory

use crate::ResourcesArgs;
use anyhow::Result;
use layerkit_resources::ResourceConfig;

pub fn run(args: ResourcesArgs) -> Result<()> {
    let home = super::install_dir(args.home)?;
    let resources = ResourceConfig::load(&home);

    println!("LUTs ({}):", resources.lut_dir().display());
    for name in resources.lut_names() {
        println!("  {}", name);
    }
    println!("Fonts ({}):", resources.font_dir().display());
    for name in resources.font_names() {
        println!("  {}", name);
    }
    Ok(())
}
