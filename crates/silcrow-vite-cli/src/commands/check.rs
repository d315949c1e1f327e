use anyhow::{Context, Result};
use colored::Colorize;
use silcrow_vite::{tags, AssetLocator, TagBuilder, ViteConfig};

pub fn execute(config: &ViteConfig) -> Result<()> {
    let dir = config.assets_dir();
    println!("{} {}", "Asset directory:".cyan(), dir.display());

    let bundles = AssetLocator::new(&dir)
        .strict(config.strict_assets)
        .locate()
        .context("Production tags cannot be built (run `scv build`)")?;

    println!("  {} script     {}", "✓".green(), bundles.script);
    println!("  {} stylesheet {}", "✓".green(), bundles.stylesheet);
    println!();
    println!("{}", "Production tags:".cyan().bold());
    println!("{}", tags::production_tag(&bundles, None));
    println!();
    println!("{}", "Development tags:".cyan().bold());
    let dev = ViteConfig {
        debug: true,
        ..config.clone()
    };
    println!("{}", TagBuilder::new(&dev).build(false, None)?.into_string());

    Ok(())
}
