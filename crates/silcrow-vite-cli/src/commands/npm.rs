use anyhow::{Context, Result};
use colored::Colorize;
use silcrow_vite::{Npm, ViteConfig};

fn npm(config: &ViteConfig) -> Result<Npm> {
    if !config.root.join("package.json").exists() {
        anyhow::bail!(
            "No package.json in {} (run `scv init` first)",
            config.root.display()
        );
    }
    Ok(Npm::new(&config.root, &config.npm_bin_path))
}

pub fn install(config: &ViteConfig, packages: &[String]) -> Result<()> {
    println!("{}", "Installing front-end dependencies...".green().bold());
    npm(config)?
        .install(packages)
        .context("Dependency installation failed")?;
    println!("  {} Dependencies installed", "✓".green());
    Ok(())
}

pub fn build(config: &ViteConfig) -> Result<()> {
    println!("{}", "Building production bundles...".green().bold());
    npm(config)?.build().context("Vite build failed")?;

    let bundles = silcrow_vite::AssetLocator::new(config.assets_dir())
        .strict(config.strict_assets)
        .locate()
        .context("Build finished but no bundles were found")?;

    println!("  {} {}", "✓".green(), bundles.script);
    println!("  {} {}", "✓".green(), bundles.stylesheet);
    Ok(())
}

pub fn dev(config: &ViteConfig) -> Result<()> {
    println!(
        "{} {}",
        "Starting Vite dev server on".green().bold(),
        config.dev_server_url.cyan()
    );
    println!("  {} Press Ctrl+C to stop", "ℹ".cyan());
    println!();
    npm(config)?.dev().context("Vite dev server exited with an error")?;
    Ok(())
}
