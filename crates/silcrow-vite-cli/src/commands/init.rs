use anyhow::{Context, Result};
use colored::Colorize;
use silcrow_vite::ViteConfig;

use crate::project::scaffold::{self, Written};

pub fn execute(config: &ViteConfig, force: bool) -> Result<()> {
    println!(
        "{} {}",
        "Creating Vite project in".green().bold(),
        config.root.display()
    );
    println!();

    let written = scaffold::create_project(config, force)
        .context("Failed to create Vite project")?;

    for file in &written {
        match file {
            Written::Created(path) => println!("  {} {}", "✓".green(), path.display()),
            Written::Skipped(path) => {
                println!("  {} {} (exists, use --force)", "⚠".yellow(), path.display())
            }
        }
    }

    println!();
    println!("Next steps:");
    println!("  scv install");
    println!("  scv dev      # development, with debug = true");
    println!("  scv build    # production bundles in {}", config.assets_dir().display());
    println!();

    Ok(())
}
