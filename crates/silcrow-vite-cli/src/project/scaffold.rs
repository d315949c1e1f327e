use anyhow::{Context, Result};
use silcrow_vite::ViteConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome for one scaffolded file
#[derive(Debug, PartialEq, Eq)]
pub enum Written {
    Created(PathBuf),
    Skipped(PathBuf),
}

/// Create a Vite project in `config.root` whose build lands in `dist/assets`
/// and whose dev server listens where the tags expect it.
pub fn create_project(config: &ViteConfig, force: bool) -> Result<Vec<Written>> {
    let root = &config.root;
    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create {}", root.display()))?;

    let files = [
        ("package.json", generate_package_json(root)?),
        ("vite.config.js", generate_vite_config(config)),
        (config.dev_entry.as_str(), generate_main_js()),
        ("main.css", MAIN_CSS.to_string()),
        (".gitignore", "node_modules/\ndist/\n".to_string()),
    ];

    let mut written = Vec::new();
    for (name, content) in files {
        let path = root.join(name);
        if path.exists() && !force {
            written.push(Written::Skipped(path));
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        written.push(Written::Created(path));
    }

    Ok(written)
}

fn generate_package_json(root: &Path) -> Result<String> {
    let name = root
        .canonicalize()
        .ok()
        .and_then(|path| path.file_name().map(|n| n.to_string_lossy().to_lowercase()))
        .unwrap_or_else(|| "vite".to_string());

    let package = serde_json::json!({
        "name": format!("{}-frontend", name),
        "private": true,
        "version": "0.0.0",
        "type": "module",
        "scripts": {
            "dev": "vite",
            "build": "vite build",
            "preview": "vite preview"
        },
        "devDependencies": {
            "vite": "^5.4.0"
        }
    });

    Ok(serde_json::to_string_pretty(&package)? + "\n")
}

/// Port of the dev server URL, 3000 when it has none.
fn dev_port(config: &ViteConfig) -> u16 {
    config
        .dev_server_url
        .trim_end_matches('/')
        .rsplit(':')
        .next()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3000)
}

fn generate_vite_config(config: &ViteConfig) -> String {
    format!(
        r#"import {{ defineConfig }} from "vite";

// Bundles are served by the Axum app at /_vite/<file> from dist/assets.
export default defineConfig({{
  base: "/_vite/",
  server: {{
    port: {port},
    strictPort: true,
    origin: "{origin}",
  }},
  build: {{
    outDir: "dist/assets",
    assetsDir: "",
    emptyOutDir: true,
    rollupOptions: {{
      input: "{entry}",
    }},
  }},
}});
"#,
        port = dev_port(config),
        origin = config.dev_server_url.trim_end_matches('/'),
        entry = config.dev_entry,
    )
}

fn generate_main_js() -> String {
    r#"import "./main.css";

document.documentElement.dataset.vite = "ready";
"#
    .to_string()
}

const MAIN_CSS: &str = r#"/* main.css */

body {
    font-family: system-ui, -apple-system, sans-serif;
    line-height: 1.6;
    color: #333;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(root: &Path) -> ViteConfig {
        ViteConfig {
            root: root.join("vite"),
            ..ViteConfig::default()
        }
    }

    #[test]
    fn test_create_project() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path());

        let written = create_project(&config, false).unwrap();

        assert_eq!(written.len(), 5);
        assert!(written.iter().all(|w| matches!(w, Written::Created(_))));

        let package: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(config.root.join("package.json")).unwrap())
                .unwrap();
        assert_eq!(package["name"], "vite-frontend");
        assert_eq!(package["scripts"]["build"], "vite build");

        let vite_config = fs::read_to_string(config.root.join("vite.config.js")).unwrap();
        assert!(vite_config.contains("port: 3000,"));
        assert!(vite_config.contains(r#"outDir: "dist/assets","#));
        assert!(vite_config.contains(r#"input: "main.js","#));
    }

    #[test]
    fn test_existing_files_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path());
        fs::create_dir_all(&config.root).unwrap();
        fs::write(config.root.join("main.js"), "// mine").unwrap();

        let written = create_project(&config, false).unwrap();

        assert!(written.contains(&Written::Skipped(config.root.join("main.js"))));
        assert_eq!(fs::read_to_string(config.root.join("main.js")).unwrap(), "// mine");

        create_project(&config, true).unwrap();
        assert_ne!(fs::read_to_string(config.root.join("main.js")).unwrap(), "// mine");
    }

    #[test]
    fn test_dev_port_follows_config() {
        let config = ViteConfig {
            dev_server_url: "http://localhost:5173/".to_string(),
            ..ViteConfig::default()
        };
        assert_eq!(dev_port(&config), 5173);
        assert_eq!(
            dev_port(&ViteConfig {
                dev_server_url: "http://localhost".to_string(),
                ..ViteConfig::default()
            }),
            3000
        );
    }
}
