// File: silcrow-vite/src/tags.rs
// Purpose: Build the <script>/<link> fragment pointing at the dev server or the built bundles

use crate::assets::{AssetLocator, Bundles};
use crate::config::ViteConfig;
use crate::error::Result;
use crate::host::asset_url;
use maud::{Markup, PreEscaped};

/// First line of every fragment; identifies injected markup in a page.
pub const HEADER_MARKER: &str = "<!-- FLASK_VITE_HEADER -->";

/// Which set of tags to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMode {
    /// Vite dev server with HMR client.
    Development,
    /// Hashed bundles from `dist/assets`.
    Production,
}

impl TagMode {
    pub fn select(debug: bool, force_static: bool) -> Self {
        if force_static || !debug {
            TagMode::Production
        } else {
            TagMode::Development
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagBuilder {
    debug: bool,
    dev_server_url: String,
    dev_entry: String,
    locator: AssetLocator,
}

impl TagBuilder {
    pub fn new(config: &ViteConfig) -> Self {
        Self {
            debug: config.debug,
            dev_server_url: config.dev_server_url.trim_end_matches('/').to_string(),
            dev_entry: config.dev_entry.trim_start_matches('/').to_string(),
            locator: AssetLocator::new(config.assets_dir()).strict(config.strict_assets),
        }
    }

    pub fn locator(&self) -> &AssetLocator {
        &self.locator
    }

    pub fn mode(&self, force_static: bool) -> TagMode {
        TagMode::select(self.debug, force_static)
    }

    /// Fragment for the current mode, already escaped for embedding.
    ///
    /// `host` only affects production URLs; see [`crate::host::asset_url`].
    pub fn build(&self, force_static: bool, host: Option<&str>) -> Result<Markup> {
        let html = match self.mode(force_static) {
            TagMode::Development => development_tag(&self.dev_server_url, &self.dev_entry),
            TagMode::Production => production_tag(&self.locator.locate()?, host),
        };
        Ok(PreEscaped(html))
    }
}

pub fn development_tag(dev_server_url: &str, entry: &str) -> String {
    [
        HEADER_MARKER.to_string(),
        format!(r#"<script type="module" src="{}/@vite/client"></script>"#, dev_server_url),
        format!(r#"<script type="module" src="{}/{}"></script>"#, dev_server_url, entry),
    ]
    .join("\n")
}

pub fn production_tag(bundles: &Bundles, host: Option<&str>) -> String {
    [
        HEADER_MARKER.to_string(),
        format!(
            r#"<script type="module" src="{}"></script>"#,
            asset_url(&bundles.script, host)
        ),
        format!(
            r#"<link rel="stylesheet" href="{}"></link>"#,
            asset_url(&bundles.stylesheet, host)
        ),
    ]
    .join("\n")
}
