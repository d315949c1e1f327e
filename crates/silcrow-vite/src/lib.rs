//! # silcrow-vite
//!
//! Vite integration for Axum + Maud applications.
//!
//! - In debug mode pages load `@vite/client` and the entry module from the
//!   Vite dev server (`http://localhost:3000` by default).
//! - In production pages load the hashed bundles from `vite/dist/assets`,
//!   served under `/_vite/<file>` with a one-year `Cache-Control`.
//!
//! Tags are either injected into every HTML response before `</head>`
//! (`auto_insert = true`) or rendered by hand with the [`ViteTags`] extractor.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use silcrow_vite::{attach, App, AssetHost, ViteConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::new().route("/", get(|| async { "hello" }));
//!
//!     let mut app = App::with_config(router, ViteConfig::load_default()?);
//!     attach(&mut app, Some(AssetHost::MirrorRequest))?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app.into_router()).await?;
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod extension;
pub mod extract;
pub mod host;
pub mod inject;
pub mod npm;
pub mod serve;
pub mod tags;

pub use assets::{AssetLocator, Bundles};
pub use config::ViteConfig;
pub use error::{AssetKind, Result, ViteError};
pub use extension::{attach, vite_tags, App, Vite};
pub use extract::ViteTags;
pub use host::{asset_url, AssetHost, STATIC_PREFIX};
pub use inject::{inject_tag, inject_tags};
pub use npm::Npm;
pub use serve::{asset_router, ONE_YEAR};
pub use tags::{TagBuilder, TagMode, HEADER_MARKER};
