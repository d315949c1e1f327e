// File: silcrow-vite/src/extension.rs
// Purpose: Extension state and one-time registration on an application

use crate::config::ViteConfig;
use crate::error::{Result, ViteError};
use crate::host::AssetHost;
use crate::inject::inject_tags;
use crate::npm::Npm;
use crate::serve::asset_router;
use crate::tags::TagBuilder;
use axum::middleware::from_fn_with_state;
use axum::{Extension, Router};
use maud::Markup;
use std::sync::Arc;

/// Read-only state shared by the interceptor, the asset route and extractors.
///
/// Cheap to clone; built once when the extension is attached.
#[derive(Debug, Clone)]
pub struct Vite {
    inner: Arc<ViteInner>,
}

#[derive(Debug)]
struct ViteInner {
    config: ViteConfig,
    asset_host: Option<AssetHost>,
    tags: TagBuilder,
    npm: Npm,
}

impl Vite {
    pub fn new(config: ViteConfig, asset_host: Option<AssetHost>) -> Self {
        let tags = TagBuilder::new(&config);
        let npm = Npm::new(&config.root, &config.npm_bin_path);
        Self {
            inner: Arc::new(ViteInner {
                config,
                asset_host,
                tags,
                npm,
            }),
        }
    }

    pub fn config(&self) -> &ViteConfig {
        &self.inner.config
    }

    /// Host the asset route is bound to, `None` when it answers on every host.
    pub fn asset_host(&self) -> Option<&AssetHost> {
        self.inner.asset_host.as_ref()
    }

    pub fn npm(&self) -> &Npm {
        &self.inner.npm
    }

    pub fn tag_builder(&self) -> &TagBuilder {
        &self.inner.tags
    }

    /// Tag fragment for a page requested on `request_host`.
    ///
    /// `force_static` emits production tags even in debug mode.
    pub fn tags(&self, force_static: bool, request_host: Option<&str>) -> Result<Markup> {
        let host = self
            .asset_host()
            .and_then(|binding| binding.resolve(request_host));
        self.inner.tags.build(force_static, host)
    }
}

/// Tags for templates rendering outside the automatic injection.
///
/// Produces exactly what the interceptor would insert for the same request.
pub fn vite_tags(vite: &Vite, request_host: Option<&str>) -> Result<Markup> {
    vite.tags(false, request_host)
}

/// An application under construction: its router, its configuration and the
/// extension attached to it.
pub struct App {
    router: Router,
    config: ViteConfig,
    vite: Option<Vite>,
}

impl App {
    pub fn new(router: Router) -> Self {
        Self::with_config(router, ViteConfig::default())
    }

    pub fn with_config(router: Router, config: ViteConfig) -> Self {
        Self {
            router,
            config,
            vite: None,
        }
    }

    pub fn config(&self) -> &ViteConfig {
        &self.config
    }

    pub fn vite(&self) -> Option<&Vite> {
        self.vite.as_ref()
    }

    /// Add routes after the extension was attached; they are still covered
    /// by the interceptor since layers are applied in [`App::into_router`].
    pub fn merge(mut self, other: Router) -> Self {
        self.router = self.router.merge(other);
        self
    }

    /// Finish the application.
    ///
    /// The asset route is added, the interceptor wraps every route when
    /// `auto_insert` is on, and [`Vite`] is made available to handlers as an
    /// [`Extension`].
    pub fn into_router(self) -> Router {
        let Some(vite) = self.vite else {
            return self.router;
        };

        let mut router = self.router;
        if vite.config().auto_insert {
            router = router.layer(from_fn_with_state(vite.clone(), inject_tags));
        }
        router.merge(asset_router(&vite)).layer(Extension(vite))
    }
}

/// Register the extension on `app`, reading the application's configuration.
///
/// Fails with [`ViteError::DuplicateRegistration`] when called twice on the same app.
pub fn attach(app: &mut App, asset_host: Option<AssetHost>) -> Result<Vite> {
    if app.vite.is_some() {
        return Err(ViteError::DuplicateRegistration);
    }

    let vite = Vite::new(app.config.clone(), asset_host);
    tracing::debug!(
        root = %vite.config().root.display(),
        auto_insert = vite.config().auto_insert,
        debug = vite.config().debug,
        asset_host = ?vite.asset_host(),
        "vite extension attached"
    );

    app.vite = Some(vite.clone());
    Ok(vite)
}
