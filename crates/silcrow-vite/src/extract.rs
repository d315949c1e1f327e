// File: silcrow-vite/src/extract.rs
// Purpose: Extractor handing the tag fragment to handlers that render their own <head>

use crate::error::ViteError;
use crate::extension::Vite;
use crate::host::request_host;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use maud::{Markup, Render};

/// Tag fragment for the current request, for use in Maud templates.
///
/// ```rust,ignore
/// async fn index(tags: ViteTags) -> Markup {
///     html! {
///         head { (tags) }
///         body { h1 { "Hello" } }
///     }
/// }
/// ```
///
/// Requires the extension to be attached (see [`crate::App::into_router`]).
#[derive(Debug, Clone)]
pub struct ViteTags(pub Markup);

#[async_trait]
impl<S> FromRequestParts<S> for ViteTags
where
    S: Send + Sync,
{
    type Rejection = ViteError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let vite = parts
            .extensions
            .get::<Vite>()
            .ok_or_else(|| ViteError::Config("vite extension is not attached to this router".into()))?;

        let host = request_host(&parts.headers, &parts.uri);
        vite.tags(false, host).map(ViteTags)
    }
}

impl Render for ViteTags {
    fn render(&self) -> Markup {
        self.0.clone()
    }
}

impl ViteTags {
    pub fn into_markup(self) -> Markup {
        self.0
    }
}
