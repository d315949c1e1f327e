// File: silcrow-vite/src/serve.rs
// Purpose: Serve built bundles under /_vite with year-long caching

use crate::extension::Vite;
use crate::host::{request_host, STATIC_PREFIX};
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::{from_fn_with_state, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

/// Bundles are content-hashed, so they can be cached for a year.
pub const ONE_YEAR: u64 = 60 * 60 * 24 * 365;

/// Router serving `<root>/dist/assets/<filename>` at `/_vite/<filename>`.
///
/// File lookup goes through [`ServeDir`], which answers 404 for missing files
/// and for paths escaping the asset directory (`..`, absolute components).
/// The content type is guessed from the extension.
pub fn asset_router<S>(vite: &Vite) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let assets = ServeDir::new(vite.config().assets_dir()).append_index_html_on_directories(false);

    Router::new()
        .nest_service(STATIC_PREFIX, assets)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            long_lived_cache,
        ))
        .layer(from_fn_with_state(vite.clone(), require_asset_host))
}

fn long_lived_cache(response: &Response) -> Option<HeaderValue> {
    if !response.status().is_success() {
        return None;
    }
    HeaderValue::from_str(&format!("public, max-age={}", ONE_YEAR)).ok()
}

/// Answer 404 for asset requests on a host the route is not bound to.
async fn require_asset_host(State(vite): State<Vite>, request: Request, next: Next) -> Response {
    if let Some(binding) = vite.asset_host() {
        let host = request_host(request.headers(), request.uri());
        if !binding.accepts(host) {
            tracing::debug!(?host, ?binding, "asset requested on unbound host");
            return StatusCode::NOT_FOUND.into_response();
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViteConfig;
    use crate::host::AssetHost;
    use axum::body::Body;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn vite_with_assets(asset_host: Option<AssetHost>) -> (TempDir, Vite) {
        let temp_dir = TempDir::new().unwrap();
        let assets = temp_dir.path().join("dist/assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("app.abc123.js"), "console.log('hi');").unwrap();
        fs::write(assets.join("app.abc123.css"), "body{}").unwrap();

        let config = ViteConfig {
            root: temp_dir.path().to_path_buf(),
            ..ViteConfig::default()
        };
        (temp_dir, Vite::new(config, asset_host))
    }

    fn get(uri: &str, host: &str) -> Request {
        axum::http::Request::builder()
            .uri(uri)
            .header(header::HOST, host)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_serves_bundle_with_cache_header() {
        let (_dir, vite) = vite_with_assets(None);
        let app: Router = asset_router(&vite);

        let response = app.oneshot(get("/_vite/app.abc123.js", "localhost")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=31536000"
        );
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.contains("javascript"), "got {content_type}");
    }

    #[tokio::test]
    async fn test_missing_file_is_404_without_cache_header() {
        let (_dir, vite) = vite_with_assets(None);
        let app: Router = asset_router(&vite);

        let response = app.oneshot(get("/_vite/nope.js", "localhost")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }

    #[tokio::test]
    async fn test_fixed_host_binding() {
        let (_dir, vite) = vite_with_assets(Some(AssetHost::fixed("static.example.com").unwrap()));
        let app: Router = asset_router(&vite);

        let on_asset_host = app
            .clone()
            .oneshot(get("/_vite/app.abc123.css", "static.example.com"))
            .await
            .unwrap();
        assert_eq!(on_asset_host.status(), StatusCode::OK);

        let elsewhere = app
            .oneshot(get("/_vite/app.abc123.css", "www.example.com"))
            .await
            .unwrap();
        assert_eq!(elsewhere.status(), StatusCode::NOT_FOUND);
    }
}
