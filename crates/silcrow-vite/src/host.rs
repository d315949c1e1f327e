// File: silcrow-vite/src/host.rs
// Purpose: Asset host binding and URL generation for the `/_vite` route

use crate::error::ViteError;
use axum::http::{header, HeaderMap, Uri};
use std::str::FromStr;

/// Path prefix the bundles are served under.
pub const STATIC_PREFIX: &str = "/_vite";

/// Host the asset route is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetHost {
    /// Serve and link assets on one concrete host, e.g. `static.example.com`.
    /// Build it with [`AssetHost::fixed`] or `parse` so the host is validated.
    Fixed(String),
    /// Serve assets on whatever host the page was requested on.
    MirrorRequest,
}

impl AssetHost {
    /// A fixed host, rejected when it cannot be written into an attribute as is.
    pub fn fixed(host: impl Into<String>) -> Result<Self, ViteError> {
        let host = host.into();
        if !is_valid_host(&host) {
            return Err(ViteError::Config(format!("invalid asset host: {:?}", host)));
        }
        Ok(AssetHost::Fixed(host))
    }

    /// Whether a request for `request_host` may be answered by the asset route.
    pub fn accepts(&self, request_host: Option<&str>) -> bool {
        match self {
            AssetHost::Fixed(host) => {
                request_host.is_some_and(|requested| requested.eq_ignore_ascii_case(host))
            }
            AssetHost::MirrorRequest => true,
        }
    }

    /// Host to put in generated asset URLs.
    ///
    /// Read per request for [`AssetHost::MirrorRequest`], never cached.
    pub fn resolve<'a>(&'a self, request_host: Option<&'a str>) -> Option<&'a str> {
        match self {
            AssetHost::Fixed(host) => Some(host.as_str()),
            AssetHost::MirrorRequest => request_host.filter(|host| is_valid_host(host)),
        }
    }
}

impl FromStr for AssetHost {
    type Err = ViteError;

    /// `any` selects [`AssetHost::MirrorRequest`]; anything else is a fixed host.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(AssetHost::MirrorRequest);
        }
        AssetHost::fixed(s)
    }
}

/// Public URL of a bundle served by the asset route.
///
/// Without a host the URL is root-relative; with one it is protocol-relative
/// so pages served over https keep loading assets over https.
pub fn asset_url(filename: &str, host: Option<&str>) -> String {
    let path = format!("{}/{}", STATIC_PREFIX, urlencoding::encode(filename));
    match host {
        Some(host) => format!("//{}{}", host, path),
        None => path,
    }
}

/// Host the client addressed, from the `Host` header or the request URI.
pub fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> Option<&'a str> {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .filter(|host| is_valid_host(host))
}

/// Hostname with optional port, or a bracketed IPv6 literal.
///
/// Request hosts end up inside HTML attributes, so anything else is refused.
fn is_valid_host(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= 255
        && host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b':' | b'[' | b']'))
}
