// File: silcrow-vite/src/error.rs
// Purpose: Error taxonomy for registration, asset discovery and the build tool

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use thiserror::Error;

/// Which bundle a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Script,
    Stylesheet,
}

impl AssetKind {
    /// File extension used when globbing the asset directory.
    pub fn extension(self) -> &'static str {
        match self {
            AssetKind::Script => "js",
            AssetKind::Stylesheet => "css",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "*.{}", self.extension())
    }
}

#[derive(Debug, Error)]
pub enum ViteError {
    /// `attach` was called twice on the same application.
    #[error("the vite extension is already registered on this application")]
    DuplicateRegistration,

    /// No production bundle was found; the front-end was not built or not deployed.
    #[error("no {kind} bundle found in {}", .dir.display())]
    MissingAsset { kind: AssetKind, dir: PathBuf },

    /// More than one bundle matched while `strict_assets` is enabled.
    #[error("expected exactly one {kind} bundle in {}, found {}: {matches:?}", .dir.display(), .matches.len())]
    AmbiguousAsset {
        kind: AssetKind,
        dir: PathBuf,
        matches: Vec<String>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid asset pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("`{command}` failed: {reason}")]
    Npm { command: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViteError>;

impl IntoResponse for ViteError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "vite asset error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Asset configuration error: {}", self),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_message_names_pattern_and_dir() {
        let err = ViteError::MissingAsset {
            kind: AssetKind::Stylesheet,
            dir: PathBuf::from("vite/dist/assets"),
        };
        assert_eq!(err.to_string(), "no *.css bundle found in vite/dist/assets");
    }

    #[test]
    fn test_error_response_is_500() {
        let resp = ViteError::DuplicateRegistration.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
