// File: silcrow-vite/src/assets.rs
// Purpose: Locate the production JS/CSS bundles emitted by `vite build`

use crate::error::{AssetKind, Result, ViteError};
use std::path::{Path, PathBuf};

/// File names of the current production bundles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundles {
    pub script: String,
    pub stylesheet: String,
}

/// Finds bundles in the build output directory.
///
/// The directory is globbed on every call, so a fresh `vite build` is picked
/// up without restarting the server.
#[derive(Debug, Clone)]
pub struct AssetLocator {
    dir: PathBuf,
    strict: bool,
}

impl AssetLocator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            strict: false,
        }
    }

    /// Reject directories holding more than one bundle of a kind.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn locate(&self) -> Result<Bundles> {
        Ok(Bundles {
            script: self.find(AssetKind::Script)?,
            stylesheet: self.find(AssetKind::Stylesheet)?,
        })
    }

    /// File name of the bundle of the given kind.
    ///
    /// Matches are sorted, so with several candidates the lexicographically
    /// first one wins unless the locator is strict.
    pub fn find(&self, kind: AssetKind) -> Result<String> {
        let mut matches = self.candidates(kind)?;

        if matches.is_empty() {
            return Err(ViteError::MissingAsset {
                kind,
                dir: self.dir.clone(),
            });
        }

        if matches.len() > 1 {
            if self.strict {
                return Err(ViteError::AmbiguousAsset {
                    kind,
                    dir: self.dir.clone(),
                    matches,
                });
            }
            tracing::warn!(
                dir = %self.dir.display(),
                pattern = %kind,
                candidates = ?matches,
                "several bundles found, using the first"
            );
        }

        Ok(matches.swap_remove(0))
    }

    fn candidates(&self, kind: AssetKind) -> Result<Vec<String>> {
        let dir = glob::Pattern::escape(&self.dir.to_string_lossy());
        let pattern = format!("{}/*.{}", dir, kind.extension());

        let mut names: Vec<String> = glob::glob(&pattern)?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .filter_map(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(str::to_string)
            })
            .collect();

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn asset_dir(files: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for file in files {
            fs::write(temp_dir.path().join(file), "/* bundle */").unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_locate_single_bundles() {
        let temp_dir = asset_dir(&["app.abc123.js", "app.abc123.css"]);
        let bundles = AssetLocator::new(temp_dir.path()).locate().unwrap();

        assert_eq!(bundles.script, "app.abc123.js");
        assert_eq!(bundles.stylesheet, "app.abc123.css");
    }

    #[test]
    fn test_first_lexicographic_match_wins() {
        let temp_dir = asset_dir(&["main.zzz.js", "main.aaa.js", "main.mmm.js", "main.css"]);
        let bundles = AssetLocator::new(temp_dir.path()).locate().unwrap();

        assert_eq!(bundles.script, "main.aaa.js");
    }

    #[test]
    fn test_strict_rejects_multiple_matches() {
        let temp_dir = asset_dir(&["a.js", "b.js", "a.css"]);
        let err = AssetLocator::new(temp_dir.path())
            .strict(true)
            .locate()
            .unwrap_err();

        match err {
            ViteError::AmbiguousAsset { kind, matches, .. } => {
                assert_eq!(kind, AssetKind::Script);
                assert_eq!(matches, vec!["a.js", "b.js"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_stylesheet() {
        let temp_dir = asset_dir(&["app.js"]);
        let err = AssetLocator::new(temp_dir.path()).locate().unwrap_err();

        assert!(matches!(
            err,
            ViteError::MissingAsset { kind: AssetKind::Stylesheet, .. }
        ));
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = AssetLocator::new(temp_dir.path().join("dist/assets"))
            .find(AssetKind::Script)
            .unwrap_err();

        assert!(matches!(err, ViteError::MissingAsset { .. }));
    }

    #[test]
    fn test_ignores_nested_and_unrelated_files() {
        let temp_dir = asset_dir(&["app.css", "app.js.map", "logo.svg"]);
        fs::create_dir(temp_dir.path().join("chunks")).unwrap();
        fs::write(temp_dir.path().join("chunks/vendor.js"), "").unwrap();

        let err = AssetLocator::new(temp_dir.path())
            .find(AssetKind::Script)
            .unwrap_err();
        assert!(matches!(err, ViteError::MissingAsset { .. }));
    }
}
