use super::asset_components;
use crate::core::AssetSource;
use crate::utils::error::{InitError, Result};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Assets bundled as a plain directory next to the application.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut full = self.root.clone();
        for component in asset_components(path)? {
            full.push(component);
        }
        Ok(full)
    }
}

impl AssetSource for DirAssetSource {
    fn list(&self, path: &str) -> Result<Vec<String>> {
        let full = self.resolve(path)?;
        if !full.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&full)? {
            let entry = entry?;
            let name = entry
                .file_name()
                .into_string()
                .map_err(|raw| InitError::InvalidAssetPath {
                    path: format!("{}/{}", path, raw.to_string_lossy()),
                    reason: "asset names must be valid UTF-8".to_string(),
                })?;
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>> {
        let full = self.resolve(path)?;
        if !full.exists() {
            return Err(InitError::AssetNotFound {
                path: path.to_string(),
            });
        }
        // File::open succeeds on directories on Unix; refuse before any output exists.
        if full.is_dir() {
            return Err(InitError::InvalidAssetPath {
                path: path.to_string(),
                reason: "is a directory without listable children".to_string(),
            });
        }
        let file = File::open(&full)?;
        Ok(Box::new(file))
    }
}
