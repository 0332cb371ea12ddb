use super::{DirAssetSource, ZipAssetSource};
use crate::core::{AppContext, AssetSource};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Application context backed by a writable files directory and an asset bundle.
pub struct BundledContext {
    files_dir: PathBuf,
    assets: Box<dyn AssetSource>,
}

impl BundledContext {
    pub fn new(files_dir: impl Into<PathBuf>, assets: Box<dyn AssetSource>) -> Self {
        Self {
            files_dir: files_dir.into(),
            assets,
        }
    }

    /// Picks the asset source from the bundle path: `.zip`/`.apk` files are
    /// read as archives, anything else as a directory.
    pub fn from_bundle(files_dir: impl Into<PathBuf>, bundle: impl AsRef<Path>) -> Result<Self> {
        let bundle = bundle.as_ref();
        let is_archive = bundle.is_file()
            && bundle
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "zip" | "apk"))
                .unwrap_or(false);

        let assets: Box<dyn AssetSource> = if is_archive {
            tracing::debug!("Reading assets from archive {}", bundle.display());
            Box::new(ZipAssetSource::open_file(bundle)?)
        } else {
            tracing::debug!("Reading assets from directory {}", bundle.display());
            Box::new(DirAssetSource::new(bundle))
        };

        Ok(Self::new(files_dir, assets))
    }
}

impl AppContext for BundledContext {
    fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    fn assets(&self) -> &dyn AssetSource {
        self.assets.as_ref()
    }
}
