use crate::core::{AssetSource, ProvisionReport};
use crate::utils::error::{InitError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// True when `dest` is absent, cannot be listed, or has no entries.
pub fn needs_provisioning(dest: &Path) -> bool {
    match fs::read_dir(dest) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}

/// Mirrors a bundled asset tree into a local directory on first run.
pub struct AssetProvisioner<'a> {
    source: &'a dyn AssetSource,
}

impl<'a> AssetProvisioner<'a> {
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self { source }
    }

    /// Copies the tree under `asset_root` into `dest` unless `dest` already
    /// has content. The root keeps its own name, so a root `orekit-data`
    /// lands at `dest/orekit-data/...`.
    ///
    /// Stops at the first I/O error; files copied before it stay in place.
    pub fn provision(&self, asset_root: &str, dest: &Path) -> Result<ProvisionReport> {
        if !needs_provisioning(dest) {
            tracing::debug!("{} already populated, skipping copy", dest.display());
            return Ok(ProvisionReport::skipped(dest.to_path_buf()));
        }

        tracing::info!("Copying bundled assets '{}' to {}", asset_root, dest.display());

        let root_name = asset_root
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| InitError::AssetNotFound {
                path: asset_root.to_string(),
            })?;

        let mut report = ProvisionReport {
            destination: dest.to_path_buf(),
            copied: true,
            files_copied: 0,
            bytes_copied: 0,
        };
        self.copy_assets_recursively(asset_root, &dest.join(root_name), &mut report)?;

        tracing::info!(
            "Copied {} files ({} bytes) to {}",
            report.files_copied,
            report.bytes_copied,
            dest.display()
        );
        Ok(report)
    }

    /// Walks `asset_path`; entries with children recurse, everything else is
    /// copied as a file to `dest_path`.
    pub fn copy_assets_recursively(
        &self,
        asset_path: &str,
        dest_path: &Path,
        report: &mut ProvisionReport,
    ) -> Result<()> {
        let children = self.source.list(asset_path)?;
        if children.is_empty() {
            return self.copy_leaf(asset_path, dest_path, report);
        }

        fs::create_dir_all(dest_path)?;
        for child in children {
            self.copy_assets_recursively(
                &join_asset(asset_path, &child),
                &dest_path.join(&child),
                report,
            )?;
        }
        Ok(())
    }

    fn copy_leaf(
        &self,
        asset_path: &str,
        dest_path: &Path,
        report: &mut ProvisionReport,
    ) -> Result<()> {
        let mut input = self.source.open(asset_path)?;
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut output = BufWriter::new(File::create(dest_path)?);
        let bytes = io::copy(&mut input, &mut output)?;
        output.flush()?;

        tracing::debug!("Copied {} ({} bytes)", asset_path, bytes);
        report.files_copied += 1;
        report.bytes_copied += bytes;
        Ok(())
    }
}

fn join_asset(parent: &str, child: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", parent, child)
    }
}
