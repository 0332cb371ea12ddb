// Adapters layer: concrete implementations of the domain ports.

pub mod context;
pub mod dir_assets;
pub mod zip_assets;

pub use context::BundledContext;
pub use dir_assets::DirAssetSource;
pub use zip_assets::ZipAssetSource;

use crate::utils::error::{InitError, Result};

/// Splits a relative asset path into its components, rejecting anything that
/// could escape the bundle root.
pub(crate) fn asset_components(path: &str) -> Result<Vec<&str>> {
    if path.starts_with('/') || path.starts_with('\\') {
        return Err(InitError::InvalidAssetPath {
            path: path.to_string(),
            reason: "absolute paths are not allowed".to_string(),
        });
    }

    let mut components = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => continue,
            ".." => {
                return Err(InitError::InvalidAssetPath {
                    path: path.to_string(),
                    reason: "parent components are not allowed".to_string(),
                })
            }
            c if c.contains('\\') || c.contains('\0') => {
                return Err(InitError::InvalidAssetPath {
                    path: path.to_string(),
                    reason: "invalid character in path component".to_string(),
                })
            }
            c => components.push(c),
        }
    }
    Ok(components)
}
