use super::asset_components;
use crate::core::AssetSource;
use crate::utils::error::{InitError, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Assets packed inside a zip archive, the way an application package ships them.
///
/// The directory structure is derived from entry names once, at open time.
/// Directory entries (`name/`) without children are listed as empty, so the
/// provisioner treats them as leaves.
pub struct ZipAssetSource<R: Read + Seek> {
    archive: RefCell<ZipArchive<R>>,
    children: BTreeMap<String, BTreeSet<String>>,
    // normalized path -> entry name inside the archive
    files: HashMap<String, String>,
}

impl ZipAssetSource<File> {
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> ZipAssetSource<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;

        let mut children: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut files = HashMap::new();

        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        for name in names {
            let is_dir = name.ends_with('/');
            let components = match asset_components(&name) {
                Ok(c) if !c.is_empty() => c,
                _ => {
                    tracing::warn!("Ignoring zip entry with unsafe name: {}", name);
                    continue;
                }
            };

            let mut parent = String::new();
            for component in &components {
                children
                    .entry(parent.clone())
                    .or_default()
                    .insert(component.to_string());
                if !parent.is_empty() {
                    parent.push('/');
                }
                parent.push_str(component);
            }

            if is_dir {
                children.entry(parent).or_default();
            } else {
                files.insert(parent, name);
            }
        }

        Ok(Self {
            archive: RefCell::new(archive),
            children,
            files,
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn normalize(path: &str) -> Result<String> {
        Ok(asset_components(path)?.join("/"))
    }
}

impl<R: Read + Seek> AssetSource for ZipAssetSource<R> {
    fn list(&self, path: &str) -> Result<Vec<String>> {
        let key = Self::normalize(path)?;
        Ok(self
            .children
            .get(&key)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// The entry is decompressed into memory while the archive is borrowed;
    /// the header's declared size is not trusted for allocation.
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>> {
        let key = Self::normalize(path)?;
        let entry_name = self
            .files
            .get(&key)
            .ok_or_else(|| InitError::AssetNotFound {
                path: path.to_string(),
            })?;

        let mut archive = self.archive.borrow_mut();
        let mut entry = archive.by_name(entry_name)?;
        let mut buffer = Vec::new();
        io::copy(&mut entry, &mut buffer)?;

        Ok(Box::new(Cursor::new(buffer)))
    }
}
