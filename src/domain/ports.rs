use crate::core::initializer::InitOptions;
use crate::utils::error::Result;
use regex::Regex;
use std::io::Read;
use std::path::Path;

/// Read-only tree of bundled assets addressed by relative `/`-separated paths.
///
/// `list` returns the names of the direct children of `path`. A leaf file and
/// a directory with no listable children both yield an empty list; callers
/// treat either as a file and `open` it.
pub trait AssetSource {
    fn list(&self, path: &str) -> Result<Vec<String>>;
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>>;
}

/// What the initializer needs from the hosting application.
pub trait AppContext {
    /// Private writable storage of the application.
    fn files_dir(&self) -> &Path;
    fn assets(&self) -> &dyn AssetSource;
}

/// Consumer of data files offered by a [`DataProvider`].
pub trait DataLoader {
    fn still_accepts_data(&self) -> bool;
    fn load_data(&mut self, input: &mut dyn Read, name: &str) -> Result<()>;
}

/// Something that can feed data files to loaders, e.g. a directory on disk.
pub trait DataProvider: Send + Sync {
    /// Offers every file whose name matches `supported` to `loader`.
    /// Returns `true` if at least one file was loaded.
    fn feed(&self, supported: &Regex, loader: &mut dyn DataLoader) -> Result<bool>;

    fn describe(&self) -> String;
}

/// Settings source for the initializer binary (flags or a TOML file).
pub trait ConfigProvider {
    fn files_dir(&self) -> &str;
    fn assets_bundle(&self) -> &str;
    fn asset_root(&self) -> &str;
    fn data_dir_name(&self) -> &str;

    fn init_options(&self) -> InitOptions {
        InitOptions {
            asset_root: self.asset_root().to_string(),
            data_dir_name: self.data_dir_name().to_string(),
        }
    }
}
