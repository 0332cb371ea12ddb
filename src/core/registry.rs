use crate::core::{DataLoader, DataProvider};
use crate::utils::error::{InitError, Result};
use regex::Regex;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// Provider serving every file below a directory.
#[derive(Debug, Clone)]
pub struct DirectoryCrawler {
    root: PathBuf,
}

impl DirectoryCrawler {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(InitError::ProviderError {
                message: format!("{} is not a directory", root.display()),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn feed_dir(&self, dir: &Path, supported: &Regex, loader: &mut dyn DataLoader) -> Result<bool> {
        let mut entries = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();

        let mut loaded = false;
        for path in entries {
            if !loader.still_accepts_data() {
                break;
            }

            if path.is_dir() {
                loaded |= self.feed_dir(&path, supported, loader)?;
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if supported.is_match(name) {
                tracing::debug!("Feeding {} to loader", path.display());
                let mut file = File::open(&path)?;
                loader.load_data(&mut file, name)?;
                loaded = true;
            }
        }
        Ok(loaded)
    }
}

impl DataProvider for DirectoryCrawler {
    fn feed(&self, supported: &Regex, loader: &mut dyn DataLoader) -> Result<bool> {
        self.feed_dir(&self.root, supported, loader)
    }

    fn describe(&self) -> String {
        format!("directory:{}", self.root.display())
    }
}

/// Ordered set of data providers consulted when a loader asks for files.
#[derive(Default)]
pub struct DataProvidersManager {
    providers: Mutex<Vec<Arc<dyn DataProvider>>>,
}

impl DataProvidersManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn DataProvider>>> {
        self.providers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers `provider`. Returns `false` when an equivalent provider
    /// (same description) is already registered.
    pub fn add_provider(&self, provider: Arc<dyn DataProvider>) -> bool {
        let description = provider.describe();
        let mut providers = self.lock();
        if providers.iter().any(|p| p.describe() == description) {
            tracing::debug!("Provider {} already registered", description);
            return false;
        }
        tracing::debug!("Registering provider {}", description);
        providers.push(provider);
        true
    }

    pub fn is_registered(&self, description: &str) -> bool {
        self.lock().iter().any(|p| p.describe() == description)
    }

    pub fn providers_count(&self) -> usize {
        self.lock().len()
    }

    pub fn clear_providers(&self) {
        self.lock().clear();
    }

    /// Offers files whose whole name matches `supported_names` to `loader`.
    ///
    /// Providers are tried in registration order until one loads something.
    /// If none does and at least one failed, the last failure is returned.
    pub fn feed(&self, supported_names: &str, loader: &mut dyn DataLoader) -> Result<bool> {
        let supported = Regex::new(&format!("^(?:{})$", supported_names))?;
        let providers: Vec<Arc<dyn DataProvider>> = self.lock().clone();

        let mut last_error = None;
        for provider in providers {
            if !loader.still_accepts_data() {
                break;
            }
            match provider.feed(&supported, loader) {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Provider {} failed: {}", provider.describe(), e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(false),
        }
    }
}

/// Holder of the process-wide provider manager.
pub struct DataContext {
    providers_manager: DataProvidersManager,
}

static DEFAULT_CONTEXT: OnceLock<DataContext> = OnceLock::new();

impl DataContext {
    pub fn global() -> &'static DataContext {
        DEFAULT_CONTEXT.get_or_init(|| DataContext {
            providers_manager: DataProvidersManager::new(),
        })
    }

    pub fn providers_manager(&self) -> &DataProvidersManager {
        &self.providers_manager
    }
}

/// Loader that records name and size of every file it is offered.
#[derive(Debug, Default)]
pub struct FileListingLoader {
    pub files: Vec<(String, u64)>,
}

impl FileListingLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataLoader for FileListingLoader {
    fn still_accepts_data(&self) -> bool {
        true
    }

    fn load_data(&mut self, input: &mut dyn Read, name: &str) -> Result<()> {
        let size = io::copy(input, &mut io::sink())?;
        self.files.push((name.to_string(), size));
        Ok(())
    }
}
