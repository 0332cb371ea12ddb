pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{BundledContext, DirAssetSource, ZipAssetSource};
pub use core::initializer::{init_orbit_data, InitOptions, OrbitDataInitializer};
pub use core::registry::{DataContext, DataProvidersManager, DirectoryCrawler};
pub use utils::error::{InitError, Result};
