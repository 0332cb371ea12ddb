pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::core::initializer::{DEFAULT_ASSET_ROOT, DEFAULT_DATA_DIR_NAME};
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sat-tracker-init")]
#[command(about = "Provision bundled orbit data and register it with the data providers")]
pub struct CliConfig {
    #[arg(long, default_value = "./files", help = "Private writable storage of the app")]
    pub files_dir: String,

    #[arg(long, default_value = "./assets", help = "Asset bundle: a directory, .zip or .apk")]
    pub assets: String,

    #[arg(long, default_value = DEFAULT_ASSET_ROOT)]
    pub asset_root: String,

    #[arg(long, default_value = DEFAULT_DATA_DIR_NAME)]
    pub data_dir_name: String,

    #[arg(long, help = "TOML configuration file, overrides the path flags")]
    pub config: Option<String>,

    #[arg(long, value_name = "REGEX", help = "List registered data files matching REGEX")]
    pub list: Option<String>,

    #[arg(long, help = "Print the outcome as JSON")]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn files_dir(&self) -> &str {
        &self.files_dir
    }

    fn assets_bundle(&self) -> &str {
        &self.assets
    }

    fn asset_root(&self) -> &str {
        &self.asset_root
    }

    fn data_dir_name(&self) -> &str {
        &self.data_dir_name
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("files_dir", &self.files_dir)?;
        validation::validate_path("assets", &self.assets)?;
        validation::validate_asset_path("asset_root", &self.asset_root)?;
        validation::validate_dir_name("data_dir_name", &self.data_dir_name)?;
        if let Some(pattern) = &self.list {
            validation::validate_pattern("list", pattern)?;
        }
        Ok(())
    }
}
