use crate::core::initializer::{DEFAULT_ASSET_ROOT, DEFAULT_DATA_DIR_NAME};
use crate::core::ConfigProvider;
use crate::utils::error::{InitError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: StorageConfig,
    pub assets: AssetsConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub files_dir: String,
    pub data_dir_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    pub bundle: String,
    pub root: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InitError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; undefined variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn files_dir(&self) -> &str {
        &self.storage.files_dir
    }

    fn assets_bundle(&self) -> &str {
        &self.assets.bundle
    }

    fn asset_root(&self) -> &str {
        self.assets.root.as_deref().unwrap_or(DEFAULT_ASSET_ROOT)
    }

    fn data_dir_name(&self) -> &str {
        self.storage
            .data_dir_name
            .as_deref()
            .unwrap_or(DEFAULT_DATA_DIR_NAME)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("storage.files_dir", &self.storage.files_dir)?;
        validation::validate_path("assets.bundle", &self.assets.bundle)?;
        validation::validate_asset_path("assets.root", self.asset_root())?;
        validation::validate_dir_name("storage.data_dir_name", self.data_dir_name())?;

        if self.storage.files_dir.contains("${") {
            return Err(InitError::InvalidConfigValueError {
                field: "storage.files_dir".to_string(),
                value: self.storage.files_dir.clone(),
                reason: "Unresolved environment variable".to_string(),
            });
        }

        Ok(())
    }
}
