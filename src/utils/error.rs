use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid file pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Asset not found: {path}")]
    AssetNotFound { path: String },

    #[error("Invalid asset path '{path}': {reason}")]
    InvalidAssetPath { path: String, reason: String },

    #[error("Data provider error: {message}")]
    ProviderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InitError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            InitError::ConfigValidationError { .. }
            | InitError::InvalidConfigValueError { .. }
            | InitError::PatternError(_) => ErrorSeverity::High,
            InitError::AssetNotFound { .. } | InitError::InvalidAssetPath { .. } => {
                ErrorSeverity::Medium
            }
            InitError::ProviderError { .. } => ErrorSeverity::Medium,
            InitError::IoError(_) | InitError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            InitError::ConfigValidationError { .. } | InitError::InvalidConfigValueError { .. } => {
                "Check the command line flags or the TOML configuration file"
            }
            InitError::PatternError(_) => "Use a valid regular expression for --list",
            InitError::AssetNotFound { .. } | InitError::InvalidAssetPath { .. } => {
                "Make sure the asset bundle contains the orbit data root"
            }
            InitError::ZipError(_) => "The asset archive looks corrupted, rebuild the bundle",
            InitError::IoError(_) => {
                "Check that the files directory is writable and has free space"
            }
            InitError::ProviderError { .. } => {
                "Remove the data directory so it is provisioned again on next start"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            InitError::IoError(e) => format!("File system error while preparing orbit data: {}", e),
            InitError::ZipError(e) => format!("Could not read the asset archive: {}", e),
            InitError::AssetNotFound { path } => {
                format!("Bundled asset '{}' does not exist", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InitError>;
