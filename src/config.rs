use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const OUTPUT_DIR_ENV: &str = "RECEIPT_DOWNLOAD_DIR";
pub const LOGO_PATH_ENV: &str = "RECEIPT_LOGO_PATH";

/// Process-wide settings for the renderer, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptConfig {
    /// Directory receipts are written into. Must already exist.
    pub output_dir: PathBuf,
    /// Logo image file, or a directory holding `Companylogo.png`.
    pub logo_path: PathBuf,
}

impl ReceiptConfig {
    pub fn new(output_dir: impl AsRef<Path>, logo_path: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            logo_path: logo_path.as_ref().to_path_buf(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        PartialConfig::from_env().complete()
    }

    /// Reads a JSON file that must set both `outputDir` and `logoPath`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        PartialConfig::from_file(path)?.complete()
    }
}

/// One configuration source, possibly setting only some values.
///
/// Sources are layered with [`or`](Self::or) and then checked for
/// completeness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialConfig {
    pub output_dir: Option<PathBuf>,
    pub logo_path: Option<PathBuf>,
}

impl PartialConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(PathBuf::from))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<PathBuf>) -> Self {
        Self {
            output_dir: lookup(OUTPUT_DIR_ENV),
            logo_path: lookup(LOGO_PATH_ENV),
        }
    }

    /// Keeps every value set here and takes the rest from `fallback`.
    pub fn or(self, fallback: PartialConfig) -> Self {
        Self {
            output_dir: self.output_dir.or(fallback.output_dir),
            logo_path: self.logo_path.or(fallback.logo_path),
        }
    }

    /// Fails with the environment variable name of the first unset value.
    pub fn complete(self) -> Result<ReceiptConfig, ConfigError> {
        Ok(ReceiptConfig {
            output_dir: self.output_dir.ok_or(ConfigError::Missing(OUTPUT_DIR_ENV))?,
            logo_path: self.logo_path.ok_or(ConfigError::Missing(LOGO_PATH_ENV))?,
        })
    }
}
