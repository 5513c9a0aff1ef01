//! Configuration management for ds3gen runs.
//!
//! A `Config` names the contract to read, the target language, where the
//! template sets live and where generated files go. It can be built in code
//! or loaded from a YAML file.
//!
//! # Examples
//!
//! ```no_run
//! use ds3gen_core::config::Config;
//!
//! let mut config = Config::new("contract.json", "sdk");
//! config.target = "python".to_string();
//! config.exclude_operations.push("GetObjectRequestHandler".to_string());
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::engine::OperationFilter;
use crate::target::TargetLanguage;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Configuration for one ds3gen generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the contract (JSON or YAML)
    pub contract_path: String,

    /// Output directory for generated code
    pub output_dir: String,

    /// Target language name, e.g. `java` or `python`
    #[serde(default = "default_target")]
    pub target: String,

    /// Optional path to the template directory
    #[serde(default)]
    pub template_dir: Option<String>,

    /// Handler simple names to generate; empty means all of them
    #[serde(default)]
    pub include_operations: Vec<String>,

    /// Handler simple names to skip
    #[serde(default)]
    pub exclude_operations: Vec<String>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(contract_path: impl Into<String>, output_dir: impl Into<String>) -> Self {
        Self {
            contract_path: contract_path.into(),
            output_dir: output_dir.into(),
            target: default_target(),
            template_dir: None,
            include_operations: Vec::new(),
            exclude_operations: Vec::new(),
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// The configured target language
    pub fn target_language(&self) -> crate::Result<TargetLanguage> {
        self.target.parse().map_err(crate::Error::Config)
    }

    pub fn template_dir(&self) -> Option<PathBuf> {
        self.template_dir.as_ref().map(PathBuf::from)
    }

    pub fn operation_filter(&self) -> OperationFilter {
        OperationFilter {
            include: self.include_operations.clone(),
            exclude: self.exclude_operations.clone(),
        }
    }
}

fn default_target() -> String {
    TargetLanguage::default().as_str().to_string()
}
