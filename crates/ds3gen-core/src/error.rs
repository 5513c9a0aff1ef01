//! Error handling for the ds3gen synthesis library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! Contract problems come in two flavours. Configuration errors (an unknown
//! classification, an ambiguous resource path, a malformed type, a duplicate
//! argument) are fatal for the unit they occur in and are collected across the
//! whole run into [`ContractErrors`]. Resolution gaps (a type name the index
//! does not know) are not errors at all; they degrade to "no associated type".
//!
//! # Examples
//!
//! ```
//! use ds3gen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("missing contract path"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type for ds3gen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ds3gen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation carries a classification no backend knows how to handle
    #[error("operation '{operation}' has unrecognized classification '{value}'")]
    UnrecognizedClassification { operation: String, value: String },

    /// Resource id requested in the path without a resource type to decide it
    #[error("operation '{operation}' asks for a resource id in its path but does not declare {missing}")]
    AmbiguousResourcePath {
        operation: String,
        missing: &'static str,
    },

    /// A type that is both or neither enum- and field-shaped
    #[error("type '{type_name}' is malformed: {defect}")]
    MalformedType { type_name: String, defect: TypeDefect },

    /// A required `Operation` parameter with no qualifier to send in its place
    #[error("operation '{operation}' requires an Operation parameter but declares no operation qualifier")]
    MissingOperationQualifier { operation: String },

    /// Two arguments collapse to the same canonical identifier
    #[error("operation '{operation}' has more than one argument named '{ident}'")]
    DuplicateArgument { operation: String, ident: String },

    /// A classification rule table that does not form a valid total order
    #[error("invalid rule table '{table}': {reason}")]
    InvalidRuleTable { table: &'static str, reason: String },

    /// Renderer failure attributed to the unit that produced it
    #[error("failed to render {unit}: {message}")]
    Render { unit: UnitId, message: String },

    /// Every configuration error found during one generation run
    #[error("{0}")]
    Contract(ContractErrors),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new render error for the given unit
    pub fn render<S: Into<String>>(unit: UnitId, msg: S) -> Self {
        Self::Render {
            unit,
            message: msg.into(),
        }
    }
}

/// What is wrong with a malformed type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefect {
    BothEnumAndFields,
    NeitherEnumNorFields,
}

impl fmt::Display for TypeDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BothEnumAndFields => write!(f, "declares both enum constants and fields"),
            Self::NeitherEnumNorFields => write!(f, "declares neither enum constants nor fields"),
        }
    }
}

/// Identifies the contract entity a generation unit (or an error) belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum UnitId {
    Operation(String),
    Type(String),
}

impl UnitId {
    /// The contract name of the entity
    pub fn name(&self) -> &str {
        match self {
            Self::Operation(name) | Self::Type(name) => name,
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operation(name) => write!(f, "operation '{}'", name),
            Self::Type(name) => write!(f, "type '{}'", name),
        }
    }
}

/// A fatal error attributed to one unit
#[derive(Debug)]
pub struct UnitError {
    pub unit: UnitId,
    pub error: Error,
}

/// All fatal errors collected across one run, in contract order
#[derive(Debug, Default)]
pub struct ContractErrors(pub Vec<UnitError>);

impl ContractErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitError> {
        self.0.iter()
    }
}

impl fmt::Display for ContractErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} contract error(s)", self.0.len())?;
        for unit_error in &self.0 {
            write!(f, "\n  - {}: {}", unit_error.unit, unit_error.error)?;
        }
        Ok(())
    }
}
