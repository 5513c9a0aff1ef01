//! Target languages and their per-language deltas.
//!
//! Every language shares the same classifier and synthesizers. What differs
//! is captured as data in a static [`TargetProfile`] row: which parameters a
//! shape hides from callers, and where generated files land in the SDK tree.
//! C is the one target that splits a type over two files: a header and a
//! matcher that maps wire values back onto it.
//!
//! # Examples
//!
//! ```
//! use ds3gen_core::target::TargetLanguage;
//! use std::str::FromStr;
//!
//! let target = TargetLanguage::from_str("net").unwrap();
//! assert_eq!(target, TargetLanguage::Net);
//! assert_eq!(target.as_str(), "net");
//! assert_eq!(target.to_string(), "net");
//!
//! // Java is the default target
//! assert_eq!(TargetLanguage::default(), TargetLanguage::Java);
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::classify::OperationShape;
use crate::unit::GenerationUnit;
use crate::utils::to_snake_case;

// External imports (alphabetized)
use serde::Serialize;

/// Supported SDK languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    #[default]
    Java,
    /// C# for .NET
    Net,
    Python,
    Go,
    C,
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "java" => Ok(Self::Java),
            "net" | "dotnet" | "csharp" => Ok(Self::Net),
            "python" => Ok(Self::Python),
            "go" => Ok(Self::Go),
            "c" => Ok(Self::C),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// Returns the target identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Net => "net",
            Self::Python => "python",
            Self::Go => "go",
            Self::C => "c",
        }
    }

    /// Returns an iterator over all target languages
    pub fn all() -> impl Iterator<Item = Self> {
        use TargetLanguage::*;
        [Java, Net, Python, Go, C].iter().copied()
    }

    /// The static profile row for this language
    pub fn profile(&self) -> &'static TargetProfile {
        match self {
            Self::Java => &JAVA_PROFILE,
            Self::Net => &NET_PROFILE,
            Self::Python => &PYTHON_PROFILE,
            Self::Go => &GO_PROFILE,
            Self::C => &C_PROFILE,
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How generated file names are cased
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCase {
    UpperCamel,
    Snake,
}

/// Per-language deltas applied around the shared engine
#[derive(Debug)]
pub struct TargetProfile {
    pub language: TargetLanguage,
    /// Optional parameters a shape never exposes as arguments
    pub param_exclusions: &'static [(OperationShape, &'static str)],
    pub request_dir: &'static str,
    pub spectra_request_dir: &'static str,
    pub type_dir: &'static str,
    pub extension: &'static str,
    /// Extension of type files when it differs from requests, e.g. C headers
    pub type_extension: &'static str,
    /// File name suffix of the companion matcher written next to each type
    pub type_matcher_suffix: Option<&'static str>,
    pub file_case: FileCase,
}

const BULK_GET_ORDERING: &[(OperationShape, &str)] = &[(
    OperationShape::BulkGet,
    "ChunkClientProcessingOrderGuarantee",
)];

static JAVA_PROFILE: TargetProfile = TargetProfile {
    language: TargetLanguage::Java,
    param_exclusions: &[],
    request_dir: "ds3-sdk/src/main/java/com/spectralogic/ds3client/commands",
    spectra_request_dir: "ds3-sdk/src/main/java/com/spectralogic/ds3client/commands/spectrads3",
    type_dir: "ds3-sdk/src/main/java/com/spectralogic/ds3client/models",
    extension: "java",
    type_extension: "java",
    type_matcher_suffix: None,
    file_case: FileCase::UpperCamel,
};

static NET_PROFILE: TargetProfile = TargetProfile {
    language: TargetLanguage::Net,
    param_exclusions: BULK_GET_ORDERING,
    request_dir: "Ds3/Calls",
    spectra_request_dir: "Ds3/Calls",
    type_dir: "Ds3/Models",
    extension: "cs",
    type_extension: "cs",
    type_matcher_suffix: None,
    file_case: FileCase::UpperCamel,
};

static PYTHON_PROFILE: TargetProfile = TargetProfile {
    language: TargetLanguage::Python,
    param_exclusions: BULK_GET_ORDERING,
    request_dir: "ds3/requests",
    spectra_request_dir: "ds3/requests/spectrads3",
    type_dir: "ds3/models",
    extension: "py",
    type_extension: "py",
    type_matcher_suffix: None,
    file_case: FileCase::Snake,
};

static GO_PROFILE: TargetProfile = TargetProfile {
    language: TargetLanguage::Go,
    param_exclusions: &[],
    request_dir: "ds3/commands",
    spectra_request_dir: "ds3/commands",
    type_dir: "ds3/models",
    extension: "go",
    type_extension: "go",
    type_matcher_suffix: None,
    file_case: FileCase::Snake,
};

static C_PROFILE: TargetProfile = TargetProfile {
    language: TargetLanguage::C,
    param_exclusions: &[],
    request_dir: "ds3_c_sdk/src/requests",
    spectra_request_dir: "ds3_c_sdk/src/requests",
    type_dir: "ds3_c_sdk/src/types",
    extension: "c",
    type_extension: "h",
    type_matcher_suffix: Some("_matcher.c"),
    file_case: FileCase::Snake,
};

impl TargetProfile {
    /// Parameter names hidden for `shape`
    pub fn excluded_params(&self, shape: OperationShape) -> Vec<&'static str> {
        self.param_exclusions
            .iter()
            .filter(|(s, _)| *s == shape)
            .map(|(_, name)| *name)
            .collect()
    }

    fn file_stem(&self, name: &str) -> String {
        match self.file_case {
            FileCase::UpperCamel => name.to_string(),
            FileCase::Snake => to_snake_case(name),
        }
    }

    fn file_name(&self, name: &str, extension: &str) -> String {
        format!("{}.{}", self.file_stem(name), extension)
    }

    /// Location of a unit's generated file, relative to the SDK root
    pub fn output_path(&self, unit: &GenerationUnit) -> PathBuf {
        let (dir, extension) = match unit {
            GenerationUnit::Operation(op) if op.spectra => (self.spectra_request_dir, self.extension),
            GenerationUnit::Operation(_) => (self.request_dir, self.extension),
            GenerationUnit::Type(_) => (self.type_dir, self.type_extension),
        };
        PathBuf::from(dir).join(self.file_name(unit.name(), extension))
    }

    /// Location of the matcher for a type unit, on targets that write one
    pub fn matcher_path(&self, unit: &GenerationUnit) -> Option<PathBuf> {
        match (unit, self.type_matcher_suffix) {
            (GenerationUnit::Type(t), Some(suffix)) => Some(
                PathBuf::from(self.type_dir).join(format!("{}{}", self.file_stem(&t.name), suffix)),
            ),
            _ => None,
        }
    }
}
