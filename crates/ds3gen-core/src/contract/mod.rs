//! The in-memory DS3 API contract.
//!
//! A [`Contract`] is the fully materialised description of the storage API:
//! every request handler with its parameters and response codes, and every
//! payload type. It is plain data, immutable for the duration of a generation
//! run, and can be loaded from JSON or YAML.
//!
//! # Examples
//!
//! ```
//! use ds3gen_core::contract::{Classification, Contract};
//!
//! let contract = Contract::parse(r#"
//! operations:
//!   - name: com.spectralogic.s3.server.handler.reqhandler.amazons3.GetServiceRequestHandler
//!     http_verb: GET
//!     classification: amazons3
//! "#).unwrap();
//!
//! assert_eq!(contract.operations.len(), 1);
//! assert_eq!(contract.operations[0].classification, Classification::AmazonS3);
//! ```

mod index;

pub use index::ContractIndex;

// Internal imports (std, crate)
use std::fmt;
use std::path::Path;

use crate::utils::remove_path;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Raw type name of a parameter whose presence alone is meaningful
pub const VOID_TYPE: &str = "void";

/// Raw type name marking "no payload" in a response code
pub const NULL_TYPE: &str = "null";

/// The complete API description, in contract declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

impl Contract {
    /// Load a contract from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse(&content).map_err(|e| {
            crate::Error::config(format!(
                "Failed to parse contract at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Parse a contract from JSON, falling back to YAML
    pub fn parse(content: &str) -> crate::Result<Self> {
        match serde_json::from_str(content) {
            Ok(contract) => Ok(contract),
            Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
                crate::Error::config(format!(
                    "content is neither valid JSON ({}) nor YAML ({})",
                    json_err, yaml_err
                ))
            }),
        }
    }
}

/// One request handler of the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Fully qualified handler name
    pub name: String,
    #[serde(default)]
    pub http_verb: Option<HttpVerb>,
    pub classification: Classification,
    #[serde(default)]
    pub bucket_requirement: Option<Requirement>,
    #[serde(default)]
    pub object_requirement: Option<Requirement>,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub resource: Option<Resource>,
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
    #[serde(default)]
    pub operation: Option<OperationQualifier>,
    #[serde(default)]
    pub include_id_in_path: bool,
    #[serde(default)]
    pub response_codes: Vec<ResponseCode>,
    #[serde(default)]
    pub required_params: Vec<Param>,
    #[serde(default)]
    pub optional_params: Vec<Param>,
}

impl Operation {
    /// Handler name without its package path
    pub fn simple_name(&self) -> &str {
        remove_path(&self.name)
    }

    /// First response code in the 2xx range, if any
    pub fn success_code(&self) -> Option<&ResponseCode> {
        self.response_codes.iter().find(|rc| rc.is_success())
    }

    pub fn has_optional_param(&self, name: &str) -> bool {
        self.optional_params.iter().any(|p| p.name == name)
    }

    pub fn has_required_param(&self, name: &str) -> bool {
        self.required_params.iter().any(|p| p.name == name)
    }

    /// Whether the handler's simple name is exactly `simple`
    pub fn is_handler(&self, simple: &str) -> bool {
        self.simple_name() == simple
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Put,
    Post,
    Delete,
    Head,
}

/// Which API surface an operation belongs to.
///
/// Unknown wire values are kept rather than rejected at parse time so that
/// classification can report them against the operation that carries them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
    AmazonS3,
    SpectraS3,
    SpectraInternal,
    Unrecognized(String),
}

impl Classification {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AmazonS3 => "amazons3",
            Self::SpectraS3 => "spectrads3",
            Self::SpectraInternal => "spectrainternal",
            Self::Unrecognized(value) => value,
        }
    }
}

impl From<String> for Classification {
    fn from(value: String) -> Self {
        match value.as_str() {
            "amazons3" => Self::AmazonS3,
            "spectrads3" => Self::SpectraS3,
            "spectrainternal" => Self::SpectraInternal,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<Classification> for String {
    fn from(value: Classification) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement constraint for the bucket or object segment of an Amazon S3 path.
///
/// An absent requirement (`None` on the operation) means unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Requirement {
    Required,
    NotAllowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    BulkDelete,
    BulkModify,
    Create,
    Delete,
    List,
    Modify,
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Singleton,
    NonSingleton,
}

/// A SpectraS3 resource such as `BUCKET` or `JOB_CHUNK`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(pub String);

impl Resource {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A SpectraS3 operation qualifier such as `START_BULK_GET`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationQualifier(pub String);

impl OperationQualifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_any(&self, candidates: &[&str]) -> bool {
        candidates.contains(&self.0.as_str())
    }
}

/// A request parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub component_type: Option<String>,
    #[serde(default)]
    pub nullable: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            component_type: None,
            nullable: false,
        }
    }

    /// Whether only the presence of this parameter is meaningful
    pub fn is_void(&self) -> bool {
        self.type_name == VOID_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCode {
    pub code: u16,
    #[serde(default)]
    pub response_types: Vec<ResponseType>,
}

impl ResponseCode {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// The declared payload, or `None` when success carries no body
    pub fn payload(&self) -> Option<&ResponseType> {
        self.response_types
            .first()
            .filter(|rt| rt.type_name != NULL_TYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseType {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub component_type: Option<String>,
}

impl ResponseType {
    /// The name that identifies the payload's element type
    pub fn element_type(&self) -> &str {
        self.component_type.as_deref().unwrap_or(&self.type_name)
    }
}

/// A payload type: either field-shaped or enum-shaped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    #[serde(default)]
    pub name_to_marshal: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub enum_constants: Vec<String>,
}

impl TypeDef {
    pub fn simple_name(&self) -> &str {
        remove_path(&self.name)
    }

    pub fn is_enum(&self) -> bool {
        !self.enum_constants.is_empty()
    }
}

/// One field of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub component_type: Option<String>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub attribute: bool,
    #[serde(default)]
    pub xml_tag: Option<String>,
    #[serde(default)]
    pub enclosing_tag: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            component_type: None,
            nullable: false,
            attribute: false,
            xml_tag: None,
            enclosing_tag: None,
        }
    }
}
