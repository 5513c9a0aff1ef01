//! Operation and type classification.
//!
//! The classifier maps one contract entity to a [`Shape`] using the ordered
//! rule tables from [`rules`]. One shared table serves every target
//! language; per-language differences live in the target profiles.
//!
//! # Examples
//!
//! ```
//! use ds3gen_core::classify::{Classifier, Entity, OperationShape, Shape};
//! use ds3gen_core::contract::{Contract, ContractIndex};
//!
//! let contract = Contract::parse(r#"
//! operations:
//!   - name: com.spectralogic.s3.server.handler.reqhandler.spectrads3.job.CreateGetJobRequestHandler
//!     classification: spectrads3
//!     operation: START_BULK_GET
//! "#).unwrap();
//! let index = ContractIndex::new(&contract);
//! let classifier = Classifier::new().unwrap();
//!
//! let shape = classifier
//!     .classify(Entity::Operation(&contract.operations[0]), &index)
//!     .unwrap();
//! assert_eq!(shape, Shape::Operation(OperationShape::BulkGet));
//! ```

pub mod rules;

// Internal imports (std, crate)
use std::fmt;

use crate::contract::{Classification, ContractIndex, Operation, TypeDef};
use crate::error::{Error, Result, TypeDefect};
use rules::RuleTable;

// External imports (alphabetized)
use log::debug;
use serde::Serialize;

/// Generation strategy for one request handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationShape {
    AmazonGetObject,
    AmazonCreateObject,
    Head,
    AllocateJobChunk,
    GetJobChunksReady,
    BulkGet,
    BulkPut,
    PhysicalPlacement,
    MultiObjectDelete,
    CompleteMultipartUpload,
    Paginated,
    Standard,
}

impl OperationShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AmazonGetObject => "amazon_get_object",
            Self::AmazonCreateObject => "amazon_create_object",
            Self::Head => "head",
            Self::AllocateJobChunk => "allocate_job_chunk",
            Self::GetJobChunksReady => "get_job_chunks_ready",
            Self::BulkGet => "bulk_get",
            Self::BulkPut => "bulk_put",
            Self::PhysicalPlacement => "physical_placement",
            Self::MultiObjectDelete => "multi_object_delete",
            Self::CompleteMultipartUpload => "complete_multipart_upload",
            Self::Paginated => "paginated",
            Self::Standard => "standard",
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        use OperationShape::*;
        [
            AmazonGetObject,
            AmazonCreateObject,
            Head,
            AllocateJobChunk,
            GetJobChunksReady,
            BulkGet,
            BulkPut,
            PhysicalPlacement,
            MultiObjectDelete,
            CompleteMultipartUpload,
            Paginated,
            Standard,
        ]
        .into_iter()
    }
}

impl fmt::Display for OperationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generation strategy for one payload type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    Enum,
    /// Returned directly by at least one operation
    TopLevel,
    /// Only ever appears inside another type
    Nested,
}

impl TypeShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::TopLevel => "top_level",
            Self::Nested => "nested",
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of classifying one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Internal API; never synthesized
    Excluded,
    Operation(OperationShape),
    Type(TypeShape),
}

/// A contract entity to classify
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Operation(&'a Operation),
    Type(&'a TypeDef),
}

/// Validated operation and type rule tables
#[derive(Debug)]
pub struct Classifier {
    operations: RuleTable<Operation, OperationShape>,
    types: RuleTable<TypeDef, TypeShape>,
}

impl Classifier {
    /// Build a classifier over the default rule tables
    pub fn new() -> Result<Self> {
        Self::with_rules(rules::operation_rules(), rules::type_rules())
    }

    /// Build a classifier over custom rule lists, validating both
    pub fn with_rules(
        operations: Vec<rules::Rule<Operation, OperationShape>>,
        types: Vec<rules::Rule<TypeDef, TypeShape>>,
    ) -> Result<Self> {
        Ok(Self {
            operations: RuleTable::new("operations", operations)?,
            types: RuleTable::new("types", types)?,
        })
    }

    pub fn classify(&self, entity: Entity<'_>, index: &ContractIndex<'_>) -> Result<Shape> {
        match entity {
            Entity::Operation(op) => Ok(self
                .classify_operation(op, index)?
                .map_or(Shape::Excluded, Shape::Operation)),
            Entity::Type(t) => self.classify_type(t, index).map(Shape::Type),
        }
    }

    /// Shape of a public operation, or `None` for an internal one
    pub fn classify_operation(
        &self,
        op: &Operation,
        index: &ContractIndex<'_>,
    ) -> Result<Option<OperationShape>> {
        match &op.classification {
            Classification::SpectraInternal => {
                debug!("Excluding internal operation {}", op.name);
                return Ok(None);
            }
            Classification::Unrecognized(value) => {
                return Err(Error::UnrecognizedClassification {
                    operation: op.name.clone(),
                    value: value.clone(),
                });
            }
            Classification::AmazonS3 | Classification::SpectraS3 => {}
        }

        let rule = self.operations.first_match(op, index);
        debug!(
            "Operation {} classified as {} by rule '{}'",
            op.simple_name(),
            rule.shape,
            rule.name
        );
        Ok(Some(rule.shape))
    }

    pub fn classify_type(&self, t: &TypeDef, index: &ContractIndex<'_>) -> Result<TypeShape> {
        let defect = match (t.elements.is_empty(), t.enum_constants.is_empty()) {
            (false, false) => Some(TypeDefect::BothEnumAndFields),
            (true, true) => Some(TypeDefect::NeitherEnumNorFields),
            _ => None,
        };
        if let Some(defect) = defect {
            return Err(Error::MalformedType {
                type_name: t.name.clone(),
                defect,
            });
        }

        let rule = self.types.first_match(t, index);
        debug!(
            "Type {} classified as {} by rule '{}'",
            t.simple_name(),
            rule.shape,
            rule.name
        );
        Ok(rule.shape)
    }
}
