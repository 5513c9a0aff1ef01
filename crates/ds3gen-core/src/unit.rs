//! Generation units: the self-describing output of one synthesis step.
//!
//! A unit carries everything a renderer needs. Renderers never look back
//! into the contract.

use crate::classify::OperationShape;
use crate::contract::{Classification, HttpVerb};
use crate::error::UnitId;
use crate::synth::{
    Argument, OptionalArgument, PathExpression, QueryEffect, RequestPayload, ResponseModel,
    TypeUnit,
};

// External imports (alphabetized)
use serde::Serialize;

/// Synthesized description of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationUnit {
    /// SDK request name, e.g. `GetJobSpectraS3Request`
    pub name: String,
    pub response_name: String,
    /// Fully qualified handler name from the contract
    pub source: String,
    pub classification: Classification,
    /// Whether the request belongs to the SpectraS3 surface
    pub spectra: bool,
    pub shape: OperationShape,
    pub http_verb: Option<HttpVerb>,
    pub path: PathExpression,
    pub required: Vec<Argument>,
    pub optional: Vec<OptionalArgument>,
    /// Query parameters sent unconditionally
    pub effects: Vec<QueryEffect>,
    pub payload: RequestPayload,
    pub response: ResponseModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum GenerationUnit {
    Operation(OperationUnit),
    Type(TypeUnit),
}

impl GenerationUnit {
    /// Generated name of the unit
    pub fn name(&self) -> &str {
        match self {
            Self::Operation(op) => &op.name,
            Self::Type(t) => &t.name,
        }
    }

    /// Identifies the contract entity the unit came from
    pub fn id(&self) -> UnitId {
        match self {
            Self::Operation(op) => UnitId::Operation(op.source.clone()),
            Self::Type(t) => UnitId::Type(t.source.clone()),
        }
    }

    /// The shape name templates are selected by
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Operation(op) => op.shape.as_str(),
            Self::Type(t) => t.shape.as_str(),
        }
    }

    pub fn as_operation(&self) -> Option<&OperationUnit> {
        match self {
            Self::Operation(op) => Some(op),
            Self::Type(_) => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeUnit> {
        match self {
            Self::Type(t) => Some(t),
            Self::Operation(_) => None,
        }
    }
}
