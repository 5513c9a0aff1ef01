//! Request path synthesis.
//!
//! Amazon S3 handlers use the placement family: a `/` root followed by the
//! bucket and object segments their requirements ask for. SpectraS3 handlers
//! use the resource family: `/_rest_/<resource>` with an id segment only for
//! non-singleton resources that ask for one.

// Internal imports (std, crate)
use std::fmt;

use super::value::ValueKind;
use crate::contract::{Classification, Operation, Requirement, ResourceType};
use crate::error::{Error, Result};
use crate::utils::{to_snake_case, to_upper_camel_case};

// External imports (alphabetized)
use serde::Serialize;

const PLACEMENT_ROOT: &str = "/";
const REST_ROOT: &str = "/_rest_/";

/// One piece of a request path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum PathNode {
    Literal { text: String },
    Variable { name: String, ident: String, kind: ValueKind },
}

/// Literal segments and variable references, in order.
///
/// Adjacent literals are always merged, so literals and variables alternate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathExpression {
    pub nodes: Vec<PathNode>,
}

impl PathExpression {
    fn push_literal(&mut self, text: &str) {
        if let Some(PathNode::Literal { text: last }) = self.nodes.last_mut() {
            last.push_str(text);
        } else {
            self.nodes.push(PathNode::Literal {
                text: text.to_string(),
            });
        }
    }

    fn push_variable(&mut self, name: &str, kind: ValueKind) {
        self.nodes.push(PathNode::Variable {
            name: name.to_string(),
            ident: to_snake_case(name),
            kind,
        });
    }

    /// Variable nodes as `(name, kind)`, in path order
    pub fn variables(&self) -> impl Iterator<Item = (&str, &ValueKind)> {
        self.nodes.iter().filter_map(|node| match node {
            PathNode::Variable { name, kind, .. } => Some((name.as_str(), kind)),
            PathNode::Literal { .. } => None,
        })
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables().any(|(n, _)| n == name)
    }
}

/// Renders variables as `{ident}`; for diagnostics and tests
impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            match node {
                PathNode::Literal { text } => f.write_str(text)?,
                PathNode::Variable { ident, .. } => write!(f, "{{{}}}", ident)?,
            }
        }
        Ok(())
    }
}

pub fn synthesize_path(op: &Operation) -> Result<PathExpression> {
    match op.classification {
        Classification::AmazonS3 => Ok(placement_path(op)),
        _ => resource_path(op),
    }
}

fn placement_path(op: &Operation) -> PathExpression {
    let mut path = PathExpression::default();
    path.push_literal(PLACEMENT_ROOT);

    let bucket = op.bucket_requirement == Some(Requirement::Required);
    if bucket {
        path.push_variable("BucketName", ValueKind::String);
    }
    if op.object_requirement == Some(Requirement::Required) {
        if bucket {
            path.push_literal("/");
        }
        path.push_variable("ObjectName", ValueKind::String);
    }
    path
}

fn resource_path(op: &Operation) -> Result<PathExpression> {
    let ambiguous = |missing| Error::AmbiguousResourcePath {
        operation: op.name.clone(),
        missing,
    };

    let mut path = PathExpression::default();
    path.push_literal(REST_ROOT);

    let Some(resource) = &op.resource else {
        if op.include_id_in_path {
            return Err(ambiguous("a resource"));
        }
        return Ok(path);
    };
    path.push_literal(&resource.as_str().to_lowercase());

    if op.include_id_in_path {
        match op.resource_type {
            None => return Err(ambiguous("a resource type")),
            Some(ResourceType::Singleton) => {}
            Some(ResourceType::NonSingleton) => {
                let (name, kind) = resource_id(resource.as_str());
                path.push_literal("/");
                path.push_variable(&name, kind);
            }
        }
    }
    Ok(path)
}

/// Name and kind of the id variable for a resource
fn resource_id(resource: &str) -> (String, ValueKind) {
    match resource {
        "BUCKET" => ("BucketName".to_string(), ValueKind::String),
        "OBJECT" => ("ObjectName".to_string(), ValueKind::String),
        r if r.ends_with("NOTIFICATION_REGISTRATION") => {
            ("NotificationId".to_string(), ValueKind::Identifier)
        }
        r => (format!("{}Id", to_upper_camel_case(r)), ValueKind::Identifier),
    }
}
