//! Request argument synthesis.
//!
//! Required arguments come out in a fixed order: path variables, then
//! required query parameters in contract order, then payload arguments.
//! Required void parameters carry nothing a caller could supply, so they
//! become unconditional query effects instead of arguments.

// Internal imports (std, crate)
use std::collections::HashSet;

use super::path::PathExpression;
use super::value::ValueKind;
use crate::contract::{ContractIndex, Operation, Param};
use crate::error::{Error, Result};
use crate::utils::to_snake_case;

// External imports (alphabetized)
use serde::Serialize;

/// Contract parameter that carries the operation qualifier
const OPERATION_PARAM: &str = "Operation";
const REST_OPERATION_TYPE: &str = "RestOperationType";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgSource {
    PathVariable,
    Query,
    Payload,
    /// Where the response body is written rather than something sent
    ResponseSink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    /// Contract name, UpperCamel
    pub name: String,
    /// Canonical snake_case identifier
    pub ident: String,
    pub kind: ValueKind,
    pub source: ArgSource,
}

impl Argument {
    pub fn new(name: &str, kind: ValueKind, source: ArgSource) -> Self {
        Self {
            name: name.to_string(),
            ident: to_snake_case(name),
            kind,
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    Absent,
}

/// What makes an optional argument take effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Applied with the supplied value
    Value,
    /// Applied when set at all; the value is irrelevant
    Presence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionalArgument {
    #[serde(flatten)]
    pub argument: Argument,
    pub default: DefaultValue,
    pub trigger: Trigger,
    pub nullable: bool,
}

/// A query parameter every request of the operation sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryEffect {
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArgumentSet {
    pub required: Vec<Argument>,
    pub optional: Vec<OptionalArgument>,
    pub effects: Vec<QueryEffect>,
}

fn is_qualifier_param(param: &Param) -> bool {
    param.name == OPERATION_PARAM && param.type_name.ends_with(REST_OPERATION_TYPE)
}

/// Build the argument lists of one operation.
///
/// `excluded` names optional parameters the target handles itself and never
/// exposes to callers.
pub fn synthesize_args(
    op: &Operation,
    path: &PathExpression,
    payload_args: Vec<Argument>,
    excluded: &[&str],
    index: &ContractIndex<'_>,
) -> Result<ArgumentSet> {
    let mut set = ArgumentSet::default();

    match &op.operation {
        Some(qualifier) => set.effects.push(QueryEffect {
            key: "operation".to_string(),
            value: Some(qualifier.as_str().to_lowercase()),
        }),
        None if op.required_params.iter().any(is_qualifier_param) => {
            return Err(Error::MissingOperationQualifier {
                operation: op.name.clone(),
            });
        }
        None => {}
    }

    for (name, kind) in path.variables() {
        set.required
            .push(Argument::new(name, kind.clone(), ArgSource::PathVariable));
    }

    for param in op.required_params.iter().filter(|p| !is_qualifier_param(p)) {
        if param.is_void() {
            set.effects.push(QueryEffect {
                key: to_snake_case(&param.name),
                value: None,
            });
        } else {
            let kind = ValueKind::resolve(&param.type_name, param.component_type.as_deref(), index);
            set.required
                .push(Argument::new(&param.name, kind, ArgSource::Query));
        }
    }

    set.required.extend(payload_args);

    for param in op
        .optional_params
        .iter()
        .filter(|p| !is_qualifier_param(p) && !excluded.contains(&p.name.as_str()))
    {
        let optional = if param.is_void() {
            OptionalArgument {
                argument: Argument::new(&param.name, ValueKind::Flag, ArgSource::Query),
                default: DefaultValue::Absent,
                trigger: Trigger::Presence,
                nullable: false,
            }
        } else {
            let kind = ValueKind::resolve(&param.type_name, param.component_type.as_deref(), index);
            OptionalArgument {
                argument: Argument::new(&param.name, kind, ArgSource::Query),
                default: DefaultValue::Absent,
                trigger: Trigger::Value,
                nullable: true,
            }
        };
        set.optional.push(optional);
    }

    let mut seen = HashSet::new();
    let idents = set
        .required
        .iter()
        .chain(set.optional.iter().map(|o| &o.argument))
        .map(|a| a.ident.as_str());
    for ident in idents {
        if !seen.insert(ident) {
            return Err(Error::DuplicateArgument {
                operation: op.name.clone(),
                ident: ident.to_string(),
            });
        }
    }

    Ok(set)
}
