//! Target-neutral value kinds and raw contract type resolution.

// Internal imports (std, crate)
use std::fmt;

use crate::contract::{ContractIndex, VOID_TYPE};
use crate::utils::remove_path;

// External imports (alphabetized)
use log::warn;
use serde::Serialize;

/// What a renderer needs to know about a value's type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum ValueKind {
    /// Presence-only toggle; carries no value
    Flag,
    String,
    Boolean,
    Integer,
    Long,
    Double,
    Identifier,
    DateTime,
    Stream,
    HeaderMap,
    /// A contract enum, by simple name
    Enum(String),
    /// A contract (or SDK helper) object type, by simple name
    Object(String),
    /// A raw type the contract index does not know
    Opaque(String),
    List(Box<ValueKind>),
}

impl ValueKind {
    /// Map a primitive contract type name
    pub fn primitive(raw: &str) -> Option<Self> {
        let kind = match raw {
            VOID_TYPE => Self::Flag,
            "java.lang.String" | "String" => Self::String,
            "boolean" | "java.lang.Boolean" => Self::Boolean,
            "int" | "java.lang.Integer" => Self::Integer,
            "long" | "java.lang.Long" => Self::Long,
            "double" | "java.lang.Double" => Self::Double,
            "java.util.UUID" => Self::Identifier,
            "java.util.Date" => Self::DateTime,
            _ => return None,
        };
        Some(kind)
    }

    /// Resolve a raw type and optional component type against the index.
    ///
    /// A component type makes the value a list of the resolved component.
    /// Names neither primitive nor indexed become `Opaque` rather than
    /// failing, since contracts are sometimes looser than their type list.
    pub fn resolve(raw: &str, component: Option<&str>, index: &ContractIndex<'_>) -> Self {
        match component {
            Some(component) => Self::List(Box::new(Self::resolve_scalar(component, index))),
            None => Self::resolve_scalar(raw, index),
        }
    }

    fn resolve_scalar(raw: &str, index: &ContractIndex<'_>) -> Self {
        if let Some(kind) = Self::primitive(raw) {
            return kind;
        }
        match index.type_def(raw) {
            Some(t) if t.is_enum() => Self::Enum(t.simple_name().to_string()),
            Some(t) => Self::Object(t.simple_name().to_string()),
            None => {
                warn!("Type {} is not in the contract; treating it as opaque", raw);
                Self::Opaque(remove_path(raw).to_string())
            }
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }

    /// The referenced object type, if any. Enums are scalar and never referenced.
    pub fn type_ref(&self) -> Option<&str> {
        match self {
            Self::Object(name) => Some(name),
            Self::List(inner) => inner.type_ref(),
            _ => None,
        }
    }

    /// The element kind of a list, or the kind itself
    pub fn element(&self) -> &ValueKind {
        match self {
            Self::List(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "flag"),
            Self::String => write!(f, "string"),
            Self::Boolean => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Long => write!(f, "long"),
            Self::Double => write!(f, "double"),
            Self::Identifier => write!(f, "identifier"),
            Self::DateTime => write!(f, "date_time"),
            Self::Stream => write!(f, "stream"),
            Self::HeaderMap => write!(f, "header_map"),
            Self::Enum(name) | Self::Object(name) | Self::Opaque(name) => write!(f, "{}", name),
            Self::List(inner) => write!(f, "list<{}>", inner),
        }
    }
}
