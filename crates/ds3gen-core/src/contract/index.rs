//! Read-only lookups over a [`Contract`], built once per generation run.

// Internal imports (std, crate)
use std::collections::{HashMap, HashSet};

use super::{Classification, Contract, Operation, TypeDef};

/// Name-keyed views over one contract.
///
/// Every classifier and synthesizer receives the index explicitly; nothing in
/// the engine keeps a global type table. The index only borrows the contract,
/// so it is `Send + Sync` whenever the contract is.
#[derive(Debug)]
pub struct ContractIndex<'a> {
    types: HashMap<&'a str, &'a TypeDef>,
    operations: HashMap<&'a str, &'a Operation>,
    top_level: HashSet<&'a str>,
}

impl<'a> ContractIndex<'a> {
    pub fn new(contract: &'a Contract) -> Self {
        let types = contract
            .types
            .iter()
            .map(|t| (t.name.as_str(), t))
            .collect();
        let operations = contract
            .operations
            .iter()
            .map(|op| (op.name.as_str(), op))
            .collect();
        let top_level = contract
            .operations
            .iter()
            .filter(|op| op.classification != Classification::SpectraInternal)
            .filter_map(|op| op.success_code()?.payload())
            .map(|payload| payload.element_type())
            .collect();

        Self {
            types,
            operations,
            top_level,
        }
    }

    /// Look a type up by its fully qualified name
    pub fn type_def(&self, name: &str) -> Option<&'a TypeDef> {
        self.types.get(name).copied()
    }

    pub fn operation(&self, name: &str) -> Option<&'a Operation> {
        self.operations.get(name).copied()
    }

    /// Whether `name` is a known enum-shaped type
    pub fn is_enum(&self, name: &str) -> bool {
        self.type_def(name).is_some_and(TypeDef::is_enum)
    }

    /// Whether some public operation returns `name` as its success payload
    pub fn is_top_level(&self, name: &str) -> bool {
        self.top_level.contains(name)
    }
}
