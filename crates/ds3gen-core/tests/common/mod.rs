//! Shared contract fixtures for the integration tests
#![allow(dead_code)]

use std::path::PathBuf;

use ds3gen_core::contract::Contract;
use ds3gen_core::synth::TypeUnit;
use ds3gen_core::unit::{GenerationUnit, OperationUnit};
use ds3gen_core::{Engine, TargetLanguage};

pub const CONTRACT_YAML: &str = include_str!("../fixtures/contract.yaml");

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("contract.yaml")
}

/// The built-in template sets at the workspace root
pub fn workspace_templates() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("templates")
}

pub fn contract() -> Contract {
    Contract::parse(CONTRACT_YAML).expect("fixture contract parses")
}

/// Generate every unit of `contract` for `target`, failing on any error
pub fn units(contract: &Contract, target: TargetLanguage) -> Vec<GenerationUnit> {
    Engine::new(contract, target)
        .expect("rule tables are valid")
        .run()
        .into_result()
        .expect("fixture contract has no configuration errors")
}

/// Find the operation unit generated from the handler `simple_name`
pub fn operation<'a>(units: &'a [GenerationUnit], simple_name: &str) -> &'a OperationUnit {
    units
        .iter()
        .filter_map(GenerationUnit::as_operation)
        .find(|op| op.source.rsplit('.').next() == Some(simple_name))
        .unwrap_or_else(|| panic!("no unit for {}", simple_name))
}

pub fn type_unit<'a>(units: &'a [GenerationUnit], name: &str) -> &'a TypeUnit {
    units
        .iter()
        .filter_map(GenerationUnit::as_type)
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("no unit for type {}", name))
}

/// A one-operation SpectraS3 contract built from YAML fragments
pub fn spectra_operation(name: &str, body: &str) -> Contract {
    let yaml = format!(
        "operations:\n  - name: com.spectralogic.s3.server.handler.reqhandler.spectrads3.{}\n    classification: spectrads3\n{}",
        name, body
    );
    Contract::parse(&yaml).expect("operation fragment parses")
}
