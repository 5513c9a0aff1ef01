//! ds3gen Core Library
//!
//! This library turns a DS3 API contract into language-neutral generation
//! units (one per public request and per model type) and renders them into
//! SDK source files for a target language.

pub mod classify;
pub mod config;
pub mod contract;
pub mod engine;
pub mod error;
pub mod generate;
pub mod render;
pub mod synth;
pub mod target;
pub mod unit;
pub mod utils;

pub use crate::{
    classify::{Classifier, OperationShape, Shape, TypeShape},
    config::Config,
    contract::{Contract, ContractIndex},
    engine::{Engine, GenerationReport, OperationFilter},
    error::{Error, Result},
    generate::generate,
    render::{RenderedFile, TemplateRenderer, UnitRenderer},
    target::{TargetLanguage, TargetProfile},
    unit::{GenerationUnit, OperationUnit},
};
