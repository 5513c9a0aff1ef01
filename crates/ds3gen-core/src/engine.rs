//! The generation engine.
//!
//! An [`Engine`] ties one contract to one target language. A run classifies
//! and synthesizes every operation and then every type, in declaration
//! order, and collects every configuration error it meets instead of
//! stopping at the first one.
//!
//! # Examples
//!
//! ```
//! use ds3gen_core::contract::Contract;
//! use ds3gen_core::engine::Engine;
//! use ds3gen_core::target::TargetLanguage;
//!
//! let contract = Contract::parse(r#"
//! operations:
//!   - name: com.spectralogic.s3.server.handler.reqhandler.amazons3.GetServiceRequestHandler
//!     http_verb: GET
//!     classification: amazons3
//!   - name: com.spectralogic.s3.server.handler.reqhandler.spectrainternal.ForceFullCacheReclaimRequestHandler
//!     classification: spectrainternal
//! "#).unwrap();
//!
//! let engine = Engine::new(&contract, TargetLanguage::Python).unwrap();
//! let report = engine.run();
//! assert_eq!(report.units.len(), 1);
//! assert_eq!(report.excluded.len(), 1);
//! assert!(report.errors.is_empty());
//! ```

// Internal imports (std, crate)
use crate::classify::{Classifier, OperationShape};
use crate::contract::{Classification, Contract, ContractIndex, Operation, TypeDef};
use crate::error::{ContractErrors, Error, Result, UnitError, UnitId};
use crate::synth::{
    synthesize_args, synthesize_path, synthesize_payload, synthesize_response, synthesize_type,
    TypeUnit,
};
use crate::target::{TargetLanguage, TargetProfile};
use crate::unit::{GenerationUnit, OperationUnit};
use crate::utils::{request_name, response_name};

// External imports (alphabetized)
use log::{debug, info};

/// Include/exclude lists over handler simple names.
///
/// An empty include list admits everything; exclusion always wins.
#[derive(Debug, Clone, Default)]
pub struct OperationFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl OperationFilter {
    pub fn allows(&self, op: &Operation) -> bool {
        let name = op.simple_name();
        let included = self.include.is_empty() || self.include.iter().any(|n| n == name);
        included && !self.exclude.iter().any(|n| n == name)
    }
}

/// Everything one run produced
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Units in contract order: operations first, then types
    pub units: Vec<GenerationUnit>,
    /// Internal operations that were never synthesized
    pub excluded: Vec<UnitId>,
    /// Operations left out by the include/exclude filter
    pub filtered: Vec<UnitId>,
    pub errors: ContractErrors,
}

impl GenerationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The units, or every collected configuration error
    pub fn into_result(self) -> Result<Vec<GenerationUnit>> {
        if self.errors.is_empty() {
            Ok(self.units)
        } else {
            Err(Error::Contract(self.errors))
        }
    }
}

#[derive(Debug)]
pub struct Engine<'a> {
    contract: &'a Contract,
    index: ContractIndex<'a>,
    classifier: Classifier,
    target: TargetLanguage,
    filter: OperationFilter,
}

impl<'a> Engine<'a> {
    /// Index the contract and build the validated rule tables
    pub fn new(contract: &'a Contract, target: TargetLanguage) -> Result<Self> {
        Self::with_classifier(contract, target, Classifier::new()?)
    }

    pub fn with_classifier(
        contract: &'a Contract,
        target: TargetLanguage,
        classifier: Classifier,
    ) -> Result<Self> {
        Ok(Self {
            contract,
            index: ContractIndex::new(contract),
            classifier,
            target,
            filter: OperationFilter::default(),
        })
    }

    pub fn with_filter(mut self, filter: OperationFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn target(&self) -> TargetLanguage {
        self.target
    }

    pub fn profile(&self) -> &'static TargetProfile {
        self.target.profile()
    }

    pub fn index(&self) -> &ContractIndex<'a> {
        &self.index
    }

    /// Synthesize one operation; `None` when it belongs to the internal API
    pub fn synthesize_operation(&self, op: &Operation) -> Result<Option<OperationUnit>> {
        let Some(shape) = self.classifier.classify_operation(op, &self.index)? else {
            return Ok(None);
        };
        self.build_operation(op, shape).map(Some)
    }

    fn build_operation(&self, op: &Operation, shape: OperationShape) -> Result<OperationUnit> {
        let path = synthesize_path(op)?;
        let (payload, payload_args) = synthesize_payload(shape);
        let excluded = self.profile().excluded_params(shape);
        let args = synthesize_args(op, &path, payload_args, &excluded, &self.index)?;
        let response = synthesize_response(op, shape, &self.index);

        let spectra = op.classification == Classification::SpectraS3;
        let name = request_name(&op.name, spectra);
        debug!("Synthesized {} ({}) at {}", name, shape, path);

        Ok(OperationUnit {
            response_name: response_name(&name),
            name,
            source: op.name.clone(),
            classification: op.classification.clone(),
            spectra,
            shape,
            http_verb: op.http_verb,
            path,
            required: args.required,
            optional: args.optional,
            effects: args.effects,
            payload,
            response,
        })
    }

    pub fn synthesize_type(&self, t: &TypeDef) -> Result<TypeUnit> {
        let shape = self.classifier.classify_type(t, &self.index)?;
        Ok(synthesize_type(t, shape, &self.index))
    }

    /// Synthesize the whole contract
    pub fn run(&self) -> GenerationReport {
        let mut report = GenerationReport::default();

        for op in &self.contract.operations {
            let id = UnitId::Operation(op.name.clone());
            if !self.filter.allows(op) {
                report.filtered.push(id);
                continue;
            }
            match self.synthesize_operation(op) {
                Ok(Some(unit)) => report.units.push(GenerationUnit::Operation(unit)),
                Ok(None) => report.excluded.push(id),
                Err(error) => report.errors.0.push(UnitError { unit: id, error }),
            }
        }

        for t in &self.contract.types {
            match self.synthesize_type(t) {
                Ok(unit) => report.units.push(GenerationUnit::Type(unit)),
                Err(error) => report.errors.0.push(UnitError {
                    unit: UnitId::Type(t.name.clone()),
                    error,
                }),
            }
        }

        info!(
            "Synthesized {} unit(s) for {} ({} excluded, {} filtered, {} error(s))",
            report.units.len(),
            self.target,
            report.excluded.len(),
            report.filtered.len(),
            report.errors.len()
        );
        report
    }
}
