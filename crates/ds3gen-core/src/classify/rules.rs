//! Ordered, first-match-wins rule tables.
//!
//! Each rule pairs a predicate with the shape it assigns. Rules carry an
//! explicit `rank` and `tier` rather than relying on their position in a
//! list: a [`RuleTable`] sorts by rank and refuses to build unless the tiers
//! never decrease and exactly one unconditional fallback closes the table.
//! This keeps narrow rules (a HEAD request, a job chunk allocation) ahead of
//! broad ones (anything with paging parameters).

// Internal imports (std, crate)
use std::fmt;

use super::{OperationShape, TypeShape};
use crate::contract::{Classification, ContractIndex, HttpVerb, Operation, TypeDef};
use crate::error::{Error, Result};

/// How broad a rule is. Tiers must not decrease along the rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Matches one family of handlers
    Specific,
    /// Matches any handler with a common trait, e.g. paging parameters
    Generic,
    /// Matches everything; there is exactly one and it ranks last
    Fallback,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Specific => "specific",
            Self::Generic => "generic",
            Self::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

/// Predicate over one contract entity with the whole contract in view
pub type Predicate<E> = fn(&E, &ContractIndex<'_>) -> bool;

pub struct Rule<E, S> {
    pub name: &'static str,
    pub rank: u16,
    pub tier: Tier,
    pub shape: S,
    pub matches: Predicate<E>,
}

impl<E, S: fmt::Debug> fmt::Debug for Rule<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("rank", &self.rank)
            .field("tier", &self.tier)
            .field("shape", &self.shape)
            .finish()
    }
}

/// A validated rule list. Construction is the only place ordering is checked.
#[derive(Debug)]
pub struct RuleTable<E, S> {
    name: &'static str,
    rules: Vec<Rule<E, S>>,
    fallback: Rule<E, S>,
}

impl<E, S: Copy> RuleTable<E, S> {
    pub fn new(name: &'static str, mut rules: Vec<Rule<E, S>>) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidRuleTable {
            table: name,
            reason,
        };

        rules.sort_by_key(|rule| rule.rank);

        for pair in rules.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.rank == next.rank {
                return Err(invalid(format!(
                    "rules '{}' and '{}' share rank {}",
                    prev.name, next.name, prev.rank
                )));
            }
            if prev.tier > next.tier {
                return Err(invalid(format!(
                    "{} rule '{}' (rank {}) is ordered after {} rule '{}' (rank {})",
                    next.tier, next.name, next.rank, prev.tier, prev.name, prev.rank
                )));
            }
        }

        let fallbacks = rules
            .iter()
            .filter(|rule| rule.tier == Tier::Fallback)
            .count();
        if fallbacks != 1 {
            return Err(invalid(format!(
                "expected exactly one fallback rule, found {}",
                fallbacks
            )));
        }

        // Tiers are non-decreasing, so the single fallback is last.
        let fallback = rules
            .pop()
            .ok_or_else(|| invalid("table is empty".to_string()))?;

        Ok(Self {
            name,
            rules,
            fallback,
        })
    }

    /// The first rule whose predicate holds, or the fallback
    pub fn first_match(&self, entity: &E, index: &ContractIndex<'_>) -> &Rule<E, S> {
        self.rules
            .iter()
            .find(|rule| (rule.matches)(entity, index))
            .unwrap_or(&self.fallback)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All rules in evaluation order, fallback included
    pub fn rules(&self) -> impl Iterator<Item = &Rule<E, S>> {
        self.rules.iter().chain(std::iter::once(&self.fallback))
    }
}

const BULK_GET: &[&str] = &["START_BULK_GET"];
const BULK_PUT: &[&str] = &["START_BULK_PUT"];
const PHYSICAL_PLACEMENT: &[&str] = &[
    "GET_PHYSICAL_PLACEMENT",
    "VERIFY_PHYSICAL_PLACEMENT",
    "START_BULK_VERIFY",
];

fn is_amazon(op: &Operation) -> bool {
    op.classification == Classification::AmazonS3
}

fn has_qualifier(op: &Operation, candidates: &[&str]) -> bool {
    op.operation.as_ref().is_some_and(|q| q.is_any(candidates))
}

/// The default operation rules shared by every target language
pub fn operation_rules() -> Vec<Rule<Operation, OperationShape>> {
    vec![
        Rule {
            name: "amazon-get-object",
            rank: 10,
            tier: Tier::Specific,
            shape: OperationShape::AmazonGetObject,
            matches: |op, _| is_amazon(op) && op.is_handler("GetObjectRequestHandler"),
        },
        Rule {
            name: "amazon-create-object",
            rank: 20,
            tier: Tier::Specific,
            shape: OperationShape::AmazonCreateObject,
            matches: |op, _| is_amazon(op) && op.is_handler("CreateObjectRequestHandler"),
        },
        Rule {
            name: "head",
            rank: 30,
            tier: Tier::Specific,
            shape: OperationShape::Head,
            matches: |op, _| op.http_verb == Some(HttpVerb::Head),
        },
        Rule {
            name: "allocate-job-chunk",
            rank: 40,
            tier: Tier::Specific,
            shape: OperationShape::AllocateJobChunk,
            matches: |op, _| {
                op.resource.as_ref().is_some_and(|r| r.as_str() == "JOB_CHUNK")
                    && has_qualifier(op, &["ALLOCATE"])
            },
        },
        Rule {
            name: "get-job-chunks-ready",
            rank: 50,
            tier: Tier::Specific,
            shape: OperationShape::GetJobChunksReady,
            matches: |op, _| op.is_handler("GetJobChunksReadyForClientProcessingRequestHandler"),
        },
        Rule {
            name: "bulk-get",
            rank: 60,
            tier: Tier::Specific,
            shape: OperationShape::BulkGet,
            matches: |op, _| has_qualifier(op, BULK_GET),
        },
        Rule {
            name: "bulk-put",
            rank: 70,
            tier: Tier::Specific,
            shape: OperationShape::BulkPut,
            matches: |op, _| has_qualifier(op, BULK_PUT),
        },
        Rule {
            name: "physical-placement",
            rank: 80,
            tier: Tier::Specific,
            shape: OperationShape::PhysicalPlacement,
            matches: |op, _| has_qualifier(op, PHYSICAL_PLACEMENT),
        },
        Rule {
            name: "multi-object-delete",
            rank: 90,
            tier: Tier::Specific,
            shape: OperationShape::MultiObjectDelete,
            matches: |op, _| op.is_handler("DeleteObjectsRequestHandler"),
        },
        Rule {
            name: "complete-multipart-upload",
            rank: 100,
            tier: Tier::Specific,
            shape: OperationShape::CompleteMultipartUpload,
            matches: |op, _| op.is_handler("CompleteMultiPartUploadRequestHandler"),
        },
        Rule {
            name: "paginated",
            rank: 200,
            tier: Tier::Generic,
            shape: OperationShape::Paginated,
            matches: |op, _| op.has_optional_param("PageLength") && op.has_optional_param("PageOffset"),
        },
        Rule {
            name: "standard",
            rank: u16::MAX,
            tier: Tier::Fallback,
            shape: OperationShape::Standard,
            matches: |_, _| true,
        },
    ]
}

/// The default type rules shared by every target language
pub fn type_rules() -> Vec<Rule<TypeDef, TypeShape>> {
    vec![
        Rule {
            name: "enum",
            rank: 10,
            tier: Tier::Specific,
            shape: TypeShape::Enum,
            matches: |t, _| t.is_enum(),
        },
        Rule {
            name: "top-level",
            rank: 20,
            tier: Tier::Generic,
            shape: TypeShape::TopLevel,
            matches: |t, index| index.is_top_level(&t.name),
        },
        Rule {
            name: "nested",
            rank: u16::MAX,
            tier: Tier::Fallback,
            shape: TypeShape::Nested,
            matches: |_, _| true,
        },
    ]
}
