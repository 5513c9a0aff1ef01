//! Response handling synthesis.
//!
//! Every operation collapses to one [`ResponseStrategy`], picked from its
//! shape. The success code and its payload come from the first 2xx response
//! code; other codes are left to the runtime's error mapping.

use super::value::ValueKind;
use crate::classify::OperationShape;
use crate::contract::{ContractIndex, Operation};
use crate::utils::to_snake_case;

// External imports (alphabetized)
use serde::Serialize;

pub const METADATA_PREFIX: &str = "x-amz-meta-";
pub const RETRY_AFTER_HEADER: &str = "Retry-After";
pub const PAGE_TRUNCATED_HEADER: &str = "Page-Truncated";
pub const TOTAL_RESULT_COUNT_HEADER: &str = "Total-Result-Count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStrategy {
    /// Status and headers only; any body is ignored
    HeaderMetadataOnly,
    /// Body may be absent while the server asks the caller to wait
    DeferredWithRetry,
    /// Body goes to a caller-supplied sink
    RawStream,
    /// Typed body plus paging headers
    PaginatedList,
    /// Job body whose nested lists are surfaced individually
    BulkJobResult,
    /// Typed body, or no payload when the success code declares none
    DefaultStructured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum FieldSource {
    Body,
    Header { name: String },
    HeaderPrefix { prefix: String },
    StatusCode,
    /// A list nested in the body under the given tag
    NestedList { tag: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultField {
    pub name: String,
    pub ident: String,
    pub kind: ValueKind,
    pub source: FieldSource,
}

impl ResultField {
    fn new(name: &str, kind: ValueKind, source: FieldSource) -> Self {
        Self {
            name: name.to_string(),
            ident: to_snake_case(name),
            kind,
            source,
        }
    }

    fn header(name: &str, header: &str, kind: ValueKind) -> Self {
        Self::new(
            name,
            kind,
            FieldSource::Header {
                name: header.to_string(),
            },
        )
    }

    fn metadata() -> Self {
        Self::new(
            "Metadata",
            ValueKind::HeaderMap,
            FieldSource::HeaderPrefix {
                prefix: METADATA_PREFIX.to_string(),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseModel {
    pub strategy: ResponseStrategy,
    pub success_code: Option<u16>,
    /// `None` means success is signalled by the status code alone
    pub payload: Option<ValueKind>,
    pub fields: Vec<ResultField>,
}

impl ResponseModel {
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }
}

pub fn synthesize_response(
    op: &Operation,
    shape: OperationShape,
    index: &ContractIndex<'_>,
) -> ResponseModel {
    use OperationShape::*;

    let success = op.success_code();
    let declared = success.and_then(|rc| rc.payload());
    let payload = declared
        .map(|rt| ValueKind::resolve(&rt.type_name, rt.component_type.as_deref(), index));
    let body = || {
        payload
            .clone()
            .map(|kind| ResultField::new("Result", kind, FieldSource::Body))
    };

    let (strategy, fields) = match shape {
        Head => (
            ResponseStrategy::HeaderMetadataOnly,
            vec![
                ResultField::new("Status", ValueKind::Integer, FieldSource::StatusCode),
                ResultField::metadata(),
            ],
        ),
        AllocateJobChunk | GetJobChunksReady => {
            let mut fields: Vec<_> = body().into_iter().collect();
            fields.push(ResultField::header(
                "RetryAfterSeconds",
                RETRY_AFTER_HEADER,
                ValueKind::Integer,
            ));
            (ResponseStrategy::DeferredWithRetry, fields)
        }
        AmazonGetObject => (ResponseStrategy::RawStream, vec![ResultField::metadata()]),
        Paginated => {
            let mut fields: Vec<_> = body().into_iter().collect();
            fields.push(ResultField::header(
                "PagingTruncated",
                PAGE_TRUNCATED_HEADER,
                ValueKind::Integer,
            ));
            fields.push(ResultField::header(
                "PagingTotalResultCount",
                TOTAL_RESULT_COUNT_HEADER,
                ValueKind::Integer,
            ));
            (ResponseStrategy::PaginatedList, fields)
        }
        BulkGet | BulkPut => {
            let mut fields: Vec<_> = body().into_iter().collect();
            if let Some(job) = declared.and_then(|rt| index.type_def(rt.element_type())) {
                for element in job.elements.iter().filter(|e| e.component_type.is_some()) {
                    let kind = ValueKind::resolve(
                        &element.type_name,
                        element.component_type.as_deref(),
                        index,
                    );
                    let tag = element
                        .enclosing_tag
                        .clone()
                        .unwrap_or_else(|| element.name.clone());
                    fields.push(ResultField::new(
                        &element.name,
                        kind,
                        FieldSource::NestedList { tag },
                    ));
                }
            }
            (ResponseStrategy::BulkJobResult, fields)
        }
        AmazonCreateObject | PhysicalPlacement | MultiObjectDelete | CompleteMultipartUpload
        | Standard => (
            ResponseStrategy::DefaultStructured,
            body().into_iter().collect(),
        ),
    };

    let payload = match strategy {
        ResponseStrategy::HeaderMetadataOnly | ResponseStrategy::RawStream => None,
        _ => payload,
    };

    ResponseModel {
        strategy,
        success_code: success.map(|rc| rc.code),
        payload,
        fields,
    }
}
