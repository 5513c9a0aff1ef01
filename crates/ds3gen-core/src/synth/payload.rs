//! Request payloads and the arguments they contribute.

use super::args::{ArgSource, Argument};
use super::value::ValueKind;
use crate::classify::OperationShape;

// External imports (alphabetized)
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    None,
    /// A wrapped list of plain values, e.g. object names
    InlineScalarList,
    /// A wrapped list of structured entries, e.g. objects with sizes
    NestedObjectList,
    /// Caller-supplied bytes sent as-is
    RawStream,
}

/// The request body an operation sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPayload {
    pub kind: PayloadKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosing_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_tag: Option<String>,
}

impl RequestPayload {
    fn none() -> Self {
        Self {
            kind: PayloadKind::None,
            enclosing_tag: None,
            element_tag: None,
        }
    }

    fn list(kind: PayloadKind, enclosing: &str, element: &str) -> Self {
        Self {
            kind,
            enclosing_tag: Some(enclosing.to_string()),
            element_tag: Some(element.to_string()),
        }
    }
}

fn object_list(name: &str, element: &str) -> Argument {
    Argument::new(
        name,
        ValueKind::List(Box::new(ValueKind::Object(element.to_string()))),
        ArgSource::Payload,
    )
}

/// Payload and payload-derived arguments for a shape
pub fn synthesize_payload(shape: OperationShape) -> (RequestPayload, Vec<Argument>) {
    use OperationShape::*;

    match shape {
        AmazonCreateObject => (
            RequestPayload {
                kind: PayloadKind::RawStream,
                enclosing_tag: None,
                element_tag: None,
            },
            vec![
                Argument::new("RequestPayload", ValueKind::Stream, ArgSource::Payload),
                Argument::new("Length", ValueKind::Long, ArgSource::Payload),
            ],
        ),
        AmazonGetObject => (
            RequestPayload::none(),
            vec![Argument::new("Stream", ValueKind::Stream, ArgSource::ResponseSink)],
        ),
        BulkGet => (
            RequestPayload::list(PayloadKind::NestedObjectList, "Objects", "Object"),
            vec![object_list("Objects", "Ds3PartialObject")],
        ),
        BulkPut => (
            RequestPayload::list(PayloadKind::NestedObjectList, "Objects", "Object"),
            vec![object_list("Objects", "Ds3Object")],
        ),
        CompleteMultipartUpload => (
            RequestPayload::list(PayloadKind::NestedObjectList, "CompleteMultipartUpload", "Part"),
            vec![object_list("Parts", "Part")],
        ),
        PhysicalPlacement => (
            RequestPayload::list(PayloadKind::InlineScalarList, "Objects", "Object"),
            vec![Argument::new(
                "ObjectNames",
                ValueKind::List(Box::new(ValueKind::String)),
                ArgSource::Payload,
            )],
        ),
        MultiObjectDelete => (
            RequestPayload::list(PayloadKind::InlineScalarList, "Delete", "Object"),
            vec![Argument::new(
                "ObjectNames",
                ValueKind::List(Box::new(ValueKind::String)),
                ArgSource::Payload,
            )],
        ),
        Head | AllocateJobChunk | GetJobChunksReady | Paginated | Standard => {
            (RequestPayload::none(), vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_object_streams_with_length() {
        let (payload, args) = synthesize_payload(OperationShape::AmazonCreateObject);
        assert_eq!(payload.kind, PayloadKind::RawStream);
        let names: Vec<_> = args.iter().map(|a| (a.name.as_str(), &a.kind)).collect();
        assert_eq!(
            names,
            vec![("RequestPayload", &ValueKind::Stream), ("Length", &ValueKind::Long)]
        );
    }

    #[test]
    fn test_get_object_has_a_response_sink_not_a_body() {
        let (payload, args) = synthesize_payload(OperationShape::AmazonGetObject);
        assert_eq!(payload.kind, PayloadKind::None);
        assert_eq!(args[0].source, ArgSource::ResponseSink);
    }

    #[test]
    fn test_list_payload_tags() {
        let (delete, args) = synthesize_payload(OperationShape::MultiObjectDelete);
        assert_eq!(delete.kind, PayloadKind::InlineScalarList);
        assert_eq!(delete.enclosing_tag.as_deref(), Some("Delete"));
        assert_eq!(args[0].ident, "object_names");

        let (bulk, args) = synthesize_payload(OperationShape::BulkGet);
        assert_eq!(bulk.kind, PayloadKind::NestedObjectList);
        assert_eq!(args[0].kind.type_ref(), Some("Ds3PartialObject"));

        let (parts, _) = synthesize_payload(OperationShape::CompleteMultipartUpload);
        assert_eq!(parts.element_tag.as_deref(), Some("Part"));
    }

    #[test]
    fn test_plain_shapes_send_nothing() {
        for shape in [OperationShape::Standard, OperationShape::Head, OperationShape::Paginated] {
            let (payload, args) = synthesize_payload(shape);
            assert_eq!(payload.kind, PayloadKind::None);
            assert!(args.is_empty());
        }
    }
}
