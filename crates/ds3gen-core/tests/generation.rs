//! Contract-level behavior of the generation engine

mod common;

use common::{contract, operation, spectra_operation, type_unit, units};
use ds3gen_core::classify::TypeShape;
use ds3gen_core::contract::Contract;
use ds3gen_core::error::{Error, UnitId};
use ds3gen_core::synth::{
    ArgSource, Argument, FieldSource, QueryEffect, ResponseStrategy, Trigger, TypeBody, ValueKind,
};
use ds3gen_core::{Engine, OperationShape, TargetLanguage};

#[test]
fn test_internal_operations_never_produce_units() {
    let contract = contract();
    let report = Engine::new(&contract, TargetLanguage::Java).unwrap().run();

    assert!(report.is_ok());
    assert_eq!(report.excluded.len(), 1);
    assert!(report
        .units
        .iter()
        .filter_map(|u| u.as_operation())
        .all(|op| !op.source.contains(".spectrainternal.")));
}

#[test]
fn test_repeated_runs_are_identical() {
    let contract = contract();
    for target in TargetLanguage::all() {
        let first = units(&contract, target);
        let second = units(&contract, target);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_units_follow_declaration_order() {
    let contract = contract();
    let units = units(&contract, TargetLanguage::Java);
    let names: Vec<_> = units.iter().map(|u| u.name()).take(3).collect();
    assert_eq!(
        names,
        vec!["GetServiceRequest", "DeleteBucketRequest", "HeadObjectRequest"]
    );
    assert_eq!(units.last().unwrap().name(), "JobChunkClientProcessingOrderGuarantee");
    assert_eq!(units.len(), 11 + contract.types.len());
}

#[test]
fn test_placement_path_with_optional_flag() {
    let units = units(&contract(), TargetLanguage::Java);
    let op = operation(&units, "DeleteBucketRequestHandler");

    assert_eq!(op.path.to_string(), "/{bucket_name}");
    assert_eq!(
        op.required,
        vec![Argument::new("BucketName", ValueKind::String, ArgSource::PathVariable)]
    );
    assert_eq!(op.optional.len(), 1);
    assert_eq!(op.optional[0].argument.name, "Force");
    assert_eq!(op.optional[0].argument.kind, ValueKind::Flag);
    assert_eq!(op.optional[0].trigger, Trigger::Presence);
    assert!(op.effects.is_empty());
}

#[test]
fn test_resource_path_with_required_and_optional_flags() {
    let contract = spectra_operation(
        "bucket.ModifyBucketRequestHandler",
        r#"    http_verb: PUT
    resource: BUCKET
    resource_type: NON_SINGLETON
    include_id_in_path: true
    required_params:
      - name: RequiredBool
        type: void
    optional_params:
      - name: OptionalBool
        type: void
"#,
    );
    let units = units(&contract, TargetLanguage::Java);
    let op = operation(&units, "ModifyBucketRequestHandler");

    assert_eq!(op.name, "ModifyBucketSpectraS3Request");
    assert_eq!(op.path.to_string(), "/_rest_/bucket/{bucket_name}");
    assert_eq!(
        op.required,
        vec![Argument::new("BucketName", ValueKind::String, ArgSource::PathVariable)]
    );
    assert_eq!(
        op.effects,
        vec![QueryEffect {
            key: "required_bool".into(),
            value: None,
        }]
    );
    assert_eq!(op.optional.len(), 1);
    assert_eq!(op.optional[0].argument.name, "OptionalBool");
    assert_eq!(op.optional[0].trigger, Trigger::Presence);
}

#[test]
fn test_required_void_params_are_only_effects() {
    let units = units(&contract(), TargetLanguage::Go);
    let op = operation(&units, "DeleteObjectsRequestHandler");

    assert_eq!(op.shape, OperationShape::MultiObjectDelete);
    assert!(op.required.iter().all(|a| a.name != "Delete"));
    assert!(op.effects.contains(&QueryEffect {
        key: "delete".into(),
        value: None,
    }));
}

#[test]
fn test_singleton_paths_never_carry_an_id() {
    let units = units(&contract(), TargetLanguage::C);
    let op = operation(&units, "GetSystemInformationRequestHandler");

    assert_eq!(op.path.to_string(), "/_rest_/system_information");
    assert_eq!(op.path.variables().count(), 0);
    assert!(op.required.is_empty());
}

#[test]
fn test_specific_shape_wins_over_pagination() {
    let contract = spectra_operation(
        "job.CreateGetJobRequestHandler",
        r#"    http_verb: PUT
    resource: BUCKET
    resource_type: NON_SINGLETON
    operation: START_BULK_GET
    include_id_in_path: true
    optional_params:
      - name: PageLength
        type: int
      - name: PageOffset
        type: int
"#,
    );
    let units = units(&contract, TargetLanguage::Java);
    assert_eq!(
        operation(&units, "CreateGetJobRequestHandler").shape,
        OperationShape::BulkGet
    );

    let units = units_of_fixture(TargetLanguage::Java);
    let paged = operation(&units, "GetBucketsRequestHandler");
    assert_eq!(paged.shape, OperationShape::Paginated);
    assert_eq!(paged.response.strategy, ResponseStrategy::PaginatedList);
    assert_eq!(paged.response.fields.len(), 3);
}

fn units_of_fixture(target: TargetLanguage) -> Vec<ds3gen_core::GenerationUnit> {
    units(&contract(), target)
}

#[test]
fn test_absent_payload_is_not_header_metadata() {
    let units = units_of_fixture(TargetLanguage::Java);

    let delete = operation(&units, "DeleteBucketRequestHandler");
    assert_eq!(delete.shape, OperationShape::Standard);
    assert_eq!(delete.response.strategy, ResponseStrategy::DefaultStructured);
    assert_eq!(delete.response.success_code, Some(204));
    assert!(!delete.response.has_payload());
    assert!(delete.response.fields.is_empty());

    let head = operation(&units, "HeadObjectRequestHandler");
    assert_eq!(head.shape, OperationShape::Head);
    assert_eq!(head.response.strategy, ResponseStrategy::HeaderMetadataOnly);
    assert!(!head.response.has_payload());
}

#[test]
fn test_list_fields_keep_enclosing_tag_and_type_ref() {
    let units = units_of_fixture(TargetLanguage::Python);
    let result = type_unit(&units, "DeleteResult");

    assert_eq!(result.shape, TypeShape::TopLevel);
    let TypeBody::Fields { lists, .. } = &result.body else {
        panic!("expected a field-shaped type");
    };
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].xml_tag, "Deleted");
    assert_eq!(lists[0].enclosing_tag.as_deref(), Some("Objects"));
    assert_eq!(lists[0].type_ref.as_deref(), Some("Object"));
}

#[test]
fn test_type_shapes_and_root_tags() {
    let units = units_of_fixture(TargetLanguage::Java);

    let listing = type_unit(&units, "ListAllMyBucketsResult");
    assert_eq!(listing.shape, TypeShape::TopLevel);
    assert_eq!(listing.root_tag.as_deref(), Some("ListAllMyBucketsResult"));

    let user = type_unit(&units, "User");
    assert_eq!(user.shape, TypeShape::Nested);
    assert_eq!(user.root_tag, None);

    let bucket = type_unit(&units, "Bucket");
    assert_eq!(bucket.shape, TypeShape::TopLevel);
    assert_eq!(bucket.root_tag.as_deref(), Some("Data"));

    let priority = type_unit(&units, "BlobStoreTaskPriority");
    assert_eq!(priority.shape, TypeShape::Enum);
    assert_eq!(priority.root_tag, None);
    let TypeBody::Enum { values } = &priority.body else {
        panic!("expected an enum");
    };
    let names: Vec<_> = values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["CRITICAL", "URGENT", "HIGH", "NORMAL", "LOW", "BACKGROUND"]);
}

#[test]
fn test_bulk_get_ordering_param_depends_on_target() {
    let optional_names = |target| {
        let units = units_of_fixture(target);
        let op = operation(&units, "CreateGetJobRequestHandler");
        assert_eq!(op.shape, OperationShape::BulkGet);
        op.optional
            .iter()
            .map(|o| o.argument.name.clone())
            .collect::<Vec<_>>()
    };

    assert_eq!(
        optional_names(TargetLanguage::Java),
        ["Aggregating", "ChunkClientProcessingOrderGuarantee"]
    );
    assert_eq!(optional_names(TargetLanguage::Go), optional_names(TargetLanguage::Java));
    assert_eq!(optional_names(TargetLanguage::Python), ["Aggregating"]);
    assert_eq!(optional_names(TargetLanguage::Net), ["Aggregating"]);
}

#[test]
fn test_bulk_get_request_and_response() {
    let units = units_of_fixture(TargetLanguage::Java);
    let op = operation(&units, "CreateGetJobRequestHandler");

    assert_eq!(op.path.to_string(), "/_rest_/bucket/{bucket_name}");
    assert_eq!(
        op.effects,
        vec![QueryEffect {
            key: "operation".into(),
            value: Some("start_bulk_get".into()),
        }]
    );
    let required: Vec<_> = op.required.iter().map(|a| (a.name.as_str(), a.source)).collect();
    assert_eq!(
        required,
        [("BucketName", ArgSource::PathVariable), ("Objects", ArgSource::Payload)]
    );

    assert_eq!(op.response.strategy, ResponseStrategy::BulkJobResult);
    assert!(op.response.fields.iter().any(|f| f.source
        == FieldSource::NestedList {
            tag: "Objects".into()
        }));
}

#[test]
fn test_job_chunk_allocation_waits_for_retry() {
    let units = units_of_fixture(TargetLanguage::Net);
    let op = operation(&units, "AllocateJobChunkRequestHandler");

    assert_eq!(op.shape, OperationShape::AllocateJobChunk);
    assert_eq!(op.path.to_string(), "/_rest_/job_chunk/{job_chunk_id}");
    assert_eq!(op.required[0].kind, ValueKind::Identifier);
    assert_eq!(op.response.strategy, ResponseStrategy::DeferredWithRetry);
    assert!(op
        .response
        .fields
        .iter()
        .any(|f| f.name == "RetryAfterSeconds"));
}

#[test]
fn test_amazon_object_transfers() {
    let units = units_of_fixture(TargetLanguage::Java);

    let get = operation(&units, "GetObjectRequestHandler");
    assert_eq!(get.shape, OperationShape::AmazonGetObject);
    assert_eq!(get.path.to_string(), "/{bucket_name}/{object_name}");
    assert_eq!(get.response.strategy, ResponseStrategy::RawStream);
    assert!(get.required.iter().any(|a| a.source == ArgSource::ResponseSink));

    let put = operation(&units, "CreateObjectRequestHandler");
    assert_eq!(put.shape, OperationShape::AmazonCreateObject);
    let payload: Vec<_> = put
        .required
        .iter()
        .filter(|a| a.source == ArgSource::Payload)
        .map(|a| a.kind.clone())
        .collect();
    assert_eq!(payload, [ValueKind::Stream, ValueKind::Long]);
}

#[test]
fn test_every_configuration_error_is_reported() {
    let contract = Contract::parse(
        r#"
operations:
  - name: com.spectralogic.s3.server.handler.reqhandler.amazons4.GetThingRequestHandler
    classification: amazons4
  - name: com.spectralogic.s3.server.handler.reqhandler.spectrads3.tape.GetTapeRequestHandler
    classification: spectrads3
    resource: TAPE
    include_id_in_path: true
  - name: com.spectralogic.s3.server.handler.reqhandler.spectrads3.job.ModifyJobRequestHandler
    classification: spectrads3
    resource: JOB
    resource_type: NON_SINGLETON
    required_params:
      - name: Operation
        type: com.spectralogic.s3.server.request.rest.RestOperationType
  - name: com.spectralogic.s3.server.handler.reqhandler.amazons3.GetServiceRequestHandler
    classification: amazons3
    http_verb: GET
types:
  - name: com.spectralogic.s3.server.domain.Confused
    enum_constants: [A]
    elements:
      - name: B
        type: java.lang.String
"#,
    )
    .unwrap();

    let report = Engine::new(&contract, TargetLanguage::Java).unwrap().run();
    assert_eq!(report.units.len(), 1);
    assert_eq!(report.errors.len(), 4);

    let errors: Vec<_> = report.errors.iter().collect();
    assert!(matches!(errors[0].error, Error::UnrecognizedClassification { .. }));
    assert!(matches!(errors[1].error, Error::AmbiguousResourcePath { .. }));
    assert!(matches!(errors[2].error, Error::MissingOperationQualifier { .. }));
    assert!(matches!(errors[3].error, Error::MalformedType { .. }));
    assert_eq!(
        errors[3].unit,
        UnitId::Type("com.spectralogic.s3.server.domain.Confused".into())
    );

    let message = report.into_result().unwrap_err().to_string();
    assert!(message.contains("amazons4"));
    assert!(message.contains("GetTapeRequestHandler"));
    assert!(message.contains("ModifyJobRequestHandler"));
    assert!(message.contains("Confused"));
}

#[test]
fn test_output_paths_follow_the_target_profile() {
    let units = units_of_fixture(TargetLanguage::Java);
    let profile = TargetLanguage::Java.profile();

    let spectra = units
        .iter()
        .find(|u| u.name() == "GetBucketSpectraS3Request")
        .unwrap();
    assert_eq!(
        profile.output_path(spectra),
        std::path::Path::new(
            "ds3-sdk/src/main/java/com/spectralogic/ds3client/commands/spectrads3/GetBucketSpectraS3Request.java"
        )
    );

    let python = units_of_fixture(TargetLanguage::Python);
    let service = python.iter().find(|u| u.name() == "GetServiceRequest").unwrap();
    assert_eq!(
        TargetLanguage::Python.profile().output_path(service),
        std::path::Path::new("ds3/requests/get_service_request.py")
    );
}
