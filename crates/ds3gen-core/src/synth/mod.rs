//! Synthesizers that turn a classified contract entity into a generation unit.
//!
//! Each synthesizer is a pure function of one entity, its shape and the
//! contract index. None of them sees another unit's output.

pub mod args;
pub mod path;
pub mod payload;
pub mod response;
pub mod types;
pub mod value;

pub use args::{
    synthesize_args, ArgSource, Argument, ArgumentSet, DefaultValue, OptionalArgument,
    QueryEffect, Trigger,
};
pub use path::{synthesize_path, PathExpression, PathNode};
pub use payload::{synthesize_payload, PayloadKind, RequestPayload};
pub use response::{synthesize_response, FieldSource, ResponseModel, ResponseStrategy, ResultField};
pub use types::{
    synthesize_type, AttributeField, EnumValue, ListElementField, ScalarElementField, TypeBody,
    TypeUnit,
};
pub use value::ValueKind;
