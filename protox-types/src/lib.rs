#![doc(html_root_url = "https://docs.rs/protox-types/0.1.0")]

//! Protocol Buffers well-known types.
//!
//! This crate carries the self-describing descriptor schema
//! (`FileDescriptorProto` and friends), the compiler plugin vocabulary
//! ([`compiler::CodeGeneratorRequest`] / [`compiler::CodeGeneratorResponse`])
//! and the `google.protobuf` well-known types, all implemented as dynamic
//! messages on the [`protox`] runtime.
//!
//! Every message here is an ordinary [`protox::Message`] behind a typed
//! wrapper; `as_message()` exposes the dynamic surface when the typed one is
//! not enough.

use once_cell::sync::Lazy;

mod macros;

mod any;
pub mod compiler;
mod datetime;
mod descriptor;
mod duration;
mod empty;
mod field_mask;
mod struct_pb;
mod timestamp;
mod wrappers;

pub use any::Any;
pub use descriptor::*;
pub use duration::Duration;
pub use empty::Empty;
pub use field_mask::FieldMask;
pub use struct_pb::{ListValue, NullValue, Struct, Value};
pub use timestamp::{Timestamp, TimestampError};
pub use wrappers::{
    BoolValue, BytesValue, DoubleValue, FloatValue, Int32Value, Int64Value, StringValue,
    UInt32Value, UInt64Value,
};

/// One-shot registration of every message type in this crate. The schema is
/// written out below and is statically known valid, so a failure here is a
/// bug in this crate, not in the caller.
static REGISTRY: Lazy<()> = Lazy::new(|| {
    descriptor::register()
        .and_then(|()| compiler::register())
        .and_then(|()| any::register())
        .and_then(|()| duration::register())
        .and_then(|()| field_mask::register())
        .and_then(|()| struct_pb::register())
        .and_then(|()| timestamp::register())
        .and_then(|()| wrappers::register())
        .expect("well-known descriptor registry is statically valid");
});

pub(crate) fn ensure_registered() {
    Lazy::force(&REGISTRY);
}

/// Wraps the repeated message field `name` into typed values.
pub(crate) fn messages_of<T: From<protox::Message>>(msg: &protox::Message, name: &str) -> Vec<T> {
    msg.repeated(name)
        .iter()
        .filter_map(protox::Value::as_message)
        .map(|m| T::from(m.clone()))
        .collect()
}

/// Collects the repeated string field `name`.
pub(crate) fn strings_of(msg: &protox::Message, name: &str) -> Vec<String> {
    msg.repeated(name)
        .iter()
        .filter_map(protox::Value::as_str)
        .map(str::to_string)
        .collect()
}

/// Backs the typed setters, which cannot produce an invalid value.
pub(crate) fn set_in(msg: &mut protox::Message, name: &str, value: impl Into<protox::Value>) {
    if let Err(err) = msg.set(name, value) {
        unreachable!("typed setter stored a mismatched value: {err}");
    }
}

/// Backs the typed repeated-field appenders.
pub(crate) fn push_in(msg: &mut protox::Message, name: &str, value: impl Into<protox::Value>) {
    if let Err(err) = msg.repeated_mut(name).push(value) {
        unreachable!("typed setter stored a mismatched element: {err}");
    }
}
