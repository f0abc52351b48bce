//! Error types raised by the runtime.

use thiserror::Error;

use crate::encoding::WireType;

/// A Protobuf message decoding error.
///
/// Decode errors terminate the parse: a strict decode never returns a
/// partially populated message.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated varint: unexpected end of input")]
    TruncatedVarint,

    #[error("varint exceeded the ten byte maximum")]
    VarintOverflow,

    #[error("expected {expected} more bytes, found {actual}")]
    UnexpectedEof { expected: usize, actual: usize },

    #[error("invalid wire type value {0}")]
    InvalidWireType(u8),

    #[error("field key overflows 32 bits")]
    TagOverflow,

    #[error("field {field:?} declares wire type {expected:?}, read {actual:?} instead")]
    WireTypeMismatch {
        field: String,
        expected: WireType,
        actual: WireType,
    },

    #[error("field {message}.{field} is required but was not read from the input")]
    MissingRequiredField { message: String, field: String },

    #[error("group wire types are deprecated by protobuf and not supported")]
    GroupWireTypeUnsupported,

    #[error("string field contains invalid utf-8")]
    InvalidUtf8,

    #[error("payload claims type {actual:?}, expected an instance of {expected:?}")]
    WrongTypeUrl { expected: String, actual: String },
}

/// A Protobuf message encoding error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("field {message}.{field} is required but not set")]
    MissingRequiredField { message: String, field: String },
}

/// An error raised while constructing a field descriptor or registering it
/// on a message type.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FieldValidationError {
    #[error(
        "field number {0} is invalid: a valid field number is in [1, 536870911] \
         excluding [19000, 19999], which is reserved for the protobuf implementation"
    )]
    InvalidFieldNumber(u32),

    #[error("field with number {number} is already registered in message {message:?}")]
    DuplicateFieldNumber { message: String, number: u32 },

    #[error("field {name:?} is already registered in message {message:?}")]
    DuplicateFieldName { message: String, name: String },

    #[error("field {field:?} of message {message:?} has an invalid default value: {source}")]
    InvalidDefault {
        message: String,
        field: String,
        source: ValueError,
    },

    #[error("map field {field:?} key must be an integer, bool or string type, got {kind}")]
    InvalidMapKey { field: String, kind: &'static str },

    #[error("packed repeated field {field:?} must have a numeric element type, got {kind}")]
    InvalidPackedField { field: String, kind: &'static str },

    #[error("one-of member {message}.{field} must be optional, not required")]
    RequiredOneOfMember { message: String, field: String },

    #[error("one-of {name:?} of message {message:?} must have at least two members")]
    OneOfTooSmall { message: String, name: String },

    #[error("message {0:?} is already in use; fields must be defined before the first encode or decode")]
    AlreadyInUse(String),
}

/// An error raised by a field validator when a value does not satisfy the
/// field's type contract.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValueError {
    #[error("expected a value of type {expected}, got {actual} instead")]
    WrongKind {
        expected: String,
        actual: &'static str,
    },

    #[error("value {value} is greater than the max value of type {kind}")]
    OutOfRange { kind: &'static str, value: f64 },

    #[error("{value} is not a variant of enum {enum_name:?}")]
    UnknownEnumVariant { enum_name: String, value: i32 },

    #[error("expected a map key of type {expected}, got {actual} instead")]
    WrongKeyKind {
        expected: String,
        actual: &'static str,
    },
}

/// Raised by [`Message::which_one_of`](crate::Message::which_one_of) for a
/// group name the message type does not declare.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("message {message:?} has no one-of group {name:?}")]
pub struct NoSuchOneOf {
    pub message: String,
    pub name: String,
}
