//! The dynamic value model.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

use crate::message::Message;

/// A value stored in a message instance.
///
/// Integer values are partitioned by width and signedness; the field
/// descriptor decides how a value is put on the wire (e.g. `I32` serves
/// `int32`, `sint32` and `sfixed32` fields alike).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Bytes),
    /// An enum ordinal. Validated against the field's symbol table.
    Enum(i32),
    Message(Box<Message>),
    List(Vec<Value>),
    Map(BTreeMap<MapKey, Value>),
}

impl Value {
    /// A short name for the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Enum(_) => "enum",
            Value::Message(_) => "message",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Value::Message(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
}

/// A map field key.
///
/// Map keys are restricted to the integer, bool and string scalars; float,
/// double and bytes keys are rejected when the map field is declared.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MapKey {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    String(String),
}

impl MapKey {
    pub fn kind_name(&self) -> &'static str {
        match self {
            MapKey::Bool(_) => "bool",
            MapKey::I32(_) => "i32",
            MapKey::I64(_) => "i64",
            MapKey::U32(_) => "u32",
            MapKey::U64(_) => "u64",
            MapKey::String(_) => "string",
        }
    }

    /// The key as a plain value, for encoding through the entry's key field.
    pub(crate) fn to_value(&self) -> Value {
        match self {
            MapKey::Bool(value) => Value::Bool(*value),
            MapKey::I32(value) => Value::I32(*value),
            MapKey::I64(value) => Value::I64(*value),
            MapKey::U32(value) => Value::U32(*value),
            MapKey::U64(value) => Value::U64(*value),
            MapKey::String(value) => Value::String(value.clone()),
        }
    }

    /// Rebuilds a key from a decoded entry value. Returns `None` for value
    /// kinds that cannot be keys.
    pub(crate) fn from_value(value: Value) -> Option<MapKey> {
        match value {
            Value::Bool(value) => Some(MapKey::Bool(value)),
            Value::I32(value) => Some(MapKey::I32(value)),
            Value::I64(value) => Some(MapKey::I64(value)),
            Value::U32(value) => Some(MapKey::U32(value)),
            Value::U64(value) => Some(MapKey::U64(value)),
            Value::String(value) => Some(MapKey::String(value)),
            _ => None,
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Bool(value) => write!(f, "{value}"),
            MapKey::I32(value) => write!(f, "{value}"),
            MapKey::I64(value) => write!(f, "{value}"),
            MapKey::U32(value) => write!(f, "{value}"),
            MapKey::U64(value) => write!(f, "{value}"),
            MapKey::String(value) => write!(f, "{value:?}"),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident,)*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Value {
                    Value::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Bytes => Bytes,
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::String(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Value {
        Value::Bytes(Bytes::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Value {
        Value::Bytes(Bytes::copy_from_slice(value))
    }
}

impl From<Message> for Value {
    fn from(value: Message) -> Value {
        Value::Message(Box::new(value))
    }
}

macro_rules! map_key_from {
    ($($ty:ty => $variant:ident,)*) => {
        $(
            impl From<$ty> for MapKey {
                fn from(value: $ty) -> MapKey {
                    MapKey::$variant(value.into())
                }
            }
        )*
    };
}

map_key_from! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    String => String,
}

impl From<&str> for MapKey {
    fn from(value: &str) -> MapKey {
        MapKey::String(value.to_string())
    }
}
