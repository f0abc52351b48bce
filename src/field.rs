//! Field descriptors: per-type encode/decode/validate behavior, layered over
//! the wire primitives in [`encoding`](crate::encoding).

use std::fmt;
use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};

use crate::encoding::{
    decode_bytes, decode_double, decode_fixed32, decode_fixed64, decode_float, decode_varint,
    decode_zigzag, encode_bytes, encode_fixed32, encode_fixed64, encode_key, encode_varint,
    encode_zigzag32, encode_zigzag64, WireType,
};
use crate::error::{DecodeError, EncodeError, ValueError};
use crate::message::{Message, MessageType};
use crate::value::{MapKey, Value};

/// The fifteen scalar field types and their wire behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Int32,
    Int64,
    SInt32,
    SInt64,
    UInt32,
    UInt64,
    Fixed32,
    Fixed64,
    SFixed32,
    SFixed64,
    Float,
    Double,
    Bool,
    String,
    Bytes,
}

impl ScalarKind {
    /// The protobuf name of the scalar type.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::SInt32 => "sint32",
            ScalarKind::SInt64 => "sint64",
            ScalarKind::UInt32 => "uint32",
            ScalarKind::UInt64 => "uint64",
            ScalarKind::Fixed32 => "fixed32",
            ScalarKind::Fixed64 => "fixed64",
            ScalarKind::SFixed32 => "sfixed32",
            ScalarKind::SFixed64 => "sfixed64",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Bytes => "bytes",
        }
    }

    pub fn wire_type(&self) -> WireType {
        match self {
            ScalarKind::Int32
            | ScalarKind::Int64
            | ScalarKind::SInt32
            | ScalarKind::SInt64
            | ScalarKind::UInt32
            | ScalarKind::UInt64
            | ScalarKind::Bool => WireType::Varint,
            ScalarKind::Fixed32 | ScalarKind::SFixed32 | ScalarKind::Float => WireType::Fixed32,
            ScalarKind::Fixed64 | ScalarKind::SFixed64 | ScalarKind::Double => WireType::Fixed64,
            ScalarKind::String | ScalarKind::Bytes => WireType::LengthDelimited,
        }
    }

    /// Whether the scalar may be used as a map key. Excludes float, double
    /// and bytes, per the protobuf language spec.
    pub fn is_valid_map_key(&self) -> bool {
        !matches!(
            self,
            ScalarKind::Float | ScalarKind::Double | ScalarKind::Bytes
        )
    }

    /// Whether the scalar may appear in a packed repeated field. Only the
    /// fixed-shape numeric encodings pack; length-delimited payloads are
    /// self-delimiting and stay unpacked.
    pub fn is_packable(&self) -> bool {
        !matches!(self, ScalarKind::String | ScalarKind::Bytes)
    }

    /// The zero value of the scalar, used for proto3 implicit presence and
    /// absent map entry halves.
    pub fn zero_value(&self) -> Value {
        match self {
            ScalarKind::Int32 | ScalarKind::SInt32 | ScalarKind::SFixed32 => Value::I32(0),
            ScalarKind::Int64 | ScalarKind::SInt64 | ScalarKind::SFixed64 => Value::I64(0),
            ScalarKind::UInt32 | ScalarKind::Fixed32 => Value::U32(0),
            ScalarKind::UInt64 | ScalarKind::Fixed64 => Value::U64(0),
            ScalarKind::Float => Value::F32(0.0),
            ScalarKind::Double => Value::F64(0.0),
            ScalarKind::Bool => Value::Bool(false),
            ScalarKind::String => Value::String(String::new()),
            ScalarKind::Bytes => Value::Bytes(Bytes::new()),
        }
    }

    fn expected_kind(&self) -> &'static str {
        match self {
            ScalarKind::Int32 | ScalarKind::SInt32 | ScalarKind::SFixed32 => "i32",
            ScalarKind::Int64 | ScalarKind::SInt64 | ScalarKind::SFixed64 => "i64",
            ScalarKind::UInt32 | ScalarKind::Fixed32 => "u32",
            ScalarKind::UInt64 | ScalarKind::Fixed64 => "u64",
            ScalarKind::Float => "f32",
            ScalarKind::Double => "f64",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Bytes => "bytes",
        }
    }

    /// Checks that a value is of the kind this scalar stores. Float and
    /// double additionally reject positive infinity, which exceeds the
    /// type's declared maximum.
    pub fn validate(&self, value: &Value) -> Result<(), ValueError> {
        let ok = match (self, value) {
            (ScalarKind::Int32 | ScalarKind::SInt32 | ScalarKind::SFixed32, Value::I32(_)) => true,
            (ScalarKind::Int64 | ScalarKind::SInt64 | ScalarKind::SFixed64, Value::I64(_)) => true,
            (ScalarKind::UInt32 | ScalarKind::Fixed32, Value::U32(_)) => true,
            (ScalarKind::UInt64 | ScalarKind::Fixed64, Value::U64(_)) => true,
            (ScalarKind::Float, Value::F32(v)) => {
                if *v == f32::INFINITY {
                    return Err(ValueError::OutOfRange {
                        kind: "float",
                        value: f64::from(*v),
                    });
                }
                true
            }
            (ScalarKind::Double, Value::F64(v)) => {
                if *v == f64::INFINITY {
                    return Err(ValueError::OutOfRange {
                        kind: "double",
                        value: *v,
                    });
                }
                true
            }
            (ScalarKind::Bool, Value::Bool(_)) => true,
            (ScalarKind::String, Value::String(_)) => true,
            (ScalarKind::Bytes, Value::Bytes(_)) => true,
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(ValueError::WrongKind {
                expected: self.expected_kind().to_string(),
                actual: value.kind_name(),
            })
        }
    }

    /// Checks that a map key matches this scalar kind.
    pub(crate) fn validate_key(&self, key: &MapKey) -> Result<(), ValueError> {
        let ok = match (self, key) {
            (ScalarKind::Int32 | ScalarKind::SInt32 | ScalarKind::SFixed32, MapKey::I32(_)) => true,
            (ScalarKind::Int64 | ScalarKind::SInt64 | ScalarKind::SFixed64, MapKey::I64(_)) => true,
            (ScalarKind::UInt32 | ScalarKind::Fixed32, MapKey::U32(_)) => true,
            (ScalarKind::UInt64 | ScalarKind::Fixed64, MapKey::U64(_)) => true,
            (ScalarKind::Bool, MapKey::Bool(_)) => true,
            (ScalarKind::String, MapKey::String(_)) => true,
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(ValueError::WrongKeyKind {
                expected: self.expected_kind().to_string(),
                actual: key.kind_name(),
            })
        }
    }

    /// Encodes a value's payload, without a field key. The value must have
    /// passed [`validate`](Self::validate).
    pub(crate) fn encode_value<B>(&self, value: &Value, buf: &mut B)
    where
        B: BufMut,
    {
        match (self, value) {
            // int32/int64 widen negatives through two's complement 64-bit.
            (ScalarKind::Int32, Value::I32(v)) => encode_varint(i64::from(*v) as u64, buf),
            (ScalarKind::Int64, Value::I64(v)) => encode_varint(*v as u64, buf),
            (ScalarKind::SInt32, Value::I32(v)) => encode_varint(encode_zigzag32(*v), buf),
            (ScalarKind::SInt64, Value::I64(v)) => encode_varint(encode_zigzag64(*v), buf),
            (ScalarKind::UInt32, Value::U32(v)) => encode_varint(u64::from(*v), buf),
            (ScalarKind::UInt64, Value::U64(v)) => encode_varint(*v, buf),
            (ScalarKind::Fixed32, Value::U32(v)) => encode_fixed32(*v, buf),
            (ScalarKind::Fixed64, Value::U64(v)) => encode_fixed64(*v, buf),
            (ScalarKind::SFixed32, Value::I32(v)) => encode_fixed32(*v as u32, buf),
            (ScalarKind::SFixed64, Value::I64(v)) => encode_fixed64(*v as u64, buf),
            (ScalarKind::Float, Value::F32(v)) => buf.put_f32_le(*v),
            (ScalarKind::Double, Value::F64(v)) => buf.put_f64_le(*v),
            (ScalarKind::Bool, Value::Bool(v)) => encode_varint(u64::from(*v), buf),
            (ScalarKind::String, Value::String(v)) => encode_bytes(v.as_bytes(), buf),
            (ScalarKind::Bytes, Value::Bytes(v)) => encode_bytes(v, buf),
            _ => unreachable!("value kind is checked by validate before it is stored"),
        }
    }

    /// Decodes a single value payload.
    pub(crate) fn decode_value(&self, buf: &mut Bytes) -> Result<Value, DecodeError> {
        let value = match self {
            ScalarKind::Int32 => Value::I32(decode_varint(buf)? as i32),
            ScalarKind::Int64 => Value::I64(decode_varint(buf)? as i64),
            ScalarKind::SInt32 => Value::I32(decode_zigzag(decode_varint(buf)?) as i32),
            ScalarKind::SInt64 => Value::I64(decode_zigzag(decode_varint(buf)?)),
            ScalarKind::UInt32 => Value::U32(decode_varint(buf)? as u32),
            ScalarKind::UInt64 => Value::U64(decode_varint(buf)?),
            ScalarKind::Fixed32 => Value::U32(decode_fixed32(buf)?),
            ScalarKind::Fixed64 => Value::U64(decode_fixed64(buf)?),
            ScalarKind::SFixed32 => Value::I32(decode_fixed32(buf)? as i32),
            ScalarKind::SFixed64 => Value::I64(decode_fixed64(buf)? as i64),
            ScalarKind::Float => Value::F32(decode_float(buf)?),
            ScalarKind::Double => Value::F64(decode_double(buf)?),
            ScalarKind::Bool => Value::Bool(decode_varint(buf)? != 0),
            ScalarKind::String => {
                let data = decode_bytes(buf)?;
                let text =
                    String::from_utf8(data.to_vec()).map_err(|_| DecodeError::InvalidUtf8)?;
                Value::String(text)
            }
            ScalarKind::Bytes => Value::Bytes(decode_bytes(buf)?),
        };
        Ok(value)
    }
}

struct EnumTypeInner {
    name: String,
    variants: Vec<(String, i32)>,
}

/// A named enum symbol table.
///
/// Cheap to clone; clones share the table.
#[derive(Clone)]
pub struct EnumType {
    inner: Arc<EnumTypeInner>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, variants: &[(&str, i32)]) -> EnumType {
        EnumType {
            inner: Arc::new(EnumTypeInner {
                name: name.into(),
                variants: variants
                    .iter()
                    .map(|(name, number)| (name.to_string(), *number))
                    .collect(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn contains(&self, number: i32) -> bool {
        self.inner.variants.iter().any(|(_, n)| *n == number)
    }

    pub fn variant_name(&self, number: i32) -> Option<&str> {
        self.inner
            .variants
            .iter()
            .find(|(_, n)| *n == number)
            .map(|(name, _)| name.as_str())
    }

    pub fn variant_number(&self, name: &str) -> Option<i32> {
        self.inner
            .variants
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, number)| *number)
    }
}

impl fmt::Debug for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumType")
            .field("name", &self.inner.name)
            .field("variants", &self.inner.variants)
            .finish()
    }
}

/// The type of a field value: a scalar, an enum with its symbol table, or a
/// nested message.
#[derive(Clone, Debug)]
pub enum FieldType {
    Scalar(ScalarKind),
    Enum(EnumType),
    Message(MessageType),
}

impl FieldType {
    /// Convenience constructor mirroring [`Field::message`].
    pub fn message(ty: &MessageType) -> FieldType {
        FieldType::Message(ty.clone())
    }

    /// Convenience constructor mirroring [`Field::enumeration`].
    pub fn enumeration(ty: &EnumType) -> FieldType {
        FieldType::Enum(ty.clone())
    }

    /// The name of the type, as it appears in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            FieldType::Scalar(kind) => kind.name(),
            FieldType::Enum(ty) => ty.name(),
            FieldType::Message(ty) => ty.name(),
        }
    }

    pub fn wire_type(&self) -> WireType {
        match self {
            FieldType::Scalar(kind) => kind.wire_type(),
            FieldType::Enum(_) => WireType::Varint,
            FieldType::Message(_) => WireType::LengthDelimited,
        }
    }

    /// The zero value of the type: numeric zero, empty string or bytes, the
    /// zero ordinal, or an empty message.
    pub fn zero_value(&self) -> Value {
        match self {
            FieldType::Scalar(kind) => kind.zero_value(),
            FieldType::Enum(_) => Value::Enum(0),
            FieldType::Message(ty) => Value::Message(Box::new(Message::new(ty))),
        }
    }

    pub(crate) fn validate(&self, value: &Value) -> Result<(), ValueError> {
        match self {
            FieldType::Scalar(kind) => kind.validate(value),
            FieldType::Enum(ty) => match value {
                Value::Enum(number) => {
                    if ty.contains(*number) {
                        Ok(())
                    } else {
                        Err(ValueError::UnknownEnumVariant {
                            enum_name: ty.name().to_string(),
                            value: *number,
                        })
                    }
                }
                other => Err(ValueError::WrongKind {
                    expected: ty.name().to_string(),
                    actual: other.kind_name(),
                }),
            },
            FieldType::Message(ty) => match value {
                Value::Message(message) if MessageType::ptr_eq(message.message_type(), ty) => {
                    Ok(())
                }
                other => Err(ValueError::WrongKind {
                    expected: ty.name().to_string(),
                    actual: other.kind_name(),
                }),
            },
        }
    }

    /// Encodes a value's payload, without a field key.
    pub(crate) fn encode_value<B>(&self, value: &Value, buf: &mut B) -> Result<(), EncodeError>
    where
        B: BufMut,
    {
        match (self, value) {
            (FieldType::Scalar(kind), value) => {
                kind.encode_value(value, buf);
                Ok(())
            }
            (FieldType::Enum(_), Value::Enum(number)) => {
                encode_varint(i64::from(*number) as u64, buf);
                Ok(())
            }
            (FieldType::Message(_), Value::Message(message)) => {
                let payload = message.to_bytes()?;
                encode_bytes(&payload, buf);
                Ok(())
            }
            _ => unreachable!("value kind is checked by validate before it is stored"),
        }
    }

    /// Decodes a single value payload. Returns `None` for an enum ordinal
    /// outside the symbol table: the field reads as absent rather than
    /// holding a sentinel integer.
    pub(crate) fn decode_value(
        &self,
        buf: &mut Bytes,
        strict: bool,
    ) -> Result<Option<Value>, DecodeError> {
        match self {
            FieldType::Scalar(kind) => kind.decode_value(buf).map(Some),
            FieldType::Enum(ty) => {
                let number = decode_varint(buf)? as i32;
                if ty.contains(number) {
                    Ok(Some(Value::Enum(number)))
                } else {
                    Ok(None)
                }
            }
            FieldType::Message(ty) => {
                let data = decode_bytes(buf)?;
                let message = ty.decode(data, strict)?;
                Ok(Some(Value::Message(Box::new(message))))
            }
        }
    }
}

/// How a field's values are arranged: one value, a repeated list, or a map.
#[derive(Clone, Debug)]
pub enum FieldKind {
    Singular(FieldType),
    Repeated { element: FieldType, packed: bool },
    Map { key: ScalarKind, value: FieldType },
}

/// A field descriptor: number, type behavior, optionality and default.
///
/// Constructed with the per-type constructors and refined with the builder
/// methods, then bound to a name by registering it on a
/// [`MessageType`](crate::MessageType):
///
/// ```
/// use protox::{Field, ScalarKind, FieldType};
///
/// let id = Field::uint32(1).required();
/// let tags = Field::string(2).repeated();
/// let scores = Field::map(3, ScalarKind::String, FieldType::Scalar(ScalarKind::Int32));
/// ```
#[derive(Clone, Debug)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) number: u32,
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    /// Synthetic two-field entry message, installed when a map field is
    /// registered.
    pub(crate) map_entry: Option<MessageType>,
}

macro_rules! scalar_constructors {
    ($($(#[$doc:meta])* $fn_name:ident => $kind:ident,)*) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(number: u32) -> Field {
                Field::singular(number, FieldType::Scalar(ScalarKind::$kind))
            }
        )*
    };
}

impl Field {
    fn singular(number: u32, ty: FieldType) -> Field {
        Field {
            name: String::new(),
            number,
            kind: FieldKind::Singular(ty),
            required: false,
            default: None,
            map_entry: None,
        }
    }

    scalar_constructors! {
        int32 => Int32,
        int64 => Int64,
        sint32 => SInt32,
        sint64 => SInt64,
        uint32 => UInt32,
        uint64 => UInt64,
        fixed32 => Fixed32,
        fixed64 => Fixed64,
        sfixed32 => SFixed32,
        sfixed64 => SFixed64,
        float => Float,
        double => Double,
        bool => Bool,
        string => String,
        bytes => Bytes,
    }

    /// An enum field carrying the given symbol table.
    pub fn enumeration(number: u32, ty: &EnumType) -> Field {
        Field::singular(number, FieldType::Enum(ty.clone()))
    }

    /// A nested message field.
    pub fn message(number: u32, ty: &MessageType) -> Field {
        Field::singular(number, FieldType::Message(ty.clone()))
    }

    /// A map field. The key must be drawn from the integer, bool and string
    /// scalars; this is checked when the field is registered.
    pub fn map(number: u32, key: ScalarKind, value: FieldType) -> Field {
        Field {
            name: String::new(),
            number,
            kind: FieldKind::Map { key, value },
            required: false,
            default: None,
            map_entry: None,
        }
    }

    /// Marks the field required. `to_bytes` fails while a required field
    /// with no default is unset, and a strict decode fails symmetrically.
    pub fn required(mut self) -> Field {
        self.required = true;
        self
    }

    /// Declares a default, materialized on read while the field is unset.
    /// The default itself must validate against the field.
    pub fn with_default(mut self, value: impl Into<Value>) -> Field {
        self.default = Some(value.into());
        self
    }

    /// Turns a singular field into an unpacked repeated field.
    pub fn repeated(mut self) -> Field {
        self.kind = match self.kind {
            FieldKind::Singular(ty) => FieldKind::Repeated {
                element: ty,
                packed: false,
            },
            FieldKind::Repeated { element, packed } => FieldKind::Repeated { element, packed },
            FieldKind::Map { .. } => panic!("map fields cannot be repeated"),
        };
        self
    }

    /// Turns the field into a packed repeated field. Only numeric element
    /// types pack; the constraint is checked at registration.
    pub fn packed(mut self) -> Field {
        self.kind = match self.kind {
            FieldKind::Singular(ty) | FieldKind::Repeated { element: ty, .. } => {
                FieldKind::Repeated {
                    element: ty,
                    packed: true,
                }
            }
            FieldKind::Map { .. } => panic!("map fields cannot be packed"),
        };
        self
    }

    /// The declared name. Empty until the field is registered on a message
    /// type.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether the field counts toward the required set: required fields
    /// with a declared default read as present and are exempt.
    pub(crate) fn in_required_set(&self) -> bool {
        self.required && self.default.is_none() && matches!(self.kind, FieldKind::Singular(_))
    }

    /// The wire type a well-formed peer uses for this field.
    pub(crate) fn wire_type(&self) -> WireType {
        match &self.kind {
            FieldKind::Singular(ty) => ty.wire_type(),
            FieldKind::Repeated { element, packed } => {
                if *packed {
                    WireType::LengthDelimited
                } else {
                    element.wire_type()
                }
            }
            FieldKind::Map { .. } => WireType::LengthDelimited,
        }
    }

    /// Validates a candidate value for this field, including every element
    /// of a list and every entry of a map.
    pub(crate) fn validate_value(&self, value: &Value) -> Result<(), ValueError> {
        match &self.kind {
            FieldKind::Singular(ty) => ty.validate(value),
            FieldKind::Repeated { element, .. } => match value {
                Value::List(items) => {
                    for item in items {
                        element.validate(item)?;
                    }
                    Ok(())
                }
                other => Err(ValueError::WrongKind {
                    expected: "list".to_string(),
                    actual: other.kind_name(),
                }),
            },
            FieldKind::Map { key, value: value_ty } => match value {
                Value::Map(entries) => {
                    for (entry_key, entry_value) in entries {
                        key.validate_key(entry_key)?;
                        value_ty.validate(entry_value)?;
                    }
                    Ok(())
                }
                other => Err(ValueError::WrongKind {
                    expected: "map".to_string(),
                    actual: other.kind_name(),
                }),
            },
        }
    }

    /// Encodes the field's stored value, keys included. Empty lists and maps
    /// produce no output.
    pub(crate) fn encode<B>(&self, value: &Value, buf: &mut B) -> Result<(), EncodeError>
    where
        B: BufMut,
    {
        match (&self.kind, value) {
            (FieldKind::Singular(ty), value) => {
                encode_key(self.number, ty.wire_type(), buf);
                ty.encode_value(value, buf)
            }
            (FieldKind::Repeated { element, packed: true }, Value::List(items)) => {
                if items.is_empty() {
                    return Ok(());
                }
                let mut payload = BytesMut::new();
                for item in items {
                    element.encode_value(item, &mut payload)?;
                }
                encode_key(self.number, WireType::LengthDelimited, buf);
                encode_bytes(&payload, buf);
                Ok(())
            }
            (FieldKind::Repeated { element, packed: false }, Value::List(items)) => {
                for item in items {
                    encode_key(self.number, element.wire_type(), buf);
                    element.encode_value(item, buf)?;
                }
                Ok(())
            }
            (FieldKind::Map { key, value: value_ty }, Value::Map(entries)) => {
                for (entry_key, entry_value) in entries {
                    let mut payload = BytesMut::new();
                    encode_key(1, key.wire_type(), &mut payload);
                    key.encode_value(&entry_key.to_value(), &mut payload);
                    encode_key(2, value_ty.wire_type(), &mut payload);
                    value_ty.encode_value(entry_value, &mut payload)?;

                    encode_key(self.number, WireType::LengthDelimited, buf);
                    encode_bytes(&payload, buf);
                }
                Ok(())
            }
            _ => unreachable!("value kind is checked by validate before it is stored"),
        }
    }

    /// Decodes one map entry frame into a `(key, value)` pair. Absent halves
    /// take the type's zero value, as emitted by implicit-presence peers.
    pub(crate) fn decode_map_entry(
        &self,
        buf: &mut Bytes,
        strict: bool,
    ) -> Result<(MapKey, Value), DecodeError> {
        let (key_kind, value_ty, entry) = match (&self.kind, &self.map_entry) {
            (FieldKind::Map { key, value }, Some(entry)) => (key, value, entry),
            _ => unreachable!("decode_map_entry is only called for registered map fields"),
        };

        let data = decode_bytes(buf)?;
        let message = entry.decode(data, strict)?;

        let key = match message.get("key").cloned() {
            Some(value) => match MapKey::from_value(value) {
                Some(key) => key,
                None => unreachable!("map key kinds are checked at registration"),
            },
            None => match MapKey::from_value(key_kind.zero_value()) {
                Some(key) => key,
                None => unreachable!("map key kinds are checked at registration"),
            },
        };
        let value = message
            .get("value")
            .cloned()
            .unwrap_or_else(|| value_ty.zero_value());

        Ok((key, value))
    }
}
