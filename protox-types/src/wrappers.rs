//! The wrapper well-known types: single-field messages that give scalar
//! values explicit presence.

use bytes::Bytes;
use once_cell::sync::Lazy;
use protox::{define_fields, Field, FieldValidationError, MessageType};

use crate::macros::message_wrapper;
use crate::set_in;

pub(crate) static DOUBLE_VALUE: Lazy<MessageType> = Lazy::new(|| MessageType::new("DoubleValue"));
pub(crate) static FLOAT_VALUE: Lazy<MessageType> = Lazy::new(|| MessageType::new("FloatValue"));
pub(crate) static INT64_VALUE: Lazy<MessageType> = Lazy::new(|| MessageType::new("Int64Value"));
pub(crate) static UINT64_VALUE: Lazy<MessageType> = Lazy::new(|| MessageType::new("UInt64Value"));
pub(crate) static INT32_VALUE: Lazy<MessageType> = Lazy::new(|| MessageType::new("Int32Value"));
pub(crate) static UINT32_VALUE: Lazy<MessageType> = Lazy::new(|| MessageType::new("UInt32Value"));
pub(crate) static BOOL_VALUE: Lazy<MessageType> = Lazy::new(|| MessageType::new("BoolValue"));
pub(crate) static STRING_VALUE: Lazy<MessageType> = Lazy::new(|| MessageType::new("StringValue"));
pub(crate) static BYTES_VALUE: Lazy<MessageType> = Lazy::new(|| MessageType::new("BytesValue"));

pub(crate) fn register() -> Result<(), FieldValidationError> {
    define_fields(&DOUBLE_VALUE, [("value", Field::double(1))])?;
    define_fields(&FLOAT_VALUE, [("value", Field::float(1))])?;
    define_fields(&INT64_VALUE, [("value", Field::int64(1))])?;
    define_fields(&UINT64_VALUE, [("value", Field::uint64(1))])?;
    define_fields(&INT32_VALUE, [("value", Field::int32(1))])?;
    define_fields(&UINT32_VALUE, [("value", Field::uint32(1))])?;
    define_fields(&BOOL_VALUE, [("value", Field::bool(1))])?;
    define_fields(&STRING_VALUE, [("value", Field::string(1))])?;
    define_fields(&BYTES_VALUE, [("value", Field::bytes(1))])?;
    Ok(())
}

macro_rules! scalar_wrapper {
    ($(#[$doc:meta])* $name:ident, $static_ty:ident, $value_ty:ty, $getter:ident) => {
        message_wrapper! {
            $(#[$doc])*
            $name, $static_ty
        }

        impl $name {
            pub fn of(value: $value_ty) -> $name {
                let mut wrapper = $name::new();
                wrapper.set_value(value);
                wrapper
            }

            pub fn value(&self) -> Option<$value_ty> {
                self.msg.$getter("value")
            }

            pub fn set_value(&mut self, value: $value_ty) {
                set_in(&mut self.msg, "value", value);
            }
        }
    };
}

scalar_wrapper!(DoubleValue, DOUBLE_VALUE, f64, get_f64);
scalar_wrapper!(FloatValue, FLOAT_VALUE, f32, get_f32);
scalar_wrapper!(Int64Value, INT64_VALUE, i64, get_i64);
scalar_wrapper!(UInt64Value, UINT64_VALUE, u64, get_u64);
scalar_wrapper!(Int32Value, INT32_VALUE, i32, get_i32);
scalar_wrapper!(UInt32Value, UINT32_VALUE, u32, get_u32);
scalar_wrapper!(BoolValue, BOOL_VALUE, bool, get_bool);

message_wrapper! {
    StringValue, STRING_VALUE
}

impl StringValue {
    pub fn of(value: &str) -> StringValue {
        let mut wrapper = StringValue::new();
        wrapper.set_value(value);
        wrapper
    }

    pub fn value(&self) -> Option<&str> {
        self.msg.get_str("value")
    }

    pub fn set_value(&mut self, value: &str) {
        set_in(&mut self.msg, "value", value);
    }
}

message_wrapper! {
    BytesValue, BYTES_VALUE
}

impl BytesValue {
    pub fn of(value: impl Into<Bytes>) -> BytesValue {
        let mut wrapper = BytesValue::new();
        wrapper.set_value(value);
        wrapper
    }

    pub fn value(&self) -> Option<&Bytes> {
        self.msg.get_bytes("value")
    }

    pub fn set_value(&mut self, value: impl Into<Bytes>) {
        set_in(&mut self.msg, "value", value.into());
    }
}
