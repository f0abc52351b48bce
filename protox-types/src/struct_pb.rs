//! `Struct`, `Value` and `ListValue`: a dynamically typed JSON-like object
//! model. `Value` and `ListValue` reference each other, so their fields are
//! installed through deferred registration after both types exist.

use once_cell::sync::Lazy;
use protox::{define_fields, Field, FieldType, FieldValidationError, MapKey, MessageType,
    ScalarKind};

use crate::macros::{message_wrapper, proto_enum};
use crate::messages_of;

pub(crate) static STRUCT: Lazy<MessageType> = Lazy::new(|| MessageType::new("Struct"));
pub(crate) static VALUE: Lazy<MessageType> = Lazy::new(|| {
    MessageType::with_one_ofs(
        "Value",
        &[(
            "kind",
            &[
                "null_value",
                "number_value",
                "string_value",
                "bool_value",
                "struct_value",
                "list_value",
            ],
        )],
    )
    .expect("statically valid one-of groups")
});
pub(crate) static LIST_VALUE: Lazy<MessageType> = Lazy::new(|| MessageType::new("ListValue"));

static NULL_VALUE_ENUM: Lazy<protox::EnumType> =
    Lazy::new(|| NullValue::symbol_table("NullValue"));

proto_enum! {
    /// The singleton null.
    NullValue {
        NullValue = 0 => "NULL_VALUE",
    }
}

pub(crate) fn register() -> Result<(), FieldValidationError> {
    define_fields(
        &STRUCT,
        [(
            "fields",
            Field::map(1, ScalarKind::String, FieldType::message(&VALUE)),
        )],
    )?;

    define_fields(
        &VALUE,
        [
            ("null_value", Field::enumeration(1, &NULL_VALUE_ENUM)),
            ("number_value", Field::double(2)),
            ("string_value", Field::string(3)),
            ("bool_value", Field::bool(4)),
            ("struct_value", Field::message(5, &STRUCT)),
            ("list_value", Field::message(6, &LIST_VALUE)),
        ],
    )?;

    define_fields(
        &LIST_VALUE,
        [("values", Field::message(1, &VALUE).repeated())],
    )?;

    Ok(())
}

message_wrapper! {
    /// A mapping from keys to dynamically typed values.
    Struct, STRUCT
}

impl Struct {
    pub fn len(&self) -> usize {
        self.msg.map("fields").len()
    }

    pub fn is_empty(&self) -> bool {
        self.msg.map("fields").is_empty()
    }

    pub fn get_field(&self, key: &str) -> Option<Value> {
        self.msg
            .map("fields")
            .get(&MapKey::from(key))
            .and_then(protox::Value::as_message)
            .map(|msg| Value::from(msg.clone()))
    }

    pub fn set_field(&mut self, key: &str, value: Value) {
        if let Err(err) = self.msg.map_mut("fields").insert(key, value) {
            unreachable!("typed setter stored a mismatched value: {err}");
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.msg
            .map("fields")
            .keys()
            .map(|key| key.to_string())
            .collect()
    }
}

message_wrapper! {
    /// One dynamically typed value: null, a number, a string, a bool, a
    /// nested `Struct` or a `ListValue`. Exactly one variant is set at a
    /// time, arbitrated by the `kind` one-of group.
    Value, VALUE
}

impl Value {
    pub fn null() -> Value {
        let mut value = Value::new();
        crate::set_in(value.as_message_mut(), "null_value", NullValue::NullValue);
        value
    }

    pub fn from_number(number: f64) -> Value {
        let mut value = Value::new();
        crate::set_in(value.as_message_mut(), "number_value", number);
        value
    }

    pub fn from_string(text: &str) -> Value {
        let mut value = Value::new();
        crate::set_in(value.as_message_mut(), "string_value", text);
        value
    }

    pub fn from_bool(flag: bool) -> Value {
        let mut value = Value::new();
        crate::set_in(value.as_message_mut(), "bool_value", flag);
        value
    }

    pub fn from_struct(fields: Struct) -> Value {
        let mut value = Value::new();
        crate::set_in(value.as_message_mut(), "struct_value", fields);
        value
    }

    pub fn from_list(list: ListValue) -> Value {
        let mut value = Value::new();
        crate::set_in(value.as_message_mut(), "list_value", list);
        value
    }

    /// The name of the variant currently set, if any.
    pub fn kind(&self) -> Option<&str> {
        self.msg.which_one_of("kind").ok().flatten()
    }

    pub fn is_null(&self) -> bool {
        self.kind() == Some("null_value")
    }

    pub fn number_value(&self) -> Option<f64> {
        self.msg.get_f64("number_value")
    }

    pub fn string_value(&self) -> Option<&str> {
        self.msg.get_str("string_value")
    }

    pub fn bool_value(&self) -> Option<bool> {
        self.msg.get_bool("bool_value")
    }

    pub fn struct_value(&self) -> Option<Struct> {
        self.msg
            .get_message("struct_value")
            .map(|msg| Struct::from(msg.clone()))
    }

    pub fn list_value(&self) -> Option<ListValue> {
        self.msg
            .get_message("list_value")
            .map(|msg| ListValue::from(msg.clone()))
    }
}

message_wrapper! {
    /// An ordered sequence of [`Value`]s.
    ListValue, LIST_VALUE
}

impl ListValue {
    pub fn values(&self) -> Vec<Value> {
        messages_of(&self.msg, "values")
    }

    pub fn push(&mut self, value: Value) {
        crate::push_in(&mut self.msg, "values", value);
    }

    pub fn len(&self) -> usize {
        self.msg.repeated("values").len()
    }

    pub fn is_empty(&self) -> bool {
        self.msg.repeated("values").is_empty()
    }
}
