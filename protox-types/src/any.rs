use bytes::Bytes;
use once_cell::sync::Lazy;
use protox::{
    define_fields, DecodeError, EncodeError, Field, FieldValidationError, Message, MessageType,
};

use crate::macros::message_wrapper;
use crate::set_in;

/// Default type URL authority for packed messages.
const TYPE_URL_PREFIX: &str = "type.googleapis.com";

pub(crate) static ANY: Lazy<MessageType> = Lazy::new(|| MessageType::new("Any"));

pub(crate) fn register() -> Result<(), FieldValidationError> {
    define_fields(
        &ANY,
        [("type_url", Field::string(1)), ("value", Field::bytes(2))],
    )
}

message_wrapper! {
    /// An arbitrary serialized message along with a URL describing its
    /// type.
    Any, ANY
}

impl Any {
    /// Serializes `message` into an `Any` under the default type URL
    /// authority.
    pub fn pack(message: &Message) -> Result<Any, EncodeError> {
        let mut any = Any::new();
        any.set_type_url(&format!(
            "{TYPE_URL_PREFIX}/{}",
            message.message_type().name()
        ));
        any.set_value(message.to_bytes()?);
        Ok(any)
    }

    /// Whether the payload claims to be an instance of `ty`. Only the part
    /// after the final `/` of the type URL is significant.
    pub fn is_instance_of(&self, ty: &MessageType) -> bool {
        let full_name = self
            .type_url()
            .rsplit('/')
            .next()
            .unwrap_or_default();
        full_name == ty.name()
    }

    /// Decodes the payload as an instance of `ty`, verifying the type URL
    /// first.
    pub fn unpack(&self, ty: &MessageType) -> Result<Message, DecodeError> {
        if !self.is_instance_of(ty) {
            return Err(DecodeError::WrongTypeUrl {
                expected: ty.name().to_string(),
                actual: self.type_url().to_string(),
            });
        }
        ty.from_bytes(self.value())
    }

    pub fn type_url(&self) -> &str {
        self.msg.get_str("type_url").unwrap_or("")
    }

    pub fn set_type_url(&mut self, type_url: &str) {
        set_in(&mut self.msg, "type_url", type_url);
    }

    pub fn value(&self) -> &[u8] {
        self.msg.get_bytes("value").map(|b| &b[..]).unwrap_or(&[])
    }

    pub fn set_value(&mut self, value: impl Into<Bytes>) {
        set_in(&mut self.msg, "value", value.into());
    }
}
