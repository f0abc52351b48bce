use once_cell::sync::Lazy;
use protox::{define_fields, Field, FieldValidationError, MessageType};

use crate::macros::message_wrapper;
use crate::{push_in, strings_of};

pub(crate) static FIELD_MASK: Lazy<MessageType> = Lazy::new(|| MessageType::new("FieldMask"));

pub(crate) fn register() -> Result<(), FieldValidationError> {
    define_fields(&FIELD_MASK, [("paths", Field::string(1).repeated())])
}

message_wrapper! {
    /// A set of symbolic field paths selecting a subset of a message.
    FieldMask, FIELD_MASK
}

impl FieldMask {
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a str>) -> FieldMask {
        let mut mask = FieldMask::new();
        for path in paths {
            mask.add_path(path);
        }
        mask
    }

    pub fn paths(&self) -> Vec<String> {
        strings_of(&self.msg, "paths")
    }

    pub fn add_path(&mut self, path: &str) {
        push_in(&mut self.msg, "paths", path);
    }
}
