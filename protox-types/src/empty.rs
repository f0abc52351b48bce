use once_cell::sync::Lazy;
use protox::MessageType;

use crate::macros::message_wrapper;

pub(crate) static EMPTY: Lazy<MessageType> = Lazy::new(|| MessageType::new("Empty"));

message_wrapper! {
    /// A message with no fields, re-used wherever an API needs a
    /// placeholder request or response.
    Empty, EMPTY
}
