#![doc(html_root_url = "https://docs.rs/protox/0.1.0")]

//! A dynamic Protocol Buffers runtime.
//!
//! `protox` models protobuf messages at run time: a [`MessageType`] owns an
//! ordered table of field descriptors, and a [`Message`] is a sparse map of
//! set values interpreted through that table. Field tables may be installed
//! after a type is constructed with [`define_fields`], which is how mutually
//! recursive message definitions are wired together.
//!
//! ```
//! use protox::{define_fields, Field, MessageType};
//!
//! let point = MessageType::new("Point");
//! define_fields(&point, [
//!     ("x", Field::int64(1)),
//!     ("y", Field::int64(2)),
//!     ("z", Field::int64(3)),
//! ]).unwrap();
//!
//! let mut m = protox::Message::new(&point);
//! m.set("x", 1i64).unwrap();
//! m.set("y", 2i64).unwrap();
//! m.set("z", 3i64).unwrap();
//!
//! let bytes = m.to_bytes().unwrap();
//! assert_eq!(&bytes[..], &[0x08, 0x01, 0x10, 0x02, 0x18, 0x03]);
//! assert_eq!(point.from_bytes(&bytes).unwrap(), m);
//! ```

mod containers;
mod error;
mod field;
mod message;
mod value;

pub mod encoding;

pub use containers::{ListMut, MapMut};
pub use error::{DecodeError, EncodeError, FieldValidationError, NoSuchOneOf, ValueError};
pub use field::{EnumType, Field, FieldKind, FieldType, ScalarKind};
pub use message::{define_fields, Message, MessageType};
pub use value::{MapKey, Value};
