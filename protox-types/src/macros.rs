//! Internal macros shared by the message definitions in this crate.

/// Declares a wrapper struct over a dynamic [`protox::Message`], with the
/// conversions and (de)serialization entry points every message carries.
/// Field accessors are written by hand next to the invocation.
macro_rules! message_wrapper {
    ($(#[$doc:meta])* $name:ident, $static_ty:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            msg: protox::Message,
        }

        impl $name {
            /// The runtime descriptor shared by every instance.
            pub fn message_type() -> &'static protox::MessageType {
                crate::ensure_registered();
                &$static_ty
            }

            pub fn new() -> $name {
                $name {
                    msg: protox::Message::new($name::message_type()),
                }
            }

            pub fn from_bytes(data: &[u8]) -> Result<$name, protox::DecodeError> {
                Ok($name {
                    msg: $name::message_type().from_bytes(data)?,
                })
            }

            pub fn to_bytes(&self) -> Result<bytes::Bytes, protox::EncodeError> {
                self.msg.to_bytes()
            }

            pub fn as_message(&self) -> &protox::Message {
                &self.msg
            }

            pub fn as_message_mut(&mut self) -> &mut protox::Message {
                &mut self.msg
            }
        }

        impl Default for $name {
            fn default() -> $name {
                $name::new()
            }
        }

        impl From<protox::Message> for $name {
            fn from(msg: protox::Message) -> $name {
                $name { msg }
            }
        }

        impl From<$name> for protox::Value {
            fn from(value: $name) -> protox::Value {
                protox::Value::from(value.msg)
            }
        }
    };
}

/// Declares a protobuf enum: a plain Rust enum with ordinal conversions and
/// a constructor for its runtime symbol table.
macro_rules! proto_enum {
    ($(#[$doc:meta])* $name:ident { $($variant:ident = $number:literal => $proto_name:literal,)* }) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $($variant = $number,)*
        }

        impl $name {
            pub fn from_i32(value: i32) -> Option<$name> {
                match value {
                    $($number => Some($name::$variant),)*
                    _ => None,
                }
            }

            /// The variant's name as written in the `.proto` definition.
            pub fn proto_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $proto_name,)*
                }
            }

            pub(crate) fn symbol_table(enum_name: &str) -> protox::EnumType {
                protox::EnumType::new(enum_name, &[$(($proto_name, $number),)*])
            }
        }

        impl From<$name> for protox::Value {
            fn from(value: $name) -> protox::Value {
                protox::Value::Enum(value as i32)
            }
        }
    };
}

pub(crate) use {message_wrapper, proto_enum};
