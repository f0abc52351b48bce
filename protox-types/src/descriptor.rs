//! The protobuf descriptor schema, bootstrapped on the runtime it
//! describes. The generator both consumes these messages (its input is a
//! set of `FileDescriptorProto`s) and is described by them.

use once_cell::sync::Lazy;
use protox::{define_fields, EnumType, Field, FieldValidationError, MessageType};

use crate::macros::message_wrapper;
use crate::{messages_of, push_in, set_in, strings_of};

pub(crate) static FILE_DESCRIPTOR_SET: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("FileDescriptorSet"));
pub(crate) static FILE_DESCRIPTOR_PROTO: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("FileDescriptorProto"));
pub(crate) static DESCRIPTOR_PROTO: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("DescriptorProto"));
pub(crate) static EXTENSION_RANGE: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("DescriptorProto.ExtensionRange"));
pub(crate) static RESERVED_RANGE: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("DescriptorProto.ReservedRange"));
pub(crate) static EXTENSION_RANGE_OPTIONS: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("ExtensionRangeOptions"));
pub(crate) static FIELD_DESCRIPTOR_PROTO: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("FieldDescriptorProto"));
pub(crate) static ONEOF_DESCRIPTOR_PROTO: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("OneofDescriptorProto"));
pub(crate) static ENUM_DESCRIPTOR_PROTO: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("EnumDescriptorProto"));
pub(crate) static ENUM_RESERVED_RANGE: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("EnumDescriptorProto.EnumReservedRange"));
pub(crate) static ENUM_VALUE_DESCRIPTOR_PROTO: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("EnumValueDescriptorProto"));
pub(crate) static SERVICE_DESCRIPTOR_PROTO: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("ServiceDescriptorProto"));
pub(crate) static METHOD_DESCRIPTOR_PROTO: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("MethodDescriptorProto"));
pub(crate) static FILE_OPTIONS: Lazy<MessageType> = Lazy::new(|| MessageType::new("FileOptions"));
pub(crate) static MESSAGE_OPTIONS: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("MessageOptions"));
pub(crate) static FIELD_OPTIONS: Lazy<MessageType> = Lazy::new(|| MessageType::new("FieldOptions"));
pub(crate) static ONEOF_OPTIONS: Lazy<MessageType> = Lazy::new(|| MessageType::new("OneofOptions"));
pub(crate) static ENUM_OPTIONS: Lazy<MessageType> = Lazy::new(|| MessageType::new("EnumOptions"));
pub(crate) static ENUM_VALUE_OPTIONS: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("EnumValueOptions"));
pub(crate) static SERVICE_OPTIONS: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("ServiceOptions"));
pub(crate) static METHOD_OPTIONS: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("MethodOptions"));
pub(crate) static UNINTERPRETED_OPTION: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("UninterpretedOption"));
pub(crate) static NAME_PART: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("UninterpretedOption.NamePart"));
pub(crate) static SOURCE_CODE_INFO: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("SourceCodeInfo"));
pub(crate) static LOCATION: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("SourceCodeInfo.Location"));
pub(crate) static GENERATED_CODE_INFO: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("GeneratedCodeInfo"));
pub(crate) static ANNOTATION: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("GeneratedCodeInfo.Annotation"));

pub(crate) static TYPE_ENUM: Lazy<EnumType> =
    Lazy::new(|| field_descriptor_proto::Type::symbol_table("FieldDescriptorProto.Type"));
pub(crate) static LABEL_ENUM: Lazy<EnumType> =
    Lazy::new(|| field_descriptor_proto::Label::symbol_table("FieldDescriptorProto.Label"));
static OPTIMIZE_MODE_ENUM: Lazy<EnumType> =
    Lazy::new(|| file_options::OptimizeMode::symbol_table("FileOptions.OptimizeMode"));
static CTYPE_ENUM: Lazy<EnumType> =
    Lazy::new(|| field_options::CType::symbol_table("FieldOptions.CType"));
static JSTYPE_ENUM: Lazy<EnumType> =
    Lazy::new(|| field_options::JsType::symbol_table("FieldOptions.JSType"));
static IDEMPOTENCY_ENUM: Lazy<EnumType> = Lazy::new(|| {
    method_options::IdempotencyLevel::symbol_table("MethodOptions.IdempotencyLevel")
});

/// Nested declarations of `FieldDescriptorProto`.
pub mod field_descriptor_proto {
    use crate::macros::proto_enum;

    proto_enum! {
        /// The eighteen protobuf field types.
        Type {
            Double = 1 => "TYPE_DOUBLE",
            Float = 2 => "TYPE_FLOAT",
            Int64 = 3 => "TYPE_INT64",
            Uint64 = 4 => "TYPE_UINT64",
            Int32 = 5 => "TYPE_INT32",
            Fixed64 = 6 => "TYPE_FIXED64",
            Fixed32 = 7 => "TYPE_FIXED32",
            Bool = 8 => "TYPE_BOOL",
            String = 9 => "TYPE_STRING",
            Group = 10 => "TYPE_GROUP",
            Message = 11 => "TYPE_MESSAGE",
            Bytes = 12 => "TYPE_BYTES",
            Uint32 = 13 => "TYPE_UINT32",
            Enum = 14 => "TYPE_ENUM",
            Sfixed32 = 15 => "TYPE_SFIXED32",
            Sfixed64 = 16 => "TYPE_SFIXED64",
            Sint32 = 17 => "TYPE_SINT32",
            Sint64 = 18 => "TYPE_SINT64",
        }
    }

    proto_enum! {
        Label {
            Optional = 1 => "LABEL_OPTIONAL",
            Required = 2 => "LABEL_REQUIRED",
            Repeated = 3 => "LABEL_REPEATED",
        }
    }
}

pub mod file_options {
    use crate::macros::proto_enum;

    proto_enum! {
        OptimizeMode {
            Speed = 1 => "SPEED",
            CodeSize = 2 => "CODE_SIZE",
            LiteRuntime = 3 => "LITE_RUNTIME",
        }
    }
}

pub mod field_options {
    use crate::macros::proto_enum;

    proto_enum! {
        CType {
            String = 0 => "STRING",
            Cord = 1 => "CORD",
            StringPiece = 2 => "STRING_PIECE",
        }
    }

    proto_enum! {
        JsType {
            JsNormal = 0 => "JS_NORMAL",
            JsString = 1 => "JS_STRING",
            JsNumber = 2 => "JS_NUMBER",
        }
    }
}

pub mod method_options {
    use crate::macros::proto_enum;

    proto_enum! {
        IdempotencyLevel {
            IdempotencyUnknown = 0 => "IDEMPOTENCY_UNKNOWN",
            NoSideEffects = 1 => "NO_SIDE_EFFECTS",
            Idempotent = 2 => "IDEMPOTENT",
        }
    }
}

pub use field_descriptor_proto::{Label, Type};

pub(crate) fn register() -> Result<(), FieldValidationError> {
    define_fields(
        &FILE_DESCRIPTOR_SET,
        [("file", Field::message(1, &FILE_DESCRIPTOR_PROTO).repeated())],
    )?;

    define_fields(
        &FILE_DESCRIPTOR_PROTO,
        [
            ("name", Field::string(1)),
            ("package", Field::string(2)),
            ("dependency", Field::string(3).repeated()),
            ("public_dependency", Field::int32(10).repeated()),
            ("weak_dependency", Field::int32(11).repeated()),
            ("message_type", Field::message(4, &DESCRIPTOR_PROTO).repeated()),
            ("enum_type", Field::message(5, &ENUM_DESCRIPTOR_PROTO).repeated()),
            ("service", Field::message(6, &SERVICE_DESCRIPTOR_PROTO).repeated()),
            ("extension", Field::message(7, &FIELD_DESCRIPTOR_PROTO).repeated()),
            ("options", Field::message(8, &FILE_OPTIONS)),
            ("source_code_info", Field::message(9, &SOURCE_CODE_INFO)),
            ("syntax", Field::string(12)),
        ],
    )?;

    define_fields(
        &DESCRIPTOR_PROTO,
        [
            ("name", Field::string(1)),
            ("field", Field::message(2, &FIELD_DESCRIPTOR_PROTO).repeated()),
            ("extension", Field::message(6, &FIELD_DESCRIPTOR_PROTO).repeated()),
            ("nested_type", Field::message(3, &DESCRIPTOR_PROTO).repeated()),
            ("enum_type", Field::message(4, &ENUM_DESCRIPTOR_PROTO).repeated()),
            ("extension_range", Field::message(5, &EXTENSION_RANGE).repeated()),
            ("oneof_decl", Field::message(8, &ONEOF_DESCRIPTOR_PROTO).repeated()),
            ("options", Field::message(7, &MESSAGE_OPTIONS)),
            ("reserved_range", Field::message(9, &RESERVED_RANGE).repeated()),
            ("reserved_name", Field::string(10).repeated()),
        ],
    )?;

    define_fields(
        &EXTENSION_RANGE,
        [
            ("start", Field::int32(1)),
            ("end", Field::int32(2)),
            ("options", Field::message(3, &EXTENSION_RANGE_OPTIONS)),
        ],
    )?;

    define_fields(
        &RESERVED_RANGE,
        [("start", Field::int32(1)), ("end", Field::int32(2))],
    )?;

    define_fields(
        &EXTENSION_RANGE_OPTIONS,
        [(
            "uninterpreted_option",
            Field::message(999, &UNINTERPRETED_OPTION).repeated(),
        )],
    )?;

    define_fields(
        &FIELD_DESCRIPTOR_PROTO,
        [
            ("name", Field::string(1)),
            ("number", Field::int32(3)),
            ("label", Field::enumeration(4, &LABEL_ENUM)),
            ("type", Field::enumeration(5, &TYPE_ENUM)),
            ("type_name", Field::string(6)),
            ("extendee", Field::string(2)),
            ("default_value", Field::string(7)),
            ("oneof_index", Field::int32(9)),
            ("json_name", Field::string(10)),
            ("options", Field::message(8, &FIELD_OPTIONS)),
        ],
    )?;

    define_fields(
        &ONEOF_DESCRIPTOR_PROTO,
        [
            ("name", Field::string(1)),
            ("options", Field::message(2, &ONEOF_OPTIONS)),
        ],
    )?;

    define_fields(
        &ENUM_DESCRIPTOR_PROTO,
        [
            ("name", Field::string(1)),
            ("value", Field::message(2, &ENUM_VALUE_DESCRIPTOR_PROTO).repeated()),
            ("options", Field::message(3, &ENUM_OPTIONS)),
            ("reserved_range", Field::message(4, &ENUM_RESERVED_RANGE).repeated()),
            ("reserved_name", Field::string(5).repeated()),
        ],
    )?;

    define_fields(
        &ENUM_RESERVED_RANGE,
        [("start", Field::int32(1)), ("end", Field::int32(2))],
    )?;

    define_fields(
        &ENUM_VALUE_DESCRIPTOR_PROTO,
        [
            ("name", Field::string(1)),
            ("number", Field::int32(2)),
            ("options", Field::message(3, &ENUM_VALUE_OPTIONS)),
        ],
    )?;

    define_fields(
        &SERVICE_DESCRIPTOR_PROTO,
        [
            ("name", Field::string(1)),
            ("method", Field::message(2, &METHOD_DESCRIPTOR_PROTO).repeated()),
            ("options", Field::message(3, &SERVICE_OPTIONS)),
        ],
    )?;

    define_fields(
        &METHOD_DESCRIPTOR_PROTO,
        [
            ("name", Field::string(1)),
            ("input_type", Field::string(2)),
            ("output_type", Field::string(3)),
            ("options", Field::message(4, &METHOD_OPTIONS)),
            ("client_streaming", Field::bool(5).with_default(false)),
            ("server_streaming", Field::bool(6).with_default(false)),
        ],
    )?;

    define_fields(
        &FILE_OPTIONS,
        [
            ("java_package", Field::string(1)),
            ("java_outer_classname", Field::string(8)),
            ("java_multiple_files", Field::bool(10).with_default(false)),
            ("java_generate_equals_and_hash", Field::bool(20)),
            ("java_string_check_utf8", Field::bool(27).with_default(false)),
            (
                "optimize_for",
                Field::enumeration(9, &OPTIMIZE_MODE_ENUM)
                    .with_default(file_options::OptimizeMode::Speed),
            ),
            ("go_package", Field::string(11)),
            ("cc_generic_services", Field::bool(16).with_default(false)),
            ("java_generic_services", Field::bool(17).with_default(false)),
            ("py_generic_services", Field::bool(18).with_default(false)),
            ("php_generic_services", Field::bool(42).with_default(false)),
            ("deprecated", Field::bool(23).with_default(false)),
            ("cc_enable_arenas", Field::bool(31).with_default(false)),
            ("objc_class_prefix", Field::string(36)),
            ("csharp_namespace", Field::string(37)),
            ("swift_prefix", Field::string(39)),
            ("php_class_prefix", Field::string(40)),
            ("php_namespace", Field::string(41)),
            ("php_metadata_namespace", Field::string(44)),
            ("ruby_package", Field::string(45)),
            (
                "uninterpreted_option",
                Field::message(999, &UNINTERPRETED_OPTION).repeated(),
            ),
        ],
    )?;

    define_fields(
        &MESSAGE_OPTIONS,
        [
            ("message_set_wire_format", Field::bool(1).with_default(false)),
            (
                "no_standard_descriptor_accessor",
                Field::bool(2).with_default(false),
            ),
            ("deprecated", Field::bool(3).with_default(false)),
            ("map_entry", Field::bool(7)),
            (
                "uninterpreted_option",
                Field::message(999, &UNINTERPRETED_OPTION).repeated(),
            ),
        ],
    )?;

    define_fields(
        &FIELD_OPTIONS,
        [
            (
                "ctype",
                Field::enumeration(1, &CTYPE_ENUM).with_default(field_options::CType::String),
            ),
            ("packed", Field::bool(2)),
            (
                "jstype",
                Field::enumeration(6, &JSTYPE_ENUM).with_default(field_options::JsType::JsNormal),
            ),
            ("lazy", Field::bool(5).with_default(false)),
            ("deprecated", Field::bool(3).with_default(false)),
            ("weak", Field::bool(10).with_default(false)),
            (
                "uninterpreted_option",
                Field::message(999, &UNINTERPRETED_OPTION).repeated(),
            ),
        ],
    )?;

    define_fields(
        &ONEOF_OPTIONS,
        [(
            "uninterpreted_option",
            Field::message(999, &UNINTERPRETED_OPTION).repeated(),
        )],
    )?;

    define_fields(
        &ENUM_OPTIONS,
        [
            ("allow_alias", Field::bool(2)),
            ("deprecated", Field::bool(3).with_default(false)),
            (
                "uninterpreted_option",
                Field::message(999, &UNINTERPRETED_OPTION).repeated(),
            ),
        ],
    )?;

    define_fields(
        &ENUM_VALUE_OPTIONS,
        [
            ("deprecated", Field::bool(1).with_default(false)),
            (
                "uninterpreted_option",
                Field::message(999, &UNINTERPRETED_OPTION).repeated(),
            ),
        ],
    )?;

    define_fields(
        &SERVICE_OPTIONS,
        [
            ("deprecated", Field::bool(33).with_default(false)),
            (
                "uninterpreted_option",
                Field::message(999, &UNINTERPRETED_OPTION).repeated(),
            ),
        ],
    )?;

    define_fields(
        &METHOD_OPTIONS,
        [
            ("deprecated", Field::bool(33).with_default(false)),
            (
                "idempotency_level",
                Field::enumeration(34, &IDEMPOTENCY_ENUM)
                    .with_default(method_options::IdempotencyLevel::IdempotencyUnknown),
            ),
            (
                "uninterpreted_option",
                Field::message(999, &UNINTERPRETED_OPTION).repeated(),
            ),
        ],
    )?;

    define_fields(
        &NAME_PART,
        [
            ("name_part", Field::string(1).required()),
            ("is_extension", Field::bool(2).required()),
        ],
    )?;

    define_fields(
        &UNINTERPRETED_OPTION,
        [
            ("name", Field::message(2, &NAME_PART).repeated()),
            ("identifier_value", Field::string(3)),
            ("positive_int_value", Field::uint64(4)),
            ("negative_int_value", Field::int64(5)),
            ("double_value", Field::double(6)),
            ("string_value", Field::bytes(7)),
            ("aggregate_value", Field::string(8)),
        ],
    )?;

    define_fields(
        &LOCATION,
        [
            ("path", Field::int32(1).packed()),
            ("span", Field::int32(2).packed()),
            ("leading_comments", Field::string(3)),
            ("trailing_comments", Field::string(4)),
            ("leading_detached_comments", Field::string(6).repeated()),
        ],
    )?;

    define_fields(
        &SOURCE_CODE_INFO,
        [("location", Field::message(1, &LOCATION).repeated())],
    )?;

    define_fields(
        &ANNOTATION,
        [
            ("path", Field::int32(1).packed()),
            ("source_file", Field::string(2)),
            ("begin", Field::int32(3)),
            ("end", Field::int32(4)),
        ],
    )?;

    define_fields(
        &GENERATED_CODE_INFO,
        [("annotation", Field::message(1, &ANNOTATION).repeated())],
    )?;

    Ok(())
}

message_wrapper! {
    /// A set of complete `.proto` files.
    FileDescriptorSet, FILE_DESCRIPTOR_SET
}

impl FileDescriptorSet {
    pub fn files(&self) -> Vec<FileDescriptorProto> {
        messages_of(&self.msg, "file")
    }

    pub fn add_file(&mut self, file: FileDescriptorProto) {
        push_in(&mut self.msg, "file", file);
    }
}

message_wrapper! {
    /// Describes a complete `.proto` file.
    FileDescriptorProto, FILE_DESCRIPTOR_PROTO
}

impl FileDescriptorProto {
    /// The file name, relative to the root of the source tree.
    pub fn name(&self) -> &str {
        self.msg.get_str("name").unwrap_or("")
    }

    pub fn set_name(&mut self, name: &str) {
        set_in(&mut self.msg, "name", name);
    }

    /// The dotted package, e.g. `"foo"` or `"foo.bar"`.
    pub fn package(&self) -> &str {
        self.msg.get_str("package").unwrap_or("")
    }

    pub fn set_package(&mut self, package: &str) {
        set_in(&mut self.msg, "package", package);
    }

    pub fn syntax(&self) -> &str {
        self.msg.get_str("syntax").unwrap_or("")
    }

    pub fn set_syntax(&mut self, syntax: &str) {
        set_in(&mut self.msg, "syntax", syntax);
    }

    /// Names of the files imported by this file.
    pub fn dependencies(&self) -> Vec<String> {
        strings_of(&self.msg, "dependency")
    }

    pub fn add_dependency(&mut self, name: &str) {
        push_in(&mut self.msg, "dependency", name);
    }

    pub fn messages(&self) -> Vec<DescriptorProto> {
        messages_of(&self.msg, "message_type")
    }

    pub fn add_message(&mut self, message: DescriptorProto) {
        push_in(&mut self.msg, "message_type", message);
    }

    pub fn enums(&self) -> Vec<EnumDescriptorProto> {
        messages_of(&self.msg, "enum_type")
    }

    pub fn add_enum(&mut self, descriptor: EnumDescriptorProto) {
        push_in(&mut self.msg, "enum_type", descriptor);
    }

    pub fn services(&self) -> Vec<ServiceDescriptorProto> {
        messages_of(&self.msg, "service")
    }

    pub fn add_service(&mut self, service: ServiceDescriptorProto) {
        push_in(&mut self.msg, "service", service);
    }

    pub fn options(&self) -> Option<FileOptions> {
        self.msg
            .get_message("options")
            .map(|msg| FileOptions::from(msg.clone()))
    }
}

message_wrapper! {
    /// Describes a message type.
    DescriptorProto, DESCRIPTOR_PROTO
}

impl DescriptorProto {
    pub fn name(&self) -> &str {
        self.msg.get_str("name").unwrap_or("")
    }

    pub fn set_name(&mut self, name: &str) {
        set_in(&mut self.msg, "name", name);
    }

    pub fn fields(&self) -> Vec<FieldDescriptorProto> {
        messages_of(&self.msg, "field")
    }

    pub fn add_field(&mut self, field: FieldDescriptorProto) {
        push_in(&mut self.msg, "field", field);
    }

    pub fn nested_types(&self) -> Vec<DescriptorProto> {
        messages_of(&self.msg, "nested_type")
    }

    pub fn add_nested_type(&mut self, message: DescriptorProto) {
        push_in(&mut self.msg, "nested_type", message);
    }

    pub fn enums(&self) -> Vec<EnumDescriptorProto> {
        messages_of(&self.msg, "enum_type")
    }

    pub fn add_enum(&mut self, descriptor: EnumDescriptorProto) {
        push_in(&mut self.msg, "enum_type", descriptor);
    }

    pub fn oneof_decls(&self) -> Vec<OneofDescriptorProto> {
        messages_of(&self.msg, "oneof_decl")
    }

    pub fn add_oneof_decl(&mut self, decl: OneofDescriptorProto) {
        push_in(&mut self.msg, "oneof_decl", decl);
    }

    pub fn options(&self) -> Option<MessageOptions> {
        self.msg
            .get_message("options")
            .map(|msg| MessageOptions::from(msg.clone()))
    }

    pub fn set_options(&mut self, options: MessageOptions) {
        set_in(&mut self.msg, "options", options);
    }

    /// Whether this message is a synthetic map entry, emitted by the
    /// compiler for each `map<_, _>` field.
    pub fn is_map_entry(&self) -> bool {
        self.options().map(|o| o.map_entry()).unwrap_or(false)
    }
}

pub mod descriptor_proto {
    use super::{EXTENSION_RANGE, RESERVED_RANGE};
    use crate::macros::message_wrapper;
    use crate::set_in;

    message_wrapper! {
        ExtensionRange, EXTENSION_RANGE
    }

    impl ExtensionRange {
        pub fn start(&self) -> i32 {
            self.msg.get_i32("start").unwrap_or(0)
        }

        pub fn end(&self) -> i32 {
            self.msg.get_i32("end").unwrap_or(0)
        }

        pub fn set_start(&mut self, start: i32) {
            set_in(&mut self.msg, "start", start);
        }

        pub fn set_end(&mut self, end: i32) {
            set_in(&mut self.msg, "end", end);
        }
    }

    message_wrapper! {
        ReservedRange, RESERVED_RANGE
    }

    impl ReservedRange {
        pub fn start(&self) -> i32 {
            self.msg.get_i32("start").unwrap_or(0)
        }

        pub fn end(&self) -> i32 {
            self.msg.get_i32("end").unwrap_or(0)
        }
    }
}

message_wrapper! {
    ExtensionRangeOptions, EXTENSION_RANGE_OPTIONS
}

message_wrapper! {
    /// Describes a field within a message.
    FieldDescriptorProto, FIELD_DESCRIPTOR_PROTO
}

impl FieldDescriptorProto {
    pub fn name(&self) -> &str {
        self.msg.get_str("name").unwrap_or("")
    }

    pub fn set_name(&mut self, name: &str) {
        set_in(&mut self.msg, "name", name);
    }

    pub fn number(&self) -> i32 {
        self.msg.get_i32("number").unwrap_or(0)
    }

    pub fn set_number(&mut self, number: i32) {
        set_in(&mut self.msg, "number", number);
    }

    pub fn label(&self) -> Option<Label> {
        self.msg.get_enum("label").and_then(Label::from_i32)
    }

    pub fn set_label(&mut self, label: Label) {
        set_in(&mut self.msg, "label", label);
    }

    pub fn field_type(&self) -> Option<Type> {
        self.msg.get_enum("type").and_then(Type::from_i32)
    }

    pub fn set_field_type(&mut self, ty: Type) {
        set_in(&mut self.msg, "type", ty);
    }

    /// For message and enum fields, the fully qualified name of the type,
    /// with a leading dot.
    pub fn type_name(&self) -> &str {
        self.msg.get_str("type_name").unwrap_or("")
    }

    pub fn set_type_name(&mut self, type_name: &str) {
        set_in(&mut self.msg, "type_name", type_name);
    }

    /// The default, in the textual form `.proto` files use. Empty when no
    /// default is declared.
    pub fn default_value(&self) -> &str {
        self.msg.get_str("default_value").unwrap_or("")
    }

    pub fn set_default_value(&mut self, value: &str) {
        set_in(&mut self.msg, "default_value", value);
    }

    pub fn oneof_index(&self) -> Option<i32> {
        if self.msg.has_field("oneof_index") {
            self.msg.get_i32("oneof_index")
        } else {
            None
        }
    }

    pub fn set_oneof_index(&mut self, index: i32) {
        set_in(&mut self.msg, "oneof_index", index);
    }

    pub fn json_name(&self) -> &str {
        self.msg.get_str("json_name").unwrap_or("")
    }

    pub fn options(&self) -> Option<FieldOptions> {
        self.msg
            .get_message("options")
            .map(|msg| FieldOptions::from(msg.clone()))
    }

    pub fn set_options(&mut self, options: FieldOptions) {
        set_in(&mut self.msg, "options", options);
    }
}

message_wrapper! {
    /// Describes a one-of group.
    OneofDescriptorProto, ONEOF_DESCRIPTOR_PROTO
}

impl OneofDescriptorProto {
    pub fn name(&self) -> &str {
        self.msg.get_str("name").unwrap_or("")
    }

    pub fn set_name(&mut self, name: &str) {
        set_in(&mut self.msg, "name", name);
    }
}

message_wrapper! {
    /// Describes an enum type.
    EnumDescriptorProto, ENUM_DESCRIPTOR_PROTO
}

impl EnumDescriptorProto {
    pub fn name(&self) -> &str {
        self.msg.get_str("name").unwrap_or("")
    }

    pub fn set_name(&mut self, name: &str) {
        set_in(&mut self.msg, "name", name);
    }

    pub fn values(&self) -> Vec<EnumValueDescriptorProto> {
        messages_of(&self.msg, "value")
    }

    pub fn add_value(&mut self, value: EnumValueDescriptorProto) {
        push_in(&mut self.msg, "value", value);
    }
}

pub mod enum_descriptor_proto {
    use super::ENUM_RESERVED_RANGE;
    use crate::macros::message_wrapper;

    message_wrapper! {
        EnumReservedRange, ENUM_RESERVED_RANGE
    }

    impl EnumReservedRange {
        pub fn start(&self) -> i32 {
            self.msg.get_i32("start").unwrap_or(0)
        }

        pub fn end(&self) -> i32 {
            self.msg.get_i32("end").unwrap_or(0)
        }
    }
}

message_wrapper! {
    /// Describes a value within an enum.
    EnumValueDescriptorProto, ENUM_VALUE_DESCRIPTOR_PROTO
}

impl EnumValueDescriptorProto {
    pub fn name(&self) -> &str {
        self.msg.get_str("name").unwrap_or("")
    }

    pub fn set_name(&mut self, name: &str) {
        set_in(&mut self.msg, "name", name);
    }

    pub fn number(&self) -> i32 {
        self.msg.get_i32("number").unwrap_or(0)
    }

    pub fn set_number(&mut self, number: i32) {
        set_in(&mut self.msg, "number", number);
    }
}

message_wrapper! {
    /// Describes a service.
    ServiceDescriptorProto, SERVICE_DESCRIPTOR_PROTO
}

impl ServiceDescriptorProto {
    pub fn name(&self) -> &str {
        self.msg.get_str("name").unwrap_or("")
    }

    pub fn set_name(&mut self, name: &str) {
        set_in(&mut self.msg, "name", name);
    }

    pub fn methods(&self) -> Vec<MethodDescriptorProto> {
        messages_of(&self.msg, "method")
    }

    pub fn add_method(&mut self, method: MethodDescriptorProto) {
        push_in(&mut self.msg, "method", method);
    }
}

message_wrapper! {
    /// Describes one method of a service.
    MethodDescriptorProto, METHOD_DESCRIPTOR_PROTO
}

impl MethodDescriptorProto {
    pub fn name(&self) -> &str {
        self.msg.get_str("name").unwrap_or("")
    }

    pub fn set_name(&mut self, name: &str) {
        set_in(&mut self.msg, "name", name);
    }

    /// Fully qualified request type name, with a leading dot.
    pub fn input_type(&self) -> &str {
        self.msg.get_str("input_type").unwrap_or("")
    }

    pub fn set_input_type(&mut self, name: &str) {
        set_in(&mut self.msg, "input_type", name);
    }

    /// Fully qualified response type name, with a leading dot.
    pub fn output_type(&self) -> &str {
        self.msg.get_str("output_type").unwrap_or("")
    }

    pub fn set_output_type(&mut self, name: &str) {
        set_in(&mut self.msg, "output_type", name);
    }

    pub fn client_streaming(&self) -> bool {
        self.msg.get_bool("client_streaming").unwrap_or(false)
    }

    pub fn set_client_streaming(&mut self, streaming: bool) {
        set_in(&mut self.msg, "client_streaming", streaming);
    }

    pub fn server_streaming(&self) -> bool {
        self.msg.get_bool("server_streaming").unwrap_or(false)
    }

    pub fn set_server_streaming(&mut self, streaming: bool) {
        set_in(&mut self.msg, "server_streaming", streaming);
    }
}

message_wrapper! {
    FileOptions, FILE_OPTIONS
}

impl FileOptions {
    pub fn java_package(&self) -> &str {
        self.msg.get_str("java_package").unwrap_or("")
    }

    pub fn deprecated(&self) -> bool {
        self.msg.get_bool("deprecated").unwrap_or(false)
    }

    pub fn optimize_for(&self) -> file_options::OptimizeMode {
        self.msg
            .get_enum("optimize_for")
            .and_then(file_options::OptimizeMode::from_i32)
            .unwrap_or(file_options::OptimizeMode::Speed)
    }
}

message_wrapper! {
    MessageOptions, MESSAGE_OPTIONS
}

impl MessageOptions {
    /// Set on the synthetic entry messages the compiler generates for map
    /// fields.
    pub fn map_entry(&self) -> bool {
        self.msg.get_bool("map_entry").unwrap_or(false)
    }

    pub fn set_map_entry(&mut self, map_entry: bool) {
        set_in(&mut self.msg, "map_entry", map_entry);
    }
}

message_wrapper! {
    FieldOptions, FIELD_OPTIONS
}

impl FieldOptions {
    pub fn packed(&self) -> bool {
        self.msg.get_bool("packed").unwrap_or(false)
    }

    pub fn set_packed(&mut self, packed: bool) {
        set_in(&mut self.msg, "packed", packed);
    }

    pub fn deprecated(&self) -> bool {
        self.msg.get_bool("deprecated").unwrap_or(false)
    }
}

message_wrapper! {
    OneofOptions, ONEOF_OPTIONS
}

message_wrapper! {
    EnumOptions, ENUM_OPTIONS
}

message_wrapper! {
    EnumValueOptions, ENUM_VALUE_OPTIONS
}

message_wrapper! {
    ServiceOptions, SERVICE_OPTIONS
}

message_wrapper! {
    MethodOptions, METHOD_OPTIONS
}

message_wrapper! {
    /// An option the compiler left uninterpreted, preserved for plugins that
    /// understand it.
    UninterpretedOption, UNINTERPRETED_OPTION
}

impl UninterpretedOption {
    pub fn identifier_value(&self) -> &str {
        self.msg.get_str("identifier_value").unwrap_or("")
    }
}

pub mod uninterpreted_option {
    use super::NAME_PART;
    use crate::macros::message_wrapper;

    message_wrapper! {
        NamePart, NAME_PART
    }

    impl NamePart {
        pub fn name_part(&self) -> &str {
            self.msg.get_str("name_part").unwrap_or("")
        }

        pub fn is_extension(&self) -> bool {
            self.msg.get_bool("is_extension").unwrap_or(false)
        }
    }
}

message_wrapper! {
    /// Source locations for the declarations of a file.
    SourceCodeInfo, SOURCE_CODE_INFO
}

impl SourceCodeInfo {
    pub fn locations(&self) -> Vec<source_code_info::Location> {
        messages_of(&self.msg, "location")
    }
}

pub mod source_code_info {
    use super::LOCATION;
    use crate::macros::message_wrapper;

    message_wrapper! {
        Location, LOCATION
    }

    impl Location {
        pub fn leading_comments(&self) -> &str {
            self.msg.get_str("leading_comments").unwrap_or("")
        }

        pub fn trailing_comments(&self) -> &str {
            self.msg.get_str("trailing_comments").unwrap_or("")
        }
    }
}

message_wrapper! {
    /// Maps generated code back to the source that produced it.
    GeneratedCodeInfo, GENERATED_CODE_INFO
}

impl GeneratedCodeInfo {
    pub fn annotations(&self) -> Vec<generated_code_info::Annotation> {
        messages_of(&self.msg, "annotation")
    }
}

pub mod generated_code_info {
    use super::ANNOTATION;
    use crate::macros::message_wrapper;

    message_wrapper! {
        Annotation, ANNOTATION
    }

    impl Annotation {
        pub fn source_file(&self) -> &str {
            self.msg.get_str("source_file").unwrap_or("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> FileDescriptorProto {
        let mut field = FieldDescriptorProto::new();
        field.set_name("id");
        field.set_number(1);
        field.set_label(Label::Optional);
        field.set_field_type(Type::Uint32);

        let mut message = DescriptorProto::new();
        message.set_name("User");
        message.add_field(field);

        let mut file = FileDescriptorProto::new();
        file.set_name("user.proto");
        file.set_package("acme");
        file.set_syntax("proto3");
        file.add_message(message);
        file
    }

    #[test]
    fn descriptor_roundtrip() {
        let file = sample_file();
        let bytes = file.to_bytes().unwrap();
        let decoded = FileDescriptorProto::from_bytes(&bytes).unwrap();

        assert_eq!(decoded, file);
        assert_eq!(decoded.name(), "user.proto");
        assert_eq!(decoded.package(), "acme");

        let messages = decoded.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].name(), "User");

        let fields = messages[0].fields();
        assert_eq!(fields[0].name(), "id");
        assert_eq!(fields[0].number(), 1);
        assert_eq!(fields[0].label(), Some(Label::Optional));
        assert_eq!(fields[0].field_type(), Some(Type::Uint32));
    }

    #[test]
    fn file_descriptor_set_roundtrip() {
        let mut set = FileDescriptorSet::new();
        set.add_file(sample_file());

        let decoded = FileDescriptorSet::from_bytes(&set.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.files().len(), 1);
        assert_eq!(decoded.files()[0].name(), "user.proto");
    }

    #[test]
    fn map_entry_flag() {
        let mut options = MessageOptions::new();
        options.set_map_entry(true);

        let mut entry = DescriptorProto::new();
        entry.set_name("XsEntry");
        entry.set_options(options);

        assert!(entry.is_map_entry());
        assert!(!DescriptorProto::new().is_map_entry());
    }

    #[test]
    fn oneof_index_presence() {
        let mut field = FieldDescriptorProto::new();
        assert_eq!(field.oneof_index(), None);

        field.set_oneof_index(0);
        assert_eq!(field.oneof_index(), Some(0));
    }

    #[test]
    fn method_streaming_defaults() {
        let method = MethodDescriptorProto::new();
        assert!(!method.client_streaming());
        assert!(!method.server_streaming());
    }

    #[test]
    fn label_and_type_ordinals() {
        assert_eq!(Label::from_i32(2), Some(Label::Required));
        assert_eq!(Type::from_i32(18), Some(Type::Sint64));
        assert_eq!(Type::from_i32(19), None);
        assert_eq!(Type::Message.proto_name(), "TYPE_MESSAGE");
    }
}
