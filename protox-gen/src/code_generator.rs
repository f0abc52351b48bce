//! Emits one Rust module per `.proto` file: enum declarations, message
//! declarations, and the deferred field-registration block that wires
//! mutually recursive messages together after every type exists.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;

use itertools::Itertools;
use log::debug;
use multimap::MultiMap;
use protox_types::compiler::code_generator_response;
use protox_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto, Label, Type,
};

use crate::buffer::CodeBuffer;
use crate::ident::{to_shouty, to_snake, to_upper_camel, FieldMangler};
use crate::index::Index;
use crate::{GeneratorError, Params, PROTOBUF_FILE_SUFFIX};

pub(crate) fn is_repeated(field: &FieldDescriptorProto) -> bool {
    field.label() == Some(Label::Repeated)
}

pub(crate) fn is_required(field: &FieldDescriptorProto) -> bool {
    field.label() == Some(Label::Required)
}

pub(crate) fn is_message_field(field: &FieldDescriptorProto) -> bool {
    field.field_type() == Some(Type::Message)
}

pub(crate) fn is_enum_field(field: &FieldDescriptorProto) -> bool {
    field.field_type() == Some(Type::Enum)
}

pub(crate) fn is_group_field(field: &FieldDescriptorProto) -> bool {
    field.field_type() == Some(Type::Group)
}

pub(crate) fn is_well_known_type(type_name: &str) -> bool {
    type_name.starts_with(".google.protobuf")
}

/// `a/b/c.proto` to `a/b/c`, with dashes cleaned for module paths.
pub(crate) fn file_stem(file_name: &str) -> String {
    file_name
        .trim()
        .trim_end_matches(".proto")
        .replace('-', "_")
}

/// The import alias of a generated module: `a/b/c.proto` to `a__b__c_pb`.
pub(crate) fn file_alias(file_name: &str) -> String {
    format!("{}{}", file_stem(file_name).replace('/', "__"), PROTOBUF_FILE_SUFFIX)
}

/// The crate-rooted module path of a generated module, honoring the
/// configured base package.
pub(crate) fn module_path(file_name: &str, base_package: &str) -> String {
    let mut segments = vec!["crate".to_string()];
    if !base_package.is_empty() {
        for part in base_package.split('/') {
            segments.push(part.replace('-', "_").replace('.', "::"));
        }
    }
    let stem = file_stem(file_name);
    let mut parts = stem.split('/').peekable();
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            segments.push(format!("{part}{PROTOBUF_FILE_SUFFIX}"));
        } else {
            segments.push(part.to_string());
        }
    }
    segments.join("::")
}

/// The emitted file name for `file_name` with the given suffix, e.g.
/// `a/b/c.proto` to `a/b/c_pb.rs`, under the base package when set.
pub(crate) fn output_name(file_name: &str, suffix: &str, base_package: &str) -> String {
    let name = format!("{}{suffix}.rs", file_stem(file_name));
    if base_package.is_empty() {
        name
    } else {
        format!("{base_package}/{name}")
    }
}

/// Groups a message's fields into its one-of declarations, in declaration
/// order. Fields outside any group are returned separately.
pub(crate) fn collect_one_ofs(
    message: &DescriptorProto,
) -> (Vec<(String, Vec<FieldDescriptorProto>)>, Vec<FieldDescriptorProto>) {
    let (plain, grouped): (Vec<_>, MultiMap<i32, FieldDescriptorProto>) = message
        .fields()
        .into_iter()
        .partition_map(|field| match field.oneof_index() {
            Some(index) => itertools::Either::Right((index, field)),
            None => itertools::Either::Left(field),
        });

    let one_ofs = message
        .oneof_decls()
        .iter()
        .enumerate()
        .filter_map(|(index, decl)| {
            grouped
                .get_vec(&(index as i32))
                .map(|fields| (decl.name().to_string(), fields.clone()))
        })
        .collect();

    (one_ofs, plain)
}

/// Escapes arbitrary bytes into a Rust `b"..."` literal body.
fn bytes_literal(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 4 + 3);
    out.push_str("b\"");
    for &byte in data {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b' '..=b'~' => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\x{byte:02x}");
            }
        }
    }
    out.push('"');
    out
}

fn str_literal(text: &str) -> String {
    format!("{text:?}")
}

fn scalar_kind_ident(ty: Type) -> Option<&'static str> {
    match ty {
        Type::Double => Some("Double"),
        Type::Float => Some("Float"),
        Type::Int64 => Some("Int64"),
        Type::Uint64 => Some("UInt64"),
        Type::Int32 => Some("Int32"),
        Type::Fixed64 => Some("Fixed64"),
        Type::Fixed32 => Some("Fixed32"),
        Type::Bool => Some("Bool"),
        Type::String => Some("String"),
        Type::Bytes => Some("Bytes"),
        Type::Uint32 => Some("UInt32"),
        Type::Sfixed32 => Some("SFixed32"),
        Type::Sfixed64 => Some("SFixed64"),
        Type::Sint32 => Some("SInt32"),
        Type::Sint64 => Some("SInt64"),
        Type::Group | Type::Message | Type::Enum => None,
    }
}

fn field_constructor(ty: Type) -> Option<&'static str> {
    match ty {
        Type::Double => Some("double"),
        Type::Float => Some("float"),
        Type::Int64 => Some("int64"),
        Type::Uint64 => Some("uint64"),
        Type::Int32 => Some("int32"),
        Type::Fixed64 => Some("fixed64"),
        Type::Fixed32 => Some("fixed32"),
        Type::Bool => Some("bool"),
        Type::String => Some("string"),
        Type::Bytes => Some("bytes"),
        Type::Uint32 => Some("uint32"),
        Type::Sfixed32 => Some("sfixed32"),
        Type::Sfixed64 => Some("sfixed64"),
        Type::Sint32 => Some("sint32"),
        Type::Sint64 => Some("sint64"),
        Type::Group | Type::Message | Type::Enum => None,
    }
}

/// The literal a proto3 singular field defaults to when unset.
fn zero_literal(ty: Type) -> Option<&'static str> {
    match ty {
        Type::Double => Some("0f64"),
        Type::Float => Some("0f32"),
        Type::Int64 | Type::Sfixed64 | Type::Sint64 => Some("0i64"),
        Type::Uint64 | Type::Fixed64 => Some("0u64"),
        Type::Int32 | Type::Sfixed32 | Type::Sint32 => Some("0i32"),
        Type::Uint32 | Type::Fixed32 => Some("0u32"),
        Type::Bool => Some("false"),
        Type::String => Some("\"\""),
        Type::Bytes => Some("Vec::<u8>::new()"),
        Type::Enum => Some("protox::Value::Enum(0)"),
        Type::Group | Type::Message => None,
    }
}

fn int_suffix(ty: Type) -> &'static str {
    match ty {
        Type::Int64 | Type::Sfixed64 | Type::Sint64 => "i64",
        Type::Uint64 | Type::Fixed64 => "u64",
        Type::Uint32 | Type::Fixed32 => "u32",
        _ => "i32",
    }
}

/// The Rust type and `Message` getter serving a copyable scalar.
fn scalar_accessor(ty: Type) -> Option<(&'static str, &'static str)> {
    match ty {
        Type::Double => Some(("f64", "get_f64")),
        Type::Float => Some(("f32", "get_f32")),
        Type::Int64 | Type::Sfixed64 | Type::Sint64 => Some(("i64", "get_i64")),
        Type::Uint64 | Type::Fixed64 => Some(("u64", "get_u64")),
        Type::Int32 | Type::Sfixed32 | Type::Sint32 => Some(("i32", "get_i32")),
        Type::Uint32 | Type::Fixed32 => Some(("u32", "get_u32")),
        Type::Bool => Some(("bool", "get_bool")),
        _ => None,
    }
}

pub(crate) struct CodeGenerator<'a> {
    file: &'a FileDescriptorProto,
    index: &'a Index,
    params: &'a Params,
    import_requests: BTreeMap<String, FileDescriptorProto>,
    manglers: BTreeMap<String, FieldMangler>,
}

impl<'a> CodeGenerator<'a> {
    pub(crate) fn new(
        file: &'a FileDescriptorProto,
        index: &'a Index,
        params: &'a Params,
    ) -> CodeGenerator<'a> {
        CodeGenerator {
            file,
            index,
            params,
            import_requests: BTreeMap::new(),
            manglers: BTreeMap::new(),
        }
    }

    pub(crate) fn is_proto3(&self) -> bool {
        self.file.syntax() == "proto3"
    }

    /// A file with no messages and no enums produces no bindings module.
    pub(crate) fn is_empty(&self) -> bool {
        self.file.messages().is_empty() && self.file.enums().is_empty()
    }

    /// The registered name of a field, mangled under the `snake-case`
    /// option.
    fn field_name(&mut self, message: &DescriptorProto, field: &FieldDescriptorProto) -> String {
        if !self.params.snake_case {
            return field.name().to_string();
        }
        let mangler = self
            .manglers
            .entry(message.name().to_string())
            .or_insert_with(|| FieldMangler::new(message));
        mangler.get(field.name()).to_string()
    }

    fn is_local_type(&self, type_name: &str) -> bool {
        self.index
            .file_of(type_name)
            .map(|file| file.name() == self.file.name())
            .unwrap_or(false)
    }

    /// The path of a type relative to its file's package, split into
    /// segments, e.g. `.pkg.Outer.Inner` in package `pkg` yields
    /// `["Outer", "Inner"]`.
    fn relative_segments(type_name: &str, package: &str) -> Vec<String> {
        let stripped = type_name.strip_prefix('.').unwrap_or(type_name);
        let stripped = if package.is_empty() {
            stripped
        } else {
            stripped
                .strip_prefix(package)
                .map(|rest| rest.strip_prefix('.').unwrap_or(rest))
                .unwrap_or(stripped)
        };
        stripped.split('.').map(str::to_string).collect()
    }

    /// The `mod::mod::TAIL` path of a type's static within its module.
    fn static_path(segments: &[String]) -> String {
        let mut parts: Vec<String> = segments[..segments.len() - 1]
            .iter()
            .map(|part| to_snake(part))
            .collect();
        parts.push(to_shouty(segments.last().map(String::as_str).unwrap_or("")));
        parts.join("::")
    }

    /// The `mod::mod::accessor()` path of a message's accessor function.
    fn accessor_path(segments: &[String]) -> String {
        let mut parts: Vec<String> = segments[..segments.len() - 1]
            .iter()
            .map(|part| to_snake(part))
            .collect();
        parts.push(format!(
            "{}()",
            to_snake(segments.last().map(String::as_str).unwrap_or(""))
        ));
        parts.join("::")
    }

    fn request_import(&mut self, file: &FileDescriptorProto) -> String {
        let alias = file_alias(file.name());
        self.import_requests.insert(file.name().to_string(), file.clone());
        alias
    }

    /// An expression yielding `&'static MessageType` for the message named
    /// by `type_name`.
    fn message_handle(&mut self, type_name: &str, context: &str) -> Result<String, GeneratorError> {
        if is_well_known_type(type_name) {
            let simple = type_name.rsplit('.').next().unwrap_or(type_name);
            return Ok(format!("protox_types::{simple}::message_type()"));
        }

        let file = match self.index.file_of(type_name) {
            Some(file) => file.clone(),
            None => {
                return Err(GeneratorError::UnknownType {
                    type_name: type_name.to_string(),
                    context: context.to_string(),
                })
            }
        };

        let segments = Self::relative_segments(type_name, file.package());
        if self.is_local_type(type_name) {
            // Local types are referenced through their statics so the
            // registration block can run before any accessor is touched.
            Ok(format!("&{}", Self::static_path(&segments)))
        } else {
            let alias = self.request_import(&file);
            Ok(format!("{alias}::{}", Self::accessor_path(&segments)))
        }
    }

    /// An expression yielding `&EnumType` for the enum named by `type_name`.
    fn enum_handle(&mut self, type_name: &str, context: &str) -> Result<String, GeneratorError> {
        if is_well_known_type(type_name) {
            return Err(GeneratorError::UnknownType {
                type_name: type_name.to_string(),
                context: context.to_string(),
            });
        }

        let file = match self.index.file_of(type_name) {
            Some(file) => file.clone(),
            None => {
                return Err(GeneratorError::UnknownType {
                    type_name: type_name.to_string(),
                    context: context.to_string(),
                })
            }
        };

        let segments = Self::relative_segments(type_name, file.package());
        if self.is_local_type(type_name) {
            Ok(format!("&{}", Self::static_path(&segments)))
        } else {
            let alias = self.request_import(&file);
            Ok(format!("&{alias}::{}", Self::static_path(&segments)))
        }
    }

    /// The Rust path of a type's generated declaration (enum or wrapper
    /// struct), relative to the emitting file's root module.
    fn rust_type_path(&mut self, type_name: &str) -> Result<String, GeneratorError> {
        let file = match self.index.file_of(type_name) {
            Some(file) => file.clone(),
            None => {
                return Err(GeneratorError::UnknownType {
                    type_name: type_name.to_string(),
                    context: "type path".to_string(),
                })
            }
        };

        let segments = Self::relative_segments(type_name, file.package());
        let mut parts: Vec<String> = segments[..segments.len() - 1]
            .iter()
            .map(|part| to_snake(part))
            .collect();
        parts.push(to_upper_camel(
            segments.last().map(String::as_str).unwrap_or(""),
        ));
        let path = parts.join("::");

        if self.is_local_type(type_name) {
            Ok(path)
        } else {
            let alias = self.request_import(&file);
            Ok(format!("{alias}::{path}"))
        }
    }

    fn is_map_field(&self, field: &FieldDescriptorProto) -> bool {
        is_message_field(field) && is_repeated(field) && self.index.is_map_entry(field.type_name())
    }

    /// A `FieldType` expression for one half of a map entry.
    fn field_type_expr(&mut self, field: &FieldDescriptorProto) -> Result<String, GeneratorError> {
        if is_message_field(field) {
            let handle = self.message_handle(field.type_name(), field.name())?;
            Ok(format!("FieldType::message({handle})"))
        } else if is_enum_field(field) {
            let handle = self.enum_handle(field.type_name(), field.name())?;
            Ok(format!("FieldType::enumeration({handle})"))
        } else if is_group_field(field) {
            Err(GeneratorError::GroupsUnsupported)
        } else {
            let kind = field
                .field_type()
                .and_then(scalar_kind_ident)
                .ok_or(GeneratorError::GroupsUnsupported)?;
            Ok(format!("FieldType::Scalar(ScalarKind::{kind})"))
        }
    }

    /// The default literal for a proto2 textual default value.
    fn default_literal(
        &mut self,
        field: &FieldDescriptorProto,
    ) -> Result<String, GeneratorError> {
        let text = field.default_value();
        let literal = match field.field_type() {
            Some(Type::String) => str_literal(text),
            Some(Type::Bytes) => format!("{}.to_vec()", bytes_literal(text.as_bytes())),
            Some(Type::Bool) => text.to_string(),
            Some(Type::Float) => format!("{text}f32"),
            Some(Type::Double) => format!("{text}f64"),
            Some(Type::Enum) => {
                let path = self.rust_type_path(field.type_name())?;
                format!("{path}::{}", to_upper_camel(text))
            }
            Some(ty) => format!("{text}{}", int_suffix(ty)),
            None => text.to_string(),
        };
        Ok(literal)
    }

    /// The full `Field` expression registered for `field`.
    fn field_expr(
        &mut self,
        field: &FieldDescriptorProto,
        in_one_of: bool,
    ) -> Result<String, GeneratorError> {
        if is_group_field(field) {
            return Err(GeneratorError::GroupsUnsupported);
        }

        let number = field.number();

        if self.is_map_field(field) {
            let entry = match self.index.message(field.type_name()) {
                Some(entry) => entry.clone(),
                None => {
                    return Err(GeneratorError::UnknownType {
                        type_name: field.type_name().to_string(),
                        context: field.name().to_string(),
                    })
                }
            };
            let fields = entry.fields();
            let key_kind = fields
                .first()
                .and_then(|key| key.field_type())
                .and_then(scalar_kind_ident)
                .ok_or_else(|| GeneratorError::UnknownType {
                    type_name: field.type_name().to_string(),
                    context: field.name().to_string(),
                })?;
            let value_expr = match fields.get(1) {
                Some(value) => self.field_type_expr(value)?,
                None => {
                    return Err(GeneratorError::UnknownType {
                        type_name: field.type_name().to_string(),
                        context: field.name().to_string(),
                    })
                }
            };
            return Ok(format!(
                "Field::map({number}, ScalarKind::{key_kind}, {value_expr})"
            ));
        }

        let mut expr = if is_message_field(field) {
            let handle = self.message_handle(field.type_name(), field.name())?;
            format!("Field::message({number}, {handle})")
        } else if is_enum_field(field) {
            let handle = self.enum_handle(field.type_name(), field.name())?;
            format!("Field::enumeration({number}, {handle})")
        } else {
            let constructor = field
                .field_type()
                .and_then(field_constructor)
                .ok_or(GeneratorError::GroupsUnsupported)?;
            format!("Field::{constructor}({number})")
        };

        if is_repeated(field) {
            expr.push_str(".repeated()");
            if field.options().map(|options| options.packed()).unwrap_or(false) {
                expr.push_str(".packed()");
            }
            return Ok(expr);
        }

        if is_required(field) {
            expr.push_str(".required()");
        }

        if !field.default_value().is_empty() {
            let literal = self.default_literal(field)?;
            let _ = write!(expr, ".with_default({literal})");
        } else if self.is_proto3() && !in_one_of && !is_message_field(field) {
            // Proto3 singular scalars read as implicitly present with the
            // type's zero value; one-of members keep real absence.
            if let Some(zero) = field.field_type().and_then(zero_literal) {
                let _ = write!(expr, ".with_default({zero})");
            }
        }

        Ok(expr)
    }

    /// The typed accessor methods of a message's wrapper struct, as
    /// `(signature, body)` pairs. Singular fields get typed getters and
    /// setters; collections hand out the runtime's validated views.
    fn accessor_methods(
        &mut self,
        message: &DescriptorProto,
        depth: usize,
    ) -> Result<Vec<(String, String)>, GeneratorError> {
        let supers = "super::".repeat(depth);
        let mut used: HashSet<String> = [
            "new",
            "from_bytes",
            "to_bytes",
            "as_message",
            "as_message_mut",
            "message_type",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();
        let mut methods = Vec::new();

        for field in &message.fields() {
            if is_group_field(field) {
                // Surfaces as an error when the field registers.
                continue;
            }

            let registered = self.field_name(message, field);
            let name_literal = str_literal(&registered);
            let mut fn_name = to_snake(&registered);
            while used.contains(&fn_name) {
                fn_name.push('_');
            }
            used.insert(fn_name.clone());

            if self.is_map_field(field) {
                methods.push((
                    format!(
                        "pub fn {fn_name}(&self) -> &std::collections::BTreeMap<protox::MapKey, protox::Value> {{"
                    ),
                    format!("self.msg.map({name_literal})"),
                ));
                methods.push((
                    format!("pub fn {fn_name}_mut(&mut self) -> protox::MapMut<'_> {{"),
                    format!("self.msg.map_mut({name_literal})"),
                ));
                continue;
            }
            if is_repeated(field) {
                methods.push((
                    format!("pub fn {fn_name}(&self) -> &[protox::Value] {{"),
                    format!("self.msg.repeated({name_literal})"),
                ));
                methods.push((
                    format!("pub fn {fn_name}_mut(&mut self) -> protox::ListMut<'_> {{"),
                    format!("self.msg.repeated_mut({name_literal})"),
                ));
                continue;
            }

            if is_message_field(field) {
                let path = if is_well_known_type(field.type_name()) {
                    let simple = field.type_name().rsplit('.').next().unwrap_or_default();
                    format!("protox_types::{simple}")
                } else {
                    format!("{supers}{}", self.rust_type_path(field.type_name())?)
                };
                methods.push((
                    format!("pub fn {fn_name}(&self) -> Option<{path}> {{"),
                    format!(
                        "self.msg.get_message({name_literal}).map(|m| {path}::from(m.clone()))"
                    ),
                ));
                methods.push((
                    format!("pub fn set_{fn_name}(&mut self, value: {path}) {{"),
                    format!(
                        "self.msg.set({name_literal}, value).expect(\"value matches the declared field type\");"
                    ),
                ));
            } else if is_enum_field(field) {
                let path = format!("{supers}{}", self.rust_type_path(field.type_name())?);
                methods.push((
                    format!("pub fn {fn_name}(&self) -> Option<{path}> {{"),
                    format!("self.msg.get_enum({name_literal}).and_then({path}::from_i32)"),
                ));
                methods.push((
                    format!("pub fn set_{fn_name}(&mut self, value: {path}) {{"),
                    format!(
                        "self.msg.set({name_literal}, value).expect(\"value matches the declared field type\");"
                    ),
                ));
            } else if field.field_type() == Some(Type::String) {
                methods.push((
                    format!("pub fn {fn_name}(&self) -> Option<&str> {{"),
                    format!("self.msg.get_str({name_literal})"),
                ));
                methods.push((
                    format!("pub fn set_{fn_name}(&mut self, value: &str) {{"),
                    format!(
                        "self.msg.set({name_literal}, value).expect(\"value matches the declared field type\");"
                    ),
                ));
            } else if field.field_type() == Some(Type::Bytes) {
                methods.push((
                    format!("pub fn {fn_name}(&self) -> Option<&bytes::Bytes> {{"),
                    format!("self.msg.get_bytes({name_literal})"),
                ));
                methods.push((
                    format!("pub fn set_{fn_name}(&mut self, value: impl Into<bytes::Bytes>) {{"),
                    format!(
                        "self.msg.set({name_literal}, value.into()).expect(\"value matches the declared field type\");"
                    ),
                ));
            } else if let Some((rust_ty, getter)) = field.field_type().and_then(scalar_accessor) {
                methods.push((
                    format!("pub fn {fn_name}(&self) -> Option<{rust_ty}> {{"),
                    format!("self.msg.{getter}({name_literal})"),
                ));
                methods.push((
                    format!("pub fn set_{fn_name}(&mut self, value: {rust_ty}) {{"),
                    format!(
                        "self.msg.set({name_literal}, value).expect(\"value matches the declared field type\");"
                    ),
                ));
            }
        }

        Ok(methods)
    }

    fn write_enum(&mut self, buf: &mut CodeBuffer, descriptor: &EnumDescriptorProto) {
        let rust_name = to_upper_camel(descriptor.name());
        let values = descriptor.values();

        buf.line("#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]");
        buf.line("#[repr(i32)]");
        buf.block(&format!("pub enum {rust_name} {{"), "}", |buf| {
            for value in &values {
                buf.line(&format!(
                    "{} = {},",
                    to_upper_camel(value.name()),
                    value.number()
                ));
            }
        });
        buf.blank();

        buf.block(&format!("impl {rust_name} {{"), "}", |buf| {
            buf.block(
                &format!("pub fn from_i32(value: i32) -> Option<{rust_name}> {{"),
                "}",
                |buf| {
                    buf.block("match value {", "}", |buf| {
                        for value in &values {
                            buf.line(&format!(
                                "{} => Some({rust_name}::{}),",
                                value.number(),
                                to_upper_camel(value.name())
                            ));
                        }
                        buf.line("_ => None,");
                    });
                },
            );
        });
        buf.blank();

        buf.block(
            &format!("impl From<{rust_name}> for protox::Value {{"),
            "}",
            |buf| {
                buf.block(
                    &format!("fn from(value: {rust_name}) -> protox::Value {{"),
                    "}",
                    |buf| {
                        buf.line("protox::Value::Enum(value as i32)");
                    },
                );
            },
        );
        buf.blank();

        buf.line(&format!(
            "pub static {}: Lazy<EnumType> = Lazy::new(|| {{",
            to_shouty(descriptor.name())
        ));
        buf.indent();
        buf.block(
            &format!("EnumType::new({}, &[", str_literal(descriptor.name())),
            "])",
            |buf| {
                for value in &values {
                    buf.line(&format!(
                        "({}, {}),",
                        str_literal(value.name()),
                        value.number()
                    ));
                }
            },
        );
        buf.dedent();
        buf.line("});");
        buf.blank();
    }

    /// Emits the struct, statics and accessor for one message, recursing
    /// into a nested module for its nested declarations. `path` is the
    /// dotted type path relative to the file, `depth` the module depth.
    fn write_message(
        &mut self,
        buf: &mut CodeBuffer,
        message: &DescriptorProto,
        path: &str,
        depth: usize,
    ) -> Result<(), GeneratorError> {
        debug!("  message: {:?}", message.name());

        let proto_name = message.name().to_string();
        let rust_name = to_upper_camel(&proto_name);
        let static_name = to_shouty(&proto_name);
        let accessor = to_snake(&proto_name);
        let full_path = if path.is_empty() {
            proto_name.clone()
        } else {
            format!("{path}.{proto_name}")
        };
        let qualified = if self.file.package().is_empty() {
            full_path.clone()
        } else {
            format!("{}.{full_path}", self.file.package())
        };

        let accessors = self.accessor_methods(message, depth)?;

        // Type declaration.
        buf.line("#[derive(Clone, Debug, PartialEq)]");
        buf.block(&format!("pub struct {rust_name} {{"), "}", |buf| {
            buf.line("msg: protox::Message,");
        });
        buf.blank();

        buf.block(&format!("impl {rust_name} {{"), "}", |buf| {
            buf.line("/// The runtime descriptor shared by every instance.");
            buf.block(
                "pub fn message_type() -> &'static MessageType {",
                "}",
                |buf| {
                    buf.line(&format!("{accessor}()"));
                },
            );
            buf.blank();
            buf.block(&format!("pub fn new() -> {rust_name} {{"), "}", |buf| {
                buf.line(&format!(
                    "{rust_name} {{ msg: protox::Message::new({accessor}()) }}"
                ));
            });
            buf.blank();
            buf.block(
                &format!(
                    "pub fn from_bytes(data: &[u8]) -> Result<{rust_name}, protox::DecodeError> {{"
                ),
                "}",
                |buf| {
                    buf.line(&format!(
                        "Ok({rust_name} {{ msg: {accessor}().from_bytes(data)? }})"
                    ));
                },
            );
            buf.blank();
            buf.block(
                "pub fn to_bytes(&self) -> Result<bytes::Bytes, protox::EncodeError> {",
                "}",
                |buf| {
                    buf.line("self.msg.to_bytes()");
                },
            );
            buf.blank();
            buf.block("pub fn as_message(&self) -> &protox::Message {", "}", |buf| {
                buf.line("&self.msg");
            });
            buf.blank();
            buf.block(
                "pub fn as_message_mut(&mut self) -> &mut protox::Message {",
                "}",
                |buf| {
                    buf.line("&mut self.msg");
                },
            );
            for (signature, body) in &accessors {
                buf.blank();
                buf.block(signature, "}", |buf| {
                    buf.line(body);
                });
            }
        });
        buf.blank();

        buf.block(
            &format!("impl From<{rust_name}> for protox::Value {{"),
            "}",
            |buf| {
                buf.block(
                    &format!("fn from(value: {rust_name}) -> protox::Value {{"),
                    "}",
                    |buf| {
                        buf.line("protox::Value::from(value.msg)");
                    },
                );
            },
        );
        buf.blank();

        buf.block(
            &format!("impl From<protox::Message> for {rust_name} {{"),
            "}",
            |buf| {
                buf.block(
                    &format!("fn from(msg: protox::Message) -> {rust_name} {{"),
                    "}",
                    |buf| {
                        buf.line(&format!("{rust_name} {{ msg }}"));
                    },
                );
            },
        );
        buf.blank();

        // The shared type handle, declared with its one-of groups.
        let (one_ofs, _) = collect_one_ofs(message);
        if one_ofs.is_empty() {
            buf.line(&format!(
                "pub static {static_name}: Lazy<MessageType> = Lazy::new(|| MessageType::new({}));",
                str_literal(&full_path)
            ));
        } else {
            let mangled_groups: Vec<(String, Vec<String>)> = one_ofs
                .iter()
                .map(|(group, fields)| {
                    (
                        group.clone(),
                        fields
                            .iter()
                            .map(|field| self.field_name(message, field))
                            .collect(),
                    )
                })
                .collect();
            buf.line(&format!(
                "pub static {static_name}: Lazy<MessageType> = Lazy::new(|| {{"
            ));
            buf.indent();
            buf.block(
                &format!(
                    "MessageType::with_one_ofs({}, &[",
                    str_literal(&full_path)
                ),
                "])",
                |buf| {
                    for (group, members) in &mangled_groups {
                        let list = members
                            .iter()
                            .map(|member| str_literal(member))
                            .collect::<Vec<_>>()
                            .join(", ");
                        buf.line(&format!("({}, &[{list}]),", str_literal(group)));
                    }
                },
            );
            buf.line(".expect(\"one-of groups are statically valid\")");
            buf.dedent();
            buf.line("});");
        }
        buf.blank();

        // The accessor guarantees field registration has run.
        let supers = "super::".repeat(depth);
        buf.line(&format!("/// Runtime type for `{qualified}`."));
        buf.block(
            &format!("pub fn {accessor}() -> &'static MessageType {{"),
            "}",
            |buf| {
                buf.line(&format!("Lazy::force(&{supers}REGISTRATION);"));
                buf.line(&format!("&{static_name}"));
            },
        );
        buf.blank();

        // Nested declarations, map entries suppressed.
        let nested: Vec<DescriptorProto> = message
            .nested_types()
            .into_iter()
            .filter(|nested| !nested.is_map_entry())
            .collect();
        let nested_enums = message.enums();

        if !nested.is_empty() || !nested_enums.is_empty() {
            buf.line(&format!("/// Nested declarations of `{proto_name}`."));
            buf.line(&format!("pub mod {} {{", to_snake(&proto_name)));
            buf.indent();
            buf.line("use once_cell::sync::Lazy;");
            buf.line("use protox::{EnumType, MessageType};");
            buf.blank();
            for descriptor in &nested_enums {
                self.write_enum(buf, descriptor);
            }
            for nested_message in &nested {
                self.write_message(buf, nested_message, &full_path, depth + 1)?;
            }
            buf.dedent();
            buf.line("}");
            buf.blank();
        }

        Ok(())
    }

    /// Emits the `define_fields` calls for `message` and its non-map-entry
    /// nested messages, innermost first.
    fn write_define_fields(
        &mut self,
        buf: &mut CodeBuffer,
        message: &DescriptorProto,
        path: &str,
    ) -> Result<(), GeneratorError> {
        let static_path = if path.is_empty() {
            to_shouty(message.name())
        } else {
            format!("{path}::{}", to_shouty(message.name()))
        };
        let module_path = if path.is_empty() {
            to_snake(message.name())
        } else {
            format!("{path}::{}", to_snake(message.name()))
        };

        for nested in message.nested_types() {
            if nested.is_map_entry() {
                continue;
            }
            self.write_define_fields(buf, &nested, &module_path)?;
        }

        let fields = message.fields();
        if fields.is_empty() {
            return Ok(());
        }

        let one_of_members: std::collections::HashSet<String> = message
            .fields()
            .iter()
            .filter(|field| field.oneof_index().is_some())
            .map(|field| field.name().to_string())
            .collect();

        let mut entries = Vec::with_capacity(fields.len());
        for field in &fields {
            let name = self.field_name(message, field);
            let expr = self.field_expr(field, one_of_members.contains(field.name()))?;
            entries.push((name, expr));
        }

        buf.block(&format!("define_fields(&{static_path}, ["), "])", |buf| {
            for (name, expr) in &entries {
                buf.line(&format!("({}, {expr}),", str_literal(name)));
            }
        });
        buf.line(&format!(
            ".expect(\"{} field registration\");",
            self.file.name()
        ));
        Ok(())
    }

    /// Produces the `<stem>_pb.rs` bindings module for this file.
    pub(crate) fn generate(
        mut self,
    ) -> Result<Option<code_generator_response::File>, GeneratorError> {
        if self.is_empty() {
            return Ok(None);
        }

        debug!(
            "file: {:?}, package: {:?}",
            self.file.name(),
            self.file.package()
        );

        let mut body = CodeBuffer::new();

        for descriptor in &self.file.enums() {
            self.write_enum(&mut body, descriptor);
        }

        let messages: Vec<DescriptorProto> = self.file.messages();
        for message in &messages {
            self.write_message(&mut body, message, "", 0)?;
        }

        // The embedded descriptor, for reflective callers.
        let descriptor_bytes = self.file.to_bytes()?;
        body.line("/// The `FileDescriptorProto` this module was generated from.");
        body.line(
            "pub static FILE_DESCRIPTOR: Lazy<protox_types::FileDescriptorProto> = Lazy::new(|| {",
        );
        body.indent();
        body.line(&format!(
            "protox_types::FileDescriptorProto::from_bytes({})",
            bytes_literal(&descriptor_bytes)
        ));
        body.indent();
        body.line(".expect(\"embedded file descriptor is valid\")");
        body.dedent();
        body.dedent();
        body.line("});");
        body.blank();

        // Deferred field registration: every type above exists by the time
        // this block runs, so mutually recursive references resolve.
        let mut registration = CodeBuffer::new();
        registration.line("static REGISTRATION: Lazy<()> = Lazy::new(|| {");
        registration.indent();
        for message in &messages {
            self.write_define_fields(&mut registration, message, "")?;
        }
        registration.dedent();
        registration.line("});");
        body.line(&registration.finish());

        // Imports are known only now that every reference is resolved.
        let mut header = CodeBuffer::new();
        header.line("// Generated by protoc-gen-protox. DO NOT EDIT!");
        header.line(&format!("// source: {}", self.file.name()));
        header.blank();
        header.line("#![allow(unused_imports)]");
        header.blank();
        header.line("use once_cell::sync::Lazy;");
        header.line("use protox::{define_fields, EnumType, Field, FieldType, MessageType, ScalarKind};");
        header.blank();
        for file in self.import_requests.values() {
            let path = module_path(file.name(), &self.params.base_package);
            let alias = file_alias(file.name());
            if path.ends_with(&format!("::{alias}")) {
                header.line(&format!("use {path};"));
            } else {
                header.line(&format!("use {path} as {alias};"));
            }
        }
        if !self.import_requests.is_empty() {
            header.blank();
        }

        let content = format!("{}\n{}", header.finish(), body.finish());

        let mut out = code_generator_response::File::new();
        out.set_name(&output_name(
            self.file.name(),
            PROTOBUF_FILE_SUFFIX,
            &self.params.base_package,
        ));
        out.set_content(&content);
        Ok(Some(out))
    }
}
