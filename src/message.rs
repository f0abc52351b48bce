//! The message runtime: shared message types with deferred field
//! registration, and dynamic message instances with one-of arbitration,
//! (de)serialization, equality and diagnostic formatting.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use bytes::{Buf, Bytes, BytesMut};

use crate::containers::{ListMut, MapMut};
use crate::encoding::{check_field_number, decode_bytes, decode_key, skip_field, WireType};
use crate::error::{DecodeError, EncodeError, FieldValidationError, NoSuchOneOf, ValueError};
use crate::field::{EnumType, Field, FieldKind, FieldType, ScalarKind};
use crate::value::{MapKey, Value};

#[derive(Clone, Debug)]
struct OneOfGroup {
    name: String,
    members: Vec<String>,
}

pub(crate) struct FieldTable {
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
    by_number: HashMap<u32, usize>,
    /// Names of fields that are required and carry no default.
    required: Vec<String>,
    /// Member field name to index into the type's one-of list.
    one_of_by_member: HashMap<String, usize>,
}

impl FieldTable {
    fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }
}

struct TypeInner {
    name: String,
    one_ofs: Vec<OneOfGroup>,
    /// Fields staged by `define_fields`, not yet visible to instances.
    staged: Mutex<Vec<Field>>,
    /// Snapshot of the staged fields, frozen at first use.
    table: OnceLock<FieldTable>,
}

/// A message type: the ordered field table, required set and one-of groups
/// shared by every instance of the message.
///
/// `MessageType` is a cheap handle; clones share the underlying descriptor.
/// Fields are installed with [`define_fields`] after construction, which is
/// what lets two messages reference each other: declare both types first,
/// then register fields on each. The field table freezes at the first
/// encode, decode or accessor call, after which reads are lock-free and
/// further registration fails.
#[derive(Clone)]
pub struct MessageType {
    inner: Arc<TypeInner>,
}

impl MessageType {
    /// Creates a message type with no fields and no one-of groups.
    pub fn new(name: impl Into<String>) -> MessageType {
        MessageType {
            inner: Arc::new(TypeInner {
                name: name.into(),
                one_ofs: Vec::new(),
                staged: Mutex::new(Vec::new()),
                table: OnceLock::new(),
            }),
        }
    }

    /// Creates a message type declaring one-of groups. Each group needs at
    /// least two members; member fields are registered later with
    /// [`define_fields`] and must be optional.
    pub fn with_one_ofs(
        name: impl Into<String>,
        groups: &[(&str, &[&str])],
    ) -> Result<MessageType, FieldValidationError> {
        let name = name.into();
        let mut one_ofs = Vec::with_capacity(groups.len());

        for (group_name, members) in groups {
            if members.len() < 2 {
                return Err(FieldValidationError::OneOfTooSmall {
                    message: name,
                    name: group_name.to_string(),
                });
            }
            one_ofs.push(OneOfGroup {
                name: group_name.to_string(),
                members: members.iter().map(|m| m.to_string()).collect(),
            });
        }

        Ok(MessageType {
            inner: Arc::new(TypeInner {
                name,
                one_ofs,
                staged: Mutex::new(Vec::new()),
                table: OnceLock::new(),
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether two handles refer to the same message type.
    pub fn ptr_eq(a: &MessageType, b: &MessageType) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    fn staged(&self) -> MutexGuard<'_, Vec<Field>> {
        match self.inner.staged.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// The frozen field table, built from the staged fields on first use.
    pub(crate) fn table(&self) -> &FieldTable {
        self.inner.table.get_or_init(|| {
            let staged = self.staged();
            let mut by_name = HashMap::with_capacity(staged.len());
            let mut by_number = HashMap::with_capacity(staged.len());
            let mut required = Vec::new();

            for (idx, field) in staged.iter().enumerate() {
                by_name.insert(field.name.clone(), idx);
                by_number.insert(field.number, idx);
                if field.in_required_set() {
                    required.push(field.name.clone());
                }
            }

            let mut one_of_by_member = HashMap::new();
            for (group_idx, group) in self.inner.one_ofs.iter().enumerate() {
                for member in &group.members {
                    one_of_by_member.insert(member.clone(), group_idx);
                }
            }

            FieldTable {
                fields: staged.clone(),
                by_name,
                by_number,
                required,
                one_of_by_member,
            }
        })
    }

    /// Registers fields on this type. See the free function
    /// [`define_fields`].
    pub fn define_fields<I, S>(&self, fields: I) -> Result<(), FieldValidationError>
    where
        I: IntoIterator<Item = (S, Field)>,
        S: Into<String>,
    {
        if self.inner.table.get().is_some() {
            return Err(FieldValidationError::AlreadyInUse(self.name().to_string()));
        }

        let mut staged = self.staged();

        for (name, mut field) in fields {
            let name = name.into();

            check_field_number(field.number)?;

            if staged.iter().any(|f| f.number == field.number) {
                return Err(FieldValidationError::DuplicateFieldNumber {
                    message: self.name().to_string(),
                    number: field.number,
                });
            }
            if staged.iter().any(|f| f.name == name) {
                return Err(FieldValidationError::DuplicateFieldName {
                    message: self.name().to_string(),
                    name,
                });
            }

            let in_one_of = self
                .inner
                .one_ofs
                .iter()
                .any(|group| group.members.iter().any(|m| *m == name));
            if in_one_of && field.required {
                return Err(FieldValidationError::RequiredOneOfMember {
                    message: self.name().to_string(),
                    field: name,
                });
            }

            if let FieldKind::Repeated {
                element,
                packed: true,
            } = &field.kind
            {
                let packable = match element {
                    FieldType::Scalar(kind) => kind.is_packable(),
                    FieldType::Enum(_) => true,
                    FieldType::Message(_) => false,
                };
                if !packable {
                    let kind = match element {
                        FieldType::Scalar(kind) => kind.name(),
                        FieldType::Enum(_) => "enum",
                        FieldType::Message(_) => "message",
                    };
                    return Err(FieldValidationError::InvalidPackedField { field: name, kind });
                }
            }

            if let FieldKind::Map { key, value } = &field.kind {
                if !key.is_valid_map_key() {
                    return Err(FieldValidationError::InvalidMapKey {
                        field: name,
                        kind: key.name(),
                    });
                }
                field.map_entry = Some(build_map_entry(&name, *key, value)?);
            }

            if let Some(default) = &field.default {
                field
                    .validate_value(default)
                    .map_err(|source| FieldValidationError::InvalidDefault {
                        message: self.name().to_string(),
                        field: name.clone(),
                        source,
                    })?;
            }

            field.name = name;
            staged.push(field);
        }

        Ok(())
    }

    /// Decodes a message, failing if any required-and-defaultless field is
    /// missing from the input.
    pub fn from_bytes(&self, data: &[u8]) -> Result<Message, DecodeError> {
        self.decode(Bytes::copy_from_slice(data), true)
    }

    /// Decodes a message, preserving partial content for tolerant
    /// intermediaries: missing required fields are not an error.
    pub fn from_bytes_partial(&self, data: &[u8]) -> Result<Message, DecodeError> {
        self.decode(Bytes::copy_from_slice(data), false)
    }

    pub(crate) fn decode(&self, mut buf: Bytes, strict: bool) -> Result<Message, DecodeError> {
        let table = self.table();
        let mut message = Message::new(self);

        while buf.has_remaining() {
            let (number, wire_type) = decode_key(&mut buf)?;

            let idx = match table.by_number.get(&number) {
                Some(&idx) => idx,
                None => {
                    // Unknown field: discard through the skip table.
                    skip_field(wire_type, &mut buf)?;
                    continue;
                }
            };
            let field = &table.fields[idx];

            match &field.kind {
                FieldKind::Singular(ty) => {
                    if wire_type != ty.wire_type() {
                        return Err(mismatch(field, wire_type));
                    }
                    if let Some(value) = ty.decode_value(&mut buf, strict)? {
                        message.insert_value(&field.name, value);
                    }
                }
                FieldKind::Repeated { element, .. } => {
                    let element_wire = element.wire_type();
                    if wire_type == WireType::LengthDelimited
                        && element_wire != WireType::LengthDelimited
                    {
                        // A packed frame. Accepted whatever the declared
                        // flag says, as peers may pack at their option.
                        let mut frame = decode_bytes(&mut buf)?;
                        while frame.has_remaining() {
                            if let Some(value) = element.decode_value(&mut frame, strict)? {
                                message.push_repeated(&field.name, value);
                            }
                        }
                    } else if wire_type == element_wire {
                        // One element; entries may interleave with other
                        // fields, so exactly one is consumed per key.
                        if let Some(value) = element.decode_value(&mut buf, strict)? {
                            message.push_repeated(&field.name, value);
                        }
                    } else {
                        return Err(mismatch(field, wire_type));
                    }
                }
                FieldKind::Map { .. } => {
                    if wire_type != WireType::LengthDelimited {
                        return Err(mismatch(field, wire_type));
                    }
                    let (key, value) = field.decode_map_entry(&mut buf, strict)?;
                    message.insert_map_entry(&field.name, key, value);
                }
            }
        }

        if strict {
            for name in &table.required {
                if !message.values.contains_key(name) {
                    return Err(DecodeError::MissingRequiredField {
                        message: self.name().to_string(),
                        field: name.clone(),
                    });
                }
            }
        }

        Ok(message)
    }
}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shallow on purpose: field tables may reference this type back.
        f.debug_struct("MessageType")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}

fn mismatch(field: &Field, actual: WireType) -> DecodeError {
    DecodeError::WireTypeMismatch {
        field: field.name.clone(),
        expected: field.wire_type(),
        actual,
    }
}

fn build_map_entry(
    field_name: &str,
    key: ScalarKind,
    value: &FieldType,
) -> Result<MessageType, FieldValidationError> {
    let entry = MessageType::new(format!("{field_name}_entry"));
    entry.define_fields([
        (
            "key",
            Field {
                name: String::new(),
                number: 1,
                kind: FieldKind::Singular(FieldType::Scalar(key)),
                required: false,
                default: None,
                map_entry: None,
            },
        ),
        (
            "value",
            Field {
                name: String::new(),
                number: 2,
                kind: FieldKind::Singular(value.clone()),
                required: false,
                default: None,
                map_entry: None,
            },
        ),
    ])?;
    Ok(entry)
}

/// Registers fields on a message type after its construction.
///
/// This is the deferred-binding half of type declaration: a message that
/// references itself, or another message declared later in the same unit,
/// is created first and receives its field table here once every referenced
/// type exists. May be called repeatedly to augment the table until the
/// type's first use, at which point the table is frozen.
pub fn define_fields<I, S>(message_type: &MessageType, fields: I) -> Result<(), FieldValidationError>
where
    I: IntoIterator<Item = (S, Field)>,
    S: Into<String>,
{
    message_type.define_fields(fields)
}

/// A message instance: a sparse map of explicitly set values, interpreted
/// through the message type's field table.
#[derive(Clone, Debug)]
pub struct Message {
    ty: MessageType,
    values: HashMap<String, Value>,
    /// One-of group name to the member that won the last write or decode.
    one_of_winners: HashMap<String, String>,
}

impl Message {
    pub fn new(ty: &MessageType) -> Message {
        Message {
            ty: ty.clone(),
            values: HashMap::new(),
            one_of_winners: HashMap::new(),
        }
    }

    pub fn message_type(&self) -> &MessageType {
        &self.ty
    }

    /// Whether no field is explicitly set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn field(&self, name: &str) -> &Field {
        match self.ty.table().field_by_name(name) {
            Some(field) => field,
            None => panic!(
                "protocol message {:?} has no field {:?}",
                self.ty.name(),
                name
            ),
        }
    }

    /// Reads a field: the stored value if set, the declared default
    /// otherwise, `None` when both are absent.
    ///
    /// # Panics
    ///
    /// Panics if the message type declares no field of this name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let field = self.field(name);
        if let Some(value) = self.values.get(name) {
            return Some(value);
        }
        field.default_value()
    }

    /// Whether the field was explicitly set (defaults do not count).
    pub fn has_field(&self, name: &str) -> bool {
        let _ = self.field(name);
        self.values.contains_key(name)
    }

    /// Writes a field after validating the value. Setting a one-of member
    /// clears the group's other members and records the new winner.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ValueError> {
        let value = value.into();
        self.field(name).validate_value(&value)?;
        self.insert_value(name, value);
        Ok(())
    }

    /// Removes an explicitly set value; reads fall back to the default.
    pub fn clear(&mut self, name: &str) {
        let _ = self.field(name);
        self.values.remove(name);

        let table = self.ty.table();
        if let Some(&group_idx) = table.one_of_by_member.get(name) {
            let group_name = &self.ty.inner.one_ofs[group_idx].name;
            if self.one_of_winners.get(group_name).map(String::as_str) == Some(name) {
                self.one_of_winners.remove(group_name.as_str());
            }
        }
    }

    /// Stores a value without validation, handling one-of arbitration. The
    /// caller has validated the value or decoded it from the wire.
    pub(crate) fn insert_value(&mut self, name: &str, value: Value) {
        let table = self.ty.table();
        if let Some(&group_idx) = table.one_of_by_member.get(name) {
            let group = &self.ty.inner.one_ofs[group_idx];
            for member in &group.members {
                if member != name {
                    self.values.remove(member);
                }
            }
            self.one_of_winners
                .insert(group.name.clone(), name.to_string());
        }
        self.values.insert(name.to_string(), value);
    }

    pub(crate) fn push_repeated(&mut self, name: &str, value: Value) {
        let slot = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| Value::List(Vec::new()));
        if let Value::List(items) = slot {
            items.push(value);
        }
    }

    pub(crate) fn insert_map_entry(&mut self, name: &str, key: MapKey, value: Value) {
        let slot = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| Value::Map(BTreeMap::new()));
        if let Value::Map(entries) = slot {
            entries.insert(key, value);
        }
    }

    /// Reports the member that won the one-of group, as recorded by the last
    /// successful write or decode.
    pub fn which_one_of(&self, group: &str) -> Result<Option<&str>, NoSuchOneOf> {
        if !self.ty.inner.one_ofs.iter().any(|g| g.name == group) {
            return Err(NoSuchOneOf {
                message: self.ty.name().to_string(),
                name: group.to_string(),
            });
        }
        Ok(self.one_of_winners.get(group).map(String::as_str))
    }

    /// The elements of a repeated field; absent reads as empty.
    pub fn repeated(&self, name: &str) -> &[Value] {
        let _ = self.field(name);
        match self.values.get(name) {
            Some(Value::List(items)) => items,
            _ => &[],
        }
    }

    /// The entries of a map field; absent reads as empty.
    pub fn map(&self, name: &str) -> &BTreeMap<MapKey, Value> {
        static EMPTY: BTreeMap<MapKey, Value> = BTreeMap::new();
        let _ = self.field(name);
        match self.values.get(name) {
            Some(Value::Map(entries)) => entries,
            _ => &EMPTY,
        }
    }

    /// A validated mutable view over a repeated field, materializing the
    /// empty list on first access.
    ///
    /// # Panics
    ///
    /// Panics if the named field is not repeated.
    pub fn repeated_mut(&mut self, name: &str) -> ListMut<'_> {
        let table = self.ty.table();
        let field = match table.field_by_name(name) {
            Some(field) => field,
            None => panic!(
                "protocol message {:?} has no field {:?}",
                self.ty.inner.name, name
            ),
        };
        let element = match &field.kind {
            FieldKind::Repeated { element, .. } => element,
            _ => panic!("field {name:?} is not repeated"),
        };

        let slot = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| Value::List(Vec::new()));
        match slot {
            Value::List(items) => ListMut::new(element, items),
            _ => unreachable!("repeated slots always hold lists"),
        }
    }

    /// A validated mutable view over a map field, materializing the empty
    /// map on first access.
    ///
    /// # Panics
    ///
    /// Panics if the named field is not a map.
    pub fn map_mut(&mut self, name: &str) -> MapMut<'_> {
        let table = self.ty.table();
        let field = match table.field_by_name(name) {
            Some(field) => field,
            None => panic!(
                "protocol message {:?} has no field {:?}",
                self.ty.inner.name, name
            ),
        };
        let (key, value_ty) = match &field.kind {
            FieldKind::Map { key, value } => (*key, value),
            _ => panic!("field {name:?} is not a map"),
        };

        let slot = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| Value::Map(BTreeMap::new()));
        match slot {
            Value::Map(entries) => MapMut::new(key, value_ty, entries),
            _ => unreachable!("map slots always hold maps"),
        }
    }

    /// Serializes the message by walking the field table in declaration
    /// order. Fails while a required-and-defaultless field is unset; unset
    /// optional fields and unset defaults produce no output.
    pub fn to_bytes(&self) -> Result<Bytes, EncodeError> {
        let table = self.ty.table();
        let mut buf = BytesMut::new();

        for field in &table.fields {
            match self.values.get(&field.name) {
                Some(value) => field.encode(value, &mut buf)?,
                None if field.in_required_set() => {
                    return Err(EncodeError::MissingRequiredField {
                        message: self.ty.name().to_string(),
                        field: field.name.clone(),
                    });
                }
                None => {}
            }
        }

        Ok(buf.freeze())
    }
}

macro_rules! typed_getters {
    ($($(#[$doc:meta])* $fn_name:ident -> $ty:ty, $variant:ident;)*) => {
        impl Message {
            $(
                $(#[$doc])*
                pub fn $fn_name(&self, name: &str) -> Option<$ty> {
                    match self.get(name) {
                        Some(Value::$variant(value)) => Some(*value),
                        None => None,
                        Some(other) => panic!(
                            "field {:?} holds a {}, not a {}",
                            name,
                            other.kind_name(),
                            stringify!($variant),
                        ),
                    }
                }
            )*
        }
    };
}

typed_getters! {
    get_bool -> bool, Bool;
    get_i32 -> i32, I32;
    get_i64 -> i64, I64;
    get_u32 -> u32, U32;
    get_u64 -> u64, U64;
    get_f32 -> f32, F32;
    get_f64 -> f64, F64;
    /// The ordinal of an enum field.
    get_enum -> i32, Enum;
}

impl Message {
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Value::String(value)) => Some(value),
            None => None,
            Some(other) => panic!(
                "field {:?} holds a {}, not a string",
                name,
                other.kind_name()
            ),
        }
    }

    pub fn get_bytes(&self, name: &str) -> Option<&Bytes> {
        match self.get(name) {
            Some(Value::Bytes(value)) => Some(value),
            None => None,
            Some(other) => panic!(
                "field {:?} holds a {}, not bytes",
                name,
                other.kind_name()
            ),
        }
    }

    pub fn get_message(&self, name: &str) -> Option<&Message> {
        match self.get(name) {
            Some(Value::Message(value)) => Some(value),
            None => None,
            Some(other) => panic!(
                "field {:?} holds a {}, not a message",
                name,
                other.kind_name()
            ),
        }
    }
}

impl PartialEq for Message {
    /// Two messages are equal iff they are of the same type and every
    /// declared field's observable value matches, defaults included. An
    /// absent repeated or map field equals an explicitly empty one.
    fn eq(&self, other: &Message) -> bool {
        if !MessageType::ptr_eq(&self.ty, &other.ty) {
            return false;
        }
        let table = self.ty.table();
        table.fields.iter().all(|field| match &field.kind {
            FieldKind::Repeated { .. } => self.repeated(&field.name) == other.repeated(&field.name),
            FieldKind::Map { .. } => self.map(&field.name) == other.map(&field.name),
            FieldKind::Singular(_) => self.get(&field.name) == other.get(&field.name),
        })
    }
}

const INDENT: &str = "  ";
const FORMAT_MAX_ITEMS: usize = 10;
const FORMAT_MAX_BYTES: usize = 15;
const FORMAT_MAX_CHARS: usize = 50;

impl fmt::Display for Message {
    /// A deterministic, indented diagnostic rendering. Explicitly set fields
    /// only, in declaration order; long collections and blobs truncate.
    /// This is not a wire or interchange surface.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.ty.name())?;
        self.format_into(f, 1)
    }
}

impl Message {
    fn format_into(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        let table = self.ty.table();
        let pad = INDENT.repeat(level);

        for field in &table.fields {
            let value = match self.values.get(&field.name) {
                Some(value) => value,
                None => continue,
            };

            match (&field.kind, value) {
                (_, Value::Message(message)) => {
                    writeln!(
                        f,
                        "{pad}{}: {} = {{",
                        field.name,
                        message.ty.name()
                    )?;
                    message.format_into(f, level + 1)?;
                    writeln!(f, "{pad}}}")?;
                }
                (FieldKind::Repeated { element, .. }, Value::List(items)) => {
                    writeln!(f, "{pad}{}: {} = [", field.name, element.name())?;
                    let nested = INDENT.repeat(level + 1);
                    for item in items.iter().take(FORMAT_MAX_ITEMS) {
                        match item {
                            Value::Message(message) if message.is_empty() => {
                                writeln!(f, "{nested}{{}}")?;
                            }
                            Value::Message(message) => {
                                writeln!(f, "{nested}{{")?;
                                message.format_into(f, level + 2)?;
                                writeln!(f, "{nested}}}")?;
                            }
                            other => {
                                write!(f, "{nested}")?;
                                format_scalar(f, other, enum_type(element))?;
                                writeln!(f)?;
                            }
                        }
                    }
                    if items.len() > FORMAT_MAX_ITEMS {
                        writeln!(f, "{nested}... {} more", items.len() - FORMAT_MAX_ITEMS)?;
                    }
                    writeln!(f, "{pad}]")?;
                }
                (FieldKind::Map { value: value_ty, .. }, Value::Map(entries)) => {
                    writeln!(f, "{pad}{} = {{", field.name)?;
                    let nested = INDENT.repeat(level + 1);
                    for (key, entry_value) in entries.iter().take(FORMAT_MAX_ITEMS) {
                        write!(f, "{nested}{key}: ")?;
                        match entry_value {
                            Value::Message(message) => {
                                writeln!(f, "{{")?;
                                message.format_into(f, level + 2)?;
                                writeln!(f, "{nested}}}")?;
                            }
                            other => {
                                format_scalar(f, other, enum_type(value_ty))?;
                                writeln!(f)?;
                            }
                        }
                    }
                    if entries.len() > FORMAT_MAX_ITEMS {
                        writeln!(f, "{nested}... {} more", entries.len() - FORMAT_MAX_ITEMS)?;
                    }
                    writeln!(f, "{pad}}}")?;
                }
                (FieldKind::Singular(ty), other) => {
                    write!(f, "{pad}{} = ", field.name)?;
                    format_scalar(f, other, enum_type(ty))?;
                    writeln!(f)?;
                }
                _ => {}
            }
        }

        Ok(())
    }
}

fn enum_type(ty: &FieldType) -> Option<&EnumType> {
    match ty {
        FieldType::Enum(ty) => Some(ty),
        _ => None,
    }
}

fn format_scalar(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    enum_ty: Option<&EnumType>,
) -> fmt::Result {
    match value {
        Value::Enum(number) => {
            let name = enum_ty
                .and_then(|ty| ty.variant_name(*number))
                .unwrap_or("?");
            write!(f, "{name}[{number}]")
        }
        Value::String(text) => {
            let count = text.chars().count();
            if count > FORMAT_MAX_CHARS {
                let prefix: String = text.chars().take(FORMAT_MAX_CHARS).collect();
                write!(f, "{prefix:?} ... {} characters more", count - FORMAT_MAX_CHARS)
            } else {
                write!(f, "{text:?}")
            }
        }
        Value::Bytes(data) => {
            if data.len() > FORMAT_MAX_BYTES {
                write!(
                    f,
                    "{:?} ... {} bytes more",
                    &data[..FORMAT_MAX_BYTES],
                    data.len() - FORMAT_MAX_BYTES
                )
            } else {
                write!(f, "{:?}", &data[..])
            }
        }
        Value::Bool(value) => write!(f, "{value}"),
        Value::I32(value) => write!(f, "{value}"),
        Value::I64(value) => write!(f, "{value}"),
        Value::U32(value) => write!(f, "{value}"),
        Value::U64(value) => write!(f, "{value}"),
        Value::F32(value) => write!(f, "{value}"),
        Value::F64(value) => write!(f, "{value}"),
        other => write!(f, "{other:?}"),
    }
}
