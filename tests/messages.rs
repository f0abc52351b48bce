//! Message runtime semantics: wire round-trips, defaults, required fields,
//! one-of arbitration, unknown-field tolerance and descriptor validation.

use protox::{
    define_fields, DecodeError, EncodeError, EnumType, Field, FieldType, FieldValidationError,
    Message, MessageType, ScalarKind, Value,
};

fn point() -> MessageType {
    let point = MessageType::new("Point");
    define_fields(
        &point,
        [
            ("x", Field::int64(1)),
            ("y", Field::int64(2)),
            ("z", Field::int64(3)),
        ],
    )
    .unwrap();
    point
}

#[test]
fn point_wire_format() {
    let point = point();
    let mut m = Message::new(&point);
    m.set("x", 1i64).unwrap();
    m.set("y", 2i64).unwrap();
    m.set("z", 3i64).unwrap();

    let bytes = m.to_bytes().unwrap();
    assert_eq!(&bytes[..], &[0x08, 0x01, 0x10, 0x02, 0x18, 0x03]);

    let decoded = point.from_bytes(&bytes).unwrap();
    assert_eq!(decoded, m);
    assert_eq!(decoded.get_i64("x"), Some(1));
    assert_eq!(decoded.get_i64("z"), Some(3));
}

#[test]
fn user_with_enum_default() {
    let user_type = EnumType::new("UserType", &[("MERE_MORTAL", 0), ("ADMIN", 1)]);
    let user = MessageType::new("User");
    define_fields(
        &user,
        [
            ("id", Field::uint32(1).required()),
            ("name", Field::string(2).required()),
            (
                "type",
                Field::enumeration(3, &user_type).with_default(Value::Enum(0)),
            ),
        ],
    )
    .unwrap();

    let mut m = Message::new(&user);
    m.set("id", 5u32).unwrap();
    m.set("name", "ann").unwrap();

    // The default is not explicitly set, so it is not encoded.
    let bytes = m.to_bytes().unwrap();
    assert_eq!(&bytes[..], &[0x08, 0x05, 0x12, 0x03, 0x61, 0x6e, 0x6e]);

    let decoded = user.from_bytes(&bytes).unwrap();
    assert_eq!(decoded.get_enum("type"), Some(0));
    assert!(!decoded.has_field("type"));
    assert_eq!(decoded, m);
}

#[test]
fn unknown_fields_are_skipped() {
    let ty = MessageType::new("OnlyId");
    define_fields(&ty, [("id", Field::uint32(1))]).unwrap();

    // id = 5 plus an unknown varint field 2 carrying 99.
    let decoded = ty.from_bytes(&[0x08, 0x05, 0x10, 0x63]).unwrap();
    assert_eq!(decoded.get_u32("id"), Some(5));

    // Unknown fields of every skippable shape: varint, 64-bit,
    // length-delimited, 32-bit.
    let data = [
        0x08, 0x05, // id = 5
        0x10, 0x63, // field 2, varint
        0x19, 1, 2, 3, 4, 5, 6, 7, 8, // field 3, fixed64
        0x22, 0x02, 0xab, 0xcd, // field 4, length-delimited
        0x2d, 1, 2, 3, 4, // field 5, fixed32
    ];
    let decoded = ty.from_bytes(&data).unwrap();
    assert_eq!(decoded.get_u32("id"), Some(5));

    // Dropped unknown fields do not reappear on re-encode.
    assert_eq!(&decoded.to_bytes().unwrap()[..], &[0x08, 0x05]);
}

#[test]
fn group_wire_types_are_rejected() {
    let ty = MessageType::new("OnlyId");
    define_fields(&ty, [("id", Field::uint32(1))]).unwrap();

    // Field 2 with wire type 3 (start group).
    assert_eq!(
        ty.from_bytes(&[0x13]),
        Err(DecodeError::GroupWireTypeUnsupported)
    );
}

#[test]
fn packed_repeated_wire_format() {
    let ty = MessageType::new("Xs");
    define_fields(&ty, [("xs", Field::int32(1).packed())]).unwrap();

    let mut m = Message::new(&ty);
    {
        let mut xs = m.repeated_mut("xs");
        xs.extend([1i32, 2, 3]).unwrap();
    }

    let bytes = m.to_bytes().unwrap();
    assert_eq!(&bytes[..], &[0x0a, 0x03, 0x01, 0x02, 0x03]);

    let decoded = ty.from_bytes(&bytes).unwrap();
    assert_eq!(
        decoded.repeated("xs"),
        &[Value::I32(1), Value::I32(2), Value::I32(3)]
    );
}

#[test]
fn packed_and_unpacked_decode_to_the_same_list() {
    let packed_ty = MessageType::new("Packed");
    define_fields(&packed_ty, [("xs", Field::int32(1).packed())]).unwrap();

    let unpacked_ty = MessageType::new("Unpacked");
    define_fields(&unpacked_ty, [("xs", Field::int32(1).repeated())]).unwrap();

    let packed_bytes = [0x0a, 0x03, 0x01, 0x02, 0x03];
    let unpacked_bytes = [0x08, 0x01, 0x08, 0x02, 0x08, 0x03];
    let expected = [Value::I32(1), Value::I32(2), Value::I32(3)];

    // Either encoding decodes through either declaration.
    for ty in [&packed_ty, &unpacked_ty] {
        assert_eq!(ty.from_bytes(&packed_bytes).unwrap().repeated("xs"), &expected);
        assert_eq!(ty.from_bytes(&unpacked_bytes).unwrap().repeated("xs"), &expected);
    }
}

#[test]
fn repeated_entries_interleave_with_other_fields() {
    let ty = MessageType::new("Mixed");
    define_fields(
        &ty,
        [("xs", Field::int32(1).repeated()), ("id", Field::uint32(2))],
    )
    .unwrap();

    // xs: 1, id: 7, xs: 2
    let decoded = ty.from_bytes(&[0x08, 0x01, 0x10, 0x07, 0x08, 0x02]).unwrap();
    assert_eq!(decoded.repeated("xs"), &[Value::I32(1), Value::I32(2)]);
    assert_eq!(decoded.get_u32("id"), Some(7));
}

#[test]
fn one_of_arbitration() {
    let ty = MessageType::with_one_ofs("Outcome", &[("result", &["ok", "fail"])]).unwrap();
    define_fields(&ty, [("ok", Field::int32(10)), ("fail", Field::int32(11))]).unwrap();

    let mut m = Message::new(&ty);
    m.set("ok", 1i32).unwrap();
    assert_eq!(m.which_one_of("result").unwrap(), Some("ok"));

    m.set("fail", 2i32).unwrap();
    assert_eq!(m.which_one_of("result").unwrap(), Some("fail"));
    assert_eq!(m.get("ok"), None);
    assert_eq!(m.get_i32("fail"), Some(2));

    // The winner survives a round-trip.
    let decoded = ty.from_bytes(&m.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.which_one_of("result").unwrap(), Some("fail"));
    assert_eq!(decoded.get("ok"), None);
    assert_eq!(decoded, m);
}

#[test]
fn which_one_of_unknown_group() {
    let ty = MessageType::new("NoGroups");
    define_fields(&ty, [("x", Field::int32(1))]).unwrap();

    let m = Message::new(&ty);
    assert!(m.which_one_of("missing").is_err());
}

#[test]
fn several_one_ofs_work_together() {
    let ty = MessageType::with_one_ofs(
        "Pair",
        &[("first", &["a", "b"]), ("second", &["c", "d"])],
    )
    .unwrap();
    define_fields(
        &ty,
        [
            ("a", Field::int32(1)),
            ("b", Field::int32(2)),
            ("c", Field::int32(3)),
            ("d", Field::int32(4)),
        ],
    )
    .unwrap();

    let mut m = Message::new(&ty);
    m.set("a", 1i32).unwrap();
    m.set("c", 3i32).unwrap();
    m.set("b", 2i32).unwrap();

    assert_eq!(m.which_one_of("first").unwrap(), Some("b"));
    assert_eq!(m.which_one_of("second").unwrap(), Some("c"));
    assert_eq!(m.get("a"), None);
    assert_eq!(m.get_i32("c"), Some(3));
}

#[test]
fn required_fields_gate_encode_and_strict_decode() {
    let ty = MessageType::new("Strict");
    define_fields(
        &ty,
        [("id", Field::uint32(1).required()), ("note", Field::string(2))],
    )
    .unwrap();

    let m = Message::new(&ty);
    assert_eq!(
        m.to_bytes(),
        Err(EncodeError::MissingRequiredField {
            message: "Strict".to_string(),
            field: "id".to_string(),
        })
    );

    // note = "x" only; id missing.
    let bytes = [0x12, 0x01, 0x78];
    assert_eq!(
        ty.from_bytes(&bytes),
        Err(DecodeError::MissingRequiredField {
            message: "Strict".to_string(),
            field: "id".to_string(),
        })
    );

    // Partial decode tolerates the missing required field.
    let partial = ty.from_bytes_partial(&bytes).unwrap();
    assert_eq!(partial.get_str("note"), Some("x"));
    assert_eq!(partial.get("id"), None);
}

#[test]
fn required_with_default_is_exempt() {
    let ty = MessageType::new("Lenient");
    define_fields(&ty, [("x", Field::int32(1).required().with_default(100i32))]).unwrap();

    let m = Message::new(&ty);
    // Unset, but the declared default satisfies the requirement; nothing is
    // encoded and the default materializes on read.
    let bytes = m.to_bytes().unwrap();
    assert!(bytes.is_empty());

    let decoded = ty.from_bytes(&bytes).unwrap();
    assert_eq!(decoded.get_i32("x"), Some(100));
    assert!(!decoded.has_field("x"));
}

#[test]
fn defaults_materialize_on_read() {
    let ty = MessageType::new("Defaults");
    define_fields(
        &ty,
        [("x", Field::int32(1).with_default(777i32)), ("y", Field::int32(2))],
    )
    .unwrap();

    let mut m = Message::new(&ty);
    assert_eq!(m.get_i32("x"), Some(777));
    assert!(!m.has_field("x"));
    assert_eq!(m.get("y"), None);

    m.set("x", 777i32).unwrap();
    assert!(m.has_field("x"));
    assert_eq!(&m.to_bytes().unwrap()[..], &[0x08, 0x89, 0x06]);
}

#[test]
fn clear_falls_back_to_default() {
    let ty = MessageType::new("Clearable");
    define_fields(&ty, [("x", Field::int32(1).with_default(5i32))]).unwrap();

    let mut m = Message::new(&ty);
    m.set("x", 9i32).unwrap();
    assert_eq!(m.get_i32("x"), Some(9));

    m.clear("x");
    assert!(!m.has_field("x"));
    assert_eq!(m.get_i32("x"), Some(5));
}

#[test]
fn nested_message_roundtrip() {
    let user = MessageType::new("User");
    define_fields(&user, [("name", Field::string(1))]).unwrap();

    let outer = MessageType::new("Outer");
    define_fields(&outer, [("user", Field::message(1, &user))]).unwrap();

    let mut inner = Message::new(&user);
    inner.set("name", "John Doe").unwrap();

    let mut m = Message::new(&outer);
    m.set("user", inner).unwrap();

    let decoded = outer.from_bytes(&m.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.get_message("user").unwrap().get_str("name"), Some("John Doe"));
    assert_eq!(decoded, m);
}

#[test]
fn absent_message_field_reads_none() {
    let user = MessageType::new("User");
    define_fields(&user, [("name", Field::string(1))]).unwrap();
    let outer = MessageType::new("Outer");
    define_fields(&outer, [("user", Field::message(1, &user))]).unwrap();

    let m = Message::new(&outer);
    assert_eq!(m.get("user"), None);
    assert_eq!(m.get_message("user"), None);
}

#[test]
fn self_referential_message() {
    // A type may reference itself through deferred field registration.
    let node = MessageType::new("Node");
    define_fields(
        &node,
        [
            ("value", Field::int32(1)),
            ("next", Field::message(2, &node)),
        ],
    )
    .unwrap();

    let mut tail = Message::new(&node);
    tail.set("value", 2i32).unwrap();

    let mut head = Message::new(&node);
    head.set("value", 1i32).unwrap();
    head.set("next", tail).unwrap();

    let decoded = node.from_bytes(&head.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.get_message("next").unwrap().get_i32("value"), Some(2));
}

#[test]
fn mutually_recursive_messages() {
    let ping = MessageType::new("Ping");
    let pong = MessageType::new("Pong");
    define_fields(&ping, [("pong", Field::message(1, &pong))]).unwrap();
    define_fields(&pong, [("ping", Field::message(1, &ping))]).unwrap();

    let mut inner = Message::new(&pong);
    inner.set("ping", Message::new(&ping)).unwrap();

    let mut m = Message::new(&ping);
    m.set("pong", inner).unwrap();

    let decoded = ping.from_bytes(&m.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, m);
}

#[test]
fn forward_compatibility_projection() {
    // V2 extends V1 with an extra field; V1 drops it silently.
    let v1 = MessageType::new("V1");
    define_fields(&v1, [("id", Field::uint32(1))]).unwrap();

    let v2 = MessageType::new("V2");
    define_fields(
        &v2,
        [("id", Field::uint32(1)), ("email", Field::string(2))],
    )
    .unwrap();

    let mut m2 = Message::new(&v2);
    m2.set("id", 3u32).unwrap();
    m2.set("email", "ann@example.com").unwrap();

    let projected = v1.from_bytes(&m2.to_bytes().unwrap()).unwrap();
    assert_eq!(projected.get_u32("id"), Some(3));

    let mut expected = Message::new(&v1);
    expected.set("id", 3u32).unwrap();
    assert_eq!(projected, expected);
}

#[test]
fn enum_tolerance() {
    let color = EnumType::new("Color", &[("RED", 1), ("GREEN", 2)]);
    let ty = MessageType::new("Paint");
    define_fields(&ty, [("color", Field::enumeration(1, &color))]).unwrap();

    // Ordinal 9 is not a declared variant: the field reads absent and the
    // message still decodes.
    let decoded = ty.from_bytes(&[0x08, 0x09]).unwrap();
    assert_eq!(decoded.get("color"), None);

    let decoded = ty.from_bytes(&[0x08, 0x02]).unwrap();
    assert_eq!(decoded.get_enum("color"), Some(2));
}

#[test]
fn repeated_enum_skips_unknown_ordinals() {
    let color = EnumType::new("Color", &[("RED", 1), ("GREEN", 2)]);
    let ty = MessageType::new("Palette");
    define_fields(&ty, [("colors", Field::enumeration(1, &color).packed())]).unwrap();

    // 1, 9 (unknown), 2 packed together.
    let decoded = ty.from_bytes(&[0x0a, 0x03, 0x01, 0x09, 0x02]).unwrap();
    assert_eq!(decoded.repeated("colors"), &[Value::Enum(1), Value::Enum(2)]);
}

#[test]
fn sint_fields_use_zigzag() {
    let ty = MessageType::new("Signed");
    define_fields(&ty, [("x", Field::sint32(1))]).unwrap();

    let mut m = Message::new(&ty);
    m.set("x", -1i32).unwrap();
    assert_eq!(&m.to_bytes().unwrap()[..], &[0x08, 0x01]);
    assert_eq!(ty.from_bytes(&[0x08, 0x01]).unwrap().get_i32("x"), Some(-1));
}

#[test]
fn wire_type_mismatch() {
    let ty = MessageType::new("Strict");
    define_fields(&ty, [("x", Field::int32(1))]).unwrap();

    // Field 1 arrives as fixed32 instead of varint.
    let result = ty.from_bytes(&[0x0d, 0x01, 0x00, 0x00, 0x00]);
    assert!(matches!(result, Err(DecodeError::WireTypeMismatch { .. })));
}

#[test]
fn truncated_nested_message() {
    let user = MessageType::new("User");
    define_fields(&user, [("name", Field::string(1))]).unwrap();
    let outer = MessageType::new("Outer");
    define_fields(&outer, [("user", Field::message(1, &user))]).unwrap();

    // Advertises a ten byte payload but ends after two.
    let result = outer.from_bytes(&[0x0a, 0x0a, 0x0a, 0x01]);
    assert!(matches!(result, Err(DecodeError::UnexpectedEof { .. })));
}

#[test]
fn decoding_nothing_yields_empty_message() {
    let ty = MessageType::new("Empty");
    define_fields(&ty, [("x", Field::int32(1))]).unwrap();

    let decoded = ty.from_bytes(&[]).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(decoded, Message::new(&ty));
}

#[test]
fn observable_equality_includes_defaults() {
    let ty = MessageType::new("WithDefault");
    define_fields(&ty, [("x", Field::int32(1).with_default(100i32))]).unwrap();

    let unset = Message::new(&ty);
    let mut explicit = Message::new(&ty);
    explicit.set("x", 100i32).unwrap();

    // Both observe x == 100.
    assert_eq!(unset, explicit);
}

#[test]
fn messages_of_different_types_are_not_equal() {
    let a = MessageType::new("A");
    define_fields(&a, [("x", Field::int32(1))]).unwrap();
    let b = MessageType::new("A");
    define_fields(&b, [("x", Field::int32(1))]).unwrap();

    // Identical shape, distinct types.
    assert_ne!(Message::new(&a), Message::new(&b));
}

#[test]
fn field_number_validation() {
    for number in [0u32, 19_000, 19_999, 1 << 29] {
        let ty = MessageType::new("Bad");
        assert_eq!(
            define_fields(&ty, [("x", Field::int32(number))]),
            Err(FieldValidationError::InvalidFieldNumber(number))
        );
    }
}

#[test]
fn duplicate_field_number_is_rejected() {
    let ty = MessageType::new("Dup");
    let result = define_fields(&ty, [("x", Field::int32(1)), ("y", Field::int32(1))]);
    assert!(matches!(
        result,
        Err(FieldValidationError::DuplicateFieldNumber { number: 1, .. })
    ));
}

#[test]
fn invalid_default_is_rejected() {
    let ty = MessageType::new("BadDefault");
    let result = define_fields(&ty, [("x", Field::int32(1).with_default("oops"))]);
    assert!(matches!(
        result,
        Err(FieldValidationError::InvalidDefault { .. })
    ));
}

#[test]
fn packed_message_field_is_rejected() {
    let user = MessageType::new("User");
    define_fields(&user, [("name", Field::string(1))]).unwrap();

    let ty = MessageType::new("BadPack");
    let result = define_fields(&ty, [("users", Field::message(1, &user).packed())]);
    assert!(matches!(
        result,
        Err(FieldValidationError::InvalidPackedField { .. })
    ));

    // Length-delimited scalars do not pack either.
    let ty = MessageType::new("BadPackString");
    let result = define_fields(&ty, [("names", Field::string(1).packed())]);
    assert!(matches!(
        result,
        Err(FieldValidationError::InvalidPackedField { .. })
    ));
}

#[test]
fn one_of_validation() {
    assert!(matches!(
        MessageType::with_one_ofs("Solo", &[("result", &["only"])]),
        Err(FieldValidationError::OneOfTooSmall { .. })
    ));

    let ty = MessageType::with_one_ofs("Req", &[("result", &["ok", "fail"])]).unwrap();
    let result = define_fields(
        &ty,
        [("ok", Field::int32(1).required()), ("fail", Field::int32(2))],
    );
    assert!(matches!(
        result,
        Err(FieldValidationError::RequiredOneOfMember { .. })
    ));
}

#[test]
fn define_fields_after_first_use_fails() {
    let ty = MessageType::new("Frozen");
    define_fields(&ty, [("x", Field::int32(1))]).unwrap();

    // First use freezes the table.
    let _ = ty.from_bytes(&[]).unwrap();

    assert_eq!(
        define_fields(&ty, [("y", Field::int32(2))]),
        Err(FieldValidationError::AlreadyInUse("Frozen".to_string()))
    );
}

#[test]
fn set_validates_value_kind() {
    let ty = MessageType::new("Typed");
    define_fields(&ty, [("x", Field::int32(1))]).unwrap();

    let mut m = Message::new(&ty);
    assert!(m.set("x", "not an int").is_err());
    assert!(m.set("x", 1i32).is_ok());
}

#[test]
fn float_validator_rejects_positive_infinity() {
    let ty = MessageType::new("Floats");
    define_fields(&ty, [("f", Field::float(1)), ("d", Field::double(2))]).unwrap();

    let mut m = Message::new(&ty);
    assert!(m.set("f", f32::INFINITY).is_err());
    assert!(m.set("f", f32::NEG_INFINITY).is_ok());
    assert!(m.set("d", f64::INFINITY).is_err());
    assert!(m.set("d", 1.5f64).is_ok());
}

#[test]
fn display_formatting() {
    let user = MessageType::new("User");
    define_fields(
        &user,
        [
            ("id", Field::uint32(1)),
            ("name", Field::string(2)),
            ("tags", Field::string(3).repeated()),
        ],
    )
    .unwrap();

    let mut m = Message::new(&user);
    m.set("id", 7u32).unwrap();
    m.set("name", "ann").unwrap();
    {
        let mut tags = m.repeated_mut("tags");
        for i in 0..12 {
            tags.push(format!("tag{i}").as_str()).unwrap();
        }
    }

    let text = m.to_string();
    assert!(text.starts_with("User\n"));
    assert!(text.contains("  id = 7"));
    assert!(text.contains("  name = \"ann\""));
    // Twelve entries truncate at ten.
    assert!(text.contains("... 2 more"));
    assert!(!text.contains("tag11"));
}

#[test]
fn display_truncates_long_strings_and_bytes() {
    let ty = MessageType::new("Blob");
    define_fields(&ty, [("s", Field::string(1)), ("b", Field::bytes(2))]).unwrap();

    let mut m = Message::new(&ty);
    m.set("s", "x".repeat(60).as_str()).unwrap();
    m.set("b", vec![0u8; 20]).unwrap();

    let text = m.to_string();
    assert!(text.contains("... 10 characters more"));
    assert!(text.contains("... 5 bytes more"));
}

#[test]
fn universal_roundtrip_across_scalar_kinds() {
    let ty = MessageType::new("Everything");
    define_fields(
        &ty,
        [
            ("a", Field::int32(1)),
            ("b", Field::int64(2)),
            ("c", Field::sint32(3)),
            ("d", Field::sint64(4)),
            ("e", Field::uint32(5)),
            ("f", Field::uint64(6)),
            ("g", Field::fixed32(7)),
            ("h", Field::fixed64(8)),
            ("i", Field::sfixed32(9)),
            ("j", Field::sfixed64(10)),
            ("k", Field::float(11)),
            ("l", Field::double(12)),
            ("m", Field::bool(13)),
            ("n", Field::string(14)),
            ("o", Field::bytes(15)),
        ],
    )
    .unwrap();

    let mut m = Message::new(&ty);
    m.set("a", -42i32).unwrap();
    m.set("b", i64::MIN).unwrap();
    m.set("c", -1i32).unwrap();
    m.set("d", i64::MAX).unwrap();
    m.set("e", u32::MAX).unwrap();
    m.set("f", u64::MAX).unwrap();
    m.set("g", 7u32).unwrap();
    m.set("h", 8u64).unwrap();
    m.set("i", -9i32).unwrap();
    m.set("j", -10i64).unwrap();
    m.set("k", 1.25f32).unwrap();
    m.set("l", -2.5f64).unwrap();
    m.set("m", true).unwrap();
    m.set("n", "привет").unwrap();
    m.set("o", vec![0u8, 1, 255]).unwrap();

    let decoded = ty.from_bytes(&m.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, m);
}

#[test]
fn field_type_helpers() {
    let color = EnumType::new("Color", &[("RED", 1)]);
    assert_eq!(FieldType::enumeration(&color).name(), "Color");
    assert_eq!(FieldType::Scalar(ScalarKind::SFixed64).name(), "sfixed64");
}
