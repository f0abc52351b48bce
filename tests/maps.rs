//! Map fields and the validated container views.

use protox::{
    define_fields, EnumType, Field, FieldType, FieldValidationError, MapKey, Message, MessageType,
    ScalarKind, Value,
};

fn string_int_map() -> MessageType {
    let ty = MessageType::new("Counters");
    define_fields(
        &ty,
        [(
            "m",
            Field::map(1, ScalarKind::String, FieldType::Scalar(ScalarKind::Int32)),
        )],
    )
    .unwrap();
    ty
}

#[test]
fn map_wire_format() {
    let ty = string_int_map();
    let mut m = Message::new(&ty);
    m.map_mut("m").insert("key", 1i32).unwrap();

    let bytes = m.to_bytes().unwrap();
    assert_eq!(
        &bytes[..],
        &[0x0a, 0x07, 0x0a, 0x03, 0x6b, 0x65, 0x79, 0x10, 0x01]
    );

    let decoded = ty.from_bytes(&bytes).unwrap();
    assert_eq!(
        decoded.map("m").get(&MapKey::from("key")),
        Some(&Value::I32(1))
    );
    assert_eq!(decoded, m);
}

#[test]
fn map_roundtrip_with_many_entries() {
    let ty = string_int_map();
    let mut m = Message::new(&ty);
    {
        let mut entries = m.map_mut("m");
        for i in 0..20 {
            entries.insert(format!("key{i}"), i).unwrap();
        }
    }

    let decoded = ty.from_bytes(&m.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.map("m").len(), 20);
    assert_eq!(decoded, m);
}

#[test]
fn duplicate_map_keys_overwrite() {
    let ty = string_int_map();

    // Two entries under the same key: the later one wins.
    let mut first = Message::new(&ty);
    first.map_mut("m").insert("key", 1i32).unwrap();
    let mut second = Message::new(&ty);
    second.map_mut("m").insert("key", 2i32).unwrap();

    let mut bytes = first.to_bytes().unwrap().to_vec();
    bytes.extend_from_slice(&second.to_bytes().unwrap());

    let decoded = ty.from_bytes(&bytes).unwrap();
    assert_eq!(
        decoded.map("m").get(&MapKey::from("key")),
        Some(&Value::I32(2))
    );
}

#[test]
fn map_with_message_values() {
    let user = MessageType::new("User");
    define_fields(&user, [("name", Field::string(1))]).unwrap();

    let ty = MessageType::new("Users");
    define_fields(
        &ty,
        [(
            "by_id",
            Field::map(1, ScalarKind::UInt32, FieldType::message(&user)),
        )],
    )
    .unwrap();

    let mut ann = Message::new(&user);
    ann.set("name", "ann").unwrap();

    let mut m = Message::new(&ty);
    m.map_mut("by_id").insert(5u32, ann).unwrap();

    let decoded = ty.from_bytes(&m.to_bytes().unwrap()).unwrap();
    let value = decoded.map("by_id").get(&MapKey::from(5u32)).unwrap();
    assert_eq!(value.as_message().unwrap().get_str("name"), Some("ann"));
}

#[test]
fn map_with_enum_values() {
    let color = EnumType::new("Color", &[("RED", 1), ("GREEN", 2)]);
    let ty = MessageType::new("Paints");
    define_fields(
        &ty,
        [(
            "by_name",
            Field::map(1, ScalarKind::String, FieldType::enumeration(&color)),
        )],
    )
    .unwrap();

    let mut m = Message::new(&ty);
    m.map_mut("by_name").insert("wall", Value::Enum(2)).unwrap();

    let decoded = ty.from_bytes(&m.to_bytes().unwrap()).unwrap();
    assert_eq!(
        decoded.map("by_name").get(&MapKey::from("wall")),
        Some(&Value::Enum(2))
    );
}

#[test]
fn absent_map_reads_empty() {
    let ty = string_int_map();
    let m = Message::new(&ty);
    assert!(m.map("m").is_empty());

    // An explicitly empty map encodes to nothing and equals the absent one.
    let mut touched = Message::new(&ty);
    let _ = touched.map_mut("m");
    assert!(touched.to_bytes().unwrap().is_empty());
    assert_eq!(touched, m);
}

#[test]
fn float_and_bytes_map_keys_are_rejected() {
    for key in [ScalarKind::Float, ScalarKind::Double, ScalarKind::Bytes] {
        let ty = MessageType::new("BadKeys");
        let result = define_fields(
            &ty,
            [("m", Field::map(1, key, FieldType::Scalar(ScalarKind::Int32)))],
        );
        assert!(matches!(
            result,
            Err(FieldValidationError::InvalidMapKey { .. })
        ));
    }
}

#[test]
fn map_entry_with_missing_halves_decodes_to_zero() {
    let ty = string_int_map();

    // An empty entry frame: implicit-presence peers omit zero keys and
    // values entirely.
    let decoded = ty.from_bytes(&[0x0a, 0x00]).unwrap();
    assert_eq!(
        decoded.map("m").get(&MapKey::from("")),
        Some(&Value::I32(0))
    );
}

#[test]
fn validated_list_rejects_bad_elements() {
    let ty = MessageType::new("Xs");
    define_fields(&ty, [("xs", Field::int32(1).repeated())]).unwrap();

    let mut m = Message::new(&ty);
    let mut xs = m.repeated_mut("xs");
    assert!(xs.push("nope").is_err());
    assert!(xs.push(1i32).is_ok());

    // extend validates up front; a failure leaves the list untouched.
    assert!(xs
        .extend([Value::I32(2), Value::String("nope".to_string())])
        .is_err());
    assert_eq!(xs.len(), 1);

    assert!(xs.extend([2i32, 3]).is_ok());
    assert_eq!(xs.len(), 3);

    assert!(xs.set(0, "nope").is_err());
    assert!(xs.set(0, 9i32).is_ok());
    assert_eq!(xs.as_slice()[0], Value::I32(9));
}

#[test]
fn validated_map_rejects_bad_entries() {
    let ty = string_int_map();
    let mut m = Message::new(&ty);
    let mut entries = m.map_mut("m");

    // Wrong key kind.
    assert!(entries.insert(1i32, 1i32).is_err());
    // Wrong value kind.
    assert!(entries.insert("key", "nope").is_err());

    assert!(entries.insert("key", 1i32).is_ok());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.insert("key", 2i32).unwrap(), Some(Value::I32(1)));
}

#[test]
fn set_replaces_whole_collections_with_validation() {
    let ty = MessageType::new("Xs");
    define_fields(&ty, [("xs", Field::int32(1).repeated())]).unwrap();

    let mut m = Message::new(&ty);
    assert!(m
        .set("xs", Value::List(vec![Value::I32(1), Value::I32(2)]))
        .is_ok());
    assert_eq!(m.repeated("xs").len(), 2);

    assert!(m
        .set(
            "xs",
            Value::List(vec![Value::String("nope".to_string())])
        )
        .is_err());
    // The failed write left the previous list in place.
    assert_eq!(m.repeated("xs").len(), 2);
}
