//! End-to-end generator runs over in-memory compiler requests.

use pretty_assertions::assert_eq;
use protox_gen::{generate, run, GeneratorError};
use protox_types::compiler::CodeGeneratorRequest;
use protox_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, Label, MessageOptions, MethodDescriptorProto, OneofDescriptorProto,
    ServiceDescriptorProto, Type,
};

fn scalar_field(name: &str, number: i32, ty: Type, label: Label) -> FieldDescriptorProto {
    let mut field = FieldDescriptorProto::new();
    field.set_name(name);
    field.set_number(number);
    field.set_label(label);
    field.set_field_type(ty);
    field
}

fn message_field(name: &str, number: i32, type_name: &str, label: Label) -> FieldDescriptorProto {
    let mut field = scalar_field(name, number, Type::Message, label);
    field.set_type_name(type_name);
    field
}

fn enum_value(name: &str, number: i32) -> EnumValueDescriptorProto {
    let mut value = EnumValueDescriptorProto::new();
    value.set_name(name);
    value.set_number(number);
    value
}

fn request_for(files: Vec<FileDescriptorProto>, parameter: &str) -> CodeGeneratorRequest {
    let mut request = CodeGeneratorRequest::new();
    request.set_parameter(parameter);
    for file in files {
        request.add_file_to_generate(file.name());
        request.add_proto_file(file);
    }
    request
}

fn user_file() -> FileDescriptorProto {
    let mut user_type = EnumDescriptorProto::new();
    user_type.set_name("UserType");
    user_type.add_value(enum_value("MERE_MORTAL", 0));
    user_type.add_value(enum_value("ADMIN", 1));

    let mut user = DescriptorProto::new();
    user.set_name("User");
    user.add_field(scalar_field("id", 1, Type::Uint32, Label::Optional));
    user.add_field(scalar_field("name", 2, Type::String, Label::Optional));
    {
        let mut field = scalar_field("type", 3, Type::Enum, Label::Optional);
        field.set_type_name(".acme.UserType");
        user.add_field(field);
    }

    let mut file = FileDescriptorProto::new();
    file.set_name("user.proto");
    file.set_package("acme");
    file.set_syntax("proto3");
    file.add_enum(user_type);
    file.add_message(user);
    file
}

#[test]
fn generates_message_bindings() {
    let request = request_for(vec![user_file()], "");
    let files = generate(&request).unwrap();
    assert_eq!(files.len(), 1);

    let out = &files[0];
    assert_eq!(out.name(), "user_pb.rs");

    let content = out.content();
    assert!(content.starts_with("// Generated by protoc-gen-protox. DO NOT EDIT!\n"));
    assert!(content.contains("// source: user.proto"));

    // The enum, its symbol table, the message declaration and its accessor.
    assert!(content.contains("pub enum UserType {"));
    assert!(content.contains("MereMortal = 0,"));
    assert!(content.contains("pub static USER_TYPE: Lazy<EnumType>"));
    assert!(content.contains("pub struct User {"));
    assert!(content.contains("pub static USER: Lazy<MessageType>"));
    assert!(content.contains("pub fn user() -> &'static MessageType {"));

    // Field registration: proto3 scalars carry their zero defaults; the
    // enum field resolves through the local symbol table static.
    assert!(content.contains("(\"id\", Field::uint32(1).with_default(0u32)),"));
    assert!(content.contains("(\"name\", Field::string(2).with_default(\"\")),"));
    assert!(content
        .contains("(\"type\", Field::enumeration(3, &USER_TYPE).with_default(protox::Value::Enum(0))),"));

    // Typed accessors; the keyword-named field escapes its method name but
    // keeps its wire name.
    assert!(content.contains("pub fn id(&self) -> Option<u32> {"));
    assert!(content.contains("self.msg.get_u32(\"id\")"));
    assert!(content.contains("pub fn set_name(&mut self, value: &str) {"));
    assert!(content.contains("pub fn type_(&self) -> Option<UserType> {"));
    assert!(content.contains("self.msg.get_enum(\"type\").and_then(UserType::from_i32)"));

    // The declarations precede the deferred registration block.
    let decl = content.find("pub struct User").unwrap();
    let registration = content.find("static REGISTRATION").unwrap();
    assert!(decl < registration);
}

#[test]
fn mutually_recursive_messages_register_after_both_declarations() {
    let mut ping = DescriptorProto::new();
    ping.set_name("Ping");
    ping.add_field(message_field("pong", 1, ".Pong", Label::Optional));

    let mut pong = DescriptorProto::new();
    pong.set_name("Pong");
    pong.add_field(message_field("ping", 1, ".Ping", Label::Optional));

    let mut file = FileDescriptorProto::new();
    file.set_name("cycle.proto");
    file.add_message(ping);
    file.add_message(pong);

    let files = generate(&request_for(vec![file], "")).unwrap();
    let content = files[0].content().to_string();

    // Two type declarations, then two define_fields blocks.
    let ping_decl = content.find("pub static PING: Lazy<MessageType>").unwrap();
    let pong_decl = content.find("pub static PONG: Lazy<MessageType>").unwrap();
    let ping_fields = content.find("define_fields(&PING, [").unwrap();
    let pong_fields = content.find("define_fields(&PONG, [").unwrap();
    assert!(ping_decl < pong_decl);
    assert!(pong_decl < ping_fields);
    assert!(ping_fields < pong_fields);

    // Local references go through the statics, not the accessors.
    assert!(content.contains("(\"pong\", Field::message(1, &PONG)),"));
    assert!(content.contains("(\"ping\", Field::message(1, &PING)),"));
}

#[test]
fn nested_types_and_map_entries() {
    // message Outer { message Inner { uint32 n = 1; }
    //                 map<string, Inner> items = 1; }
    let mut inner = DescriptorProto::new();
    inner.set_name("Inner");
    inner.add_field(scalar_field("n", 1, Type::Uint32, Label::Optional));

    let mut entry = DescriptorProto::new();
    entry.set_name("ItemsEntry");
    entry.add_field(scalar_field("key", 1, Type::String, Label::Optional));
    entry.add_field(message_field("value", 2, ".Outer.Inner", Label::Optional));
    let mut entry_options = MessageOptions::new();
    entry_options.set_map_entry(true);
    entry.set_options(entry_options);

    let mut outer = DescriptorProto::new();
    outer.set_name("Outer");
    outer.add_field(message_field("items", 1, ".Outer.ItemsEntry", Label::Repeated));
    outer.add_nested_type(inner);
    outer.add_nested_type(entry);

    let mut file = FileDescriptorProto::new();
    file.set_name("nested.proto");
    file.add_message(outer);

    let files = generate(&request_for(vec![file], "")).unwrap();
    let content = files[0].content().to_string();

    // The nested message lands in a nested module; the synthetic map entry
    // gets no declaration and no registration (its name still appears in
    // the embedded descriptor bytes).
    assert!(content.contains("pub mod outer {"));
    assert!(content.contains("pub struct Inner {"));
    assert!(!content.contains("pub struct ItemsEntry"));
    assert!(!content.contains("ITEMS_ENTRY"));
    assert!(content.contains(
        "(\"items\", Field::map(1, ScalarKind::String, FieldType::message(&outer::INNER))),"
    ));

    // Collections hand out the runtime's views.
    assert!(content.contains(
        "pub fn items(&self) -> &std::collections::BTreeMap<protox::MapKey, protox::Value> {"
    ));
    assert!(content.contains("pub fn items_mut(&mut self) -> protox::MapMut<'_> {"));
    assert!(content.contains("pub fn n(&self) -> Option<u32> {"));

    // Inner registers before Outer, innermost first.
    let inner_fields = content.find("define_fields(&outer::INNER, [").unwrap();
    let outer_fields = content.find("define_fields(&OUTER, [").unwrap();
    assert!(inner_fields < outer_fields);
}

#[test]
fn packed_and_required_labels() {
    let mut packed = scalar_field("xs", 1, Type::Int32, Label::Repeated);
    let mut options = protox_types::FieldOptions::new();
    options.set_packed(true);
    packed.set_options(options);

    let mut message = DescriptorProto::new();
    message.set_name("Numbers");
    message.add_field(packed);
    message.add_field(scalar_field("ys", 2, Type::Int32, Label::Repeated));
    message.add_field(scalar_field("id", 3, Type::Uint32, Label::Required));

    let mut file = FileDescriptorProto::new();
    file.set_name("numbers.proto");
    file.add_message(message);

    let files = generate(&request_for(vec![file], "")).unwrap();
    let content = files[0].content().to_string();

    assert!(content.contains("(\"xs\", Field::int32(1).repeated().packed()),"));
    assert!(content.contains("(\"ys\", Field::int32(2).repeated()),"));
    assert!(content.contains("(\"id\", Field::uint32(3).required()),"));
}

#[test]
fn proto2_defaults_are_translated() {
    let mut message = DescriptorProto::new();
    message.set_name("Legacy");
    {
        let mut field = scalar_field("x", 1, Type::Int32, Label::Optional);
        field.set_default_value("777");
        message.add_field(field);
    }
    {
        let mut field = scalar_field("greeting", 2, Type::String, Label::Optional);
        field.set_default_value("hello");
        message.add_field(field);
    }
    {
        let mut field = scalar_field("ratio", 3, Type::Float, Label::Optional);
        field.set_default_value("1.5");
        message.add_field(field);
    }

    let mut file = FileDescriptorProto::new();
    file.set_name("legacy.proto");
    file.add_message(message);

    let files = generate(&request_for(vec![file], "")).unwrap();
    let content = files[0].content().to_string();

    assert!(content.contains("(\"x\", Field::int32(1).with_default(777i32)),"));
    assert!(content.contains("(\"greeting\", Field::string(2).with_default(\"hello\")),"));
    assert!(content.contains("(\"ratio\", Field::float(3).with_default(1.5f32)),"));
    // Proto2: no implicit zero defaults.
    assert!(!content.contains("with_default(0u32)"));
}

#[test]
fn one_of_groups_skip_implicit_defaults() {
    let mut decl = OneofDescriptorProto::new();
    decl.set_name("result");

    let mut ok = scalar_field("ok", 1, Type::Int32, Label::Optional);
    ok.set_oneof_index(0);
    let mut fail = scalar_field("fail", 2, Type::String, Label::Optional);
    fail.set_oneof_index(0);

    let mut message = DescriptorProto::new();
    message.set_name("Outcome");
    message.add_field(ok);
    message.add_field(fail);
    message.add_oneof_decl(decl);

    let mut file = FileDescriptorProto::new();
    file.set_name("outcome.proto");
    file.set_syntax("proto3");
    file.add_message(message);

    let files = generate(&request_for(vec![file], "")).unwrap();
    let content = files[0].content().to_string();

    assert!(content.contains("MessageType::with_one_ofs(\"Outcome\", &["));
    assert!(content.contains("(\"result\", &[\"ok\", \"fail\"]),"));
    // One-of members keep genuine absence, so no zero defaults.
    assert!(content.contains("(\"ok\", Field::int32(1)),"));
    assert!(content.contains("(\"fail\", Field::string(2)),"));
}

#[test]
fn cross_file_references_import_the_other_module() {
    let mut thing = DescriptorProto::new();
    thing.set_name("Thing");
    let mut things = FileDescriptorProto::new();
    things.set_name("common/things.proto");
    things.set_package("common");
    things.add_message(thing);

    let mut holder = DescriptorProto::new();
    holder.set_name("Holder");
    holder.add_field(message_field("thing", 1, ".common.Thing", Label::Optional));
    let mut main = FileDescriptorProto::new();
    main.set_name("main.proto");
    main.add_message(holder);

    let mut request = CodeGeneratorRequest::new();
    request.set_parameter("base-package=app/protobuf");
    request.add_file_to_generate("main.proto");
    request.add_proto_file(things);
    request.add_proto_file(main);

    let files = generate(&request).unwrap();
    // Only main.proto was requested.
    assert_eq!(files.len(), 1);
    let out = &files[0];
    assert_eq!(out.name(), "app/protobuf/main_pb.rs");

    let content = out.content();
    assert!(content
        .contains("use crate::app::protobuf::common::things_pb as common__things_pb;"));
    assert!(content.contains("(\"thing\", Field::message(1, common__things_pb::thing())),"));
    assert!(content.contains("pub fn thing(&self) -> Option<common__things_pb::Thing> {"));
}

#[test]
fn with_dependencies_also_emits_imports() {
    let mut thing = DescriptorProto::new();
    thing.set_name("Thing");
    let mut things = FileDescriptorProto::new();
    things.set_name("things.proto");
    things.add_message(thing);

    let mut holder = DescriptorProto::new();
    holder.set_name("Holder");
    holder.add_field(message_field("thing", 1, ".Thing", Label::Optional));
    let mut main = FileDescriptorProto::new();
    main.set_name("main.proto");
    main.add_message(holder);

    let mut request = CodeGeneratorRequest::new();
    request.set_parameter("with-dependencies");
    request.add_file_to_generate("main.proto");
    request.add_proto_file(things);
    request.add_proto_file(main);

    let files = generate(&request).unwrap();
    let mut names: Vec<&str> = files.iter().map(|f| f.name()).collect();
    names.sort_unstable();
    assert_eq!(names, ["main_pb.rs", "things_pb.rs"]);
}

#[test]
fn well_known_types_collapse_to_the_runtime_namespace() {
    let mut empty = DescriptorProto::new();
    empty.set_name("Empty");
    let mut google = FileDescriptorProto::new();
    google.set_name("google/protobuf/empty.proto");
    google.set_package("google.protobuf");
    google.add_message(empty);

    let mut holder = DescriptorProto::new();
    holder.set_name("Holder");
    holder.add_field(message_field(
        "nothing",
        1,
        ".google.protobuf.Empty",
        Label::Optional,
    ));
    let mut main = FileDescriptorProto::new();
    main.set_name("main.proto");
    main.add_message(holder);

    // empty.proto is an import, not a requested file.
    let mut request = CodeGeneratorRequest::new();
    request.set_parameter("with-dependencies");
    request.add_file_to_generate("main.proto");
    request.add_proto_file(google);
    request.add_proto_file(main);

    let files = generate(&request).unwrap();
    assert_eq!(files.len(), 1);

    let content = files[0].content();
    assert!(content.contains(
        "(\"nothing\", Field::message(1, protox_types::Empty::message_type())),"
    ));
    assert!(content.contains("pub fn nothing(&self) -> Option<protox_types::Empty> {"));
    assert!(!content.contains("google__protobuf__empty_pb"));
}

#[test]
fn grpclib_stubs() {
    let mut say_hello = MethodDescriptorProto::new();
    say_hello.set_name("SayHello");
    say_hello.set_input_type(".greet.Hello");
    say_hello.set_output_type(".greet.Hello");

    let mut subscribe = MethodDescriptorProto::new();
    subscribe.set_name("Subscribe");
    subscribe.set_input_type(".greet.Hello");
    subscribe.set_output_type(".greet.Hello");
    subscribe.set_server_streaming(true);

    let mut service = ServiceDescriptorProto::new();
    service.set_name("Greeter");
    service.add_method(say_hello);
    service.add_method(subscribe);

    let mut hello = DescriptorProto::new();
    hello.set_name("Hello");
    hello.add_field(scalar_field("name", 1, Type::String, Label::Optional));

    let mut file = FileDescriptorProto::new();
    file.set_name("greet.proto");
    file.set_package("greet");
    file.set_syntax("proto3");
    file.add_message(hello);
    file.add_service(service);

    let files = generate(&request_for(vec![file], "grpclib")).unwrap();
    let mut names: Vec<&str> = files.iter().map(|f| f.name()).collect();
    names.sort_unstable();
    assert_eq!(names, ["greet_grpclib.rs", "greet_pb.rs"]);

    let stubs = files
        .iter()
        .find(|f| f.name() == "greet_grpclib.rs")
        .unwrap();
    let content = stubs.content();

    // Server base with one async handler per RPC and the route table.
    assert!(content.contains("pub trait GreeterBase {"));
    assert!(content.contains(
        "async fn say_hello(&self, stream: &mut grpclib::server::Stream) -> grpclib::Result<()>;"
    ));
    assert!(content.contains("\"/greet.Greeter/SayHello\","));
    assert!(content.contains("grpclib::Cardinality::UnaryUnary,"));
    assert!(content.contains("grpclib::Cardinality::UnaryStream,"));
    assert!(content.contains("greet_pb::hello(),"));

    // Client stub binding one call object per RPC.
    assert!(content.contains("pub struct GreeterStub {"));
    assert!(content.contains("pub say_hello: grpclib::client::UnaryUnaryMethod,"));
    assert!(content.contains("pub subscribe: grpclib::client::UnaryStreamMethod,"));
    assert!(content.contains("use crate::greet_pb;"));
}

#[test]
fn snake_case_option_mangles_collisions() {
    let mut message = DescriptorProto::new();
    message.set_name("Clash");
    message.add_field(scalar_field("userName", 1, Type::String, Label::Optional));
    message.add_field(scalar_field("user_name", 2, Type::String, Label::Optional));
    message.add_field(scalar_field("type", 3, Type::Int32, Label::Optional));

    let mut file = FileDescriptorProto::new();
    file.set_name("clash.proto");
    file.add_message(message);

    let files = generate(&request_for(vec![file.clone()], "snake-case")).unwrap();
    let content = files[0].content().to_string();
    assert!(content.contains("(\"user_name_1\", Field::string(1)),"));
    assert!(content.contains("(\"user_name\", Field::string(2)),"));
    assert!(content.contains("(\"type_1\", Field::int32(3)),"));

    // Without the option, names pass through untouched.
    let files = generate(&request_for(vec![file], "")).unwrap();
    let content = files[0].content().to_string();
    assert!(content.contains("(\"userName\", Field::string(1)),"));
    assert!(content.contains("(\"type\", Field::int32(3)),"));
}

#[test]
fn group_fields_turn_into_a_response_error() {
    let mut message = DescriptorProto::new();
    message.set_name("Old");
    message.add_field(scalar_field("grp", 1, Type::Group, Label::Optional));

    let mut file = FileDescriptorProto::new();
    file.set_name("old.proto");
    file.add_message(message);

    let request = request_for(vec![file], "");
    assert_eq!(generate(&request), Err(GeneratorError::GroupsUnsupported));

    let response = run(&request);
    assert!(response.error().contains("groups are not supported"));
    assert!(response.files().is_empty());
}

#[test]
fn unknown_options_turn_into_a_response_error() {
    let response = run(&request_for(vec![user_file()], "mystery-option"));
    assert!(response.error().contains("unknown option"));
}

#[test]
fn empty_files_produce_no_output() {
    let mut file = FileDescriptorProto::new();
    file.set_name("nothing.proto");

    let files = generate(&request_for(vec![file], "")).unwrap();
    assert!(files.is_empty());
}

#[test]
fn embedded_descriptor_is_preserved() {
    let request = request_for(vec![user_file()], "");
    let files = generate(&request).unwrap();
    let content = files[0].content();

    assert!(content.contains("pub static FILE_DESCRIPTOR: Lazy<protox_types::FileDescriptorProto>"));
    // The embedded bytes decode back to the original descriptor.
    assert!(content.contains("protox_types::FileDescriptorProto::from_bytes(b\""));
}
