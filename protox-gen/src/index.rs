//! A cross-file index of every type the compiler handed us.
//!
//! Fully qualified names are dotted paths with a leading dot
//! (`.package.Outer.Inner`); nested messages and enums inherit the
//! enclosing type's prefix.

use std::collections::HashMap;

use log::debug;
use protox_types::compiler::CodeGeneratorRequest;
use protox_types::{DescriptorProto, EnumDescriptorProto, FileDescriptorProto};

pub struct Index {
    /// Message descriptors by fully qualified name.
    messages: HashMap<String, DescriptorProto>,
    /// The file each type (message or enum) was declared in.
    proto_files: HashMap<String, FileDescriptorProto>,
}

impl Index {
    pub fn build(request: &CodeGeneratorRequest) -> Index {
        let mut index = Index {
            messages: HashMap::new(),
            proto_files: HashMap::new(),
        };
        for file in request.proto_files() {
            index.visit_file(&file);
        }
        index
    }

    pub fn message(&self, full_name: &str) -> Option<&DescriptorProto> {
        self.messages.get(full_name)
    }

    pub fn file_of(&self, full_name: &str) -> Option<&FileDescriptorProto> {
        self.proto_files.get(full_name)
    }

    /// Whether the message under `full_name` is a synthetic map entry.
    pub fn is_map_entry(&self, full_name: &str) -> bool {
        self.message(full_name)
            .map(|message| message.is_map_entry())
            .unwrap_or(false)
    }

    fn visit_file(&mut self, file: &FileDescriptorProto) {
        debug!("indexing file: {:?}", file.name());

        let prefix = if file.package().is_empty() {
            ".".to_string()
        } else {
            format!(".{}.", file.package())
        };

        for message in file.messages() {
            self.visit_message(&prefix, &message, file);
        }
        for descriptor in file.enums() {
            self.visit_enum(&prefix, &descriptor, file);
        }
    }

    fn visit_message(
        &mut self,
        prefix: &str,
        message: &DescriptorProto,
        file: &FileDescriptorProto,
    ) {
        let full_name = format!("{prefix}{}", message.name());
        debug!("  message: {full_name}");

        self.proto_files.insert(full_name.clone(), file.clone());
        self.messages.insert(full_name.clone(), message.clone());

        let nested_prefix = format!("{full_name}.");
        for nested in message.nested_types() {
            self.visit_message(&nested_prefix, &nested, file);
        }
        for descriptor in message.enums() {
            self.visit_enum(&nested_prefix, &descriptor, file);
        }
    }

    fn visit_enum(
        &mut self,
        prefix: &str,
        descriptor: &EnumDescriptorProto,
        file: &FileDescriptorProto,
    ) {
        let full_name = format!("{prefix}{}", descriptor.name());
        debug!("  enum: {full_name}");
        self.proto_files.insert(full_name, file.clone());
    }
}
