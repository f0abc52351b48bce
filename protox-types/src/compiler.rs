//! The `protoc` plugin vocabulary: the request a plugin reads from standard
//! input and the response it writes to standard output.

use once_cell::sync::Lazy;
use protox::{define_fields, Field, FieldValidationError, MessageType};

use crate::descriptor::{FileDescriptorProto, FILE_DESCRIPTOR_PROTO};
use crate::macros::message_wrapper;
use crate::{messages_of, push_in, set_in, strings_of};

pub(crate) static VERSION: Lazy<MessageType> = Lazy::new(|| MessageType::new("Version"));
pub(crate) static CODE_GENERATOR_REQUEST: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("CodeGeneratorRequest"));
pub(crate) static CODE_GENERATOR_RESPONSE: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("CodeGeneratorResponse"));
pub(crate) static RESPONSE_FILE: Lazy<MessageType> =
    Lazy::new(|| MessageType::new("CodeGeneratorResponse.File"));

pub(crate) fn register() -> Result<(), FieldValidationError> {
    define_fields(
        &VERSION,
        [
            ("major", Field::int32(1)),
            ("minor", Field::int32(2)),
            ("patch", Field::int32(3)),
            ("suffix", Field::string(4)),
        ],
    )?;

    define_fields(
        &CODE_GENERATOR_REQUEST,
        [
            ("file_to_generate", Field::string(1).repeated()),
            ("parameter", Field::string(2)),
            ("proto_file", Field::message(15, &FILE_DESCRIPTOR_PROTO).repeated()),
            ("compiler_version", Field::message(3, &VERSION)),
        ],
    )?;

    define_fields(
        &CODE_GENERATOR_RESPONSE,
        [
            ("error", Field::string(1)),
            ("file", Field::message(15, &RESPONSE_FILE).repeated()),
        ],
    )?;

    define_fields(
        &RESPONSE_FILE,
        [
            ("name", Field::string(1)),
            ("insertion_point", Field::string(2)),
            ("content", Field::string(15)),
        ],
    )?;

    Ok(())
}

message_wrapper! {
    /// The version of the compiler that invoked the plugin.
    Version, VERSION
}

impl Version {
    pub fn major(&self) -> i32 {
        self.msg.get_i32("major").unwrap_or(0)
    }

    pub fn minor(&self) -> i32 {
        self.msg.get_i32("minor").unwrap_or(0)
    }

    pub fn patch(&self) -> i32 {
        self.msg.get_i32("patch").unwrap_or(0)
    }
}

message_wrapper! {
    /// Everything the compiler hands a plugin: the files to generate, the
    /// free-form parameter string, and every `.proto` file in the
    /// transitive import closure.
    CodeGeneratorRequest, CODE_GENERATOR_REQUEST
}

impl CodeGeneratorRequest {
    /// The files the invocation asked to generate. Imports of these files
    /// appear in [`proto_files`](Self::proto_files) but not here.
    pub fn files_to_generate(&self) -> Vec<String> {
        strings_of(&self.msg, "file_to_generate")
    }

    pub fn add_file_to_generate(&mut self, name: &str) {
        push_in(&mut self.msg, "file_to_generate", name);
    }

    /// The options passed with `--<plugin>_opt` or after the output
    /// directory, verbatim.
    pub fn parameter(&self) -> &str {
        self.msg.get_str("parameter").unwrap_or("")
    }

    pub fn set_parameter(&mut self, parameter: &str) {
        set_in(&mut self.msg, "parameter", parameter);
    }

    /// The requested files plus all of their transitive imports, in
    /// topological order.
    pub fn proto_files(&self) -> Vec<FileDescriptorProto> {
        messages_of(&self.msg, "proto_file")
    }

    pub fn add_proto_file(&mut self, file: FileDescriptorProto) {
        push_in(&mut self.msg, "proto_file", file);
    }
}

message_wrapper! {
    /// The plugin's answer: generated files, or a human-readable error.
    CodeGeneratorResponse, CODE_GENERATOR_RESPONSE
}

impl CodeGeneratorResponse {
    pub fn error(&self) -> &str {
        self.msg.get_str("error").unwrap_or("")
    }

    pub fn set_error(&mut self, error: &str) {
        set_in(&mut self.msg, "error", error);
    }

    pub fn files(&self) -> Vec<code_generator_response::File> {
        messages_of(&self.msg, "file")
    }

    pub fn add_file(&mut self, file: code_generator_response::File) {
        push_in(&mut self.msg, "file", file);
    }
}

pub mod code_generator_response {
    use super::RESPONSE_FILE;
    use crate::macros::message_wrapper;
    use crate::set_in;

    message_wrapper! {
        /// A single generated output file.
        File, RESPONSE_FILE
    }

    impl File {
        pub fn name(&self) -> &str {
            self.msg.get_str("name").unwrap_or("")
        }

        pub fn set_name(&mut self, name: &str) {
            set_in(&mut self.msg, "name", name);
        }

        pub fn content(&self) -> &str {
            self.msg.get_str("content").unwrap_or("")
        }

        pub fn set_content(&mut self, content: &str) {
            set_in(&mut self.msg, "content", content);
        }
    }
}
