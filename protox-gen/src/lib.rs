#![doc(html_root_url = "https://docs.rs/protox-gen/0.1.0")]

//! `protox-gen` turns a compiler plugin request into Rust bindings for the
//! `protox` runtime.
//!
//! The flow is a single synchronous pass: decode the
//! [`CodeGeneratorRequest`], build a cross-file [`Index`] of every message
//! and enum, then emit one `<stem>_pb.rs` module per requested file (plus
//! `<stem>_grpclib.rs` service stubs under the `grpclib` option). Any
//! internal failure is reported through the response's `error` field so the
//! protobuf compiler can print it.
//!
//! The tool is normally driven by `protoc` through the
//! [`protoc-gen-protox`](crate) binary, but [`run`] can be called directly
//! with an in-memory request.

use std::collections::HashSet;

use protox_types::compiler::{code_generator_response, CodeGeneratorRequest, CodeGeneratorResponse};
use protox_types::FileDescriptorProto;
use thiserror::Error;

mod buffer;
mod code_generator;
mod grpclib;
mod ident;
mod index;

pub use index::Index;

use code_generator::CodeGenerator;
use grpclib::GrpclibCodeGenerator;

/// Suffix of generated message binding modules.
pub const PROTOBUF_FILE_SUFFIX: &str = "_pb";
/// Suffix of generated service stub modules.
pub const GRPCLIB_FILE_SUFFIX: &str = "_grpclib";

/// An internal generation failure, reported through the response's `error`
/// field.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeneratorError {
    #[error("could not parse option: {0}")]
    InvalidOption(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("groups are not supported [deprecated by protobuf]")]
    GroupsUnsupported,

    #[error("unknown type {type_name:?} referenced from {context:?}")]
    UnknownType { type_name: String, context: String },

    #[error(transparent)]
    Encode(#[from] protox::EncodeError),
}

/// Options parsed from the request's free-form `parameter` string.
///
/// Options are comma- or space-separated; a leading `--` on any option is
/// tolerated for command-line symmetry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    /// Prefix prepended to every emitted file path and generated import
    /// path, e.g. `app/protobuf`.
    pub base_package: String,
    /// Also generate bindings for imported files, not only the explicitly
    /// requested set.
    pub with_dependencies: bool,
    /// Emit service stubs alongside message bindings.
    pub grpclib: bool,
    /// Convert field and RPC identifiers to snake_case, mangling keyword
    /// and sibling collisions.
    pub snake_case: bool,
}

impl Params {
    pub fn parse(parameter: &str) -> Result<Params, GeneratorError> {
        let mut params = Params::default();

        let tokens = parameter
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(|token| token.trim_matches(|c| c == '"' || c == '\''))
            .filter(|token| !token.is_empty());

        for token in tokens {
            let token = token.strip_prefix("--").unwrap_or(token);
            match token.split_once('=') {
                Some(("base-package" | "base_package", value)) => {
                    params.base_package = value.trim().trim_end_matches('/').to_string();
                }
                Some(_) => return Err(GeneratorError::UnknownOption(token.to_string())),
                None => match token {
                    "with-dependencies" | "with_dependencies" => params.with_dependencies = true,
                    "grpclib" => params.grpclib = true,
                    "snake-case" | "snake_case" => params.snake_case = true,
                    "base-package" | "base_package" => {
                        return Err(GeneratorError::InvalidOption(token.to_string()))
                    }
                    _ => return Err(GeneratorError::UnknownOption(token.to_string())),
                },
            }
        }

        Ok(params)
    }
}

/// Generates the output files for a request, or the error the response
/// should carry.
pub fn generate(
    request: &CodeGeneratorRequest,
) -> Result<Vec<code_generator_response::File>, GeneratorError> {
    let params = Params::parse(request.parameter())?;
    let index = Index::build(request);

    let requested: HashSet<String> = request.files_to_generate().into_iter().collect();
    let selected: Vec<FileDescriptorProto> = request
        .proto_files()
        .into_iter()
        .filter(|file| {
            requested.contains(file.name())
                || (params.with_dependencies && !file.name().starts_with("google/protobuf/"))
        })
        .collect();

    let mut outputs = Vec::new();
    for file in &selected {
        if let Some(out) = CodeGenerator::new(file, &index, &params).generate()? {
            outputs.push(out);
        }
    }

    if params.grpclib {
        for file in &selected {
            if let Some(out) = GrpclibCodeGenerator::new(file, &index, &params).generate()? {
                outputs.push(out);
            }
        }
    }

    Ok(outputs)
}

/// Runs the generator, folding any internal failure into the response's
/// `error` field.
pub fn run(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse::new();
    match generate(request) {
        Ok(files) => {
            for file in files {
                response.add_file(file);
            }
        }
        Err(err) => response.set_error(&err.to_string()),
    }
    response
}
