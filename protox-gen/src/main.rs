//! The `protoc-gen-protox` plugin binary.
//!
//! The protobuf compiler feeds one serialized `CodeGeneratorRequest` on
//! standard input and expects one serialized `CodeGeneratorResponse` on
//! standard output. Generation failures are reported through the response's
//! `error` field; only malformed input or an I/O failure exits non-zero.

use std::io::{self, Error, ErrorKind, Read, Write};

use protox_types::compiler::CodeGeneratorRequest;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;

    let request = CodeGeneratorRequest::from_bytes(&buf).map_err(|err| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("invalid CodeGeneratorRequest: {err}"),
        )
    })?;

    let response = protox_gen::run(&request);

    let out = response.to_bytes().map_err(|err| {
        Error::new(
            ErrorKind::InvalidData,
            format!("invalid CodeGeneratorResponse: {err}"),
        )
    })?;
    io::stdout().write_all(&out)?;

    Ok(())
}
