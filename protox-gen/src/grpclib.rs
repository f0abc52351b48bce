//! Emits `<stem>_grpclib.rs` service stubs: an abstract server base with a
//! route mapping, and a client stub binding one call object per RPC.

use std::collections::BTreeMap;

use log::debug;
use protox_types::compiler::code_generator_response;
use protox_types::{FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto};

use crate::buffer::CodeBuffer;
use crate::code_generator::{
    file_alias, is_well_known_type, module_path, output_name,
};
use crate::ident::{to_snake, to_upper_camel};
use crate::index::Index;
use crate::{GeneratorError, Params, GRPCLIB_FILE_SUFFIX};

/// The cardinality constant for a method, from its streaming flags.
fn cardinality(method: &MethodDescriptorProto) -> &'static str {
    match (method.client_streaming(), method.server_streaming()) {
        (false, false) => "UnaryUnary",
        (false, true) => "UnaryStream",
        (true, false) => "StreamUnary",
        (true, true) => "StreamStream",
    }
}

/// The client call type for a method, from its streaming flags.
fn client_method_type(method: &MethodDescriptorProto) -> &'static str {
    match (method.client_streaming(), method.server_streaming()) {
        (false, false) => "UnaryUnaryMethod",
        (false, true) => "UnaryStreamMethod",
        (true, false) => "StreamUnaryMethod",
        (true, true) => "StreamStreamMethod",
    }
}

pub(crate) struct GrpclibCodeGenerator<'a> {
    file: &'a FileDescriptorProto,
    index: &'a Index,
    params: &'a Params,
    import_requests: BTreeMap<String, FileDescriptorProto>,
}

impl<'a> GrpclibCodeGenerator<'a> {
    pub(crate) fn new(
        file: &'a FileDescriptorProto,
        index: &'a Index,
        params: &'a Params,
    ) -> GrpclibCodeGenerator<'a> {
        GrpclibCodeGenerator {
            file,
            index,
            params,
            import_requests: BTreeMap::new(),
        }
    }

    /// The request path of a method: `/<package>.<Service>/<Method>`.
    fn request_path(&self, service: &ServiceDescriptorProto, method: &MethodDescriptorProto) -> String {
        if self.file.package().is_empty() {
            format!("/{}/{}", service.name(), method.name())
        } else {
            format!("/{}.{}/{}", self.file.package(), service.name(), method.name())
        }
    }

    /// An expression yielding the runtime type of a request or response
    /// message, importing the defining module when needed.
    fn message_type_expr(&mut self, type_name: &str) -> Result<String, GeneratorError> {
        if is_well_known_type(type_name) {
            let simple = type_name.rsplit('.').next().unwrap_or(type_name);
            return Ok(format!("protox_types::{simple}::message_type()"));
        }

        let file = match self.index.file_of(type_name) {
            Some(file) => file.clone(),
            None => {
                return Err(GeneratorError::UnknownType {
                    type_name: type_name.to_string(),
                    context: "service method".to_string(),
                })
            }
        };

        // Every reference goes through the generated module's accessor,
        // the service's own file included.
        let alias = file_alias(file.name());
        self.import_requests.insert(file.name().to_string(), file.clone());

        let stripped = type_name.strip_prefix('.').unwrap_or(type_name);
        let package = file.package();
        let relative = if package.is_empty() {
            stripped
        } else {
            stripped
                .strip_prefix(package)
                .map(|rest| rest.strip_prefix('.').unwrap_or(rest))
                .unwrap_or(stripped)
        };

        let segments: Vec<&str> = relative.split('.').collect();
        let mut parts: Vec<String> = segments[..segments.len() - 1]
            .iter()
            .map(|part| to_snake(part))
            .collect();
        parts.push(format!(
            "{}()",
            to_snake(segments.last().copied().unwrap_or(""))
        ));

        Ok(format!("{alias}::{}", parts.join("::")))
    }

    fn write_service(
        &mut self,
        buf: &mut CodeBuffer,
        service: &ServiceDescriptorProto,
    ) -> Result<(), GeneratorError> {
        debug!("  service: {:?}", service.name());

        let base_name = format!("{}Base", to_upper_camel(service.name()));
        let stub_name = format!("{}Stub", to_upper_camel(service.name()));
        let methods = service.methods();

        // Resolve the per-method pieces up front; emission below is pure.
        let mut resolved = Vec::with_capacity(methods.len());
        for method in &methods {
            resolved.push((
                to_snake(method.name()),
                self.request_path(service, method),
                cardinality(method),
                client_method_type(method),
                self.message_type_expr(method.input_type())?,
                self.message_type_expr(method.output_type())?,
            ));
        }

        // Abstract server base: one handler per RPC plus the route table.
        buf.line(&format!(
            "/// Server side of `{}`: implement one handler per RPC.",
            service.name()
        ));
        buf.block(&format!("pub trait {base_name} {{"), "}", |buf| {
            for (fn_name, ..) in &resolved {
                buf.line(&format!(
                    "async fn {fn_name}(&self, stream: &mut grpclib::server::Stream) -> grpclib::Result<()>;"
                ));
                buf.blank();
            }

            buf.line("/// Routes served by this service, keyed by request path.");
            buf.block(
                "fn mapping(&self) -> Vec<grpclib::Handler> {",
                "}",
                |buf| {
                    if resolved.is_empty() {
                        buf.line("Vec::new()");
                        return;
                    }
                    buf.block("vec![", "]", |buf| {
                        for (_, path, cardinality, _, input, output) in &resolved {
                            buf.block("grpclib::Handler::new(", "),", |buf| {
                                buf.line(&format!("{path:?},"));
                                buf.line(&format!("grpclib::Cardinality::{cardinality},"));
                                buf.line(&format!("{input},"));
                                buf.line(&format!("{output},"));
                            });
                        }
                    });
                },
            );
        });
        buf.blank();

        // Client stub: one bound call object per RPC.
        buf.block(&format!("pub struct {stub_name} {{"), "}", |buf| {
            for (fn_name, _, _, method_type, ..) in &resolved {
                buf.line(&format!("pub {fn_name}: grpclib::client::{method_type},"));
            }
        });
        buf.blank();

        buf.block(&format!("impl {stub_name} {{"), "}", |buf| {
            buf.block(
                &format!("pub fn new(channel: &grpclib::client::Channel) -> {stub_name} {{"),
                "}",
                |buf| {
                    buf.block(&format!("{stub_name} {{"), "}", |buf| {
                        for (fn_name, path, _, method_type, input, output) in &resolved {
                            buf.block(
                                &format!("{fn_name}: grpclib::client::{method_type}::new("),
                                "),",
                                |buf| {
                                    buf.line("channel,");
                                    buf.line(&format!("{path:?},"));
                                    buf.line(&format!("{input},"));
                                    buf.line(&format!("{output},"));
                                },
                            );
                        }
                    });
                },
            );
        });
        buf.blank();

        Ok(())
    }

    /// Produces the `<stem>_grpclib.rs` service module for this file.
    pub(crate) fn generate(
        mut self,
    ) -> Result<Option<code_generator_response::File>, GeneratorError> {
        let services = self.file.services();
        if services.is_empty() {
            return Ok(None);
        }

        let mut body = CodeBuffer::new();
        for service in &services {
            self.write_service(&mut body, service)?;
        }

        let mut header = CodeBuffer::new();
        header.line("// Generated by protoc-gen-protox. DO NOT EDIT!");
        header.line(&format!("// source: {}", self.file.name()));
        header.blank();
        header.line("#![allow(unused_imports)]");
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
            GRPCLIB_FILE_SUFFIX,
            &self.params.base_package,
        ));
        out.set_content(&content);
        Ok(Some(out))
    }
}
