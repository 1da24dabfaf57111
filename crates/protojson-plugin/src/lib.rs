//! protojson-plugin - protoc plugin for Java JSON codecs and HTTP stubs
//!
//! This crate provides:
//! - [`RawCodeGeneratorRequest`] decoding that keeps custom option extensions
//! - [`lower_file`] to turn `prost-reflect` descriptors into a [`FileSpec`](protojson_core::FileSpec)
//! - [`generate`] and [`respond`] to run the generators over a request
//! - [`init_logging`] for stderr diagnostics
//!
//! Run it through protoc next to the built-in Java generator:
//!
//! ```bash
//! protoc --java_out=out --java-json_out=out --plugin=protoc-gen-java-json acme/shop.proto
//! ```

mod logging;
mod lower;
mod request;
pub mod response;

pub use logging::{build_filter, init_logging};
pub use lower::{JavaNames, OptionExtensions, lower_file};
pub use request::RawCodeGeneratorRequest;

use prost_types::compiler::CodeGeneratorResponse;
use protojson_codegen::{Fragment, FragmentBuffer, generate_files};
use protojson_core::{CodegenError, CodegenResult, GeneratorConfig};
use tracing::debug;

/// Generate fragments for every file protoc asked for.
pub fn generate(
    request: &RawCodeGeneratorRequest,
    config: &GeneratorConfig,
) -> CodegenResult<Vec<Fragment>> {
    let pool = request.descriptor_pool()?;
    let extensions = OptionExtensions::resolve(&pool, config);

    let files = request
        .file_to_generate
        .iter()
        .map(|name| {
            pool.get_file_by_name(name)
                .map(|file| lower_file(&file, &extensions))
                .ok_or_else(|| CodegenError::Descriptor(format!("file {name} not found in request")))
        })
        .collect::<CodegenResult<Vec<_>>>()?;
    debug!(files = files.len(), "lowered descriptors");

    let mut sink = FragmentBuffer::new();
    generate_files(&files, &mut sink).into_result()?;
    Ok(sink.into_fragments())
}

/// Run the generators and wrap the outcome in a response.
pub fn respond(request: &RawCodeGeneratorRequest, config: &GeneratorConfig) -> CodeGeneratorResponse {
    match generate(request, config) {
        Ok(fragments) => response::success(fragments),
        Err(err) => response::failure(&err),
    }
}
