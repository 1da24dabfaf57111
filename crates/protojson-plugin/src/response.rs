//! Building the protoc plugin response.

use prost::Message;
use prost_types::compiler::{CodeGeneratorResponse, code_generator_response};
use protojson_codegen::Fragment;
use protojson_core::CodegenError;

/// Features advertised to protoc.
///
/// Presence checks use `hasX()`, which protoc generates for proto3 `optional`.
fn supported_features() -> u64 {
    code_generator_response::Feature::Proto3Optional as u64
}

/// Response carrying every fragment as an insertion into its Java file.
pub fn success(fragments: Vec<Fragment>) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        supported_features: Some(supported_features()),
        file: fragments.into_iter().map(into_file).collect(),
        ..Default::default()
    }
}

/// Response reporting a failed run. protoc prints the error and fails.
pub fn failure(error: &CodegenError) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(error.to_string()),
        supported_features: Some(supported_features()),
        ..Default::default()
    }
}

/// Serialize a response for stdout.
pub fn encode(response: &CodeGeneratorResponse) -> Vec<u8> {
    response.encode_to_vec()
}

fn into_file(fragment: Fragment) -> code_generator_response::File {
    code_generator_response::File {
        name: Some(fragment.file_name),
        insertion_point: Some(fragment.insertion_point),
        content: Some(fragment.content),
        ..Default::default()
    }
}
