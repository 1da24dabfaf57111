//! Decoding of the protoc plugin request.
//!
//! The request is decoded with the descriptor files kept as raw bytes and
//! then re-encoded into a descriptor set for `prost-reflect`. Going through
//! `prost_types` would drop the custom option extensions the generators rely on.

use prost::Message;
use prost_reflect::DescriptorPool;
use protojson_core::{CodegenError, CodegenResult};

/// `CodeGeneratorRequest` with `proto_file` left undecoded.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RawCodeGeneratorRequest {
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: ::prost::alloc::vec::Vec<String>,
    #[prost(string, optional, tag = "2")]
    pub parameter: Option<String>,
    #[prost(bytes, repeated, tag = "15")]
    pub proto_file: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

/// `FileDescriptorSet` with its files left undecoded.
#[derive(Clone, PartialEq, ::prost::Message)]
struct RawFileDescriptorSet {
    #[prost(bytes, repeated, tag = "1")]
    pub file: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

impl RawCodeGeneratorRequest {
    /// Decode a serialized request.
    pub fn from_bytes(input: &[u8]) -> CodegenResult<Self> {
        Self::decode(input).map_err(|e| CodegenError::Decode(e.to_string()))
    }

    /// Build a descriptor pool holding every file in the request.
    pub fn descriptor_pool(&self) -> CodegenResult<DescriptorPool> {
        let set = RawFileDescriptorSet {
            file: self.proto_file.clone(),
        };
        DescriptorPool::decode(set.encode_to_vec().as_slice())
            .map_err(|e| CodegenError::Descriptor(e.to_string()))
    }
}
