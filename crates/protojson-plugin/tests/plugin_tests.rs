//! Integration tests running the plugin over encoded protoc requests.

#![allow(non_snake_case)]

use prost::Message;
use prost::encoding::encode_varint;
use prost_reflect::DescriptorPool;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileOptions,
    MethodDescriptorProto, ServiceDescriptorProto,
};
use protojson_codegen::Fragment;
use protojson_core::GeneratorConfig;
use protojson_plugin::{RawCodeGeneratorRequest, generate, respond, response};

fn field(name: &str, number: i32, ty: Type, label: Label, type_name: Option<&str>) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.into()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        type_name: type_name.map(Into::into),
        ..Default::default()
    }
}

fn common_file() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("acme/common.proto".into()),
        package: Some("acme.common".into()),
        syntax: Some("proto2".into()),
        message_type: vec![DescriptorProto {
            name: Some("Money".into()),
            field: vec![field("cents", 1, Type::Int64, Label::Optional, None)],
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn orders_file(with_service: bool) -> FileDescriptorProto {
    let order = DescriptorProto {
        name: Some("Order".into()),
        field: vec![
            field("order_id", 1, Type::String, Label::Optional, None),
            field("total", 2, Type::Message, Label::Optional, Some(".acme.common.Money")),
            field("notes", 3, Type::String, Label::Repeated, None),
        ],
        ..Default::default()
    };

    let service = ServiceDescriptorProto {
        name: Some("OrderService".into()),
        method: vec![MethodDescriptorProto {
            name: Some("GetOrder".into()),
            input_type: Some(".acme.orders.Order".into()),
            output_type: Some(".acme.orders.Order".into()),
            ..Default::default()
        }],
        ..Default::default()
    };

    FileDescriptorProto {
        name: Some("acme/orders.proto".into()),
        package: Some("acme.orders".into()),
        syntax: Some("proto2".into()),
        dependency: vec!["acme/common.proto".into()],
        message_type: vec![order],
        service: if with_service { vec![service] } else { vec![] },
        options: Some(FileOptions {
            java_package: Some("com.acme.orders".into()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn request(with_service: bool) -> RawCodeGeneratorRequest {
    let request = CodeGeneratorRequest {
        file_to_generate: vec!["acme/orders.proto".into()],
        proto_file: vec![common_file(), orders_file(with_service)],
        ..Default::default()
    };
    RawCodeGeneratorRequest::from_bytes(&request.encode_to_vec()).unwrap()
}

#[test]
fn generate___messages_only___emits_fragment_for_requested_file() {
    let fragments = generate(&request(false), &GeneratorConfig::default()).unwrap();

    assert_eq!(fragments.len(), 1);
    let order = &fragments[0];
    assert_eq!(order.file_name, "com/acme/orders/Orders.java");
    assert_eq!(order.insertion_point, "class_scope:acme.orders.Order");
    assert!(order.content.contains(
        "builder.setTotal(acme.common.Common.Money.parseFromJSON(json.getJSONObject(\"total\")));"
    ));
    assert!(order.content.contains("json.put(\"orderId\", getOrderId());"));
    assert!(!order.content.contains("toMap()"));
}

#[test]
fn respond___method_without_http_options___reports_error() {
    let response = respond(&request(true), &GeneratorConfig::default());

    assert!(response.file.is_empty());
    assert_eq!(
        response.error.as_deref(),
        Some("can't generate method GetOrder, doesn't have options set")
    );
}

#[test]
fn respond___same_request___encodes_identically() {
    let config = GeneratorConfig::default();

    let first = response::encode(&respond(&request(false), &config));
    let second = response::encode(&respond(&request(false), &config));

    assert_eq!(first, second);
}

#[test]
fn generate___unknown_target_file___is_descriptor_error() {
    let request = CodeGeneratorRequest {
        file_to_generate: vec!["acme/missing.proto".into()],
        proto_file: vec![common_file()],
        ..Default::default()
    };
    let raw = RawCodeGeneratorRequest::from_bytes(&request.encode_to_vec()).unwrap();

    let err = generate(&raw, &GeneratorConfig::default()).unwrap_err();

    assert!(err.to_string().contains("acme/missing.proto"));
}

// Custom options
//
// prost-types drops unknown option fields, so option payloads are appended to
// the encoded descriptors by hand.

const FIELD_OPTIONS: &str = ".google.protobuf.FieldOptions";
const MESSAGE_OPTIONS: &str = ".google.protobuf.MessageOptions";
const METHOD_OPTIONS: &str = ".google.protobuf.MethodOptions";

fn length_delimited(buf: &mut Vec<u8>, tag: u32, bytes: &[u8]) {
    encode_varint(u64::from(tag << 3 | 2), buf);
    encode_varint(bytes.len() as u64, buf);
    buf.extend_from_slice(bytes);
}

fn extension(name: &str, number: i32, ty: Type, type_name: Option<&str>, extendee: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        extendee: Some(extendee.into()),
        ..field(name, number, ty, Label::Optional, type_name)
    }
}

fn descriptor_file() -> FileDescriptorProto {
    DescriptorPool::global()
        .get_file_by_name("google/protobuf/descriptor.proto")
        .unwrap()
        .file_descriptor_proto()
        .clone()
}

fn options_file(map_key_extendee: &str) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("acme/options.proto".into()),
        package: Some("acme".into()),
        syntax: Some("proto2".into()),
        dependency: vec!["google/protobuf/descriptor.proto".into()],
        message_type: vec![DescriptorProto {
            name: Some("DXMethodOptions".into()),
            field: vec![
                field("http_method", 1, Type::String, Label::Optional, None),
                field("path", 2, Type::String, Label::Optional, None),
            ],
            ..Default::default()
        }],
        extension: vec![
            extension("dx_map_key", 50001, Type::String, None, map_key_extendee),
            extension("dx_map_val", 50002, Type::String, None, FIELD_OPTIONS),
            extension(
                "dx_method_options",
                50003,
                Type::Message,
                Some(".acme.DXMethodOptions"),
                METHOD_OPTIONS,
            ),
        ],
        ..Default::default()
    }
}

fn map_field_options(key: &str, value: &str) -> Vec<u8> {
    let mut options = Vec::new();
    length_delimited(&mut options, 50001, key.as_bytes());
    length_delimited(&mut options, 50002, value.as_bytes());
    options
}

fn http_options(verb: &str, path: &str) -> Vec<u8> {
    let mut binding = Vec::new();
    length_delimited(&mut binding, 1, verb.as_bytes());
    length_delimited(&mut binding, 2, path.as_bytes());
    let mut options = Vec::new();
    length_delimited(&mut options, 50003, &binding);
    options
}

/// `acme/things.proto`: `Thing.labels` is a map over `Label{key, v}` and
/// `ThingService.GetThing` is bound to `GET /things/:id`.
fn things_file() -> Vec<u8> {
    let label = DescriptorProto {
        name: Some("Label".into()),
        field: vec![
            field("key", 1, Type::String, Label::Optional, None),
            field("v", 2, Type::Int32, Label::Optional, None),
        ],
        ..Default::default()
    };

    let mut labels = field("labels", 2, Type::Message, Label::Repeated, Some(".acme.Label")).encode_to_vec();
    length_delimited(&mut labels, 8, &map_field_options("key", "v"));

    let mut thing = DescriptorProto {
        name: Some("Thing".into()),
        field: vec![field("id", 1, Type::String, Label::Optional, None)],
        ..Default::default()
    }
    .encode_to_vec();
    length_delimited(&mut thing, 2, &labels);

    let mut get_thing = MethodDescriptorProto {
        name: Some("GetThing".into()),
        input_type: Some(".acme.Thing".into()),
        output_type: Some(".acme.Thing".into()),
        ..Default::default()
    }
    .encode_to_vec();
    length_delimited(&mut get_thing, 4, &http_options("GET", "/things/:id"));

    let mut service = ServiceDescriptorProto {
        name: Some("ThingService".into()),
        ..Default::default()
    }
    .encode_to_vec();
    length_delimited(&mut service, 2, &get_thing);

    let mut file = FileDescriptorProto {
        name: Some("acme/things.proto".into()),
        package: Some("acme".into()),
        syntax: Some("proto2".into()),
        dependency: vec!["acme/options.proto".into()],
        message_type: vec![label],
        ..Default::default()
    }
    .encode_to_vec();
    length_delimited(&mut file, 4, &thing);
    length_delimited(&mut file, 6, &service);
    file
}

fn options_request(map_key_extendee: &str) -> RawCodeGeneratorRequest {
    RawCodeGeneratorRequest {
        file_to_generate: vec!["acme/things.proto".into()],
        parameter: None,
        proto_file: vec![
            descriptor_file().encode_to_vec(),
            options_file(map_key_extendee).encode_to_vec(),
            things_file(),
        ],
    }
}

fn content<'a>(fragments: &'a [Fragment], insertion_point: &str) -> &'a str {
    let fragment = fragments
        .iter()
        .find(|f| f.insertion_point == insertion_point)
        .unwrap();
    assert_eq!(fragment.file_name, "acme/Things.java");
    &fragment.content
}

#[test]
fn generate___declared_map_options___emits_map_accessors_and_map_codec() {
    let fragments = generate(&options_request(FIELD_OPTIONS), &GeneratorConfig::default()).unwrap();

    let thing = content(&fragments, "class_scope:acme.Thing");
    assert!(thing.contains("public java.util.Map<String, Integer> getLabelsAsMap() {"));
    assert!(thing.contains("public boolean containsLabelsKey(String key) {"));
    assert!(thing.contains("org.json.JSONObject obj = json.getJSONObject(\"labels\");"));
    assert!(thing.contains("acme.Things.Label.Builder item = acme.Things.Label.newBuilder();"));
    assert!(thing.contains("item.setKey(key);"));
    assert!(thing.contains("item.setV(obj.getInt(key));"));
    assert!(thing.contains("obj.put(el.getKey(), el.getV());"));
    assert!(thing.contains("json.put(\"labels\", obj);"));
}

#[test]
fn generate___declared_method_options___emits_stub_with_path_param() {
    let fragments = generate(&options_request(FIELD_OPTIONS), &GeneratorConfig::default()).unwrap();

    let service = content(&fragments, "outer_class_scope");
    assert!(service.contains("public static abstract class ThingService {"));
    assert!(service.contains(
        "public void GetThing(String id, acme.Things.Thing req, final Callback<acme.Things.Thing> callback) {"
    ));
    assert!(service.contains("String path = \"/things/\" + id;"));
    assert!(service.contains("this.doCall(path, \"GET\", params, acme.Things.Thing.class, callback);"));
}

#[test]
fn generate___fully_qualified_option_names___match_short_names() {
    let config = GeneratorConfig::from_parameter(Some(
        "map_key_option=acme.dx_map_key,map_value_option=acme.dx_map_val,method_option=acme.dx_method_options",
    ))
    .unwrap();

    let qualified = generate(&options_request(FIELD_OPTIONS), &config).unwrap();
    let short = generate(&options_request(FIELD_OPTIONS), &GeneratorConfig::default()).unwrap();

    assert_eq!(qualified, short);
    assert!(content(&qualified, "class_scope:acme.Thing").contains("getLabelsAsMap()"));
}

#[test]
fn generate___unknown_map_option_name___keeps_plain_repeated_field() {
    let config = GeneratorConfig::from_parameter(Some("map_key_option=acme.other_key")).unwrap();

    let fragments = generate(&options_request(FIELD_OPTIONS), &config).unwrap();

    let thing = content(&fragments, "class_scope:acme.Thing");
    assert!(!thing.contains("getLabelsAsMap()"));
}

#[test]
fn generate___map_key_declared_on_message_options___keeps_plain_repeated_field() {
    let fragments = generate(&options_request(MESSAGE_OPTIONS), &GeneratorConfig::default()).unwrap();

    let thing = content(&fragments, "class_scope:acme.Thing");
    assert!(!thing.contains("getLabelsAsMap()"));
    assert!(thing.contains("builder.addLabels(acme.Things.Label.parseFromJSON(arr.getJSONObject(i)));"));
    assert!(content(&fragments, "outer_class_scope").contains("public void GetThing(String id, "));
}
