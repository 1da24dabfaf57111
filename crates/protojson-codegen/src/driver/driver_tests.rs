#![allow(non_snake_case)]

use super::*;
use crate::sink::FragmentBuffer;
use protojson_core::{FieldKind, FieldSpec, HttpBinding, MethodSpec, ServiceSpec};

const JAVA_FILE: &str = "com/acme/Api.java";

fn message(name: &str, fields: Vec<FieldSpec>, nested: Vec<MessageSpec>) -> MessageSpec {
    MessageSpec {
        name: name.into(),
        full_name: format!("acme.{name}"),
        class_name: format!("com.acme.Api.{name}"),
        fields,
        nested,
    }
}

fn file(messages: Vec<MessageSpec>, services: Vec<ServiceSpec>) -> FileSpec {
    FileSpec {
        name: "acme/api.proto".into(),
        java_file: JAVA_FILE.into(),
        messages,
        services,
    }
}

fn insertion_points(sink: &FragmentBuffer) -> Vec<&str> {
    sink.fragments()
        .iter()
        .map(|f| f.insertion_point.as_str())
        .collect()
}

#[test]
fn generate_file___nested_messages___visited_depth_first_pre_order() {
    let schema = file(
        vec![
            message(
                "A",
                vec![],
                vec![message("B", vec![], vec![message("C", vec![], vec![])])],
            ),
            message("D", vec![], vec![]),
        ],
        vec![],
    );
    let mut sink = FragmentBuffer::new();

    let report = generate_file(&schema, &mut sink);

    assert!(report.is_success());
    assert_eq!(report.messages, 4);
    assert_eq!(
        insertion_points(&sink),
        vec!["class_scope:acme.A", "class_scope:acme.B", "class_scope:acme.C", "class_scope:acme.D"]
    );
    assert!(sink.fragments().iter().all(|f| f.file_name == JAVA_FILE));
}

#[test]
fn generate_file___no_services___opens_no_outer_scope() {
    let schema = file(vec![message("A", vec![], vec![])], vec![]);
    let mut sink = FragmentBuffer::new();

    generate_file(&schema, &mut sink);

    assert!(sink.get(JAVA_FILE, OUTER_CLASS_SCOPE).is_none());
}

#[test]
fn generate_file___services___share_outer_scope() {
    let method = MethodSpec {
        name: "get".into(),
        input_class: "com.acme.Api.A".into(),
        output_class: "com.acme.Api.A".into(),
        http: Some(HttpBinding {
            method: "GET".into(),
            path: "/a/:id".into(),
        }),
    };
    let schema = file(
        vec![],
        vec![
            ServiceSpec {
                name: "First".into(),
                methods: vec![method.clone()],
            },
            ServiceSpec {
                name: "Second".into(),
                methods: vec![method],
            },
        ],
    );
    let mut sink = FragmentBuffer::new();

    let report = generate_file(&schema, &mut sink);

    assert_eq!(report.services, 2);
    assert_eq!(sink.fragments().len(), 1);
    let outer = sink.get(JAVA_FILE, OUTER_CLASS_SCOPE).unwrap();
    let first = outer.find("public static abstract class First {").unwrap();
    let second = outer.find("public static abstract class Second {").unwrap();
    assert!(first < second);
}

#[test]
fn generate_file___errors___accumulate_and_generation_continues() {
    let broken = FieldSpec::map(
        "labels",
        "com.acme.Api.Label",
        "key",
        "value",
        vec![FieldSpec::singular("value", FieldKind::String)],
    );
    let schema = file(
        vec![
            message("A", vec![broken], vec![]),
            message("B", vec![FieldSpec::singular("name", FieldKind::String)], vec![]),
        ],
        vec![ServiceSpec {
            name: "Svc".into(),
            methods: vec![MethodSpec {
                name: "nope".into(),
                input_class: "A".into(),
                output_class: "B".into(),
                http: None,
            }],
        }],
    );
    let mut sink = FragmentBuffer::new();

    let report = generate_file(&schema, &mut sink);

    assert_eq!(report.errors.len(), 2);
    assert!(
        sink.get(JAVA_FILE, "class_scope:acme.B")
            .unwrap()
            .contains("builder.setName(json.getString(\"name\"));")
    );

    let err = report.into_result().unwrap_err();
    assert!(matches!(&err, CodegenError::GenerationFailed(errors) if errors.len() == 2));
    assert!(err.to_string().starts_with("2 errors during generation:"));
}

#[test]
fn GenerationReport___merge___sums_counts_and_errors() {
    let mut report = GenerationReport {
        messages: 1,
        services: 0,
        errors: vec![],
    };

    report.merge(GenerationReport {
        messages: 2,
        services: 1,
        errors: vec![CodegenError::Config("x".into())],
    });

    assert_eq!(report.messages, 3);
    assert_eq!(report.services, 1);
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn GenerationReport___into_result_clean___returns_report() {
    let report = GenerationReport {
        messages: 3,
        ..Default::default()
    };

    assert_eq!(report.clone().into_result(), Ok(report));
}

#[test]
fn generate_files___concatenates_reports() {
    let a = file(vec![message("A", vec![], vec![])], vec![]);
    let mut b = file(vec![message("B", vec![], vec![])], vec![]);
    b.java_file = "com/acme/Other.java".into();
    let mut sink = FragmentBuffer::new();

    let report = generate_files([&a, &b], &mut sink);

    assert_eq!(report.messages, 2);
    assert!(sink.get("com/acme/Other.java", "class_scope:acme.B").is_some());
}
