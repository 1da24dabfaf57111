#![allow(non_snake_case)]

use super::*;

#[test]
fn class_scope___prefixes_full_name() {
    assert_eq!(class_scope("acme.User.Address"), "class_scope:acme.User.Address");
}

#[test]
fn FragmentBuffer___open_for_insert___appends_to_same_buffer() {
    let mut sink = FragmentBuffer::new();

    sink.open_for_insert("A.java", OUTER_CLASS_SCOPE).push_str("one ");
    sink.open_for_insert("A.java", OUTER_CLASS_SCOPE).push_str("two");

    assert_eq!(sink.fragments().len(), 1);
    assert_eq!(sink.get("A.java", OUTER_CLASS_SCOPE), Some("one two"));
}

#[test]
fn FragmentBuffer___into_fragments___keeps_open_order() {
    let mut sink = FragmentBuffer::new();
    sink.open_for_insert("A.java", "class_scope:b");
    sink.open_for_insert("A.java", "class_scope:a");
    sink.open_for_insert("B.java", "class_scope:b");

    let points: Vec<(String, String)> = sink
        .into_fragments()
        .into_iter()
        .map(|f| (f.file_name, f.insertion_point))
        .collect();

    assert_eq!(
        points,
        vec![
            ("A.java".to_string(), "class_scope:b".to_string()),
            ("A.java".to_string(), "class_scope:a".to_string()),
            ("B.java".to_string(), "class_scope:b".to_string()),
        ]
    );
}

#[test]
fn FragmentBuffer___get_unknown_pair___returns_none() {
    let sink = FragmentBuffer::new();

    assert!(sink.get("A.java", OUTER_CLASS_SCOPE).is_none());
}
