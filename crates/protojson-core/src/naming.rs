//! Naming convention utilities for Java code generation.
//!
//! These follow protobuf's own Java naming rules so that generated fragments
//! call the accessors the base Java generator actually produced.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `display_name` | [`field_json_name`] | `displayName` |
//! | `display_name` | [`field_accessor_name`] | `DisplayName` |
//! | `acme/user_api.proto` | [`file_class_name`] | `UserApi` |
//! | `com.acme` | [`java_package_dir`] | `com/acme/` |

/// Convert an identifier to camel case using protobuf's Java rules.
///
/// Letters after a digit or a non-alphanumeric character are capitalized,
/// non-alphanumeric characters are dropped, and a leading uppercase letter is
/// lowered unless `cap_first` is set.
///
/// # Examples
///
/// ```
/// use protojson_core::naming::underscores_to_camel_case;
///
/// assert_eq!(underscores_to_camel_case("foo_bar_baz", false), "fooBarBaz");
/// assert_eq!(underscores_to_camel_case("foo_bar_baz", true), "FooBarBaz");
/// assert_eq!(underscores_to_camel_case("field2go", false), "field2Go");
/// ```
pub fn underscores_to_camel_case(input: &str, cap_first: bool) -> String {
    let mut result = String::with_capacity(input.len());
    let mut cap_next = cap_first;

    for (i, c) in input.chars().enumerate() {
        if c.is_ascii_lowercase() {
            if cap_next {
                result.push(c.to_ascii_uppercase());
            } else {
                result.push(c);
            }
            cap_next = false;
        } else if c.is_ascii_uppercase() {
            if i == 0 && !cap_next {
                result.push(c.to_ascii_lowercase());
            } else {
                result.push(c);
            }
            cap_next = false;
        } else if c.is_ascii_digit() {
            result.push(c);
            cap_next = true;
        } else {
            cap_next = true;
        }
    }

    result
}

/// JSON key (and lower camel Java name) for a field.
///
/// The field name `_id` is kept verbatim so document ids round-trip as `_id`.
pub fn field_json_name(name: &str) -> String {
    if name == "_id" {
        return name.to_string();
    }
    underscores_to_camel_case(name, false)
}

/// Capitalized camel case name used in `getX`/`setX`/`hasX` accessors.
pub fn field_accessor_name(name: &str) -> String {
    underscores_to_camel_case(name, true)
}

/// Strip `.proto` or `.protodevel` from a file name.
pub fn strip_proto(file_name: &str) -> &str {
    file_name
        .strip_suffix(".protodevel")
        .or_else(|| file_name.strip_suffix(".proto"))
        .unwrap_or(file_name)
}

/// Outer class name for a proto file.
///
/// Uses `explicit` (the `java_outer_classname` option) when present, else the
/// camel-cased base name of the file. `OuterClass` is appended when the derived
/// name collides with one of the file's top-level type names.
///
/// # Examples
///
/// ```
/// use protojson_core::naming::file_class_name;
///
/// assert_eq!(file_class_name("acme/user_api.proto", None, &[]), "UserApi");
/// assert_eq!(file_class_name("acme/user.proto", None, &["User"]), "UserOuterClass");
/// assert_eq!(file_class_name("acme/user.proto", Some("Users"), &["User"]), "Users");
/// ```
pub fn file_class_name(file_name: &str, explicit: Option<&str>, top_level_names: &[&str]) -> String {
    if let Some(name) = explicit.filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    let stripped = strip_proto(file_name);
    let base = stripped.rsplit('/').next().unwrap_or(stripped);
    let name = underscores_to_camel_case(base, true);

    if top_level_names.iter().any(|n| *n == name) {
        format!("{name}OuterClass")
    } else {
        name
    }
}

/// Directory for a Java package, with a trailing slash unless the package is empty.
pub fn java_package_dir(package: &str) -> String {
    if package.is_empty() {
        String::new()
    } else {
        format!("{}/", package.replace('.', "/"))
    }
}

/// Escape text for use inside a Java string literal.
pub fn escape_java_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
