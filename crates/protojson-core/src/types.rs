//! Java and `org.json` type mappings for field kinds.
//!
//! # Type Mappings
//!
//! | Kind | Unboxed | Boxed | `org.json` accessor |
//! |------|---------|-------|---------------------|
//! | `double` | `double` | `Double` | `getDouble` |
//! | `float` | `float` | `Float` | `getDouble` (narrowed) |
//! | `int32` / `uint32` | `int` | `Integer` | `getInt` |
//! | `int64` / `uint64` | `long` | `Long` | `getLong` |
//! | `bool` | `boolean` | `Boolean` | `getBoolean` |
//! | `string` | `String` | `String` | `getString` |
//! | enum `E` | `E` | `Integer` | `getInt` |
//! | message `M` | `M` | `M` | `getJSONObject` |
//!
//! Unsupported kinds have no mapping; [`java_type`] returns `None` for them.

use crate::schema::FieldKind;

/// A Java type with its unboxed and boxed forms and its `org.json` accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaType {
    /// The unboxed type name (e.g. "int") or reference type name.
    pub unboxed: String,
    /// The boxed type name (e.g. "Integer").
    pub boxed: String,
    /// Suffix of the `org.json` getter used to read the value (e.g. "Int" for `getInt`).
    pub json_accessor: &'static str,
}

impl JavaType {
    /// A reference type whose unboxed and boxed forms coincide.
    pub fn reference(name: &str, json_accessor: &'static str) -> Self {
        Self {
            unboxed: name.to_string(),
            boxed: name.to_string(),
            json_accessor,
        }
    }

    /// A Java primitive with a distinct boxed wrapper.
    pub fn primitive(unboxed: &str, boxed: &str, json_accessor: &'static str) -> Self {
        Self {
            unboxed: unboxed.to_string(),
            boxed: boxed.to_string(),
            json_accessor,
        }
    }
}

/// Map a field kind to its Java type, or `None` if the kind is unsupported.
pub fn java_type(kind: &FieldKind) -> Option<JavaType> {
    let ty = match kind {
        FieldKind::Double => JavaType::primitive("double", "Double", "Double"),
        // org.json has no float reader; values are read as double and narrowed
        FieldKind::Float => JavaType::primitive("float", "Float", "Double"),
        FieldKind::Int32 | FieldKind::UInt32 => JavaType::primitive("int", "Integer", "Int"),
        FieldKind::Int64 | FieldKind::UInt64 => JavaType::primitive("long", "Long", "Long"),
        FieldKind::Bool => JavaType::primitive("boolean", "Boolean", "Boolean"),
        FieldKind::String => JavaType::reference("String", "String"),
        FieldKind::Enum(class) => JavaType {
            unboxed: class.clone(),
            boxed: "Integer".to_string(),
            json_accessor: "Int",
        },
        FieldKind::Message(class) => JavaType::reference(class, "JSONObject"),
        FieldKind::Unsupported(_) => return None,
    };
    Some(ty)
}

/// Box a Java expression of the given kind.
///
/// Enums box to their integer number.
pub fn box_value(expr: &str, kind: &FieldKind) -> String {
    match kind {
        FieldKind::Double => format!("Double.valueOf({expr})"),
        FieldKind::Float => format!("Float.valueOf({expr})"),
        FieldKind::Int64 | FieldKind::UInt64 => format!("Long.valueOf({expr})"),
        FieldKind::Int32 | FieldKind::UInt32 => format!("Integer.valueOf({expr})"),
        FieldKind::Bool => format!("Boolean.valueOf({expr})"),
        FieldKind::Enum(_) => format!("Integer.valueOf({expr}.getNumber())"),
        FieldKind::String | FieldKind::Message(_) | FieldKind::Unsupported(_) => expr.to_string(),
    }
}

/// Java expression converting a value of the given kind to its string form.
pub fn value_to_string(expr: &str, kind: &FieldKind) -> String {
    format!("{}.toString()", box_value(expr, kind))
}
