//! Read-only schema view consumed by the generators.
//!
//! The schema front end (protoc, lowered by the plugin crate) produces one
//! [`FileSpec`] per generated file. Every list here preserves declaration
//! order, which is also the order of the generated code.
//!
//! # Structure
//!
//! - [`FileSpec`]: target Java file plus top-level messages and services
//! - [`MessageSpec`]: a message with its fields and nested messages
//! - [`FieldSpec`]: a field with its [`FieldKind`] and [`Cardinality`]
//! - [`ServiceSpec`] / [`MethodSpec`]: services and their HTTP-bound methods
//!
//! # Map emulation
//!
//! Maps are declared as a repeated message field whose options name a key
//! and a value sub-field on the entry type. The names are kept unresolved in
//! [`MapEntry`]; resolution happens when a field codec is built so that a bad
//! name surfaces as a generation error instead of a lowering failure.

use std::fmt;

/// A schema file to generate fragments for.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSpec {
    /// Proto file name as given to protoc (e.g. `acme/users.proto`).
    pub name: String,

    /// Path of the Java file the base generator produced for this proto file.
    pub java_file: String,

    /// Top-level messages in declaration order.
    pub messages: Vec<MessageSpec>,

    /// Services in declaration order.
    pub services: Vec<ServiceSpec>,
}

/// A message type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSpec {
    /// Simple message name.
    pub name: String,

    /// Fully-qualified schema name, used to key the insertion point.
    pub full_name: String,

    /// Fully-qualified Java class name.
    pub class_name: String,

    /// Fields in declaration order.
    pub fields: Vec<FieldSpec>,

    /// Nested message types in declaration order.
    pub nested: Vec<MessageSpec>,
}

/// A field in a message type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name as declared in the schema (snake_case).
    pub name: String,

    /// Field type.
    pub kind: FieldKind,

    /// Singular, repeated, or emulated map.
    pub cardinality: Cardinality,
}

/// Simplified field type representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Double,
    Float,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Bool,
    String,

    /// Enum type, carrying its Java class name.
    Enum(String),

    /// Message type, carrying its Java class name.
    Message(String),

    /// A schema type with no Java/JSON mapping, carrying a description.
    Unsupported(String),
}

/// Field cardinality.
#[derive(Debug, Clone, PartialEq)]
pub enum Cardinality {
    Singular,
    Repeated,
    /// Repeated entry messages presented as a string-keyed map.
    Map(MapEntry),
}

/// Map options of an emulated map field.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    /// Name of the key sub-field on the entry type.
    pub key_field: String,

    /// Name of the value sub-field on the entry type.
    pub value_field: String,

    /// The entry type's own fields. Never map-typed.
    pub entry_fields: Vec<FieldSpec>,
}

/// A service definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSpec {
    /// Service name.
    pub name: String,

    /// Methods in declaration order.
    pub methods: Vec<MethodSpec>,
}

/// A method on a service.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    /// Method name, used verbatim as the Java method name.
    pub name: String,

    /// Java class of the request message.
    pub input_class: String,

    /// Java class of the response message.
    pub output_class: String,

    /// HTTP verb and path template, if the method carries HTTP options.
    pub http: Option<HttpBinding>,
}

/// HTTP options of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBinding {
    /// HTTP verb passed to the transport hook (e.g. `GET`).
    pub method: String,

    /// Path template with `:name` parameters (e.g. `/users/:id`).
    pub path: String,
}

impl FieldKind {
    /// Whether values of this kind are nested JSON objects.
    pub fn is_message(&self) -> bool {
        matches!(self, FieldKind::Message(_))
    }

    /// Whether this kind is an enum.
    pub fn is_enum(&self) -> bool {
        matches!(self, FieldKind::Enum(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Double => write!(f, "double"),
            FieldKind::Float => write!(f, "float"),
            FieldKind::Int32 => write!(f, "int32"),
            FieldKind::UInt32 => write!(f, "uint32"),
            FieldKind::Int64 => write!(f, "int64"),
            FieldKind::UInt64 => write!(f, "uint64"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::String => write!(f, "string"),
            FieldKind::Enum(class) => write!(f, "enum {class}"),
            FieldKind::Message(class) => write!(f, "message {class}"),
            FieldKind::Unsupported(what) => write!(f, "{what}"),
        }
    }
}

impl FieldSpec {
    /// A singular field.
    pub fn singular(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cardinality: Cardinality::Singular,
        }
    }

    /// A repeated field.
    pub fn repeated(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cardinality: Cardinality::Repeated,
        }
    }

    /// An emulated map field over repeated `entry_class` messages.
    pub fn map(
        name: impl Into<String>,
        entry_class: impl Into<String>,
        key_field: impl Into<String>,
        value_field: impl Into<String>,
        entry_fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Message(entry_class.into()),
            cardinality: Cardinality::Map(MapEntry {
                key_field: key_field.into(),
                value_field: value_field.into(),
                entry_fields,
            }),
        }
    }

    /// Whether the field holds a list on the wire (plain repeated or map).
    pub fn is_repeated(&self) -> bool {
        !matches!(self.cardinality, Cardinality::Singular)
    }

    /// Map options, if this is an emulated map field.
    pub fn map_entry(&self) -> Option<&MapEntry> {
        match &self.cardinality {
            Cardinality::Map(entry) => Some(entry),
            _ => None,
        }
    }
}

impl MapEntry {
    /// The key sub-field, if the configured name resolves.
    pub fn key(&self) -> Option<&FieldSpec> {
        self.entry_fields.iter().find(|f| f.name == self.key_field)
    }

    /// The value sub-field, if the configured name resolves.
    pub fn value(&self) -> Option<&FieldSpec> {
        self.entry_fields.iter().find(|f| f.name == self.value_field)
    }
}

impl MessageSpec {
    /// Visit this message and every nested message, depth-first pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a MessageSpec)) {
        visit(self);
        for nested in &self.nested {
            nested.walk(visit);
        }
    }
}

impl FileSpec {
    /// All messages of the file, depth-first pre-order.
    pub fn all_messages(&self) -> Vec<&MessageSpec> {
        let mut out = Vec::new();
        for message in &self.messages {
            message.walk(&mut |m| out.push(m));
        }
        out
    }
}
