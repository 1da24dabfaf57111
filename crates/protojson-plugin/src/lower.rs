//! Lowering of `prost-reflect` descriptors into the generators' schema view.
//!
//! Java names follow protoc's Java generator: classes live under the
//! `java_package` (or the proto package) inside the file's outer class,
//! unless `java_multiple_files` is set.

use prost_reflect::{
    DescriptorPool, DynamicMessage, ExtensionDescriptor, FieldDescriptor, FileDescriptor, Kind,
    MessageDescriptor, MethodDescriptor, ServiceDescriptor, Value,
};
use protojson_core::{
    FieldKind, FieldSpec, FileSpec, GeneratorConfig, HttpBinding, MessageSpec, MethodSpec,
    ServiceSpec, naming,
};
use tracing::debug;

const FIELD_OPTIONS: &str = "google.protobuf.FieldOptions";
const METHOD_OPTIONS: &str = "google.protobuf.MethodOptions";

/// The custom option extensions found in the request's descriptors.
///
/// A missing extension simply means no field or method carries that option.
#[derive(Debug, Clone, Default)]
pub struct OptionExtensions {
    map_key: Option<ExtensionDescriptor>,
    map_value: Option<ExtensionDescriptor>,
    method: Option<ExtensionDescriptor>,
}

impl OptionExtensions {
    /// Look up the configured option names in `pool`.
    pub fn resolve(pool: &DescriptorPool, config: &GeneratorConfig) -> Self {
        Self {
            map_key: find_extension(pool, &config.map_key_option, FIELD_OPTIONS),
            map_value: find_extension(pool, &config.map_value_option, FIELD_OPTIONS),
            method: find_extension(pool, &config.method_option, METHOD_OPTIONS),
        }
    }

    fn map_key(&self, field: &FieldDescriptor) -> Option<String> {
        string_option(&field.options(), self.map_key.as_ref())
    }

    fn map_value(&self, field: &FieldDescriptor) -> Option<String> {
        string_option(&field.options(), self.map_value.as_ref())
    }

    fn http_binding(&self, method: &MethodDescriptor) -> Option<HttpBinding> {
        let ext = self.method.as_ref()?;
        let options = method.options();
        if !options.has_extension(ext) {
            return None;
        }

        let value = options.get_extension(ext);
        let Value::Message(binding) = value.as_ref() else {
            return None;
        };
        Some(HttpBinding {
            method: string_field(binding, "http_method"),
            path: string_field(binding, "path"),
        })
    }
}

/// Lower one proto file.
pub fn lower_file(file: &FileDescriptor, extensions: &OptionExtensions) -> FileSpec {
    let names = JavaNames::of(file);
    FileSpec {
        name: file.name().to_string(),
        java_file: names.file_path(),
        messages: file
            .messages()
            .filter(|m| !m.is_map_entry())
            .map(|m| lower_message(&m, extensions))
            .collect(),
        services: file
            .services()
            .map(|s| lower_service(&s, extensions))
            .collect(),
    }
}

fn lower_message(message: &MessageDescriptor, extensions: &OptionExtensions) -> MessageSpec {
    MessageSpec {
        name: message.name().to_string(),
        full_name: message.full_name().to_string(),
        class_name: java_class_name(&message.parent_file(), message.full_name()),
        fields: message
            .fields()
            .map(|f| lower_field(&f, extensions))
            .collect(),
        nested: message
            .child_messages()
            .filter(|m| !m.is_map_entry())
            .map(|m| lower_message(&m, extensions))
            .collect(),
    }
}

fn lower_field(field: &FieldDescriptor, extensions: &OptionExtensions) -> FieldSpec {
    let Some(key) = extensions.map_key(field) else {
        return plain_field(field);
    };
    let value = extensions.map_value(field).unwrap_or_default();

    match field.kind() {
        Kind::Message(entry) if field.is_list() => FieldSpec::map(
            field.name(),
            java_class_name(&entry.parent_file(), entry.full_name()),
            key,
            value,
            entry.fields().map(|f| plain_field(&f)).collect(),
        ),
        _ => {
            debug!(field = %field.full_name(), "map option on a field that is not a repeated message");
            FieldSpec::singular(
                field.name(),
                FieldKind::Unsupported(format!("map option on {}", describe(field))),
            )
        }
    }
}

/// Lower a field ignoring map options.
fn plain_field(field: &FieldDescriptor) -> FieldSpec {
    if field.is_list() {
        FieldSpec::repeated(field.name(), field_kind(field))
    } else {
        FieldSpec::singular(field.name(), field_kind(field))
    }
}

fn field_kind(field: &FieldDescriptor) -> FieldKind {
    if field.is_map() {
        return FieldKind::Unsupported("native map".to_string());
    }
    match field.kind() {
        Kind::Double => FieldKind::Double,
        Kind::Float => FieldKind::Float,
        Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => FieldKind::Int32,
        Kind::Uint32 | Kind::Fixed32 => FieldKind::UInt32,
        Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => FieldKind::Int64,
        Kind::Uint64 | Kind::Fixed64 => FieldKind::UInt64,
        Kind::Bool => FieldKind::Bool,
        Kind::String => FieldKind::String,
        Kind::Bytes => FieldKind::Unsupported("bytes".to_string()),
        Kind::Enum(e) => FieldKind::Enum(java_class_name(&e.parent_file(), e.full_name())),
        Kind::Message(m) => FieldKind::Message(java_class_name(&m.parent_file(), m.full_name())),
    }
}

fn describe(field: &FieldDescriptor) -> String {
    let kind = match field.kind() {
        _ if field.is_map() => "native map".to_string(),
        Kind::Message(m) => format!("message {}", m.full_name()),
        Kind::Enum(e) => format!("enum {}", e.full_name()),
        scalar => format!("{scalar:?}").to_lowercase(),
    };
    if field.is_list() {
        format!("repeated {kind}")
    } else {
        kind
    }
}

fn lower_service(service: &ServiceDescriptor, extensions: &OptionExtensions) -> ServiceSpec {
    ServiceSpec {
        name: service.name().to_string(),
        methods: service
            .methods()
            .map(|m| MethodSpec {
                name: m.name().to_string(),
                input_class: message_class(&m.input()),
                output_class: message_class(&m.output()),
                http: extensions.http_binding(&m),
            })
            .collect(),
    }
}

fn message_class(message: &MessageDescriptor) -> String {
    java_class_name(&message.parent_file(), message.full_name())
}

/// Java naming context of one proto file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaNames {
    proto_package: String,
    java_package: String,
    outer_class: String,
    multiple_files: bool,
}

impl JavaNames {
    pub fn of(file: &FileDescriptor) -> Self {
        let proto = file.file_descriptor_proto();
        let options = proto.options.as_ref();

        let java_package = options
            .map(|o| o.java_package())
            .filter(|p| !p.is_empty())
            .unwrap_or(file.package_name());

        let top_level: Vec<&str> = proto
            .message_type
            .iter()
            .map(|m| m.name())
            .chain(proto.enum_type.iter().map(|e| e.name()))
            .chain(proto.service.iter().map(|s| s.name()))
            .collect();
        let outer_class = naming::file_class_name(
            file.name(),
            options.map(|o| o.java_outer_classname()),
            &top_level,
        );

        Self {
            proto_package: file.package_name().to_string(),
            java_package: java_package.to_string(),
            outer_class,
            multiple_files: options.is_some_and(|o| o.java_multiple_files()),
        }
    }

    /// Java file holding the outer class, e.g. `com/acme/Shop.java`.
    pub fn file_path(&self) -> String {
        format!(
            "{}{}.java",
            naming::java_package_dir(&self.java_package),
            self.outer_class
        )
    }

    /// Fully-qualified Java class for a type declared in this file.
    pub fn class_name(&self, full_name: &str) -> String {
        let relative = if self.proto_package.is_empty() {
            full_name
        } else {
            full_name
                .strip_prefix(self.proto_package.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(full_name)
        };

        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if !self.java_package.is_empty() {
            parts.push(&self.java_package);
        }
        if !self.multiple_files {
            parts.push(&self.outer_class);
        }
        parts.push(relative);
        parts.join(".")
    }
}

fn java_class_name(file: &FileDescriptor, full_name: &str) -> String {
    JavaNames::of(file).class_name(full_name)
}

fn find_extension(pool: &DescriptorPool, name: &str, extendee: &str) -> Option<ExtensionDescriptor> {
    let found = pool.all_extensions().find(|ext| {
        (ext.full_name() == name || ext.name() == name)
            && ext.containing_message().full_name() == extendee
    });
    if found.is_none() {
        debug!(option = name, extendee, "option extension not declared in request");
    }
    found
}

fn string_option(options: &DynamicMessage, ext: Option<&ExtensionDescriptor>) -> Option<String> {
    let ext = ext?;
    if !options.has_extension(ext) {
        return None;
    }
    options
        .get_extension(ext)
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_field(message: &DynamicMessage, name: &str) -> String {
    message
        .get_field_by_name(name)
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}
