//! Per-field Java code synthesis.
//!
//! A [`FieldCodec`] emits the statements a message's `parseFromJSON`,
//! `toJSON` and `toMap` bodies need for one field, plus the map accessor
//! methods for emulated map fields. Generated statements assume the
//! surrounding method declares `json` (the JSON object), `builder` (the
//! message builder, parse only) and `m` (the string map, `toMap` only).

use protojson_core::{
    Cardinality, CodegenError, CodegenResult, FieldKind, FieldSpec, JavaType, MapEntry, java_type,
    naming, value_to_string,
};

use crate::printer::{Printer, Vars};

/// Generates the Java fragments for one field.
#[derive(Debug)]
pub struct FieldCodec<'a> {
    field: &'a FieldSpec,
    java: JavaType,
    shape: Shape<'a>,
    json_name: String,
    accessor: String,
    vars: Vars,
}

#[derive(Debug)]
enum Shape<'a> {
    Singular,
    Repeated,
    Map(MapValue<'a>),
}

#[derive(Debug)]
struct MapValue<'a> {
    field: &'a FieldSpec,
    java: JavaType,
    accessor: String,
}

impl<'a> FieldCodec<'a> {
    /// Resolve the field's Java type and, for map fields, its key and value sub-fields.
    pub fn new(field: &'a FieldSpec) -> CodegenResult<Self> {
        let java = java_type(&field.kind).ok_or_else(|| CodegenError::UnsupportedType {
            field: field.name.clone(),
            kind: field.kind.to_string(),
        })?;

        let json_name = naming::field_json_name(&field.name);
        let accessor = naming::field_accessor_name(&field.name);
        let mut vars = Vars::from([
            ("field", json_name.clone()),
            ("upperfield", accessor.clone()),
            ("jsontype", java.json_accessor.to_string()),
            ("javatype", java.unboxed.clone()),
        ]);

        let shape = match &field.cardinality {
            Cardinality::Singular => Shape::Singular,
            Cardinality::Repeated => Shape::Repeated,
            Cardinality::Map(entry) => Shape::Map(resolve_map(field, entry, &mut vars)?),
        };

        Ok(Self {
            field,
            java,
            shape,
            json_name,
            accessor,
            vars,
        })
    }

    /// The field this codec generates for.
    pub fn field(&self) -> &'a FieldSpec {
        self.field
    }

    /// Whether the field can appear in a flat `toMap()` export.
    ///
    /// Only singular scalar and enum fields can.
    pub fn supports_flat_map(field: &FieldSpec) -> bool {
        matches!(field.cardinality, Cardinality::Singular)
            && !field.kind.is_message()
            && java_type(&field.kind).is_some()
    }

    /// Statements reading the field from `json` into `builder`.
    pub fn generate_parse_json(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        match &self.shape {
            Shape::Map(value) => self.parse_map(value, p),
            Shape::Repeated => self.parse_repeated(p),
            Shape::Singular => self.parse_singular(p),
        }
    }

    /// Statements writing the field into `json`. Unset or empty fields are omitted.
    pub fn generate_to_json(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        match &self.shape {
            Shape::Map(value) => {
                let element = format!("el.get{}()", value.accessor);
                let vars = self.vars_with([("write", write_value(&value.field.kind, &element))]);
                p.print(
                    &vars,
                    concat!(
                        "if (get$upperfield$Count() > 0) {\n",
                        "  org.json.JSONObject obj = new org.json.JSONObject();\n",
                        "  for ($javatype$ el : get$upperfield$List()) {\n",
                        "    obj.put(el.get$key_field$(), $write$);\n",
                        "  }\n",
                        "  json.put(\"$field$\", obj);\n",
                        "}\n",
                    ),
                )
            }
            Shape::Repeated => {
                let vars = self.vars_with([("write", write_value(&self.field.kind, "el"))]);
                p.print(
                    &vars,
                    concat!(
                        "if (get$upperfield$Count() > 0) {\n",
                        "  org.json.JSONArray arr = new org.json.JSONArray();\n",
                        "  for ($javatype$ el : get$upperfield$List()) {\n",
                        "    arr.put($write$);\n",
                        "  }\n",
                        "  json.put(\"$field$\", arr);\n",
                        "}\n",
                    ),
                )
            }
            Shape::Singular => {
                let getter = format!("get{}()", self.accessor);
                let vars = self.vars_with([("write", write_value(&self.field.kind, &getter))]);
                p.print(
                    &vars,
                    concat!(
                        "if (has$upperfield$()) {\n",
                        "  json.put(\"$field$\", $write$);\n",
                        "}\n",
                    ),
                )
            }
        }
    }

    /// Map-style accessor methods. Emits nothing for non-map fields.
    ///
    /// The entries stay a repeated field, so every accessor scans the list.
    pub fn generate_map_accessors(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        if !matches!(self.shape, Shape::Map(_)) {
            return Ok(());
        }

        p.print(
            &self.vars,
            concat!(
                "/**\n",
                " * Entries of {@code $field$} as a map, keeping the first entry per key.\n",
                " * Builds a new map on every call; O(n) in the number of entries.\n",
                " */\n",
                "public java.util.Map<String, $val_object$> get$upperfield$AsMap() {\n",
                "  java.util.Map<String, $val_object$> map = new java.util.LinkedHashMap<String, $val_object$>();\n",
                "  for ($javatype$ el : get$upperfield$List()) {\n",
                "    String key = el.get$key_field$();\n",
                "    if (!map.containsKey(key)) {\n",
                "      map.put(key, el.get$val_field$());\n",
                "    }\n",
                "  }\n",
                "  return map;\n",
                "}\n",
                "\n",
                "/**\n",
                " * Keys of {@code $field$} in entry order. O(n) per call.\n",
                " */\n",
                "public java.util.List<String> get$upperfield$Keys() {\n",
                "  java.util.List<String> keys = new java.util.ArrayList<String>(get$upperfield$Count());\n",
                "  for ($javatype$ el : get$upperfield$List()) {\n",
                "    keys.add(el.get$key_field$());\n",
                "  }\n",
                "  return keys;\n",
                "}\n",
                "\n",
                "/**\n",
                " * Whether {@code $field$} has an entry for {@code key}. Linear scan, O(n) per call.\n",
                " */\n",
                "public boolean contains$upperfield$Key(String key) {\n",
                "  for ($javatype$ el : get$upperfield$List()) {\n",
                "    if (el.get$key_field$().equals(key)) {\n",
                "      return true;\n",
                "    }\n",
                "  }\n",
                "  return false;\n",
                "}\n",
                "\n",
                "/**\n",
                " * Value of the first {@code $field$} entry for {@code key}, or {@code null}.\n",
                " * Linear scan, O(n) per call.\n",
                " */\n",
                "public $val_object$ get$upperfield$Value(String key) {\n",
                "  for ($javatype$ el : get$upperfield$List()) {\n",
                "    if (el.get$key_field$().equals(key)) {\n",
                "      return el.get$val_field$();\n",
                "    }\n",
                "  }\n",
                "  return null;\n",
                "}\n",
            ),
        )
    }

    /// Statement adding the field's string form to `m`.
    pub fn generate_to_map(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        if !Self::supports_flat_map(self.field) {
            return Err(CodegenError::UnsupportedFlatMap {
                field: self.field.name.clone(),
            });
        }

        let getter = format!("get{}()", self.accessor);
        let vars = self.vars_with([("string", value_to_string(&getter, &self.field.kind))]);
        p.print(
            &vars,
            concat!(
                "if (has$upperfield$()) {\n",
                "  m.put(\"$field$\", $string$);\n",
                "}\n",
            ),
        )
    }

    fn parse_singular(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        let key = format!("\"{}\"", self.json_name);
        let vars = self.vars_with([("read", typed_read(&self.field.kind, &self.java, "json", &key))]);

        match &self.field.kind {
            FieldKind::Message(_) => p.print(
                &vars,
                concat!(
                    "if (json.has(\"$field$\")) {\n",
                    "  builder.set$upperfield$($javatype$.parseFromJSON($read$));\n",
                    "}\n",
                ),
            ),
            FieldKind::Enum(_) => p.print(
                &vars,
                concat!(
                    "if (json.has(\"$field$\") && !json.isNull(\"$field$\")) {\n",
                    "  $javatype$ parsed = $javatype$.valueOf($read$);\n",
                    "  if (parsed != null) {\n",
                    "    builder.set$upperfield$(parsed);\n",
                    "  }\n",
                    "}\n",
                ),
            ),
            _ => p.print(
                &vars,
                concat!(
                    "if (json.has(\"$field$\") && !json.isNull(\"$field$\")) {\n",
                    "  builder.set$upperfield$($read$);\n",
                    "}\n",
                ),
            ),
        }
    }

    fn parse_repeated(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        let vars = self.vars_with([("read", typed_read(&self.field.kind, &self.java, "arr", "i"))]);
        let element = match &self.field.kind {
            FieldKind::Message(_) => {
                "    builder.add$upperfield$($javatype$.parseFromJSON($read$));\n"
            }
            FieldKind::Enum(_) => concat!(
                "    $javatype$ parsed = $javatype$.valueOf($read$);\n",
                "    if (parsed != null) {\n",
                "      builder.add$upperfield$(parsed);\n",
                "    }\n",
            ),
            _ => "    builder.add$upperfield$($read$);\n",
        };

        p.print(
            &vars,
            concat!(
                "if (json.has(\"$field$\")) {\n",
                "  org.json.JSONArray arr = json.getJSONArray(\"$field$\");\n",
                "  for (int i = 0; i < arr.length(); i++) {\n",
            ),
        )?;
        p.print(&vars, element)?;
        p.print(&vars, "  }\n}\n")
    }

    fn parse_map(&self, value: &MapValue<'_>, p: &mut Printer<'_>) -> CodegenResult<()> {
        let vars = self.vars_with([("read", typed_read(&value.field.kind, &value.java, "obj", "key"))]);
        let assign = match &value.field.kind {
            FieldKind::Message(_) => {
                "    item.set$val_field$($val_class$.parseFromJSON($read$));\n"
            }
            FieldKind::Enum(_) => concat!(
                "    $val_class$ value = $val_class$.valueOf($read$);\n",
                "    if (value != null) {\n",
                "      item.set$val_field$(value);\n",
                "    }\n",
            ),
            _ => "    item.set$val_field$($read$);\n",
        };

        p.print(
            &vars,
            concat!(
                "if (json.has(\"$field$\")) {\n",
                "  org.json.JSONObject obj = json.getJSONObject(\"$field$\");\n",
                "  java.util.Iterator<String> keys = obj.keys();\n",
                "  while (keys.hasNext()) {\n",
                "    String key = keys.next();\n",
                "    $javatype$.Builder item = $javatype$.newBuilder();\n",
                "    item.set$key_field$(key);\n",
            ),
        )?;
        p.print(&vars, assign)?;
        p.print(
            &vars,
            concat!(
                "    builder.add$upperfield$(item.build());\n",
                "  }\n",
                "}\n",
            ),
        )
    }

    fn vars_with<const N: usize>(&self, extra: [(&'static str, String); N]) -> Vars {
        let mut vars = self.vars.clone();
        vars.extend(extra);
        vars
    }
}

fn resolve_map<'a>(
    field: &FieldSpec,
    entry: &'a MapEntry,
    vars: &mut Vars,
) -> CodegenResult<MapValue<'a>> {
    let unresolved = |missing: &str| CodegenError::UnresolvedMapField {
        field: field.name.clone(),
        missing: missing.to_string(),
    };
    let key = entry.key().ok_or_else(|| unresolved(&entry.key_field))?;
    let value = entry.value().ok_or_else(|| unresolved(&entry.value_field))?;

    if key.is_repeated() || key.kind != FieldKind::String {
        let kind = if key.is_repeated() {
            format!("repeated {}", key.kind)
        } else {
            key.kind.to_string()
        };
        return Err(CodegenError::UnsupportedMapKey {
            field: field.name.clone(),
            kind,
        });
    }
    if value.is_repeated() {
        return Err(CodegenError::UnsupportedMapValue {
            field: field.name.clone(),
            value: value.name.clone(),
        });
    }
    let java = java_type(&value.kind).ok_or_else(|| CodegenError::UnsupportedType {
        field: format!("{}.{}", field.name, value.name),
        kind: value.kind.to_string(),
    })?;

    // Enum values keep their enum class in accessors; everything else is boxed.
    let object = if value.kind.is_enum() {
        java.unboxed.clone()
    } else {
        java.boxed.clone()
    };
    let accessor = naming::field_accessor_name(&value.name);

    vars.insert("key_field", naming::field_accessor_name(&key.name));
    vars.insert("val_field", accessor.clone());
    vars.insert("val_class", java.unboxed.clone());
    vars.insert("val_object", object);

    Ok(MapValue {
        field: value,
        java,
        accessor,
    })
}

/// Typed `org.json` read of `arg` from `source`; floats are narrowed from double.
fn typed_read(kind: &FieldKind, java: &JavaType, source: &str, arg: &str) -> String {
    let read = format!("{source}.get{}({arg})", java.json_accessor);
    match kind {
        FieldKind::Float => format!("({}) {read}", java.unboxed),
        _ => read,
    }
}

/// JSON-ready form of a Java expression: messages nest, enums travel as numbers.
fn write_value(kind: &FieldKind, expr: &str) -> String {
    match kind {
        FieldKind::Message(_) => format!("{expr}.toJSON()"),
        FieldKind::Enum(_) => format!("{expr}.getNumber()"),
        _ => expr.to_string(),
    }
}
