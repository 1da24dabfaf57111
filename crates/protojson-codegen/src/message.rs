//! Per-message generation.
//!
//! Emits, in order: the map accessor clusters, `parseFromJSON`, `toJSON`,
//! and `toMap` when every field can be flattened. Nested messages get their
//! own insertion point and are handled by the driver.

use protojson_core::{CodegenError, CodegenResult, MessageSpec};
use tracing::{debug, warn};

use crate::field::FieldCodec;
use crate::printer::{Printer, Vars};

/// Generates the class-scope fragment for one message.
#[derive(Debug)]
pub struct MessageCodec<'a> {
    message: &'a MessageSpec,
    fields: Vec<FieldCodec<'a>>,
    errors: Vec<CodegenError>,
    vars: Vars,
}

impl<'a> MessageCodec<'a> {
    /// Build codecs for every field. Fields that cannot be generated are
    /// skipped and their errors kept for [`generate`](Self::generate).
    pub fn new(message: &'a MessageSpec) -> Self {
        let mut fields = Vec::with_capacity(message.fields.len());
        let mut errors = Vec::new();

        for field in &message.fields {
            match FieldCodec::new(field) {
                Ok(codec) => fields.push(codec),
                Err(err) => {
                    warn!(message = %message.full_name, field = %field.name, error = %err, "skipping field");
                    errors.push(err);
                }
            }
        }

        Self {
            message,
            fields,
            errors,
            vars: Vars::from([("classname", message.class_name.clone())]),
        }
    }

    /// Whether `toMap()` is emitted: every field must be a singular scalar or enum.
    pub fn supports_flat_map(&self) -> bool {
        self.message.fields.iter().all(FieldCodec::supports_flat_map)
    }

    /// Write the message fragment, returning every error recorded for it.
    pub fn generate(self, p: &mut Printer<'_>) -> Vec<CodegenError> {
        debug!(
            message = %self.message.full_name,
            fields = self.fields.len(),
            flat_map = self.supports_flat_map(),
            "generating message"
        );

        let mut errors = self.errors.clone();
        if let Err(err) = self.generate_source(p) {
            warn!(message = %self.message.full_name, error = %err, "message generation failed");
            errors.push(err);
        }
        errors
    }

    fn generate_source(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        self.generate_map_accessors(p)?;
        self.generate_parse_json(p)?;
        p.print_raw("\n");
        self.generate_to_json(p)?;
        p.print_raw("\n");
        if self.supports_flat_map() {
            self.generate_to_map(p)?;
            p.print_raw("\n");
        }
        Ok(())
    }

    fn generate_map_accessors(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        for codec in self.fields.iter().filter(|c| c.field().map_entry().is_some()) {
            codec.generate_map_accessors(p)?;
            p.print_raw("\n");
        }
        Ok(())
    }

    fn generate_parse_json(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        p.print(
            &self.vars,
            concat!(
                "public static $classname$ parseFromJSON(org.json.JSONObject json) throws org.json.JSONException {\n",
                "  $classname$.Builder builder = $classname$.newBuilder();\n",
            ),
        )?;
        p.indent();
        for codec in &self.fields {
            codec.generate_parse_json(p)?;
        }
        p.outdent();
        p.print_raw("  return builder.build();\n}\n");
        Ok(())
    }

    fn generate_to_json(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        p.print_raw(concat!(
            "public org.json.JSONObject toJSON() throws org.json.JSONException {\n",
            "  org.json.JSONObject json = new org.json.JSONObject();\n",
        ));
        p.indent();
        for codec in &self.fields {
            codec.generate_to_json(p)?;
        }
        p.outdent();
        p.print_raw("  return json;\n}\n");
        Ok(())
    }

    fn generate_to_map(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        p.print_raw(concat!(
            "public java.util.Map<String, String> toMap() {\n",
            "  java.util.Map<String, String> m = new java.util.LinkedHashMap<String, String>();\n",
        ));
        p.indent();
        for codec in &self.fields {
            codec.generate_to_map(p)?;
        }
        p.outdent();
        p.print_raw("  return m;\n}\n");
        Ok(())
    }
}
