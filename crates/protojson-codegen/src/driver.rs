//! Walks a schema file and writes every fragment into a sink.
//!
//! Messages are visited depth-first pre-order, each into its own
//! `class_scope` insertion point; services share the file's
//! `outer_class_scope`. Errors never stop the walk: they are gathered into a
//! [`GenerationReport`] and surfaced once at the end.

use protojson_core::{CodegenError, CodegenResult, FileSpec, MessageSpec};
use tracing::{debug, info};

use crate::message::MessageCodec;
use crate::printer::Printer;
use crate::service::ServiceCodec;
use crate::sink::{InsertionSink, OUTER_CLASS_SCOPE, class_scope};

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// Messages a fragment was written for, nested ones included.
    pub messages: usize,
    /// Services a class was written for.
    pub services: usize,
    /// Every error recorded, in generation order.
    pub errors: Vec<CodegenError>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: GenerationReport) {
        self.messages += other.messages;
        self.services += other.services;
        self.errors.extend(other.errors);
    }

    /// `Err(GenerationFailed)` if any error was recorded.
    pub fn into_result(self) -> CodegenResult<Self> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(CodegenError::GenerationFailed(self.errors))
        }
    }
}

/// Generate all fragments for one schema file.
pub fn generate_file(file: &FileSpec, sink: &mut dyn InsertionSink) -> GenerationReport {
    let _span = tracing::debug_span!("generate_file", file = %file.name).entered();
    let mut report = GenerationReport::default();

    for message in &file.messages {
        generate_message(message, &file.java_file, sink, &mut report);
    }

    if !file.services.is_empty() {
        let mut printer = Printer::new(sink.open_for_insert(&file.java_file, OUTER_CLASS_SCOPE));
        for service in &file.services {
            report.errors.extend(ServiceCodec::new(service).generate(&mut printer));
            report.services += 1;
        }
    }

    debug!(
        messages = report.messages,
        services = report.services,
        errors = report.errors.len(),
        "file generated"
    );
    report
}

/// Generate fragments for several files, in order.
pub fn generate_files<'a>(
    files: impl IntoIterator<Item = &'a FileSpec>,
    sink: &mut dyn InsertionSink,
) -> GenerationReport {
    let mut report = GenerationReport::default();
    for file in files {
        report.merge(generate_file(file, sink));
    }

    info!(
        messages = report.messages,
        services = report.services,
        errors = report.errors.len(),
        "generation finished"
    );
    report
}

fn generate_message(
    message: &MessageSpec,
    java_file: &str,
    sink: &mut dyn InsertionSink,
    report: &mut GenerationReport,
) {
    let insertion_point = class_scope(&message.full_name);
    let mut printer = Printer::new(sink.open_for_insert(java_file, &insertion_point));
    report.errors.extend(MessageCodec::new(message).generate(&mut printer));
    report.messages += 1;

    for nested in &message.nested {
        generate_message(nested, java_file, sink, report);
    }
}

#[cfg(test)]
#[path = "driver/driver_tests.rs"]
mod driver_tests;
