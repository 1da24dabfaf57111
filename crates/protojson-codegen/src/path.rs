//! HTTP path templates with positional `:name` parameters.
//!
//! A parameter starts at `:` and runs up to the next `/` or the end of the
//! template; everything else is literal text. `/users/:id/items/:item`
//! parses to `"/users/"`, `id`, `"/items/"`, `item`.

use protojson_core::{CodegenError, naming};
use thiserror::Error;

const PARAM_MARKER: char = ':';
const SEPARATOR: char = '/';

/// Names the generated stub declares itself; parameters may not shadow them.
const RESERVED_NAMES: &[&str] = &["req", "callback", "path", "params", "e"];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Errors found while parsing or expanding a path template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathTemplateError {
    #[error("empty parameter name at byte {0}")]
    EmptyParam(usize),

    #[error("parameter {0:?} is not a valid Java identifier")]
    InvalidParam(String),

    #[error("parameter {0:?} appears more than once")]
    DuplicateParam(String),

    #[error("parameter {0:?} collides with a stub local")]
    ReservedParam(String),

    #[error("expected {expected} arguments, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },
}

impl PathTemplateError {
    /// Attach the method and template this error came from.
    pub fn into_codegen(self, method: &str, path: &str) -> CodegenError {
        CodegenError::InvalidPathTemplate {
            method: method.to_string(),
            path: path.to_string(),
            reason: self.to_string(),
        }
    }
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Literal(String),
    Param(String),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<PathSegment>,
}

impl PathTemplate {
    /// Parse a template, validating its parameter names.
    pub fn parse(template: &str) -> Result<Self, PathTemplateError> {
        let mut segments = Vec::new();
        let mut rest = template;

        while !rest.is_empty() {
            let Some(marker) = rest.find(PARAM_MARKER) else {
                segments.push(PathSegment::Literal(rest.to_string()));
                break;
            };
            if marker > 0 {
                segments.push(PathSegment::Literal(rest[..marker].to_string()));
            }

            let after = &rest[marker + 1..];
            let (name, next) = match after.find(SEPARATOR) {
                Some(end) => (&after[..end], &after[end..]),
                None => (after, ""),
            };
            if name.is_empty() {
                return Err(PathTemplateError::EmptyParam(template.len() - after.len()));
            }
            segments.push(PathSegment::Param(name.to_string()));
            rest = next;
        }

        let template = Self { segments };
        template.validate()?;
        Ok(template)
    }

    /// Segments in template order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Parameter names in template order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::Param(name) => Some(name.as_str()),
            PathSegment::Literal(_) => None,
        })
    }

    /// Substitute `args` for the parameters, in order.
    pub fn expand(&self, args: &[&str]) -> Result<String, PathTemplateError> {
        let expected = self.params().count();
        if args.len() != expected {
            return Err(PathTemplateError::ArgumentCount {
                expected,
                actual: args.len(),
            });
        }

        let mut args = args.iter();
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Literal(text) => out.push_str(text),
                PathSegment::Param(_) => {
                    if let Some(arg) = args.next() {
                        out.push_str(arg);
                    }
                }
            }
        }
        Ok(out)
    }

    /// Java expression concatenating literals and parameter variables.
    ///
    /// An empty template yields `""`.
    pub fn java_expression(&self) -> String {
        if self.segments.is_empty() {
            return "\"\"".to_string();
        }

        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal(text) => format!("\"{}\"", naming::escape_java_string(text)),
                PathSegment::Param(name) => name.clone(),
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }

    fn validate(&self) -> Result<(), PathTemplateError> {
        let mut seen: Vec<&str> = Vec::new();
        for name in self.params() {
            if !is_java_identifier(name) {
                return Err(PathTemplateError::InvalidParam(name.to_string()));
            }
            if RESERVED_NAMES.contains(&name) {
                return Err(PathTemplateError::ReservedParam(name.to_string()));
            }
            if seen.contains(&name) {
                return Err(PathTemplateError::DuplicateParam(name.to_string()));
            }
            seen.push(name);
        }
        Ok(())
    }
}

fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') && !JAVA_KEYWORDS.contains(&name)
}
