//! Indenting text printer with `$variable$` substitution.
//!
//! Templates reference variables as `$name$`; `$$` prints a literal `$`.
//! Indentation is applied at the start of every non-empty line, so templates
//! are written flush-left and nested by calling [`Printer::indent`].

use std::collections::BTreeMap;

use protojson_core::{CodegenError, CodegenResult};

/// Variables available to a template.
pub type Vars = BTreeMap<&'static str, String>;

const DELIMITER: char = '$';
const INDENT_STEP: &str = "  ";

/// Writes templated text into a borrowed buffer.
#[derive(Debug)]
pub struct Printer<'a> {
    out: &'a mut String,
    indent: String,
    at_line_start: bool,
}

impl<'a> Printer<'a> {
    /// Create a printer appending to `out`.
    pub fn new(out: &'a mut String) -> Self {
        let at_line_start = out.is_empty() || out.ends_with('\n');
        Self {
            out,
            indent: String::new(),
            at_line_start,
        }
    }

    /// Print `template`, substituting `$name$` from `vars`.
    ///
    /// Fails with [`CodegenError::UndefinedVariable`] if the template names a
    /// variable missing from `vars` or leaves a `$` unterminated. Text before
    /// the failing variable has already been written.
    pub fn print(&mut self, vars: &Vars, template: &str) -> CodegenResult<()> {
        let mut rest = template;
        while let Some(start) = rest.find(DELIMITER) {
            self.write(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find(DELIMITER).ok_or_else(|| {
                CodegenError::UndefinedVariable(format!("unterminated variable in {template:?}"))
            })?;

            let name = &after[..end];
            if name.is_empty() {
                self.write("$");
            } else {
                let value = vars
                    .get(name)
                    .ok_or_else(|| CodegenError::UndefinedVariable(name.to_string()))?;
                self.write(value);
            }
            rest = &after[end + 1..];
        }
        self.write(rest);
        Ok(())
    }

    /// Print text verbatim, applying only indentation.
    pub fn print_raw(&mut self, text: &str) {
        self.write(text);
    }

    /// Increase indentation by one step.
    pub fn indent(&mut self) {
        self.indent.push_str(INDENT_STEP);
    }

    /// Decrease indentation by one step. Does nothing at column zero.
    pub fn outdent(&mut self) {
        let len = self.indent.len().saturating_sub(INDENT_STEP.len());
        self.indent.truncate(len);
    }

    fn write(&mut self, text: &str) {
        for piece in text.split_inclusive('\n') {
            if self.at_line_start && !piece.starts_with('\n') {
                self.out.push_str(&self.indent);
            }
            self.out.push_str(piece);
            self.at_line_start = piece.ends_with('\n');
        }
    }
}
