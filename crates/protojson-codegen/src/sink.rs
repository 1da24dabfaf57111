//! Destinations for generated fragments.
//!
//! protoc merges each fragment into the named file at the named insertion
//! point; a sink only has to key the text by that pair.

/// Insertion point for the top-level scope of a generated Java file.
pub const OUTER_CLASS_SCOPE: &str = "outer_class_scope";

/// Insertion point inside the class generated for a message.
pub fn class_scope(full_name: &str) -> String {
    format!("class_scope:{full_name}")
}

/// Receives generated text keyed by `(file, insertion point)`.
pub trait InsertionSink {
    /// Buffer to append text for `insertion_point` in `file_name`.
    ///
    /// Opening the same pair twice returns the same buffer.
    fn open_for_insert(&mut self, file_name: &str, insertion_point: &str) -> &mut String;
}

/// A generated piece of text and where protoc should insert it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub file_name: String,
    pub insertion_point: String,
    pub content: String,
}

/// In-memory sink keeping fragments in the order they were first opened.
#[derive(Debug, Clone, Default)]
pub struct FragmentBuffer {
    fragments: Vec<Fragment>,
}

impl FragmentBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fragments in open order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Consume the buffer, returning fragments in open order.
    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }

    /// Content written for a `(file, insertion point)` pair, if any.
    pub fn get(&self, file_name: &str, insertion_point: &str) -> Option<&str> {
        self.position(file_name, insertion_point)
            .map(|i| self.fragments[i].content.as_str())
    }

    fn position(&self, file_name: &str, insertion_point: &str) -> Option<usize> {
        self.fragments
            .iter()
            .position(|f| f.file_name == file_name && f.insertion_point == insertion_point)
    }
}

impl InsertionSink for FragmentBuffer {
    fn open_for_insert(&mut self, file_name: &str, insertion_point: &str) -> &mut String {
        let index = match self.position(file_name, insertion_point) {
            Some(index) => index,
            None => {
                self.fragments.push(Fragment {
                    file_name: file_name.to_string(),
                    insertion_point: insertion_point.to_string(),
                    content: String::new(),
                });
                self.fragments.len() - 1
            }
        };
        &mut self.fragments[index].content
    }
}

#[cfg(test)]
#[path = "sink/sink_tests.rs"]
mod sink_tests;
