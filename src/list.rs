//! PlaceholderList: bare comma-separated placeholders, e.g. inside `ARRAY[...]`.

use crate::fragment::{Fragment, arg_from_fragment};
use crate::grammar::{Grammar, GrammarOverride};
use crate::string_builder::StringBuilder;
use crate::value::{IntoValues, Value};

/// PlaceholderList: each `append` contributes N comma-joined placeholders.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderList {
    chunks: Vec<Vec<Value>>,
    grammar: GrammarOverride,
}

impl PlaceholderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of bound values.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Append values; appending nothing is a no-op.
    pub fn append(mut self, values: impl IntoValues) -> Self {
        let chunk = values.collect_values();
        if !chunk.is_empty() {
            self.chunks.push(chunk);
        }
        self
    }
}

impl Fragment for PlaceholderList {
    fn render_with(&self, grammar: &mut dyn Grammar) -> String {
        let mut buf = StringBuilder::new();
        for chunk in &self.chunks {
            buf.write_separator(", ");
            buf.write_str(&grammar.placeholder(chunk.len()));
        }
        buf.into_string()
    }

    fn extend_parameters(&self, out: &mut Vec<Value>) {
        for chunk in &self.chunks {
            out.extend(chunk.iter().cloned());
        }
    }

    fn grammar_override(&self) -> &GrammarOverride {
        &self.grammar
    }

    fn grammar_override_mut(&mut self) -> &mut GrammarOverride {
        &mut self.grammar
    }
}

arg_from_fragment!(PlaceholderList);
