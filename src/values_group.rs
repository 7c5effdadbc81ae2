//! ValuesGroup: parenthesized value tuples for INSERT ... VALUES.

use crate::fragment::{Fragment, arg_from_fragment};
use crate::grammar::{Grammar, GrammarOverride};
use crate::string_builder::StringBuilder;
use crate::value::{IntoValues, Value};

/// ValuesGroup: one `(<placeholders>)` tuple per `values` call, joined by `", "`.
#[derive(Debug, Clone, Default)]
pub struct ValuesGroup {
    rows: Vec<Vec<Value>>,
    grammar: GrammarOverride,
}

impl ValuesGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tuples.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one tuple. An empty tuple renders as `()`.
    pub fn values(mut self, row: impl IntoValues) -> Self {
        self.rows.push(row.collect_values());
        self
    }
}

impl Fragment for ValuesGroup {
    fn render_with(&self, grammar: &mut dyn Grammar) -> String {
        let mut buf = StringBuilder::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_char('(');
            buf.write_str(&grammar.placeholder(row.len()));
            buf.write_char(')');
        }
        buf.into_string()
    }

    fn extend_parameters(&self, out: &mut Vec<Value>) {
        for row in &self.rows {
            out.extend(row.iter().cloned());
        }
    }

    fn grammar_override(&self) -> &GrammarOverride {
        &self.grammar
    }

    fn grammar_override_mut(&mut self) -> &mut GrammarOverride {
        &mut self.grammar
    }
}

arg_from_fragment!(ValuesGroup);
