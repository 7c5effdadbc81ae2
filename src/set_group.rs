//! SetGroup: comma-joined assignments for UPDATE ... SET.

use crate::fragment::{Fragment, arg_from_fragment};
use crate::grammar::{Grammar, GrammarOverride};
use crate::string_builder::StringBuilder;
use crate::template::Template;
use crate::value::Value;

#[derive(Debug, Clone)]
enum Assignment {
    Value { field: String, value: Value },
    Raw(Template),
}

/// SetGroup: `"field" = <placeholder>` entries, always joined by `", "`.
#[derive(Debug, Clone, Default)]
pub struct SetGroup {
    assignments: Vec<Assignment>,
    grammar: GrammarOverride,
}

impl SetGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Bind `field` to `value`.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.push(Assignment::Value {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Arbitrary template assignment, e.g. `jsondata->%p = %p`.
    pub fn set_raw(mut self, template: Template) -> Self {
        self.assignments.push(Assignment::Raw(template));
        self
    }
}

impl Fragment for SetGroup {
    fn render_with(&self, grammar: &mut dyn Grammar) -> String {
        let mut buf = StringBuilder::new();
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                buf.write_str(", ");
            }
            match assignment {
                Assignment::Value { field, .. } => {
                    buf.write_str(&grammar.wrap(field));
                    buf.write_str(" = ");
                    buf.write_str(&grammar.placeholder(1));
                }
                Assignment::Raw(t) => buf.write_str(&t.render_with(grammar)),
            }
        }
        buf.into_string()
    }

    fn extend_parameters(&self, out: &mut Vec<Value>) {
        for assignment in &self.assignments {
            match assignment {
                Assignment::Value { value, .. } => out.push(value.clone()),
                Assignment::Raw(t) => t.extend_parameters(out),
            }
        }
    }

    fn grammar_override(&self) -> &GrammarOverride {
        &self.grammar
    }

    fn grammar_override_mut(&mut self) -> &mut GrammarOverride {
        &mut self.grammar
    }
}

arg_from_fragment!(SetGroup);
