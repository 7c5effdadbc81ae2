//! Template: `%s` / `%p` format strings composed from scalars and nested fragments.

use crate::directive::{DirectiveKind, Segment, directive_count, scan};
use crate::fragment::{Arg, Fragment, arg_from_fragment};
use crate::grammar::{Grammar, GrammarOverride};
use crate::string_builder::StringBuilder;
use crate::value::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template directive {directive} at byte {position} needs argument #{needed}, only {supplied} supplied")]
    ArgumentUnderflow {
        directive: &'static str,
        position: usize,
        needed: usize,
        supplied: usize,
    },
    #[error("template consumes {consumed} arguments, {supplied} supplied")]
    UnusedArguments { consumed: usize, supplied: usize },
}

/// Template: a scanned format string plus its arguments.
///
/// - `%s` splices a scalar's text inline (never bound) or renders a fragment in place.
/// - `%p` emits one placeholder and binds the scalar, or the fragment's parameters.
/// - `%%` is a literal `%`.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    segments: Vec<Segment>,
    args: Vec<Arg>,
    grammar: GrammarOverride,
}

/// Build: scan `text` and bind `args` to its directives.
///
/// Fails when a directive has no argument left, or when arguments are left over.
pub fn build(
    text: impl Into<String>,
    args: impl IntoIterator<Item = impl Into<Arg>>,
) -> Result<Template, TemplateError> {
    Template::new(text, args.into_iter().map(Into::into).collect())
}

impl Template {
    pub fn new(text: impl Into<String>, args: Vec<Arg>) -> Result<Self, TemplateError> {
        let text = text.into();
        let segments = scan(&text);
        tracing::trace!(template = %text, segments = segments.len(), "scanned template");

        for segment in &segments {
            if let Segment::Directive { kind, arg, offset } = *segment
                && arg >= args.len()
            {
                tracing::debug!(template = %text, position = offset, "template argument underflow");
                return Err(TemplateError::ArgumentUnderflow {
                    directive: kind.as_str(),
                    position: offset,
                    needed: arg + 1,
                    supplied: args.len(),
                });
            }
        }

        let consumed = directive_count(&segments);
        if consumed != args.len() {
            tracing::debug!(template = %text, consumed, supplied = args.len(), "unused template arguments");
            return Err(TemplateError::UnusedArguments {
                consumed,
                supplied: args.len(),
            });
        }

        Ok(Self {
            text,
            segments,
            args,
            grammar: GrammarOverride::default(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }
}

impl Fragment for Template {
    fn render_with(&self, grammar: &mut dyn Grammar) -> String {
        let mut buf = StringBuilder::with_capacity(self.text.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(range) => buf.write_str(&self.text[range.clone()]),
                Segment::Directive { kind, arg, .. } => match (kind, &self.args[*arg]) {
                    (DirectiveKind::Inline, Arg::Value(v)) => buf.write_str(&v.stringify()),
                    (DirectiveKind::Inline, Arg::Fragment(f)) => {
                        buf.write_str(&f.render_with(grammar))
                    }
                    (DirectiveKind::Placeholder, _) => buf.write_str(&grammar.placeholder(1)),
                },
            }
        }
        buf.into_string()
    }

    fn extend_parameters(&self, out: &mut Vec<Value>) {
        for segment in &self.segments {
            let Segment::Directive { kind, arg, .. } = segment else {
                continue;
            };
            match (kind, &self.args[*arg]) {
                (_, Arg::Fragment(f)) => f.extend_parameters(out),
                (DirectiveKind::Placeholder, Arg::Value(v)) => out.push(v.clone()),
                (DirectiveKind::Inline, Arg::Value(_)) => {}
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

arg_from_fragment!(Template);
