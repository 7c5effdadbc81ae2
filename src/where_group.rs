//! WhereGroup: boolean conjunction of WHERE conditions joined by AND / OR.

use crate::fragment::{Fragment, arg_from_fragment};
use crate::grammar::{Grammar, GrammarOverride};
use crate::string_builder::StringBuilder;
use crate::template::Template;
use crate::value::{IntoValues, Value};

/// Boolean joiner placed before a condition; frozen when the condition is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    /// First condition of a group.
    Leading,
    And,
    Or,
}

impl Joiner {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leading => "",
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

#[derive(Debug, Clone)]
enum Condition {
    Compare {
        field: String,
        operator: String,
        value: Value,
    },
    Raw(Template),
    In {
        field: String,
        negated: bool,
        values: Vec<Value>,
    },
    InSub {
        field: String,
        negated: bool,
        query: Box<dyn Fragment>,
    },
    Null {
        field: String,
        negated: bool,
    },
    Group(WhereGroup),
}

impl Condition {
    fn render(&self, grammar: &mut dyn Grammar, buf: &mut StringBuilder) {
        match self {
            Self::Compare {
                field,
                operator,
                ..
            } => {
                buf.write_str(&grammar.wrap(field));
                buf.write_char(' ');
                buf.write_str(operator);
                buf.write_char(' ');
                buf.write_str(&grammar.placeholder(1));
            }
            Self::Raw(t) => buf.write_str(&t.render_with(grammar)),
            Self::In {
                field,
                negated,
                values,
            } => {
                buf.write_str(&grammar.wrap(field));
                buf.write_str(if *negated { " NOT IN (" } else { " IN (" });
                buf.write_str(&grammar.placeholder(values.len()));
                buf.write_char(')');
            }
            Self::InSub {
                field,
                negated,
                query,
            } => {
                buf.write_str(&grammar.wrap(field));
                buf.write_str(if *negated { " NOT IN (" } else { " IN (" });
                buf.write_str(&query.render_with(grammar));
                buf.write_char(')');
            }
            Self::Null { field, negated } => {
                buf.write_str(&grammar.wrap(field));
                buf.write_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Self::Group(g) => {
                buf.write_char('(');
                buf.write_str(&g.render_with(grammar));
                buf.write_char(')');
            }
        }
    }

    fn extend_parameters(&self, out: &mut Vec<Value>) {
        match self {
            Self::Compare { value, .. } => out.push(value.clone()),
            Self::Raw(t) => t.extend_parameters(out),
            Self::In { values, .. } => out.extend(values.iter().cloned()),
            Self::InSub { query, .. } => query.extend_parameters(out),
            Self::Null { .. } => {}
            Self::Group(g) => g.extend_parameters(out),
        }
    }
}

/// WhereGroup: ordered conditions, each preceded by the joiner chosen when it was appended.
///
/// ```
/// use sqlcompose::{Fragment, PostgresGrammar, WhereGroup};
///
/// let group = WhereGroup::new()
///     .where_("type", "=", "a")
///     .or_where("type", "=", "b");
/// let sql = group.render_with(&mut PostgresGrammar::new());
/// assert_eq!(sql, r#""type" = $1 OR "type" = $2"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WhereGroup {
    conditions: Vec<(Joiner, Condition)>,
    grammar: GrammarOverride,
}

impl WhereGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn push(mut self, joiner: Joiner, condition: Condition) -> Self {
        let joiner = if self.conditions.is_empty() {
            Joiner::Leading
        } else {
            joiner
        };
        self.conditions.push((joiner, condition));
        self
    }

    fn compare(
        self,
        joiner: Joiner,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.push(
            joiner,
            Condition::Compare {
                field: field.into(),
                operator: operator.into(),
                value: value.into(),
            },
        )
    }

    fn membership(
        self,
        joiner: Joiner,
        field: impl Into<String>,
        negated: bool,
        values: impl IntoValues,
    ) -> Self {
        self.push(
            joiner,
            Condition::In {
                field: field.into(),
                negated,
                values: values.collect_values(),
            },
        )
    }

    fn sub_query(
        self,
        joiner: Joiner,
        field: impl Into<String>,
        negated: bool,
        query: impl Fragment + 'static,
    ) -> Self {
        self.push(
            joiner,
            Condition::InSub {
                field: field.into(),
                negated,
                query: Box::new(query),
            },
        )
    }

    fn nullity(self, joiner: Joiner, field: impl Into<String>, negated: bool) -> Self {
        self.push(
            joiner,
            Condition::Null {
                field: field.into(),
                negated,
            },
        )
    }

    /// `"field" <operator> <placeholder>`, AND-joined.
    pub fn where_(
        self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.compare(Joiner::And, field, operator, value)
    }

    pub fn or_where(
        self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.compare(Joiner::Or, field, operator, value)
    }

    /// Arbitrary template condition, e.g. `jsondata->%p = %p`.
    pub fn where_raw(self, template: Template) -> Self {
        self.push(Joiner::And, Condition::Raw(template))
    }

    pub fn or_where_raw(self, template: Template) -> Self {
        self.push(Joiner::Or, Condition::Raw(template))
    }

    /// `"field" IN (<placeholders>)`.
    pub fn where_in(self, field: impl Into<String>, values: impl IntoValues) -> Self {
        self.membership(Joiner::And, field, false, values)
    }

    pub fn or_where_in(self, field: impl Into<String>, values: impl IntoValues) -> Self {
        self.membership(Joiner::Or, field, false, values)
    }

    pub fn where_not_in(self, field: impl Into<String>, values: impl IntoValues) -> Self {
        self.membership(Joiner::And, field, true, values)
    }

    pub fn or_where_not_in(self, field: impl Into<String>, values: impl IntoValues) -> Self {
        self.membership(Joiner::Or, field, true, values)
    }

    /// `"field" IN (<sub query>)`; the sub query renders with this group's grammar.
    pub fn where_in_sub(self, field: impl Into<String>, query: impl Fragment + 'static) -> Self {
        self.sub_query(Joiner::And, field, false, query)
    }

    pub fn or_where_in_sub(self, field: impl Into<String>, query: impl Fragment + 'static) -> Self {
        self.sub_query(Joiner::Or, field, false, query)
    }

    pub fn where_not_in_sub(self, field: impl Into<String>, query: impl Fragment + 'static) -> Self {
        self.sub_query(Joiner::And, field, true, query)
    }

    pub fn or_where_not_in_sub(
        self,
        field: impl Into<String>,
        query: impl Fragment + 'static,
    ) -> Self {
        self.sub_query(Joiner::Or, field, true, query)
    }

    pub fn where_null(self, field: impl Into<String>) -> Self {
        self.nullity(Joiner::And, field, false)
    }

    pub fn or_where_null(self, field: impl Into<String>) -> Self {
        self.nullity(Joiner::Or, field, false)
    }

    pub fn where_not_null(self, field: impl Into<String>) -> Self {
        self.nullity(Joiner::And, field, true)
    }

    pub fn or_where_not_null(self, field: impl Into<String>) -> Self {
        self.nullity(Joiner::Or, field, true)
    }

    /// Nest another group in parentheses.
    pub fn where_group(self, group: WhereGroup) -> Self {
        self.push(Joiner::And, Condition::Group(group))
    }

    pub fn or_where_group(self, group: WhereGroup) -> Self {
        self.push(Joiner::Or, Condition::Group(group))
    }

    /// Joiners in append order.
    pub fn joiners(&self) -> impl Iterator<Item = Joiner> + '_ {
        self.conditions.iter().map(|(j, _)| *j)
    }
}

impl Fragment for WhereGroup {
    fn render_with(&self, grammar: &mut dyn Grammar) -> String {
        let mut buf = StringBuilder::new();
        for (joiner, condition) in &self.conditions {
            buf.write_str(joiner.as_str());
            condition.render(grammar, &mut buf);
        }
        buf.into_string()
    }

    fn extend_parameters(&self, out: &mut Vec<Value>) {
        for (_, condition) in &self.conditions {
            condition.extend_parameters(out);
        }
    }

    fn grammar_override(&self) -> &GrammarOverride {
        &self.grammar
    }

    fn grammar_override_mut(&mut self) -> &mut GrammarOverride {
        &mut self.grammar
    }
}

arg_from_fragment!(WhereGroup);
