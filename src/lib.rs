//! sqlcompose: dialect-aware SQL fragment composer.
//!
//! Builds parameterized query text plus the ordered list of values bound to its
//! placeholders. Nothing here talks to a database.
//!
//! ```
//! use sqlcompose::{Fragment, PostgresGrammar, Value, WhereGroup, query};
//!
//! let group = WhereGroup::new()
//!     .where_("name", "=", "Marty")
//!     .where_("surname", "=", "McFly");
//! let q = query!("SELECT id FROM t WHERE %s LIMIT %p", group, 1).unwrap();
//!
//! assert_eq!(
//!     q.render_with(&mut PostgresGrammar::new()),
//!     r#"SELECT id FROM t WHERE "name" = $1 AND "surname" = $2 LIMIT $3"#
//! );
//! assert_eq!(
//!     q.parameters(),
//!     vec![Value::from("Marty"), Value::from("McFly"), Value::from(1)]
//! );
//! ```

pub mod directive;
pub mod fragment;
pub mod grammar;
pub mod list;
pub mod macros;
pub mod registry;
pub mod set_group;
#[cfg(test)]
mod set_values_list_tests;
mod string_builder;
pub mod template;
pub mod value;
pub mod values_group;
pub mod where_group;

pub use crate::directive::{DirectiveKind, Segment, scan};
pub use crate::fragment::{Arg, Fragment};
pub use crate::grammar::{
    Grammar, GrammarError, GrammarOverride, MYSQL, MySqlGrammar, POSTGRES, PostgresGrammar,
    SQLITE, SqliteGrammar,
};
pub use crate::list::PlaceholderList;
pub use crate::registry::{
    DefaultGrammarGuard, GrammarFactory, GrammarRegistry, default_grammar, default_grammar_name,
    grammar, register_grammar, set_default_grammar, set_default_grammar_scoped,
};
pub use crate::set_group::SetGroup;
pub use crate::template::{Template, TemplateError, build};
pub use crate::value::{DisplayValue, IntoValues, Value, stringify};
pub use crate::values_group::ValuesGroup;
pub use crate::where_group::{Joiner, WhereGroup};
