//! Grammar (dialects): identifier quoting and placeholder generation.
//!
//! A grammar with a placeholder counter (`$1, $2, ...`) is scoped to one render:
//! `placeholder` takes `&mut self`, so sharing one instance across concurrent
//! renders needs an external lock, and even then the numbering interleaves.
//! Create a fresh instance (or pin one deliberately) instead.

use dyn_clone::DynClone;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Registered name of [`PostgresGrammar`].
pub const POSTGRES: &str = "postgres";
/// Registered name of [`MySqlGrammar`].
pub const MYSQL: &str = "mysql";
/// Registered name of [`SqliteGrammar`].
pub const SQLITE: &str = "sqlite3";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("grammar '{0}' not found")]
    UnknownGrammar(String),
    #[error("negative placeholder count {0}")]
    InvalidPlaceholderCount(i64),
}

/// Grammar: dialect strategy used while rendering fragments.
pub trait Grammar: DynClone + fmt::Debug {
    /// Quote a (possibly dotted) identifier.
    fn wrap(&self, identifier: &str) -> String;

    /// Emit `count` placeholders joined by `", "`; zero yields empty text.
    fn placeholder(&mut self, count: usize) -> String;

    /// Checked variant of [`Grammar::placeholder`] for counts coming from signed arithmetic.
    fn try_placeholder(&mut self, count: i64) -> Result<String, GrammarError> {
        let n = usize::try_from(count).map_err(|_| GrammarError::InvalidPlaceholderCount(count))?;
        Ok(self.placeholder(n))
    }
}

dyn_clone::clone_trait_object!(Grammar);

impl Grammar for Box<dyn Grammar> {
    fn wrap(&self, identifier: &str) -> String {
        (**self).wrap(identifier)
    }

    fn placeholder(&mut self, count: usize) -> String {
        (**self).placeholder(count)
    }
}

/// Quote each dot-separated component of `path` with `quote`.
fn wrap_path(path: &str, quote: char) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    for (i, part) in path.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push(quote);
        out.push_str(part);
        out.push(quote);
    }
    out
}

fn repeat_token(token: &str, count: usize) -> String {
    vec![token; count].join(", ")
}

/// PostgreSQL: `"double"."quoted"` identifiers, numbered `$n` placeholders.
///
/// The counter lives in the instance and advances once per emitted placeholder.
#[derive(Debug, Clone, Default)]
pub struct PostgresGrammar {
    issued: usize,
}

impl PostgresGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placeholders emitted so far.
    pub fn issued(&self) -> usize {
        self.issued
    }
}

impl Grammar for PostgresGrammar {
    /// Everything from the first `:` on (a `::type` cast) is kept verbatim.
    fn wrap(&self, identifier: &str) -> String {
        match identifier.find(':') {
            Some(i) => {
                let mut out = wrap_path(&identifier[..i], '"');
                out.push_str(&identifier[i..]);
                out
            }
            None => wrap_path(identifier, '"'),
        }
    }

    fn placeholder(&mut self, count: usize) -> String {
        let mut out = String::new();
        for i in 0..count {
            if i > 0 {
                out.push_str(", ");
            }
            self.issued += 1;
            out.push('$');
            out.push_str(&self.issued.to_string());
        }
        out
    }
}

/// MySQL: backtick identifiers, `?` placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlGrammar;

impl Grammar for MySqlGrammar {
    fn wrap(&self, identifier: &str) -> String {
        wrap_path(identifier, '`')
    }

    fn placeholder(&mut self, count: usize) -> String {
        repeat_token("?", count)
    }
}

/// SQLite: same rules as MySQL under its own name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteGrammar;

impl Grammar for SqliteGrammar {
    fn wrap(&self, identifier: &str) -> String {
        wrap_path(identifier, '`')
    }

    fn placeholder(&mut self, count: usize) -> String {
        repeat_token("?", count)
    }
}

/// Sticky grammar override held by a fragment.
///
/// The pinned instance is shared by clones of the fragment and keeps its state
/// (e.g. the placeholder counter) across standalone renders.
#[derive(Clone, Default)]
pub struct GrammarOverride {
    pinned: Option<Rc<RefCell<Box<dyn Grammar>>>>,
}

impl GrammarOverride {
    pub fn set(&mut self, grammar: Box<dyn Grammar>) {
        self.pinned = Some(Rc::new(RefCell::new(grammar)));
    }

    pub fn clear(&mut self) {
        self.pinned = None;
    }

    pub fn is_set(&self) -> bool {
        self.pinned.is_some()
    }

    /// Run `f` with the pinned grammar, or with `fallback()` when nothing is pinned.
    pub(crate) fn with<R>(
        &self,
        fallback: impl FnOnce() -> Box<dyn Grammar>,
        f: impl FnOnce(&mut dyn Grammar) -> R,
    ) -> R {
        match &self.pinned {
            Some(cell) => {
                let mut grammar = cell.borrow_mut();
                f(&mut **grammar)
            }
            None => {
                let mut grammar = fallback();
                f(&mut *grammar)
            }
        }
    }
}

impl fmt::Debug for GrammarOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pinned {
            Some(cell) => match cell.try_borrow() {
                Ok(g) => f.debug_tuple("Pinned").field(&*g).finish(),
                Err(_) => f.write_str("Pinned(<in use>)"),
            },
            None => f.write_str("Ambient"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn postgres_wrap() {
        let g = PostgresGrammar::new();
        assert_eq!(g.wrap("name"), r#""name""#);
        assert_eq!(g.wrap("tx.name"), r#""tx"."name""#);
        assert_eq!(g.wrap("public.tx.name"), r#""public"."tx"."name""#);
        assert_eq!(g.wrap("a.b.c"), g.wrap("a.b.c"));
    }

    #[test]
    fn postgres_wrap_type_cast() {
        let g = PostgresGrammar::new();
        assert_eq!(g.wrap("name::text"), r#""name"::text"#);
        assert_eq!(g.wrap("public.tx.name::text"), r#""public"."tx"."name"::text"#);
        assert_eq!(g.wrap("tx.name::"), r#""tx"."name"::"#);
        assert_eq!(g.wrap("tx.name:"), r#""tx"."name":"#);
        assert_eq!(g.wrap("ts::timestamp.x"), r#""ts"::timestamp.x"#);
    }

    #[test]
    fn postgres_placeholder_counts_per_instance() {
        let mut g = PostgresGrammar::new();
        assert_eq!(g.placeholder(0), "");
        assert_eq!(g.placeholder(1), "$1");
        assert_eq!(g.placeholder(3), "$2, $3, $4");
        assert_eq!(g.issued(), 4);

        let mut other = PostgresGrammar::new();
        assert_eq!(other.placeholder(2), "$1, $2");
        assert_eq!(other.placeholder(2), "$3, $4");
    }

    #[test]
    fn backtick_grammars() {
        for g in [&MySqlGrammar as &dyn Grammar, &SqliteGrammar] {
            assert_eq!(g.wrap("name"), "`name`");
            assert_eq!(g.wrap("tx.name"), "`tx`.`name`");
            assert_eq!(g.wrap("public.tx.name"), "`public`.`tx`.`name`");
            assert_eq!(g.wrap("name::text"), "`name::text`");
        }
    }

    #[test]
    fn fixed_token_placeholder_has_no_counter() {
        let mut g = MySqlGrammar;
        assert_eq!(g.placeholder(0), "");
        assert_eq!(g.placeholder(1), "?");
        assert_eq!(g.placeholder(3), "?, ?, ?");
        assert_eq!(g.placeholder(2), "?, ?");
        assert_eq!(SqliteGrammar.placeholder(2), "?, ?");
    }

    #[test]
    fn try_placeholder_rejects_negative() {
        let mut g = PostgresGrammar::new();
        assert_eq!(
            g.try_placeholder(-1),
            Err(GrammarError::InvalidPlaceholderCount(-1))
        );
        assert_eq!(g.issued(), 0);
        assert_eq!(g.try_placeholder(2), Ok("$1, $2".to_string()));
    }

    #[test]
    fn override_is_shared_between_clones() {
        let mut a = GrammarOverride::default();
        assert!(!a.is_set());
        a.set(Box::new(PostgresGrammar::new()));
        let b = a.clone();

        let fallback = || -> Box<dyn Grammar> { Box::new(MySqlGrammar) };
        assert_eq!(a.with(fallback, |g| g.placeholder(1)), "$1");
        assert_eq!(b.with(fallback, |g| g.placeholder(1)), "$2");

        a.clear();
        assert_eq!(a.with(fallback, |g| g.placeholder(1)), "?");
    }
}
