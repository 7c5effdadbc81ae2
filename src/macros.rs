//! Macro helpers providing variadic-style ergonomics for templates and value lists.
//! `query!` / `values!` accept heterogeneous arguments without manual `Arg`/`Value` conversion.

/// Build a `Vec<Value>` from heterogeneous scalars.
///
/// ```
/// use sqlcompose::{Value, values};
///
/// let row = values![1, "Marty", 1.5];
/// assert_eq!(row[1], Value::from("Marty"));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Value::from($value)),+]
    };
}

/// Variadic helper for [`build`](crate::build): `query!(template, args...)`.
///
/// ```
/// use sqlcompose::{Fragment, PostgresGrammar, query};
///
/// let q = query!("SELECT id FROM t WHERE name = %p LIMIT %p", "Tom", 10).unwrap();
/// assert_eq!(
///     q.render_with(&mut PostgresGrammar::new()),
///     "SELECT id FROM t WHERE name = $1 LIMIT $2"
/// );
/// ```
#[macro_export]
macro_rules! query {
    ($template:expr $(,)?) => {
        $crate::Template::new($template, Vec::<$crate::Arg>::new())
    };
    ($template:expr, $($arg:expr),+ $(,)?) => {
        $crate::Template::new($template, vec![$($crate::Arg::from($arg)),+])
    };
}
