//! Value: scalar arguments bound to placeholders or spliced inline via `%s`.

use dyn_clone::DynClone;
use std::fmt;

/// A value that renders itself (the `%s` path uses its `Display` output).
///
/// Implemented for every `Display + Debug + Clone` type; wrap one with [`Value::display`].
pub trait DisplayValue: DynClone + fmt::Display + fmt::Debug {}

impl<T> DisplayValue for T where T: fmt::Display + fmt::Debug + Clone + 'static {}

dyn_clone::clone_trait_object!(DisplayValue);

/// Scalar value carried by fragments and templates.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Chars(Vec<char>),
    Timestamp(time::OffsetDateTime),
    Display(Box<dyn DisplayValue>),
}

impl Value {
    /// Wrap a self-rendering value.
    pub fn display(v: impl DisplayValue + 'static) -> Self {
        Self::Display(Box::new(v))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Textual form used for inline (`%s`) substitution.
    ///
    /// Integers are base 10 without grouping, floats are fixed-point with six
    /// fractional digits, byte strings are decoded lossily and `Null` is empty.
    pub fn stringify(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::UInt(n) => n.to_string(),
            Self::Float(f) => format!("{f:.6}"),
            Self::Text(s) => s.clone(),
            Self::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            Self::Chars(c) => c.iter().collect(),
            Self::Timestamp(t) => t.to_string(),
            Self::Display(d) => d.to_string(),
        }
    }
}

/// Free-function form of [`Value::stringify`].
pub fn stringify(value: &Value) -> String {
    value.stringify()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Chars(a), Self::Chars(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            // Self-rendering values have no comparable identity.
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($t:ty),+ $(,)?) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::$variant(<$target>::from(v))
            }
        })+
    };
}

value_from!(Int as i64: i8, i16, i32, i64);
value_from!(UInt as u64: u8, u16, u32, u64);
value_from!(Float as f64: f32, f64);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::UInt(v as u64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<Vec<char>> for Value {
    fn from(v: Vec<char>) -> Self {
        Self::Chars(v)
    }
}

impl From<time::OffsetDateTime> for Value {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(x) => x.into(),
            None => Self::Null,
        }
    }
}

/// Flatten a collection into an ordered value list (used by list-taking appends).
pub trait IntoValues {
    fn into_values(self, out: &mut Vec<Value>);

    fn collect_values(self) -> Vec<Value>
    where
        Self: Sized,
    {
        let mut out = Vec::new();
        self.into_values(&mut out);
        out
    }
}

impl IntoValues for () {
    fn into_values(self, _out: &mut Vec<Value>) {}
}

impl<T: Into<Value>> IntoValues for Vec<T> {
    fn into_values(self, out: &mut Vec<Value>) {
        out.extend(self.into_iter().map(Into::into));
    }
}

impl<T: Into<Value>, const N: usize> IntoValues for [T; N] {
    fn into_values(self, out: &mut Vec<Value>) {
        out.extend(self.into_iter().map(Into::into));
    }
}

impl<T: Into<Value> + Clone> IntoValues for &[T] {
    fn into_values(self, out: &mut Vec<Value>) {
        out.extend(self.iter().cloned().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone)]
    struct Money(i64);

    impl fmt::Display for Money {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}.{:02} EUR", self.0 / 100, self.0 % 100)
        }
    }

    #[test]
    fn stringify_text_passes_through() {
        assert_eq!(Value::from("users").stringify(), "users");
        assert_eq!(Value::from(String::from("a b")).stringify(), "a b");
    }

    #[test]
    fn stringify_integers_any_width() {
        assert_eq!(Value::from(-8_i8).stringify(), "-8");
        assert_eq!(Value::from(i64::MIN).stringify(), "-9223372036854775808");
        assert_eq!(Value::from(u64::MAX).stringify(), "18446744073709551615");
        assert_eq!(Value::from(1_000_000_u32).stringify(), "1000000");
        assert_eq!(Value::from(7_usize).stringify(), "7");
    }

    #[test]
    fn stringify_floats_fixed_six() {
        assert_eq!(Value::from(1.5_f64).stringify(), "1.500000");
        assert_eq!(Value::from(0.1_f32).stringify(), "0.100000");
        assert_eq!(Value::from(-2.0_f64).stringify(), "-2.000000");
    }

    #[test]
    fn stringify_sequences_and_null() {
        assert_eq!(Value::from(b"abc".to_vec()).stringify(), "abc");
        assert_eq!(Value::from(vec!['h', 'i']).stringify(), "hi");
        assert_eq!(Value::Null.stringify(), "");
        assert_eq!(Value::from(None::<i32>).stringify(), "");
        assert_eq!(stringify(&Value::from(true)), "true");
    }

    #[test]
    fn stringify_self_rendering() {
        assert_eq!(Value::display(Money(1234)).stringify(), "12.34 EUR");
    }

    #[test]
    fn display_values_never_compare_equal() {
        assert!(Value::display(Money(1)) != Value::display(Money(1)));
        assert_eq!(Value::from(3_u8), Value::UInt(3));
    }

    #[test]
    fn into_values_flattens_collections() {
        assert_eq!(
            [1_i32, 2].collect_values(),
            vec![Value::Int(1), Value::Int(2)]
        );
        assert_eq!(().collect_values(), Vec::<Value>::new());
        let names: &[&str] = &["a", "b"];
        assert_eq!(names.collect_values().len(), 2);
    }
}
