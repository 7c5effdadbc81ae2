//! Fragment: the capability shared by every composable piece of SQL, and the
//! argument type accepted by templates.

use crate::grammar::{Grammar, GrammarError, GrammarOverride};
use crate::registry::{GrammarRegistry, default_grammar, grammar};
use crate::value::Value;
use dyn_clone::DynClone;
use std::fmt;

/// Fragment: renders against a grammar and exposes its flattened parameters (nestable).
///
/// `render_with` threads one grammar through the whole tree, so a numbered
/// placeholder counter advances across nested fragments. `parameters` does not
/// depend on any grammar and returns the same sequence however often, and
/// against whichever grammar, the fragment is rendered.
pub trait Fragment: DynClone + fmt::Debug {
    /// Render against `grammar`, ignoring any override pinned on this fragment.
    fn render_with(&self, grammar: &mut dyn Grammar) -> String;

    /// Append this fragment's parameters in placeholder order.
    fn extend_parameters(&self, out: &mut Vec<Value>);

    fn grammar_override(&self) -> &GrammarOverride;

    fn grammar_override_mut(&mut self) -> &mut GrammarOverride;

    fn parameters(&self) -> Vec<Value> {
        let mut out = Vec::new();
        self.extend_parameters(&mut out);
        out
    }

    /// Render standalone: the pinned grammar if one was set, otherwise a fresh
    /// instance of the process-wide default.
    fn render(&self) -> String {
        self.grammar_override()
            .with(default_grammar, |g| self.render_with(g))
    }

    /// Like [`Fragment::render`], resolving the default from `registry`.
    fn render_in(&self, registry: &GrammarRegistry) -> String {
        self.grammar_override()
            .with(|| registry.default_grammar(), |g| self.render_with(g))
    }

    /// Render standalone and collect parameters.
    fn build(&self) -> (String, Vec<Value>) {
        (self.render(), self.parameters())
    }

    fn build_in(&self, registry: &GrammarRegistry) -> (String, Vec<Value>) {
        (self.render_in(registry), self.parameters())
    }

    /// Pin `grammar` for standalone renders (sticky).
    fn set_grammar(&mut self, grammar: Box<dyn Grammar>) {
        self.grammar_override_mut().set(grammar);
    }

    fn with_grammar(mut self, grammar: impl Grammar + 'static) -> Self
    where
        Self: Sized,
    {
        self.set_grammar(Box::new(grammar));
        self
    }

    /// Pin a grammar looked up by name in the process-wide registry.
    fn with_grammar_named(mut self, name: &str) -> Result<Self, GrammarError>
    where
        Self: Sized,
    {
        self.set_grammar(grammar(name)?);
        Ok(self)
    }
}

dyn_clone::clone_trait_object!(Fragment);

impl Fragment for Box<dyn Fragment> {
    fn render_with(&self, grammar: &mut dyn Grammar) -> String {
        (**self).render_with(grammar)
    }

    fn extend_parameters(&self, out: &mut Vec<Value>) {
        (**self).extend_parameters(out)
    }

    fn grammar_override(&self) -> &GrammarOverride {
        (**self).grammar_override()
    }

    fn grammar_override_mut(&mut self) -> &mut GrammarOverride {
        (**self).grammar_override_mut()
    }
}

/// Template argument: a scalar or a nested fragment.
#[derive(Clone)]
pub enum Arg {
    Value(Value),
    Fragment(Box<dyn Fragment>),
}

impl Arg {
    /// Box any fragment as an argument.
    pub fn fragment(f: impl Fragment + 'static) -> Self {
        Self::Fragment(Box::new(f))
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Fragment(b) => f.debug_tuple("Fragment").field(b).finish(),
        }
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<Box<dyn Fragment>> for Arg {
    fn from(v: Box<dyn Fragment>) -> Self {
        Self::Fragment(v)
    }
}

macro_rules! arg_from_value {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Self::Value(Value::from(v))
            }
        })+
    };
}

arg_from_value!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char, String, Vec<u8>,
    Vec<char>, time::OffsetDateTime,
);

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Self::Value(Value::from(v))
    }
}

impl From<&String> for Arg {
    fn from(v: &String) -> Self {
        Self::Value(Value::from(v))
    }
}

impl From<&[u8]> for Arg {
    fn from(v: &[u8]) -> Self {
        Self::Value(Value::from(v))
    }
}

impl<T> From<Option<T>> for Arg
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        Self::Value(Value::from(v))
    }
}

/// Implement `From<$t> for Arg` for fragment types.
macro_rules! arg_from_fragment {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for $crate::fragment::Arg {
            fn from(v: $t) -> Self {
                Self::Fragment(Box::new(v))
            }
        })+
    };
}

pub(crate) use arg_from_fragment;
