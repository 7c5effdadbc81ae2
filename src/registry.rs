//! Grammar registry: name -> factory lookup and the default grammar selection.
//!
//! [`GrammarRegistry`] is a plain value that can be threaded through rendering
//! (`Fragment::render_in`). The free functions operate on a process-wide
//! instance that backs `Fragment::render`.

use crate::grammar::{
    Grammar, GrammarError, MYSQL, MySqlGrammar, POSTGRES, PostgresGrammar, SQLITE, SqliteGrammar,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// Factory producing a fresh grammar instance per render.
pub type GrammarFactory = Arc<dyn Fn() -> Box<dyn Grammar> + Send + Sync + 'static>;

#[derive(Clone)]
struct Selected {
    name: String,
    factory: GrammarFactory,
}

/// Registered grammars plus the selected default.
///
/// Registration under an existing name overwrites it. The default keeps the
/// factory captured when it was selected, so re-registering that name later
/// does not change the default until it is selected again.
#[derive(Clone)]
pub struct GrammarRegistry {
    factories: HashMap<String, GrammarFactory>,
    default: Selected,
}

impl GrammarRegistry {
    /// Registry with the built-in grammars; the default is `postgres`.
    pub fn new() -> Self {
        let postgres: GrammarFactory =
            Arc::new(|| -> Box<dyn Grammar> { Box::new(PostgresGrammar::new()) });
        let mut registry = Self {
            factories: HashMap::new(),
            default: Selected {
                name: POSTGRES.to_string(),
                factory: postgres.clone(),
            },
        };
        registry.factories.insert(POSTGRES.to_string(), postgres);
        registry.register(MYSQL, || Box::new(MySqlGrammar));
        registry.register(SQLITE, || Box::new(SqliteGrammar));
        registry
    }

    /// Register (or overwrite) a grammar factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Grammar> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self
            .factories
            .insert(name.clone(), Arc::new(factory))
            .is_some();
        tracing::debug!(grammar = %name, replaced, "registered grammar");
        self
    }

    /// Select the default grammar by name and return the previous default name.
    pub fn set_default(&mut self, name: &str) -> Result<String, GrammarError> {
        let factory = self
            .factories
            .get(name)
            .cloned()
            .ok_or_else(|| GrammarError::UnknownGrammar(name.to_string()))?;
        let old = std::mem::replace(
            &mut self.default,
            Selected {
                name: name.to_string(),
                factory,
            },
        );
        tracing::debug!(grammar = name, previous = %old.name, "default grammar changed");
        Ok(old.name)
    }

    pub fn default_name(&self) -> &str {
        &self.default.name
    }

    /// Fresh instance of the default grammar.
    pub fn default_grammar(&self) -> Box<dyn Grammar> {
        (self.default.factory)()
    }

    /// Fresh instance of a named grammar.
    pub fn grammar(&self, name: &str) -> Result<Box<dyn Grammar>, GrammarError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| GrammarError::UnknownGrammar(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn restore_default(&mut self, selected: Selected) {
        self.default = selected;
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GrammarRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarRegistry")
            .field("names", &self.names())
            .field("default", &self.default.name)
            .finish()
    }
}

static REGISTRY: OnceLock<Mutex<GrammarRegistry>> = OnceLock::new();
static DEFAULT_GRAMMAR_LOCK: Mutex<()> = Mutex::new(());

fn registry() -> MutexGuard<'static, GrammarRegistry> {
    REGISTRY
        .get_or_init(|| Mutex::new(GrammarRegistry::new()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

/// Register a grammar in the process-wide registry.
pub fn register_grammar<F>(name: impl Into<String>, factory: F)
where
    F: Fn() -> Box<dyn Grammar> + Send + Sync + 'static,
{
    registry().register(name, factory);
}

/// Select the process-wide default grammar and return the previous default name.
pub fn set_default_grammar(name: &str) -> Result<String, GrammarError> {
    registry().set_default(name)
}

/// Name of the process-wide default grammar.
pub fn default_grammar_name() -> String {
    registry().default_name().to_string()
}

/// Fresh instance of the process-wide default grammar.
pub fn default_grammar() -> Box<dyn Grammar> {
    // Release the registry lock before calling into a user-provided factory.
    let factory = registry().default.factory.clone();
    factory()
}

/// Fresh instance of a named grammar from the process-wide registry.
pub fn grammar(name: &str) -> Result<Box<dyn Grammar>, GrammarError> {
    let factory = registry()
        .factories
        .get(name)
        .cloned()
        .ok_or_else(|| GrammarError::UnknownGrammar(name.to_string()))?;
    Ok(factory())
}

/// RAII guard for temporarily changing the default grammar (holds a global lock to avoid test interference).
pub struct DefaultGrammarGuard {
    _lock: MutexGuard<'static, ()>,
    old: Selected,
}

impl DefaultGrammarGuard {
    /// Name of the default that is restored when the guard drops.
    pub fn previous(&self) -> &str {
        &self.old.name
    }
}

impl Drop for DefaultGrammarGuard {
    fn drop(&mut self) {
        registry().restore_default(self.old.clone());
    }
}

/// Temporarily select the default grammar for a scope and restore it on drop.
pub fn set_default_grammar_scoped(name: &str) -> Result<DefaultGrammarGuard, GrammarError> {
    let lock = DEFAULT_GRAMMAR_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let mut reg = registry();
    let old = reg.default.clone();
    reg.set_default(name)?;
    Ok(DefaultGrammarGuard { _lock: lock, old })
}
