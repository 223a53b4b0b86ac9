//! Named outer variable scopes.
//!
//! Scopes are orthogonal to activation frames: they persist across calls and
//! carry host-injected state. Each scope maps case-insensitive names to
//! values and flags individual names read-only; writes to read-only names
//! are silently ignored, reads of missing names yield NULL.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::value::Value;

/// A name-to-value mapping with per-name read-only flags.
pub trait VariableScope {
    /// Returns the value bound to `name`, or `None` when absent.
    fn get(&self, name: &str) -> Option<Value>;

    /// Binds `name` to `value`, creating it when absent. Writes to
    /// read-only names are ignored.
    fn set(&self, name: &str, value: Value);

    /// Returns `true` when `name` is present and flagged read-only.
    fn is_read_only(&self, name: &str) -> bool;
}

/// Resolves scope names to variable scopes. Scope names are
/// case-insensitive.
pub trait ScopeResolver {
    /// Returns the scope registered under `name`, or `None`.
    fn get_scope(&self, name: &str) -> Option<Rc<dyn VariableScope>>;
}

struct ScopeEntry {
    value: Value,
    read_only: bool,
}

/// A map-backed [`VariableScope`].
#[derive(Default)]
pub struct MapScope {
    entries: RefCell<HashMap<String, ScopeEntry>>,
}

impl MapScope {
    /// Creates a new empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value` as a writable variable, replacing any
    /// existing binding and clearing its read-only flag.
    pub fn insert(&self, name: &str, value: Value) {
        self.entries.borrow_mut().insert(
            name.to_lowercase(),
            ScopeEntry {
                value,
                read_only: false,
            },
        );
    }

    /// Binds `name` to `value` and flags it read-only.
    pub fn insert_read_only(&self, name: &str, value: Value) {
        self.entries.borrow_mut().insert(
            name.to_lowercase(),
            ScopeEntry {
                value,
                read_only: true,
            },
        );
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` when the scope has no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl VariableScope for MapScope {
    fn get(&self, name: &str) -> Option<Value> {
        self.entries
            .borrow()
            .get(&name.to_lowercase())
            .map(|entry| entry.value.clone())
    }

    fn set(&self, name: &str, value: Value) {
        let mut entries = self.entries.borrow_mut();
        let key = name.to_lowercase();
        match entries.get_mut(&key) {
            Some(entry) => {
                if !entry.read_only {
                    entry.value = value;
                }
            }
            None => {
                entries.insert(
                    key,
                    ScopeEntry {
                        value,
                        read_only: false,
                    },
                );
            }
        }
    }

    fn is_read_only(&self, name: &str) -> bool {
        self.entries
            .borrow()
            .get(&name.to_lowercase())
            .map(|entry| entry.read_only)
            .unwrap_or(false)
    }
}

/// A map-backed [`ScopeResolver`].
#[derive(Default)]
pub struct MapScopeResolver {
    scopes: HashMap<String, Rc<dyn VariableScope>>,
}

impl MapScopeResolver {
    /// Creates a new empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `scope` under `name`, replacing any previous registration.
    pub fn insert(&mut self, name: &str, scope: Rc<dyn VariableScope>) -> &mut Self {
        self.scopes.insert(name.to_lowercase(), scope);
        self
    }
}

impl ScopeResolver for MapScopeResolver {
    fn get_scope(&self, name: &str) -> Option<Rc<dyn VariableScope>> {
        self.scopes.get(&name.to_lowercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_access() {
        let scope = MapScope::new();
        scope.insert("Width", Value::from(640i64));

        assert_eq!(scope.get("width").unwrap().as_integer(), 640);
        assert_eq!(scope.get("WIDTH").unwrap().as_integer(), 640);
        assert!(scope.get("height").is_none());
    }

    #[test]
    fn test_read_only_writes_ignored() {
        let scope = MapScope::new();
        scope.insert_read_only("version", Value::from(3i64));
        assert!(scope.is_read_only("VERSION"));

        scope.set("version", Value::from(4i64));
        assert_eq!(scope.get("version").unwrap().as_integer(), 3);

        // Writable names update normally, and set creates missing names.
        scope.insert("count", Value::from(1i64));
        scope.set("count", Value::from(2i64));
        scope.set("fresh", Value::from(9i64));
        assert_eq!(scope.get("count").unwrap().as_integer(), 2);
        assert_eq!(scope.get("fresh").unwrap().as_integer(), 9);
        assert!(!scope.is_read_only("fresh"));
    }

    #[test]
    fn test_resolver_lookup() {
        let scope: Rc<dyn VariableScope> = Rc::new(MapScope::new());
        let mut resolver = MapScopeResolver::new();
        resolver.insert("Script", Rc::clone(&scope));

        assert!(resolver.get_scope("script").is_some());
        assert!(resolver.get_scope("other").is_none());
    }
}
