//! Map value implementation.
//!
//! A map is a shared, mutable, insertion-ordered mapping from names to
//! values. Key lookup is case-insensitive; the original spelling of each key
//! is preserved for enumeration.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use super::Value;

struct MapEntry {
    key: Rc<str>,
    value: Value,
}

struct MapInner {
    entries: Vec<MapEntry>,
    // lower-cased key -> position in `entries`
    index: HashMap<String, usize>,
}

/// A shared mutable name-to-value mapping.
#[derive(Clone)]
pub struct MapValue {
    inner: Rc<RefCell<MapInner>>,
}

impl MapValue {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(MapInner {
                entries: Vec::new(),
                index: HashMap::new(),
            })),
        }
    }

    /// Returns `true` when `other` is the same underlying map.
    pub fn ptr_eq(&self, other: &MapValue) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns an identity token for this map, stable for its lifetime.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Returns `true` when the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Returns the value mapped to `key`, or NULL when absent.
    pub fn get(&self, key: &str) -> Value {
        let inner = self.inner.borrow();
        match inner.index.get(&key.to_lowercase()) {
            Some(&at) => inner.entries[at].value.clone(),
            None => Value::null(),
        }
    }

    /// Maps `key` to `value`, replacing any previous mapping.
    ///
    /// A replaced entry keeps its position and original key spelling; a new
    /// entry is appended.
    pub fn set(&self, key: &str, value: Value) {
        let mut inner = self.inner.borrow_mut();
        let lower = key.to_lowercase();
        match inner.index.get(&lower) {
            Some(&at) => inner.entries[at].value = value,
            None => {
                let at = inner.entries.len();
                inner.entries.push(MapEntry {
                    key: Rc::from(key),
                    value,
                });
                inner.index.insert(lower, at);
            }
        }
    }

    /// Returns `true` when the map contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().index.contains_key(&key.to_lowercase())
    }

    /// Removes the mapping for `key`. Returns `true` when an entry was
    /// removed.
    pub fn remove(&self, key: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        let lower = key.to_lowercase();
        match inner.index.remove(&lower) {
            Some(at) => {
                inner.entries.remove(at);
                for position in inner.index.values_mut() {
                    if *position > at {
                        *position -= 1;
                    }
                }
                true
            }
            None => false,
        }
    }

    /// Returns the keys in insertion order, in their original spelling.
    pub fn keys(&self) -> Vec<Rc<str>> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|entry| Rc::clone(&entry.key))
            .collect()
    }

    /// Applies `f` to each entry in insertion order.
    pub fn for_each<F: FnMut(&str, &Value)>(&self, mut f: F) {
        for entry in self.inner.borrow().entries.iter() {
            f(&entry.key, &entry.value);
        }
    }
}

impl Default for MapValue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MapValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MapValue(len={}, id={:#x})", self.len(), self.id())
    }
}
