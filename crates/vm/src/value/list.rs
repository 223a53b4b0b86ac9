//! List value implementation.
//!
//! A list is a shared, mutable, ordered sequence of values. All clones of a
//! list value observe the same storage; mutations are visible to every
//! holder. Search operations compare primitives by value and reference types
//! by identity.

use std::cell::RefCell;
use std::rc::Rc;

use super::Value;

/// A shared mutable list of values.
#[derive(Clone)]
pub struct ListValue {
    inner: Rc<RefCell<Vec<Value>>>,
}

impl ListValue {
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Creates a list holding the provided values.
    pub fn with_values(values: Vec<Value>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(values)),
        }
    }

    /// Returns `true` when `other` is the same underlying list.
    pub fn ptr_eq(&self, other: &ListValue) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns an identity token for this list, stable for its lifetime.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Returns the element at `index`, or NULL when out of range.
    pub fn get(&self, index: i64) -> Value {
        if index < 0 {
            return Value::null();
        }
        self.inner
            .borrow()
            .get(index as usize)
            .cloned()
            .unwrap_or_else(Value::null)
    }

    /// Replaces the element at `index`. Returns `false` when out of range.
    pub fn set(&self, index: i64, value: Value) -> bool {
        if index < 0 {
            return false;
        }
        let mut items = self.inner.borrow_mut();
        match items.get_mut(index as usize) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Appends a value to the end of the list.
    pub fn append(&self, value: Value) {
        self.inner.borrow_mut().push(value);
    }

    /// Inserts a value at `index`, shifting later elements. An index at or
    /// past the end appends.
    pub fn insert_at(&self, index: i64, value: Value) {
        let mut items = self.inner.borrow_mut();
        let index = if index < 0 { 0 } else { index as usize };
        if index >= items.len() {
            items.push(value);
        } else {
            items.insert(index, value);
        }
    }

    /// Removes the first element equal to `value`. Returns `true` when an
    /// element was removed.
    pub fn remove_value(&self, value: &Value) -> bool {
        let position = self.index_of(value);
        match position {
            Some(i) => {
                self.inner.borrow_mut().remove(i);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the element at `index`, or NULL when out of range.
    pub fn remove_at(&self, index: i64) -> Value {
        if index < 0 {
            return Value::null();
        }
        let mut items = self.inner.borrow_mut();
        if (index as usize) < items.len() {
            items.remove(index as usize)
        } else {
            Value::null()
        }
    }

    /// Returns the index of the first element equal to `value`.
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.inner
            .borrow()
            .iter()
            .position(|item| item.loose_equals(value))
    }

    /// Returns the index of the last element equal to `value`.
    pub fn last_index_of(&self, value: &Value) -> Option<usize> {
        self.inner
            .borrow()
            .iter()
            .rposition(|item| item.loose_equals(value))
    }

    /// Returns `true` when the list contains an element equal to `value`.
    pub fn contains(&self, value: &Value) -> bool {
        self.index_of(value).is_some()
    }

    /// Sorts the list in place using natural value ordering.
    ///
    /// The storage is taken out of the cell for the duration of the sort so
    /// a comparator touching another handle to this list cannot re-enter it.
    pub fn sort(&self) {
        let mut items = std::mem::take(&mut *self.inner.borrow_mut());
        items.sort_by(|a, b| a.sort_cmp(b));
        *self.inner.borrow_mut() = items;
    }

    /// Adds a value to the list treated as a sorted discrete set.
    ///
    /// Returns `false` (and leaves the list untouched) when an equal value is
    /// already present. The list must already be sorted.
    pub fn set_add(&self, value: Value) -> bool {
        match self.binary_search(&value) {
            Ok(_) => false,
            Err(insert_at) => {
                self.inner.borrow_mut().insert(insert_at, value);
                true
            }
        }
    }

    /// Removes a value from the list treated as a sorted discrete set.
    pub fn set_remove(&self, value: &Value) -> bool {
        match self.binary_search(value) {
            Ok(i) => {
                self.inner.borrow_mut().remove(i);
                true
            }
            Err(_) => false,
        }
    }

    /// Membership test against the list treated as a sorted discrete set.
    pub fn set_contains(&self, value: &Value) -> bool {
        self.binary_search(value).is_ok()
    }

    /// Binary-searches the sorted list for `value`, returning the index of a
    /// match or the insertion point.
    pub fn set_search(&self, value: &Value) -> Option<usize> {
        self.binary_search(value).ok()
    }

    fn binary_search(&self, value: &Value) -> Result<usize, usize> {
        let items = self.inner.borrow();
        items.binary_search_by(|probe| probe.sort_cmp(value))
    }

    /// Returns a snapshot of the current contents.
    pub fn to_vec(&self) -> Vec<Value> {
        self.inner.borrow().clone()
    }

    /// Applies `f` to each element in order.
    pub fn for_each<F: FnMut(&Value)>(&self, mut f: F) {
        for item in self.inner.borrow().iter() {
            f(item);
        }
    }
}

impl Default for ListValue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ListValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ListValue(len={}, id={:#x})", self.len(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_get_set() {
        let list = ListValue::new();
        list.append(Value::from(1i64));
        list.append(Value::from(2i64));

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).as_integer(), 2);
        assert!(list.get(5).is_null());
        assert!(list.get(-1).is_null());

        assert!(list.set(0, Value::from(9i64)));
        assert_eq!(list.get(0).as_integer(), 9);
        assert!(!list.set(7, Value::from(0i64)));
    }

    #[test]
    fn test_shared_reference_semantics() {
        let list = ListValue::new();
        let alias = list.clone();
        list.append(Value::from("x"));

        assert_eq!(alias.len(), 1);
        assert!(list.ptr_eq(&alias));
        assert!(!list.ptr_eq(&ListValue::new()));
    }

    #[test]
    fn test_search_and_remove() {
        let list = ListValue::with_values(vec![
            Value::from(3i64),
            Value::from("b"),
            Value::from(3i64),
        ]);

        assert_eq!(list.index_of(&Value::from(3i64)), Some(0));
        assert_eq!(list.last_index_of(&Value::from(3i64)), Some(2));
        assert!(list.contains(&Value::from("b")));
        assert!(list.remove_value(&Value::from(3i64)));
        assert_eq!(list.len(), 2);
        assert_eq!(list.index_of(&Value::from(3i64)), Some(1));

        let removed = list.remove_at(0);
        assert_eq!(removed.as_string(), "b");
        assert!(list.remove_at(10).is_null());
    }

    #[test]
    fn test_reference_membership_for_lists() {
        let child = ListValue::new();
        let parent = ListValue::new();
        parent.append(Value::List(child.clone()));

        // Same reference is found, an equal-but-distinct list is not.
        assert!(parent.contains(&Value::List(child)));
        assert!(!parent.contains(&Value::List(ListValue::new())));
    }

    #[test]
    fn test_sort_orders_naturally() {
        let list = ListValue::with_values(vec![
            Value::from(5i64),
            Value::from(1.5f64),
            Value::from(3i64),
        ]);
        list.sort();

        assert_eq!(list.get(0).as_double(), 1.5);
        assert_eq!(list.get(1).as_integer(), 3);
        assert_eq!(list.get(2).as_integer(), 5);
    }

    #[test]
    fn test_set_operations_keep_sorted() {
        let list = ListValue::new();
        assert!(list.set_add(Value::from(4i64)));
        assert!(list.set_add(Value::from(1i64)));
        assert!(list.set_add(Value::from(9i64)));
        assert!(!list.set_add(Value::from(4i64)));

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0).as_integer(), 1);
        assert_eq!(list.get(1).as_integer(), 4);
        assert_eq!(list.get(2).as_integer(), 9);

        assert!(list.set_contains(&Value::from(9i64)));
        assert_eq!(list.set_search(&Value::from(4i64)), Some(1));
        assert!(list.set_remove(&Value::from(4i64)));
        assert!(!list.set_remove(&Value::from(4i64)));
        assert_eq!(list.len(), 2);
    }
}
