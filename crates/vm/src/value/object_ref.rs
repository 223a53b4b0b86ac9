//! Opaque host object handles.
//!
//! An object reference wraps an arbitrary host value behind a nominal type
//! name. The VM never interprets the payload; host functions filter by type
//! name or downcast to the concrete type they expect.

use std::any::Any;
use std::rc::Rc;

/// A shared handle to an opaque host object.
#[derive(Clone)]
pub struct ObjectRef {
    type_name: Rc<str>,
    payload: Rc<dyn Any>,
}

impl ObjectRef {
    /// Wraps `payload` under the nominal type `type_name`.
    pub fn new<T: Any>(type_name: &str, payload: T) -> Self {
        Self {
            type_name: Rc::from(type_name),
            payload: Rc::new(payload),
        }
    }

    /// Wraps an already-shared payload under the nominal type `type_name`.
    pub fn from_shared<T: Any>(type_name: &str, payload: Rc<T>) -> Self {
        Self {
            type_name: Rc::from(type_name),
            payload,
        }
    }

    /// Returns the nominal host type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns `true` when the payload is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    /// Returns the payload as a `T` handle, or `None` on a type mismatch.
    pub fn downcast<T: Any>(&self) -> Option<Rc<T>> {
        Rc::clone(&self.payload).downcast::<T>().ok()
    }

    /// Returns `true` when `other` is the same underlying object.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.payload, &other.payload)
    }

    /// Returns an identity token for this handle, stable for its lifetime.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.payload) as *const () as usize
    }
}

impl std::fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectRef({}, id={:#x})", self.type_name, self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast() {
        let object = ObjectRef::new("Counter", 41u32);
        assert_eq!(object.type_name(), "Counter");
        assert!(object.is::<u32>());
        assert!(!object.is::<String>());
        assert_eq!(*object.downcast::<u32>().unwrap(), 41);
        assert!(object.downcast::<String>().is_none());
    }

    #[test]
    fn test_identity() {
        let shared = Rc::new(String::from("handle"));
        let a = ObjectRef::from_shared("Text", Rc::clone(&shared));
        let b = ObjectRef::from_shared("Text", shared);
        let c = ObjectRef::new("Text", String::from("handle"));

        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
