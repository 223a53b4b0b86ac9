//! Runtime value model for the RookScript VM.
//!
//! Every value a script can touch is a [`Value`]: a tagged union over null,
//! booleans, 64-bit integers and floats, immutable strings, shared mutable
//! lists, maps and buffers, script-visible errors, and opaque host object
//! handles. Lists, maps, buffers and object handles are reference types:
//! cloning a `Value` clones the reference, not the contents.

mod buffer;
mod error_value;
mod list;
mod map;
mod object_ref;
#[allow(clippy::module_inception)]
mod value;

pub use buffer::{BufferValue, ByteOrder};
pub use error_value::ErrorValue;
pub use list::ListValue;
pub use map::MapValue;
pub use object_ref::ObjectRef;
pub use value::{FromValue, Value, ValueType};
