//! Buffer value implementation.
//!
//! A buffer is a shared, mutable byte sequence with a read/write cursor and a
//! configurable byte order. Every scalar accessor comes in an absolute form
//! (`get_*`/`put_*`, addressed by offset) and a cursor-relative form
//! (`read_*`/`write_*`, advancing the cursor).

use std::cell::RefCell;
use std::io::{self, Read};
use std::rc::Rc;

/// Byte order used by buffer scalar accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

impl ByteOrder {
    /// Returns the byte order of the host platform.
    pub fn native() -> Self {
        #[cfg(target_endian = "big")]
        {
            ByteOrder::Big
        }
        #[cfg(target_endian = "little")]
        {
            ByteOrder::Little
        }
    }
}

struct BufferInner {
    data: Vec<u8>,
    position: usize,
    order: ByteOrder,
}

/// A shared mutable byte buffer with a cursor.
#[derive(Clone)]
pub struct BufferValue {
    inner: Rc<RefCell<BufferInner>>,
}

macro_rules! scalar_accessors {
    ($($ty:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Reads a `" $ty "` at the absolute offset `at`, or `None` when out of range."]
                pub fn [<get_ $ty>](&self, at: usize) -> Option<$ty> {
                    const SIZE: usize = std::mem::size_of::<$ty>();
                    let inner = self.inner.borrow();
                    let end = at.checked_add(SIZE)?;
                    let bytes = inner.data.get(at..end)?;
                    let mut raw = [0u8; SIZE];
                    raw.copy_from_slice(bytes);
                    Some(match inner.order {
                        ByteOrder::Big => <$ty>::from_be_bytes(raw),
                        ByteOrder::Little => <$ty>::from_le_bytes(raw),
                    })
                }

                #[doc = "Writes a `" $ty "` at the absolute offset `at`. Returns `false` when out of range."]
                pub fn [<put_ $ty>](&self, at: usize, value: $ty) -> bool {
                    const SIZE: usize = std::mem::size_of::<$ty>();
                    let mut inner = self.inner.borrow_mut();
                    let order = inner.order;
                    let end = match at.checked_add(SIZE) {
                        Some(end) => end,
                        None => return false,
                    };
                    match inner.data.get_mut(at..end) {
                        Some(bytes) => {
                            let raw = match order {
                                ByteOrder::Big => value.to_be_bytes(),
                                ByteOrder::Little => value.to_le_bytes(),
                            };
                            bytes.copy_from_slice(&raw);
                            true
                        }
                        None => false,
                    }
                }

                #[doc = "Reads a `" $ty "` at the cursor and advances it, or `None` when out of range."]
                pub fn [<read_ $ty>](&self) -> Option<$ty> {
                    let at = self.position();
                    let value = self.[<get_ $ty>](at)?;
                    self.set_position(at + std::mem::size_of::<$ty>());
                    Some(value)
                }

                #[doc = "Writes a `" $ty "` at the cursor and advances it. Returns `false` when out of range."]
                pub fn [<write_ $ty>](&self, value: $ty) -> bool {
                    let at = self.position();
                    if self.[<put_ $ty>](at, value) {
                        self.set_position(at + std::mem::size_of::<$ty>());
                        true
                    } else {
                        false
                    }
                }
            )*
        }
    };
}

impl BufferValue {
    /// Creates a zero-filled buffer of `size` bytes using `order`.
    pub fn new(size: usize, order: ByteOrder) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BufferInner {
                data: vec![0; size],
                position: 0,
                order,
            })),
        }
    }

    /// Creates a buffer wrapping the provided bytes, in native order.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BufferInner {
                data,
                position: 0,
                order: ByteOrder::native(),
            })),
        }
    }

    /// Returns `true` when `other` is the same underlying buffer.
    pub fn ptr_eq(&self, other: &BufferValue) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns an identity token for this buffer, stable for its lifetime.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }

    /// Returns the buffer length in bytes.
    pub fn len(&self) -> usize {
        self.inner.borrow().data.len()
    }

    /// Returns `true` when the buffer has zero length.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().data.is_empty()
    }

    /// Resizes the buffer, zero-filling any grown region. The cursor is
    /// clamped to the new length.
    pub fn resize(&self, new_len: usize) {
        let mut inner = self.inner.borrow_mut();
        inner.data.resize(new_len, 0);
        if inner.position > new_len {
            inner.position = new_len;
        }
    }

    /// Returns the cursor position.
    pub fn position(&self) -> usize {
        self.inner.borrow().position
    }

    /// Moves the cursor. Positions past the end are allowed; subsequent
    /// reads and writes there fail.
    pub fn set_position(&self, position: usize) {
        self.inner.borrow_mut().position = position;
    }

    /// Returns the byte order used by scalar accessors.
    pub fn order(&self) -> ByteOrder {
        self.inner.borrow().order
    }

    /// Sets the byte order used by scalar accessors.
    pub fn set_order(&self, order: ByteOrder) {
        self.inner.borrow_mut().order = order;
    }

    scalar_accessors!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

    /// Copies `len` bytes starting at `at`, or `None` when out of range.
    pub fn get_bytes(&self, at: usize, len: usize) -> Option<Vec<u8>> {
        let inner = self.inner.borrow();
        let end = at.checked_add(len)?;
        inner.data.get(at..end).map(<[u8]>::to_vec)
    }

    /// Writes `bytes` starting at `at`. Returns `false` when out of range.
    pub fn put_bytes(&self, at: usize, bytes: &[u8]) -> bool {
        let mut inner = self.inner.borrow_mut();
        let end = match at.checked_add(bytes.len()) {
            Some(end) => end,
            None => return false,
        };
        match inner.data.get_mut(at..end) {
            Some(target) => {
                target.copy_from_slice(bytes);
                true
            }
            None => false,
        }
    }

    /// Reads up to `length` bytes from `source` into the buffer.
    ///
    /// With an explicit `offset` the cursor is untouched; otherwise bytes
    /// land at the cursor and the cursor advances by the amount read. The
    /// read is capped to the space remaining in the buffer. Returns the
    /// number of bytes actually read; zero means end of stream or no room.
    pub fn read_from(
        &self,
        offset: Option<usize>,
        source: &mut dyn Read,
        length: usize,
    ) -> io::Result<usize> {
        let at = offset.unwrap_or_else(|| self.position());
        let mut scratch = {
            let inner = self.inner.borrow();
            let room = inner.data.len().saturating_sub(at);
            vec![0u8; length.min(room)]
        };
        if scratch.is_empty() {
            return Ok(0);
        }

        let count = source.read(&mut scratch)?;
        self.put_bytes(at, &scratch[..count]);
        if offset.is_none() {
            self.set_position(at + count);
        }
        Ok(count)
    }

    /// Returns a snapshot of the buffer contents.
    pub fn to_vec(&self) -> Vec<u8> {
        self.inner.borrow().data.clone()
    }
}

impl std::fmt::Debug for BufferValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BufferValue(len={}, position={}, id={:#x})",
            self.len(),
            self.position(),
            self.id()
        )
    }
}
