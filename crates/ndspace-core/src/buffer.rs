//! Flat typed storage shared by dense arrays and their views
//!
//! A [`DataBuffer`] is a reference-counted handle on a contiguous `Vec<T>`
//! plus a `[base, base + len)` range within it. Cloning the handle, or taking
//! a sub-range with [`offset`](DataBuffer::offset) and
//! [`narrow`](DataBuffer::narrow), never copies data: every handle observes
//! the writes of every other handle on the same storage.
//!
//! # Examples
//!
//! ```
//! use ndspace_core::DataBuffer;
//!
//! let buffer = DataBuffer::<i32>::allocate(6);
//! let tail = buffer.offset(4).unwrap();
//! tail.set_at(1, 9).unwrap();
//! assert_eq!(buffer.get_at(5).unwrap(), 9);
//! assert_eq!(tail.size(), 2);
//! ```

use crate::error::{NdError, NdResult};
use crate::types::Element;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle on a linear range of typed storage.
#[derive(Clone)]
pub struct DataBuffer<T> {
    data: Rc<RefCell<Vec<T>>>,
    base: usize,
    len: usize,
}

impl<T: Element> DataBuffer<T> {
    /// Allocate `len` zero-initialized elements.
    pub fn allocate(len: usize) -> Self {
        Self::filled(len, T::zero())
    }

    /// Allocate `len` elements set to `value`.
    pub fn filled(len: usize, value: T) -> Self {
        Self::from_vec(vec![value; len])
    }

    /// Take ownership of existing data.
    pub fn from_vec(data: Vec<T>) -> Self {
        let len = data.len();
        Self {
            data: Rc::new(RefCell::new(data)),
            base: 0,
            len,
        }
    }

    /// Number of elements visible through this handle.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Whether both handles refer to the same underlying storage.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    fn check_range(&self, start: usize, len: usize) -> NdResult<()> {
        match start.checked_add(len) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(NdError::IndexOutOfRange {
                dim: 0,
                index: start.saturating_add(len.saturating_sub(1)),
                size: self.len,
            }),
        }
    }

    /// Element at linear `index`.
    pub fn get_at(&self, index: usize) -> NdResult<T> {
        self.check_range(index, 1)?;
        Ok(self.data.borrow()[self.base + index])
    }

    /// Overwrite the element at linear `index`.
    pub fn set_at(&self, index: usize, value: T) -> NdResult<()> {
        self.check_range(index, 1)?;
        self.data.borrow_mut()[self.base + index] = value;
        Ok(())
    }

    /// Copy `dst.len()` elements starting at `start` into `dst`.
    pub fn read(&self, start: usize, dst: &mut [T]) -> NdResult<()> {
        self.check_range(start, dst.len())?;
        let from = self.base + start;
        dst.copy_from_slice(&self.data.borrow()[from..from + dst.len()]);
        Ok(())
    }

    /// Copy `src` into the storage starting at `start`.
    pub fn write(&self, start: usize, src: &[T]) -> NdResult<()> {
        self.check_range(start, src.len())?;
        let from = self.base + start;
        self.data.borrow_mut()[from..from + src.len()].copy_from_slice(src);
        Ok(())
    }

    /// Set every visible element to `value`.
    pub fn fill(&self, value: T) {
        let from = self.base;
        self.data.borrow_mut()[from..from + self.len].fill(value);
    }

    /// Handle on the elements from `start` to the end of this range.
    pub fn offset(&self, start: usize) -> NdResult<Self> {
        self.check_range(start, 0)?;
        Ok(Self {
            data: Rc::clone(&self.data),
            base: self.base + start,
            len: self.len - start,
        })
    }

    /// Handle on the first `len` elements of this range.
    pub fn narrow(&self, len: usize) -> NdResult<Self> {
        self.check_range(0, len)?;
        Ok(Self {
            data: Rc::clone(&self.data),
            base: self.base,
            len,
        })
    }

    /// Copy of the visible elements.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.borrow()[self.base..self.base + self.len].to_vec()
    }
}

impl<T: Element> fmt::Debug for DataBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataBuffer")
            .field("base", &self.base)
            .field("data", &self.to_vec())
            .finish()
    }
}
