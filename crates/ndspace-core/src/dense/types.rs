//! Dense array type definition and construction
//!
//! This module defines the `DenseArray<T>` type and its constructors. Element
//! access, slicing and bulk copies live in `indexing`, the sequential write
//! protocols in `hydration`.

use crate::buffer::DataBuffer;
use crate::error::{NdError, NdResult};
use crate::space::DimensionalSpace;
use crate::types::{Element, Shape};
use std::rc::Rc;

/// Dense N-dimensional array over shared flat storage
///
/// A dense array pairs a [`DataBuffer`] with the [`DimensionalSpace`]
/// addressing it. Slices and clones share both the buffer and, when
/// unchanged, the space: a write through one alias is visible through every
/// other alias of the same storage.
///
/// # Type Parameters
///
/// * `T` - The element type, any [`Element`]
///
/// # Examples
///
/// ```
/// use ndspace_core::{DenseArray, NdArray, NdArrayMut, Shape};
///
/// let mut array = DenseArray::<f64>::zeros(Shape::new(&[2, 3]).unwrap());
/// let alias = array.clone();
/// array.set(&[1, 2], 4.5).unwrap();
/// assert_eq!(alias.get(&[1, 2]).unwrap(), 4.5);
/// ```
#[derive(Clone)]
pub struct DenseArray<T> {
    pub(crate) buffer: DataBuffer<T>,
    pub(crate) space: Rc<DimensionalSpace>,
}

impl<T: Element> DenseArray<T> {
    /// Create a zero-filled array
    pub fn zeros(shape: Shape) -> Self {
        Self::from_elem(shape, T::zero())
    }

    /// Create an array with every element set to `value`
    pub fn from_elem(shape: Shape, value: T) -> Self {
        Self {
            buffer: DataBuffer::filled(shape.size(), value),
            space: Rc::new(DimensionalSpace::create(&shape)),
        }
    }

    /// Create a rank-0 array holding `value`
    pub fn scalar(value: T) -> Self {
        Self::from_elem(Shape::scalar(), value)
    }

    /// Create an array from values in row-major order
    ///
    /// # Arguments
    ///
    /// * `data` - Flattened values in row-major order
    /// * `shape` - Target shape
    ///
    /// # Returns
    ///
    /// The array, or `InvalidArgument` if `data.len()` differs from the size
    /// of `shape`
    ///
    /// # Examples
    ///
    /// ```
    /// use ndspace_core::{DenseArray, NdArray, Shape};
    ///
    /// let array = DenseArray::from_vec(vec![1, 2, 3, 4, 5, 6], Shape::new(&[2, 3]).unwrap()).unwrap();
    /// assert_eq!(array.get(&[1, 0]).unwrap(), 4);
    /// assert!(DenseArray::from_vec(vec![1, 2], Shape::new(&[3]).unwrap()).is_err());
    /// ```
    pub fn from_vec(data: Vec<T>, shape: Shape) -> NdResult<Self> {
        if data.len() != shape.size() {
            return Err(NdError::invalid_argument(format!(
                "shape {} requires {} elements, but got {}",
                shape,
                shape.size(),
                data.len()
            )));
        }
        Ok(Self {
            buffer: DataBuffer::from_vec(data),
            space: Rc::new(DimensionalSpace::create(&shape)),
        })
    }

    /// Wrap existing storage, laid out row-major from its first element
    ///
    /// The array aliases `buffer`; use [`DataBuffer::offset`] to place it
    /// further into a larger storage.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the buffer holds fewer elements than `shape`.
    pub fn from_buffer(buffer: DataBuffer<T>, shape: Shape) -> NdResult<Self> {
        if buffer.size() < shape.size() {
            return Err(NdError::invalid_argument(format!(
                "buffer of {} elements is too small for shape {}",
                buffer.size(),
                shape
            )));
        }
        Ok(Self {
            buffer,
            space: Rc::new(DimensionalSpace::create(&shape)),
        })
    }

    /// Backing storage of the array
    pub fn buffer(&self) -> &DataBuffer<T> {
        &self.buffer
    }

    /// Whether both arrays alias the same storage
    pub fn shares_storage(&self, other: &Self) -> bool {
        self.buffer.shares_storage(&other.buffer)
    }

    pub(crate) fn with_space(&self, space: DimensionalSpace) -> Self {
        Self {
            buffer: self.buffer.clone(),
            space: Rc::new(space),
        }
    }
}
