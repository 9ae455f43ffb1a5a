//! Array capability traits
//!
//! Dense arrays, sparse arrays and sparse windows are flat structs sharing a
//! few narrow capabilities rather than a class hierarchy:
//!
//! - [`NdArray`]: shape, coordinate reads and bulk reads
//! - [`NdArrayMut`]: coordinate writes and bulk writes
//! - [`Sliceable`]: views through index expressions, element sequences
//!
//! Bulk reads and writes exchange values in row-major order of the array's
//! own coordinates, whatever the layout of the underlying storage.
//!
//! # Examples
//!
//! ```
//! use ndspace_core::index::at;
//! use ndspace_core::{DenseArray, NdArray, Shape, Sliceable};
//!
//! let array = DenseArray::from_vec(vec![1, 2, 3, 4, 5, 6], Shape::new(&[2, 3]).unwrap()).unwrap();
//! let row = array.slice(&[at(1)]).unwrap();
//! assert_eq!(row.shape().dims(), &[3]);
//! assert_eq!(row.get(&[2]).unwrap(), 6);
//!
//! let rows: Vec<_> = array.elements(0).unwrap().collect();
//! assert_eq!(rows.len(), 2);
//! ```

use crate::dense::DenseArray;
use crate::error::{NdError, NdResult};
use crate::index::Index;
use crate::iter::PositionIter;
use crate::space::DimensionalSpace;
use crate::types::{Element, Rank, Shape};
use smallvec::SmallVec;
use std::marker::PhantomData;

/// Read access to an N-dimensional array.
pub trait NdArray<T: Element> {
    /// Addressing metadata of the array.
    fn space(&self) -> &DimensionalSpace;

    /// Get the shape of the array
    fn shape(&self) -> Shape {
        self.space().shape()
    }

    /// Get the number of dimensions
    fn rank(&self) -> Rank {
        self.space().rank()
    }

    /// Get the number of addressable elements
    fn size(&self) -> usize {
        self.space().size()
    }

    /// Value at a full coordinate tuple.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a tuple of the wrong length, `IndexOutOfRange`
    /// for a component outside its dimension.
    fn get(&self, coords: &[usize]) -> NdResult<T>;

    /// Copy every value, in row-major order, into the first `size()` slots
    /// of `dst`.
    fn read(&self, dst: &mut [T]) -> NdResult<()>;

    /// Values in row-major order.
    fn to_vec(&self) -> NdResult<Vec<T>> {
        let mut values = vec![T::zero(); self.size()];
        self.read(&mut values)?;
        Ok(values)
    }

    /// Copy into a freshly allocated dense array.
    fn to_dense(&self) -> NdResult<DenseArray<T>> {
        DenseArray::from_vec(self.to_vec()?, self.shape())
    }

    /// Copy into `dst`, which must have the same shape.
    fn copy_to(&self, dst: &mut DenseArray<T>) -> NdResult<()> {
        check_same_shape(&self.shape(), &dst.shape())?;
        dst.write(&self.to_vec()?)
    }
}

/// Write access to an N-dimensional array.
pub trait NdArrayMut<T: Element>: NdArray<T> {
    /// Overwrite the value at a full coordinate tuple.
    fn set(&mut self, coords: &[usize], value: T) -> NdResult<()>;

    /// Overwrite every value from `src`, in row-major order.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `src` holds fewer than `size()` values.
    fn write(&mut self, src: &[T]) -> NdResult<()>;

    /// Overwrite every value with the values of `src`, which must have the
    /// same shape.
    fn copy_from<A>(&mut self, src: &A) -> NdResult<()>
    where
        A: NdArray<T> + ?Sized,
        Self: Sized,
    {
        check_same_shape(&self.shape(), &src.shape())?;
        self.write(&src.to_vec()?)
    }
}

/// Arrays that can be viewed through index expressions.
pub trait Sliceable<T: Element>: NdArray<T> {
    /// View type produced by [`slice`](Self::slice).
    type View<'a>: NdArray<T>
    where
        Self: 'a;

    /// View of the region selected by `indices`, one expression per leading
    /// dimension.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when an expression does not fit its dimension or
    /// there are more expressions than dimensions.
    fn slice(&self, indices: &[Index]) -> NdResult<Self::View<'_>>;

    /// Sub-arrays obtained by fixing dimensions `0..=dim`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `dim` is not a dimension of the array.
    fn elements(&self, dim: usize) -> NdResult<Elements<'_, T, Self>>
    where
        Self: Sized,
    {
        if dim >= self.rank() {
            return Err(NdError::invalid_argument(format!(
                "dimension {} does not exist in an array of rank {}",
                dim,
                self.rank()
            )));
        }
        Elements::new(self, dim + 1)
    }

    /// Rank-0 views on every scalar, in row-major order.
    fn scalars(&self) -> NdResult<Elements<'_, T, Self>>
    where
        Self: Sized,
    {
        Elements::new(self, self.rank())
    }
}

pub(crate) fn check_same_shape(expected: &Shape, got: &Shape) -> NdResult<()> {
    if expected != got {
        return Err(NdError::invalid_argument(format!(
            "shape {} does not match {}",
            got, expected
        )));
    }
    Ok(())
}

pub(crate) fn check_buffer_len(needed: usize, got: usize) -> NdResult<()> {
    if got < needed {
        return Err(NdError::invalid_argument(format!(
            "buffer of {} values cannot hold {} values",
            got, needed
        )));
    }
    Ok(())
}

/// Lazy, restartable sequence of the sub-arrays of a [`Sliceable`] array.
///
/// Each item fixes the leading `depth` dimensions to one coordinate tuple,
/// visited in row-major order.
pub struct Elements<'a, T: Element, A: Sliceable<T>> {
    array: &'a A,
    positions: PositionIter<'a>,
    _marker: PhantomData<T>,
}

impl<'a, T: Element, A: Sliceable<T>> Elements<'a, T, A> {
    fn new(array: &'a A, depth: usize) -> NdResult<Self> {
        let space = array.space();
        Ok(Self {
            array,
            positions: PositionIter::new(space, space.rank() - depth)?,
            _marker: PhantomData,
        })
    }

    /// Rewind to the first element.
    pub fn restart(&mut self) {
        self.positions.restart();
    }

    /// Coordinates of the next element.
    pub fn coords(&self) -> &[usize] {
        self.positions.coords()
    }
}

impl<'a, T, A> Iterator for Elements<'a, T, A>
where
    T: Element,
    A: Sliceable<T> + 'a,
{
    type Item = A::View<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let indices: SmallVec<[Index; 6]> = self
            .positions
            .coords()
            .iter()
            .map(|&i| Index::At(i))
            .collect();
        self.positions.next()?;
        let view = self.array.slice(&indices);
        debug_assert!(
            view.is_ok(),
            "element {:?} of the space failed to slice: {:?}",
            indices,
            view.as_ref().err()
        );
        view.ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}
