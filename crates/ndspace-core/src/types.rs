//! Core type definitions for ndspace arrays.
//!
//! This module defines the fundamental types used throughout the ndspace stack:
//!
//! - Type aliases for array dimensions ([`Axis`], [`Rank`], [`Coords`])
//! - The [`Element`] trait implemented by every storable numeric type
//! - [`Shape`], the validated list of dimension sizes an array is allocated over
//!
//! # Examples
//!
//! ```
//! use ndspace_core::Shape;
//!
//! let shape = Shape::new(&[2, 3, 4]).unwrap();
//! assert_eq!(shape.rank(), 3);
//! assert_eq!(shape.size(), 24);
//!
//! // A scalar has rank 0 and exactly one element
//! assert_eq!(Shape::scalar().size(), 1);
//! ```

use crate::error::{NdError, NdResult};
use scirs2_core::numeric::Num;
use smallvec::SmallVec;
use std::fmt;

/// Type alias for an axis (dimension) index, zero-based.
pub type Axis = usize;

/// Type alias for the number of dimensions of a shape or array.
pub type Rank = usize;

/// Coordinate tuple, stack allocated for up to 6 dimensions.
///
/// Higher-rank coordinates transparently fall back to the heap.
pub type Coords = SmallVec<[usize; 6]>;

/// Numeric element stored by dense and sparse arrays.
///
/// One generic implementation serves every primitive kind; the numeric
/// behaviour (`zero`, `one`, equality) comes from `scirs2_core::numeric::Num`.
///
/// # Examples
///
/// ```
/// use ndspace_core::{DenseArray, Element, NdArray, Shape};
///
/// fn first<T: Element>(array: &DenseArray<T>) -> T {
///     array.get(&[0]).unwrap()
/// }
///
/// let ints = DenseArray::<i32>::from_vec(vec![7, 8], Shape::new(&[2]).unwrap()).unwrap();
/// assert_eq!(first(&ints), 7);
/// ```
pub trait Element: Copy + Num + fmt::Debug + 'static {}

impl<T> Element for T where T: Copy + Num + fmt::Debug + 'static {}

/// Ordered list of non-negative dimension sizes.
///
/// The rank is the number of dimensions and the size is the product of all
/// dimensions: `0` when any dimension is zero, `1` for a scalar (rank 0).
/// Construction guarantees that the product of the non-zero sizes fits in a
/// `usize`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    dims: SmallVec<[usize; 6]>,
}

impl Shape {
    /// Create a shape from dimension sizes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the product of the non-zero sizes
    /// overflows `usize`. Strides are built from that product even when
    /// another dimension is empty.
    pub fn new(dims: &[usize]) -> NdResult<Self> {
        dims.iter()
            .filter(|&&d| d != 0)
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| {
                NdError::invalid_argument(format!("shape {:?} overflows the address space", dims))
            })?;
        Ok(Self {
            dims: dims.iter().copied().collect(),
        })
    }

    /// Create a shape from signed dimension sizes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any size is negative or the total size
    /// overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndspace_core::Shape;
    ///
    /// assert!(Shape::from_signed(&[2, 3]).is_ok());
    /// assert!(Shape::from_signed(&[2, -1]).is_err());
    /// ```
    pub fn from_signed(dims: &[i64]) -> NdResult<Self> {
        let unsigned = dims
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                usize::try_from(d).map_err(|_| {
                    NdError::invalid_argument(format!(
                        "dimension {} has invalid size {}",
                        i, d
                    ))
                })
            })
            .collect::<NdResult<Vec<_>>>()?;
        Self::new(&unsigned)
    }

    /// Wrap sizes already known to multiply without overflow, such as the
    /// sizes of a space derived from a validated shape.
    pub(crate) fn from_valid(dims: &[usize]) -> Self {
        Self {
            dims: dims.iter().copied().collect(),
        }
    }

    /// The shape of a rank-0 (scalar) array.
    pub fn scalar() -> Self {
        Self::default()
    }

    /// Dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of dimensions.
    pub fn rank(&self) -> Rank {
        self.dims.len()
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    /// Whether this is the shape of a scalar.
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    /// Size of one dimension, if it exists.
    pub fn dim(&self, axis: Axis) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    /// Shape made of the dimensions from `axis` onward.
    ///
    /// ```
    /// use ndspace_core::Shape;
    ///
    /// let shape = Shape::new(&[2, 3, 4]).unwrap();
    /// assert_eq!(shape.tail(1).dims(), &[3, 4]);
    /// assert!(shape.tail(3).is_scalar());
    /// ```
    pub fn tail(&self, axis: Axis) -> Shape {
        Self {
            dims: self.dims[axis.min(self.dims.len())..].iter().copied().collect(),
        }
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = NdError;

    fn try_from(dims: &[usize]) -> NdResult<Self> {
        Shape::new(dims)
    }
}

impl TryFrom<Vec<usize>> for Shape {
    type Error = NdError;

    fn try_from(dims: Vec<usize>) -> NdResult<Self> {
        Shape::new(&dims)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape{:?}", self.dims.as_slice())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.dims.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_size_and_rank() {
        let shape = Shape::new(&[2, 3, 4]).unwrap();
        assert_eq!(shape.rank(), 3);
        assert_eq!(shape.size(), 24);
        assert_eq!(shape.dim(1), Some(3));
        assert_eq!(shape.dim(3), None);
    }

    #[test]
    fn test_shape_with_zero_dimension() {
        let shape = Shape::new(&[3, 0, 2]).unwrap();
        assert_eq!(shape.size(), 0);
    }

    #[test]
    fn test_scalar_shape() {
        let shape = Shape::scalar();
        assert!(shape.is_scalar());
        assert_eq!(shape.rank(), 0);
        assert_eq!(shape.size(), 1);
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let err = Shape::from_signed(&[4, -2]).unwrap_err();
        assert!(matches!(err, NdError::InvalidArgument { .. }));
    }

    #[test]
    fn test_overflowing_shape_rejected() {
        assert!(Shape::new(&[usize::MAX, 2]).is_err());
    }

    #[test]
    fn test_empty_shape_with_overflowing_strides_rejected() {
        let huge = 1usize << (usize::BITS / 2 + 8);
        assert!(matches!(
            Shape::new(&[0, huge, huge]),
            Err(NdError::InvalidArgument { .. })
        ));
        assert!(Shape::new(&[huge, huge, 0]).is_err());
        assert_eq!(Shape::new(&[0, huge]).unwrap().size(), 0);
    }

    #[test]
    fn test_shape_display() {
        let shape = Shape::new(&[3, 4]).unwrap();
        assert_eq!(shape.to_string(), "[3, 4]");
        assert_eq!(format!("{:?}", shape), "Shape[3, 4]");
    }
}
