//! Dimensional spaces: mapping coordinates to linear storage positions
//!
//! A [`DimensionalSpace`] is the triple `(offset, sizes, strides)`. Each
//! coordinate tuple maps to a position in the flat storage with
//!
//! ```text
//! position = offset + Σ coords[i] × strides[i]      0 ≤ coords[i] < sizes[i]
//! ```
//!
//! A space created from a [`Shape`] is row-major with offset zero. Applying
//! index expressions with [`DimensionalSpace::map_to`] derives a relative space
//! describing a slice of the parent, without copying anything:
//!
//! ```text
//! at(i):                  offset += i × strides[d]       dimension removed
//! range(start, end, s):   offset += start × strides[d]
//!                         sizes[d]    = ⌈(end - start) / s⌉
//!                         strides[d] ×= s
//! ```
//!
//! # Examples
//!
//! ```
//! use ndspace_core::index::{at, range};
//! use ndspace_core::{DimensionalSpace, Shape};
//!
//! let space = DimensionalSpace::create(&Shape::new(&[3, 4]).unwrap());
//! assert_eq!(space.strides(), &[4, 1]);
//! assert_eq!(space.position_of(&[2, 1]).unwrap(), 9);
//!
//! // Column 2 of rows 1..3
//! let column = space.map_to(&[range(1, 3), at(2)]).unwrap();
//! assert_eq!(column.sizes(), &[2]);
//! assert_eq!(column.position_of(&[1]).unwrap(), space.position_of(&[2, 2]).unwrap());
//! ```

use crate::error::{NdError, NdResult};
use crate::index::{Index, Resolved};
use crate::types::{Coords, Rank, Shape};
use smallvec::SmallVec;

/// Sizes, strides and base offset of an array or view.
///
/// Immutable once built. Spaces derived with [`map_to`](Self::map_to) keep
/// their dimensions in the parent's order, so strides of dimensions larger
/// than one element stay strictly decreasing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionalSpace {
    sizes: SmallVec<[usize; 6]>,
    strides: SmallVec<[usize; 6]>,
    offset: usize,
}

impl DimensionalSpace {
    /// Create the row-major space of `shape`, with offset zero.
    pub fn create(shape: &Shape) -> Self {
        let sizes: SmallVec<[usize; 6]> = shape.dims().iter().copied().collect();
        let mut strides: SmallVec<[usize; 6]> = SmallVec::from_elem(1, sizes.len());
        let mut stride = 1usize;
        for (dim, &size) in sizes.iter().enumerate().rev() {
            strides[dim] = stride;
            stride *= size;
        }
        Self {
            sizes,
            strides,
            offset: 0,
        }
    }

    /// Create a space from explicit parts.
    ///
    /// Strides of dimensions with more than one element must be non-zero and
    /// decreasing, as they are in any non-empty space obtained from
    /// [`create`](Self::create) and [`map_to`](Self::map_to).
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when
    /// - sizes and strides differ in length
    /// - the strides of non-trivial dimensions are zero or not strictly
    ///   decreasing
    /// - the sizes overflow like an invalid [`Shape`]
    /// - the last position of a non-empty space overflows `usize`
    pub fn new(offset: usize, sizes: &[usize], strides: &[usize]) -> NdResult<Self> {
        if sizes.len() != strides.len() {
            return Err(NdError::invalid_argument(format!(
                "{} sizes but {} strides",
                sizes.len(),
                strides.len()
            )));
        }
        let mut previous: Option<usize> = None;
        for (&size, &stride) in sizes.iter().zip(strides) {
            if size <= 1 {
                continue;
            }
            if stride == 0 || previous.is_some_and(|p| stride >= p) {
                return Err(NdError::invalid_argument(format!(
                    "strides {:?} are not row-major",
                    strides
                )));
            }
            previous = Some(stride);
        }
        let shape = Shape::new(sizes)?;
        if shape.size() != 0 && last_position(offset, sizes, strides).is_none() {
            return Err(NdError::invalid_argument(format!(
                "space of sizes {:?} and strides {:?} at offset {} overflows the address space",
                sizes, strides, offset
            )));
        }
        Ok(Self {
            sizes: sizes.iter().copied().collect(),
            strides: strides.iter().copied().collect(),
            offset,
        })
    }

    /// Size of each dimension.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Distance in storage between consecutive coordinates of each dimension.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Position of the first element in the parent's linear space.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Position of the last element, `None` for an empty space.
    ///
    /// Every position of the space lies in `offset()..=last_position()`.
    pub fn last_position(&self) -> Option<usize> {
        if self.size() == 0 {
            return None;
        }
        last_position(self.offset, &self.sizes, &self.strides)
    }

    /// Number of dimensions.
    pub fn rank(&self) -> Rank {
        self.sizes.len()
    }

    /// Number of addressable elements.
    pub fn size(&self) -> usize {
        self.sizes.iter().product()
    }

    /// Whether the space has no dimension.
    pub fn is_scalar(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Shape of the space.
    pub fn shape(&self) -> Shape {
        Shape::from_valid(&self.sizes)
    }

    /// Linear position of a full coordinate tuple.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `coords.len()` differs from the rank
    /// - `IndexOutOfRange` if a component is outside its dimension
    pub fn position_of(&self, coords: &[usize]) -> NdResult<usize> {
        if coords.len() != self.rank() {
            return Err(NdError::rank_mismatch(self.rank(), coords.len()));
        }
        self.position_of_prefix(coords)
    }

    /// Linear position of the first element addressed by a coordinate prefix.
    ///
    /// A prefix of length `k` selects the sub-element spanning the last
    /// `rank - k` dimensions; the full tuple addresses a scalar.
    pub fn position_of_prefix(&self, coords: &[usize]) -> NdResult<usize> {
        if coords.len() > self.rank() {
            return Err(NdError::rank_mismatch(self.rank(), coords.len()));
        }
        let mut position = self.offset;
        for (dim, (&index, (&size, &stride))) in coords
            .iter()
            .zip(self.sizes.iter().zip(&self.strides))
            .enumerate()
        {
            if index >= size {
                return Err(NdError::IndexOutOfRange { dim, index, size });
            }
            position += index * stride;
        }
        Ok(position)
    }

    /// Derive the relative space selected by `indices`.
    ///
    /// Missing trailing expressions select their whole dimension.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when there are more expressions than
    /// dimensions or an expression does not fit its dimension.
    pub fn map_to(&self, indices: &[Index]) -> NdResult<Self> {
        if indices.len() > self.rank() {
            return Err(NdError::invalid_argument(format!(
                "{} index expressions for a space of rank {}",
                indices.len(),
                self.rank()
            )));
        }
        let mut offset = self.offset;
        let mut sizes = SmallVec::with_capacity(self.rank());
        let mut strides = SmallVec::with_capacity(self.rank());
        for (dim, (&size, &stride)) in self.sizes.iter().zip(&self.strides).enumerate() {
            let resolved = match indices.get(dim) {
                Some(index) => index.resolve(dim, size)?,
                None => Index::All.resolve(dim, size)?,
            };
            match resolved {
                Resolved::Fixed(i) => offset += i * stride,
                // Only spans of two or more elements need the stepped stride
                Resolved::Span { start, len, step } => {
                    if len > 0 {
                        offset += start * stride;
                    }
                    sizes.push(len);
                    strides.push(if len > 1 { stride * step } else { stride });
                }
            }
        }
        Ok(Self {
            sizes,
            strides,
            offset,
        })
    }

    /// Space of the dimensions from `axis` onward, with offset zero.
    ///
    /// Used to address scalars inside one element of the leading dimensions.
    pub fn sub_space(&self, axis: usize) -> Self {
        let axis = axis.min(self.rank());
        Self {
            sizes: self.sizes[axis..].iter().copied().collect(),
            strides: self.strides[axis..].iter().copied().collect(),
            offset: 0,
        }
    }

    /// Advance `coords` to the next tuple in row-major order.
    ///
    /// Only the leading `coords.len()` dimensions take part, so a prefix walks
    /// over sub-elements. The last component is incremented and overflow
    /// carries into the previous one. Returns `false` when the first
    /// component overflows; the coordinates have then wrapped to zeros.
    pub fn increment_coordinates(&self, coords: &mut [usize]) -> bool {
        debug_assert!(coords.len() <= self.rank());
        for dim in (0..coords.len()).rev() {
            coords[dim] += 1;
            if coords[dim] < self.sizes[dim] {
                return true;
            }
            coords[dim] = 0;
        }
        false
    }

    /// Odometer step that keeps `position` in sync with `coords`.
    ///
    /// `position` must be the position of `coords`; no position is recomputed
    /// from scratch.
    pub(crate) fn advance(&self, coords: &mut [usize], position: &mut usize) -> bool {
        for dim in (0..coords.len()).rev() {
            if coords[dim] + 1 < self.sizes[dim] {
                coords[dim] += 1;
                *position += self.strides[dim];
                return true;
            }
            *position -= coords[dim] * self.strides[dim];
            coords[dim] = 0;
        }
        false
    }

    /// Coordinates of a position of the parent's linear space, if that
    /// position belongs to this space.
    ///
    /// ```
    /// use ndspace_core::index::{all, range_step};
    /// use ndspace_core::{DimensionalSpace, Shape};
    ///
    /// let space = DimensionalSpace::create(&Shape::new(&[4, 10]).unwrap());
    /// let sub = space.map_to(&[range_step(0, 4, 2), range_step(1, 10, 3)]).unwrap();
    /// assert_eq!(sub.coordinates_of(24).as_deref(), Some(&[1, 1][..]));
    /// assert_eq!(sub.coordinates_of(14), None);
    /// ```
    pub fn coordinates_of(&self, position: usize) -> Option<Coords> {
        if self.size() == 0 {
            return None;
        }
        let mut remaining = position.checked_sub(self.offset)?;
        let mut coords = Coords::from_elem(0, self.rank());
        for (dim, (&size, &stride)) in self.sizes.iter().zip(&self.strides).enumerate() {
            if size <= 1 {
                continue;
            }
            let index = remaining / stride;
            if index >= size {
                return None;
            }
            coords[dim] = index;
            remaining -= index * stride;
        }
        (remaining == 0).then_some(coords)
    }

    /// Row-major rank of `coords` within this space's own sizes.
    ///
    /// This is the index of the coordinate in a dense copy of the space,
    /// independent of strides and offset.
    pub fn ordinal_of(&self, coords: &[usize]) -> usize {
        let mut ordinal = 0;
        let mut stride = 1;
        for (&index, &size) in coords.iter().zip(&self.sizes).rev() {
            ordinal += index * stride;
            stride *= size;
        }
        ordinal
    }

    /// Number of trailing dimensions laid out contiguously in storage.
    ///
    /// A unit made of these dimensions occupies one gapless segment, which
    /// lets callers copy it in bulk.
    pub fn contiguous_rank(&self) -> usize {
        let mut expected = 1;
        let mut rank = 0;
        for (&size, &stride) in self.sizes.iter().zip(&self.strides).rev() {
            if size > 1 && stride != expected {
                break;
            }
            expected *= size;
            rank += 1;
        }
        rank
    }

    /// Whether every element lies in one gapless segment.
    pub fn is_contiguous(&self) -> bool {
        self.contiguous_rank() == self.rank()
    }
}

/// `offset + Σ (sizes[i] - 1) × strides[i]`, or `None` on overflow.
fn last_position(offset: usize, sizes: &[usize], strides: &[usize]) -> Option<usize> {
    sizes
        .iter()
        .zip(strides)
        .try_fold(offset, |last, (&size, &stride)| {
            size.saturating_sub(1)
                .checked_mul(stride)
                .and_then(|reach| last.checked_add(reach))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{all, at, range, range_step};

    fn space(dims: &[usize]) -> DimensionalSpace {
        DimensionalSpace::create(&Shape::new(dims).unwrap())
    }

    #[test]
    fn test_row_major_strides() {
        let s = space(&[2, 3, 4]);
        assert_eq!(s.strides(), &[12, 4, 1]);
        assert_eq!(s.offset(), 0);
        assert_eq!(s.size(), 24);
        assert!(s.is_contiguous());
    }

    #[test]
    fn test_scalar_space() {
        let s = space(&[]);
        assert!(s.is_scalar());
        assert_eq!(s.size(), 1);
        assert_eq!(s.position_of(&[]).unwrap(), 0);
        assert_eq!(s.coordinates_of(0).as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_position_of_validates() {
        let s = space(&[3, 4]);
        assert_eq!(s.position_of(&[1, 3]).unwrap(), 7);
        assert!(matches!(
            s.position_of(&[1]),
            Err(NdError::InvalidArgument { .. })
        ));
        assert_eq!(
            s.position_of(&[3, 0]),
            Err(NdError::IndexOutOfRange {
                dim: 0,
                index: 3,
                size: 3
            })
        );
    }

    #[test]
    fn test_position_of_prefix() {
        let s = space(&[3, 4]);
        assert_eq!(s.position_of_prefix(&[2]).unwrap(), 8);
        assert_eq!(s.position_of_prefix(&[]).unwrap(), 0);
    }

    #[test]
    fn test_map_to_single_index_drops_dimension() {
        let s = space(&[2, 3, 4]);
        let sub = s.map_to(&[at(1)]).unwrap();
        assert_eq!(sub.sizes(), &[3, 4]);
        assert_eq!(sub.strides(), &[4, 1]);
        assert_eq!(sub.offset(), 12);
    }

    #[test]
    fn test_map_to_strided_range() {
        let s = space(&[5, 6]);
        let sub = s.map_to(&[range(1, 4), range_step(1, 6, 2)]).unwrap();
        assert_eq!(sub.sizes(), &[3, 3]);
        assert_eq!(sub.strides(), &[6, 2]);
        assert_eq!(sub.offset(), 7);
        assert_eq!(
            sub.position_of(&[2, 1]).unwrap(),
            s.position_of(&[3, 3]).unwrap()
        );
        assert!(!sub.is_contiguous());
    }

    #[test]
    fn test_map_to_composes() {
        let s = space(&[4, 4]);
        let first = s.map_to(&[range(1, 4)]).unwrap();
        let second = first.map_to(&[at(1), all()]).unwrap();
        assert_eq!(second.offset(), 8);
        assert_eq!(second.sizes(), &[4]);
    }

    #[test]
    fn test_map_to_rejects_too_many_indices() {
        let s = space(&[2, 2]);
        assert!(matches!(
            s.map_to(&[all(), all(), all()]),
            Err(NdError::InvalidArgument { .. })
        ));
        assert!(s.map_to(&[at(2)]).is_err());
    }

    #[test]
    fn test_increment_coordinates_carries() {
        let s = space(&[2, 3]);
        let mut coords = [0, 2];
        assert!(s.increment_coordinates(&mut coords));
        assert_eq!(coords, [1, 0]);
        let mut last = [1, 2];
        assert!(!s.increment_coordinates(&mut last));
        assert_eq!(last, [0, 0]);
    }

    #[test]
    fn test_increment_prefix() {
        let s = space(&[2, 3, 4]);
        let mut prefix = [0, 2];
        assert!(s.increment_coordinates(&mut prefix));
        assert_eq!(prefix, [1, 0]);
    }

    #[test]
    fn test_coordinates_of_relative_space() {
        let s = space(&[3, 4]);
        let column = s.map_to(&[all(), at(2)]).unwrap();
        assert_eq!(column.coordinates_of(6).as_deref(), Some(&[1][..]));
        assert_eq!(column.coordinates_of(5), None);
        assert_eq!(column.coordinates_of(1), None);
    }

    #[test]
    fn test_ordinal_of() {
        let s = space(&[4, 10]);
        let sub = s.map_to(&[range_step(0, 4, 2), range_step(1, 10, 3)]).unwrap();
        assert_eq!(sub.ordinal_of(&[1, 2]), 5);
    }

    #[test]
    fn test_contiguous_rank() {
        let s = space(&[3, 4, 5]);
        let rows = s.map_to(&[range(0, 3), range(1, 3)]).unwrap();
        assert_eq!(rows.contiguous_rank(), 2);
        let columns = s.map_to(&[all(), all(), range(1, 3)]).unwrap();
        assert_eq!(columns.contiguous_rank(), 1);
        let block = s.map_to(&[range(1, 2)]).unwrap();
        assert!(block.is_contiguous());
    }

    #[test]
    fn test_new_rejects_column_major_strides() {
        assert!(DimensionalSpace::new(0, &[3, 4], &[1, 3]).is_err());
        assert!(DimensionalSpace::new(0, &[3, 4], &[4, 1]).is_ok());
        assert!(DimensionalSpace::new(0, &[3], &[4, 1]).is_err());
        assert!(DimensionalSpace::new(0, &[3], &[0]).is_err());
        assert!(DimensionalSpace::new(0, &[1, 3], &[0, 1]).is_ok());
    }

    #[test]
    fn test_new_rejects_unreachable_positions() {
        assert!(matches!(
            DimensionalSpace::new(usize::MAX, &[2], &[1]),
            Err(NdError::InvalidArgument { .. })
        ));
        assert!(DimensionalSpace::new(0, &[3], &[usize::MAX / 2 + 1]).is_err());
        let last = DimensionalSpace::new(usize::MAX - 1, &[2], &[1]).unwrap();
        assert_eq!(last.last_position(), Some(usize::MAX));
        assert_eq!(last.position_of(&[1]).unwrap(), usize::MAX);
        let empty = DimensionalSpace::new(usize::MAX, &[0, 2], &[1, 1]).unwrap();
        assert_eq!(empty.last_position(), None);
    }

    #[test]
    fn test_create_empty_shape_with_large_dimensions() {
        let huge = 1usize << (usize::BITS / 2 + 8);
        let s = space(&[0, huge]);
        assert_eq!(s.strides(), &[huge, 1]);
        assert_eq!(s.size(), 0);
        assert!(s.map_to(&[range(0, 0), range_step(0, huge, huge)]).is_ok());
    }

    #[test]
    fn test_map_to_large_step_of_single_element() {
        let s = space(&[4, 6]);
        let sub = s.map_to(&[range_step(1, 4, usize::MAX), all()]).unwrap();
        assert_eq!(sub.sizes(), &[1, 6]);
        assert_eq!(sub.strides(), &[6, 1]);
        assert_eq!(sub.offset(), 6);
    }
}
