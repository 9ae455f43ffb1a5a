//! Position iteration over dimensional spaces
//!
//! [`PositionIter`] walks the addressable units of a space in row-major order
//! and yields their linear positions. The unit rank says how many trailing
//! dimensions form one unit:
//!
//! - unit rank 0 visits every scalar
//! - unit rank 1 visits the first scalar of every innermost vector
//! - unit rank `n` visits the first scalar of every `n`-dimensional element
//!
//! Iterators are finite, cheap to clone and can be restarted or re-rooted at
//! another coordinate with [`PositionIter::at`].
//!
//! # Examples
//!
//! ```
//! use ndspace_core::{DimensionalSpace, PositionIter, Shape};
//!
//! let space = DimensionalSpace::create(&Shape::new(&[2, 3]).unwrap());
//!
//! // One position per scalar
//! let scalars: Vec<usize> = PositionIter::new(&space, 0).unwrap().collect();
//! assert_eq!(scalars, vec![0, 1, 2, 3, 4, 5]);
//!
//! // One position per row
//! let rows: Vec<usize> = PositionIter::new(&space, 1).unwrap().collect();
//! assert_eq!(rows, vec![0, 3]);
//! ```

use crate::error::{NdError, NdResult};
use crate::space::DimensionalSpace;
use crate::types::Coords;

/// Lazy sequence of unit positions over a [`DimensionalSpace`].
#[derive(Debug, Clone)]
pub struct PositionIter<'a> {
    space: &'a DimensionalSpace,
    unit_rank: usize,
    start: Coords,
    coords: Coords,
    position: usize,
    done: bool,
}

impl<'a> PositionIter<'a> {
    /// Iterate over every unit of `space`, starting with the first one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `unit_rank` exceeds the rank of the space.
    pub fn new(space: &'a DimensionalSpace, unit_rank: usize) -> NdResult<Self> {
        let depth = Self::depth(space, unit_rank)?;
        Self::starting_at(space, unit_rank, &Coords::from_elem(0, depth))
    }

    /// Iterate over the units of `space` from `start` onward.
    ///
    /// `start` holds one coordinate per iterated dimension, that is
    /// `rank - unit_rank` of them.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `unit_rank` exceeds the rank or `start` has the
    ///   wrong length
    /// - `IndexOutOfRange` if a component of `start` is out of range
    pub fn starting_at(
        space: &'a DimensionalSpace,
        unit_rank: usize,
        start: &[usize],
    ) -> NdResult<Self> {
        let depth = Self::depth(space, unit_rank)?;
        if start.len() != depth {
            return Err(NdError::rank_mismatch(depth, start.len()));
        }
        let done = space.sizes()[..depth].contains(&0);
        let position = if done {
            space.offset()
        } else {
            space.position_of_prefix(start)?
        };
        Ok(Self {
            space,
            unit_rank,
            start: start.iter().copied().collect(),
            coords: start.iter().copied().collect(),
            position,
            done,
        })
    }

    fn depth(space: &DimensionalSpace, unit_rank: usize) -> NdResult<usize> {
        space.rank().checked_sub(unit_rank).ok_or_else(|| {
            NdError::invalid_argument(format!(
                "unit rank {} exceeds rank {}",
                unit_rank,
                space.rank()
            ))
        })
    }

    /// A fresh iterator over the same space rooted at `coords`.
    ///
    /// No ordering is enforced: `coords` may lie before the current unit.
    pub fn at(&self, coords: &[usize]) -> NdResult<Self> {
        Self::starting_at(self.space, self.unit_rank, coords)
    }

    /// Rewind to the coordinate this iterator was created with.
    pub fn restart(&mut self) {
        self.coords.clone_from(&self.start);
        self.done = self.space.sizes()[..self.coords.len()].contains(&0);
        if !self.done {
            self.position = self.space.offset()
                + self
                    .coords
                    .iter()
                    .zip(self.space.strides())
                    .map(|(c, s)| c * s)
                    .sum::<usize>();
        }
    }

    /// Coordinates of the next unit, one per iterated dimension.
    pub fn coords(&self) -> &[usize] {
        &self.coords
    }

    /// Number of trailing dimensions forming one unit.
    pub fn unit_rank(&self) -> usize {
        self.unit_rank
    }

    /// The space being iterated.
    pub fn space(&self) -> &'a DimensionalSpace {
        self.space
    }

    /// Drain the remaining units, calling `visit(coords, position)` for each.
    ///
    /// The coordinate buffer is reused between calls; copy it to keep it.
    ///
    /// ```
    /// use ndspace_core::{DimensionalSpace, PositionIter, Shape};
    ///
    /// let space = DimensionalSpace::create(&Shape::new(&[2, 2]).unwrap());
    /// let mut seen = Vec::new();
    /// PositionIter::new(&space, 0)
    ///     .unwrap()
    ///     .for_each_indexed(|coords, position| seen.push((coords.to_vec(), position)));
    /// assert_eq!(seen[3], (vec![1, 1], 3));
    /// ```
    pub fn for_each_indexed<F>(mut self, mut visit: F)
    where
        F: FnMut(&[usize], usize),
    {
        while !self.done {
            visit(&self.coords, self.position);
            self.done = !self.space.advance(&mut self.coords, &mut self.position);
        }
    }
}

impl Iterator for PositionIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let position = self.position;
        self.done = !self.space.advance(&mut self.coords, &mut self.position);
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let depth = self.coords.len();
        let total: usize = self.space.sizes()[..depth].iter().product();
        let remaining = total - self.space.ordinal_of(&self.coords);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PositionIter<'_> {}
