//! Sequential population of dense arrays
//!
//! Dense targets write each unit straight into the buffer, with a single bulk
//! write when the unit is contiguous in storage.

use super::types::DenseArray;
use crate::error::NdResult;
use crate::hydrate::{HydrationTarget, Initializer};
use crate::index::Index;
use crate::iter::PositionIter;
use crate::space::DimensionalSpace;
use crate::types::{Element, Shape};
use smallvec::SmallVec;

impl<T: Element> HydrationTarget<T> for DenseArray<T> {
    fn hydration_space(&self) -> &DimensionalSpace {
        &self.space
    }

    fn put_unit(&mut self, prefix: &[usize], values: &[T]) -> NdResult<()> {
        let fixed: SmallVec<[Index; 6]> = prefix.iter().map(|&i| Index::At(i)).collect();
        let unit = self.space.map_to(&fixed)?;
        if unit.is_contiguous() {
            return self.buffer.write(unit.offset(), values);
        }
        for (position, &value) in PositionIter::new(&unit, 0)?.zip(values) {
            self.buffer.set_at(position, value)?;
        }
        Ok(())
    }
}

impl<T: Element> DenseArray<T> {
    /// Allocate a zero-filled array and populate it with `init`
    ///
    /// # Examples
    ///
    /// ```
    /// use ndspace_core::{DenseArray, NdArray, Shape};
    ///
    /// let identity = DenseArray::<f64>::init(Shape::new(&[3, 3]).unwrap(), |init| {
    ///     for i in 0..3 {
    ///         init.skip_to(&[i, i])?.by_scalars().put(1.0)?;
    ///     }
    ///     Ok(())
    /// })
    /// .unwrap();
    /// assert_eq!(identity.get(&[1, 1]).unwrap(), 1.0);
    /// assert_eq!(identity.get(&[1, 2]).unwrap(), 0.0);
    /// ```
    pub fn init<F>(shape: Shape, init: F) -> NdResult<Self>
    where
        F: FnOnce(&mut Initializer<'_, T, Self>) -> NdResult<()>,
    {
        let mut array = Self::zeros(shape);
        init(&mut Initializer::new(&mut array)?)?;
        Ok(array)
    }
}
