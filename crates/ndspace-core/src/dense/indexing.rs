//! Element access, slicing and bulk copies on dense arrays
//!
//! Bulk copies walk the array one contiguous segment at a time: the trailing
//! dimensions reported by
//! [`DimensionalSpace::contiguous_rank`](crate::DimensionalSpace::contiguous_rank)
//! form gapless runs of storage moved with a single buffer read or write.

use super::types::DenseArray;
use crate::array::{check_buffer_len, NdArray, NdArrayMut, Sliceable};
use crate::error::NdResult;
use crate::index::Index;
use crate::iter::PositionIter;
use crate::space::DimensionalSpace;
use crate::types::Element;

impl<T: Element> DenseArray<T> {
    /// Visit every contiguous run of storage as `(position, ordinal, len)`,
    /// where `ordinal` is the row-major index of the run's first element.
    fn for_each_segment<F>(&self, mut visit: F) -> NdResult<()>
    where
        F: FnMut(usize, usize, usize) -> NdResult<()>,
    {
        let space = &*self.space;
        if space.size() == 0 {
            return Ok(());
        }
        let unit_rank = space.contiguous_rank();
        let len: usize = space.sizes()[space.rank() - unit_rank..].iter().product();
        for (i, position) in PositionIter::new(space, unit_rank)?.enumerate() {
            visit(position, i * len, len)?;
        }
        Ok(())
    }
}

impl<T: Element> NdArray<T> for DenseArray<T> {
    fn space(&self) -> &DimensionalSpace {
        &self.space
    }

    fn get(&self, coords: &[usize]) -> NdResult<T> {
        self.buffer.get_at(self.space.position_of(coords)?)
    }

    fn read(&self, dst: &mut [T]) -> NdResult<()> {
        check_buffer_len(self.size(), dst.len())?;
        self.for_each_segment(|position, ordinal, len| {
            self.buffer.read(position, &mut dst[ordinal..ordinal + len])
        })
    }
}

impl<T: Element> NdArrayMut<T> for DenseArray<T> {
    fn set(&mut self, coords: &[usize], value: T) -> NdResult<()> {
        self.buffer.set_at(self.space.position_of(coords)?, value)
    }

    fn write(&mut self, src: &[T]) -> NdResult<()> {
        check_buffer_len(self.size(), src.len())?;
        self.for_each_segment(|position, ordinal, len| {
            self.buffer.write(position, &src[ordinal..ordinal + len])
        })
    }
}

impl<T: Element> Sliceable<T> for DenseArray<T> {
    type View<'a> = DenseArray<T>;

    /// The view shares storage with `self`.
    ///
    /// ```
    /// use ndspace_core::index::{all, range_step};
    /// use ndspace_core::{DenseArray, NdArray, NdArrayMut, Shape, Sliceable};
    ///
    /// let array = DenseArray::from_vec((0..12).collect(), Shape::new(&[3, 4]).unwrap()).unwrap();
    /// let mut even_columns = array.slice(&[all(), range_step(0, 4, 2)]).unwrap();
    /// assert_eq!(even_columns.to_vec().unwrap(), vec![0, 2, 4, 6, 8, 10]);
    ///
    /// even_columns.set(&[2, 1], -1).unwrap();
    /// assert_eq!(array.get(&[2, 2]).unwrap(), -1);
    /// ```
    fn slice(&self, indices: &[Index]) -> NdResult<DenseArray<T>> {
        Ok(self.with_space(self.space.map_to(indices)?))
    }
}
