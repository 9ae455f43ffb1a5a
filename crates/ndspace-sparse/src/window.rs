//! Read-only windows over sparse arrays
//!
//! A [`SparseWindow`] is a lens on part of a [`SparseArray`]: a relative
//! [`DimensionalSpace`] whose offset is the source position of the window's
//! first element. Nothing is copied. Reads translate between window and
//! source coordinates through linear positions:
//!
//! ```text
//! window coords ──position_of──▶ source position ──coordinates_of──▶ source coords
//! ```
//!
//! Windows borrow their source, so the source cannot change while a window
//! is alive. Writes through a window always fail with `ReadOnly`.
//!
//! # Examples
//!
//! ```
//! use ndspace_core::index::{all, at};
//! use ndspace_core::{NdArray, NdArrayMut, NdError, Shape, Sliceable};
//! use ndspace_sparse::SparseArray;
//!
//! let sparse = SparseArray::new(
//!     vec![vec![0, 0], vec![1, 2]],
//!     vec![1, 2],
//!     Shape::new(&[3, 4]).unwrap(),
//!     0,
//! )
//! .unwrap();
//!
//! let mut row = sparse.slice(&[at(1), all()]).unwrap();
//! assert_eq!(row.to_vec().unwrap(), vec![0, 0, 2, 0]);
//! assert!(matches!(row.set(&[0], 5), Err(NdError::ReadOnly { .. })));
//! ```

use crate::coo::SparseArray;
use ndspace_core::error::{NdError, NdResult};
use ndspace_core::index::Index;
use ndspace_core::{DimensionalSpace, Element, NdArray, NdArrayMut, Sliceable};

/// Read-only view of a region of a [`SparseArray`]
#[derive(Debug, Clone)]
pub struct SparseWindow<'a, T> {
    source: &'a SparseArray<T>,
    space: DimensionalSpace,
}

/// Check that `space` addresses distinct positions of a source of
/// `source_size` elements.
pub(crate) fn check_window_space(space: &DimensionalSpace, source_size: usize) -> NdResult<()> {
    let Some(last) = space.last_position() else {
        return Ok(());
    };
    let mut span = 0usize;
    for (&size, &stride) in space.sizes().iter().zip(space.strides()).rev() {
        if size <= 1 {
            continue;
        }
        if stride <= span {
            return Err(NdError::invalid_argument(format!(
                "window strides {:?} overlap for sizes {:?}",
                space.strides(),
                space.sizes()
            )));
        }
        span = (size - 1)
            .checked_mul(stride)
            .and_then(|reach| span.checked_add(reach))
            .ok_or_else(|| {
                NdError::invalid_argument(format!(
                    "window strides {:?} overflow the address space",
                    space.strides()
                ))
            })?;
    }
    if last >= source_size {
        return Err(NdError::invalid_argument(format!(
            "window reaches position {} of a source of {} elements",
            last, source_size
        )));
    }
    Ok(())
}

impl<'a, T: Element> SparseWindow<'a, T> {
    pub(crate) fn new(source: &'a SparseArray<T>, space: DimensionalSpace) -> Self {
        Self { source, space }
    }

    /// Array this window looks into
    pub fn source(&self) -> &'a SparseArray<T> {
        self.source
    }

    /// Source position of the window's first element
    pub fn source_position(&self) -> usize {
        self.space.offset()
    }
}

impl<T: Element> NdArray<T> for SparseWindow<'_, T> {
    fn space(&self) -> &DimensionalSpace {
        &self.space
    }

    fn get(&self, coords: &[usize]) -> NdResult<T> {
        let position = self.space.position_of(coords)?;
        let source_coords = self
            .source
            .space()
            .coordinates_of(position)
            .ok_or_else(|| {
                NdError::invalid_argument(format!(
                    "position {} is outside the source array",
                    position
                ))
            })?;
        Ok(self.source.lookup(&source_coords))
    }

    /// Fill `dst` with the default value, then scatter the source entries
    /// falling inside the window.
    fn read(&self, dst: &mut [T]) -> NdResult<()> {
        let size = self.space.size();
        if dst.len() < size {
            return Err(NdError::invalid_argument(format!(
                "buffer of {} values cannot hold {} values",
                dst.len(),
                size
            )));
        }
        let dst = &mut dst[..size];
        dst.fill(self.source.default_value());
        let Some(last) = self.space.last_position() else {
            return Ok(());
        };
        let entries = self.source.entries_within(self.space.offset()..last + 1);
        let values = self.source.values();
        for k in entries {
            let position = self.source.position_of_entry(k);
            if let Some(coords) = self.space.coordinates_of(position) {
                dst[self.space.ordinal_of(&coords)] = values[k];
            }
        }
        Ok(())
    }
}

impl<T: Element> NdArrayMut<T> for SparseWindow<'_, T> {
    fn set(&mut self, _coords: &[usize], _value: T) -> NdResult<()> {
        Err(NdError::read_only("sparse windows are read-only"))
    }

    fn write(&mut self, _src: &[T]) -> NdResult<()> {
        Err(NdError::read_only("sparse windows are read-only"))
    }
}

impl<'a, T: Element> Sliceable<T> for SparseWindow<'a, T> {
    type View<'b>
        = SparseWindow<'a, T>
    where
        Self: 'b;

    fn slice(&self, indices: &[Index]) -> NdResult<SparseWindow<'a, T>> {
        Ok(SparseWindow::new(self.source, self.space.map_to(indices)?))
    }
}
