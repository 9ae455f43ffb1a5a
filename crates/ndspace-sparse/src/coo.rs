//! COO (Coordinate) sparse arrays
//!
//! A sparse array stores only the entries that differ from its default value,
//! as a list of coordinate tuples and a parallel list of values:
//!
//! - `indices`: one rank-length coordinate tuple per stored entry
//! - `values`: `values[k]` is the value at `indices[k]`
//! - `default_value`: the value of every coordinate not listed
//!
//! # Lifecycle
//!
//! ```text
//! Empty ──hydrate()/init()──▶ Populating ──seal──▶ Populated(sorted)
//!                                                 ▲
//! from_dense(), from_slice() ─────────────────────┤
//! new(), from_arrays() ──▶ Populated(sorted | unsorted) ──sort──┘
//! ```
//!
//! Populated arrays are read-only: `set` and `write` fail with `ReadOnly`.
//! Sortedness is a state, detected on explicit construction and restored by
//! [`SparseArray::sort_indices_and_values`]. Lookups and windows use the sort
//! order to bound their scans when it is available.
//!
//! Duplicate coordinates are not supported: which value a lookup or a dense
//! expansion sees for a duplicated coordinate is unspecified.
//!
//! # Examples
//!
//! ```
//! use ndspace_core::{NdArray, Shape};
//! use ndspace_sparse::SparseArray;
//!
//! let sparse = SparseArray::new(
//!     vec![vec![0, 0], vec![1, 2]],
//!     vec![1, 2],
//!     Shape::new(&[3, 4]).unwrap(),
//!     0,
//! )
//! .unwrap();
//! assert_eq!(sparse.nnz(), 2);
//! assert_eq!(sparse.get(&[1, 2]).unwrap(), 2);
//! assert_eq!(sparse.get(&[2, 3]).unwrap(), 0);
//! assert_eq!(
//!     sparse.to_vec().unwrap(),
//!     vec![1, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0]
//! );
//! ```

use ndspace_core::error::{NdError, NdResult};
use ndspace_core::index::Index;
use ndspace_core::{
    Coords, DenseArray, DimensionalSpace, Element, HydrationTarget, Initializer, NdArray,
    NdArrayMut, PositionIter, Shape, Sliceable,
};
use std::ops::Range;
use std::rc::Rc;
use tracing::{debug, instrument};

use crate::window::{check_window_space, SparseWindow};

/// Population state of a [`SparseArray`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparseState {
    /// Allocated, waiting for its single population
    Empty,
    /// Being populated by a hydrator or initializer
    Populating,
    /// Populated and read-only
    Populated {
        /// Whether entries are in ascending row-major coordinate order
        sorted: bool,
    },
}

/// COO (Coordinate) sparse array
///
/// Stores the entries differing from a default value as (coordinate, value)
/// pairs over a shape of any rank.
#[derive(Debug, Clone)]
pub struct SparseArray<T> {
    /// Coordinates of stored entries
    indices: Vec<Coords>,

    /// Values at the corresponding coordinates
    values: Vec<T>,

    /// Value of every coordinate not stored
    default_value: T,

    /// Row-major space of the shape
    space: Rc<DimensionalSpace>,

    state: SparseState,
}

impl<T: Element> SparseArray<T> {
    /// Create an empty sparse array, to be populated once with
    /// [`hydrate`](HydrationTarget::hydrate)
    pub fn create(shape: Shape, default_value: T) -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
            default_value,
            space: Rc::new(DimensionalSpace::create(&shape)),
            state: SparseState::Empty,
        }
    }

    /// Create a sparse array and populate it with `init`
    ///
    /// # Examples
    ///
    /// ```
    /// use ndspace_core::{NdArray, Shape};
    /// use ndspace_sparse::SparseArray;
    ///
    /// let sparse = SparseArray::init(Shape::new(&[2, 3]).unwrap(), 0.0, |init| {
    ///     init.by_vectors()?.put(&[0.0, 1.5])?.put(&[2.5, 0.0, 3.5])?;
    ///     Ok(())
    /// })
    /// .unwrap();
    /// assert_eq!(sparse.nnz(), 3);
    /// assert!(sparse.is_sorted());
    /// ```
    pub fn init<F>(shape: Shape, default_value: T, init: F) -> NdResult<Self>
    where
        F: FnOnce(&mut Initializer<'_, T, Self>) -> NdResult<()>,
    {
        let mut array = Self::create(shape, default_value);
        init(&mut Initializer::new(&mut array)?)?;
        Ok(array)
    }

    /// Create a sparse array from explicit coordinates and values
    ///
    /// # Arguments
    ///
    /// * `indices` - Coordinates of the stored entries
    /// * `values` - Values at those coordinates
    /// * `shape` - Shape of the array
    /// * `default_value` - Value of every coordinate not listed
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the lengths differ or a tuple does not have one
    ///   component per dimension
    /// - `IndexOutOfRange` if a component lies outside its dimension
    pub fn new(
        indices: Vec<Vec<usize>>,
        values: Vec<T>,
        shape: Shape,
        default_value: T,
    ) -> NdResult<Self> {
        let indices = indices.into_iter().map(Coords::from_vec).collect();
        Self::from_parts(indices, values, shape, default_value)
    }

    /// Create a sparse array from a `[nnz, rank]` array of coordinates and a
    /// `[nnz]` array of values
    ///
    /// ```
    /// use ndspace_core::{DenseArray, NdArray, Shape};
    /// use ndspace_sparse::SparseArray;
    ///
    /// let indices = DenseArray::from_vec(vec![0, 1, 2, 0], Shape::new(&[2, 2]).unwrap()).unwrap();
    /// let values = DenseArray::from_vec(vec![5, 6], Shape::new(&[2]).unwrap()).unwrap();
    /// let sparse = SparseArray::from_arrays(&indices, &values, Shape::new(&[3, 2]).unwrap(), 0).unwrap();
    /// assert_eq!(sparse.get(&[2, 0]).unwrap(), 6);
    /// ```
    pub fn from_arrays<I, V>(
        indices: &I,
        values: &V,
        shape: Shape,
        default_value: T,
    ) -> NdResult<Self>
    where
        I: NdArray<usize> + ?Sized,
        V: NdArray<T> + ?Sized,
    {
        let index_shape = indices.shape();
        let value_shape = values.shape();
        let expected = [value_shape.size(), shape.rank()];
        if index_shape.dims() != &expected[..] || value_shape.rank() != 1 {
            return Err(NdError::invalid_argument(format!(
                "indices of shape {} and values of shape {} do not describe entries of rank {}",
                index_shape,
                value_shape,
                shape.rank()
            )));
        }
        let rank = shape.rank();
        let flat = indices.to_vec()?;
        let coords = (0..value_shape.size())
            .map(|k| flat[k * rank..(k + 1) * rank].iter().copied().collect())
            .collect();
        Self::from_parts(coords, values.to_vec()?, shape, default_value)
    }

    fn from_parts(
        indices: Vec<Coords>,
        values: Vec<T>,
        shape: Shape,
        default_value: T,
    ) -> NdResult<Self> {
        if indices.len() != values.len() {
            return Err(NdError::invalid_argument(format!(
                "{} indices but {} values",
                indices.len(),
                values.len()
            )));
        }
        let space = DimensionalSpace::create(&shape);
        for idx in &indices {
            space.position_of(idx)?;
        }
        let sorted = indices.windows(2).all(|w| w[0] <= w[1]);
        Ok(Self {
            indices,
            values,
            default_value,
            space: Rc::new(space),
            state: SparseState::Populated { sorted },
        })
    }

    /// Convert any array, keeping the values that differ from `default_value`
    ///
    /// Visits every element once, in row-major order, so the result is
    /// sorted.
    #[instrument(skip_all, fields(shape = %source.shape()))]
    pub fn from_dense<A>(source: &A, default_value: T) -> NdResult<Self>
    where
        A: NdArray<T> + ?Sized,
    {
        Self::from_slice(&source.to_vec()?, source.shape(), default_value)
    }

    /// Convert row-major `data` of the given shape, keeping the values that
    /// differ from `default_value`
    ///
    /// # Examples
    ///
    /// ```
    /// use ndspace_core::Shape;
    /// use ndspace_sparse::SparseArray;
    ///
    /// let data = [7, 7, 1, 7, 2, 7];
    /// let sparse = SparseArray::from_slice(&data, Shape::new(&[2, 3]).unwrap(), 7).unwrap();
    /// assert_eq!(sparse.indices()[1].as_slice(), &[1, 1]);
    /// assert_eq!(sparse.values(), &[1, 2]);
    /// ```
    pub fn from_slice(data: &[T], shape: Shape, default_value: T) -> NdResult<Self> {
        if data.len() != shape.size() {
            return Err(NdError::invalid_argument(format!(
                "shape {} requires {} elements, but got {}",
                shape,
                shape.size(),
                data.len()
            )));
        }
        let space = DimensionalSpace::create(&shape);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        PositionIter::new(&space, 0)?.for_each_indexed(|coords, position| {
            let value = data[position];
            if value != default_value {
                indices.push(Coords::from_slice(coords));
                values.push(value);
            }
        });
        debug!(size = data.len(), nnz = values.len(), "converted dense data");
        Ok(Self {
            indices,
            values,
            default_value,
            space: Rc::new(space),
            state: SparseState::Populated { sorted: true },
        })
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Coordinates of stored entries
    pub fn indices(&self) -> &[Coords] {
        &self.indices
    }

    /// Values of stored entries
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Coordinates as a `[nnz, rank]` dense array
    pub fn indices_array(&self) -> NdResult<DenseArray<usize>> {
        let flat = self.indices.iter().flatten().copied().collect();
        DenseArray::from_vec(flat, Shape::new(&[self.nnz(), self.space.rank()])?)
    }

    /// Values as a `[nnz]` dense array
    pub fn values_array(&self) -> NdResult<DenseArray<T>> {
        DenseArray::from_vec(self.values.clone(), Shape::new(&[self.nnz()])?)
    }

    /// Value of every coordinate not stored
    pub fn default_value(&self) -> T {
        self.default_value
    }

    /// Population state
    pub fn state(&self) -> SparseState {
        self.state
    }

    /// Whether entries are in ascending row-major coordinate order
    pub fn is_sorted(&self) -> bool {
        match self.state {
            SparseState::Populated { sorted } => sorted,
            // Hydration appends in row-major order
            SparseState::Empty | SparseState::Populating => true,
        }
    }

    /// Compute density (nnz / total_elements)
    pub fn density(&self) -> f64 {
        match self.space.size() {
            0 => 0.0,
            size => self.nnz() as f64 / size as f64,
        }
    }

    /// Sort entries in ascending row-major coordinate order
    ///
    /// Indices and values move together and entries with equal coordinates
    /// keep their relative order. Sorting a sorted array does nothing.
    ///
    /// ```
    /// use ndspace_core::Shape;
    /// use ndspace_sparse::SparseArray;
    ///
    /// let mut sparse = SparseArray::new(
    ///     vec![vec![1, 0], vec![0, 1]],
    ///     vec![10, 20],
    ///     Shape::new(&[2, 2]).unwrap(),
    ///     0,
    /// )
    /// .unwrap();
    /// assert!(!sparse.is_sorted());
    /// sparse.sort_indices_and_values();
    /// assert_eq!(sparse.values(), &[20, 10]);
    /// ```
    pub fn sort_indices_and_values(&mut self) {
        if self.is_sorted() {
            return;
        }
        // Create index permutation
        let mut perm: Vec<usize> = (0..self.nnz()).collect();
        perm.sort_by(|&i, &j| self.indices[i].cmp(&self.indices[j]));

        // Apply permutation
        self.indices = perm.iter().map(|&k| self.indices[k].clone()).collect();
        self.values = perm.iter().map(|&k| self.values[k]).collect();
        self.state = SparseState::Populated { sorted: true };
        debug!(nnz = self.nnz(), "sorted indices and values");
    }

    /// Range of entries whose row-major position may lie in `positions`
    ///
    /// Narrowed by binary search when sorted, every entry otherwise.
    pub(crate) fn entries_within(&self, positions: Range<usize>) -> Range<usize> {
        if !self.is_sorted() {
            return 0..self.nnz();
        }
        let start = self
            .indices
            .partition_point(|c| self.space.ordinal_of(c) < positions.start);
        let end = self
            .indices
            .partition_point(|c| self.space.ordinal_of(c) < positions.end);
        start..end
    }

    /// Value of a validated coordinate tuple
    pub(crate) fn lookup(&self, coords: &[usize]) -> T {
        let found = if self.is_sorted() {
            self.indices
                .binary_search_by(|probe| probe.as_slice().cmp(coords))
                .ok()
        } else {
            self.indices.iter().position(|c| c.as_slice() == coords)
        };
        found.map_or(self.default_value, |k| self.values[k])
    }

    /// Row-major position of the `k`-th entry
    pub(crate) fn position_of_entry(&self, k: usize) -> usize {
        self.space.ordinal_of(&self.indices[k])
    }

    /// Read-only view of the positions of `dimensions`, rebased at
    /// `source_position`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the view would reach outside the array or its
    /// dimensions overlap.
    ///
    /// ```
    /// use ndspace_core::{DimensionalSpace, NdArray, Shape};
    /// use ndspace_sparse::SparseArray;
    ///
    /// let sparse = SparseArray::from_slice(&[0, 1, 2, 3, 4, 5], Shape::new(&[2, 3]).unwrap(), 0).unwrap();
    /// // Second column, as a vector
    /// let column = DimensionalSpace::new(0, &[2], &[3]).unwrap();
    /// let window = sparse.window(1, &column).unwrap();
    /// assert_eq!(window.to_vec().unwrap(), vec![1, 4]);
    /// ```
    pub fn window(
        &self,
        source_position: usize,
        dimensions: &DimensionalSpace,
    ) -> NdResult<SparseWindow<'_, T>> {
        let space = DimensionalSpace::new(source_position, dimensions.sizes(), dimensions.strides())?;
        check_window_space(&space, self.space.size())?;
        Ok(SparseWindow::new(self, space))
    }
}

impl<T: Element> NdArray<T> for SparseArray<T> {
    fn space(&self) -> &DimensionalSpace {
        &self.space
    }

    fn get(&self, coords: &[usize]) -> NdResult<T> {
        self.space.position_of(coords)?;
        Ok(self.lookup(coords))
    }

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
        dst.fill(self.default_value);
        for (idx, &value) in self.indices.iter().zip(&self.values) {
            dst[self.space.ordinal_of(idx)] = value;
        }
        Ok(())
    }
}

impl<T: Element> NdArrayMut<T> for SparseArray<T> {
    fn set(&mut self, _coords: &[usize], _value: T) -> NdResult<()> {
        Err(NdError::read_only("sparse arrays cannot be modified once created"))
    }

    fn write(&mut self, _src: &[T]) -> NdResult<()> {
        Err(NdError::read_only("sparse arrays cannot be modified once created"))
    }
}

impl<T: Element> Sliceable<T> for SparseArray<T> {
    type View<'a>
        = SparseWindow<'a, T>
    where
        Self: 'a;

    fn slice(&self, indices: &[Index]) -> NdResult<SparseWindow<'_, T>> {
        Ok(SparseWindow::new(self, self.space.map_to(indices)?))
    }
}

impl<T: Element> HydrationTarget<T> for SparseArray<T> {
    fn hydration_space(&self) -> &DimensionalSpace {
        &self.space
    }

    fn begin_hydration(&mut self) -> NdResult<()> {
        if self.state != SparseState::Empty {
            return Err(NdError::read_only(format!(
                "sparse array in state {:?} cannot be populated again",
                self.state
            )));
        }
        self.state = SparseState::Populating;
        Ok(())
    }

    fn put_unit(&mut self, prefix: &[usize], values: &[T]) -> NdResult<()> {
        let unit = self.space.sub_space(prefix.len());
        let mut coords: Coords = prefix.iter().copied().collect();
        coords.resize(self.space.rank(), 0);
        for &value in values {
            if value != self.default_value {
                self.indices.push(coords.clone());
                self.values.push(value);
            }
            unit.increment_coordinates(&mut coords[prefix.len()..]);
        }
        Ok(())
    }

    fn seal(&mut self) {
        self.state = SparseState::Populated { sorted: true };
        debug!(nnz = self.nnz(), shape = %self.space.shape(), "sealed sparse array");
    }
}
