//! Forward-only sequential population of freshly allocated arrays
//!
//! Both protocols write an array one *unit* at a time, where the unit rank
//! says how many trailing dimensions one unit spans:
//!
//! | cursor            | unit rank | `put` accepts                               |
//! |-------------------|-----------|---------------------------------------------|
//! | [`ScalarCursor`]  | 0         | one value                                   |
//! | [`VectorCursor`]  | 1         | `1..=last dimension` values                 |
//! | [`ElementCursor`] | any       | an array shaped like the unit               |
//!
//! Every `put` writes at the cursor and advances it by one unit in row-major
//! order. Cursors only move forward: repositioning with `at` (or
//! [`Initializer::skip_to`]) to a coordinate before the current one fails
//! with `InvalidArgument`, which keeps the written units sorted.
//!
//! - **Hydration** ([`HydrationTarget::hydrate`]) takes an explicit starting
//!   coordinate for every cursor.
//! - **Initialization** ([`Initializer`]) continues where the previous cursor
//!   stopped, rounded up to the next whole unit.
//!
//! Dropping the [`Hydrator`] or [`Initializer`] ends the population and seals
//! the target.
//!
//! # Examples
//!
//! ```
//! use ndspace_core::{DenseArray, HydrationTarget, NdArray, Shape};
//!
//! let mut array = DenseArray::<i32>::zeros(Shape::new(&[3, 2]).unwrap());
//! {
//!     let mut hydrator = array.hydrate().unwrap();
//!     let mut scalars = hydrator.by_scalars(&[0, 0]).unwrap();
//!     scalars.put(10).unwrap().put(20).unwrap().put(30).unwrap();
//!     scalars.at(&[2, 1]).unwrap().put(40).unwrap();
//! }
//! assert_eq!(array.to_vec().unwrap(), vec![10, 20, 30, 0, 0, 40]);
//! ```

use crate::array::{check_same_shape, NdArray};
use crate::error::{NdError, NdResult};
use crate::space::DimensionalSpace;
use crate::types::{Coords, Element};
use std::marker::PhantomData;
use tracing::{debug, trace};

/// Arrays that can be populated unit by unit.
pub trait HydrationTarget<T: Element>: Sized {
    /// Space in which units are addressed.
    fn hydration_space(&self) -> &DimensionalSpace;

    /// Called once before the first unit is written.
    ///
    /// # Errors
    ///
    /// `ReadOnly` when the target cannot be populated any more.
    fn begin_hydration(&mut self) -> NdResult<()> {
        Ok(())
    }

    /// Write `values` in row-major order from the first scalar of the unit
    /// addressed by `prefix`.
    ///
    /// Callers guarantee that `prefix` is in range, that `values` fits in the
    /// unit and that units arrive in non-decreasing row-major order.
    fn put_unit(&mut self, prefix: &[usize], values: &[T]) -> NdResult<()>;

    /// Called once when the population ends.
    fn seal(&mut self) {}

    /// Start hydrating this array.
    fn hydrate(&mut self) -> NdResult<Hydrator<'_, T, Self>> {
        Hydrator::new(self)
    }
}

/// Cursor state shared by every unit cursor of one population.
struct Population<'a, T: Element, A: HydrationTarget<T>> {
    target: &'a mut A,
    space: DimensionalSpace,
    /// Full-rank coordinate of the next scalar to write
    next: Coords,
    exhausted: bool,
    _marker: PhantomData<T>,
}

impl<'a, T: Element, A: HydrationTarget<T>> Population<'a, T, A> {
    fn new(target: &'a mut A) -> NdResult<Self> {
        target.begin_hydration()?;
        let space = target.hydration_space().clone();
        debug!(shape = %space.shape(), "population started");
        Ok(Self {
            next: Coords::from_elem(0, space.rank()),
            exhausted: space.size() == 0,
            space,
            target,
            _marker: PhantomData,
        })
    }

    fn depth(&self, unit_rank: usize) -> NdResult<usize> {
        self.space.rank().checked_sub(unit_rank).ok_or_else(|| {
            NdError::invalid_argument(format!(
                "unit rank {} exceeds rank {}",
                unit_rank,
                self.space.rank()
            ))
        })
    }

    /// Move to the unit addressed by `prefix`, never backward.
    fn move_to(&mut self, prefix: &[usize], unit_rank: usize) -> NdResult<()> {
        let depth = self.depth(unit_rank)?;
        if prefix.len() != depth {
            return Err(NdError::rank_mismatch(depth, prefix.len()));
        }
        self.space.position_of_prefix(prefix)?;
        let mut coords: Coords = prefix.iter().copied().collect();
        coords.resize(self.space.rank(), 0);
        if self.exhausted {
            return Err(NdError::invalid_argument(format!(
                "cannot move to {:?}: every unit has been written",
                prefix
            )));
        }
        if coords.as_slice() < self.next.as_slice() {
            return Err(NdError::invalid_argument(format!(
                "cannot move backward from {:?} to {:?}",
                self.next.as_slice(),
                coords.as_slice()
            )));
        }
        trace!(from = ?self.next.as_slice(), to = ?coords.as_slice(), "cursor moved");
        self.next = coords;
        Ok(())
    }

    /// Round the cursor up to the next boundary of a unit of `unit_rank`.
    fn align(&mut self, unit_rank: usize) -> NdResult<()> {
        let depth = self.depth(unit_rank)?;
        if self.exhausted || self.next[depth..].iter().all(|&c| c == 0) {
            return Ok(());
        }
        self.next[depth..].fill(0);
        self.exhausted = !self.space.increment_coordinates(&mut self.next[..depth]);
        Ok(())
    }

    fn put(&mut self, unit_rank: usize, values: &[T]) -> NdResult<()> {
        if self.exhausted {
            return Err(NdError::invalid_argument("every unit has been written"));
        }
        let depth = self.space.rank() - unit_rank;
        self.target.put_unit(&self.next[..depth], values)?;
        self.exhausted = !self.space.increment_coordinates(&mut self.next[..depth]);
        Ok(())
    }

    fn unit_rank_of(&self, depth: usize) -> usize {
        self.space.rank() - depth
    }
}

impl<T: Element, A: HydrationTarget<T>> Drop for Population<'_, T, A> {
    fn drop(&mut self) {
        self.target.seal();
        debug!(exhausted = self.exhausted, "population finished");
    }
}

/// Hydration of an array, started with [`HydrationTarget::hydrate`].
///
/// Every cursor starts at an explicit coordinate whose length selects the
/// unit: `rank` components for scalars, `rank - 1` for vectors, any prefix for
/// elements.
pub struct Hydrator<'a, T: Element, A: HydrationTarget<T>> {
    population: Population<'a, T, A>,
}

impl<'a, T: Element, A: HydrationTarget<T>> Hydrator<'a, T, A> {
    /// Start hydrating `target`.
    ///
    /// # Errors
    ///
    /// `ReadOnly` if the target refuses to be populated.
    pub fn new(target: &'a mut A) -> NdResult<Self> {
        Ok(Self {
            population: Population::new(target)?,
        })
    }

    /// Write scalar by scalar from `start`.
    pub fn by_scalars(&mut self, start: &[usize]) -> NdResult<ScalarCursor<'_, 'a, T, A>> {
        self.population.move_to(start, 0)?;
        Ok(ScalarCursor {
            population: &mut self.population,
        })
    }

    /// Write innermost vector by innermost vector from `start`.
    pub fn by_vectors(&mut self, start: &[usize]) -> NdResult<VectorCursor<'_, 'a, T, A>> {
        self.population.move_to(start, 1)?;
        Ok(VectorCursor {
            population: &mut self.population,
        })
    }

    /// Write element by element from `start`; each element spans the
    /// dimensions not fixed by `start`.
    pub fn by_elements(&mut self, start: &[usize]) -> NdResult<ElementCursor<'_, 'a, T, A>> {
        if start.len() > self.population.space.rank() {
            return Err(NdError::rank_mismatch(
                self.population.space.rank(),
                start.len(),
            ));
        }
        let unit_rank = self.population.unit_rank_of(start.len());
        self.population.move_to(start, unit_rank)?;
        Ok(ElementCursor {
            population: &mut self.population,
            unit_rank,
        })
    }

    /// Coordinate of the next scalar to be written.
    pub fn position(&self) -> &[usize] {
        &self.population.next
    }

    /// End the hydration.
    pub fn finish(self) {}
}

/// Initialization of a freshly created array.
///
/// Cursors continue from where the previous one stopped, rounded up to the
/// next whole unit of their own rank.
///
/// ```
/// use ndspace_core::{DenseArray, NdArray, Shape};
///
/// let array = DenseArray::<i32>::init(Shape::new(&[3, 3]).unwrap(), |init| {
///     init.by_scalars().put(1)?;
///     // Rest of row 0 is skipped
///     init.by_vectors()?.put(&[4, 5, 6])?;
///     init.skip_to(&[2, 2])?.by_scalars().put(9)?;
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(array.to_vec().unwrap(), vec![1, 0, 0, 4, 5, 6, 0, 0, 9]);
/// ```
pub struct Initializer<'a, T: Element, A: HydrationTarget<T>> {
    population: Population<'a, T, A>,
}

impl<'a, T: Element, A: HydrationTarget<T>> Initializer<'a, T, A> {
    /// Start initializing `target`.
    ///
    /// # Errors
    ///
    /// `ReadOnly` if the target refuses to be populated.
    pub fn new(target: &'a mut A) -> NdResult<Self> {
        Ok(Self {
            population: Population::new(target)?,
        })
    }

    /// Continue scalar by scalar.
    pub fn by_scalars(&mut self) -> ScalarCursor<'_, 'a, T, A> {
        ScalarCursor {
            population: &mut self.population,
        }
    }

    /// Continue vector by vector from the next whole vector.
    pub fn by_vectors(&mut self) -> NdResult<VectorCursor<'_, 'a, T, A>> {
        self.population.align(1)?;
        Ok(VectorCursor {
            population: &mut self.population,
        })
    }

    /// Continue with elements spanning the last `unit_rank` dimensions.
    pub fn by_elements(&mut self, unit_rank: usize) -> NdResult<ElementCursor<'_, 'a, T, A>> {
        self.population.align(unit_rank)?;
        Ok(ElementCursor {
            population: &mut self.population,
            unit_rank,
        })
    }

    /// Skip forward to `coords`, a full coordinate or a prefix addressing the
    /// first scalar of a sub-element.
    pub fn skip_to(&mut self, coords: &[usize]) -> NdResult<&mut Self> {
        if coords.len() > self.population.space.rank() {
            return Err(NdError::rank_mismatch(
                self.population.space.rank(),
                coords.len(),
            ));
        }
        let unit_rank = self.population.unit_rank_of(coords.len());
        self.population.move_to(coords, unit_rank)?;
        Ok(self)
    }

    /// Coordinate of the next scalar to be written.
    pub fn position(&self) -> &[usize] {
        &self.population.next
    }
}

/// Writes one scalar per `put`.
pub struct ScalarCursor<'p, 'a, T: Element, A: HydrationTarget<T>> {
    population: &'p mut Population<'a, T, A>,
}

impl<T: Element, A: HydrationTarget<T>> ScalarCursor<'_, '_, T, A> {
    /// Move forward to the scalar at `coords`.
    pub fn at(&mut self, coords: &[usize]) -> NdResult<&mut Self> {
        self.population.move_to(coords, 0)?;
        Ok(self)
    }

    /// Write `value` and advance to the next scalar.
    pub fn put(&mut self, value: T) -> NdResult<&mut Self> {
        self.population.put(0, &[value])?;
        Ok(self)
    }

    /// Coordinate of the next scalar.
    pub fn coords(&self) -> &[usize] {
        &self.population.next
    }
}

/// Writes one innermost vector per `put`.
pub struct VectorCursor<'p, 'a, T: Element, A: HydrationTarget<T>> {
    population: &'p mut Population<'a, T, A>,
}

impl<T: Element, A: HydrationTarget<T>> VectorCursor<'_, '_, T, A> {
    /// Move forward to the vector addressed by `coords`, one component per
    /// dimension but the last.
    pub fn at(&mut self, coords: &[usize]) -> NdResult<&mut Self> {
        self.population.move_to(coords, 1)?;
        Ok(self)
    }

    /// Write `values` from the start of the vector and advance to the next
    /// one. Trailing scalars of a short vector are left untouched.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `values` is empty or longer than the last
    /// dimension.
    pub fn put(&mut self, values: &[T]) -> NdResult<&mut Self> {
        let space = &self.population.space;
        let len = space.sizes().last().copied().unwrap_or(0);
        if values.is_empty() || values.len() > len {
            return Err(NdError::invalid_argument(format!(
                "vector of {} values does not fit a dimension of size {}",
                values.len(),
                len
            )));
        }
        self.population.put(1, values)?;
        Ok(self)
    }

    /// Coordinate of the first scalar of the next vector.
    pub fn coords(&self) -> &[usize] {
        &self.population.next
    }
}

/// Writes one sub-element per `put`.
pub struct ElementCursor<'p, 'a, T: Element, A: HydrationTarget<T>> {
    population: &'p mut Population<'a, T, A>,
    unit_rank: usize,
}

impl<T: Element, A: HydrationTarget<T>> ElementCursor<'_, '_, T, A> {
    /// Move forward to the element addressed by the prefix `coords`.
    pub fn at(&mut self, coords: &[usize]) -> NdResult<&mut Self> {
        self.population.move_to(coords, self.unit_rank)?;
        Ok(self)
    }

    /// Copy `element` into the unit and advance to the next one.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `element` has the shape of the unit.
    pub fn put<E>(&mut self, element: &E) -> NdResult<&mut Self>
    where
        E: NdArray<T> + ?Sized,
    {
        let space = &self.population.space;
        let unit = space.sub_space(space.rank() - self.unit_rank).shape();
        check_same_shape(&unit, &element.shape())?;
        let values = element.to_vec()?;
        self.population.put(self.unit_rank, &values)?;
        Ok(self)
    }

    /// Number of trailing dimensions spanned by one element.
    pub fn unit_rank(&self) -> usize {
        self.unit_rank
    }

    /// Coordinate of the first scalar of the next element.
    pub fn coords(&self) -> &[usize] {
        &self.population.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseArray;
    use crate::types::Shape;

    fn zeros(dims: &[usize]) -> DenseArray<i32> {
        DenseArray::zeros(Shape::new(dims).unwrap())
    }

    #[test]
    fn test_hydrate_by_scalars_with_jump() {
        let mut array = zeros(&[3, 2]);
        let mut hydrator = array.hydrate().unwrap();
        let mut scalars = hydrator.by_scalars(&[0, 0]).unwrap();
        scalars.put(10).unwrap().put(20).unwrap().put(30).unwrap();
        scalars.at(&[2, 1]).unwrap().put(40).unwrap();
        drop(hydrator);
        assert_eq!(array.to_vec().unwrap(), vec![10, 20, 30, 0, 0, 40]);
    }

    #[test]
    fn test_cannot_move_backward() {
        let mut array = zeros(&[3, 2]);
        let mut hydrator = array.hydrate().unwrap();
        let mut scalars = hydrator.by_scalars(&[1, 0]).unwrap();
        scalars.put(1).unwrap();
        assert!(matches!(
            scalars.at(&[1, 0]),
            Err(NdError::InvalidArgument { .. })
        ));
        // Same coordinate as the cursor is allowed
        assert!(scalars.at(&[1, 1]).is_ok());
        assert!(hydrator.by_vectors(&[0]).is_err());
        assert!(hydrator.by_vectors(&[2]).is_ok());
    }

    #[test]
    fn test_repositioning_validates_coordinates() {
        let mut array = zeros(&[3, 2]);
        let mut hydrator = array.hydrate().unwrap();
        assert!(matches!(
            hydrator.by_scalars(&[0]),
            Err(NdError::InvalidArgument { .. })
        ));
        assert!(matches!(
            hydrator.by_scalars(&[3, 0]),
            Err(NdError::IndexOutOfRange { .. })
        ));
        assert!(hydrator.by_elements(&[0, 0, 0]).is_err());
    }

    #[test]
    fn test_hydrate_by_vectors() {
        let mut array = zeros(&[2, 3]);
        let mut hydrator = array.hydrate().unwrap();
        let mut vectors = hydrator.by_vectors(&[0]).unwrap();
        vectors.put(&[1, 2, 3]).unwrap();
        assert!(vectors.put(&[]).is_err());
        assert!(vectors.put(&[1, 2, 3, 4]).is_err());
        vectors.put(&[4]).unwrap();
        assert!(matches!(
            vectors.put(&[5]),
            Err(NdError::InvalidArgument { .. })
        ));
        hydrator.finish();
        assert_eq!(array.to_vec().unwrap(), vec![1, 2, 3, 4, 0, 0]);
    }

    #[test]
    fn test_hydrate_by_elements() {
        let mut array = zeros(&[3, 2, 2]);
        let block = DenseArray::from_vec(vec![1, 2, 3, 4], Shape::new(&[2, 2]).unwrap()).unwrap();
        let mut hydrator = array.hydrate().unwrap();
        let mut elements = hydrator.by_elements(&[1]).unwrap();
        assert_eq!(elements.unit_rank(), 2);
        elements.put(&block).unwrap().put(&block).unwrap();
        let wrong = zeros(&[4]);
        assert!(elements.put(&wrong).is_err());
        hydrator.finish();
        let values = array.to_vec().unwrap();
        assert_eq!(&values[..4], &[0, 0, 0, 0]);
        assert_eq!(&values[4..], &[1, 2, 3, 4, 1, 2, 3, 4]);
    }

    #[test]
    fn test_rejected_put_leaves_array_untouched() {
        let mut array = zeros(&[2, 2]);
        {
            let mut hydrator = array.hydrate().unwrap();
            let mut vectors = hydrator.by_vectors(&[0]).unwrap();
            assert!(vectors.put(&[1, 2, 3]).is_err());
            assert_eq!(vectors.coords(), &[0, 0]);
        }
        assert_eq!(array.to_vec().unwrap(), vec![0; 4]);
    }

    #[test]
    fn test_initializer_rounds_up_to_unit() {
        let mut array = zeros(&[2, 2, 3]);
        {
            let mut init = Initializer::new(&mut array).unwrap();
            init.by_scalars().put(1).unwrap();
            assert_eq!(init.position(), &[0, 0, 1]);
            init.by_vectors().unwrap().put(&[2, 2]).unwrap();
            assert_eq!(init.position(), &[1, 0, 0]);
            init.by_scalars().put(3).unwrap();
            init.by_elements(1).unwrap();
            assert_eq!(init.position(), &[1, 1, 0]);
            assert!(init.skip_to(&[0, 1]).is_err());
            init.skip_to(&[1, 1, 2]).unwrap().by_scalars().put(9).unwrap();
            assert!(init.by_scalars().put(10).is_err());
        }
        let values = array.to_vec().unwrap();
        assert_eq!(values[0], 1);
        assert_eq!(&values[3..6], &[2, 2, 0]);
        assert_eq!(values[6], 3);
        assert_eq!(values[11], 9);
    }

    #[test]
    fn test_scalar_array() {
        let mut array = DenseArray::scalar(0i64);
        {
            let mut hydrator = array.hydrate().unwrap();
            hydrator.by_scalars(&[]).unwrap().put(5).unwrap();
            assert!(hydrator.by_vectors(&[]).is_err());
        }
        assert_eq!(array.get(&[]).unwrap(), 5);
    }

    #[test]
    fn test_empty_array_has_no_unit() {
        let mut array = zeros(&[2, 0]);
        let mut init = Initializer::new(&mut array).unwrap();
        assert!(init.by_scalars().put(1).is_err());
    }
}
