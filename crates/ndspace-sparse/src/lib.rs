//! # ndspace-sparse
//!
//! Coordinate-list (COO) sparse arrays for ndspace.
//!
//! This crate provides:
//! - [`SparseArray`]: entries differing from a default value, stored as coordinate tuples
//!   and parallel values, over a shape of any rank
//! - Dense ⇄ sparse conversion in a single row-major pass
//! - Sorting of entries by coordinate, and lookups bounded by the sort order
//! - [`SparseWindow`]: read-only views of a region of a sparse array, without copies
//! - Population of empty sparse arrays through the hydration and initialization
//!   cursors of `ndspace-core`
//!
//! Sparse arrays are populated once and read-only afterwards.
//!
//! ```
//! use ndspace_core::index::{at, range};
//! use ndspace_core::{HydrationTarget, NdArray, Shape, Sliceable};
//! use ndspace_sparse::SparseArray;
//!
//! let mut sparse = SparseArray::create(Shape::new(&[3, 2]).unwrap(), 0);
//! {
//!     let mut hydrator = sparse.hydrate().unwrap();
//!     let mut scalars = hydrator.by_scalars(&[0, 0]).unwrap();
//!     scalars.put(10).unwrap().put(20).unwrap().put(30).unwrap();
//!     scalars.at(&[2, 1]).unwrap().put(40).unwrap();
//! }
//! assert_eq!(sparse.nnz(), 4);
//!
//! let column = sparse.slice(&[range(1, 3), at(1)]).unwrap();
//! assert_eq!(column.to_vec().unwrap(), vec![0, 40]);
//! ```

#![deny(warnings)]

pub mod coo;
pub mod window;

// Re-exports
pub use coo::{SparseArray, SparseState};
pub use window::SparseWindow;
