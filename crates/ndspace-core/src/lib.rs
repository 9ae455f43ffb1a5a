//! # ndspace-core
//!
//! Addressing, dense storage and sequential population of N-dimensional arrays.
//!
//! This crate provides the building blocks shared by every array of the ndspace stack:
//!
//! - **Shapes** ([`Shape`]) validated once, at allocation
//! - **Dimensional spaces** ([`DimensionalSpace`]) mapping coordinates to linear storage
//!   positions and deriving relative spaces from [index expressions](index)
//! - **Position iteration** ([`PositionIter`]) over scalars, vectors or sub-elements
//! - **Dense arrays** ([`DenseArray`]) over shared flat storage ([`DataBuffer`])
//! - **Capability traits** ([`NdArray`], [`NdArrayMut`], [`Sliceable`]) implemented by
//!   dense arrays here and by the sparse arrays of `ndspace-sparse`
//! - **Hydration and initialization** ([`hydrate`]): forward-only cursors populating a
//!   fresh array by scalars, vectors or elements
//!
//! ## Quick Start
//!
//! ```
//! use ndspace_core::index::{all, at, range};
//! use ndspace_core::{DenseArray, NdArray, NdArrayMut, Shape, Sliceable};
//!
//! let mut array = DenseArray::<f64>::zeros(Shape::new(&[2, 3, 4]).unwrap());
//! array.set(&[1, 2, 3], 7.0).unwrap();
//!
//! // Views share storage with their array
//! let plane = array.slice(&[at(1), range(1, 3), all()]).unwrap();
//! assert_eq!(plane.shape().dims(), &[2, 4]);
//! assert_eq!(plane.get(&[1, 3]).unwrap(), 7.0);
//! ```
//!
//! ## Addressing
//!
//! Every array and view owns a [`DimensionalSpace`]: sizes, row-major strides and a base
//! offset into storage. Slicing never copies, it only derives a new space:
//!
//! ```
//! use ndspace_core::index::range_step;
//! use ndspace_core::{DimensionalSpace, Shape};
//!
//! let space = DimensionalSpace::create(&Shape::new(&[4, 6]).unwrap());
//! let sub = space.map_to(&[range_step(1, 4, 2), range_step(0, 6, 3)]).unwrap();
//! assert_eq!(sub.sizes(), &[2, 2]);
//! assert_eq!(sub.position_of(&[1, 1]).unwrap(), space.position_of(&[3, 3]).unwrap());
//! ```
//!
//! ## Sequential Population
//!
//! ```
//! use ndspace_core::{DenseArray, NdArray, Shape};
//!
//! let array = DenseArray::<i32>::init(Shape::new(&[2, 2]).unwrap(), |init| {
//!     init.by_vectors()?.put(&[1, 2])?.put(&[3, 4])?;
//!     Ok(())
//! })
//! .unwrap();
//! assert_eq!(array.to_vec().unwrap(), vec![1, 2, 3, 4]);
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`NdResult`]; failures are synchronous and leave no partial state:
//!
//! ```
//! use ndspace_core::{DenseArray, NdArray, NdError, Shape};
//!
//! let array = DenseArray::<f32>::zeros(Shape::new(&[2, 3]).unwrap());
//! assert!(matches!(array.get(&[2, 0]), Err(NdError::IndexOutOfRange { .. })));
//! assert!(matches!(array.get(&[0]), Err(NdError::InvalidArgument { .. })));
//! ```
//!
//! ## Logging
//!
//! Populations emit `tracing` events: `debug` when they start and finish, `trace` when a
//! cursor moves. Install a subscriber (see `ndspace::tracing_support`) to see them.
//!
//! ## Features
//!
//! - `serde`: Serialization of [`Shape`], [`Index`] and [`DimensionalSpace`]

#![deny(warnings)]

pub mod array;
pub mod buffer;
pub mod dense;
pub mod error;
pub mod hydrate;
pub mod index;
pub mod iter;
pub mod space;
pub mod types;


pub use array::{Elements, NdArray, NdArrayMut, Sliceable};
pub use buffer::DataBuffer;
pub use dense::DenseArray;
pub use error::{NdError, NdResult};
pub use hydrate::{
    ElementCursor, HydrationTarget, Hydrator, Initializer, ScalarCursor, VectorCursor,
};
pub use index::Index;
pub use iter::PositionIter;
pub use space::DimensionalSpace;
pub use types::{Axis, Coords, Element, Rank, Shape};
