//! # ndspace - N-dimensional arrays over one addressing engine
//!
//! This is the **meta crate** that re-exports the ndspace components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use ndspace::prelude::*;
//!
//! let array = DenseArray::<f64>::zeros(Shape::new(&[10, 20, 30])?);
//! assert_eq!(array.shape().dims(), &[10, 20, 30]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Addressing and dense arrays ([`core`])
//!
//! Dimensional spaces, index expressions, position iteration, dense arrays
//! with views sharing their storage, and the hydration protocol.
//!
//! ```
//! use ndspace::core::index::{all, at};
//! use ndspace::core::{DenseArray, NdArray, Shape, Sliceable};
//!
//! let array = DenseArray::from_vec((0..6).collect(), Shape::new(&[2, 3]).unwrap()).unwrap();
//! let column = array.slice(&[all(), at(1)]).unwrap();
//! assert_eq!(column.to_vec().unwrap(), vec![1, 4]);
//! ```
//!
//! ### Sparse arrays ([`sparse`])
//!
//! COO storage, sorting, read-only windows and single population.
//!
//! ```
//! use ndspace::prelude::*;
//!
//! let sparse = SparseArray::init(Shape::new(&[3, 3]).unwrap(), 0, |init| {
//!     init.skip_to(&[1, 1])?.by_scalars().put(5)?;
//!     Ok(())
//! })
//! .unwrap();
//! assert_eq!(sparse.nnz(), 1);
//! assert_eq!(sparse.slice(&[at(1)]).unwrap().to_vec().unwrap(), vec![0, 5, 0]);
//! ```
//!
//! ## Features
//!
//! - `tracing`: install a subscriber with [`tracing_support::init_tracing`]
//! - `serde`: serialize shapes, spaces and index expressions

#![deny(warnings)]

// Re-export all components
pub use ndspace_core as core;
pub use ndspace_sparse as sparse;

pub mod tracing_support;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use ndspace::prelude::*;
    //!
    //! let space = DimensionalSpace::create(&Shape::new(&[4, 5]).unwrap());
    //! let view = space.map_to(&[range(1, 3), all()]).unwrap();
    //! assert_eq!(view.offset(), 5);
    //! ```

    // Addressing
    pub use crate::core::index::{all, at, range, range_from, range_step, range_to, Index};
    pub use crate::core::{DimensionalSpace, PositionIter, Shape};

    // Arrays
    pub use crate::core::{DataBuffer, DenseArray, NdArray, NdArrayMut, Sliceable};

    // Population
    pub use crate::core::{HydrationTarget, Hydrator, Initializer};

    // Errors
    pub use crate::core::{NdError, NdResult};

    // Sparse types
    pub use crate::sparse::{SparseArray, SparseState, SparseWindow};
}
