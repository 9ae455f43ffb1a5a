//! Dense array implementation
//!
//! This module provides the dense array organized into functional sub-modules.

// Core type definition
pub mod types;

// Operation modules
mod hydration;
mod indexing;

// Supporting modules
mod dense_traits;

// Re-export the main type
pub use types::DenseArray;
