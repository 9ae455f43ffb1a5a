//! # DenseArray - Trait Implementations
//!
//! ## Implemented Traits
//!
//! - `Debug`
//! - `PartialEq` (shape and values, regardless of storage layout)

use super::types::DenseArray;
use crate::array::NdArray;
use crate::types::Element;
use std::fmt;

impl<T: Element> fmt::Debug for DenseArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("DenseArray");
        s.field("shape", &self.shape())
            .field("offset", &self.space.offset());
        match self.to_vec() {
            Ok(values) => s.field("data", &values),
            Err(e) => s.field("error", &e),
        };
        s.finish()
    }
}

impl<T: Element> PartialEq for DenseArray<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        match (self.to_vec(), other.to_vec()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
