//! Index expressions used to slice arrays
//!
//! An index expression selects coordinates along one dimension. A sequence of
//! expressions, one per leading dimension, is applied with
//! [`DimensionalSpace::map_to`](crate::DimensionalSpace::map_to); dimensions
//! without an expression are taken whole.
//!
//! | expression                 | result dimension                         |
//! |----------------------------|------------------------------------------|
//! | [`all()`]                  | unchanged                                |
//! | [`at(i)`](at)              | dropped, rank decreases by one           |
//! | [`range(start, end)`]      | `end - start` elements                   |
//! | [`range_step(s, e, step)`] | `⌈(e - s) / step⌉` elements, stride×step |
//!
//! # Examples
//!
//! ```
//! use ndspace_core::index::{all, at, range_step};
//! use ndspace_core::{DimensionalSpace, Shape};
//!
//! let space = DimensionalSpace::create(&Shape::new(&[4, 6]).unwrap());
//! let sub = space.map_to(&[at(1), range_step(0, 6, 2)]).unwrap();
//! assert_eq!(sub.sizes(), &[3]);
//! assert_eq!(sub.position_of(&[2]).unwrap(), 6 + 4);
//!
//! let same = space.map_to(&[all()]).unwrap();
//! assert_eq!(same.sizes(), &[4, 6]);
//! ```

use crate::error::{NdError, NdResult};
use std::fmt;

/// Selection along one dimension. Pure data, no hidden state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Index {
    /// Every coordinate of the dimension
    All,
    /// A single coordinate; the dimension is removed from the result
    At(usize),
    /// Coordinates `start, start + step, ...` strictly below `end`
    ///
    /// An `end` of `None` stands for the size of the dimension.
    Range {
        start: usize,
        end: Option<usize>,
        step: usize,
    },
}

/// Every coordinate of a dimension.
pub fn all() -> Index {
    Index::All
}

/// A single coordinate of a dimension.
pub fn at(index: usize) -> Index {
    Index::At(index)
}

/// Coordinates in `start..end`.
pub fn range(start: usize, end: usize) -> Index {
    range_step(start, end, 1)
}

/// Coordinates in `start..end` taking every `step`-th one.
pub fn range_step(start: usize, end: usize, step: usize) -> Index {
    Index::Range {
        start,
        end: Some(end),
        step,
    }
}

/// Coordinates from `start` to the end of the dimension.
pub fn range_from(start: usize) -> Index {
    Index::Range {
        start,
        end: None,
        step: 1,
    }
}

/// Coordinates from the beginning of the dimension up to `end`.
pub fn range_to(end: usize) -> Index {
    range(0, end)
}

/// An index expression resolved against the size of its dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolved {
    Fixed(usize),
    Span {
        start: usize,
        len: usize,
        step: usize,
    },
}

impl Index {
    /// Resolve the expression against dimension `dim` of size `size`.
    pub(crate) fn resolve(&self, dim: usize, size: usize) -> NdResult<Resolved> {
        match *self {
            Index::All => Ok(Resolved::Span {
                start: 0,
                len: size,
                step: 1,
            }),
            Index::At(i) => {
                if i >= size {
                    return Err(NdError::invalid_argument(format!(
                        "index {} exceeds dimension {} of size {}",
                        i, dim, size
                    )));
                }
                Ok(Resolved::Fixed(i))
            }
            Index::Range { start, end, step } => {
                let end = end.unwrap_or(size);
                if step == 0 {
                    return Err(NdError::invalid_argument(format!(
                        "{} has a zero step",
                        self
                    )));
                }
                if end > size || start > end {
                    return Err(NdError::invalid_argument(format!(
                        "{} exceeds dimension {} of size {}",
                        self, dim, size
                    )));
                }
                Ok(Resolved::Span {
                    start,
                    len: (end - start).div_ceil(step),
                    step,
                })
            }
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::All => write!(f, "all()"),
            Index::At(i) => write!(f, "at({})", i),
            Index::Range {
                start,
                end: Some(end),
                step,
            } => write!(f, "range({}, {}, {})", start, end, step),
            Index::Range {
                start,
                end: None,
                step,
            } => write!(f, "range({}.., {})", start, step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_all() {
        assert_eq!(
            all().resolve(0, 5).unwrap(),
            Resolved::Span {
                start: 0,
                len: 5,
                step: 1
            }
        );
    }

    #[test]
    fn test_resolve_strided_range_rounds_up() {
        // 1, 3, 5 lie in 1..6
        assert_eq!(
            range_step(1, 6, 2).resolve(0, 8).unwrap(),
            Resolved::Span {
                start: 1,
                len: 3,
                step: 2
            }
        );
    }

    #[test]
    fn test_resolve_open_ranges() {
        assert_eq!(
            range_from(2).resolve(0, 5).unwrap(),
            Resolved::Span {
                start: 2,
                len: 3,
                step: 1
            }
        );
        assert_eq!(
            range_to(2).resolve(0, 5).unwrap(),
            Resolved::Span {
                start: 0,
                len: 2,
                step: 1
            }
        );
    }

    #[test]
    fn test_resolve_rejects_out_of_bounds() {
        assert!(at(5).resolve(0, 5).is_err());
        assert!(range(2, 6).resolve(0, 5).is_err());
        assert!(range(4, 2).resolve(0, 5).is_err());
        assert!(range_step(0, 4, 0).resolve(0, 5).is_err());
    }

    #[test]
    fn test_empty_range_is_allowed() {
        assert_eq!(
            range(3, 3).resolve(0, 5).unwrap(),
            Resolved::Span {
                start: 3,
                len: 0,
                step: 1
            }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(at(3).to_string(), "at(3)");
        assert_eq!(range_step(0, 8, 2).to_string(), "range(0, 8, 2)");
    }
}
