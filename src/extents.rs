/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Fixed-rank shape descriptors mixing static and dynamic extents.
//!
//! An [`Extents<N>`] describes an `N`-dimensional index space. Each
//! axis is either *static* (its extent fixed in the pattern the
//! descriptor was specified with) or *dynamic* (marked [`DYNAMIC`] in
//! the pattern, its extent supplied at construction time). The rank is
//! part of the type, so mixing descriptors of different ranks is a
//! compile error rather than a run-time one.

use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use crate::num::index_to_size;
use crate::rank::Shape;

/// Marks an axis whose extent is supplied at construction time rather
/// than fixed in the extent pattern. Also the sentinel for
/// dynamically-sized [`Span`](crate::Span)s.
pub const DYNAMIC: usize = usize::MAX;

/// The type of error for extent-descriptor construction.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExtentsError {
    #[error("expected {expected} dynamic extent values, got {got}")]
    DynamicArityMismatch { expected: usize, got: usize },

    #[error("negative extent {value} for axis {axis}")]
    NegativeExtent { axis: usize, value: i64 },

    #[error("extent {got} contradicts static extent {expected} for axis {axis}")]
    StaticMismatch {
        axis: usize,
        expected: usize,
        got: usize,
    },
}

/// An `N`-dimensional shape whose axes are individually static or
/// dynamic.
///
/// The descriptor is specified by a *pattern*: a `[usize; N]` in which
/// every [`DYNAMIC`] entry marks an axis sized at construction time and
/// every other entry is that axis's fixed extent. Construction takes
/// exactly the dynamic-axis values, in axis order:
///
/// ```
/// use ndspan::Extents;
/// use ndspan::pattern;
///
/// let e = Extents::new(pattern![4, _, 6], &[1]).unwrap();
/// assert_eq!(e.rank(), 3);
/// assert_eq!(e.rank_dynamic(), 1);
/// assert_eq!(e.extents(), [4, 1, 6]);
/// assert_eq!(e.static_extent(0), Some(4));
/// assert_eq!(e.static_extent(1), None);
/// ```
///
/// Two descriptors are equal iff all axis extents are equal; which
/// axes were static or dynamic in either operand does not participate.
#[derive(Debug, Clone, Copy)]
pub struct Extents<const N: usize> {
    pattern: [usize; N],
    extents: [usize; N],
}

impl<const N: usize> Extents<N> {
    /// Creates a descriptor from an extent pattern and the values for
    /// its dynamic axes, in axis order.
    ///
    /// Fails when the value count does not match the number of dynamic
    /// axes, or when any value is negative.
    pub fn new(pattern: [usize; N], values: &[i64]) -> Result<Self, ExtentsError> {
        let expected = pattern.iter().filter(|&&slot| slot == DYNAMIC).count();
        if values.len() != expected {
            return Err(ExtentsError::DynamicArityMismatch {
                expected,
                got: values.len(),
            });
        }

        let mut extents = pattern;
        let mut next = 0;
        for (axis, slot) in extents.iter_mut().enumerate() {
            if *slot == DYNAMIC {
                let value = values[next];
                next += 1;
                if value < 0 {
                    return Err(ExtentsError::NegativeExtent { axis, value });
                }
                *slot = index_to_size(value);
            }
        }
        Ok(Self { pattern, extents })
    }

    /// Creates a fully dynamic descriptor from `N` extent values.
    pub fn dynamic(values: [i64; N]) -> Result<Self, ExtentsError> {
        Self::new([DYNAMIC; N], &values)
    }

    /// Respecifies this descriptor under a different extent pattern of
    /// the same rank. (Differing ranks are rejected by the type
    /// system.)
    ///
    /// Fails when a static slot in `pattern` contradicts the
    /// corresponding extent of `self`.
    pub fn with_pattern(&self, pattern: [usize; N]) -> Result<Self, ExtentsError> {
        for (axis, &slot) in pattern.iter().enumerate() {
            if slot != DYNAMIC && slot != self.extents[axis] {
                return Err(ExtentsError::StaticMismatch {
                    axis,
                    expected: slot,
                    got: self.extents[axis],
                });
            }
        }
        Ok(Self {
            pattern,
            extents: self.extents,
        })
    }

    /// The total axis count.
    pub const fn rank(&self) -> usize {
        N
    }

    /// The number of dynamic axes.
    pub fn rank_dynamic(&self) -> usize {
        self.pattern.iter().filter(|&&slot| slot == DYNAMIC).count()
    }

    /// The size along `axis`.
    pub fn extent(&self, axis: usize) -> usize {
        self.extents[axis]
    }

    /// The pattern-level extent of `axis`: `Some` for a static axis,
    /// `None` for a dynamic one.
    pub fn static_extent(&self, axis: usize) -> Option<usize> {
        (self.pattern[axis] != DYNAMIC).then(|| self.pattern[axis])
    }

    /// All axis extents, in axis order.
    pub fn extents(&self) -> [usize; N] {
        self.extents
    }

    /// The total element count of the described index space.
    pub fn total(&self) -> usize {
        self.extents.iter().product()
    }
}

impl<const N: usize> Shape<N> for Extents<N> {
    fn extents(&self) -> [usize; N] {
        self.extents
    }
}

impl<const N: usize> PartialEq for Extents<N> {
    fn eq(&self, other: &Self) -> bool {
        // Resolved extents only; the static/dynamic split of either
        // operand is not observable through equality.
        self.extents == other.extents
    }
}

impl<const N: usize> Eq for Extents<N> {}

impl<const N: usize> Hash for Extents<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.extents.hash(state);
    }
}

impl<const N: usize> fmt::Display for Extents<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (axis, extent) in self.extents.iter().enumerate() {
            if axis > 0 {
                write!(f, "x")?;
            }
            write!(f, "{}", extent)?;
        }
        Ok(())
    }
}

/// Builds an extent pattern, with `_` marking dynamic axes.
///
/// ```
/// use ndspan::DYNAMIC;
/// use ndspan::pattern;
///
/// assert_eq!(pattern![4, _, 6], [4, DYNAMIC, 6]);
/// ```
#[macro_export]
macro_rules! pattern {
    (@axis _) => { $crate::DYNAMIC };
    (@axis $extent:expr) => { $extent };
    [$($axis:tt),* $(,)?] => {
        [$($crate::pattern!(@axis $axis)),*]
    };
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_fully_dynamic() {
        let e = Extents::dynamic([3, 6]).unwrap();
        assert_eq!(e.rank(), 2);
        assert_eq!(e.rank_dynamic(), 2);
        assert_eq!(e.extents(), [3, 6]);
        assert_eq!(e.extent(0), 3);
        assert_eq!(e.extent(1), 6);
        assert_eq!(e.static_extent(0), None);
        assert_eq!(e.total(), 18);
    }

    #[test]
    fn test_fully_static() {
        let e = Extents::new([4, 1, 6, 5], &[]).unwrap();
        assert_eq!(e.rank(), 4);
        assert_eq!(e.rank_dynamic(), 0);
        assert_eq!(e.extents(), [4, 1, 6, 5]);
        assert_eq!(e.static_extent(2), Some(6));
        assert_eq!(e.total(), 120);
    }

    #[test]
    fn test_mixed_pattern() {
        let e = Extents::new(pattern![10, _, 12, _], &[11, 13]).unwrap();
        assert_eq!(e.extents(), [10, 11, 12, 13]);
        assert_eq!(e.rank_dynamic(), 2);
        assert_eq!(e.static_extent(1), None);
        assert_eq!(e.static_extent(2), Some(12));
    }

    #[test]
    fn test_arity_mismatch() {
        assert!(matches!(
            Extents::new(pattern![4, _, 6], &[1, 2]),
            Err(ExtentsError::DynamicArityMismatch {
                expected: 1,
                got: 2
            })
        ));
        assert!(matches!(
            Extents::new(pattern![_, _], &[1]),
            Err(ExtentsError::DynamicArityMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_negative_extent() {
        assert!(matches!(
            Extents::new(pattern![4, _, 6], &[-2]),
            Err(ExtentsError::NegativeExtent { axis: 1, value: -2 })
        ));
    }

    #[test]
    fn test_zero_extent_is_valid() {
        let e = Extents::dynamic([2, 0, 3]).unwrap();
        assert_eq!(e.total(), 0);
    }

    #[test]
    fn test_with_pattern() {
        let e = Extents::dynamic([4, 1, 6]).unwrap();

        let s = e.with_pattern(pattern![4, _, 6]).unwrap();
        assert_eq!(s.extents(), [4, 1, 6]);
        assert_eq!(s.rank_dynamic(), 1);
        assert_eq!(s, e);

        assert!(matches!(
            e.with_pattern(pattern![4, 2, 6]),
            Err(ExtentsError::StaticMismatch {
                axis: 1,
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_equality_ignores_split() {
        let dynamic = Extents::dynamic([4, 1, 6]).unwrap();
        let fixed = Extents::new([4, 1, 6], &[]).unwrap();
        let mixed = Extents::new(pattern![4, _, 6], &[1]).unwrap();
        assert_eq!(dynamic, fixed);
        assert_eq!(dynamic, mixed);
        assert_ne!(dynamic, Extents::new([4, 2, 6], &[]).unwrap());

        // Hash agrees with equality.
        let set: HashSet<Extents<3>> = [dynamic, fixed, mixed].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_display() {
        let e = Extents::new(pattern![4, _, 6, _], &[1, 5]).unwrap();
        assert_eq!(e.to_string(), "4x1x6x5");
    }
}
