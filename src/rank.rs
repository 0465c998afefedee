/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Static rank queries over shape-like values.
//!
//! A shape-like value is a fixed-arity ordered container of axis
//! extents: an extent array, a small tuple, or an
//! [`Extents`](crate::Extents) descriptor. Its rank is a compile-time
//! property of the type; values of non-shape-like types fail the
//! [`Shape`] bound at compile time rather than at run time.

/// A fixed-rank shape: an ordered sequence of `N` axis extents, with
/// `N` known at compile time.
///
/// The trait is the seam between the index algorithms and whatever the
/// caller uses to describe dimensions. Plain `[usize; N]` arrays,
/// extent tuples up to arity 4, and [`Extents`](crate::Extents) all
/// qualify.
pub trait Shape<const N: usize> {
    /// The per-axis extents, in axis order.
    fn extents(&self) -> [usize; N];
}

impl<const N: usize> Shape<N> for [usize; N] {
    fn extents(&self) -> [usize; N] {
        *self
    }
}

impl Shape<1> for (usize,) {
    fn extents(&self) -> [usize; 1] {
        [self.0]
    }
}

impl Shape<2> for (usize, usize) {
    fn extents(&self) -> [usize; 2] {
        [self.0, self.1]
    }
}

impl Shape<3> for (usize, usize, usize) {
    fn extents(&self) -> [usize; 3] {
        [self.0, self.1, self.2]
    }
}

impl Shape<4> for (usize, usize, usize, usize) {
    fn extents(&self) -> [usize; 4] {
        [self.0, self.1, self.2, self.3]
    }
}

/// The static rank (axis count) of a shape-like value.
///
/// Pure and total: there is no run-time failure mode.
///
/// ```
/// use ndspan::rank;
///
/// assert_eq!(rank(&[4usize, 1, 6]), 3);
/// assert_eq!(rank(&(2usize, 8usize)), 2);
/// ```
pub const fn rank<const N: usize, S: Shape<N>>(_shape: &S) -> usize {
    N
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Extents;

    #[test]
    fn test_rank_of_arrays() {
        assert_eq!(rank(&[10usize]), 1);
        assert_eq!(rank(&[10usize, 11]), 2);
        assert_eq!(rank(&[4usize, 1, 6, 5]), 4);
    }

    #[test]
    fn test_rank_of_tuples() {
        assert_eq!(rank(&(7usize,)), 1);
        assert_eq!(rank(&(3usize, 6usize)), 2);
        assert_eq!(rank(&(2usize, 3usize, 4usize)), 3);
        assert_eq!(rank(&(2usize, 3usize, 4usize, 5usize)), 4);
    }

    #[test]
    fn test_rank_of_extents() {
        let e = Extents::dynamic([4, 1, 6]).unwrap();
        assert_eq!(rank(&e), 3);
    }

    #[test]
    fn test_tuple_extents() {
        assert_eq!((3usize, 6usize).extents(), [3, 6]);
        assert_eq!((2usize, 3usize, 4usize, 5usize).extents(), [2, 3, 4, 5]);
    }
}
