/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Storage-order stride math and coordinate/offset conversion.
//!
//! A shape laid out in contiguous memory assigns each axis a *stride*:
//! the linear-offset delta for a unit increment along that axis. Given
//! the strides, [`flatten`] maps a multidimensional coordinate to its
//! linear offset (`offset = Σᵢ coordᵢ × strideᵢ`) and [`unflatten`]
//! inverts the mapping. Both are parameterized by [`StorageOrder`] and
//! are pure functions of their inputs.
//!
//! ```
//! use ndspan::flatten;
//! use ndspan::unflatten;
//! use ndspan::StorageOrder;
//!
//! let shape = [4usize, 1, 6, 5];
//! assert_eq!(flatten([1, 0, 3, 2], &shape, StorageOrder::RowMajor), 47);
//! assert_eq!(flatten([1, 0, 3, 2], &shape, StorageOrder::ColMajor), 61);
//! assert_eq!(unflatten(47, &shape, StorageOrder::RowMajor), [1, 0, 3, 2]);
//! ```

use serde::Deserialize;
use serde::Serialize;

use crate::contract::contract_assert;
use crate::num::size_to_index;
use crate::rank::Shape;

/// Memory layout order of a multidimensional array in its flat buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StorageOrder {
    /// Row-major layout (C-style): last axis varies fastest.
    RowMajor,

    /// Column-major layout (Fortran-style): first axis varies fastest.
    ColMajor,
}

/// The per-axis strides of `shape` under `order`.
///
/// Row-major: `stride[i] = ∏ extent[k] for k > i`; column-major:
/// `stride[i] = ∏ extent[k] for k < i`; the empty product is 1.
/// Degenerate axes (extent 0) yield zero strides for the axes that
/// enclose them; that is expected and not an error at this layer.
///
/// ```
/// use ndspan::strides;
/// use ndspan::StorageOrder;
///
/// assert_eq!(strides(&[10usize, 11], StorageOrder::RowMajor), [11, 1]);
/// assert_eq!(strides(&[10usize, 11], StorageOrder::ColMajor), [1, 10]);
/// ```
pub fn strides<const N: usize, S: Shape<N>>(shape: &S, order: StorageOrder) -> [i64; N] {
    let extents = shape.extents();
    let mut strides = [1i64; N];
    match order {
        StorageOrder::RowMajor => {
            for axis in (0..N.saturating_sub(1)).rev() {
                strides[axis] = strides[axis + 1] * size_to_index(extents[axis + 1]);
            }
        }
        StorageOrder::ColMajor => {
            for axis in 1..N {
                strides[axis] = strides[axis - 1] * size_to_index(extents[axis - 1]);
            }
        }
    }
    strides
}

/// The linear offset of `coord` within `shape` under `order`.
///
/// Contract (checked when the contract hook is active): every
/// `coord[i]` lies in `[0, extent_i)`, except that coordinate 0 stays
/// legal on degenerate (extent 0) axes, where the offset is 0.
pub fn flatten<const N: usize, S: Shape<N>>(
    coord: [i64; N],
    shape: &S,
    order: StorageOrder,
) -> i64 {
    let extents = shape.extents();
    for axis in 0..N {
        contract_assert!(
            in_extent(coord[axis], extents[axis]),
            "coordinate {} out of bounds for axis {} of extent {}",
            coord[axis],
            axis,
            extents[axis]
        );
    }
    flatten_with_strides(coord, strides(shape, order))
}

/// The linear offset of `coord` under precomputed `strides`: the fast
/// path for hot loops, agreeing with [`flatten`] whenever the strides
/// were produced by [`strides`] for the same shape and order. Performs
/// no bounds checking of its own.
pub fn flatten_with_strides<const N: usize>(coord: [i64; N], strides: [i64; N]) -> i64 {
    // Dot product Σᵢ coordᵢ × strideᵢ.
    coord
        .iter()
        .zip(strides.iter())
        .map(|(coord, stride)| coord * stride)
        .sum()
}

/// The multidimensional coordinate of linear `offset` within `shape`
/// under `order`: the exact inverse of [`flatten`].
///
/// Contract (checked when the contract hook is active):
/// `0 <= offset < ∏ extents`, except that offset 0 stays legal on
/// degenerate (total 0) shapes, where the result is all zeros.
pub fn unflatten<const N: usize, S: Shape<N>>(
    offset: i64,
    shape: &S,
    order: StorageOrder,
) -> [i64; N] {
    unflatten_with_strides(offset, shape, strides(shape, order), order)
}

/// [`unflatten`] with precomputed `strides`, for hot loops. The strides
/// must have been produced by [`strides`] for the same shape and order.
pub fn unflatten_with_strides<const N: usize, S: Shape<N>>(
    mut offset: i64,
    shape: &S,
    strides: [i64; N],
    order: StorageOrder,
) -> [i64; N] {
    let total = size_to_index(shape.extents().iter().product());
    contract_assert!(
        offset == 0 || (offset >= 0 && offset < total),
        "offset {} out of bounds for shape of {} elements",
        offset,
        total
    );

    // Peel axes in decreasing-stride order: first to last for
    // row-major, last to first for column-major. The traversal must
    // start at the slowest-varying axis or the remainder arithmetic is
    // wrong.
    let mut coord = [0i64; N];
    match order {
        StorageOrder::RowMajor => {
            for axis in 0..N {
                peel(&mut offset, &mut coord[axis], strides[axis]);
            }
        }
        StorageOrder::ColMajor => {
            for axis in (0..N).rev() {
                peel(&mut offset, &mut coord[axis], strides[axis]);
            }
        }
    }
    coord
}

// Zero strides occur only on degenerate shapes, where every coordinate
// is 0.
fn peel(offset: &mut i64, coord: &mut i64, stride: i64) {
    if stride != 0 {
        *coord = *offset / stride;
        *offset -= *coord * stride;
    }
}

// Coordinate 0 is kept legal on extent-0 axes; see `flatten`.
fn in_extent(coord: i64, extent: usize) -> bool {
    coord == 0 || (coord >= 0 && coord < size_to_index(extent))
}

/// Iterates every coordinate of `shape` in `order`, fastest-varying
/// axis innermost. The position of a coordinate in the iteration is
/// exactly its [`flatten`]ed offset.
///
/// ```
/// use ndspan::coord_iter;
/// use ndspan::StorageOrder;
///
/// let coords: Vec<_> = coord_iter(&[2usize, 2], StorageOrder::ColMajor).collect();
/// assert_eq!(coords, [[0, 0], [1, 0], [0, 1], [1, 1]]);
/// ```
pub fn coord_iter<const N: usize, S: Shape<N>>(shape: &S, order: StorageOrder) -> CoordIter<N> {
    let extents = shape.extents();
    CoordIter {
        extents,
        order,
        index: 0,
        total: extents.iter().product(),
    }
}

/// Iterator over all coordinates of a shape in storage order. See
/// [`coord_iter`].
pub struct CoordIter<const N: usize> {
    extents: [usize; N],
    order: StorageOrder,
    index: usize,
    total: usize,
}

impl<const N: usize> Iterator for CoordIter<N> {
    type Item = [i64; N];

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }

        let mut rest = self.index;
        let mut coord = [0i64; N];
        match self.order {
            StorageOrder::RowMajor => {
                for axis in (0..N).rev() {
                    coord[axis] = size_to_index(rest % self.extents[axis]);
                    rest /= self.extents[axis];
                }
            }
            StorageOrder::ColMajor => {
                for axis in 0..N {
                    coord[axis] = size_to_index(rest % self.extents[axis]);
                    rest /= self.extents[axis];
                }
            }
        }
        self.index += 1;
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for CoordIter<N> {}
