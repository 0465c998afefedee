/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Named conversions between the two numeric domains used at the crate
//! boundary: `usize` for raw sizes and extents, `i64` for coordinates,
//! offsets, and strides. All narrowing goes through these functions;
//! there is no implicit narrowing elsewhere in the public surface.

use crate::contract::contract_assert;

/// Narrows a raw size into the signed index domain.
///
/// Contract: the value is representable as an `i64`.
pub fn size_to_index(n: usize) -> i64 {
    contract_assert!(
        i64::try_from(n).is_ok(),
        "size {} is not representable as an index",
        n
    );
    n as i64
}

/// Narrows a signed index into the raw size domain.
///
/// Contract: the value is non-negative.
pub fn index_to_size(i: i64) -> usize {
    contract_assert!(i >= 0, "negative index {} is not a size", i);
    i as usize
}
