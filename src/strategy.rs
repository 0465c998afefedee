/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Property-based generators for shapes, coordinates, and storage
//! orders.
//!
//! These strategies back the `proptest`-based round-trip laws between
//! [`flatten`] and [`unflatten`]: every in-bounds coordinate survives
//! a trip through its flattened offset and back, under either storage
//! order, and every in-range offset survives the reverse trip.
//!
//! This module is only included in test builds (`#[cfg(test)]`).

use proptest::prelude::*;

use crate::layout::StorageOrder;

/// Generates a rank-`N` shape with every extent in `1..=max_extent`.
/// Degenerate (zero-extent) shapes are exercised by directed tests
/// instead; here every coordinate must map to a distinct offset.
pub fn gen_shape<const N: usize>(max_extent: usize) -> impl Strategy<Value = [usize; N]> {
    proptest::array::uniform(1..=max_extent)
}

/// Generates an in-bounds coordinate for `shape`.
pub fn gen_coord<const N: usize>(shape: [usize; N]) -> impl Strategy<Value = [i64; N]> {
    proptest::array::uniform(any::<u32>()).prop_map(move |raw: [u32; N]| {
        let mut coord = [0i64; N];
        for axis in 0..N {
            coord[axis] = (raw[axis] as i64) % (shape[axis] as i64);
        }
        coord
    })
}

/// Generates either storage order.
pub fn gen_order() -> impl Strategy<Value = StorageOrder> {
    prop_oneof![Just(StorageOrder::RowMajor), Just(StorageOrder::ColMajor)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::flatten;
    use crate::layout::flatten_with_strides;
    use crate::layout::strides;
    use crate::layout::unflatten;
    use crate::num::size_to_index;

    macro_rules! round_trip_laws {
        ($name:ident, $rank:literal) => {
            mod $name {
                use super::*;

                proptest! {
                    #[test]
                    fn coordinate_round_trips(
                        (shape, coord, order) in gen_shape::<$rank>(6)
                            .prop_flat_map(|shape| {
                                (Just(shape), gen_coord(shape), gen_order())
                            })
                    ) {
                        let offset = flatten(coord, &shape, order);
                        prop_assert!(offset >= 0);
                        prop_assert!(
                            offset < size_to_index(shape.iter().product())
                        );
                        prop_assert_eq!(unflatten(offset, &shape, order), coord);
                    }

                    #[test]
                    fn offset_round_trips(
                        (shape, order, raw) in (gen_shape::<$rank>(6), gen_order(), any::<u32>())
                    ) {
                        let total = size_to_index(shape.iter().product());
                        let offset = (raw as i64) % total;
                        let coord = unflatten(offset, &shape, order);
                        for axis in 0..$rank {
                            prop_assert!(coord[axis] >= 0);
                            prop_assert!(coord[axis] < size_to_index(shape[axis]));
                        }
                        prop_assert_eq!(flatten(coord, &shape, order), offset);
                    }

                    #[test]
                    fn precomputed_strides_agree(
                        (shape, coord, order) in gen_shape::<$rank>(6)
                            .prop_flat_map(|shape| {
                                (Just(shape), gen_coord(shape), gen_order())
                            })
                    ) {
                        let strides = strides(&shape, order);
                        prop_assert_eq!(
                            flatten_with_strides(coord, strides),
                            flatten(coord, &shape, order)
                        );
                    }
                }
            }
        };
    }

    round_trip_laws!(rank_1, 1);
    round_trip_laws!(rank_2, 2);
    round_trip_laws!(rank_3, 3);
    round_trip_laws!(rank_4, 4);
}
