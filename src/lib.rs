/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Rank-aware descriptions of multidimensional data over flat memory.
//!
//! This crate provides the vocabulary for treating a contiguous buffer
//! as a multidimensional array without owning or reshaping it:
//!
//! - [`Shape`] and [`rank`]: the rank (number of axes) of a shape,
//!   carried in the type as a const generic.
//! - [`Extents`]: per-axis sizes, each fixed up front or deferred to
//!   run time via the [`DYNAMIC`] placeholder.
//! - [`strides`], [`flatten`], [`unflatten`]: the mapping between
//!   coordinates and offsets in the flat buffer, in row-major or
//!   column-major [`StorageOrder`].
//! - [`Span`]: a non-owning view over contiguous elements, with
//!   checked sub-view operations.
//!
//! Sizes and extents are `usize`; coordinates, offsets, and strides
//! are `i64`. Runtime contract violations (out-of-bounds coordinates,
//! oversized sub-views) panic in debug builds and under the
//! `contract-checks` feature; with checks disabled they go undetected
//! but every operation remains memory safe.
//!
//! ```
//! use ndspan::Span;
//! use ndspan::StorageOrder;
//! use ndspan::flatten;
//! use ndspan::strides;
//!
//! let shape = [4, 1, 6, 5];
//! assert_eq!(strides(&shape, StorageOrder::RowMajor), [30, 30, 5, 1]);
//! assert_eq!(flatten([1, 0, 3, 2], &shape, StorageOrder::RowMajor), 47);
//!
//! let buf: Vec<i64> = (0..120).collect();
//! let view = Span::new(&buf);
//! assert_eq!(view[47], 47);
//! ```

mod contract;
pub mod extents;
pub mod layout;
pub mod num;
pub mod rank;
pub mod span;
#[cfg(test)]
mod strategy;

pub use crate::extents::DYNAMIC;
pub use crate::extents::Extents;
pub use crate::extents::ExtentsError;
pub use crate::layout::CoordIter;
pub use crate::layout::StorageOrder;
pub use crate::layout::coord_iter;
pub use crate::layout::flatten;
pub use crate::layout::flatten_with_strides;
pub use crate::layout::strides;
pub use crate::layout::unflatten;
pub use crate::layout::unflatten_with_strides;
pub use crate::num::index_to_size;
pub use crate::num::size_to_index;
pub use crate::rank::Shape;
pub use crate::rank::rank;
pub use crate::span::Span;
pub use crate::span::SpanError;
