/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The run-time contract-check hook.
//!
//! Layout conversions and span accesses carry preconditions whose
//! violation is a programmer error, not a recoverable data error.
//! [`contract_assert!`] reports such violations abortively. The hook is
//! compiled in for debug builds and for any build with the
//! `contract-checks` cargo feature enabled; in all other builds the
//! violating operation proceeds with unspecified results.

/// Asserts a run-time contract.
///
/// One hook, two switches: `debug_assertions` and the `contract-checks`
/// cargo feature. A violation panics with the provided message.
macro_rules! contract_assert {
    ($cond:expr, $($arg:tt)+) => {
        if cfg!(any(debug_assertions, feature = "contract-checks")) {
            assert!($cond, $($arg)+);
        }
    };
}

pub(crate) use contract_assert;
