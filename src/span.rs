/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Non-owning, bounds-described views over contiguous memory.
//!
//! A [`Span`] is a `{pointer, length}` pair over a contiguous sequence
//! of elements it does not own: its lifetime parameter ties it to the
//! buffer it was constructed from, and copying a span copies the pair,
//! never the data. The extent parameter is either [`DYNAMIC`] (length
//! stored at run time) or a fixed compile-time length.
//!
//! ```
//! use ndspan::Span;
//!
//! let buf = vec![1, 1, 2, 3, 5, 8];
//! let span = Span::new(&buf);
//! assert_eq!(span.len(), 6);
//! assert_eq!(span.first(3), Span::new(&buf[..3]));
//! assert_eq!(span.last(3).as_ptr(), buf[3..].as_ptr());
//! assert_eq!(span.subspan(2, Some(2)), Span::new(&buf[2..4]));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

use crate::contract::contract_assert;
use crate::extents::DYNAMIC;

/// The type of error for static-extent span construction.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpanError {
    #[error("length mismatch: expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

/// A non-owning view over `N` (or, with `N = DYNAMIC`, a run-time
/// number of) contiguous elements of type `T`.
///
/// A span never outlives the buffer it views and shares access to it
/// with its creator; copying the span copies only the `{pointer,
/// length}` pair. The only distinguished state is the null view
/// `{null, 0}`, produced by [`Span::default`].
pub struct Span<'a, T, const N: usize = DYNAMIC> {
    data: *const T,
    len: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, const N: usize> Clone for Span<'a, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, const N: usize> Copy for Span<'a, T, N> {}

// A span borrows the buffer exactly as a shared slice would.
unsafe impl<'a, T: Sync, const N: usize> Send for Span<'a, T, N> {}
unsafe impl<'a, T: Sync, const N: usize> Sync for Span<'a, T, N> {}

impl<'a, T> Span<'a, T, DYNAMIC> {
    /// A view of an entire slice.
    pub fn new(data: &'a [T]) -> Self {
        Self {
            data: data.as_ptr(),
            len: data.len(),
            _marker: PhantomData,
        }
    }

    /// A view over `len` elements starting at `data`.
    ///
    /// # Safety
    ///
    /// `data` must point to `len` contiguous initialized elements live
    /// for `'a`, or be null with `len == 0`.
    pub unsafe fn from_raw_parts(data: *const T, len: usize) -> Self {
        Self {
            data,
            len,
            _marker: PhantomData,
        }
    }

    /// A view over the half-open pointer range `first..last`.
    ///
    /// # Safety
    ///
    /// `first` and `last` must delimit a contiguous sequence of
    /// initialized elements live for `'a`, with `first <= last`.
    pub unsafe fn from_ptr_range(first: *const T, last: *const T) -> Self {
        contract_assert!(first <= last, "pointer range ends before it begins");
        let len = last.offset_from(first) as usize;
        Self::from_raw_parts(first, len)
    }
}

impl<'a, T> Default for Span<'a, T, DYNAMIC> {
    /// The null view `{null, 0}`.
    fn default() -> Self {
        Self {
            data: std::ptr::null(),
            len: 0,
            _marker: PhantomData,
        }
    }
}

impl<'a, T, const N: usize> Span<'a, T, N> {
    /// A static-extent view of an entire array. The length match is
    /// established by the types; there is nothing to check.
    pub fn from_array(data: &'a [T; N]) -> Self {
        Self {
            data: data.as_ptr(),
            len: N,
            _marker: PhantomData,
        }
    }

    /// A static-extent view of a slice whose length is only known at
    /// run time; the length check is deferred to this call.
    pub fn try_from_slice(data: &'a [T]) -> Result<Self, SpanError> {
        if data.len() != N {
            return Err(SpanError::LengthMismatch {
                expected: N,
                found: data.len(),
            });
        }
        Ok(Self {
            data: data.as_ptr(),
            len: N,
            _marker: PhantomData,
        })
    }

    /// The element count. For a static-extent span this is the
    /// constant `N`; either way, O(1).
    pub fn len(&self) -> usize {
        if N == DYNAMIC { self.len } else { N }
    }

    /// Whether the view is empty, regardless of its pointer value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The byte count of the viewed sequence.
    pub fn size_bytes(&self) -> usize {
        self.len() * std::mem::size_of::<T>()
    }

    /// The address of the first viewed element.
    pub fn as_ptr(&self) -> *const T {
        self.data
    }

    /// The viewed elements as a slice, borrowed for the lifetime of
    /// the underlying buffer.
    pub fn as_slice(&self) -> &'a [T] {
        if self.len() == 0 {
            return &[];
        }
        // SAFETY: a nonempty span always views a live buffer.
        unsafe { std::slice::from_raw_parts(self.data, self.len()) }
    }

    /// The element at `index`, or `None` when out of bounds.
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.as_slice().get(index)
    }

    /// The first element. Contract: the span is nonempty.
    pub fn front(&self) -> &'a T {
        contract_assert!(!self.is_empty(), "front() on an empty span");
        &self.as_slice()[0]
    }

    /// The last element. Contract: the span is nonempty.
    pub fn back(&self) -> &'a T {
        contract_assert!(!self.is_empty(), "back() on an empty span");
        let slice = self.as_slice();
        &slice[slice.len() - 1]
    }

    /// A sub-view of the first `count` elements. Contract:
    /// `count <= len()`.
    pub fn first(&self, count: usize) -> Span<'a, T> {
        contract_assert!(
            count <= self.len(),
            "first({}) exceeds length {}",
            count,
            self.len()
        );
        Span::new(&self.as_slice()[..count])
    }

    /// A sub-view of the last `count` elements. Contract:
    /// `count <= len()`.
    pub fn last(&self, count: usize) -> Span<'a, T> {
        contract_assert!(
            count <= self.len(),
            "last({}) exceeds length {}",
            count,
            self.len()
        );
        let slice = self.as_slice();
        Span::new(&slice[slice.len() - count..])
    }

    /// A sub-view starting at `offset`, of `count` elements; `None`
    /// takes the rest of the view. Contract: the subrange lies within
    /// the view.
    pub fn subspan(&self, offset: usize, count: Option<usize>) -> Span<'a, T> {
        let slice = self.as_slice();
        match count {
            Some(count) => {
                contract_assert!(
                    offset + count <= slice.len(),
                    "subspan({}, {}) exceeds length {}",
                    offset,
                    count,
                    slice.len()
                );
                Span::new(&slice[offset..offset + count])
            }
            None => {
                contract_assert!(
                    offset <= slice.len(),
                    "subspan({}) exceeds length {}",
                    offset,
                    slice.len()
                );
                Span::new(&slice[offset..])
            }
        }
    }

    /// Like [`Span::first`] with the count fixed at compile time. When
    /// the source extent is itself static, `C <= N` is verified at
    /// compile time.
    pub fn first_static<const C: usize>(&self) -> Span<'a, T, C> {
        const {
            assert!(
                N == DYNAMIC || C <= N,
                "count exceeds the static span extent"
            )
        };
        contract_assert!(
            C <= self.len(),
            "first_static::<{}>() exceeds length {}",
            C,
            self.len()
        );
        let slice = &self.as_slice()[..C];
        Span {
            data: slice.as_ptr(),
            len: C,
            _marker: PhantomData,
        }
    }

    /// Like [`Span::last`] with the count fixed at compile time. When
    /// the source extent is itself static, `C <= N` is verified at
    /// compile time.
    pub fn last_static<const C: usize>(&self) -> Span<'a, T, C> {
        const {
            assert!(
                N == DYNAMIC || C <= N,
                "count exceeds the static span extent"
            )
        };
        contract_assert!(
            C <= self.len(),
            "last_static::<{}>() exceeds length {}",
            C,
            self.len()
        );
        let slice = self.as_slice();
        let slice = &slice[slice.len() - C..];
        Span {
            data: slice.as_ptr(),
            len: C,
            _marker: PhantomData,
        }
    }

    /// Like [`Span::subspan`] with the subrange fixed at compile time.
    /// When the source extent is itself static, `OFFSET + C <= N` is
    /// verified at compile time.
    ///
    /// The result extent is the literal `C`; a count of "rest of the
    /// view" cannot name `N - OFFSET` statically on stable Rust and is
    /// spelled `subspan(OFFSET, None)` instead, with a dynamic result.
    pub fn subspan_static<const OFFSET: usize, const C: usize>(&self) -> Span<'a, T, C> {
        const {
            assert!(
                N == DYNAMIC || (OFFSET <= N && C <= N - OFFSET),
                "subrange exceeds the static span extent"
            )
        };
        contract_assert!(
            OFFSET + C <= self.len(),
            "subspan_static::<{}, {}>() exceeds length {}",
            OFFSET,
            C,
            self.len()
        );
        let slice = &self.as_slice()[OFFSET..OFFSET + C];
        Span {
            data: slice.as_ptr(),
            len: C,
            _marker: PhantomData,
        }
    }

    /// Iterates the viewed elements; double-ended, walking the
    /// contiguous buffer.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T, const N: usize> Index<usize> for Span<'a, T, N> {
    type Output = T;

    /// Contract: `index < len()`.
    fn index(&self, index: usize) -> &T {
        contract_assert!(
            index < self.len(),
            "index {} out of bounds for span of length {}",
            index,
            self.len()
        );
        &self.as_slice()[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for Span<'a, T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, 'b, T, const N: usize> IntoIterator for &'b Span<'a, T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> From<&'a [T]> for Span<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Span::new(data)
    }
}

impl<'a, T> From<&'a Vec<T>> for Span<'a, T> {
    fn from(data: &'a Vec<T>) -> Self {
        Span::new(data)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Span<'a, T, N> {
    fn from(data: &'a [T; N]) -> Self {
        Span::from_array(data)
    }
}

/// Element-wise equality over equal lengths; views of different
/// lengths are unequal, never a contract violation.
impl<'a, 'b, T, U, const N: usize, const M: usize> PartialEq<Span<'b, U, M>> for Span<'a, T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Span<'b, U, M>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

/// Lexicographic ordering.
impl<'a, 'b, T, U, const N: usize, const M: usize> PartialOrd<Span<'b, U, M>> for Span<'a, T, N>
where
    T: PartialEq<U> + PartialOrd<U>,
{
    fn partial_cmp(&self, other: &Span<'b, U, M>) -> Option<Ordering> {
        for (a, b) in self.iter().zip(other.iter()) {
            match a.partial_cmp(b) {
                Some(Ordering::Equal) => continue,
                non_eq => return non_eq,
            }
        }
        Some(self.len().cmp(&other.len()))
    }
}

impl<'a, T: fmt::Debug, const N: usize> fmt::Debug for Span<'a, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
