// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Handle - Owning pointer to the element buffer of a header-prefixed block.
//!
//! A handle is either null (the empty array, no allocation) or points at the
//! first element slot of a block whose [`Header`] sits right in front of it.
//! Growth operations (see `growth.rs`) consume the handle and return the one
//! the caller must keep using.

use alloc::alloc::dealloc;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};

use crate::header::{self, Header};

/// Owning handle to a header-prefixed element buffer.
///
/// The null handle is a complete, valid empty array: every query accepts it
/// and dropping it is a no-op. A non-null handle owns the whole block and the
/// `len` initialized elements in it; dropping it drops those elements and
/// releases the block.
///
/// # Example
///
/// ```rust
/// use header_vec::{Handle, INITIAL_CAPACITY};
///
/// let handle: Handle<u32> = Handle::null();
/// assert!(handle.is_null());
/// assert_eq!(handle.len(), 0);
/// assert_eq!(handle.capacity(), 0);
///
/// // First growth allocates; the returned handle replaces the old one.
/// let handle = handle.grow_if_needed().expect("Failed to grow_if_needed()");
/// assert!(!handle.is_null());
/// assert_eq!(handle.capacity(), INITIAL_CAPACITY);
/// ```
pub struct Handle<T> {
    pub(crate) data: Option<NonNull<T>>,
    _marker: PhantomData<T>,
}

// Safety: a handle is the unique owner of its block, like `Box<[T]>`.
unsafe impl<T: Send> Send for Handle<T> {}
unsafe impl<T: Sync> Sync for Handle<T> {}

impl<T> Handle<T> {
    /// Returns the null handle.
    #[inline(always)]
    pub const fn null() -> Self {
        Self {
            data: None,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) fn from_data(data: NonNull<T>) -> Self {
        Self {
            data: Some(data),
            _marker: PhantomData,
        }
    }

    /// Returns `true` if no block has been allocated.
    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    #[inline(always)]
    pub(crate) fn header(&self) -> Option<&Header> {
        // SAFETY: a non-null handle always points into a live block.
        self.data.map(|data| unsafe { header::header_of(data).as_ref() })
    }

    #[inline(always)]
    pub(crate) fn header_mut(&mut self) -> Option<&mut Header> {
        // SAFETY: see `header()`; `&mut self` makes the access unique.
        self.data.map(|data| unsafe { header::header_of(data).as_mut() })
    }

    /// Returns the number of live elements. Zero for the null handle.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.header().map_or(0, |h| h.len)
    }

    /// Returns the number of slots in the block. Zero for the null handle.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.header().map_or(0, |h| h.capacity)
    }

    /// Returns `true` if there are no live elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element pointer, or null for the null handle.
    ///
    /// The pointer is invalidated by any growth of this handle.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.data.map_or(ptr::null(), |data| data.as_ptr() as *const T)
    }

    /// Returns the mutable element pointer, or null for the null handle.
    ///
    /// The pointer is invalidated by any growth of this handle.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.map_or(ptr::null_mut(), |data| data.as_ptr())
    }

    /// Returns the live elements as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        match self.data {
            // SAFETY: the first `len` slots are initialized.
            Some(data) => unsafe { core::slice::from_raw_parts(data.as_ptr(), self.len()) },
            None => &[],
        }
    }

    /// Returns the live elements as a mutable slice.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();

        match self.data {
            // SAFETY: the first `len` slots are initialized.
            Some(data) => unsafe { core::slice::from_raw_parts_mut(data.as_ptr(), len) },
            None => &mut [],
        }
    }

    /// Sets the number of live elements directly.
    ///
    /// A length above the capacity is ignored, as is any call on the null
    /// handle. Elements are neither dropped nor initialized.
    ///
    /// # Safety
    ///
    /// The first `len` slots must hold initialized elements, and elements past
    /// `len` that are no longer reachable are leaked.
    #[inline(always)]
    pub unsafe fn set_len(&mut self, len: usize) {
        if let Some(header) = self.header_mut() {
            if len <= header.capacity {
                header.len = len;
            }
        }
    }

    /// Releases the block. Element destructors are not run.
    ///
    /// # Safety
    ///
    /// `data` must be the element pointer of a live block of `T`.
    unsafe fn release(data: NonNull<T>) {
        // SAFETY: forwarded from the caller.
        let header = unsafe { header::header_of(data) };
        // SAFETY: the header is live until `dealloc` below.
        let capacity = unsafe { header.as_ref().capacity };

        // SAFETY: the block was allocated with this capacity's layout.
        unsafe { dealloc(header.as_ptr().cast(), header::live_layout::<T>(capacity)) };
    }
}

impl<T> Default for Handle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> Drop for Handle<T> {
    fn drop(&mut self) {
        let len = self.len();

        let Some(data) = self.data.take() else {
            return;
        };

        // SAFETY: the first `len` slots are initialized and owned by us.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(data.as_ptr(), len));
            Self::release(data);
        }
    }
}

impl<T> core::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Handle")
            .field("ptr", &self.as_ptr())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
