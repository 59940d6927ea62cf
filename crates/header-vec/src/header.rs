// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Header - Metadata stored in front of the element buffer.
//!
//! One allocation holds both the header and the elements:
//!
//! ```text
//! [ Header { len, capacity } | pad ][ T ][ T ][ T ] ...
//! ^ block start                     ^ handle
//! ```
//!
//! The element width is not stored: it is `size_of::<T>()`.

use alloc::alloc::Layout;
use core::mem::{align_of, size_of};
use core::ptr::NonNull;

use crate::error::AllocError;

/// Length and capacity of a block, in elements.
#[repr(C)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct Header {
    pub(crate) len: usize,
    pub(crate) capacity: usize,
}

/// Distance in bytes from the block start to the first element.
///
/// The header size rounded up to the element alignment.
#[inline(always)]
pub(crate) const fn data_offset<T>() -> usize {
    let align = align_of::<T>();
    let size = size_of::<Header>();

    (size + align - 1) / align * align
}

/// Layout of a whole block holding `capacity` elements.
pub(crate) fn layout_for<T>(capacity: usize) -> Result<Layout, AllocError> {
    let elements = size_of::<T>()
        .checked_mul(capacity)
        .ok_or(AllocError::CapacityOverflow)?;
    let size = data_offset::<T>()
        .checked_add(elements)
        .ok_or(AllocError::CapacityOverflow)?;
    let align = align_of::<Header>().max(align_of::<T>());

    Layout::from_size_align(size, align).map_err(|_| AllocError::CapacityOverflow)
}

/// Layout of a live block holding `capacity` elements.
///
/// # Safety
///
/// `layout_for::<T>(capacity)` must have succeeded, which holds for the
/// capacity recorded in the header of any live block.
#[inline(always)]
pub(crate) unsafe fn live_layout<T>(capacity: usize) -> Layout {
    let size = data_offset::<T>() + size_of::<T>() * capacity;
    let align = align_of::<Header>().max(align_of::<T>());

    debug_assert!(Layout::from_size_align(size, align).is_ok());

    // SAFETY: same computation as `layout_for`, which accepted `capacity`.
    unsafe { Layout::from_size_align_unchecked(size, align) }
}

/// Steps back from the first element slot to the header.
///
/// # Safety
///
/// `data` must be the element pointer of a live block of `T`.
#[inline(always)]
pub(crate) unsafe fn header_of<T>(data: NonNull<T>) -> NonNull<Header> {
    // SAFETY: the block starts `data_offset` bytes before `data`.
    unsafe { data.cast::<u8>().sub(data_offset::<T>()).cast() }
}

/// Steps forward from the header to the first element slot.
///
/// # Safety
///
/// `header` must be the start of a block laid out by [`layout_for::<T>`].
#[inline(always)]
pub(crate) unsafe fn data_of<T>(header: NonNull<Header>) -> NonNull<T> {
    // SAFETY: every block is at least `data_offset` bytes long.
    unsafe { header.cast::<u8>().add(data_offset::<T>()).cast() }
}
