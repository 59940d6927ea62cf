// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growth manager: allocation and relocation of header-prefixed blocks.
//!
//! Every entry point consumes the handle and returns the one to keep:
//!
//! - `Ok(handle)`: the same block (nothing to do) or a relocated one. Any
//!   pointer obtained from the old handle must be considered dangling.
//! - `Err(RelocationError)`: nothing was released; the error carries the
//!   prior handle back, still owning every element.

use alloc::alloc::{alloc, realloc};
use core::mem;
use core::ptr::NonNull;

use crate::error::{AllocError, RelocationError};
use crate::handle::Handle;
use crate::header::{self, Header};

/// Capacity of the first allocation made by [`Handle::grow_if_needed`].
pub const INITIAL_CAPACITY: usize = 4;

/// Factor applied to the capacity each time a full block grows.
pub const GROWTH_FACTOR: usize = 2;

/// Smallest capacity on the growth sequence, starting at `current`, that holds
/// `required` elements.
pub(crate) fn amortized_capacity(current: usize, required: usize) -> Result<usize, AllocError> {
    let mut capacity = current.max(INITIAL_CAPACITY);

    while capacity < required {
        capacity = capacity
            .checked_mul(GROWTH_FACTOR)
            .ok_or(AllocError::CapacityOverflow)?;
    }

    Ok(capacity)
}

impl<T> Handle<T> {
    /// Makes room for one more element.
    ///
    /// - Null handle: allocates [`INITIAL_CAPACITY`] slots with `len = 0`.
    /// - `len < capacity`: returns the handle unchanged.
    /// - Full block: relocates to `capacity * GROWTH_FACTOR` slots, keeping
    ///   every element.
    ///
    /// `len` is never changed; writing the new element is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`RelocationError`] carrying the unchanged handle if the
    /// allocator refuses the block.
    pub fn grow_if_needed(self) -> Result<Self, RelocationError<T>> {
        let Some(&Header { len, capacity }) = self.header() else {
            return self.relocate(INITIAL_CAPACITY);
        };

        if len < capacity {
            return Ok(self);
        }

        // A live block can reach zero slots through shrinking.
        let target = match capacity.checked_mul(GROWTH_FACTOR) {
            Some(capacity) => capacity.max(INITIAL_CAPACITY),
            None => return Err(RelocationError::new(self, AllocError::CapacityOverflow)),
        };

        self.relocate(target)
    }

    /// Reallocates to exactly `capacity` slots.
    ///
    /// Grows or shrinks. The target never drops below `len`: live elements
    /// are always kept. A null handle gets a fresh block with `len = 0`.
    /// Asking for the current capacity returns the handle unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RelocationError`] carrying the unchanged handle if the layout
    /// overflows or the allocator refuses the block.
    pub fn reallocate_to(self, capacity: usize) -> Result<Self, RelocationError<T>> {
        if self.is_null() {
            return self.relocate(capacity);
        }

        let target = capacity.max(self.len());

        if target == self.capacity() {
            return Ok(self);
        }

        self.relocate(target)
    }

    /// Makes room for at least `min_capacity` elements in one relocation.
    ///
    /// The new capacity is the first value of the doubling sequence (from the
    /// current capacity, or [`INITIAL_CAPACITY`]) that reaches `min_capacity`,
    /// so bulk growth lands on the same capacities as repeated single growth.
    /// A handle that already fits `min_capacity` is returned unchanged; a null
    /// handle asked for zero slots stays null.
    ///
    /// # Errors
    ///
    /// Returns [`RelocationError`] carrying the unchanged handle on overflow or
    /// allocator refusal.
    pub fn grow_to(self, min_capacity: usize) -> Result<Self, RelocationError<T>> {
        if min_capacity <= self.capacity() {
            return Ok(self);
        }

        match amortized_capacity(self.capacity(), min_capacity) {
            Ok(target) => self.relocate(target),
            Err(error) => Err(RelocationError::new(self, error)),
        }
    }

    /// Moves the block to one of exactly `capacity` slots.
    ///
    /// Callers guarantee `capacity >= len`.
    fn relocate(self, capacity: usize) -> Result<Self, RelocationError<T>> {
        // `realloc` may free the old block; its header is not read afterwards.
        let len = self.len();
        let old_capacity = self.capacity();

        debug_assert!(capacity >= len);

        let new_layout = match header::layout_for::<T>(capacity) {
            Ok(layout) => layout,
            Err(error) => return Err(RelocationError::new(self, error)),
        };

        let ptr = match self.data {
            // SAFETY: `new_layout` has non-zero size (it always holds the header).
            None => unsafe { alloc(new_layout) },
            Some(data) => {
                // SAFETY: `data` is live, so its header is the start of a block
                // allocated with `old_layout`. Both layouts share one alignment
                // and `new_layout.size()` is a valid non-zero size.
                unsafe {
                    let block = header::header_of(data);
                    let old_layout = header::live_layout::<T>(old_capacity);
                    realloc(block.as_ptr().cast(), old_layout, new_layout.size())
                }
            }
        };

        let Some(block) = NonNull::new(ptr.cast::<Header>()) else {
            log::warn!(
                "header-vec: allocator refused {} bytes for {} slots (len {})",
                new_layout.size(),
                capacity,
                len
            );

            return Err(RelocationError::new(
                self,
                AllocError::OutOfMemory {
                    size: new_layout.size(),
                    align: new_layout.align(),
                },
            ));
        };

        // `realloc` took ownership of the old block; the old handle must not
        // release it.
        mem::forget(self);

        // SAFETY: `block` is a fresh, suitably aligned block of `new_layout`;
        // `realloc` preserved the first `len` elements.
        unsafe {
            block.as_ptr().write(Header { len, capacity });
        }

        log::trace!("header-vec: relocated {old_capacity} -> {capacity} slots (len {len})");

        // SAFETY: the block is laid out by `layout_for::<T>`.
        Ok(Handle::from_data(unsafe { header::data_of(block) }))
    }
}
