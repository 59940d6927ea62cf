// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for header-vec.

use thiserror::Error;

use crate::handle::Handle;

/// Allocation failures.
///
/// Exhausting the allocator (or asking for a block larger than the address
/// space allows) is the only way a growth operation can fail.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AllocError {
    /// The requested capacity does not fit in a valid `Layout`.
    #[error("capacity overflow: block would exceed isize::MAX bytes")]
    CapacityOverflow,

    /// The global allocator returned null.
    #[error("out of memory: allocator refused {size} bytes (align {align})")]
    OutOfMemory {
        /// Size in bytes of the refused block, header included.
        size: usize,
        /// Alignment of the refused block.
        align: usize,
    },
}

/// Errors returned by [`HeaderVec`](crate::HeaderVec) operations.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum HeaderVecError {
    /// Growing the backing block failed. The vector is left untouched.
    #[error("AllocError: {0}")]
    Alloc(#[from] AllocError),

    /// An insertion position lies past the end of the vector.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The rejected position.
        index: usize,
        /// Length of the vector at the time of the call.
        len: usize,
    },
}

/// A growth-manager failure.
///
/// Carries the prior handle back to the caller: the old block was not
/// released and still owns every element, so the caller keeps using it.
#[derive(Error)]
#[error("relocation failed, prior block retained: {error}")]
pub struct RelocationError<T> {
    handle: Handle<T>,
    #[source]
    error: AllocError,
}

impl<T> RelocationError<T> {
    pub(crate) fn new(handle: Handle<T>, error: AllocError) -> Self {
        Self { handle, error }
    }

    /// Returns the underlying allocation failure.
    pub fn error(&self) -> AllocError {
        self.error
    }

    /// Returns the retained handle.
    pub fn handle(&self) -> &Handle<T> {
        &self.handle
    }

    /// Gives the retained handle back to the caller.
    pub fn into_handle(self) -> Handle<T> {
        self.handle
    }

    /// Splits the failure into the retained handle and the allocation error.
    pub fn into_parts(self) -> (Handle<T>, AllocError) {
        (self.handle, self.error)
    }
}

impl<T> core::fmt::Debug for RelocationError<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RelocationError")
            .field("error", &self.error)
            .field("len", &self.handle.len())
            .field("capacity", &self.handle.capacity())
            .finish()
    }
}
