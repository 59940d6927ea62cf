// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Bounds-checked element access.
//!
//! The only layer that validates indices. Everything below it (header,
//! growth) trusts its caller.

use crate::handle::Handle;

impl<T> Handle<T> {
    /// Returns the element at `index`, or `None` if the handle is null or
    /// `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        let data = self.data?;

        if index >= self.len() {
            return None;
        }

        // SAFETY: `index < len`, so the slot is initialized.
        Some(unsafe { &*data.as_ptr().add(index) })
    }

    /// Mutable variant of [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let data = self.data?;

        if index >= self.len() {
            return None;
        }

        // SAFETY: `index < len`, and `&mut self` makes the access unique.
        Some(unsafe { &mut *data.as_ptr().add(index) })
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.get(self.len().checked_sub(1)?)
    }

    /// Mutable variant of [`front`](Self::front).
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Mutable variant of [`back`](Self::back).
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len().checked_sub(1)?;
        self.get_mut(last)
    }
}
