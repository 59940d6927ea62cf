// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for header-vec.

use crate::handle::Handle;

/// Appends `value` through the raw growth manager, adopting the returned handle.
pub fn push_raw<T>(handle: Handle<T>, value: T) -> Handle<T> {
    let mut handle = handle
        .grow_if_needed()
        .expect("Failed to grow_if_needed()");
    let len = handle.len();

    unsafe {
        handle.as_mut_ptr().add(len).write(value);
        handle.set_len(len + 1);
    }

    handle
}

/// Builds a handle holding `values` in order.
pub fn handle_from<T: Copy>(values: &[T]) -> Handle<T> {
    values
        .iter()
        .fold(Handle::null(), |handle, value| push_raw(handle, *value))
}

/// Capacity reached by appending `n` elements one by one to an empty array.
pub fn doubling_capacity(n: usize) -> usize {
    if n == 0 {
        return 0;
    }

    let mut capacity = crate::INITIAL_CAPACITY;
    while capacity < n {
        capacity *= crate::GROWTH_FACTOR;
    }

    capacity
}
