// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::handle::Handle;

use super::utils::handle_from;

// =============================================================================
// get() / get_mut()
// =============================================================================

#[test]
fn test_get_on_null_is_absent() {
    let mut handle: Handle<u32> = Handle::null();

    assert_eq!(handle.get(0), None);
    assert_eq!(handle.get_mut(0), None);
}

#[test]
fn test_get_valid_indices() {
    let handle = handle_from(&[10u32, 20, 30]);

    assert_eq!(handle.get(0), Some(&10));
    assert_eq!(handle.get(1), Some(&20));
    assert_eq!(handle.get(2), Some(&30));
}

#[test]
fn test_get_past_len_is_absent_even_within_capacity() {
    let handle = handle_from(&[10u32, 20, 30]);
    assert_eq!(handle.capacity(), 4);

    assert_eq!(handle.get(3), None);
    assert_eq!(handle.get(500), None);
    assert_eq!(handle.get(usize::MAX), None);
}

#[test]
fn test_get_mut_writes_through() {
    let mut handle = handle_from(&[10u32, 20, 30]);

    *handle.get_mut(1).expect("Failed to get_mut(1)") = 99;

    assert_eq!(handle.as_slice(), &[10, 99, 30]);
    assert_eq!(handle.get_mut(3), None);
}

// =============================================================================
// front() / back()
// =============================================================================

#[test]
fn test_front_back_on_empty_are_absent() {
    let mut handle: Handle<u32> = Handle::null();

    assert_eq!(handle.front(), None);
    assert_eq!(handle.back(), None);
    assert_eq!(handle.front_mut(), None);
    assert_eq!(handle.back_mut(), None);

    // Allocated but empty
    let mut handle = handle
        .grow_if_needed()
        .expect("Failed to grow_if_needed()");

    assert_eq!(handle.front(), None);
    assert_eq!(handle.back(), None);
    assert_eq!(handle.back_mut(), None);
}

#[test]
fn test_front_back() {
    let mut handle = handle_from(&[1u8, 2, 3]);

    assert_eq!(handle.front(), Some(&1));
    assert_eq!(handle.back(), Some(&3));

    *handle.front_mut().expect("Failed to front_mut()") = 10;
    *handle.back_mut().expect("Failed to back_mut()") = 30;

    assert_eq!(handle.as_slice(), &[10, 2, 30]);
}

#[test]
fn test_front_equals_back_for_single_element() {
    let handle = handle_from(&[7u8]);

    assert_eq!(handle.front(), Some(&7));
    assert_eq!(handle.back(), Some(&7));
}
