// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::rc::Rc;

use crate::handle::Handle;

use super::utils::{handle_from, push_raw};

// =============================================================================
// null()
// =============================================================================

#[test]
fn test_null_handle_is_empty_array() {
    let handle: Handle<u32> = Handle::null();

    assert!(handle.is_null());
    assert!(handle.is_empty());
    assert_eq!(handle.len(), 0);
    assert_eq!(handle.capacity(), 0);
    assert!(handle.as_ptr().is_null());
    assert!(handle.as_slice().is_empty());
}

#[test]
fn test_default_is_null() {
    let mut handle: Handle<u32> = Handle::default();

    assert!(handle.is_null());
    assert!(handle.as_mut_ptr().is_null());
    assert!(handle.as_mut_slice().is_empty());
}

// =============================================================================
// len(), capacity(), is_empty()
// =============================================================================

#[test]
fn test_queries_follow_header() {
    let handle = handle_from(&[1u32, 2, 3]);

    assert!(!handle.is_null());
    assert!(!handle.is_empty());
    assert_eq!(handle.len(), 3);
    assert_eq!(handle.capacity(), 4);
    assert_eq!(handle.as_slice(), &[1, 2, 3]);
}

// =============================================================================
// as_mut_slice()
// =============================================================================

#[test]
fn test_as_mut_slice_writes_through() {
    let mut handle = handle_from(&[1u32, 2, 3]);

    handle.as_mut_slice()[1] = 42;

    assert_eq!(handle.as_slice(), &[1, 42, 3]);
}

// =============================================================================
// set_len()
// =============================================================================

#[test]
fn test_set_len_on_null_is_ignored() {
    let mut handle: Handle<u32> = Handle::null();

    unsafe { handle.set_len(3) };

    assert!(handle.is_null());
    assert_eq!(handle.len(), 0);
}

#[test]
fn test_set_len_above_capacity_is_ignored() {
    let mut handle = handle_from(&[1u32, 2]);

    unsafe { handle.set_len(5) };

    assert_eq!(handle.len(), 2);
    assert_eq!(handle.capacity(), 4);
}

#[test]
fn test_set_len_within_capacity() {
    let mut handle = handle_from(&[1u32, 2, 3]);

    unsafe { handle.set_len(1) };
    assert_eq!(handle.as_slice(), &[1]);

    // Bytes past len are still there until overwritten
    unsafe { handle.set_len(3) };
    assert_eq!(handle.as_slice(), &[1, 2, 3]);
}

// =============================================================================
// Drop
// =============================================================================

#[test]
fn test_drop_null_is_noop() {
    let handle: Handle<Rc<()>> = Handle::null();
    drop(handle);
}

#[test]
fn test_drop_releases_live_elements() {
    let tracker = Rc::new(());

    let mut handle = Handle::null();
    for _ in 0..5 {
        handle = push_raw(handle, Rc::clone(&tracker));
    }

    assert_eq!(Rc::strong_count(&tracker), 6);

    drop(handle);

    assert_eq!(Rc::strong_count(&tracker), 1);
}

#[test]
fn test_drop_skips_slots_past_len() {
    let tracker = Rc::new(());

    let mut handle = push_raw(Handle::null(), Rc::clone(&tracker));
    handle = push_raw(handle, Rc::clone(&tracker));

    // Hide the second element: it is leaked, not dropped.
    unsafe { handle.set_len(1) };
    drop(handle);

    assert_eq!(Rc::strong_count(&tracker), 2);
}

// =============================================================================
// Debug
// =============================================================================

#[test]
fn test_debug_null() {
    let handle: Handle<u8> = Handle::null();

    let snapshot = format!("{:?}", handle);
    insta::assert_snapshot!(snapshot, @"Handle { ptr: 0x0, len: 0, capacity: 0 }");
}
