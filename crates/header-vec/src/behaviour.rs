// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Test behaviour for injecting allocation failures in `HeaderVec` operations.
///
/// This is only available with the `test_utils` feature and lets users test
/// their out-of-memory paths without exhausting the allocator.
///
/// The behaviour is sticky - once set, it remains active until changed.
/// Operations that can be satisfied without relocating are not affected.
///
/// # Example
///
/// ```rust
/// // test_utils feature required in dev-dependencies
/// use header_vec::{HeaderVec, HeaderVecBehaviour, HeaderVecError};
///
/// fn example() -> Result<(), HeaderVecError> {
///     let mut vec = HeaderVec::new();
///     vec.change_behaviour(HeaderVecBehaviour::FailAtGrow);
///
///     // First push needs an allocation: it fails and nothing changes.
///     assert!(vec.push(1u8).is_err());
///     assert!(vec.is_empty());
///
///     // Reset to normal behaviour
///     vec.change_behaviour(HeaderVecBehaviour::None);
///     vec.push(1u8)?;
///     Ok(())
/// }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderVecBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Amortized growth (`push`, `insert*`, `reserve`) fails when it would
    /// allocate or relocate.
    FailAtGrow,
    /// Exact reallocation (`reserve_exact`, `resize`, `shrink_to_fit`) fails
    /// when it would allocate or relocate.
    FailAtReallocate,
}
