// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable contiguous array with an out-of-band header.
//!
//! A `HeaderVec<T>` is one pointer wide. The pointer addresses the first
//! element; the length and capacity live in a header stored
//! immediately before it, in the same allocation:
//!
//! ```text
//! [ len | capacity ][ T ][ T ][ T ][ spare ][ spare ]
//!                   ^ handle
//! ```
//!
//! # Layers
//!
//! - [`Handle<T>`]: the owning pointer. Null means "no array" and is a
//!   complete empty array. Queries are null-safe; dropping releases the block.
//! - Growth manager: [`Handle::grow_if_needed`], [`Handle::reallocate_to`] and
//!   [`Handle::grow_to`] consume the handle and return the one to keep. On
//!   failure the prior handle comes back inside [`RelocationError`].
//! - [`HeaderVec<T>`]: safe mutation engine (push, insert, remove, resize,
//!   reserve, shrink) that adopts every returned handle internally.
//! - Bounds-checked access: `get`, `front`, `back` return `None` instead of
//!   faulting.
//!
//! # Growth Policy
//!
//! The first allocation holds [`INITIAL_CAPACITY`] elements; a full block
//! grows by [`GROWTH_FACTOR`]. Appending `n` elements to an empty vector lands
//! on the first capacity of `4, 8, 16, 32, ...` that reaches `n`.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use header_vec::{HeaderVec, HeaderVecError};
//!
//! fn example() -> Result<(), HeaderVecError> {
//!     let mut vec = HeaderVec::new();
//!
//!     for i in 0..100u32 {
//!         vec.push(i)?;
//!     }
//!
//!     assert_eq!(vec.len(), 100);
//!     assert_eq!(vec.capacity(), 128);
//!     assert_eq!(vec.front(), Some(&0));
//!     assert_eq!(vec.back(), Some(&99));
//!     assert_eq!(vec.get(500), None);
//!
//!     vec.truncate(10);
//!     vec.shrink_to_fit()?;
//!     assert_eq!(vec.capacity(), 10);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Raw Handles
//!
//! ```rust
//! use header_vec::{Handle, RelocationError};
//!
//! fn example() -> Result<(), RelocationError<u64>> {
//!     let mut handle: Handle<u64> = Handle::null();
//!
//!     // Every growth call returns the handle to keep using.
//!     handle = handle.reallocate_to(8)?;
//!     assert_eq!(handle.capacity(), 8);
//!
//!     // A refused request hands the prior handle back, untouched.
//!     let failure = handle.reallocate_to(usize::MAX).unwrap_err();
//!     let handle = failure.into_handle();
//!     assert_eq!(handle.capacity(), 8);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test_utils` feature to inject allocation failures:
//!
//! ```toml
//! [dev-dependencies]
//! header-vec = { version = "*", features = ["test_utils"] }
//! ```
//!
//! Then use [`HeaderVecBehaviour`] to test error scenarios:
//!
//! ```rust
//! // test_utils feature required in dev-dependencies
//! #[cfg(test)]
//! mod tests {
//!     use header_vec::{HeaderVec, HeaderVecBehaviour};
//!
//!     #[test]
//!     fn test_handles_out_of_memory() {
//!         let mut vec = HeaderVec::new();
//!         vec.change_behaviour(HeaderVecBehaviour::FailAtGrow);
//!
//!         // Test that your code handles the error correctly
//!         assert!(vec.push(1u8).is_err());
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod access;
mod error;
mod growth;
mod handle;
mod header;
mod vec;

#[cfg(any(test, feature = "test_utils"))]
mod behaviour;

#[cfg(test)]
mod tests;

pub use error::{AllocError, HeaderVecError, RelocationError};
pub use growth::{GROWTH_FACTOR, INITIAL_CAPACITY};
pub use handle::Handle;
pub use vec::HeaderVec;

#[cfg(any(test, feature = "test_utils"))]
pub use behaviour::HeaderVecBehaviour;
