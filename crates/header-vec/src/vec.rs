// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::mem;
use core::ops::{Deref, DerefMut};
use core::ptr;

use crate::error::{AllocError, HeaderVecError, RelocationError};
use crate::handle::Handle;

#[cfg(any(test, feature = "test_utils"))]
use crate::behaviour::HeaderVecBehaviour;

/// Growable array whose length and capacity live in a header in front of the
/// elements.
///
/// `HeaderVec<T>` is a single pointer wide. An empty vector holds the null
/// handle and owns no allocation; the first push (or reserve) allocates.
///
/// Every operation that may relocate the block adopts the handle returned by
/// the growth manager before returning, so references into the vector can
/// never outlive a relocation. Allocation failure never panics: fallible
/// operations return [`HeaderVecError`] and leave the vector exactly as it was.
///
/// # Example
///
/// ```rust
/// use header_vec::{HeaderVec, HeaderVecError};
///
/// fn example() -> Result<(), HeaderVecError> {
///     let mut vec = HeaderVec::new();
///
///     for i in 0..10 {
///         vec.push(i)?;
///     }
///
///     vec.insert(5, 99)?;
///     assert_eq!(vec.get(5), Some(&99));
///     assert_eq!(vec.get(6), Some(&5));
///
///     assert_eq!(vec.remove(5), Some(99));
///     assert_eq!(vec.len(), 10);
///     assert_eq!(vec.capacity(), 16);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct HeaderVec<T> {
    handle: Handle<T>,
    #[cfg(any(test, feature = "test_utils"))]
    behaviour: HeaderVecBehaviour,
}

impl<T> HeaderVec<T> {
    /// Creates an empty vector. Does not allocate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use header_vec::HeaderVec;
    ///
    /// let vec: HeaderVec<u8> = HeaderVec::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    pub fn new() -> Self {
        Self::from_handle(Handle::null())
    }

    /// Creates an empty vector with exactly `capacity` slots.
    ///
    /// A capacity of zero does not allocate.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderVecError::Alloc`] if the block cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, HeaderVecError> {
        let mut vec = Self::new();
        vec.reserve_exact(capacity)?;

        Ok(vec)
    }

    /// Wraps an existing handle.
    pub fn from_handle(handle: Handle<T>) -> Self {
        Self {
            handle,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: HeaderVecBehaviour::default(),
        }
    }

    /// Unwraps the vector into its handle, keeping the elements.
    pub fn into_handle(self) -> Handle<T> {
        self.handle
    }

    /// Returns the current handle.
    ///
    /// Only valid until the next operation that may relocate.
    pub fn handle(&self) -> &Handle<T> {
        &self.handle
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.handle.len()
    }

    /// Returns the number of elements the vector can hold without relocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.handle.capacity()
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handle.is_empty()
    }

    /// Returns an immutable slice view of the vector.
    pub fn as_slice(&self) -> &[T] {
        self.handle.as_slice()
    }

    /// Returns a mutable slice view of the vector.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.handle.as_mut_slice()
    }

    /// Returns the element pointer, null while nothing is allocated.
    pub fn as_ptr(&self) -> *const T {
        self.handle.as_ptr()
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.handle.get(index)
    }

    /// Returns the element at `index` mutably, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.handle.get_mut(index)
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.handle.front()
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.handle.back()
    }

    /// Returns the first element mutably, or `None` if empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.handle.front_mut()
    }

    /// Returns the last element mutably, or `None` if empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.handle.back_mut()
    }

    /// Appends an element.
    ///
    /// Allocates [`INITIAL_CAPACITY`](crate::INITIAL_CAPACITY) slots on first
    /// use and doubles the capacity whenever the vector is full.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderVecError::Alloc`] if growing fails. The value is not
    /// stored and the existing elements are untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use header_vec::{HeaderVec, HeaderVecError};
    ///
    /// fn example() -> Result<(), HeaderVecError> {
    ///     let mut vec = HeaderVec::new();
    ///     vec.push(1u8)?;
    ///     vec.push(2u8)?;
    ///
    ///     assert_eq!(vec.as_slice(), &[1, 2]);
    ///     assert_eq!(vec.capacity(), 4);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn push(&mut self, value: T) -> Result<(), HeaderVecError> {
        self.grow_one()?;

        let len = self.len();

        // SAFETY: `grow_one` guarantees `len < capacity`.
        unsafe {
            self.handle.as_mut_ptr().add(len).write(value);
            self.handle.set_len(len + 1);
        }

        Ok(())
    }

    /// Removes the last element and returns it, or `None` if empty.
    ///
    /// Capacity is kept.
    pub fn pop(&mut self) -> Option<T> {
        let len = self.len().checked_sub(1)?;

        // SAFETY: slot `len` was initialized and is now outside the live range.
        unsafe {
            self.handle.set_len(len);
            Some(self.handle.as_ptr().add(len).read())
        }
    }

    /// Shortens the vector to `len` elements, dropping the rest.
    ///
    /// No-op if `len >= self.len()`. Capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.len();

        if len >= old_len {
            return;
        }

        // SAFETY: `[len, old_len)` is initialized; it leaves the live range
        // before being dropped so a panicking destructor cannot double-drop.
        unsafe {
            self.handle.set_len(len);

            let tail = self.handle.as_mut_ptr().add(len);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(tail, old_len - len));
        }
    }

    /// Sets the length directly. A length above the capacity is ignored.
    ///
    /// # Safety
    ///
    /// See [`Handle::set_len`].
    pub unsafe fn set_len(&mut self, len: usize) {
        // SAFETY: forwarded from the caller.
        unsafe { self.handle.set_len(len) }
    }

    /// Removes all elements. Capacity and allocation are kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes the vector to `new_len` elements.
    ///
    /// Growing reallocates to exactly `new_len` slots when the capacity is too
    /// small, then fills the new slots with clones of `value`. Shrinking drops
    /// the tail and keeps the capacity.
    ///
    /// A capacity already larger than `new_len` is kept as is rather than
    /// reallocated down to `new_len`.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderVecError::Alloc`] if reallocating fails; the vector is
    /// left unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use header_vec::{HeaderVec, HeaderVecError};
    ///
    /// fn example() -> Result<(), HeaderVecError> {
    ///     let mut vec = HeaderVec::new();
    ///     vec.resize(5, 42u32)?;
    ///     vec.resize(10, 99)?;
    ///
    ///     assert_eq!(&vec[..5], &[42; 5]);
    ///     assert_eq!(&vec[5..], &[99; 5]);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), HeaderVecError>
    where
        T: Clone,
    {
        let len = self.len();

        if new_len <= len {
            self.truncate(new_len);
            return Ok(());
        }

        if new_len > self.capacity() {
            self.reallocate_to(new_len)?;
        }

        let mut written = len;
        let base = self.handle.as_mut_ptr();

        // SAFETY: capacity >= new_len; `len` follows every write so a panicking
        // clone leaves only initialized slots live.
        unsafe {
            while written + 1 < new_len {
                base.add(written).write(value.clone());
                written += 1;
                self.handle.set_len(written);
            }

            base.add(written).write(value);
            self.handle.set_len(new_len);
        }

        Ok(())
    }

    /// Inserts `value` at `pos`, shifting later elements right.
    ///
    /// `pos == len` appends.
    ///
    /// # Errors
    ///
    /// - [`HeaderVecError::IndexOutOfBounds`] if `pos > len`.
    /// - [`HeaderVecError::Alloc`] if growing fails.
    ///
    /// The vector is unchanged on error.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<(), HeaderVecError> {
        let len = self.open_gap(pos, 1)?;

        // SAFETY: `open_gap` left slot `pos` vacant and room for `len + 1`.
        unsafe {
            self.handle.as_mut_ptr().add(pos).write(value);
            self.handle.set_len(len + 1);
        }

        Ok(())
    }

    /// Inserts `count` clones of `value` at `pos`, shifting later elements
    /// right by `count`.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn insert_n(&mut self, pos: usize, count: usize, value: T) -> Result<(), HeaderVecError>
    where
        T: Clone,
    {
        let len = self.open_gap(pos, count)?;

        if count > 0 {
            let base = self.handle.as_mut_ptr();

            // SAFETY: `[pos, pos + count)` is vacant. A panicking clone leaks
            // the shifted tail; the live range stays `[0, pos)`.
            unsafe {
                for i in pos..pos + count - 1 {
                    base.add(i).write(value.clone());
                }
                base.add(pos + count - 1).write(value);
            }
        }

        // SAFETY: every slot below `len + count` is initialized again.
        unsafe { self.handle.set_len(len + count) };

        Ok(())
    }

    /// Inserts clones of `src` at `pos`, shifting later elements right by
    /// `src.len()`.
    ///
    /// Pass `&src[start..end]` to insert a sub-range of another buffer.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    ///
    /// # Example
    ///
    /// ```rust
    /// use header_vec::{HeaderVec, HeaderVecError};
    ///
    /// fn example() -> Result<(), HeaderVecError> {
    ///     let mut vec = HeaderVec::new();
    ///     vec.extend_from_slice(&[1u8, 5])?;
    ///
    ///     let other = [0u8, 2, 3, 4, 9];
    ///     vec.insert_from_slice(1, &other[1..4])?;
    ///
    ///     assert_eq!(vec.as_slice(), &[1, 2, 3, 4, 5]);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn insert_from_slice(&mut self, pos: usize, src: &[T]) -> Result<(), HeaderVecError>
    where
        T: Clone,
    {
        let count = src.len();
        let len = self.open_gap(pos, count)?;
        let base = self.handle.as_mut_ptr();

        // SAFETY: see `insert_n`.
        unsafe {
            for (i, item) in src.iter().enumerate() {
                base.add(pos + i).write(item.clone());
            }
            self.handle.set_len(len + count);
        }

        Ok(())
    }

    /// Appends clones of every element of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderVecError::Alloc`] if growing fails.
    pub fn extend_from_slice(&mut self, src: &[T]) -> Result<(), HeaderVecError>
    where
        T: Clone,
    {
        self.insert_from_slice(self.len(), src)
    }

    /// Removes the element at `pos` and returns it, shifting later elements
    /// left. Returns `None` (and does nothing) if `pos >= len`.
    pub fn remove(&mut self, pos: usize) -> Option<T> {
        let len = self.len();

        if pos >= len {
            return None;
        }

        // SAFETY: `pos < len`; the tail move tolerates overlap.
        unsafe {
            let base = self.handle.as_mut_ptr().add(pos);
            let value = base.read();

            ptr::copy(base.add(1), base, len - pos - 1);
            self.handle.set_len(len - 1);

            Some(value)
        }
    }

    /// Ensures a total capacity of at least `capacity`, reallocating to exactly
    /// `capacity` slots if needed.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderVecError::Alloc`] if reallocating fails; the vector is
    /// left unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use header_vec::{HeaderVec, HeaderVecError};
    ///
    /// fn example() -> Result<(), HeaderVecError> {
    ///     let mut vec: HeaderVec<u8> = HeaderVec::new();
    ///     vec.reserve_exact(10)?;
    ///     assert_eq!(vec.capacity(), 10);
    ///
    ///     // Smaller requests are no-ops
    ///     vec.reserve_exact(5)?;
    ///     assert_eq!(vec.capacity(), 10);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn reserve_exact(&mut self, capacity: usize) -> Result<(), HeaderVecError> {
        if capacity <= self.capacity() {
            return Ok(());
        }

        self.reallocate_to(capacity)
    }

    /// Ensures room for at least `additional` more elements, growing along the
    /// doubling sequence.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderVecError::Alloc`] if growing fails.
    pub fn reserve(&mut self, additional: usize) -> Result<(), HeaderVecError> {
        let required = self
            .len()
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow)?;

        self.grow_to(required)
    }

    /// Reallocates to exactly `len` slots if the capacity is larger.
    ///
    /// Keeps the (now possibly zero-slot) block allocated; no-op on an
    /// unallocated vector.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderVecError::Alloc`] if reallocating fails; the vector is
    /// left unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<(), HeaderVecError> {
        if self.handle.is_null() || self.capacity() <= self.len() {
            return Ok(());
        }

        self.reallocate_to(self.len())
    }

    /// Clones the vector into a block of exactly `len` slots.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderVecError::Alloc`] if the new block cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, HeaderVecError>
    where
        T: Clone,
    {
        let mut clone = Self::try_with_capacity(self.len())?;
        clone.extend_from_slice(self.as_slice())?;

        Ok(clone)
    }

    /// Changes the test behaviour for this vector.
    ///
    /// This is only available with the `test_utils` feature and allows
    /// injecting allocation failures for testing error handling paths.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: HeaderVecBehaviour) {
        self.behaviour = behaviour;
    }

    /// Grows so that `[pos, len)` can move right by `count`, then moves it.
    ///
    /// Returns the length before the call. On success the live range is
    /// `[0, pos)`: the caller fills `[pos, pos + count)` and restores the
    /// length to `len + count`.
    fn open_gap(&mut self, pos: usize, count: usize) -> Result<usize, HeaderVecError> {
        let len = self.len();

        if pos > len {
            return Err(HeaderVecError::IndexOutOfBounds { index: pos, len });
        }

        let required = len
            .checked_add(count)
            .ok_or(AllocError::CapacityOverflow)?;

        self.grow_to(required)?;

        // SAFETY: capacity >= len + count, so the shifted tail fits.
        unsafe {
            self.handle.set_len(pos);

            if pos < len && count > 0 {
                let base = self.handle.as_mut_ptr().add(pos);
                ptr::copy(base, base.add(count), len - pos);
            }
        }

        Ok(len)
    }

    fn grow_one(&mut self) -> Result<(), HeaderVecError> {
        if self.len() < self.capacity() {
            return Ok(());
        }

        #[cfg(any(test, feature = "test_utils"))]
        self.injected_failure(HeaderVecBehaviour::FailAtGrow, self.len().saturating_add(1))?;

        self.adopt(Handle::grow_if_needed)
    }

    fn grow_to(&mut self, min_capacity: usize) -> Result<(), HeaderVecError> {
        if min_capacity <= self.capacity() {
            return Ok(());
        }

        #[cfg(any(test, feature = "test_utils"))]
        self.injected_failure(HeaderVecBehaviour::FailAtGrow, min_capacity)?;

        self.adopt(|handle| handle.grow_to(min_capacity))
    }

    fn reallocate_to(&mut self, capacity: usize) -> Result<(), HeaderVecError> {
        #[cfg(any(test, feature = "test_utils"))]
        self.injected_failure(HeaderVecBehaviour::FailAtReallocate, capacity)?;

        self.adopt(|handle| handle.reallocate_to(capacity))
    }

    /// Runs a growth-manager call and stores whichever handle comes back:
    /// the relocated one on success, the retained one on failure.
    fn adopt<F>(&mut self, relocate: F) -> Result<(), HeaderVecError>
    where
        F: FnOnce(Handle<T>) -> Result<Handle<T>, RelocationError<T>>,
    {
        match relocate(mem::take(&mut self.handle)) {
            Ok(handle) => {
                self.handle = handle;
                Ok(())
            }
            Err(failure) => {
                let (handle, error) = failure.into_parts();
                self.handle = handle;

                Err(error.into())
            }
        }
    }

    #[cfg(any(test, feature = "test_utils"))]
    fn injected_failure(
        &self,
        behaviour: HeaderVecBehaviour,
        capacity: usize,
    ) -> Result<(), HeaderVecError> {
        if self.behaviour != behaviour {
            return Ok(());
        }

        let layout = crate::header::layout_for::<T>(capacity)?;

        log::warn!(
            "header-vec: injected allocation failure for {} slots ({:?})",
            capacity,
            behaviour
        );

        Err(AllocError::OutOfMemory {
            size: layout.size(),
            align: layout.align(),
        }
        .into())
    }
}

impl<T> Default for HeaderVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Handle<T>> for HeaderVec<T> {
    fn from(handle: Handle<T>) -> Self {
        Self::from_handle(handle)
    }
}

impl<T> Deref for HeaderVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for HeaderVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: PartialEq> PartialEq for HeaderVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for HeaderVec<T> {}

impl<T: PartialEq> PartialEq<[T]> for HeaderVec<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for HeaderVec<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for HeaderVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeaderVec")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("data", &self.as_slice())
            .finish()
    }
}
