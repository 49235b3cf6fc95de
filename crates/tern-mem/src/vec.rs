//! Growable arrays whose storage lives in a [`MemPool`].
//!
//! [`ArenaVec`] behaves like a small `Vec` with one difference: every
//! buffer it ever uses is carved from a pool. When the array is full the
//! capacity doubles, the live elements are copied into a fresh buffer from
//! the same pool, and the old buffer is simply left behind until the pool is
//! released.
//!
//! The array borrows the pool, so the pool always outlives it. Element
//! destructors are never run; the array is meant for plain data and for
//! references to other pool-allocated values.
//!
//! # Examples
//!
//! ```
//! use tern_mem::{ArenaVec, MemPool};
//!
//! let pool = MemPool::new();
//! let mut names = ArenaVec::new_in(&pool).unwrap();
//!
//! names.push("main").unwrap();
//! names.insert(0, "init").unwrap();
//! assert_eq!(names.get(0), Some(&"init"));
//! assert_eq!(names.get(2), None);
//!
//! assert_eq!(names.remove(0), "init");
//! assert_eq!(names.as_slice(), &["main"]);
//! ```

use crate::arena::MemPool;
use crate::error::{MemError, MemResult};
use std::alloc::Layout;
use std::fmt;
use std::ops::Deref;
use std::ptr::{self, NonNull};
use std::slice;

/// Starting capacity of [`ArenaVec::new_in`].
///
/// High enough that typical argument lists and function bodies never grow.
pub const DEFAULT_CAPACITY: usize = 32;

/// A growable array backed by a [`MemPool`].
pub struct ArenaVec<'pool, T> {
    pool: &'pool MemPool,
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
}

impl<'pool, T> ArenaVec<'pool, T> {
    /// Creates an empty array with [`DEFAULT_CAPACITY`] slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot supply the initial buffer.
    pub fn new_in(pool: &'pool MemPool) -> MemResult<Self> {
        Self::with_capacity_in(DEFAULT_CAPACITY, pool)
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot supply the buffer.
    pub fn with_capacity_in(capacity: usize, pool: &'pool MemPool) -> MemResult<Self> {
        let ptr = Self::allocate(pool, capacity)?;
        Ok(Self {
            pool,
            ptr,
            len: 0,
            cap: capacity,
        })
    }

    fn allocate(pool: &MemPool, capacity: usize) -> MemResult<NonNull<T>> {
        let layout = Layout::array::<T>(capacity).map_err(|_| MemError::CapacityOverflow)?;
        Ok(pool.alloc_layout(layout)?.cast::<T>())
    }

    /// Number of live elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current buffer can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// The pool this array allocates from.
    #[must_use]
    pub const fn pool(&self) -> &'pool MemPool {
        self.pool
    }

    /// Doubles the capacity, copying live elements into a new buffer.
    #[cold]
    fn grow(&mut self) -> MemResult<()> {
        let new_cap = self
            .cap
            .checked_mul(2)
            .ok_or(MemError::CapacityOverflow)?
            .max(1);
        let new_ptr = Self::allocate(self.pool, new_cap)?;

        // SAFETY: both buffers hold at least `len` elements and come from
        // distinct pool allocations.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
        }

        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    fn reserve_one(&mut self) -> MemResult<()> {
        if self.len == self.cap {
            self.grow()?;
        }
        Ok(())
    }

    /// Appends an element, growing the buffer if it is full.
    ///
    /// # Errors
    ///
    /// Returns an error if growth needs memory the pool cannot supply; the
    /// array is unchanged in that case.
    pub fn push(&mut self, value: T) -> MemResult<()> {
        self.reserve_one()?;

        // SAFETY: len < cap after reserve_one.
        unsafe {
            self.ptr.as_ptr().add(self.len).write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts an element at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// Returns an error if growth needs memory the pool cannot supply.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> MemResult<()> {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
        self.reserve_one()?;

        // SAFETY: len < cap, so the shifted tail ends inside the buffer.
        unsafe {
            let slot = self.ptr.as_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            slot.write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// left by one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index (is {index}) should be < len (is {})",
            self.len
        );

        // SAFETY: index < len; exactly the `len - index - 1` live elements
        // after it are moved.
        unsafe {
            let slot = self.ptr.as_ptr().add(index);
            let value = slot.read();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Bounds-checked read; `None` past the last element.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Bounds-checked mutable access.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Reserves the next slot, fills it with `T::default()` and returns it
    /// for in-place construction.
    ///
    /// # Errors
    ///
    /// Returns an error if growth needs memory the pool cannot supply.
    pub fn alloc_slot(&mut self) -> MemResult<&mut T>
    where
        T: Default,
    {
        self.push(T::default())?;
        let last = self.len - 1;
        self.get_mut(last).ok_or(MemError::CapacityOverflow)
    }

    /// Views the live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` elements are initialised.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Views the live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` elements are initialised and `&mut self`
        // guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> Deref for ArenaVec<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> IntoIterator for &'a ArenaVec<'_, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArenaVec<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for ArenaVec<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::PoolConfig;

    #[test]
    fn test_push_and_get() {
        let pool = MemPool::new();
        let mut vec = ArenaVec::new_in(&pool).unwrap();

        for i in 0..5u32 {
            vec.push(i).unwrap();
        }

        assert_eq!(vec.len(), 5);
        assert_eq!(vec.capacity(), DEFAULT_CAPACITY);
        assert_eq!(vec.get(4), Some(&4));
        assert_eq!(vec.get(5), None);
    }

    #[test]
    fn test_growth_doubles_and_keeps_elements() {
        let pool = MemPool::new();
        let mut vec = ArenaVec::with_capacity_in(2, &pool).unwrap();

        for i in 0..9u64 {
            vec.push(i).unwrap();
        }

        assert_eq!(vec.capacity(), 16);
        assert_eq!(vec.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_zero_capacity_grows() {
        let pool = MemPool::new();
        let mut vec = ArenaVec::with_capacity_in(0, &pool).unwrap();
        vec.push('a').unwrap();
        vec.push('b').unwrap();
        assert_eq!(vec.capacity(), 2);
        assert_eq!(vec.as_slice(), &['a', 'b']);
    }

    #[test]
    fn test_insert_shifts_right() {
        let pool = MemPool::new();
        let mut vec = ArenaVec::with_capacity_in(3, &pool).unwrap();
        vec.push(1).unwrap();
        vec.push(3).unwrap();
        vec.push(4).unwrap();

        vec.insert(1, 2).unwrap();
        vec.insert(0, 0).unwrap();
        vec.insert(5, 5).unwrap();

        assert_eq!(vec.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    #[should_panic(expected = "insertion index")]
    fn test_insert_past_end_panics() {
        let pool = MemPool::new();
        let mut vec: ArenaVec<'_, u8> = ArenaVec::new_in(&pool).unwrap();
        let _ = vec.insert(1, 0);
    }

    #[test]
    fn test_remove_shifts_left() {
        let pool = MemPool::new();
        let mut vec = ArenaVec::new_in(&pool).unwrap();
        for i in 0..5 {
            vec.push(i).unwrap();
        }

        assert_eq!(vec.remove(1), 1);
        assert_eq!(vec.remove(3), 4);
        assert_eq!(vec.remove(0), 0);

        assert_eq!(vec.as_slice(), &[2, 3]);
        assert_eq!(vec.get(2), None);
    }

    #[test]
    #[should_panic(expected = "removal index")]
    fn test_remove_out_of_bounds_panics() {
        let pool = MemPool::new();
        let mut vec: ArenaVec<'_, u8> = ArenaVec::new_in(&pool).unwrap();
        vec.remove(0);
    }

    #[test]
    fn test_alloc_slot_constructs_in_place() {
        #[derive(Debug, Default, PartialEq)]
        struct Pair {
            left: u32,
            right: u32,
        }

        let pool = MemPool::new();
        let mut vec: ArenaVec<'_, Pair> = ArenaVec::with_capacity_in(1, &pool).unwrap();

        let slot = vec.alloc_slot().unwrap();
        slot.left = 1;
        slot.right = 2;
        let slot = vec.alloc_slot().unwrap();
        slot.left = 3;

        assert_eq!(vec.len(), 2);
        assert_eq!(vec[0], Pair { left: 1, right: 2 });
        assert_eq!(vec[1], Pair { left: 3, right: 0 });
    }

    #[test]
    fn test_growth_leaves_old_buffer_in_pool() {
        let pool = MemPool::new();
        let mut vec = ArenaVec::with_capacity_in(4, &pool).unwrap();
        for i in 0..4u64 {
            vec.push(i).unwrap();
        }
        let before = pool.used();

        vec.push(4).unwrap();

        assert_eq!(pool.used() - before, 8 * std::mem::size_of::<u64>());
    }

    #[test]
    fn test_push_reports_exhaustion() {
        let pool = MemPool::with_config(PoolConfig::new(128, 64)).unwrap();
        let mut vec = ArenaVec::with_capacity_in(8, &pool).unwrap();
        for i in 0..8u64 {
            vec.push(i).unwrap();
        }

        assert!(matches!(vec.push(8), Err(MemError::Exhausted { .. })));
        assert_eq!(vec.len(), 8);
        assert_eq!(vec[7], 7);
    }

    #[test]
    fn test_iteration_and_debug() {
        let pool = MemPool::new();
        let mut vec = ArenaVec::new_in(&pool).unwrap();
        vec.push(1).unwrap();
        vec.push(2).unwrap();

        let total: i32 = (&vec).into_iter().sum();
        assert_eq!(total, 3);
        assert_eq!(format!("{vec:?}"), "[1, 2]");
    }
}
