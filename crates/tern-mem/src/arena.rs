//! Reserve-then-commit memory pool for the tern compiler frontend.
//!
//! A [`MemPool`] is created once per compilation unit. It fixes a
//! reservation ceiling up front, commits its first chunk immediately, and
//! then commits further memory in whole chunks as bump allocation proceeds.
//! Nothing is freed individually: every byte handed out stays valid, at the
//! same address, until the pool itself is released.
//!
//! # Architecture
//!
//! - [`PoolConfig`]: reservation ceiling and commit chunk size
//! - [`MemPool`]: the bump allocator; allocation takes `&self`
//! - `Segment`: one committed run of memory, never moved or resized
//!
//! Offsets reported by [`MemPool::used`] and [`MemPool::committed`] are
//! logical positions inside the reservation. When a request does not fit in
//! the tail of the current segment, the tail is abandoned, a new segment of
//! whole chunks is committed, and `used` jumps to the start of it. This
//! keeps `used <= committed <= reservation` at all times.
//!
//! # Examples
//!
//! ```
//! use tern_mem::arena::{MemPool, PoolConfig};
//!
//! let pool = MemPool::with_config(PoolConfig::new(64 * 1024, 4096)).unwrap();
//!
//! let a = pool.try_alloc(42u32).unwrap();
//! let b = pool.try_alloc(100u64).unwrap();
//!
//! assert_eq!(*a, 42);
//! assert_eq!(*b, 100);
//! assert_eq!(pool.committed(), 4096);
//! ```

use crate::error::{MemError, MemResult};
use std::alloc::{self, Layout};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::ptr::NonNull;
use tern_log::{debug, trace};

/// Default reservation ceiling (4 GiB on 64-bit targets).
#[cfg(target_pointer_width = "64")]
pub const DEFAULT_RESERVATION: usize = 4 * 1024 * 1024 * 1024;

/// Default reservation ceiling (1 GiB on narrower targets).
#[cfg(not(target_pointer_width = "64"))]
pub const DEFAULT_RESERVATION: usize = 1024 * 1024 * 1024;

/// Default commit granularity (one page).
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Alignment every segment is committed with.
const SEGMENT_ALIGN: usize = 16;

/// Sizing parameters of a [`MemPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Hard ceiling on the bytes the pool may ever commit.
    pub reservation: usize,
    /// Granularity of every commit, in bytes.
    pub chunk_size: usize,
}

impl PoolConfig {
    /// Creates a configuration from a reservation ceiling and chunk size.
    #[must_use]
    pub const fn new(reservation: usize, chunk_size: usize) -> Self {
        Self {
            reservation,
            chunk_size,
        }
    }

    /// Checks the sizing rules.
    ///
    /// # Errors
    ///
    /// Returns [`MemError::InvalidConfig`] if the chunk size is zero or not a
    /// power of two, or if the reservation is not a non-zero multiple of the
    /// chunk size.
    pub fn validate(&self) -> MemResult<()> {
        let reason = if self.chunk_size == 0 {
            "chunk size must be non-zero"
        } else if !self.chunk_size.is_power_of_two() {
            "chunk size must be a power of two"
        } else if self.reservation < self.chunk_size {
            "reservation must hold at least one chunk"
        } else if self.reservation % self.chunk_size != 0 {
            "reservation must be a multiple of the chunk size"
        } else {
            return Ok(());
        };
        Err(MemError::InvalidConfig { reason })
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVATION, DEFAULT_CHUNK_SIZE)
    }
}

/// Snapshot of pool usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Logical bytes consumed, including alignment padding and abandoned tails.
    pub used: usize,
    /// Bytes backed by memory.
    pub committed: usize,
    /// The reservation ceiling.
    pub reservation: usize,
    /// Number of committed segments.
    pub segments: usize,
}

/// One committed run of memory.
///
/// `base` is the logical offset of the first byte inside the reservation.
struct Segment {
    start: NonNull<u8>,
    len: usize,
    base: usize,
}

impl Segment {
    fn commit(base: usize, len: usize) -> MemResult<Self> {
        let layout = Layout::from_size_align(len, SEGMENT_ALIGN)
            .map_err(|_| MemError::CapacityOverflow)?;

        // SAFETY: `len` is at least one chunk, so the layout is non-zero.
        let start = unsafe { alloc::alloc(layout) };
        let start = NonNull::new(start).ok_or(MemError::CommitFailed { size: len })?;

        Ok(Self { start, len, base })
    }

    /// Carves `layout` out of this segment at logical offset `used`.
    ///
    /// Returns the pointer and the new logical `used`, or `None` if the
    /// request does not fit in what is left of the segment.
    fn carve(&self, used: usize, layout: Layout) -> Option<(NonNull<u8>, usize)> {
        let offset = used.checked_sub(self.base)?;
        let addr = self.start.as_ptr().addr().checked_add(offset)?;
        let aligned = addr.checked_next_multiple_of(layout.align())?;
        let begin = offset + (aligned - addr);
        let end = begin.checked_add(layout.size())?;
        if end > self.len {
            return None;
        }

        // SAFETY: begin <= end <= len, so the pointer stays inside (or one
        // past the end of) this segment's allocation.
        let ptr = unsafe { NonNull::new_unchecked(self.start.as_ptr().add(begin)) };
        Some((ptr, self.base + end))
    }
}

impl Drop for Segment {
    fn drop(&mut self) {
        // SAFETY: same size and alignment as the layout used in `commit`.
        unsafe {
            let layout = Layout::from_size_align_unchecked(self.len, SEGMENT_ALIGN);
            alloc::dealloc(self.start.as_ptr(), layout);
        }
    }
}

/// Reserve-then-commit bump allocator.
///
/// Allocation takes `&self`, so values allocated from the pool can refer to
/// each other for as long as the pool is borrowed. Destructors of values
/// placed in the pool are never run.
///
/// The pool is single-threaded: it is neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```
/// use tern_mem::MemPool;
///
/// let pool = MemPool::new();
/// let first = pool.try_alloc([1u8; 16]).unwrap();
/// let second = pool.try_alloc(7i64).unwrap();
///
/// assert_eq!(first[15], 1);
/// assert_eq!(*second, 7);
///
/// let stats = pool.stats();
/// assert!(stats.used <= stats.committed);
/// ```
pub struct MemPool {
    config: PoolConfig,
    segments: RefCell<Vec<Segment>>,
    used: Cell<usize>,
    committed: Cell<usize>,
}

impl MemPool {
    /// Creates a pool with the default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the first chunk cannot be committed (the system is out of
    /// memory).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
            .expect("failed to commit the initial memory pool chunk")
    }

    /// Creates a pool, committing its first chunk immediately.
    ///
    /// # Errors
    ///
    /// Returns [`MemError::InvalidConfig`] for a bad configuration and
    /// [`MemError::CommitFailed`] if the first chunk cannot be committed.
    pub fn with_config(config: PoolConfig) -> MemResult<Self> {
        config.validate()?;
        let first = Segment::commit(0, config.chunk_size)?;

        debug!(
            "reserved {} bytes, committed first {} byte chunk",
            config.reservation, config.chunk_size
        );

        Ok(Self {
            config,
            segments: RefCell::new(vec![first]),
            used: Cell::new(0),
            committed: Cell::new(config.chunk_size),
        })
    }

    /// Returns the configuration this pool was created with.
    #[must_use]
    pub const fn config(&self) -> PoolConfig {
        self.config
    }

    /// Logical bytes consumed so far.
    #[must_use]
    pub fn used(&self) -> usize {
        self.used.get()
    }

    /// Bytes backed by committed memory.
    #[must_use]
    pub fn committed(&self) -> usize {
        self.committed.get()
    }

    /// The reservation ceiling.
    #[must_use]
    pub const fn reservation(&self) -> usize {
        self.config.reservation
    }

    /// Returns a usage snapshot.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            used: self.used.get(),
            committed: self.committed.get(),
            reservation: self.config.reservation,
            segments: self.segments.borrow().len(),
        }
    }

    /// Allocates raw memory for `layout`.
    ///
    /// The returned memory is uninitialised and stays valid, at the same
    /// address, until the pool is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MemError::Exhausted`] if committing enough memory would cross
    /// the reservation ceiling, or [`MemError::CommitFailed`] if the system
    /// refuses the commit. A failed request never hands out a partial block.
    pub fn alloc_layout(&self, layout: Layout) -> MemResult<NonNull<u8>> {
        let mut segments = self.segments.borrow_mut();

        if let Some(current) = segments.last()
            && let Some((ptr, used)) = current.carve(self.used.get(), layout)
        {
            self.used.set(used);
            return Ok(ptr);
        }

        let segment = self.commit_for(layout)?;
        let (ptr, used) = segment
            .carve(segment.base, layout)
            .ok_or(MemError::CapacityOverflow)?;
        self.used.set(used);
        segments.push(segment);
        Ok(ptr)
    }

    /// Commits a segment of whole chunks large enough for `layout`.
    #[cold]
    fn commit_for(&self, layout: Layout) -> MemResult<Segment> {
        let slack = if layout.align() > SEGMENT_ALIGN {
            layout.align()
        } else {
            0
        };
        let needed = layout
            .size()
            .checked_add(slack)
            .and_then(|bytes| bytes.checked_next_multiple_of(self.config.chunk_size))
            .ok_or(MemError::CapacityOverflow)?
            .max(self.config.chunk_size);

        let committed = self.committed.get();
        let exhausted = committed
            .checked_add(needed)
            .is_none_or(|total| total > self.config.reservation);
        if exhausted {
            return Err(MemError::Exhausted {
                requested: layout.size(),
                committed,
                reservation: self.config.reservation,
            });
        }

        let segment = Segment::commit(committed, needed)?;
        self.committed.set(committed + needed);
        self.used.set(committed);

        trace!(
            "committed {} more bytes ({} of {} reserved)",
            needed,
            committed + needed,
            self.config.reservation
        );

        Ok(segment)
    }

    /// Moves `value` into the pool and returns a reference to it.
    ///
    /// # Errors
    ///
    /// See [`MemPool::alloc_layout`].
    #[allow(clippy::mut_from_ref)]
    pub fn try_alloc<T>(&self, value: T) -> MemResult<&mut T> {
        let ptr = self.alloc_layout(Layout::new::<T>())?.cast::<T>();

        // SAFETY: the memory is fresh, aligned for T, large enough for T and
        // handed out exactly once.
        unsafe {
            ptr.as_ptr().write(value);
            Ok(&mut *ptr.as_ptr())
        }
    }

    /// Moves `value` into the pool and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if the pool cannot grow. Use [`MemPool::try_alloc`] to handle
    /// exhaustion as an error.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, value: T) -> &mut T {
        match self.try_alloc(value) {
            Ok(slot) => slot,
            Err(err) => panic!("{err}"),
        }
    }

    /// Releases the whole pool at once.
    ///
    /// Consuming the pool means the borrow checker rejects any call while
    /// references into it are still alive.
    pub fn deinit(self) {
        trace!(
            "releasing pool: {} bytes used, {} committed",
            self.used.get(),
            self.committed.get()
        );
        drop(self);
    }
}

impl Default for MemPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemPool")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}
