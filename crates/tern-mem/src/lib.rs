//! tern memory management infrastructure
//!
//! This crate provides the memory substrate of the tern compiler frontend:
//!
//! - **[`MemPool`]**: a reserve-then-commit bump allocator. Individual
//!   allocations are never freed; the whole pool is released at once.
//! - **[`ArenaVec`]**: a growable array whose storage always comes from a
//!   [`MemPool`]. Growth doubles the capacity and leaves the old storage
//!   behind in the pool.
//!
//! # Example
//!
//! ```
//! use tern_mem::{ArenaVec, MemPool};
//!
//! let pool = MemPool::new();
//! let mut items = ArenaVec::new_in(&pool).unwrap();
//! items.push(1u32).unwrap();
//! items.push(2).unwrap();
//!
//! assert_eq!(items.as_slice(), &[1, 2]);
//! assert!(pool.used() <= pool.committed());
//! ```

pub mod arena;
pub mod error;
pub mod vec;

pub use arena::{MemPool, PoolConfig, PoolStats};
pub use error::{MemError, MemResult};
pub use vec::ArenaVec;
