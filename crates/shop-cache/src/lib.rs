//! Type-safe key-value storage layer for the storefront.
//!
//! The storefront persists small JSON documents (the cart snapshot) in a
//! byte-oriented key-value store. This crate provides the store abstraction,
//! two backends, and a typed wrapper with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use shop_cache::{cache_key, Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! let key = cache_key!("storefront", "cart");
//!
//! cache.set(&key, &vec![1, 2, 3]).unwrap();
//! let value: Option<Vec<u32>> = cache.get(&key).unwrap();
//! assert_eq!(value, Some(vec![1, 2, 3]));
//!
//! cache.delete(&key).unwrap();
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
