//! Key-Value store abstraction with automatic serialization.

use std::rc::Rc;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::CacheError;

/// A byte-oriented key-value store.
///
/// This is the only surface the storefront needs from browser-local storage
/// or its server-side equivalents. Methods take `&self`; implementations use
/// interior mutability.
pub trait KeyValueStore {
    /// Read the raw bytes stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists in the store.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }
}

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the cache and return the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<CartState> = cache.get("storefront:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get a value as untyped JSON, for callers that validate shape first.
    pub fn get_json(&self, key: &str) -> Result<Option<serde_json::Value>, CacheError> {
        self.get(key)
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("storefront:cart", &state)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = shop_cache::cache_key!("storefront", "cart");
/// assert_eq!(key, "storefront:cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_typed_set_and_get() {
        let cache = Cache::new(MemoryStore::new());
        let value = Sample {
            name: "tee".to_string(),
            count: 3,
        };

        cache.set("k", &value).unwrap();
        let loaded: Option<Sample> = cache.get("k").unwrap();
        assert_eq!(loaded, Some(value));
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let loaded: Option<Sample> = cache.get("missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_get_wrong_shape_is_error() {
        let store = MemoryStore::new();
        store.set("k", b"{\"unexpected\": true}").unwrap();
        let cache = Cache::new(store);

        let result: Result<Option<Sample>, _> = cache.get("k");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_delete_and_exists() {
        let cache = Cache::new(MemoryStore::new());
        cache.set("k", &1u32).unwrap();
        assert!(cache.exists("k").unwrap());

        cache.delete("k").unwrap();
        assert!(!cache.exists("k").unwrap());
    }

    #[test]
    fn test_cache_over_shared_store() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(Arc::clone(&store));
        cache.set("k", &"v").unwrap();

        assert_eq!(store.get("k").unwrap(), Some(b"\"v\"".to_vec()));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("storefront", "cart"), "storefront:cart");
        assert_eq!(cache_key!("cart", "user", 42), "cart:user:42");
    }
}
