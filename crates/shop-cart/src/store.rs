//! The cart store: one owned cart, a command surface, change listeners and
//! a persistence hook.
//!
//! The store is an ordinary value. Whoever builds it owns it and hands
//! references to the code that renders or mutates the cart; there is no
//! process-wide instance.
//!
//! # Example
//!
//! ```rust
//! use shop_cache::MemoryStore;
//! use shop_cart::prelude::*;
//!
//! let mut store = CartStore::open(MemoryStore::new(), StoreOptions::default());
//! store.subscribe(|state: &CartState| println!("{} items", state.item_count()));
//!
//! store.add_line(CartLine::new("shoe1", "9", Money::from_cents(5000), 1));
//! assert_eq!(store.subtotal().cents(), 5000);
//! ```

use shop_cache::{cache_key, Cache, KeyValueStore};

use crate::cart::{reduce, CartCommand, CartLine, CartState};
use crate::ids::ProductId;
use crate::money::Money;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "storefront";

/// Key suffix under the namespace.
const CART_KEY: &str = "cart";

/// Options for opening a [`CartStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Storage key holding the cart snapshot.
    pub key: String,
}

impl StoreOptions {
    /// Store the snapshot under `<namespace>:cart`.
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            key: cache_key!(namespace, CART_KEY),
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }
}

/// Receives every committed cart state.
pub trait CartListener {
    fn on_change(&self, state: &CartState);
}

impl<F> CartListener for F
where
    F: Fn(&CartState),
{
    fn on_change(&self, state: &CartState) {
        self(state)
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Mirrors committed cart states into a key-value store.
///
/// Storage failures are logged and swallowed: the in-memory cart stays the
/// source of truth for the running session.
pub struct CartPersistence<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> CartPersistence<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(storage),
            key: key.into(),
        }
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn storage(&self) -> &S {
        self.cache.store()
    }

    /// Read the persisted snapshot.
    ///
    /// Missing, unreadable, or malformed values all yield `None`. A value is
    /// accepted only if it is a JSON object with an array-typed `lines`
    /// (or legacy `items`) field whose entries decode as cart lines.
    pub fn load(&self) -> Option<CartState> {
        let value = match self.cache.get_json(&self.key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no cart snapshot found");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to load cart snapshot");
                return None;
            }
        };

        if !has_lines_array(&value) {
            tracing::warn!(key = %self.key, "ignoring cart snapshot without a lines array");
            return None;
        }

        match serde_json::from_value::<CartState>(value) {
            Ok(state) => {
                tracing::debug!(
                    key = %self.key,
                    lines = state.line_count(),
                    item_count = state.item_count(),
                    "loaded cart snapshot"
                );
                Some(state)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring malformed cart snapshot");
                None
            }
        }
    }

    /// Post-commit hook: write a non-empty cart, evict an empty one.
    pub fn commit(&self, state: &CartState) {
        if state.is_empty() {
            if let Err(e) = self.cache.delete(&self.key) {
                tracing::warn!(key = %self.key, error = %e, "failed to clear cart snapshot");
            }
        } else if let Err(e) = self.cache.set(&self.key, state) {
            tracing::warn!(key = %self.key, error = %e, "failed to save cart snapshot");
        }
    }
}

fn has_lines_array(value: &serde_json::Value) -> bool {
    value.as_object().is_some_and(|obj| {
        obj.get("lines")
            .or_else(|| obj.get("items"))
            .is_some_and(serde_json::Value::is_array)
    })
}

/// Owner of the canonical cart state.
///
/// All mutation goes through [`CartStore::dispatch`] (or the convenience
/// methods wrapping it). After each command the store runs the persistence
/// hook, then notifies listeners in registration order.
pub struct CartStore<S> {
    state: CartState,
    persistence: CartPersistence<S>,
    listeners: Vec<(SubscriptionId, Box<dyn CartListener>)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open a store, hydrating it from `storage` if a valid snapshot exists.
    ///
    /// The snapshot is read exactly once, here; no command can run before
    /// hydration because the store does not exist until this returns.
    pub fn open(storage: S, options: StoreOptions) -> Self {
        let persistence = CartPersistence::new(storage, options.key);
        let state = match persistence.load() {
            Some(snapshot) => reduce(CartState::new(), CartCommand::Restore(snapshot)),
            None => CartState::new(),
        };
        Self {
            state,
            persistence,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Apply a command and return the committed state.
    pub fn dispatch(&mut self, command: CartCommand) -> &CartState {
        let name = command.name();
        let persists = command.persists();

        let previous = std::mem::take(&mut self.state);
        self.state = reduce(previous, command);

        tracing::debug!(
            command = name,
            lines = self.state.line_count(),
            item_count = self.state.item_count(),
            subtotal = %self.state.subtotal(),
            "cart command applied"
        );

        if persists {
            self.persistence.commit(&self.state);
        }
        for (_, listener) in &self.listeners {
            listener.on_change(&self.state);
        }
        &self.state
    }

    pub fn add_line(&mut self, line: CartLine) -> &CartState {
        self.dispatch(CartCommand::AddLine(line))
    }

    pub fn remove_line(&mut self, product_id: impl Into<ProductId>, size: &str) -> &CartState {
        self.dispatch(CartCommand::remove(product_id, size))
    }

    pub fn set_quantity(
        &mut self,
        product_id: impl Into<ProductId>,
        size: &str,
        quantity: i64,
    ) -> &CartState {
        self.dispatch(CartCommand::set_quantity(product_id, size, quantity))
    }

    pub fn clear(&mut self) -> &CartState {
        self.dispatch(CartCommand::Clear)
    }

    /// Register a listener for committed states.
    pub fn subscribe<L>(&mut self, listener: L) -> SubscriptionId
    where
        L: CartListener + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < len_before
    }

    /// Current committed state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    pub fn subtotal(&self) -> Money {
        self.state.subtotal()
    }

    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Storage key holding this cart's snapshot.
    pub fn storage_key(&self) -> &str {
        self.persistence.key()
    }

    /// Borrow the underlying key-value store.
    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    /// Close the store and hand back its storage.
    pub fn into_storage(self) -> S {
        self.persistence.cache.into_inner()
    }
}
