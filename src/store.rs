use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::watch;

use crate::config::StoreConfig;
use crate::entry::Entry;
use crate::storage::{BaseStorage, TtlStorage};

/// Error type for TTL refresh operations
///
/// Only [`Store::set_ttl`] can fail; every other operation is total over
/// its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TtlError {
    /// The key has no entry at all
    #[error("key not found")]
    KeyNotFound,
    /// The key's entry exists but is already past its expiration
    #[error("key expired")]
    KeyExpired,
}

/// Internal shared state for the store
struct StoreInner<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    default_ttl: Option<Duration>,
    /// Sender to signal shutdown to the sweep task, if one was started
    shutdown_tx: Option<watch::Sender<bool>>,
}

/// Thread-safe in-memory key-value store with per-key TTL support
///
/// A single readers-writer lock guards the entry map: lookups take the
/// shared mode, mutations and sweep passes take the exclusive mode. No
/// operation holds the lock across a blocking boundary.
///
/// Expiration is lazy: a lookup treats an entry past its expiration as
/// absent, whether or not it has been physically removed yet. When a sweep
/// interval is configured, a background task periodically removes expired
/// entries to reclaim memory; the sweeper is stopped when [`Store::shutdown`]
/// is called or the last store handle is dropped.
///
/// # Example
///
/// ```rust,no_run
/// use stashkv::{Store, StoreConfig};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let config = StoreConfig::default()
///         .with_default_ttl(Duration::from_secs(300))
///         .with_sweep_interval(Duration::from_secs(30));
///     let store: Store<String> = Store::with_config(config);
///
///     store.set("session:1", "alice".to_string());
///     store.set_with_ttl("session:2", "bob".to_string(), Duration::from_secs(60));
/// }
/// ```
pub struct Store<V> {
    inner: Arc<StoreInner<V>>,
}

impl<V> Clone for Store<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Send + Sync + 'static> Store<V> {
    /// Creates a new store with default configuration
    ///
    /// No default TTL (entries stored via [`Store::set`] never expire) and
    /// no background sweeper, so no Tokio runtime is required.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a new store with custom configuration
    ///
    /// When a sweep interval is configured, a background sweep task is
    /// spawned at construction.
    ///
    /// # Panics
    ///
    /// Panics if a sweep interval is configured and this is called outside
    /// of a Tokio runtime context. The sweeper requires a runtime; without
    /// a sweep interval no runtime is needed.
    pub fn with_config(config: StoreConfig) -> Self {
        let (shutdown_tx, sweeper) = match config.sweep_interval {
            Some(interval) => {
                let (tx, rx) = watch::channel(false);
                (Some(tx), Some((interval, rx)))
            }
            None => (None, None),
        };

        let inner = Arc::new(StoreInner {
            entries: RwLock::new(HashMap::new()),
            default_ttl: config.default_ttl,
            shutdown_tx,
        });

        if let Some((interval, shutdown_rx)) = sweeper {
            // Verify that a Tokio runtime is available before proceeding.
            // This provides a clear error message instead of a cryptic panic
            // from tokio::spawn.
            if tokio::runtime::Handle::try_current().is_err() {
                panic!(
                    "stashkv::Store requires a Tokio runtime when a sweep \
                     interval is configured. Ensure the store is constructed \
                     from within a #[tokio::main] or #[tokio::test] context, \
                     or leave StoreConfig::sweep_interval unset."
                );
            }

            // The task gets only a weak reference: it must not keep the
            // store alive, or dropping the last handle could never free
            // the map nor stop the task.
            let sweep_inner = Arc::downgrade(&inner);
            tokio::spawn(Self::sweep_task(sweep_inner, interval, shutdown_rx));
        }

        Self { inner }
    }

    /// Background task that periodically removes expired entries
    async fn sweep_task(
        inner: Weak<StoreInner<V>>,
        interval: Duration,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        // Skip the first immediate tick - we want to wait for the interval first
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Upgrade failing means every store handle is gone
                    let Some(inner) = inner.upgrade() else { break };
                    let removed = Self::sweep_inner(&inner);
                    if removed > 0 {
                        tracing::debug!(removed, "sweep removed expired entries");
                    }
                }
                changed = shutdown_rx.changed() => {
                    // A closed channel means the store was dropped
                    if changed.is_err() || *shutdown_rx.borrow() {
                        tracing::debug!("sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }
}

impl<V> Store<V> {
    /// Internal sweep logic (shared between manual and background sweeps)
    ///
    /// A single `now` snapshot is taken before the pass so every entry is
    /// judged against the same instant, matching lookup semantics.
    fn sweep_inner(inner: &StoreInner<V>) -> usize {
        let now = Instant::now();
        let mut entries = inner.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Computes the absolute expiration instant for a TTL
    ///
    /// A TTL so large that `now + ttl` overflows `Instant` degrades to
    /// "never expires".
    fn deadline(ttl: Duration) -> Option<Instant> {
        Instant::now().checked_add(ttl)
    }

    /// Retrieves a value by key
    ///
    /// Returns `None` if the key doesn't exist or has expired. Reads never
    /// mutate the map: an expired entry is reported absent but left in
    /// place for the sweeper (or an explicit [`Store::del`]) to reclaim.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let now = Instant::now();
        let entries = self.inner.entries.read();
        let entry = entries.get(key)?;

        if entry.is_expired(now) {
            return None;
        }

        Some(entry.value().clone())
    }

    /// Retrieves a value along with its absolute expiration instant
    ///
    /// The instant is `None` for entries that never expire. Returns `None`
    /// under the same conditions as [`Store::get`].
    pub fn get_with_ttl(&self, key: &str) -> Option<(V, Option<Instant>)>
    where
        V: Clone,
    {
        let now = Instant::now();
        let entries = self.inner.entries.read();
        let entry = entries.get(key)?;

        if entry.is_expired(now) {
            return None;
        }

        Some((entry.value().clone(), entry.expires_at()))
    }

    /// Stores a value under the given key using the store's default TTL
    ///
    /// If the key already exists, the value is overwritten. Without a
    /// configured default TTL the entry never expires.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let expires_at = self.inner.default_ttl.and_then(Self::deadline);
        let entry = Entry::new(value, expires_at);
        self.inner.entries.write().insert(key.into(), entry);
    }

    /// Stores a value under the given key with an explicit TTL
    ///
    /// If the key already exists, the value is overwritten. A zero TTL is
    /// valid and means "expires immediately": expiry is strictly-after, so
    /// the entry becomes unreadable on the very next lookup.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = Entry::new(value, Self::deadline(ttl));
        self.inner.entries.write().insert(key.into(), entry);
    }

    /// Refreshes the expiration of an existing, live entry
    ///
    /// The new expiration is `now + ttl`; the stored value is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TtlError::KeyNotFound`] if the key has no entry, and
    /// [`TtlError::KeyExpired`] if the entry is already past its
    /// expiration. An expired entry cannot be resurrected by refreshing
    /// its TTL; the caller must store a fresh value instead.
    pub fn set_ttl(&self, key: &str, ttl: Duration) -> Result<(), TtlError> {
        let now = Instant::now();
        let mut entries = self.inner.entries.write();
        let entry = entries.get_mut(key).ok_or(TtlError::KeyNotFound)?;

        if entry.is_expired(now) {
            return Err(TtlError::KeyExpired);
        }

        entry.refresh(now.checked_add(ttl));
        Ok(())
    }

    /// Removes the key if present
    ///
    /// Removing an absent key is a no-op, never an error.
    pub fn del(&self, key: &str) {
        self.inner.entries.write().remove(key);
    }

    /// Removes every entry from the store
    pub fn clear(&self) {
        self.inner.entries.write().clear();
    }

    /// Manually removes all expired entries
    ///
    /// Returns the number of entries removed. When a sweep interval is
    /// configured this also happens periodically in the background.
    pub fn sweep(&self) -> usize {
        Self::sweep_inner(&self.inner)
    }

    /// Checks whether a key exists and is not expired
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        let now = Instant::now();
        self.inner
            .entries
            .read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Returns a snapshot of all keys that are not expired
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.inner
            .entries
            .read()
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Returns the number of entries in the store (including expired ones
    /// not yet swept)
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    /// Returns `true` if the store holds no entries at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    /// Gracefully shuts down the background sweep task
    ///
    /// This is called automatically when the last store handle is dropped,
    /// but can be called manually if needed. A no-op when no sweeper was
    /// started. In-flight store operations are unaffected.
    pub fn shutdown(&self) {
        if let Some(tx) = &self.inner.shutdown_tx {
            let _ = tx.send(true);
        }
    }
}

impl<V: Send + Sync + 'static> Default for Store<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for StoreInner<V> {
    fn drop(&mut self) {
        // Signal the sweep task to stop when the store is dropped
        if let Some(tx) = &self.shutdown_tx {
            let _ = tx.send(true);
        }
    }
}

impl<V: Clone> BaseStorage<V> for Store<V> {
    fn get(&self, key: &str) -> Option<V> {
        Store::get(self, key)
    }

    fn set(&self, key: &str, value: V) {
        Store::set(self, key, value)
    }

    fn del(&self, key: &str) {
        Store::del(self, key)
    }
}

impl<V: Clone> TtlStorage<V> for Store<V> {
    fn set_with_ttl(&self, key: &str, value: V, ttl: Duration) {
        Store::set_with_ttl(self, key, value, ttl)
    }

    fn set_ttl(&self, key: &str, ttl: Duration) -> Result<(), TtlError> {
        Store::set_ttl(self, key, ttl)
    }

    fn get_with_ttl(&self, key: &str) -> Option<(V, Option<Instant>)> {
        Store::get_with_ttl(self, key)
    }
}
