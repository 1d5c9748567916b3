use std::time::{Duration, Instant};

use crate::store::TtlError;

/// The minimal key-value capability set
///
/// Absence is signaled through `Option`, never an error: `get` on a missing
/// key returns `None` and `del` on a missing key is a no-op.
pub trait BaseStorage<V> {
    /// Looks up a value by key, returning `None` if absent or expired
    fn get(&self, key: &str) -> Option<V>;

    /// Inserts or overwrites the value for a key
    fn set(&self, key: &str, value: V);

    /// Removes the key if present; removing an absent key is a no-op
    fn del(&self, key: &str);
}

/// Key-value storage with per-key expiration
pub trait TtlStorage<V>: BaseStorage<V> {
    /// Inserts or overwrites with an explicit TTL
    ///
    /// A zero TTL is valid and means "expires immediately": the entry is
    /// unreadable on the very next lookup.
    fn set_with_ttl(&self, key: &str, value: V, ttl: Duration);

    /// Refreshes the expiration of an existing, live entry
    ///
    /// # Errors
    ///
    /// Returns [`TtlError::KeyNotFound`] when the key is absent and
    /// [`TtlError::KeyExpired`] when its entry is already past expiration.
    fn set_ttl(&self, key: &str, ttl: Duration) -> Result<(), TtlError>;

    /// Looks up a value along with its expiration instant
    ///
    /// The instant is `None` for entries that never expire. Returns `None`
    /// under the same conditions as [`BaseStorage::get`].
    fn get_with_ttl(&self, key: &str) -> Option<(V, Option<Instant>)>;
}
