use std::time::Instant;

/// Represents a stored value with its optional expiration instant
///
/// An `expires_at` of `None` marks an entry that never expires.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    /// Creates a new entry with the given value and expiration instant
    pub fn new(value: V, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    /// Returns a reference to the stored value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the expiration instant, or `None` if the entry never expires
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Checks whether this entry is expired as of `now`
    ///
    /// An entry is expired iff it carries a finite expiration and `now` is
    /// strictly after it. This is the single expiration check shared by
    /// lazy reads and the background sweeper.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => false,
        }
    }

    /// Replaces the expiration instant, leaving the value untouched
    pub(crate) fn refresh(&mut self, expires_at: Option<Instant>) {
        self.expires_at = expires_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_entry_not_expired() {
        let entry = Entry::new("test_value", Some(Instant::now() + Duration::from_secs(60)));

        assert_eq!(*entry.value(), "test_value");
        assert!(!entry.is_expired(Instant::now()));
    }

    #[test]
    fn test_entry_expired() {
        let now = Instant::now();
        let entry = Entry::new("test_value", Some(now - Duration::from_secs(1)));

        assert!(entry.is_expired(now));
    }

    #[test]
    fn test_entry_at_exact_deadline_is_still_live() {
        // Expiry is strictly-after, so an entry checked at its own deadline
        // is still readable.
        let now = Instant::now();
        let entry = Entry::new(42, Some(now));

        assert!(!entry.is_expired(now));
        assert!(entry.is_expired(now + Duration::from_nanos(1)));
    }

    #[test]
    fn test_entry_without_expiration_never_expires() {
        let entry = Entry::new("forever", None);

        assert!(!entry.is_expired(Instant::now() + Duration::from_secs(60 * 60 * 24 * 365)));
        assert_eq!(entry.expires_at(), None);
    }

    #[test]
    fn test_refresh_replaces_expiration_only() {
        let now = Instant::now();
        let mut entry = Entry::new("value", Some(now + Duration::from_millis(10)));

        entry.refresh(Some(now + Duration::from_secs(60)));

        assert_eq!(*entry.value(), "value");
        assert!(!entry.is_expired(now + Duration::from_secs(1)));
    }
}
