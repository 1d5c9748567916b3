use std::time::Duration;

/// Configuration for a store's TTL defaults and background sweeping
///
/// # Example
///
/// ```rust
/// use stashkv::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_default_ttl(Duration::from_secs(300))
///     .with_sweep_interval(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// TTL applied by `set` when the caller gives no explicit TTL
    /// (default: `None`, entries never expire)
    pub default_ttl: Option<Duration>,
    /// Interval between background sweep passes
    /// (default: `None`, no sweeper is started)
    pub sweep_interval: Option<Duration>,
}

impl StoreConfig {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default TTL applied by `set`
    ///
    /// Values stored without an explicit TTL expire this long after they
    /// are written. Without a default TTL they never expire.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Sets the interval between background sweep passes
    ///
    /// The sweeper physically removes expired entries to reclaim memory.
    /// It is purely an optimization: lookups treat expired entries as
    /// absent whether or not a sweeper is running.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stashkv::StoreConfig;
    /// use std::time::Duration;
    ///
    /// // Sweep every 30 seconds
    /// let config = StoreConfig::default()
    ///     .with_sweep_interval(Duration::from_secs(30));
    /// ```
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }
}
