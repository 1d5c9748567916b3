//! # Stashkv
//!
//! An in-process, concurrency-safe key-value store with optional per-key
//! TTL (time-to-live) expiration.
//!
//! ## Features
//!
//! - Thread-safe storage behind a single readers-writer lock
//! - Generic over the stored value type
//! - Lazy expiration on read: expired entries are treated as absent whether
//!   or not they have been physically removed yet
//! - Optional background sweeper that periodically reclaims expired entries
//! - TTL refresh for live entries, with expired entries deliberately not
//!   resurrectable
//!
//! ## Example
//!
//! ```rust,no_run
//! use stashkv::{Store, StoreConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Default TTL of 5 minutes, sweep every 30 seconds
//!     let config = StoreConfig::default()
//!         .with_default_ttl(Duration::from_secs(300))
//!         .with_sweep_interval(Duration::from_secs(30));
//!     let store: Store<String> = Store::with_config(config);
//!
//!     // Store a value with the default TTL
//!     store.set("user:123", "John Doe".to_string());
//!
//!     // Or with an explicit TTL
//!     store.set_with_ttl("session:9", "token".to_string(), Duration::from_secs(60));
//!
//!     // Retrieve the value
//!     if let Some(value) = store.get("user:123") {
//!         println!("User: {}", value);
//!     }
//!
//!     // Extend the lifetime of a live entry
//!     store.set_ttl("user:123", Duration::from_secs(600)).unwrap();
//!
//!     // Delete a key (idempotent)
//!     store.del("user:123");
//!
//!     // Stop the background sweeper on the way out
//!     store.shutdown();
//! }
//! ```

mod config;
mod entry;
mod storage;
mod store;

pub use config::StoreConfig;
pub use entry::Entry;
pub use storage::{BaseStorage, TtlStorage};
pub use store::{Store, TtlError};
