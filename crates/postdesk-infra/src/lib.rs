//! # Postdesk Infrastructure
//!
//! Concrete implementations of the ports defined in `postdesk-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `rest` - PostgREST-style remote post store via reqwest

pub mod notify;
pub mod session;
pub mod store;

// Re-exports - In-Memory
pub use notify::{BroadcastNotificationSink, TracingNotificationSink};
pub use session::{StaticSession, WatchSession};
pub use store::InMemoryPostStore;

// Re-exports - Remote
#[cfg(feature = "rest")]
pub use store::{RestPostStore, RestStoreConfig};
