//! Ports - trait definitions for external collaborators.
//! These are the "interfaces" that infrastructure must implement.

mod notify;
mod session;
mod store;

pub use notify::NotificationSink;
pub use session::SessionProvider;
pub use store::PostStore;
