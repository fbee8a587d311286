//! Post store implementations - remote REST and in-memory fallback.

mod memory;

pub use memory::InMemoryPostStore;

#[cfg(feature = "rest")]
mod convert;
#[cfg(feature = "rest")]
mod rest;
#[cfg(feature = "rest")]
pub use self::rest::{RestPostStore, RestStoreConfig};
