//! Post collection - the owner-scoped, store-confirmed list of posts.

mod collection;
mod gate;

pub use collection::PostCollection;
