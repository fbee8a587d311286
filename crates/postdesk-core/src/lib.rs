//! # Postdesk Core
//!
//! The domain layer of Postdesk.
//! This crate holds the post collection logic and the edit session state
//! machine, with every external collaborator reached through a port.

pub mod domain;
pub mod editor;
pub mod error;
pub mod ports;
pub mod posts;

pub use editor::{EditMode, EditSession, Mutation, PostEditor};
pub use error::{EditorError, ErrorKind, Field, PostError, StoreError};
pub use posts::PostCollection;
