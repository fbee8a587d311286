//! # Postdesk Shared
//!
//! Wire types shared with the remote post store and with anything that
//! consumes postdesk notifications.

pub mod dto;
pub mod notice;

pub use dto::{NewPostRow, PostPatchRow, PostRow, StoreErrorBody};
pub use notice::{Notice, NoticeLevel};
