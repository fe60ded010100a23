//! Region comment board.
//!
//! Comments are keyed by the resolved place name and kept in creation order.
//! The store lives in memory and can optionally be backed by a JSON file.

mod error;
mod store;

pub use error::CommentError;
pub use store::{Comment, CommentStore};
