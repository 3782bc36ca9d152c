//! Local bookmark persistence.
//!
//! The whole collection lives in one named slot as a JSON array and is
//! rewritten on every mutation. The slot itself is pluggable, see
//! [`slot::Slot`].

pub mod error;
pub mod factory;
pub mod slot;
pub mod store;
pub mod types;

pub use error::Result;
pub use error::StoreError;
pub use store::BOOKMARKS_KEY;
pub use store::BookmarkStore;
pub use types::Bookmark;
pub use types::BookmarkDraft;
