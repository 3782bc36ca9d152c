use crate::Result;
use crate::StoreError;

/// A durable key-value location holding one serialized value per key.
///
/// Reading a key that was never written yields `Ok(None)`. A write replaces
/// the previous value in a single call.
pub trait Slot: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Keys end up as file names and table rows, so keep them boring.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !key.starts_with('.');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

pub mod file;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::FileSlot;
pub use memory::MemorySlot;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSlot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_rules() {
        assert!(check_key("bookmarks").is_ok());
        assert!(check_key("bookmarks.corrupt").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key("../etc").is_err());
        assert!(check_key(".hidden").is_err());
        assert!(check_key("a/b").is_err());
    }
}
