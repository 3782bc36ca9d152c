use serde::Deserialize;
use serde::Serialize;

/// A persisted bookmark. `id` is assigned by the store and never changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: String,
}

/// Caller-supplied fields for a bookmark that does not exist yet.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub url: String,
    pub title: String,
}

impl BookmarkDraft {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    pub(crate) fn check(&self) -> crate::Result<()> {
        check_fields(&self.url, &self.title)
    }
}

impl Bookmark {
    pub(crate) fn check(&self) -> crate::Result<()> {
        if self.id.is_empty() {
            return Err(crate::StoreError::Invalid("id must not be empty"));
        }
        check_fields(&self.url, &self.title)
    }
}

fn check_fields(url: &str, title: &str) -> crate::Result<()> {
    if url.trim().is_empty() {
        return Err(crate::StoreError::Invalid("url must not be empty"));
    }
    if title.trim().is_empty() {
        return Err(crate::StoreError::Invalid("title must not be empty"));
    }
    Ok(())
}
