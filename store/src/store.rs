use crate::Bookmark;
use crate::BookmarkDraft;
use crate::Result;
use crate::StoreError;
use crate::slot::Slot;
use std::collections::HashSet;
use uuid::Uuid;

/// Slot key holding the whole collection.
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// What a read of the slot produced. `damaged` holds the raw value when some
/// or all of it could not be decoded, so it can be preserved before the slot
/// is rewritten.
struct Loaded {
    items: Vec<Bookmark>,
    damaged: Option<String>,
}

/// Owns the bookmark collection stored under a single slot key.
///
/// Every mutation reads the full collection, changes it, and writes it back.
/// That is only sound with one writer at a time.
pub struct BookmarkStore {
    slot: Box<dyn Slot>,
    key: String,
}

impl BookmarkStore {
    pub fn new(slot: Box<dyn Slot>) -> Self {
        Self::with_key(slot, BOOKMARKS_KEY)
    }

    fn with_key(slot: Box<dyn Slot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    /// All bookmarks in stored order. Never fails: a missing, unreadable or
    /// unparseable slot yields an empty collection.
    pub fn get_all(&self) -> Vec<Bookmark> {
        match self.slot.read(&self.key) {
            Ok(raw) => self.decode(raw).items,
            Err(e) => {
                tracing::warn!("bookmarks: reading slot {} failed: {e}", self.key);
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Bookmark> {
        self.get_all().into_iter().find(|b| b.id == id)
    }

    /// Append a new bookmark with a freshly generated id.
    pub fn create(&self, draft: BookmarkDraft) -> Result<Bookmark> {
        draft.check()?;
        let mut loaded = self.load()?;
        let bookmark = Bookmark {
            id: fresh_id(&loaded.items),
            url: draft.url,
            title: draft.title,
        };
        loaded.items.push(bookmark.clone());
        self.save(&loaded)?;
        tracing::debug!("bookmarks: created {}", bookmark.id);
        Ok(bookmark)
    }

    /// Replace the bookmark with the same id, keeping its position.
    pub fn update(&self, bookmark: Bookmark) -> Result<Bookmark> {
        bookmark.check()?;
        let mut loaded = self.load()?;
        let Some(existing) = loaded.items.iter_mut().find(|b| b.id == bookmark.id) else {
            return Err(StoreError::NotFound(bookmark.id));
        };
        *existing = bookmark.clone();
        self.save(&loaded)?;
        tracing::debug!("bookmarks: updated {}", bookmark.id);
        Ok(bookmark)
    }

    /// Remove the bookmark with `id`. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut loaded = self.load()?;
        let before = loaded.items.len();
        loaded.items.retain(|b| b.id != id);
        let removed = loaded.items.len() < before;
        self.save(&loaded)?;
        if removed {
            tracing::debug!("bookmarks: deleted {id}");
        }
        Ok(removed)
    }

    /// Create every valid draft in one rewrite. Invalid drafts are skipped.
    pub fn import(&self, drafts: impl IntoIterator<Item = BookmarkDraft>) -> Result<usize> {
        let mut loaded = self.load()?;
        let mut count = 0usize;
        for draft in drafts {
            if let Err(e) = draft.check() {
                tracing::warn!("bookmarks: skipping import entry: {e}");
                continue;
            }
            let id = fresh_id(&loaded.items);
            loaded.items.push(Bookmark {
                id,
                url: draft.url,
                title: draft.title,
            });
            count += 1;
        }
        self.save(&loaded)?;
        Ok(count)
    }

    /// Read for a mutation. Unlike [`Self::get_all`], I/O errors propagate:
    /// writing after a failed read could discard the stored collection.
    fn load(&self) -> Result<Loaded> {
        let raw = self.slot.read(&self.key)?;
        Ok(self.decode(raw))
    }

    fn decode(&self, raw: Option<String>) -> Loaded {
        let Some(raw) = raw else {
            return Loaded {
                items: Vec::new(),
                damaged: None,
            };
        };
        let values = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("bookmarks: slot {} is not a JSON array: {e}", self.key);
                return Loaded {
                    items: Vec::new(),
                    damaged: Some(raw),
                };
            }
        };
        let total = values.len();
        let mut seen = HashSet::new();
        let items: Vec<Bookmark> = values
            .into_iter()
            .filter_map(|v| serde_json::from_value::<Bookmark>(v).ok())
            .filter(|b| seen.insert(b.id.clone()))
            .collect();
        let damaged = if items.len() < total {
            let dropped = total - items.len();
            tracing::warn!("bookmarks: dropped {dropped} undecodable or duplicate entries");
            Some(raw)
        } else {
            None
        };
        Loaded { items, damaged }
    }

    fn save(&self, loaded: &Loaded) -> Result<()> {
        if let Some(raw) = &loaded.damaged {
            let backup = format!("{}.corrupt", self.key);
            tracing::warn!("bookmarks: preserving previous slot contents under {backup}");
            self.slot.write(&backup, raw)?;
        }
        let json = serde_json::to_string(&loaded.items)?;
        self.slot.write(&self.key, &json)
    }
}

fn fresh_id(existing: &[Bookmark]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !existing.iter().any(|b| b.id == id) {
            return id;
        }
    }
}
