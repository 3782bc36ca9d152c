use crate::BOOKMARKS_KEY;
use crate::Bookmark;
use crate::BookmarkStore;
use crate::Result;
use crate::StoreError;
use crate::slot::FileSlot;
use crate::slot::Slot;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

#[cfg(feature = "sqlite")]
use crate::slot::SqliteSlot;

/// Backend selection for bookmark persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Sqlite,
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "sqlite" => Ok(Backend::Sqlite),
            other => Err(format!("unknown backend: {other}")),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::File => f.write_str("file"),
            Backend::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Choose backend using env `BOOKMARKY_BACKEND` if present: `sqlite` or `file`.
/// Unknown or empty values select the file backend.
pub fn choose_backend_from_env() -> Backend {
    std::env::var("BOOKMARKY_BACKEND")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

/// Build the slot for `backend` under `data_dir`. SQLite falls back to the
/// file backend when it is not compiled in.
pub fn open_slot(data_dir: &Path, backend: Backend) -> Result<Box<dyn Slot>> {
    Ok(match backend {
        Backend::File => Box::new(FileSlot::new(data_dir)),
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            std::fs::create_dir_all(data_dir)?;
            Box::new(SqliteSlot::new(data_dir.join("bookmarks.db")))
        }
        #[cfg(not(feature = "sqlite"))]
        Backend::Sqlite => {
            tracing::warn!("sqlite backend not compiled; using file backend");
            Box::new(FileSlot::new(data_dir))
        }
    })
}

/// Open the bookmark store under `data_dir`, picking the backend from the
/// environment when none is given.
pub fn open_store(data_dir: &Path, backend: Option<Backend>) -> Result<BookmarkStore> {
    let backend = backend.unwrap_or_else(choose_backend_from_env);
    tracing::debug!("bookmarks: opening {backend} store in {}", data_dir.display());
    Ok(BookmarkStore::new(open_slot(data_dir, backend)?))
}

/// Key the destination's previous contents are kept under before a
/// migration overwrites them.
pub const PRE_MIGRATE_KEY: &str = "bookmarks.pre-migrate";

/// Copy the bookmark collection from one backend to another. Ids are kept.
/// Returns the record count.
///
/// The source must hold a cleanly decodable collection: a missing or
/// damaged source is an error and nothing is written. An empty source never
/// replaces a non-empty destination. Whatever the destination held is kept
/// under [`PRE_MIGRATE_KEY`] before it is overwritten.
pub fn migrate(data_dir: &Path, from: Backend, to: Backend) -> Result<usize> {
    let refuse = |reason: String| StoreError::MigrateSource {
        backend: from,
        reason,
    };

    let raw = open_slot(data_dir, from)?
        .read(BOOKMARKS_KEY)?
        .ok_or_else(|| refuse("no bookmarks stored".to_string()))?;
    let items: Vec<Bookmark> = serde_json::from_str(&raw)
        .map_err(|e| refuse(format!("stored bookmarks do not decode: {e}")))?;
    let mut seen = HashSet::new();
    for bookmark in &items {
        bookmark.check()?;
        if !seen.insert(bookmark.id.as_str()) {
            return Err(refuse(format!("duplicate id {}", bookmark.id)));
        }
    }
    let count = items.len();
    if from == to {
        return Ok(count);
    }

    let dest = open_slot(data_dir, to)?;
    if let Some(previous) = dest.read(BOOKMARKS_KEY)? {
        let dest_empty =
            serde_json::from_str::<Vec<serde_json::Value>>(&previous).is_ok_and(|v| v.is_empty());
        if items.is_empty() && !dest_empty {
            return Err(refuse(format!("source is empty but {to} holds bookmarks")));
        }
        if !dest_empty {
            tracing::warn!("bookmarks: keeping previous {to} contents under {PRE_MIGRATE_KEY}");
            dest.write(PRE_MIGRATE_KEY, &previous)?;
        }
    }
    dest.write(BOOKMARKS_KEY, &serde_json::to_string(&items)?)?;
    tracing::info!("bookmarks: migrated {count} records from {from} to {to}");
    Ok(count)
}
