//! Saved colors, persisted as a JSON array of hex strings.
//!
//! [`SavedColors`] keeps an ordered, duplicate-free list in memory and
//! writes the whole array to its [`KeyValueBackend`] after every mutation.
//! Two backends ship with the crate: [`MemoryBackend`] for tests and WASM
//! hosts that persist elsewhere, and [`FileBackend`] which stores one
//! `<key>.json` file per key.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Key the saved colors are stored under.
pub const SAVED_COLORS_KEY: &str = "savedColors";

/// Result of adding a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The color was appended.
    Added,
    /// The color was already saved; nothing changed.
    AlreadyPresent,
}

/// Ordered set of saved hex colors.
pub trait SavedPaletteStore {
    /// Saved colors in insertion order, as uppercase `#RRGGBB`.
    fn list(&self) -> Vec<String>;

    /// Save a color unless it is already present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHex`] for malformed input, or a backend error
    /// if persisting fails.
    fn add(&mut self, hex: &str) -> Result<AddOutcome>;

    /// Remove the color at `index`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] past the end, or a backend error if
    /// persisting fails.
    fn remove_at(&mut self, index: usize) -> Result<String>;
}

/// String key/value persistence.
pub trait KeyValueBackend {
    /// Value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    /// Empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory backend: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Backend rooted at `dir`. The directory is created on first write.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory, e.g. `~/.local/share/chromakit` on Linux.
    #[must_use]
    pub fn default_location() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("chromakit"))
    }

    /// Root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "wrote store key");
        Ok(())
    }
}

/// Saved colors backed by a [`KeyValueBackend`].
#[derive(Debug, Clone)]
pub struct SavedColors<B: KeyValueBackend> {
    backend: B,
    colors: Vec<String>,
}

impl<B: KeyValueBackend> SavedColors<B> {
    /// Load the saved list from `backend`. A missing key is an empty list.
    ///
    /// Stored entries are normalized to uppercase `#RRGGBB`; entries that
    /// collapse onto an earlier one are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read, holds invalid JSON,
    /// or holds an entry that is not a hex color.
    pub fn open(backend: B) -> Result<Self> {
        let stored: Vec<String> = match backend.get(SAVED_COLORS_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };

        let mut colors = Vec::with_capacity(stored.len());
        for entry in &stored {
            let hex = Rgb::from_hex(entry)?.to_hex();
            if !colors.contains(&hex) {
                colors.push(hex);
            }
        }
        debug!(stored = stored.len(), count = colors.len(), "loaded saved colors");
        Ok(Self { backend, colors })
    }

    /// Underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of saved colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Write `next` to the backend and adopt it only once the write succeeds.
    fn commit(&mut self, next: Vec<String>) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        self.backend.set(SAVED_COLORS_KEY, &json)?;
        self.colors = next;
        Ok(())
    }
}

impl<B: KeyValueBackend> SavedPaletteStore for SavedColors<B> {
    fn list(&self) -> Vec<String> {
        self.colors.clone()
    }

    fn add(&mut self, hex: &str) -> Result<AddOutcome> {
        let hex = Rgb::from_hex(hex)?.to_hex();
        if self.colors.contains(&hex) {
            debug!(%hex, "color already saved");
            return Ok(AddOutcome::AlreadyPresent);
        }

        let mut next = self.colors.clone();
        next.push(hex.clone());
        self.commit(next)?;
        info!(%hex, count = self.colors.len(), "saved color");
        Ok(AddOutcome::Added)
    }

    fn remove_at(&mut self, index: usize) -> Result<String> {
        if index >= self.colors.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.colors.len(),
            });
        }

        let mut next = self.colors.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        info!(hex = %removed, index, "removed saved color");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> SavedColors<MemoryBackend> {
        SavedColors::open(MemoryBackend::new()).unwrap()
    }

    #[test]
    fn test_empty_on_missing_key() {
        let store = memory_store();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_add_preserves_order_and_normalizes() {
        let mut store = memory_store();
        assert_eq!(store.add("#2e8b57").unwrap(), AddOutcome::Added);
        assert_eq!(store.add("FF0000").unwrap(), AddOutcome::Added);
        assert_eq!(store.list(), vec!["#2E8B57", "#FF0000"]);
    }

    #[test]
    fn test_duplicate_add() {
        let mut store = memory_store();
        store.add("#2E8B57").unwrap();
        assert_eq!(store.add("#2e8b57").unwrap(), AddOutcome::AlreadyPresent);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_invalid_hex() {
        let mut store = memory_store();
        assert!(matches!(store.add("#12"), Err(Error::InvalidHex(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_at() {
        let mut store = memory_store();
        for hex in ["#111111", "#222222", "#333333"] {
            store.add(hex).unwrap();
        }
        assert_eq!(store.remove_at(1).unwrap(), "#222222");
        assert_eq!(store.list(), vec!["#111111", "#333333"]);
        assert!(matches!(
            store.remove_at(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_persists_json_array_under_key() {
        let mut store = memory_store();
        store.add("#ABCDEF").unwrap();
        let raw = store.backend().get(SAVED_COLORS_KEY).unwrap().unwrap();
        assert_eq!(raw, r##"["#ABCDEF"]"##);
    }

    #[test]
    fn test_corrupt_json_is_error() {
        let mut backend = MemoryBackend::new();
        backend.set(SAVED_COLORS_KEY, "{not json").unwrap();
        assert!(matches!(SavedColors::open(backend), Err(Error::Json(_))));
    }

    #[test]
    fn test_file_backend_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("store");

        let mut store = SavedColors::open(FileBackend::new(&root)).unwrap();
        store.add("#2E8B57").unwrap();
        store.add("#000000").unwrap();
        assert!(root.join("savedColors.json").exists());

        let mut reopened = SavedColors::open(FileBackend::new(&root)).unwrap();
        assert_eq!(reopened.list(), vec!["#2E8B57", "#000000"]);
        reopened.remove_at(0).unwrap();

        let again = SavedColors::open(FileBackend::new(&root)).unwrap();
        assert_eq!(again.list(), vec!["#000000"]);
    }

    /// Backend that reads fine but refuses every write.
    #[derive(Debug, Default)]
    struct ReadOnlyBackend {
        inner: MemoryBackend,
    }

    impl KeyValueBackend for ReadOnlyBackend {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(io::Error::other("disk full").into())
        }
    }

    #[test]
    fn test_failed_write_leaves_list_unchanged() {
        let mut backend = ReadOnlyBackend::default();
        backend.inner.set(SAVED_COLORS_KEY, r##"["#000000"]"##).unwrap();
        let mut store = SavedColors::open(backend).unwrap();

        assert!(matches!(store.add("#2E8B57"), Err(Error::Io(_))));
        assert_eq!(store.list(), vec!["#000000"]);
        // A retry must try to write again rather than report a duplicate
        assert!(matches!(store.add("#2E8B57"), Err(Error::Io(_))));

        assert!(matches!(store.remove_at(0), Err(Error::Io(_))));
        assert_eq!(store.list(), vec!["#000000"]);
    }

    #[test]
    fn test_open_normalizes_stored_entries() {
        let mut backend = MemoryBackend::new();
        backend
            .set(SAVED_COLORS_KEY, r##"["#2e8b57", "ff0000", "#2E8B57"]"##)
            .unwrap();
        let mut store = SavedColors::open(backend).unwrap();
        assert_eq!(store.list(), vec!["#2E8B57", "#FF0000"]);
        assert_eq!(store.add("#2e8b57").unwrap(), AddOutcome::AlreadyPresent);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_open_rejects_non_hex_entry() {
        let mut backend = MemoryBackend::new();
        backend.set(SAVED_COLORS_KEY, r#"["teal"]"#).unwrap();
        assert!(matches!(SavedColors::open(backend), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn test_file_backend_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert_eq!(backend.get("absent").unwrap(), None);
        assert_eq!(backend.dir(), dir.path());
    }
}
